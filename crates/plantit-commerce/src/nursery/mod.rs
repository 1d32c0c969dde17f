//! Nursery partner onboarding.

mod registration;

pub use registration::{
    BusinessType, DocumentRef, NurseryApplication, NurseryRegistrar, RegistrationReceipt,
    DOCUMENT_EXTENSIONS, MIN_YEAR_ESTABLISHED, NEXT_STEPS, REVIEW_WINDOW, SPECIALIZATIONS,
};
