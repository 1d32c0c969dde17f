//! Plant scan module.
//!
//! Photo intake, the diagnosis result types, the analyser seam and the scan
//! session that feeds recommended products into the cart.

mod image;
mod provider;
mod report;
mod session;

pub use image::{guess_mime_type, PlantImage};
pub use provider::{
    DiagnosisProvider, DiagnosisSelector, FixedSelector, MockDiagnosisProvider, RandomSelector,
};
pub use report::{builtin_diagnoses, Diagnosis, Severity};
pub use session::ScanSession;
