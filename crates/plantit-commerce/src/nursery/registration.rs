//! Nursery partner registration.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::checkout::is_valid_email;
use crate::config::NurseryConfig;
use crate::error::{CommerceError, ValidationErrors};
use crate::ids::ApplicationId;

/// Specializations a nursery can list.
pub const SPECIALIZATIONS: [&str; 12] = [
    "Indoor Plants",
    "Outdoor Plants",
    "Succulents",
    "Flowering Plants",
    "Fruit Plants",
    "Vegetable Plants",
    "Medicinal Plants",
    "Bonsai",
    "Seeds",
    "Fertilizers",
    "Plant Medicines",
    "Garden Tools",
];

/// File extensions accepted for uploaded documents.
pub const DOCUMENT_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

/// Earliest accepted establishment year.
pub const MIN_YEAR_ESTABLISHED: i32 = 1900;

/// How long review takes, as told to the applicant.
pub const REVIEW_WINDOW: &str = "2-3 business days";

/// What happens after submission.
pub const NEXT_STEPS: [&str; 4] = [
    "Document verification (1-2 days)",
    "Phone interview with our partnership team",
    "Platform onboarding and training",
    "Start receiving orders from customers",
];

/// How the nursery sells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    #[default]
    Retail,
    Wholesale,
    /// Retail and wholesale.
    Both,
    Online,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Retail => "retail",
            BusinessType::Wholesale => "wholesale",
            BusinessType::Both => "both",
            BusinessType::Online => "online",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BusinessType::Retail => "Retail Nursery",
            BusinessType::Wholesale => "Wholesale Nursery",
            BusinessType::Both => "Retail & Wholesale",
            BusinessType::Online => "Online Only",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BusinessType {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "retail" => Ok(BusinessType::Retail),
            "wholesale" => Ok(BusinessType::Wholesale),
            "both" => Ok(BusinessType::Both),
            "online" => Ok(BusinessType::Online),
            other => Err(CommerceError::UnknownValue {
                kind: "business type",
                value: other.to_string(),
            }),
        }
    }
}

/// An uploaded supporting document. Only the name is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub file_name: String,
}

impl DocumentRef {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Whether the extension is one of [`DOCUMENT_EXTENSIONS`].
    pub fn has_accepted_extension(&self) -> bool {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                DOCUMENT_EXTENSIONS
                    .iter()
                    .any(|accepted| ext.eq_ignore_ascii_case(accepted))
            })
    }
}

/// The partner registration form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NurseryApplication {
    // Business
    pub nursery_name: String,
    pub owner_name: String,
    pub license_number: String,
    pub business_type: BusinessType,
    pub year_established: Option<i32>,

    // Contact
    pub email: String,
    pub phone: String,
    pub alternate_phone: Option<String>,
    pub website: Option<String>,

    // Address
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub landmark: Option<String>,

    // Operations
    pub specializations: Vec<String>,
    /// Delivery radius in km.
    pub delivery_radius_km: Option<u32>,
    pub operating_hours: Option<String>,
    pub description: Option<String>,

    // Documents
    pub license_document: Option<DocumentRef>,
    pub business_proof: Option<DocumentRef>,

    // Agreements
    pub agree_to_terms: bool,
    pub agree_to_commission: bool,
}

impl NurseryApplication {
    /// Tick or untick a specialization. Returns whether it is now selected.
    ///
    /// Names outside [`SPECIALIZATIONS`] are rejected.
    pub fn toggle_specialization(&mut self, name: &str) -> Result<bool, CommerceError> {
        let canonical = SPECIALIZATIONS
            .iter()
            .find(|s| s.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CommerceError::UnknownValue {
                kind: "specialization",
                value: name.to_string(),
            })?;

        if let Some(pos) = self.specializations.iter().position(|s| s == canonical) {
            self.specializations.remove(pos);
            Ok(false)
        } else {
            self.specializations.push((*canonical).to_string());
            Ok(true)
        }
    }

    /// Check the whole form against the current year.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_for_year(Utc::now().year())
    }

    /// Check the whole form, with `current_year` as the latest accepted
    /// establishment year.
    pub fn validate_for_year(&self, current_year: i32) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.require("nursery_name", &self.nursery_name);
        errors.require("owner_name", &self.owner_name);
        errors.require("license_number", &self.license_number);
        if let Some(year) = self.year_established {
            if !(MIN_YEAR_ESTABLISHED..=current_year).contains(&year) {
                let bounds = format!("{MIN_YEAR_ESTABLISHED} and {current_year}");
                errors.add("year_established", format!("must be between {bounds}"));
            }
        }

        errors.require("email", &self.email);
        if !self.email.trim().is_empty() && !is_valid_email(self.email.trim()) {
            errors.add("email", "is not a valid email address");
        }
        errors.require("phone", &self.phone);

        errors.require("address", &self.address);
        errors.require("city", &self.city);
        errors.require("state", &self.state);
        errors.require("pin_code", &self.pin_code);

        let unknown = self.specializations.iter().find(|s| !is_specialization(s));
        if let Some(unknown) = unknown {
            errors.add(
                "specializations",
                format!("unknown specialization '{}'", unknown),
            );
        }
        if self.delivery_radius_km == Some(0) {
            errors.add("delivery_radius_km", "must be at least 1 km");
        }

        let license = self.license_document.as_ref();
        check_document(&mut errors, "license_document", license);
        let proof = self.business_proof.as_ref();
        check_document(&mut errors, "business_proof", proof);

        if !self.agree_to_terms {
            errors.add("agree_to_terms", "must be accepted");
        }
        if !self.agree_to_commission {
            errors.add("agree_to_commission", "must be accepted");
        }

        errors.into_result()
    }
}

fn is_specialization(name: &str) -> bool {
    SPECIALIZATIONS.iter().any(|known| *known == name)
}

fn check_document(errors: &mut ValidationErrors, field: &'static str, doc: Option<&DocumentRef>) {
    match doc {
        None => errors.add(field, "is required"),
        Some(doc) if !doc.has_accepted_extension() => errors.add(
            field,
            format!("must be one of: {}", DOCUMENT_EXTENSIONS.join(", ")),
        ),
        Some(_) => {}
    }
}

/// Acknowledgement returned for an accepted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    pub id: ApplicationId,
    pub nursery_name: String,
    /// Where the partnership team will follow up.
    pub contact_email: String,
    pub submitted_at: DateTime<Utc>,
    pub review_window: String,
    /// What happens after submission, in order.
    pub next_steps: Vec<String>,
}

/// Accepts nursery applications.
#[derive(Debug, Clone)]
pub struct NurseryRegistrar {
    review_delay: Duration,
}

impl NurseryRegistrar {
    pub fn new(config: &NurseryConfig) -> Self {
        Self {
            review_delay: config.review_delay(),
        }
    }

    /// Validate and submit. A valid application is acknowledged once the
    /// review delay has passed; an invalid one is rejected at once.
    pub async fn submit(
        &self,
        application: &NurseryApplication,
    ) -> Result<RegistrationReceipt, CommerceError> {
        if let Err(errors) = application.validate() {
            tracing::warn!(
                nursery = %application.nursery_name,
                fields = ?errors.fields(),
                "nursery application rejected"
            );
            return Err(errors.into());
        }

        tokio::time::sleep(self.review_delay).await;

        let receipt = RegistrationReceipt {
            id: ApplicationId::generate(),
            nursery_name: application.nursery_name.trim().to_string(),
            contact_email: application.email.trim().to_string(),
            submitted_at: Utc::now(),
            review_window: REVIEW_WINDOW.to_string(),
            next_steps: NEXT_STEPS.iter().map(|step| step.to_string()).collect(),
        };
        tracing::info!(
            application = %receipt.id,
            nursery = %receipt.nursery_name,
            business_type = application.business_type.as_str(),
            "nursery application submitted"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application() -> NurseryApplication {
        NurseryApplication {
            nursery_name: "Green Thumb Nursery".into(),
            owner_name: "Ravi Kumar".into(),
            license_number: "BL123456789".into(),
            business_type: BusinessType::Both,
            year_established: Some(2009),
            email: "hello@greenthumb.in".into(),
            phone: "+91 98450 00000".into(),
            address: "Plot 14, Hebbal Road".into(),
            city: "Bengaluru".into(),
            state: "Karnataka".into(),
            pin_code: "560024".into(),
            specializations: vec!["Bonsai".into(), "Succulents".into()],
            delivery_radius_km: Some(25),
            license_document: Some(DocumentRef::new("license.pdf")),
            business_proof: Some(DocumentRef::new("gst.PNG")),
            agree_to_terms: true,
            agree_to_commission: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_application_is_valid() {
        assert!(application().validate_for_year(2025).is_ok());
    }

    #[test]
    fn test_empty_form_lists_every_required_field() {
        let errors = NurseryApplication::default()
            .validate_for_year(2025)
            .unwrap_err();
        for field in [
            "nursery_name",
            "owner_name",
            "license_number",
            "email",
            "phone",
            "address",
            "city",
            "state",
            "pin_code",
            "license_document",
            "business_proof",
            "agree_to_terms",
            "agree_to_commission",
        ] {
            assert!(errors.has(field), "missing error for {}", field);
        }
        assert!(!errors.has("year_established"));
        assert!(!errors.has("website"));
    }

    #[test]
    fn test_year_bounds() {
        let mut app = application();
        app.year_established = Some(1899);
        let errors = app.validate_for_year(2025).unwrap_err();
        assert!(errors.has("year_established"));

        app.year_established = Some(2026);
        assert!(app.validate_for_year(2025).is_err());
        assert!(app.validate_for_year(2026).is_ok());

        app.year_established = Some(1900);
        assert!(app.validate_for_year(2025).is_ok());
    }

    #[test]
    fn test_document_extensions() {
        assert!(DocumentRef::new("scan.JPEG").has_accepted_extension());
        assert!(!DocumentRef::new("scan.docx").has_accepted_extension());
        assert!(!DocumentRef::new("pdf").has_accepted_extension());

        let mut app = application();
        app.business_proof = Some(DocumentRef::new("proof.zip"));
        let errors = app.validate_for_year(2025).unwrap_err();
        assert_eq!(errors.fields(), ["business_proof"]);
    }

    #[test]
    fn test_delivery_radius_minimum() {
        let mut app = application();
        app.delivery_radius_km = Some(0);
        let errors = app.validate_for_year(2025).unwrap_err();
        assert!(errors.has("delivery_radius_km"));
        app.delivery_radius_km = None;
        assert!(app.validate_for_year(2025).is_ok());
    }

    #[test]
    fn test_toggle_specialization() {
        let mut app = NurseryApplication::default();
        assert!(app.toggle_specialization("bonsai").unwrap());
        assert!(app.toggle_specialization("Seeds").unwrap());
        assert_eq!(app.specializations, ["Bonsai", "Seeds"]);

        assert!(!app.toggle_specialization("Bonsai").unwrap());
        assert_eq!(app.specializations, ["Seeds"]);

        assert!(app.toggle_specialization("Cacti").is_err());
    }

    #[test]
    fn test_business_type_parse() {
        assert_eq!(
            "Wholesale".parse::<BusinessType>().unwrap(),
            BusinessType::Wholesale
        );
        assert_eq!(BusinessType::default(), BusinessType::Retail);
        assert!("franchise".parse::<BusinessType>().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_review_delay() {
        let registrar = NurseryRegistrar::new(&NurseryConfig::default());

        let start = tokio::time::Instant::now();
        let receipt = registrar.submit(&application()).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_millis(1100));
        assert_eq!(receipt.nursery_name, "Green Thumb Nursery");
        assert_eq!(receipt.contact_email, "hello@greenthumb.in");
        assert!(receipt.id.as_str().starts_with("npa_"));
        assert_eq!(receipt.next_steps.len(), 4);
        assert_eq!(receipt.next_steps[0], NEXT_STEPS[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_rejects_invalid_immediately() {
        let registrar = NurseryRegistrar::new(&NurseryConfig::default());
        let mut app = application();
        app.agree_to_terms = false;

        let start = tokio::time::Instant::now();
        let err = registrar.submit(&app).await.unwrap_err();
        assert_eq!(start.elapsed(), Duration::ZERO);
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.fields(), ["agree_to_terms"]);
    }
}
