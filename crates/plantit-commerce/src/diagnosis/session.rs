//! Scan session: one selected photo and its latest diagnosis.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::diagnosis::{Diagnosis, DiagnosisProvider, PlantImage};
use crate::error::CommerceError;

/// State behind the scan screen.
///
/// Choosing a new photo discards the previous result.
pub struct ScanSession {
    provider: Arc<dyn DiagnosisProvider>,
    image: Option<PlantImage>,
    result: Option<Diagnosis>,
}

impl ScanSession {
    pub fn new(provider: Arc<dyn DiagnosisProvider>) -> Self {
        Self {
            provider,
            image: None,
            result: None,
        }
    }

    /// Select the photo to analyse.
    pub fn select_image(&mut self, image: PlantImage) {
        tracing::debug!(file = image.file_name(), "image selected");
        self.image = Some(image);
        self.result = None;
    }

    pub fn image(&self) -> Option<&PlantImage> {
        self.image.as_ref()
    }

    pub fn result(&self) -> Option<&Diagnosis> {
        self.result.as_ref()
    }

    /// Run the analysis on the selected photo.
    pub async fn analyze(&mut self) -> Result<&Diagnosis, CommerceError> {
        let image = self.image.as_ref().ok_or(CommerceError::NoImageSelected)?;
        let diagnosis = self.provider.analyze(image).await?;
        Ok(self.result.insert(diagnosis))
    }

    fn require_result(&self) -> Result<&Diagnosis, CommerceError> {
        match &self.result {
            Some(diagnosis) => Ok(diagnosis),
            None => Err(CommerceError::DiagnosisNotFound("no analysis yet".into())),
        }
    }

    /// Add one recommended product from the current diagnosis to the cart.
    pub fn add_to_cart(&self, product_id: &str, cart: &CartStore) -> Result<(), CommerceError> {
        let diagnosis = self.require_result()?;
        let product = diagnosis
            .product(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;

        cart.add(product.clone());
        Ok(())
    }

    /// Add every recommended product to the cart. Returns how many were added.
    pub fn add_all_to_cart(&self, cart: &CartStore) -> Result<usize, CommerceError> {
        let diagnosis = self.require_result()?;

        for product in &diagnosis.products {
            cart.add(product.clone());
        }
        Ok(diagnosis.products.len())
    }
}
