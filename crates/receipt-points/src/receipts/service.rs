//! Submission and lookup operations over a [`ReceiptStore`].

use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{InvalidReceipt, Receipt, ReceiptId, ReceiptSubmission};
use super::store::{ReceiptRecord, ReceiptStore, StoreError};

/// Service composing the field parser, scoring rules, and receipt store.
pub struct ReceiptPointsService<S> {
    store: Arc<S>,
}

impl<S> ReceiptPointsService<S>
where
    S: ReceiptStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Parse, score, and store a submission, returning the issued identifier.
    ///
    /// Nothing is stored unless every field parses.
    pub fn submit(
        &self,
        submission: ReceiptSubmission,
    ) -> Result<ReceiptId, ReceiptServiceError> {
        let mut receipt = Receipt::try_from(submission).map_err(|err| {
            warn!(error = %err, "rejected receipt submission");
            err
        })?;
        let points = receipt.assign_points();
        let retailer = receipt.retailer.clone();

        let id = self.store.put(receipt)?;
        info!(receipt_id = %id, %retailer, points, "receipt processed");
        Ok(id)
    }

    /// Points assigned to a previously submitted receipt.
    pub fn points(&self, id: &ReceiptId) -> Result<u64, ReceiptServiceError> {
        Ok(self.get(id)?.points())
    }

    pub fn get(&self, id: &ReceiptId) -> Result<ReceiptRecord, ReceiptServiceError> {
        Ok(self.store.get(id)?)
    }
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Invalid(#[from] InvalidReceipt),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReceiptServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(StoreError::NotFound(_)))
    }
}
