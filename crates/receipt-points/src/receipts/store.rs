//! Receipt storage keyed by issued identifier.
//!
//! Receipts are scored before they enter the store and are never rescored once stored.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use super::domain::{Receipt, ReceiptId};
use super::ids::{IdGenerator, IdentifierError, RandomIds};

/// A stored receipt together with the identifier it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRecord {
    pub id: ReceiptId,
    pub receipt: Receipt,
}

impl ReceiptRecord {
    /// Points assigned when the receipt was stored.
    pub fn points(&self) -> u64 {
        // `put` scores every receipt before it is recorded.
        self.receipt.points.unwrap_or_default()
    }
}

/// Storage abstraction so the service can be exercised against alternative backends.
pub trait ReceiptStore: Send + Sync {
    /// Issues a fresh identifier and records the receipt under it, scoring it first when no
    /// points have been assigned.
    fn put(&self, receipt: Receipt) -> Result<ReceiptId, StoreError>;
    fn get(&self, id: &ReceiptId) -> Result<ReceiptRecord, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no receipt with ID \"{0}\" exists")]
    NotFound(ReceiptId),
    #[error("receipt ID \"{0}\" was already issued")]
    Conflict(ReceiptId),
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    #[error("receipt store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local receipt storage guarded by a single reader/writer lock.
///
/// Entries live for the lifetime of the store; nothing is evicted.
#[derive(Debug, Default)]
pub struct InMemoryReceiptStore<G = RandomIds> {
    receipts: RwLock<HashMap<ReceiptId, Receipt>>,
    ids: G,
}

impl InMemoryReceiptStore<RandomIds> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: IdGenerator> InMemoryReceiptStore<G> {
    pub fn with_ids(ids: G) -> Self {
        Self {
            receipts: RwLock::new(HashMap::new()),
            ids,
        }
    }

    /// Number of stored receipts, counted even when a writer panicked while holding the lock.
    pub fn len(&self) -> usize {
        self.receipts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<G: IdGenerator> ReceiptStore for InMemoryReceiptStore<G> {
    fn put(&self, mut receipt: Receipt) -> Result<ReceiptId, StoreError> {
        receipt.assign_points();
        let id = self.ids.generate()?;

        let mut guard = self
            .receipts
            .write()
            .map_err(|_| StoreError::Unavailable("receipt lock poisoned".to_string()))?;
        if guard.contains_key(&id) {
            return Err(StoreError::Conflict(id));
        }
        guard.insert(id.clone(), receipt);
        drop(guard);

        debug!(receipt_id = %id, "receipt stored");
        Ok(id)
    }

    fn get(&self, id: &ReceiptId) -> Result<ReceiptRecord, StoreError> {
        let guard = self
            .receipts
            .read()
            .map_err(|_| StoreError::Unavailable("receipt lock poisoned".to_string()))?;
        let receipt = guard
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        Ok(ReceiptRecord {
            id: id.clone(),
            receipt,
        })
    }
}
