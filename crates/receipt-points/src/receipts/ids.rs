use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Builder;

use super::domain::ReceiptId;

/// Source of fresh receipt identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Result<ReceiptId, IdentifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum IdentifierError {
    #[error("failed to read random bytes: {0}")]
    RandomSource(#[from] rand::Error),
}

/// Random version 4 UUIDs drawn from the operating system's secure random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl RandomIds {
    pub fn from_bytes(bytes: [u8; 16]) -> ReceiptId {
        // Builder fixes the version nibble to 4 and the variant bits to 10.
        let uuid = Builder::from_random_bytes(bytes).into_uuid();
        ReceiptId(uuid.hyphenated().to_string())
    }
}

impl IdGenerator for RandomIds {
    fn generate(&self) -> Result<ReceiptId, IdentifierError> {
        let mut bytes = [0_u8; 16];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(Self::from_bytes(bytes))
    }
}
