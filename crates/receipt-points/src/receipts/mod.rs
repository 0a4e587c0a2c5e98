//! Receipt intake, field parsing, points scoring, and in-memory storage.
//!
//! A submission flows through [`parser`] into a typed [`Receipt`], is scored once by
//! [`scoring`], and is handed to a [`ReceiptStore`] which issues its identifier. Lookups go
//! straight to the store.

pub mod domain;
pub mod ids;
pub mod parser;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    InvalidReceipt, Receipt, ReceiptField, ReceiptId, ReceiptItem, ReceiptSubmission,
    SubmittedItem,
};
pub use ids::{IdGenerator, IdentifierError, RandomIds};
pub use parser::FieldError;
pub use router::{receipt_router, PointsResponse, ProcessReceiptResponse};
pub use scoring::{calculate_points, score_breakdown, RuleScore, ScoringRule};
pub use service::{ReceiptPointsService, ReceiptServiceError};
pub use store::{InMemoryReceiptStore, ReceiptRecord, ReceiptStore, StoreError};
