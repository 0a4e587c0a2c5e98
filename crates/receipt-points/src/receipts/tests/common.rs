use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::receipts::domain::{
    Receipt, ReceiptId, ReceiptItem, ReceiptSubmission, SubmittedItem,
};
use crate::receipts::ids::{IdGenerator, IdentifierError};
use crate::receipts::store::InMemoryReceiptStore;
use crate::receipts::{receipt_router, ReceiptPointsService};

/// Issues `receipt-000001`, `receipt-000002`, ...
#[derive(Debug, Default)]
pub(crate) struct SequentialIds {
    next: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> Result<ReceiptId, IdentifierError> {
        let id = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(ReceiptId(format!("receipt-{id:06}")))
    }
}

/// Always issues the same identifier.
#[derive(Debug)]
pub(crate) struct FixedIds(pub(crate) String);

impl IdGenerator for FixedIds {
    fn generate(&self) -> Result<ReceiptId, IdentifierError> {
        Ok(ReceiptId(self.0.clone()))
    }
}

/// Simulates an exhausted random source.
#[derive(Debug)]
pub(crate) struct FailingIds;

impl IdGenerator for FailingIds {
    fn generate(&self) -> Result<ReceiptId, IdentifierError> {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "entropy unavailable");
        Err(IdentifierError::RandomSource(rand::Error::new(io)))
    }
}

pub(crate) fn sample_receipt(points: Option<u64>) -> Receipt {
    Receipt {
        retailer: "Walgreens".to_string(),
        purchased_at: NaiveDate::from_ymd_opt(2022, 1, 2)
            .and_then(|date| date.and_hms_opt(8, 13, 0))
            .expect("valid timestamp"),
        items: vec![ReceiptItem {
            description: "Dasani".to_string(),
            price_cents: 140,
        }],
        total_cents: 140,
        points,
    }
}

fn item(description: &str, price: &str) -> SubmittedItem {
    SubmittedItem {
        short_description: description.to_string(),
        price: price.to_string(),
    }
}

/// Target receipt worth 28 points.
pub(crate) fn target_submission() -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        items: vec![
            item("Mountain Dew 12PK", "6.49"),
            item("Emils Cheese Pizza", "12.25"),
            item("Knorr Creamy Chicken", "1.26"),
            item("Doritos Nacho Cheese", "3.35"),
            item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
        total: "35.35".to_string(),
    }
}

/// Corner market receipt worth 109 points.
pub(crate) fn corner_market_submission() -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: "M&M Corner Market".to_string(),
        purchase_date: "2022-03-20".to_string(),
        purchase_time: "14:33".to_string(),
        items: vec![
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
        ],
        total: "9.00".to_string(),
    }
}

pub(crate) type SequentialStore = InMemoryReceiptStore<SequentialIds>;

pub(crate) fn build_service() -> (ReceiptPointsService<SequentialStore>, Arc<SequentialStore>) {
    let store = Arc::new(InMemoryReceiptStore::with_ids(SequentialIds::default()));
    (ReceiptPointsService::new(store.clone()), store)
}

pub(crate) fn router_with_service<S>(service: ReceiptPointsService<S>) -> axum::Router
where
    S: crate::receipts::ReceiptStore + 'static,
{
    receipt_router(Arc::new(service))
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
