use super::common::*;
use crate::receipts::domain::{ReceiptField, ReceiptId};
use crate::receipts::ids::IdentifierError;
use crate::receipts::store::{InMemoryReceiptStore, ReceiptStore, StoreError};
use crate::receipts::{ReceiptPointsService, ReceiptServiceError};
use std::sync::Arc;

#[test]
fn submit_scores_target_receipt() {
    let (service, _) = build_service();

    let id = service
        .submit(target_submission())
        .expect("target receipt accepted");

    assert_eq!(service.points(&id).expect("points recorded"), 28);
}

#[test]
fn submit_scores_corner_market_receipt() {
    let (service, _) = build_service();

    let id = service
        .submit(corner_market_submission())
        .expect("corner market receipt accepted");

    assert_eq!(service.points(&id).expect("points recorded"), 109);
}

#[test]
fn stored_receipt_carries_assigned_points() {
    let (service, store) = build_service();

    let id = service.submit(target_submission()).expect("accepted");
    let record = store.get(&id).expect("stored");

    assert_eq!(record.receipt.points, Some(28));
    assert_eq!(record.receipt.items.len(), 5);
    assert_eq!(record.receipt.total_cents, 3535);
}

#[test]
fn malformed_total_is_rejected_without_storing() {
    let (service, store) = build_service();

    for total in ["abc", "12,50"] {
        let mut submission = target_submission();
        submission.total = total.to_string();

        match service.submit(submission) {
            Err(ReceiptServiceError::Invalid(err)) => {
                assert_eq!(err.field, ReceiptField::Total);
                assert!(!err.source.is_validation());
            }
            other => panic!("expected parse error for {total:?}, got {other:?}"),
        }
    }

    assert!(store.is_empty());
    assert!(service
        .points(&ReceiptId("receipt-000001".to_string()))
        .expect_err("nothing stored")
        .is_not_found());
}

#[test]
fn invalid_purchase_time_is_rejected() {
    let (service, store) = build_service();
    let mut submission = corner_market_submission();
    submission.purchase_time = "14:75".to_string();

    match service.submit(submission) {
        Err(ReceiptServiceError::Invalid(err)) => {
            assert_eq!(err.field, ReceiptField::PurchaseTime);
            assert!(err.source.is_validation());
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(store.is_empty());
}

#[test]
fn points_propagates_not_found() {
    let (service, _) = build_service();

    match service.points(&ReceiptId("missing".to_string())) {
        Err(ReceiptServiceError::Store(StoreError::NotFound(_))) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn submit_propagates_random_source_failures() {
    let store = Arc::new(InMemoryReceiptStore::with_ids(FailingIds));
    let service = ReceiptPointsService::new(store.clone());

    match service.submit(target_submission()) {
        Err(ReceiptServiceError::Store(StoreError::Identifier(
            IdentifierError::RandomSource(_),
        ))) => {}
        other => panic!("expected random source error, got {other:?}"),
    }
    assert!(store.is_empty());
}

#[test]
fn empty_receipt_still_earns_total_bonuses() {
    let (service, _) = build_service();
    let mut submission = target_submission();
    submission.retailer = "&".to_string();
    submission.items.clear();
    submission.total = "0.00".to_string();
    submission.purchase_date = "2022-01-02".to_string();

    let id = service.submit(submission).expect("accepted");
    assert_eq!(service.points(&id).expect("stored"), 75);
}
