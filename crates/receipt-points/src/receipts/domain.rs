use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::parser::{self, FieldError};
use super::scoring;

/// Opaque identifier issued when a receipt is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReceiptId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One purchased line item, priced in cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptItem {
    pub description: String,
    pub price_cents: u64,
}

/// A parsed purchase. `points` stays `None` until the receipt has been scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub retailer: String,
    /// Naive local timestamp; no timezone is captured.
    pub purchased_at: NaiveDateTime,
    pub items: Vec<ReceiptItem>,
    /// Declared sum of the item prices, in cents.
    pub total_cents: u64,
    pub points: Option<u64>,
}

impl Receipt {
    /// Scores the receipt unless it already carries points, and records the result.
    pub fn assign_points(&mut self) -> u64 {
        let points = scoring::calculate_points(self);
        self.points = Some(points);
        points
    }
}

/// Raw receipt payload as submitted by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSubmission {
    pub retailer: String,
    /// `YYYY-MM-DD`
    pub purchase_date: String,
    /// 24-hour `HH:MM`
    pub purchase_time: String,
    pub items: Vec<SubmittedItem>,
    /// Monetary text such as `"35.35"`.
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedItem {
    pub short_description: String,
    pub price: String,
}

/// Submission field that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptField {
    PurchaseDate,
    PurchaseTime,
    ItemPrice(usize),
    Total,
}

impl fmt::Display for ReceiptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptField::PurchaseDate => f.write_str("purchaseDate"),
            ReceiptField::PurchaseTime => f.write_str("purchaseTime"),
            ReceiptField::ItemPrice(index) => write!(f, "items[{index}].price"),
            ReceiptField::Total => f.write_str("total"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {source}")]
pub struct InvalidReceipt {
    pub field: ReceiptField,
    #[source]
    pub source: FieldError,
}

impl InvalidReceipt {
    fn at(field: ReceiptField) -> impl FnOnce(FieldError) -> Self {
        move |source| Self { field, source }
    }
}

impl TryFrom<ReceiptSubmission> for Receipt {
    type Error = InvalidReceipt;

    fn try_from(submission: ReceiptSubmission) -> Result<Self, Self::Error> {
        let ReceiptSubmission {
            retailer,
            purchase_date,
            purchase_time,
            items,
            total,
        } = submission;

        let date = parser::parse_date(&purchase_date)
            .map_err(InvalidReceipt::at(ReceiptField::PurchaseDate))?;
        let (hour, minute) = parser::parse_time(&purchase_time)
            .map_err(InvalidReceipt::at(ReceiptField::PurchaseTime))?;
        let purchased_at = parser::combine(date, hour, minute)
            .map_err(InvalidReceipt::at(ReceiptField::PurchaseTime))?;

        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let price_cents = parser::parse_amount(&item.price)
                    .map_err(InvalidReceipt::at(ReceiptField::ItemPrice(index)))?;
                Ok(ReceiptItem {
                    description: item.short_description,
                    price_cents,
                })
            })
            .collect::<Result<Vec<_>, InvalidReceipt>>()?;

        let total_cents =
            parser::parse_amount(&total).map_err(InvalidReceipt::at(ReceiptField::Total))?;

        Ok(Self {
            retailer,
            purchased_at,
            items,
            total_cents,
            points: None,
        })
    }
}
