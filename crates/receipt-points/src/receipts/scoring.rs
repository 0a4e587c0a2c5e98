//! Reward-points rules applied to a parsed [`Receipt`].
//!
//! Each rule contributes independently; the total is the sum of the per-rule scores.

use chrono::{Datelike, Timelike};
use serde::Serialize;
use unicode_general_category::{get_general_category, GeneralCategory};

use super::domain::Receipt;

const ROUND_DOLLAR_BONUS: u64 = 50;
const QUARTER_MULTIPLE_BONUS: u64 = 25;
const ITEM_PAIR_BONUS: u64 = 5;
const ODD_DAY_BONUS: u64 = 6;
const AFTERNOON_BONUS: u64 = 10;
/// `price_cents * 0.2 / 100` expressed as a single integer divisor.
const DESCRIPTION_PRICE_DIVISOR: u64 = 500;
const AFTERNOON_HOURS: std::ops::Range<u32> = 14..16;

/// Independent rules that each contribute to a receipt's points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerCharacters,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl ScoringRule {
    pub fn label(&self) -> &'static str {
        match self {
            ScoringRule::RetailerCharacters => "retailer characters",
            ScoringRule::RoundDollarTotal => "round dollar total",
            ScoringRule::QuarterMultipleTotal => "total is a multiple of 0.25",
            ScoringRule::ItemPairs => "item pairs",
            ScoringRule::DescriptionLength => "description length multiple of 3",
            ScoringRule::OddPurchaseDay => "odd purchase day",
            ScoringRule::AfternoonPurchase => "purchased between 2pm and 4pm",
        }
    }
}

/// Points contributed by a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleScore {
    pub rule: ScoringRule,
    pub points: u64,
    pub notes: String,
}

/// Returns the receipt's points, scoring it only when no points have been assigned yet.
///
/// Existing points are never recomputed, so a change to the rules cannot alter a value that
/// was already handed out. A receipt scored to zero keeps its zero.
pub fn calculate_points(receipt: &Receipt) -> u64 {
    if let Some(points) = receipt.points {
        return points;
    }

    score_breakdown(receipt)
        .iter()
        .map(|score| score.points)
        .sum()
}

/// Evaluates every rule against the receipt, ignoring any points already assigned.
pub fn score_breakdown(receipt: &Receipt) -> Vec<RuleScore> {
    vec![
        retailer_characters(receipt),
        round_dollar_total(receipt),
        quarter_multiple_total(receipt),
        item_pairs(receipt),
        description_length(receipt),
        odd_purchase_day(receipt),
        afternoon_purchase(receipt),
    ]
}

/// Letters of any case or script, and decimal digits. Other numerics and marks do not count.
fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

fn retailer_characters(receipt: &Receipt) -> RuleScore {
    let count = receipt
        .retailer
        .chars()
        .filter(|c| is_letter_or_digit(*c))
        .count() as u64;

    RuleScore {
        rule: ScoringRule::RetailerCharacters,
        points: count,
        notes: format!("{count} alphanumeric character(s) in {:?}", receipt.retailer),
    }
}

fn round_dollar_total(receipt: &Receipt) -> RuleScore {
    let round = receipt.total_cents % 100 == 0;
    RuleScore {
        rule: ScoringRule::RoundDollarTotal,
        points: if round { ROUND_DOLLAR_BONUS } else { 0 },
        notes: if round {
            "total has no cents".to_string()
        } else {
            "total has cents".to_string()
        },
    }
}

fn quarter_multiple_total(receipt: &Receipt) -> RuleScore {
    let quarter = receipt.total_cents % 25 == 0;
    RuleScore {
        rule: ScoringRule::QuarterMultipleTotal,
        points: if quarter { QUARTER_MULTIPLE_BONUS } else { 0 },
        notes: format!("{} cents remainder over 0.25", receipt.total_cents % 25),
    }
}

fn item_pairs(receipt: &Receipt) -> RuleScore {
    let pairs = (receipt.items.len() / 2) as u64;
    RuleScore {
        rule: ScoringRule::ItemPairs,
        points: ITEM_PAIR_BONUS * pairs,
        notes: format!("{pairs} pair(s) across {} item(s)", receipt.items.len()),
    }
}

fn description_length(receipt: &Receipt) -> RuleScore {
    let mut matched = 0;
    let mut points = 0;

    for item in &receipt.items {
        // Byte length of the trimmed text.
        if item.description.trim().len() % 3 != 0 {
            continue;
        }
        matched += 1;
        points += item.price_cents.div_ceil(DESCRIPTION_PRICE_DIVISOR);
    }

    RuleScore {
        rule: ScoringRule::DescriptionLength,
        points,
        notes: format!("{matched} item description(s) with length divisible by 3"),
    }
}

fn odd_purchase_day(receipt: &Receipt) -> RuleScore {
    let day = receipt.purchased_at.day();
    RuleScore {
        rule: ScoringRule::OddPurchaseDay,
        points: if day % 2 == 1 { ODD_DAY_BONUS } else { 0 },
        notes: format!("purchased on day {day}"),
    }
}

fn afternoon_purchase(receipt: &Receipt) -> RuleScore {
    let hour = receipt.purchased_at.hour();
    RuleScore {
        rule: ScoringRule::AfternoonPurchase,
        points: if AFTERNOON_HOURS.contains(&hour) {
            AFTERNOON_BONUS
        } else {
            0
        },
        notes: format!("purchased at hour {hour}"),
    }
}
