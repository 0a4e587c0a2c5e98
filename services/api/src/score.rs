use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{score_breakdown, Receipt, ReceiptSubmission};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Receipt JSON file in the same shape accepted by POST /receipts/process
    #[arg(long)]
    pub(crate) file: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let reader = BufReader::new(File::open(&args.file)?);
    let submission: ReceiptSubmission = serde_json::from_reader(reader)?;
    let report = score_submission(submission)?;
    print!("{report}");
    Ok(())
}

fn score_submission(submission: ReceiptSubmission) -> Result<String, AppError> {
    let mut receipt = Receipt::try_from(submission)?;
    let breakdown = score_breakdown(&receipt);
    let total = receipt.assign_points();

    let mut report = format!(
        "Receipt from {} on {}\n",
        receipt.retailer,
        receipt.purchased_at.format("%Y-%m-%d %H:%M")
    );
    for score in &breakdown {
        report.push_str(&format!(
            "  {:>4}  {:<34} {}\n",
            score.points,
            score.rule.label(),
            score.notes
        ));
    }
    report.push_str(&format!("Total points: {total}\n"));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_points::receipts::SubmittedItem;

    #[test]
    fn report_lists_rules_and_total() {
        let submission = ReceiptSubmission {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".to_string(),
            purchase_time: "14:33".to_string(),
            items: (0..4)
                .map(|_| SubmittedItem {
                    short_description: "Gatorade".to_string(),
                    price: "2.25".to_string(),
                })
                .collect(),
            total: "9.00".to_string(),
        };

        let report = score_submission(submission).expect("scores");
        assert!(report.starts_with("Receipt from M&M Corner Market on 2022-03-20 14:33"));
        assert!(report.contains("round dollar total"));
        assert!(report.ends_with("Total points: 109\n"));
    }

    #[test]
    fn invalid_fields_surface_as_receipt_errors() {
        let submission = ReceiptSubmission {
            retailer: "Target".to_string(),
            purchase_date: "01/01/2022".to_string(),
            purchase_time: "13:01".to_string(),
            items: Vec::new(),
            total: "1.00".to_string(),
        };

        match score_submission(submission) {
            Err(AppError::Receipt(err)) => assert!(err.to_string().contains("purchaseDate")),
            other => panic!("expected receipt error, got {other:?}"),
        }
    }
}
