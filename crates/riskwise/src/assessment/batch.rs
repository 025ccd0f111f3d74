use std::io::{Read, Write};

use serde::Serialize;
use tracing::{info, warn};

use super::answers::{Answer, AnswerSet};
use super::domains::RiskDomain;
use super::service::RiskAssessmentService;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub scored: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
struct ScoredRow {
    row: usize,
    probability: Option<f64>,
    label: Option<&'static str>,
    error: Option<String>,
}

/// Score every row of a CSV whose header names answer keys.
///
/// Writes `row,probability,label,error` per input row. A row that fails to encode or score is
/// reported in the `error` column and counted; malformed CSV or a failed write aborts.
pub fn score_csv<R: Read, W: Write>(
    service: &RiskAssessmentService,
    domain: RiskDomain,
    reader: R,
    writer: W,
) -> Result<BatchSummary, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut summary = BatchSummary::default();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let answers: AnswerSet = headers
            .iter()
            .zip(record.iter())
            .filter_map(|(field, cell)| {
                Answer::from_cell(cell).map(|answer| (field.to_string(), answer))
            })
            .collect();

        let row = index + 1;
        let scored = match service.predict(domain, &answers) {
            Ok(prediction) => {
                summary.scored += 1;
                ScoredRow {
                    row,
                    probability: Some(prediction.probability),
                    label: prediction.label.map(|label| label.label()),
                    error: None,
                }
            }
            Err(err) => {
                summary.failed += 1;
                warn!(%domain, row, error = %err, "batch row not scored");
                ScoredRow {
                    row,
                    probability: None,
                    label: None,
                    error: Some(err.to_string()),
                }
            }
        };
        csv_writer.serialize(scored)?;
    }

    csv_writer.flush()?;
    info!(%domain, scored = summary.scored, failed = summary.failed, "batch scoring finished");
    Ok(summary)
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("batch CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("batch output error: {0}")]
    Io(#[from] std::io::Error),
}
