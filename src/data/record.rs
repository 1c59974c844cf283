//! Record schema for the blood-pressure dataset.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Columns every training row must carry, in dataset order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Workday",
    "Stress_Levels",
    "Sleep_Quality",
    "Tiredness",
    "Upper_BP",
    "Lower_BP",
];

/// One labeled observation: four daily lifestyle features and the two
/// blood-pressure readings measured that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BpRecord {
    #[serde(rename = "Workday")]
    pub workday: f64,
    #[serde(rename = "Stress_Levels")]
    pub stress_levels: f64,
    #[serde(rename = "Sleep_Quality")]
    pub sleep_quality: f64,
    #[serde(rename = "Tiredness")]
    pub tiredness: f64,
    #[serde(rename = "Upper_BP")]
    pub upper_bp: f64,
    #[serde(rename = "Lower_BP")]
    pub lower_bp: f64,
}

impl BpRecord {
    /// Feature vector in training column order.
    pub fn features(&self) -> Vec<f64> {
        vec![
            self.workday,
            self.stress_levels,
            self.sleep_quality,
            self.tiredness,
        ]
    }
}

/// Parse a JSON array of record objects into typed rows.
///
/// Required columns absent from any row are collected and reported in a
/// single validation error, so the caller sees every missing column at
/// once rather than one per attempt.
pub fn records_from_json(rows: &[serde_json::Value]) -> Result<Vec<BpRecord>> {
    let mut missing: Vec<String> = Vec::new();

    for row in rows {
        let obj = row.as_object().ok_or_else(|| {
            Error::InvalidPayload("input data must be a list of record objects".to_string())
        })?;

        for column in REQUIRED_COLUMNS {
            if !obj.contains_key(column) && !missing.iter().any(|c| c.as_str() == column) {
                missing.push(column.to_string());
            }
        }
    }

    if !missing.is_empty() {
        // Report in schema order, not discovery order
        missing.sort_by_key(|c| REQUIRED_COLUMNS.iter().position(|&r| r == c.as_str()));
        return Err(Error::MissingColumns(missing));
    }

    rows.iter()
        .map(|row| {
            Ok(BpRecord {
                workday: numeric_field(row, "Workday")?,
                stress_levels: numeric_field(row, "Stress_Levels")?,
                sleep_quality: numeric_field(row, "Sleep_Quality")?,
                tiredness: numeric_field(row, "Tiredness")?,
                upper_bp: numeric_field(row, "Upper_BP")?,
                lower_bp: numeric_field(row, "Lower_BP")?,
            })
        })
        .collect()
}

fn numeric_field(row: &serde_json::Value, column: &str) -> Result<f64> {
    row.get(column)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| Error::InvalidPayload(format!("column {} must be numeric", column)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_complete_rows() {
        let rows = vec![json!({
            "Workday": 1,
            "Stress_Levels": 3,
            "Sleep_Quality": 7,
            "Tiredness": 2,
            "Upper_BP": 120,
            "Lower_BP": 80
        })];

        let records = records_from_json(&rows).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].upper_bp, 120.0);
        assert_eq!(records[0].features(), vec![1.0, 3.0, 7.0, 2.0]);
    }

    #[test]
    fn test_reports_all_missing_columns() {
        let rows = vec![json!({
            "Workday": 1,
            "Stress_Levels": 3,
            "Sleep_Quality": 7,
            "Tiredness": 2
        })];

        let err = records_from_json(&rows).unwrap_err();
        match err {
            Error::MissingColumns(cols) => {
                assert_eq!(cols, vec!["Upper_BP".to_string(), "Lower_BP".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_object_rows() {
        let rows = vec![json!([1, 2, 3])];
        assert!(records_from_json(&rows).unwrap_err().is_client_error());
    }

    #[test]
    fn test_rejects_non_numeric_values() {
        let rows = vec![json!({
            "Workday": "monday",
            "Stress_Levels": 3,
            "Sleep_Quality": 7,
            "Tiredness": 2,
            "Upper_BP": 120,
            "Lower_BP": 80
        })];

        assert!(records_from_json(&rows).unwrap_err().is_client_error());
    }
}
