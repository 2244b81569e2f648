//! # Timings Document Codec
//!
//! Converts [`AggregatedTimings`] to and from the persisted JSON document:
//!
//! ```text
//! {
//!   "source": 1,
//!   "data": [
//!     { "target": 0, "timings": [15.0, 5.0] },
//!     { "target": 2, "timings": [100.0, 200.0] }
//!   ]
//! }
//! ```
//!
//! The source participant's row is never written. On decode it is restored
//! as a zero-filled row, so the self row does not survive a round trip.
//!
//! The dense primitives have their own encode/decode pairs: a vector or row
//! is a plain list of numbers and a matrix is a list of rows.

use crate::aggregate::AggregatedTimings;
use crate::error::{Result, TimingsError};
use nalgebra::{DMatrix, DVector, RowDVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Persisted form of an aggregated matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingsDocument {
    pub source: usize,
    pub data: Vec<TargetTimings>,
}

/// Mean timings for one target, one value per bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetTimings {
    pub target: usize,
    pub timings: Vec<f64>,
}

/// Encode a column vector as a plain list of numbers
pub fn encode_vector(vector: &DVector<f64>) -> Vec<f64> {
    vector.iter().copied().collect()
}

/// Inverse of [`encode_vector`]; any list length is accepted
pub fn decode_vector(values: &[f64]) -> DVector<f64> {
    DVector::from_column_slice(values)
}

/// Encode a row vector as a plain list of numbers, left to right
pub fn encode_row(row: &RowDVector<f64>) -> Vec<f64> {
    row.iter().copied().collect()
}

/// Inverse of [`encode_row`]
pub fn decode_row(values: &[f64]) -> RowDVector<f64> {
    RowDVector::from_row_slice(values)
}

/// Encode a matrix as a list of rows, top to bottom
pub fn encode_matrix(matrix: &DMatrix<f64>) -> Vec<Vec<f64>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

/// Rebuild a matrix from its rows. All rows must have the same length; an
/// empty list yields a `0 × 0` matrix.
pub fn decode_matrix(rows: &[Vec<f64>]) -> Result<DMatrix<f64>> {
    let ncols = rows.first().map_or(0, Vec::len);
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(TimingsError::MalformedDocument(format!(
            "matrix row {} has {} values, expected {}",
            index,
            row.len(),
            ncols
        )));
    }

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Ok(DMatrix::from_row_slice(rows.len(), ncols, &flat))
}

/// Build the document for `timings`, one entry per non-source participant
/// in ascending target order.
pub fn encode(timings: &AggregatedTimings) -> TimingsDocument {
    let buffer = timings.buffer();
    let data: Vec<TargetTimings> = (0..timings.participant_count())
        .filter(|&t| t != timings.source())
        .map(|target| TargetTimings {
            target,
            timings: encode_row(&buffer.row(target).into_owned()),
        })
        .collect();

    debug!(
        "Encoded {} target entries for source {}",
        data.len(),
        timings.source()
    );

    TimingsDocument {
        source: timings.source(),
        data,
    }
}

/// Rebuild an aggregated matrix from `document`.
///
/// The participant count is one more than the number of entries, since only
/// the source row is absent. The bucket count comes from the first entry.
pub fn decode(document: &TimingsDocument) -> Result<AggregatedTimings> {
    decode_with_participant_count(document, document.data.len() + 1)
}

/// Like [`decode`], for callers that know the participant count up front.
pub fn decode_with_participant_count(
    document: &TimingsDocument,
    participant_count: usize,
) -> Result<AggregatedTimings> {
    let first = document
        .data
        .first()
        .ok_or_else(|| malformed("document contains no target entries".to_string()))?;

    if document.data.len() + 1 != participant_count {
        return Err(TimingsError::DimensionMismatch {
            field: "participant_count",
            expected: participant_count,
            found: document.data.len() + 1,
        });
    }

    let source = document.source;
    if source >= participant_count {
        return Err(malformed(format!(
            "source {} is outside {} participants",
            source, participant_count
        )));
    }

    let max_bucket = first.timings.len();
    let mut timings = AggregatedTimings::new(participant_count, source, max_bucket);
    let mut seen = vec![false; participant_count];

    for entry in &document.data {
        let target = entry.target;
        if target >= participant_count || target == source {
            return Err(malformed(format!(
                "entry target {} is invalid for source {} and {} participants",
                target, source, participant_count
            )));
        }
        if seen[target] {
            return Err(malformed(format!("duplicate entry for target {}", target)));
        }
        if entry.timings.len() != max_bucket {
            return Err(malformed(format!(
                "entry for target {} has {} timings, expected {}",
                target,
                entry.timings.len(),
                max_bucket
            )));
        }

        seen[target] = true;
        timings
            .buffer_mut()
            .set_row(target, &decode_row(&entry.timings));
    }

    debug!(
        "Decoded {} target entries for source {} ({} buckets)",
        document.data.len(),
        source,
        max_bucket
    );

    Ok(timings)
}

/// Encode `timings` as a [`serde_json::Value`] holding the document
///
/// ## Returns
/// - `Ok(Value)`: an object with `source` and `data` keys
/// - `Err(MalformedDocument)`: only if `serde_json` refuses the document
pub fn to_json_value(timings: &AggregatedTimings) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(encode(timings))?)
}

/// Encode `timings` as compact JSON text
pub fn to_json_string(timings: &AggregatedTimings) -> Result<String> {
    Ok(serde_json::to_string(&encode(timings))?)
}

/// Encode `timings` as indented JSON text, the on-disk form
pub fn to_json_string_pretty(timings: &AggregatedTimings) -> Result<String> {
    Ok(serde_json::to_string_pretty(&encode(timings))?)
}

/// Decode a document held as a JSON value. Missing `source`, `data`,
/// `target` or `timings` fields are reported as malformed.
pub fn from_json_value(value: serde_json::Value) -> Result<AggregatedTimings> {
    let document: TimingsDocument = serde_json::from_value(value)?;
    decode(&document)
}

/// Parse JSON text and decode it; see [`decode`] for the validation rules
pub fn from_json_str(json: &str) -> Result<AggregatedTimings> {
    let document: TimingsDocument = serde_json::from_str(json)?;
    decode(&document)
}

fn malformed(message: String) -> TimingsError {
    TimingsError::MalformedDocument(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::TimingsCollector;
    use serde_json::json;

    fn sample_timings() -> AggregatedTimings {
        let mut collector = TimingsCollector::new(3, 1, 2).unwrap();
        collector.add_timing(0, 1, 10.0).unwrap();
        collector.add_timing(0, 1, 20.0).unwrap();
        collector.add_timing(0, 2, 5.0).unwrap();
        collector.add_timing(2, 1, 100.0).unwrap();
        collector.add_timing(2, 2, 200.0).unwrap();
        AggregatedTimings::try_from_collector(&collector).unwrap()
    }

    #[test]
    fn test_serialized_layout() {
        let json = to_json_string(&sample_timings()).unwrap();

        assert_eq!(
            json,
            r#"{"source":1,"data":[{"target":0,"timings":[15.0,5.0]},{"target":2,"timings":[100.0,200.0]}]}"#
        );
    }

    #[test]
    fn test_entries_skip_source_in_ascending_order() {
        let mut timings = AggregatedTimings::new(5, 3, 1);
        for t in 0..5 {
            timings.buffer_mut()[(t, 0)] = t as f64 + 0.5;
        }

        let document = encode(&timings);
        let targets: Vec<usize> = document.data.iter().map(|e| e.target).collect();

        assert_eq!(targets, vec![0, 1, 2, 4]);
        assert_eq!(document.data.len(), 4);
    }

    #[test]
    fn test_round_trip_zeroes_self_row() {
        let mut timings = sample_timings();
        // Garbage in the self row must not be emitted.
        timings.buffer_mut()[(1, 0)] = 42.0;
        timings.buffer_mut()[(1, 1)] = -1.0;

        let decoded = from_json_str(&to_json_string(&timings).unwrap()).unwrap();

        assert_eq!(decoded.participant_count(), 3);
        assert_eq!(decoded.source(), 1);
        assert_eq!(decoded.max_bucket(), 2);
        assert_eq!(decoded.buffer().row(0), timings.buffer().row(0));
        assert_eq!(decoded.buffer().row(2), timings.buffer().row(2));
        assert!(decoded.buffer().row(1).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_round_trip_preserves_awkward_floats() {
        let mut timings = AggregatedTimings::new(2, 0, 3);
        timings.buffer_mut()[(1, 0)] = 0.1 + 0.2;
        timings.buffer_mut()[(1, 1)] = 1.0 / 3.0;
        timings.buffer_mut()[(1, 2)] = 6.02214076e23;

        let decoded = from_json_str(&to_json_string_pretty(&timings).unwrap()).unwrap();

        assert_eq!(decoded, timings);
    }

    #[test]
    fn test_round_trip_through_json_value() {
        let timings = sample_timings();

        let value = to_json_value(&timings).unwrap();
        assert_eq!(value["source"], json!(1));
        assert_eq!(value["data"][1]["target"], json!(2));

        let decoded = from_json_value(value).unwrap();
        assert_eq!(decoded, timings);
    }

    #[test]
    fn test_source_need_not_be_first_or_last() {
        let document = TimingsDocument {
            source: 0,
            data: vec![
                TargetTimings {
                    target: 2,
                    timings: vec![9.0],
                },
                TargetTimings {
                    target: 1,
                    timings: vec![4.0],
                },
            ],
        };

        let decoded = decode(&document).unwrap();

        assert_eq!(decoded.participant_count(), 3);
        assert_eq!(decoded.mean(1, 1).unwrap(), 4.0);
        assert_eq!(decoded.mean(2, 1).unwrap(), 9.0);
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        let cases = vec![
            json!({ "data": [{ "target": 0, "timings": [1.0] }] }),
            json!({ "source": 1 }),
            json!({ "source": 1, "data": [{ "timings": [1.0] }] }),
            json!({ "source": 1, "data": [{ "target": 0 }] }),
        ];

        for case in cases {
            assert!(matches!(
                from_json_value(case),
                Err(TimingsError::MalformedDocument(_))
            ));
        }
    }

    #[test]
    fn test_inconsistent_entries_are_malformed() {
        let ragged = json!({
            "source": 1,
            "data": [
                { "target": 0, "timings": [1.0, 2.0] },
                { "target": 2, "timings": [3.0] }
            ]
        });
        let duplicate = json!({
            "source": 1,
            "data": [
                { "target": 0, "timings": [1.0] },
                { "target": 0, "timings": [3.0] }
            ]
        });
        let self_entry = json!({
            "source": 1,
            "data": [
                { "target": 1, "timings": [1.0] },
                { "target": 0, "timings": [3.0] }
            ]
        });
        let empty = json!({ "source": 0, "data": [] });

        for case in [ragged, duplicate, self_entry, empty] {
            assert!(matches!(
                from_json_value(case),
                Err(TimingsError::MalformedDocument(_))
            ));
        }
    }

    #[test]
    fn test_supplied_participant_count_must_match() {
        let document = encode(&sample_timings());

        assert!(decode_with_participant_count(&document, 3).is_ok());
        assert!(matches!(
            decode_with_participant_count(&document, 4),
            Err(TimingsError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_matrix_primitive_encoding() {
        let matrix = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let rows = encode_matrix(&matrix);
        assert_eq!(rows, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(decode_matrix(&rows).unwrap(), matrix);

        assert!(decode_matrix(&[vec![1.0], vec![1.0, 2.0]]).is_err());
        assert_eq!(decode_matrix(&[]).unwrap().shape(), (0, 0));
    }

    #[test]
    fn test_vector_primitive_encoding() {
        let vector = DVector::from_vec(vec![0.5, 1.5]);
        let row = RowDVector::from_vec(vec![2.5, 3.5, 4.5]);

        assert_eq!(encode_vector(&vector), vec![0.5, 1.5]);
        assert_eq!(decode_vector(&[0.5, 1.5]), vector);
        assert_eq!(encode_row(&row), vec![2.5, 3.5, 4.5]);
        assert_eq!(decode_row(&[2.5, 3.5, 4.5]), row);
    }
}
