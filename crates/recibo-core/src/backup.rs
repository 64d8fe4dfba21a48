//! # Backup Envelope
//!
//! Encodes and decodes the versioned JSON backup file. Talking to the store
//! is not done here; see `recibo_db::backup` for export/import orchestration.
//!
//! ## File Shape
//! ```text
//! {
//!   "version": "1.0",
//!   "exportedAt": "2026-10-17T14:03:11.204Z",
//!   "receipts": [
//!     { "customerName": "...", "cpf": "...", "saleValue": 1500.5, ... },
//!     ...
//!   ]
//! }
//! ```
//!
//! Records carry neither `id` nor `createdAt`; the store assigns fresh ones
//! on import. Files written by the web application may still contain both
//! fields, so the decoder drops them before reading a record.
//!
//! ## Failure Modes
//! ```text
//! text ──► JSON parse ──► envelope check ──► per-record decode
//!              │                │                   │
//!              ▼                ▼                   ▼
//!        MalformedJson   InvalidEnvelope      InvalidRecord
//!        (abort)         (abort)              (caller skips the record)
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::BackupError;
use crate::types::{NewWarrantyReceipt, WarrantyReceipt};
use crate::BACKUP_FORMAT_VERSION;

/// Keys assigned by the store, removed from records before decoding.
const STORE_ASSIGNED_KEYS: [&str; 2] = ["id", "createdAt"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeOut<'a> {
    version: &'a str,
    exported_at: String,
    receipts: Vec<&'a NewWarrantyReceipt>,
}

/// Serializes stored receipts into a backup file.
///
/// The output is pretty-printed with two-space indentation.
pub fn encode_envelope(
    receipts: &[WarrantyReceipt],
    exported_at: DateTime<Utc>,
) -> Result<String, BackupError> {
    let envelope = EnvelopeOut {
        version: BACKUP_FORMAT_VERSION,
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        receipts: receipts.iter().map(|r| &r.data).collect(),
    };

    serde_json::to_string_pretty(&envelope).map_err(BackupError::Serialize)
}

/// A backup file whose envelope has been checked but whose records have not.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEnvelope {
    pub version: String,
    /// Raw `exportedAt`, if present. Not interpreted.
    pub exported_at: Option<String>,
    pub receipts: Vec<Value>,
}

/// Parses a backup file and checks its envelope.
///
/// ## Errors
/// - [`BackupError::MalformedJson`] if `text` is not JSON
/// - [`BackupError::InvalidEnvelope`] if `version` is missing or empty, or
///   `receipts` is missing or not an array
///
/// Any version string is accepted.
pub fn decode_envelope(text: &str) -> Result<DecodedEnvelope, BackupError> {
    let root: Value = serde_json::from_str(text).map_err(BackupError::MalformedJson)?;

    let invalid = |reason: &str| BackupError::InvalidEnvelope {
        reason: reason.to_string(),
    };

    let mut object = match root {
        Value::Object(object) => object,
        _ => return Err(invalid("top level is not an object")),
    };

    let version = match object.remove("version") {
        Some(Value::String(v)) if !v.trim().is_empty() => v,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Null) | None => return Err(invalid("missing version")),
        Some(_) => return Err(invalid("version is not a string")),
    };

    let receipts = match object.remove("receipts") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => return Err(invalid("missing receipts")),
        Some(_) => return Err(invalid("receipts is not an array")),
    };

    let exported_at = match object.remove("exportedAt") {
        Some(Value::String(s)) => Some(s),
        _ => None,
    };

    Ok(DecodedEnvelope {
        version,
        exported_at,
        receipts,
    })
}

/// Reads one entry of `receipts` as a receipt to create.
///
/// `index` is the entry's position, carried into the error.
pub fn decode_record(index: usize, mut record: Value) -> Result<NewWarrantyReceipt, BackupError> {
    if let Value::Object(object) = &mut record {
        for key in STORE_ASSIGNED_KEYS {
            object.remove(key);
        }
    }

    serde_json::from_value(record).map_err(|source| BackupError::InvalidRecord { index, source })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::sample_receipt;
    use chrono::TimeZone;
    use serde_json::json;

    fn stored(id: &str) -> WarrantyReceipt {
        WarrantyReceipt {
            id: id.to_string(),
            created_at: Utc::now(),
            data: sample_receipt(),
        }
    }

    #[test]
    fn test_encode_omits_store_fields() {
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 14, 3, 11).unwrap();
        let text = encode_envelope(&[stored("a"), stored("b")], at).unwrap();
        let json: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["version"], "1.0");
        assert_eq!(json["exportedAt"], "2026-10-17T14:03:11.000Z");
        assert_eq!(json["receipts"].as_array().unwrap().len(), 2);
        assert!(json["receipts"][0].get("id").is_none());
        assert!(json["receipts"][0].get("createdAt").is_none());
        assert_eq!(json["receipts"][0]["saleValue"], 1500.5);
        assert!(text.contains("\n  \"version\""));
    }

    #[test]
    fn test_encode_then_decode() {
        let text = encode_envelope(&[stored("a")], Utc::now()).unwrap();
        let envelope = decode_envelope(&text).unwrap();

        assert_eq!(envelope.version, BACKUP_FORMAT_VERSION);
        assert!(envelope.exported_at.is_some());
        let records: Vec<_> = envelope
            .receipts
            .into_iter()
            .enumerate()
            .map(|(i, v)| decode_record(i, v).unwrap())
            .collect();
        assert_eq!(records, vec![sample_receipt()]);
    }

    #[test]
    fn test_malformed_json_is_distinct_from_invalid_envelope() {
        assert!(matches!(
            decode_envelope("{not json"),
            Err(BackupError::MalformedJson(_))
        ));
        assert!(matches!(
            decode_envelope(r#"{"receipts":[]}"#),
            Err(BackupError::InvalidEnvelope { .. })
        ));

        let malformed = decode_envelope("{not json").unwrap_err().to_string();
        let invalid = decode_envelope(r#"{"receipts":[]}"#).unwrap_err().to_string();
        assert_ne!(malformed, invalid);
    }

    #[test]
    fn test_invalid_envelopes() {
        for text in [
            r#"[]"#,
            r#"{"version":"1.0"}"#,
            r#"{"version":"","receipts":[]}"#,
            r#"{"version":null,"receipts":[]}"#,
            r#"{"version":"1.0","receipts":{}}"#,
            r#"{"version":"1.0","receipts":null}"#,
        ] {
            assert!(
                matches!(decode_envelope(text), Err(BackupError::InvalidEnvelope { .. })),
                "{text}"
            );
        }
    }

    #[test]
    fn test_empty_receipts_is_valid() {
        let envelope = decode_envelope(r#"{"version":"1.0","receipts":[]}"#).unwrap();
        assert!(envelope.receipts.is_empty());
        assert_eq!(envelope.exported_at, None);
    }

    #[test]
    fn test_decode_record_drops_web_store_fields() {
        let mut record = serde_json::to_value(sample_receipt()).unwrap();
        record["id"] = json!("xYz123");
        record["createdAt"] = json!({"seconds": 1760000000, "nanoseconds": 0});

        assert_eq!(decode_record(0, record).unwrap(), sample_receipt());
    }

    #[test]
    fn test_decode_record_reports_index() {
        let err = decode_record(3, json!({"customerName": "Maria"})).unwrap_err();
        assert!(matches!(err, BackupError::InvalidRecord { index: 3, .. }));

        assert!(decode_record(0, json!("not a record")).is_err());
    }
}
