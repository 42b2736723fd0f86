//! JSON wire encoding of change events.
//!
//! The envelope is strict (an `origin` string and an `entries` array), the
//! entries are not: each entry decodes independently, so one entry with an
//! unknown type tag or a mismatched value poisons only itself. This is what
//! lets a receiver apply the rest of a batch when a newer peer starts
//! sending a type this version does not know.
//!
//! Entry forms:
//!
//! ```json
//! {"key": "volume", "type": "integer", "value": 5}
//! {"key": "volume"}
//! ```
//!
//! The second form (no type, no value) is an untyped removal, mirroring a
//! null value in the addressed write interface.

use serde::Deserialize;
use serde_json::{json, Value};

use prefshare_types::{ChangeSet, Mutation, PeerId, ScalarKind, ScalarValue, TypeError};

use crate::error::{SyncError, SyncResult};

#[derive(Deserialize)]
struct Envelope {
    origin: String,
    entries: Vec<Value>,
}

/// A parsed change event. Entries carry their own decode results.
pub struct DecodedEvent {
    pub origin: String,
    pub entries: Vec<Result<(String, Mutation), TypeError>>,
}

/// Encode a change event for broadcast.
pub fn encode(origin: &PeerId, changes: &ChangeSet) -> SyncResult<Vec<u8>> {
    let entries: Vec<Value> = changes
        .iter()
        .map(|(key, mutation)| match mutation {
            Mutation::Put(value) => json!({
                "key": key,
                "type": value.kind().as_wire(),
                "value": value_to_json(value),
            }),
            Mutation::Remove => json!({ "key": key }),
        })
        .collect();
    let envelope = json!({ "origin": origin.as_str(), "entries": entries });
    Ok(serde_json::to_vec(&envelope)?)
}

/// Decode a broadcast payload.
///
/// Fails only when the envelope itself is unreadable; entry-level problems
/// are carried through as per-entry errors.
pub fn decode(payload: &[u8]) -> SyncResult<DecodedEvent> {
    let envelope: Envelope = serde_json::from_slice(payload)
        .map_err(|e| SyncError::MalformedPayload(e.to_string()))?;
    let entries = envelope.entries.iter().map(decode_entry).collect();
    Ok(DecodedEvent {
        origin: envelope.origin,
        entries,
    })
}

fn value_to_json(value: &ScalarValue) -> Value {
    match value {
        ScalarValue::Str(s) => json!(s),
        ScalarValue::Bool(b) => json!(b),
        ScalarValue::I32(v) => json!(v),
        ScalarValue::I64(v) => json!(v),
        ScalarValue::F32(v) => json!(v),
    }
}

fn decode_entry(entry: &Value) -> Result<(String, Mutation), TypeError> {
    let key = entry
        .get("key")
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| TypeError::ValueMismatch {
            kind: "entry".to_string(),
            value: entry.to_string(),
        })?;

    let Some(tag) = entry.get("type") else {
        // No declared type: an untyped removal.
        return Ok((key.to_string(), Mutation::Remove));
    };
    let tag = tag.as_str().ok_or_else(|| TypeError::ValueMismatch {
        kind: "type".to_string(),
        value: tag.to_string(),
    })?;
    let kind = ScalarKind::from_wire(tag)?;

    let raw = entry.get("value").unwrap_or(&Value::Null);
    let value = decode_value(kind, raw)?;
    Ok((key.to_string(), Mutation::Put(value)))
}

fn decode_value(kind: ScalarKind, raw: &Value) -> Result<ScalarValue, TypeError> {
    let mismatch = || TypeError::ValueMismatch {
        kind: kind.as_wire().to_string(),
        value: raw.to_string(),
    };
    match kind {
        ScalarKind::String => raw
            .as_str()
            .map(|s| ScalarValue::Str(s.to_string()))
            .ok_or_else(mismatch),
        ScalarKind::Boolean => raw.as_bool().map(ScalarValue::Bool).ok_or_else(mismatch),
        ScalarKind::Integer => raw
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(ScalarValue::I32)
            .ok_or_else(mismatch),
        ScalarKind::Long => raw.as_i64().map(ScalarValue::I64).ok_or_else(mismatch),
        ScalarKind::Float => raw
            .as_f64()
            .map(|v| ScalarValue::F32(v as f32))
            .ok_or_else(mismatch),
    }
}
