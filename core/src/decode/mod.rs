//! Decoding of provider responses into [`ConjunctionRecord`]s.
//!
//! A payload that is not a JSON array of objects is a decode error for the
//! whole run. Field contract violations inside a record are
//! [`ValidationError`]s, handled according to the [`DecodePolicy`].

mod fields;
mod wire;

use crate::model::ConjunctionRecord;
use crate::prelude::{AlertError, AlertResult, ValidationError};
use crate::telemetry::log::LogManager;
use fields::FieldReader;
use serde_json::Value;
use wire::WireConjunction;

/// What to do with a record that breaks a field contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Fail the whole batch on the first invalid record.
    #[default]
    Strict,
    /// Keep the valid records and report the invalid ones alongside.
    Lenient,
}

/// Result of decoding one provider response.
#[derive(Debug, Clone, Default)]
pub struct DecodeOutcome {
    /// Valid records, in the order the provider sent them.
    pub records: Vec<ConjunctionRecord>,
    /// Rejected records; always empty under [`DecodePolicy::Strict`].
    pub rejected: Vec<ValidationError>,
    /// Number of elements in the provider array.
    pub received: usize,
}

impl DecodeOutcome {
    pub fn is_empty(&self) -> bool {
        self.received == 0
    }
}

pub fn decode(payload: &[u8], policy: DecodePolicy) -> AlertResult<DecodeOutcome> {
    let logger = LogManager::new("decode");
    let document: Value = serde_json::from_slice(payload)?;
    if let Some(verdict) = login_failure(&document) {
        return Err(AlertError::LoginRejected(verdict));
    }
    let elements: Vec<Value> = serde_json::from_value(document)?;
    let received = elements.len();

    let mut records = Vec::with_capacity(received);
    let mut rejected = Vec::new();
    for (index, element) in elements.into_iter().enumerate() {
        if !element.is_object() {
            return Err(AlertError::MalformedPayload(format!(
                "element {} is not an object",
                index
            )));
        }
        match decode_record(index, element) {
            Ok(record) => records.push(record),
            Err(err) if policy == DecodePolicy::Lenient => {
                logger.warn(&format!("skipping {}", err));
                rejected.push(err);
            }
            Err(err) => return Err(err.into()),
        }
    }

    logger.detail(&format!(
        "decoded {} of {} records ({} rejected)",
        records.len(),
        received,
        rejected.len()
    ));
    Ok(DecodeOutcome {
        records,
        rejected,
        received,
    })
}

/// Decodes with [`DecodePolicy::Strict`] and returns only the records.
pub fn decode_strict(payload: &[u8]) -> AlertResult<Vec<ConjunctionRecord>> {
    decode(payload, DecodePolicy::Strict).map(|outcome| outcome.records)
}

/// Space-Track answers bad credentials with HTTP 200 and `{"Login":"Failed"}`.
fn login_failure(document: &Value) -> Option<String> {
    document
        .get("Login")
        .and_then(Value::as_str)
        .filter(|verdict| !verdict.eq_ignore_ascii_case("Success"))
        .map(|verdict| format!("Login {}", verdict))
}

fn decode_record(index: usize, element: Value) -> Result<ConjunctionRecord, ValidationError> {
    let mut reader = FieldReader::new(index);
    if let Some(cdm_id) = element.get("CDM_ID").and_then(|id| id.as_str()) {
        reader.identify(cdm_id);
    }

    let mut wire: WireConjunction =
        serde_json::from_value(element).map_err(|err| reader.fail("record", err.to_string()))?;

    let cdm_id = reader.text("CDM_ID", wire.cdm_id.take())?;
    reader.identify(&cdm_id);

    let created_at = reader.timestamp("CREATED", wire.created.take())?;
    let emergency_reportable = reader.flag("EMERGENCY_REPORTABLE", wire.emergency_reportable.take())?;
    let time_of_closest_approach = reader.timestamp("TCA", wire.tca.take())?;
    let min_range_meters = reader.unsigned("MIN_RNG", wire.min_rng.take())?;
    let probability_of_collision = reader.probability("PC", wire.pc.take())?;
    let primary = reader.object(wire.take_primary())?;
    let secondary = reader.object(wire.take_secondary())?;

    Ok(ConjunctionRecord {
        cdm_id,
        created_at,
        emergency_reportable,
        time_of_closest_approach,
        min_range_meters,
        probability_of_collision,
        primary,
        secondary,
    })
}
