use crate::decode::wire::{WireObject, WireScalar};
use crate::model::{ObjectSummary, ObjectType, RadarCrossSection};
use crate::prelude::ValidationError;
use crate::query::parse_provider_timestamp;
use chrono::{DateTime, Utc};

/// Applies field contracts to one record, tagging failures with its position.
pub(crate) struct FieldReader {
    index: usize,
    cdm_id: Option<String>,
}

type FieldResult<T> = Result<T, ValidationError>;

impl FieldReader {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            cdm_id: None,
        }
    }

    /// Later failures carry this identifier.
    pub fn identify(&mut self, cdm_id: &str) {
        self.cdm_id = Some(cdm_id.to_string());
    }

    pub fn fail(&self, field: &'static str, reason: impl Into<String>) -> ValidationError {
        ValidationError::new(self.index, self.cdm_id.clone(), field, reason)
    }

    fn required(&self, field: &'static str, value: Option<WireScalar>) -> FieldResult<WireScalar> {
        match value {
            Some(value) if !value.is_blank() => Ok(value),
            _ => Err(self.fail(field, "required field is missing")),
        }
    }

    /// Text exactly as received; only numeric and timestamp fields are trimmed.
    pub fn text(&self, field: &'static str, value: Option<WireScalar>) -> FieldResult<String> {
        match self.required(field, value)? {
            WireScalar::Text(text) => Ok(text),
            WireScalar::Number(number) => Ok(number.to_string()),
            other => Err(self.fail(field, format!("expected text, found {}", other))),
        }
    }

    pub fn unsigned(&self, field: &'static str, value: Option<WireScalar>) -> FieldResult<u32> {
        let parsed = match self.required(field, value)? {
            WireScalar::Text(text) => text.trim().parse::<u32>().ok(),
            WireScalar::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
            WireScalar::Flag(_) => None,
        };
        parsed.ok_or_else(|| self.fail(field, "expected a non-negative integer"))
    }

    pub fn float(&self, field: &'static str, value: Option<WireScalar>) -> FieldResult<f64> {
        let value = self.required(field, value)?;
        self.coerce_float(field, value)
    }

    pub fn optional_float(
        &self,
        field: &'static str,
        value: Option<WireScalar>,
    ) -> FieldResult<Option<f64>> {
        match value {
            Some(value) if !value.is_blank() => self.coerce_float(field, value).map(Some),
            _ => Ok(None),
        }
    }

    fn coerce_float(&self, field: &'static str, value: WireScalar) -> FieldResult<f64> {
        let parsed = match &value {
            WireScalar::Text(text) => text.trim().parse::<f64>().ok(),
            WireScalar::Number(number) => number.as_f64(),
            WireScalar::Flag(_) => None,
        };
        match parsed {
            Some(number) if number.is_finite() => Ok(number),
            _ => Err(self.fail(field, format!("expected a finite number, found {}", value))),
        }
    }

    pub fn probability(
        &self,
        field: &'static str,
        value: Option<WireScalar>,
    ) -> FieldResult<Option<f64>> {
        let probability = self.optional_float(field, value)?;
        match probability {
            Some(p) if !(0.0..=1.0).contains(&p) => {
                Err(self.fail(field, format!("{} is outside [0, 1]", p)))
            }
            _ => Ok(probability),
        }
    }

    pub fn timestamp(
        &self,
        field: &'static str,
        value: Option<WireScalar>,
    ) -> FieldResult<DateTime<Utc>> {
        let text = self.text(field, value)?;
        parse_provider_timestamp(&text)
            .map_err(|err| self.fail(field, format!("bad timestamp {:?}: {}", text, err)))
    }

    /// `Y`/`N` as the provider sends it, or a JSON boolean.
    pub fn flag(&self, field: &'static str, value: Option<WireScalar>) -> FieldResult<bool> {
        match self.required(field, value)? {
            WireScalar::Flag(flag) => Ok(flag),
            WireScalar::Text(text) => match text.trim() {
                "Y" => Ok(true),
                "N" => Ok(false),
                other => Err(self.fail(field, format!("expected Y or N, found {:?}", other))),
            },
            other => Err(self.fail(field, format!("expected Y or N, found {}", other))),
        }
    }

    pub fn object(&self, wire: WireObject) -> FieldResult<ObjectSummary> {
        let names = wire.names;
        let object_id = self.unsigned(names.id, wire.id)?;
        let object_name = self.text(names.name, wire.name)?;

        let token = self.text(names.object_type, wire.object_type)?;
        let object_type = token
            .parse::<ObjectType>()
            .map_err(|err| self.fail(names.object_type, err.to_string()))?;

        let radar_cross_section = match wire.rcs {
            Some(value) if !value.is_blank() => {
                let token = self.text(names.rcs, Some(value))?;
                let rcs = token
                    .parse::<RadarCrossSection>()
                    .map_err(|err| self.fail(names.rcs, err.to_string()))?;
                Some(rcs)
            }
            _ => None,
        };

        let exclusion_volume_radius = self.float(names.exclusion_volume, wire.exclusion_volume)?;
        if exclusion_volume_radius < 0.0 {
            return Err(self.fail(names.exclusion_volume, "radius must not be negative"));
        }

        Ok(ObjectSummary {
            object_id,
            object_name,
            object_type,
            radar_cross_section,
            exclusion_volume_radius,
        })
    }
}
