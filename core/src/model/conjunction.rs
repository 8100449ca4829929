use crate::model::object::ObjectSummary;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One decoded Conjunction Data Message.
///
/// Records only come out of the decoder and expose their fields read-only,
/// so every record in hand has passed the field contracts:
///
/// ```compile_fail
/// use cdmcore::model::ConjunctionRecord;
///
/// fn forge(mut record: ConjunctionRecord) {
///     record.probability_of_collision = Some(7.0);
/// }
/// ```
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConjunctionRecord {
    pub(crate) cdm_id: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) emergency_reportable: bool,
    pub(crate) time_of_closest_approach: DateTime<Utc>,
    pub(crate) min_range_meters: u32,
    pub(crate) probability_of_collision: Option<f64>,
    pub(crate) primary: ObjectSummary,
    pub(crate) secondary: ObjectSummary,
}

impl ConjunctionRecord {
    pub fn cdm_id(&self) -> &str {
        &self.cdm_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn emergency_reportable(&self) -> bool {
        self.emergency_reportable
    }

    pub fn time_of_closest_approach(&self) -> DateTime<Utc> {
        self.time_of_closest_approach
    }

    pub fn min_range_meters(&self) -> u32 {
        self.min_range_meters
    }

    /// `None` when the provider has not computed a probability yet.
    pub fn probability_of_collision(&self) -> Option<f64> {
        self.probability_of_collision
    }

    pub fn primary(&self) -> &ObjectSummary {
        &self.primary
    }

    pub fn secondary(&self) -> &ObjectSummary {
        &self.secondary
    }
}
