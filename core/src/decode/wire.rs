use serde::Deserialize;
use std::fmt;

/// A scalar as the provider may send it. Space-Track quotes numbers, but
/// plain JSON numbers and booleans are accepted too.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub(crate) enum WireScalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl WireScalar {
    pub fn is_blank(&self) -> bool {
        matches!(self, WireScalar::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for WireScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireScalar::Text(text) => write!(f, "{:?}", text),
            WireScalar::Number(number) => write!(f, "{}", number),
            WireScalar::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

/// One element of the provider response, before any field contract is applied.
///
/// Absent and `null` fields both arrive as `None`; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireConjunction {
    #[serde(rename = "CDM_ID")]
    pub cdm_id: Option<WireScalar>,
    #[serde(rename = "CREATED")]
    pub created: Option<WireScalar>,
    #[serde(rename = "EMERGENCY_REPORTABLE")]
    pub emergency_reportable: Option<WireScalar>,
    #[serde(rename = "TCA")]
    pub tca: Option<WireScalar>,
    #[serde(rename = "MIN_RNG")]
    pub min_rng: Option<WireScalar>,
    #[serde(rename = "PC")]
    pub pc: Option<WireScalar>,
    #[serde(rename = "SAT_1_ID")]
    pub sat_1_id: Option<WireScalar>,
    #[serde(rename = "SAT_1_NAME")]
    pub sat_1_name: Option<WireScalar>,
    #[serde(rename = "SAT1_OBJECT_TYPE")]
    pub sat1_object_type: Option<WireScalar>,
    #[serde(rename = "SAT1_RCS")]
    pub sat1_rcs: Option<WireScalar>,
    #[serde(rename = "SAT_1_EXCL_VOL")]
    pub sat_1_excl_vol: Option<WireScalar>,
    #[serde(rename = "SAT_2_ID")]
    pub sat_2_id: Option<WireScalar>,
    #[serde(rename = "SAT_2_NAME")]
    pub sat_2_name: Option<WireScalar>,
    #[serde(rename = "SAT2_OBJECT_TYPE")]
    pub sat2_object_type: Option<WireScalar>,
    #[serde(rename = "SAT2_RCS")]
    pub sat2_rcs: Option<WireScalar>,
    #[serde(rename = "SAT_2_EXCL_VOL")]
    pub sat_2_excl_vol: Option<WireScalar>,
}

/// The five provider fields describing one object, taken out of a record.
pub(crate) struct WireObject {
    pub names: &'static ObjectFieldNames,
    pub id: Option<WireScalar>,
    pub name: Option<WireScalar>,
    pub object_type: Option<WireScalar>,
    pub rcs: Option<WireScalar>,
    pub exclusion_volume: Option<WireScalar>,
}

pub(crate) struct ObjectFieldNames {
    pub id: &'static str,
    pub name: &'static str,
    pub object_type: &'static str,
    pub rcs: &'static str,
    pub exclusion_volume: &'static str,
}

pub(crate) static PRIMARY_FIELDS: ObjectFieldNames = ObjectFieldNames {
    id: "SAT_1_ID",
    name: "SAT_1_NAME",
    object_type: "SAT1_OBJECT_TYPE",
    rcs: "SAT1_RCS",
    exclusion_volume: "SAT_1_EXCL_VOL",
};

pub(crate) static SECONDARY_FIELDS: ObjectFieldNames = ObjectFieldNames {
    id: "SAT_2_ID",
    name: "SAT_2_NAME",
    object_type: "SAT2_OBJECT_TYPE",
    rcs: "SAT2_RCS",
    exclusion_volume: "SAT_2_EXCL_VOL",
};

impl WireConjunction {
    pub fn take_primary(&mut self) -> WireObject {
        WireObject {
            names: &PRIMARY_FIELDS,
            id: self.sat_1_id.take(),
            name: self.sat_1_name.take(),
            object_type: self.sat1_object_type.take(),
            rcs: self.sat1_rcs.take(),
            exclusion_volume: self.sat_1_excl_vol.take(),
        }
    }

    pub fn take_secondary(&mut self) -> WireObject {
        WireObject {
            names: &SECONDARY_FIELDS,
            id: self.sat_2_id.take(),
            name: self.sat_2_name.take(),
            object_type: self.sat2_object_type.take(),
            rcs: self.sat2_rcs.take(),
            exclusion_volume: self.sat_2_excl_vol.take(),
        }
    }
}
