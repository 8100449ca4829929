use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Upstream token that is not part of a known vocabulary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized {kind} {token:?}")]
pub struct UnrecognizedToken {
    pub kind: &'static str,
    pub token: String,
}

/// Catalog classification of a tracked object.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum ObjectType {
    #[serde(rename = "PAYLOAD")]
    Payload,
    #[serde(rename = "ROCKET BODY")]
    RocketBody,
    #[serde(rename = "DEBRIS")]
    Debris,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// Every object-type token the provider has been seen to emit.
const OBJECT_TYPE_TOKENS: &[(&str, ObjectType)] = &[
    ("PAYLOAD", ObjectType::Payload),
    ("ROCKET BODY", ObjectType::RocketBody),
    ("DEBRIS", ObjectType::Debris),
    ("Debris", ObjectType::Debris),
    ("UNKNOWN", ObjectType::Unknown),
    // historical misspelling
    ("UKNOWN", ObjectType::Unknown),
];

impl ObjectType {
    pub fn from_token(token: &str) -> Option<Self> {
        OBJECT_TYPE_TOKENS
            .iter()
            .find(|(known, _)| *known == token)
            .map(|(_, object_type)| *object_type)
    }

    /// Canonical provider spelling.
    pub fn as_token(&self) -> &'static str {
        match self {
            ObjectType::Payload => "PAYLOAD",
            ObjectType::RocketBody => "ROCKET BODY",
            ObjectType::Debris => "DEBRIS",
            ObjectType::Unknown => "UNKNOWN",
        }
    }
}

impl FromStr for ObjectType {
    type Err = UnrecognizedToken;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::from_token(token).ok_or_else(|| UnrecognizedToken {
            kind: "object type",
            token: token.to_string(),
        })
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Coarse radar cross-section size class.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RadarCrossSection {
    Small,
    Medium,
    Large,
}

impl RadarCrossSection {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "SMALL" => Some(RadarCrossSection::Small),
            "MEDIUM" => Some(RadarCrossSection::Medium),
            "LARGE" => Some(RadarCrossSection::Large),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            RadarCrossSection::Small => "SMALL",
            RadarCrossSection::Medium => "MEDIUM",
            RadarCrossSection::Large => "LARGE",
        }
    }
}

impl FromStr for RadarCrossSection {
    type Err = UnrecognizedToken;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::from_token(token).ok_or_else(|| UnrecognizedToken {
            kind: "radar cross section",
            token: token.to_string(),
        })
    }
}

impl fmt::Display for RadarCrossSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// One of the two objects involved in a conjunction.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ObjectSummary {
    pub(crate) object_id: u32,
    pub(crate) object_name: String,
    pub(crate) object_type: ObjectType,
    pub(crate) radar_cross_section: Option<RadarCrossSection>,
    pub(crate) exclusion_volume_radius: f64,
}

impl ObjectSummary {
    pub fn object_id(&self) -> u32 {
        self.object_id
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    /// `None` until the provider has classified the object.
    pub fn radar_cross_section(&self) -> Option<RadarCrossSection> {
        self.radar_cross_section
    }

    pub fn exclusion_volume_radius(&self) -> f64 {
        self.exclusion_volume_radius
    }
}
