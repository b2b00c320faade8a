use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// JSONPath selector used by `InputPath` / `OutputPath` / `ResultPath`.
///
/// `Discard` is the engine's `null` selector: as an input path it makes the
/// effective input the empty object, as a result path it drops the state
/// result and passes the input through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonPath {
    Discard,
    Path(String),
}

impl JsonPath {
    pub fn path(expr: impl Into<String>) -> Self {
        JsonPath::Path(expr.into())
    }

    /// The whole-document selector `$`.
    pub fn whole() -> Self {
        JsonPath::Path("$".to_string())
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, JsonPath::Discard)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonPath::Path(expr) => Some(expr),
            JsonPath::Discard => None,
        }
    }
}

impl From<&str> for JsonPath {
    fn from(expr: &str) -> Self {
        JsonPath::Path(expr.to_string())
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonPath::Path(expr) => write!(f, "{}", expr),
            JsonPath::Discard => write!(f, "null"),
        }
    }
}

impl Serialize for JsonPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonPath::Path(expr) => serializer.serialize_str(expr),
            JsonPath::Discard => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for JsonPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let expr = Option::<String>::deserialize(deserializer)?;
        Ok(expr.map_or(JsonPath::Discard, JsonPath::Path))
    }
}

/// Field-level deserializer so a present-but-`null` selector becomes
/// `Some(Discard)` instead of `None` (an absent field stays `None`).
pub(crate) fn opt_json_path<'de, D>(deserializer: D) -> Result<Option<JsonPath>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonPath::deserialize(deserializer).map(Some)
}
