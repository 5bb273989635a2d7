//! Dataset records as they appear in the board JSON.
//!
//! Records are read-only inputs: layout results live in a separate value owned by the layout
//! engine, so rendering the same dataset twice always starts from the same records.

use serde::{Deserialize, Serialize};

/// Tier used when a person record carries no `tier`.
pub const DEFAULT_TIER: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
    #[serde(default)]
    pub extra_connections: Vec<ExtraConnection>,
}

impl Dataset {
    /// The tier-0 person, if any. Datasets that went through [`Dataset::validate`] have at most
    /// one.
    pub fn center(&self) -> Option<&Person> {
        self.persons.iter().find(|p| p.is_center())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub tier: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub documents: Vec<String>,
}

impl Person {
    pub fn tier(&self) -> u32 {
        self.tier.unwrap_or(DEFAULT_TIER)
    }

    pub fn is_center(&self) -> bool {
        self.tier == Some(0)
    }

    /// Display name, falling back to the id when the name is missing or blank.
    pub fn display_name(&self) -> &str {
        non_empty(&self.name).unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    #[default]
    Polaroid,
    Note,
    Document,
    Tag,
    /// Any type string the board has no dedicated treatment for.
    #[serde(other)]
    Other,
}

impl EvidenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Polaroid => "polaroid",
            Self::Note => "note",
            Self::Document => "document",
            Self::Tag => "tag",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceItem {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: EvidenceKind,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub media: Vec<Media>,
}

impl EvidenceItem {
    /// Name, then label, then id.
    pub fn display_name(&self) -> &str {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.label))
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(rename = "type", default, deserialize_with = "lenient::string_or_empty")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraConnection {
    #[serde(deserialize_with = "lenient::string")]
    pub from: String,
    #[serde(deserialize_with = "lenient::string")]
    pub to: String,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub weight: Option<u32>,
}

/// Returns the string when it is present and not blank.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

mod lenient {
    //! Board JSON is hand-edited: ids and free-text fields are sometimes written as numbers,
    //! counts as strings, and lists as `null`. A bad value falls back to the field default
    //! instead of failing the whole dataset.

    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    fn render(value: Scalar) -> String {
        match value {
            Scalar::Str(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) if f.is_finite() && f.fract() == 0.0 => (f as i64).to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }

    pub(super) fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Scalar::deserialize(d).map(render)
    }

    pub(super) fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Option::<Scalar>::deserialize(d).map(|v| v.map(render))
    }

    pub(super) fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => String::new(),
            other => scalar_text(&other).unwrap_or_else(|| {
                tracing::debug!(value = %other, "ignoring non-scalar text field");
                String::new()
            }),
        })
    }

    /// Integers, integral floats and numeric strings; anything else (negative, fractional,
    /// out of range, wrong type) reads as absent.
    pub(super) fn opt_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        let value = Value::deserialize(d)?;
        let parsed = match &value {
            Value::Null => return Ok(None),
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(integral)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        };
        let parsed = parsed.and_then(|v| u32::try_from(v).ok());
        if parsed.is_none() {
            tracing::debug!(%value, "ignoring unusable integer field");
        }
        Ok(parsed)
    }

    fn integral(f: f64) -> Option<u64> {
        (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
    }

    fn scalar_text(value: &Value) -> Option<String> {
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                Scalar::deserialize(value).ok().map(render)
            }
            _ => None,
        }
    }

    /// `null` or a non-array reads as empty; non-scalar entries are dropped.
    pub(super) fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(entries(Value::deserialize(d)?)
            .into_iter()
            .filter_map(|v| {
                let text = scalar_text(&v);
                if text.is_none() {
                    tracing::debug!(value = %v, "dropping non-text list entry");
                }
                text
            })
            .collect())
    }

    /// `null` or a non-array reads as empty; entries that do not deserialize are dropped.
    pub(super) fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(entries(Value::deserialize(d)?)
            .into_iter()
            .filter_map(|v| match serde_json::from_value(v) {
                Ok(item) => Some(item),
                Err(err) => {
                    tracing::debug!(%err, "dropping malformed list entry");
                    None
                }
            })
            .collect())
    }

    fn entries(value: Value) -> Vec<Value> {
        match value {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                tracing::debug!(value = %other, "expected a list");
                Vec::new()
            }
        }
    }
}
