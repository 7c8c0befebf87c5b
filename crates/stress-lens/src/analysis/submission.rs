use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Free-text survey questions, in the order their answers are concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionField {
    Description,
    Lifestyle,
    Lately,
    Mood,
    Reflection,
    StressCauses,
    Handling,
    Worries,
    Extra,
}

impl SubmissionField {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Description,
            Self::Lifestyle,
            Self::Lately,
            Self::Mood,
            Self::Reflection,
            Self::StressCauses,
            Self::Handling,
            Self::Worries,
            Self::Extra,
        ]
    }

    /// Wire name used by the JSON payload and CSV headers.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Lifestyle => "lifestyle",
            Self::Lately => "lately",
            Self::Mood => "mood",
            Self::Reflection => "reflection",
            Self::StressCauses => "stressCauses",
            Self::Handling => "handling",
            Self::Worries => "worries",
            Self::Extra => "extra",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ordered()
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key))
    }
}

/// Answers submitted through the survey form. Every field is optional and
/// unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInput {
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub lifestyle: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub lately: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub mood: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub reflection: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub stress_causes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub handling: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub worries: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub extra: Option<String>,
}

impl SubmissionInput {
    pub fn get(&self, field: SubmissionField) -> Option<&str> {
        let value = match field {
            SubmissionField::Description => &self.description,
            SubmissionField::Lifestyle => &self.lifestyle,
            SubmissionField::Lately => &self.lately,
            SubmissionField::Mood => &self.mood,
            SubmissionField::Reflection => &self.reflection,
            SubmissionField::StressCauses => &self.stress_causes,
            SubmissionField::Handling => &self.handling,
            SubmissionField::Worries => &self.worries,
            SubmissionField::Extra => &self.extra,
        };
        value.as_deref()
    }

    pub fn set(&mut self, field: SubmissionField, value: Option<String>) {
        let slot = match field {
            SubmissionField::Description => &mut self.description,
            SubmissionField::Lifestyle => &mut self.lifestyle,
            SubmissionField::Lately => &mut self.lately,
            SubmissionField::Mood => &mut self.mood,
            SubmissionField::Reflection => &mut self.reflection,
            SubmissionField::StressCauses => &mut self.stress_causes,
            SubmissionField::Handling => &mut self.handling,
            SubmissionField::Worries => &mut self.worries,
            SubmissionField::Extra => &mut self.extra,
        };
        *slot = value;
    }

    pub fn with(mut self, field: SubmissionField, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Space-joined answers in field order, skipping absent and empty ones.
    pub fn combined_text(&self) -> String {
        SubmissionField::ordered()
            .into_iter()
            .filter_map(|field| self.get(field))
            .filter(|value| !value.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Accepts strings as-is and coerces other scalars to their textual form.
fn deserialize_loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(Value::Array(_)) => Err(de::Error::custom("expected text, found an array")),
        Some(Value::Object(_)) => Err(de::Error::custom("expected text, found an object")),
    }
}
