use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    TopDown,
    LeftRight,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TD" | "TB" => Some(Self::TopDown),
            "LR" => Some(Self::LeftRight),
            _ => None,
        }
    }
}

/// Gender as recorded in the input. Unrecognised values collapse to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unknown,
}

impl Gender {
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "m" => Self::Male,
            "f" => Self::Female,
            "o" => Self::Other,
            _ => Self::Unknown,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
            Self::Other => "o",
            Self::Unknown => "",
        }
    }
}

/// One person as supplied by the caller. Empty strings mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonRecord {
    #[serde(deserialize_with = "trimmed")]
    pub id: String,
    pub name: String,
    pub familyname: String,
    #[serde(with = "gender_token")]
    pub gender: Gender,
    pub dob: Option<String>,
    pub dod: Option<String>,
    pub parent1: Option<String>,
    pub parent2: Option<String>,
    pub image: Option<String>,
}

impl PersonRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds a record from the positional row
    /// `name, familyname, gender, dob, dod, id, parent1, parent2`.
    /// Missing trailing fields are treated as empty.
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Self {
        Self {
            name: row_field(row, 0).to_string(),
            familyname: row_field(row, 1).to_string(),
            gender: Gender::from_token(row_field(row, 2)),
            dob: non_empty(row_field(row, 3)),
            dod: non_empty(row_field(row, 4)),
            id: row_field(row, 5).to_string(),
            parent1: non_empty(row_field(row, 6)),
            parent2: non_empty(row_field(row, 7)),
            image: None,
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_dob(mut self, dob: &str) -> Self {
        self.dob = non_empty(dob);
        self
    }

    pub fn with_dod(mut self, dod: &str) -> Self {
        self.dod = non_empty(dod);
        self
    }

    pub fn with_parents(mut self, parent1: Option<&str>, parent2: Option<&str>) -> Self {
        self.parent1 = parent1.and_then(non_empty);
        self.parent2 = parent2.and_then(non_empty);
        self
    }

    /// Non-empty parent references in field order (`parent1` first).
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        [self.parent1.as_deref(), self.parent2.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.parents().next().is_none()
    }
}

/// A record given either as an object or as the 8 positional fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecordInput {
    Row(Vec<String>),
    Record(PersonRecord),
}

impl From<RecordInput> for PersonRecord {
    fn from(input: RecordInput) -> Self {
        match input {
            RecordInput::Row(row) => PersonRecord::from_row(&row),
            RecordInput::Record(record) => record,
        }
    }
}

/// Parses a JSON array whose items are record objects or positional rows,
/// in any mix.
pub fn parse_records(input: &str) -> serde_json::Result<Vec<PersonRecord>> {
    let raw: Vec<RecordInput> = serde_json::from_str(input)?;
    Ok(raw.into_iter().map(PersonRecord::from).collect())
}

fn row_field<S: AsRef<str>>(row: &[S], idx: usize) -> &str {
    row.get(idx).map(|v| v.as_ref().trim()).unwrap_or("")
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn trimmed<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(str::trim).unwrap_or_default().to_string())
}

mod gender_token {
    use super::Gender;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(gender: &Gender, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(gender.as_token())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Gender, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Gender::from_token).unwrap_or_default())
    }
}
