//! Family member (person) records

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier of a family member, issued by the external data layer
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for MemberId {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

/// Gender as recorded by the data layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unspecified,
}

fn default_living() -> bool {
    true
}

/// A person in the family tree
///
/// Owned by the external data layer; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    /// Unique identifier
    pub id: MemberId,

    pub first_name: String,

    pub last_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(default)]
    pub gender: Gender,

    #[serde(default = "default_living")]
    pub is_living: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl FamilyMember {
    /// Create a living member with no optional details
    pub fn new(
        id: impl Into<MemberId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth: None,
            gender: Gender::default(),
            is_living: true,
            photo_url: None,
            location: None,
            email: None,
        }
    }

    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.date_of_birth = Some(date);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn deceased(mut self) -> Self {
        self.is_living = false;
        self
    }

    /// "First Last", without stray whitespace when either part is empty
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Age in whole years on `on`, if the birth date is known and not in the future
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        let born = self.date_of_birth?;
        let mut years = on.year() - born.year();
        if (on.month(), on.day()) < (born.month(), born.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }
}
