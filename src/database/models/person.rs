use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `persons` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub sex: String,
    pub country: String,
}

/// Mutable fields of a person as sent by clients. Missing fields decode as
/// empty strings and any client-supplied `id` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub country: String,
}

impl PersonPayload {
    pub fn new(name: impl Into<String>, sex: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sex: sex.into(),
            country: country.into(),
        }
    }

    pub fn into_person(self, id: i64) -> Person {
        Person {
            id,
            name: self.name,
            sex: self.sex,
            country: self.country,
        }
    }
}
