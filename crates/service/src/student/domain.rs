use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub use models::student::Gender;

/// Domain student (business view). `id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub gender: Gender,
}

impl Student {
    pub fn new(name: impl Into<String>, email: impl Into<String>, gender: Gender) -> Self {
        Self { id: None, name: name.into(), email: email.into(), gender }
    }

    pub fn with_id(id: i64, name: impl Into<String>, email: impl Into<String>, gender: Gender) -> Self {
        Self { id: Some(id), ..Self::new(name, email, gender) }
    }

    /// Display-only; not persisted and not settable.
    pub fn date_of_birth(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 5).unwrap_or(NaiveDate::MIN)
    }

    /// Whole years between the date of birth and `today`.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        today.years_since(self.date_of_birth()).unwrap_or(0)
    }

    pub fn age(&self) -> u32 {
        self.age_on(Local::now().date_naive())
    }
}

impl From<models::student::Model> for Student {
    fn from(m: models::student::Model) -> Self {
        Self { id: Some(m.id), name: m.name, email: m.email, gender: m.gender }
    }
}
