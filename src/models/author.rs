//! Author model and form types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::{
    utils::{format_date, format_date_input, parse_date},
    validation::{
        calendar_date, collect_errors, family_name_rules, first_name_length, sanitize,
        sanitize_optional, FieldError,
    },
};

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn url_for(id: &str) -> String {
        format!("/catalog/author/{}", id)
    }

    /// "family_name, first_name"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        Self::url_for(&self.id)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        format_date(self.date_of_birth)
    }

    pub fn date_of_death_formatted(&self) -> String {
        format_date(self.date_of_death)
    }

    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth_formatted(),
            self.date_of_death_formatted()
        )
    }
}

/// Raw author form submission
#[derive(Debug, Default, Deserialize)]
pub struct AuthorForm {
    pub first_name: Option<String>,
    pub family_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
}

/// Sanitized author form values, as stored and as re-rendered on error
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct AuthorInput {
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(function = "first_name_length")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        custom(function = "family_name_rules")
    )]
    pub family_name: String,
    #[validate(custom(function = "calendar_date"))]
    pub date_of_birth: Option<String>,
    #[validate(custom(function = "calendar_date"))]
    pub date_of_death: Option<String>,
}

impl AuthorInput {
    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    pub fn errors(&self) -> Vec<FieldError> {
        collect_errors(self.validate(), Self::FIELDS)
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth.as_deref().and_then(parse_date)
    }

    pub fn date_of_death(&self) -> Option<NaiveDate> {
        self.date_of_death.as_deref().and_then(parse_date)
    }
}

impl From<AuthorForm> for AuthorInput {
    fn from(form: AuthorForm) -> Self {
        Self {
            first_name: sanitize(form.first_name),
            family_name: sanitize(form.family_name),
            date_of_birth: sanitize_optional(form.date_of_birth),
            date_of_death: sanitize_optional(form.date_of_death),
        }
    }
}

impl From<&Author> for AuthorInput {
    fn from(author: &Author) -> Self {
        let input_date = |d: Option<NaiveDate>| d.map(|d| format_date_input(Some(d)));
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: input_date(author.date_of_birth),
            date_of_death: input_date(author.date_of_death),
        }
    }
}
