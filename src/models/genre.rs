//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validation::{collect_errors, sanitize, FieldError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

impl Genre {
    pub fn url_for(id: &str) -> String {
        format!("/catalog/genre/{}", id)
    }

    pub fn url(&self) -> String {
        Self::url_for(&self.id)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenreForm {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct GenreInput {
    #[validate(length(min = 1, message = "Genre name required"))]
    pub name: String,
}

impl GenreInput {
    pub fn errors(&self) -> Vec<FieldError> {
        collect_errors(self.validate(), &["name"])
    }
}

impl From<GenreForm> for GenreInput {
    fn from(form: GenreForm) -> Self {
        Self {
            name: sanitize(form.name),
        }
    }
}

impl From<&Genre> for GenreInput {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_name_rejected() {
        let input = GenreInput::from(GenreForm {
            name: Some("   ".into()),
        });
        let errors = input.errors();
        assert_eq!(errors, vec![FieldError::new("name", "Genre name required")]);
    }

    #[test]
    fn test_name_sanitized() {
        let input = GenreInput::from(GenreForm {
            name: Some("  Sci-Fi ".into()),
        });
        assert!(input.errors().is_empty());
        assert_eq!(input.name, "Sci-Fi");
    }
}
