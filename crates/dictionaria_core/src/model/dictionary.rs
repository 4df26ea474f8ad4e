//! Dictionary record: a contribution tied to exactly one language.

use super::resource::{validate_reference, Contribution, ModelValidationError, Pk};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A published dictionary of one language.
///
/// Words belong to exactly one dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    #[serde(flatten)]
    pub contribution: Contribution,
    pub language_pk: Pk,
    pub published: Option<NaiveDate>,
}

impl Dictionary {
    pub fn new(id: impl Into<String>, name: impl Into<String>, language_pk: Pk) -> Self {
        Self {
            contribution: Contribution::new(id, name),
            language_pk,
            published: None,
        }
    }

    pub fn pk(&self) -> Pk {
        self.contribution.pk
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        self.contribution.validate()?;
        validate_reference("language_pk", self.language_pk)
    }
}
