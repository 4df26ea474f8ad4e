//! Generic lexical-resource records.
//!
//! # Responsibility
//! - Model the base entities every dictionary specialization builds on:
//!   languages, contributions, parameters, units, values and sentences.
//! - Own identity validation shared by all base records.
//!
//! # Invariants
//! - `pk == UNSAVED_PK` means the record has not been persisted yet.
//! - `id` is non-blank and URL-safe (`[A-Za-z0-9_.-]+`).
//! - `name` is non-blank.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned surrogate key.
pub type Pk = i64;

/// Placeholder key for records that have not been inserted yet.
///
/// SQLite `AUTOINCREMENT` keys start at 1, so 0 never names a stored row.
pub const UNSAVED_PK: Pk = 0;

static PUBLIC_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("valid public id regex"));

/// Validation failures raised before a record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Public identifier is empty after trim.
    BlankId,
    /// Public identifier contains characters outside `[A-Za-z0-9_.-]`.
    InvalidId(String),
    /// Display name is empty after trim.
    BlankName { id: String },
    /// A foreign key still points at an unsaved record.
    UnsavedReference { field: &'static str },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "id must not be blank"),
            Self::InvalidId(id) => write!(f, "id `{id}` must match [A-Za-z0-9_.-]+"),
            Self::BlankName { id } => write!(f, "name must not be blank for `{id}`"),
            Self::UnsavedReference { field } => {
                write!(f, "`{field}` references a record that has not been saved")
            }
        }
    }
}

impl Error for ModelValidationError {}

/// Checks the public `id` and `name` shared by all base records.
pub fn validate_identity(id: &str, name: &str) -> Result<(), ModelValidationError> {
    if id.trim().is_empty() {
        return Err(ModelValidationError::BlankId);
    }
    if !PUBLIC_ID_RE.is_match(id) {
        return Err(ModelValidationError::InvalidId(id.to_string()));
    }
    if name.trim().is_empty() {
        return Err(ModelValidationError::BlankName { id: id.to_string() });
    }
    Ok(())
}

/// Checks that a foreign key points at a persisted row.
pub fn validate_reference(field: &'static str, pk: Pk) -> Result<(), ModelValidationError> {
    if pk == UNSAVED_PK {
        return Err(ModelValidationError::UnsavedReference { field });
    }
    Ok(())
}

/// A language described by one or more dictionaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub pk: Pk,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Language {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pk: UNSAVED_PK,
            id: id.into(),
            name: name.into(),
            description: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_identity(&self.id, &self.name)
    }
}

/// One unit of contributed content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub pk: Pk,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Listing order key; lower numbers come first.
    pub number: i64,
}

impl Contribution {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pk: UNSAVED_PK,
            id: id.into(),
            name: name.into(),
            description: None,
            number: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_identity(&self.id, &self.name)
    }
}

/// A describable dimension that values are recorded against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub pk: Pk,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl Parameter {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pk: UNSAVED_PK,
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_identity(&self.id, &self.name)
    }
}

/// An analyzable item belonging to one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub pk: Pk,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub language_pk: Pk,
}

impl Unit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, language_pk: Pk) -> Self {
        Self {
            pk: UNSAVED_PK,
            id: id.into(),
            name: name.into(),
            description: None,
            language_pk,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_identity(&self.id, &self.name)?;
        validate_reference("language_pk", self.language_pk)
    }
}

/// A value recorded for a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub pk: Pk,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub parameter_pk: Pk,
}

impl Value {
    pub fn new(id: impl Into<String>, name: impl Into<String>, parameter_pk: Pk) -> Self {
        Self {
            pk: UNSAVED_PK,
            id: id.into(),
            name: name.into(),
            description: None,
            parameter_pk,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_identity(&self.id, &self.name)?;
        validate_reference("parameter_pk", self.parameter_pk)
    }
}

/// An example sentence in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub pk: Pk,
    pub id: String,
    /// Primary text of the example.
    pub name: String,
    /// Free translation.
    pub description: Option<String>,
    pub analyzed: Option<String>,
    pub gloss: Option<String>,
    pub language_pk: Pk,
}

impl Sentence {
    pub fn new(id: impl Into<String>, name: impl Into<String>, language_pk: Pk) -> Self {
        Self {
            pk: UNSAVED_PK,
            id: id.into(),
            name: name.into(),
            description: None,
            analyzed: None,
            gloss: None,
            language_pk,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_identity(&self.id, &self.name)?;
        validate_reference("language_pk", self.language_pk)
    }
}
