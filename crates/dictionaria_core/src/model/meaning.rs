//! Meanings (concepts) and the semantic fields that group them.
//!
//! # Invariants
//! - A meaning belongs to at most one semantic field.
//! - Semantic fields are created by import and not changed afterwards.

use super::resource::{validate_identity, ModelValidationError, Parameter, Pk, UNSAVED_PK};
use serde::{Deserialize, Serialize};

/// Categorical grouping of meanings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticField {
    pub pk: Pk,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl SemanticField {
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

/// A sense/concept that words are counterparts of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
    #[serde(flatten)]
    pub parameter: Parameter,
    pub semantic_field_pk: Option<Pk>,
    /// Free-text category, independent of `semantic_field_pk`.
    pub semantic_category: Option<String>,
    /// External concept-list cross-reference code.
    pub ids_code: Option<String>,
    /// Display rank.
    pub representation: Option<i64>,
}

impl Meaning {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            parameter: Parameter::new(id, name),
            semantic_field_pk: None,
            semantic_category: None,
            ids_code: None,
            representation: None,
        }
    }

    pub fn pk(&self) -> Pk {
        self.parameter.pk
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        self.parameter.validate()?;
        if self.semantic_field_pk == Some(UNSAVED_PK) {
            return Err(ModelValidationError::UnsavedReference {
                field: "semantic_field_pk",
            });
        }
        Ok(())
    }
}
