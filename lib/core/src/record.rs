//! User record schema and validation.
//!
//! The backing store is schemaless, so every attribute that must be
//! learned from the population arrives as an optional value. Scalar
//! attributes stay `Option` until validated: a missing number is a
//! data-quality failure to be surfaced, never a zero to be imputed,
//! since silent zeros would bias the scaling statistics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The clustering attributes of a user. Also the shape of a query user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub skills_can_teach: Vec<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub sessions_completed: Option<f64>,
    #[serde(default)]
    pub questions_answered: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl UserProfile {
    /// Required attributes absent from this profile.
    ///
    /// Multi-valued fields are always considered present (an empty label
    /// set is a valid value); the categorical and scalar fields must
    /// carry a value.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.education_level.is_none() {
            missing.push("educationLevel");
        }
        if self.points.is_none() {
            missing.push("points");
        }
        if self.sessions_completed.is_none() {
            missing.push("sessionsCompleted");
        }
        if self.questions_answered.is_none() {
            missing.push("questionsAnswered");
        }
        if self.rating.is_none() {
            missing.push("rating");
        }
        missing
    }

    /// True when no attribute carries a value (an `{}` request body).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.education_level.is_none()
            && self.skills_can_teach.is_empty()
            && self.badges.is_empty()
            && self.points.is_none()
            && self.sessions_completed.is_none()
            && self.questions_answered.is_none()
            && self.rating.is_none()
    }

    /// Numeric attributes in encoding order, if all are present.
    #[must_use]
    pub fn numeric_values(&self) -> Option<[f64; 4]> {
        Some([
            self.points?,
            self.sessions_completed?,
            self.questions_answered?,
            self.rating?,
        ])
    }
}

/// A population member: backing-store id plus profile attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl UserRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            id: id.into(),
            profile,
        }
    }

    /// Fails with a data-quality error when required attributes are
    /// absent, naming the record and the fields.
    pub fn validate(&self) -> Result<()> {
        let missing = self.profile.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::IncompleteRecord {
                id: self.id.clone(),
                fields: missing.iter().map(|f| (*f).to_string()).collect(),
            })
        }
    }
}
