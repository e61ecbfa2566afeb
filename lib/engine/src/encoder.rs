//! Feature encoding for heterogeneous user attributes.
//!
//! Learns vocabularies and scaling statistics from a population once per
//! request, then encodes any profile into a fixed-width vector laid out
//! as:
//!
//! ```text
//! [ one-hot education | multi-hot skills | multi-hot badges | z-scored numerics ]
//! ```
//!
//! Column alignment contract: every segment is written against the
//! *fitted* vocabulary layout (a fixed-width zero block followed by
//! index lookups), so any record or query encoded by the same fitted
//! encoder shares the population's column superset and ordering. A query
//! that exercises only part of a vocabulary still produces the full-width
//! segment; unknown categorical values leave their segment all-zero and
//! unknown labels are dropped.

use std::collections::BTreeSet;

use ahash::AHashMap;
use peermatch_core::{Error, Result, UserProfile, UserRecord, Vector};

/// Number of numeric attribute columns: points, sessionsCompleted,
/// questionsAnswered, rating.
const NUMERIC_COLUMNS: usize = 4;

/// A learned categorical vocabulary with lexicographic column order.
///
/// Sorting makes the column layout deterministic regardless of the
/// population's row order.
#[derive(Debug, Clone)]
struct Vocabulary {
    terms: Vec<String>,
    index: AHashMap<String, usize>,
}

impl Vocabulary {
    fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let terms: Vec<String> = values
            .into_iter()
            .map(str::to_owned)
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col))
            .collect();
        Self { terms, index }
    }

    fn len(&self) -> usize {
        self.terms.len()
    }

    /// Append the one-hot segment for `value`. An unknown or absent value
    /// leaves the segment all-zero.
    fn write_one_hot(&self, value: Option<&str>, out: &mut Vec<f32>) {
        let start = out.len();
        out.resize(start + self.terms.len(), 0.0);
        if let Some(&col) = value.and_then(|v| self.index.get(v)) {
            out[start + col] = 1.0;
        }
    }

    /// Append the multi-hot segment for `values`. Unknown labels are
    /// dropped silently.
    fn write_multi_hot(&self, values: &[String], out: &mut Vec<f32>) {
        let start = out.len();
        out.resize(start + self.terms.len(), 0.0);
        for value in values {
            if let Some(&col) = self.index.get(value.as_str()) {
                out[start + col] = 1.0;
            }
        }
    }
}

/// Per-column z-score standardization. Uses population variance
/// (divide by n, not n-1).
#[derive(Debug, Clone)]
struct StandardScaler {
    mean: [f32; NUMERIC_COLUMNS],
    std: [f32; NUMERIC_COLUMNS],
}

impl StandardScaler {
    fn fit(rows: &[[f64; NUMERIC_COLUMNS]]) -> Self {
        let n = rows.len() as f64;

        let mut mean = [0.0f64; NUMERIC_COLUMNS];
        for row in rows {
            for (m, x) in mean.iter_mut().zip(row) {
                *m += x;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut var = [0.0f64; NUMERIC_COLUMNS];
        for row in rows {
            for ((v, x), m) in var.iter_mut().zip(row).zip(&mean) {
                let diff = x - m;
                *v += diff * diff;
            }
        }

        let mut std = [0.0f32; NUMERIC_COLUMNS];
        for (s, v) in std.iter_mut().zip(&var) {
            *s = (v / n).sqrt() as f32;
        }

        Self {
            mean: mean.map(|m| m as f32),
            std,
        }
    }

    /// Append the standardized numeric block. A zero-variance column
    /// standardizes to exactly 0 instead of dividing by zero; an absent
    /// scalar also contributes 0 (the column mean).
    fn write_scaled(&self, row: [Option<f64>; NUMERIC_COLUMNS], out: &mut Vec<f32>) {
        for ((value, mean), std) in row.iter().zip(&self.mean).zip(&self.std) {
            let scaled = match value {
                Some(x) if *std > f32::EPSILON => (*x as f32 - mean) / std,
                _ => 0.0,
            };
            out.push(scaled);
        }
    }
}

/// Encoder state fitted on one population snapshot.
///
/// Request-scoped: fitted at request start and discarded with the
/// request. The fitted vocabularies define the column layout every
/// profile encodes against.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    education: Vocabulary,
    skills: Vocabulary,
    badges: Vocabulary,
    scaler: StandardScaler,
}

impl FeatureEncoder {
    /// Learn vocabularies and scaling statistics from the population.
    ///
    /// Every record must carry all required attributes; a missing scalar
    /// is a data-quality failure here, not a zero to be imputed.
    pub fn fit(population: &[UserRecord]) -> Result<Self> {
        if population.is_empty() {
            return Err(Error::InvalidConfig(
                "cannot fit encoder on an empty population".to_string(),
            ));
        }

        let mut numeric_rows = Vec::with_capacity(population.len());
        for record in population {
            record.validate()?;
            if let Some(row) = record.profile.numeric_values() {
                numeric_rows.push(row);
            }
        }

        let education = Vocabulary::fit(
            population
                .iter()
                .filter_map(|r| r.profile.education_level.as_deref()),
        );
        let skills = Vocabulary::fit(
            population
                .iter()
                .flat_map(|r| r.profile.skills_can_teach.iter().map(String::as_str)),
        );
        let badges = Vocabulary::fit(
            population
                .iter()
                .flat_map(|r| r.profile.badges.iter().map(String::as_str)),
        );
        let scaler = StandardScaler::fit(&numeric_rows);

        Ok(Self {
            education,
            skills,
            badges,
            scaler,
        })
    }

    /// Total encoded width: vocabulary columns plus the numeric block.
    #[must_use]
    pub fn width(&self) -> usize {
        self.education.len() + self.skills.len() + self.badges.len() + NUMERIC_COLUMNS
    }

    /// Encode a profile against the fitted column layout.
    ///
    /// The output is always [`width`](Self::width) columns wide in the
    /// fitted order, so population rows and the query vector are aligned
    /// without a separate realignment pass.
    #[must_use]
    pub fn encode(&self, profile: &UserProfile) -> Vector {
        let mut out = Vec::with_capacity(self.width());
        self.education
            .write_one_hot(profile.education_level.as_deref(), &mut out);
        self.skills.write_multi_hot(&profile.skills_can_teach, &mut out);
        self.badges.write_multi_hot(&profile.badges, &mut out);
        self.scaler.write_scaled(
            [
                profile.points,
                profile.sessions_completed,
                profile.questions_answered,
                profile.rating,
            ],
            &mut out,
        );
        Vector::new(out)
    }
}
