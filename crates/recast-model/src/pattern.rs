//! Output field selection.

use serde::{Deserialize, Serialize};

use crate::PatternError;

/// Pattern entry that emits an empty field at its output position.
pub const BLANK_COLUMN: i64 = -1;

/// Ordered list of source column indexes defining the output layout.
///
/// Entries may repeat and appear in any order. [`BLANK_COLUMN`] yields an
/// empty field. An empty pattern means "all columns in source order".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionPattern(Vec<i64>);

impl SelectionPattern {
    pub fn new(entries: Vec<i64>) -> Self {
        Self(entries)
    }

    /// Parses a comma separated list of integers. Empty text yields an empty pattern.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        if text.is_empty() {
            return Ok(Self::default());
        }
        text.split(',')
            .map(|token| {
                token
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| PatternError::InvalidToken {
                        pattern: text.to_string(),
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Pattern selecting columns `0..column_count` in order.
    pub fn all_columns(column_count: usize) -> Self {
        Self((0..column_count as i64).collect())
    }

    /// Returns this pattern, or the all-columns pattern when empty.
    pub fn resolve(&self, column_count: usize) -> Self {
        if self.0.is_empty() {
            Self::all_columns(column_count)
        } else {
            self.clone()
        }
    }

    pub fn entries(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
