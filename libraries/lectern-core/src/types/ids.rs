/// ID types for Lectern entities
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Course material identifier
///
/// Unique within a course. The portal assigns these as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(i64);

impl MaterialId {
    /// Create a new material ID
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MaterialId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for MaterialId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| CoreError::invalid_input(format!("not a material id: {s:?}")))
    }
}
