//! Letter grades

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade assigned to a document's rights score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// Reader-friendly
    A,
    /// Mostly fair
    B,
    /// Mixed
    C,
    /// Unfavorable
    D,
    /// Strongly unfavorable
    F,
}

impl Grade {
    /// Get the grade as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Short human-readable description of the grade
    pub fn label(&self) -> &'static str {
        match self {
            Grade::A => "Excellent",
            Grade::B => "Good",
            Grade::C => "Fair",
            Grade::D => "Poor",
            Grade::F => "Very Poor",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
