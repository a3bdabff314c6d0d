//! Letter grade mapping

use crate::config::GradeThresholds;
use termsguard_domain::Grade;

/// Map a score to a letter grade, checking thresholds top-down
///
/// A NaN score maps to F.
pub fn grade_for(score: f64, thresholds: &GradeThresholds) -> Grade {
    if score >= thresholds.a {
        Grade::A
    } else if score >= thresholds.b {
        Grade::B
    } else if score >= thresholds.c {
        Grade::C
    } else if score >= thresholds.d {
        Grade::D
    } else {
        Grade::F
    }
}
