//! Display targets: MDRT progress, the quarterly challenge and the monthly
//! champion dinner.

use serde::{Deserialize, Serialize};

use super::aggregate::RevenueBoard;

/// Fraction of `target` reached, clamped to `[0.0, 1.0]`.
///
/// A non-positive target counts as already met.
pub fn progress(amount: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 1.0;
    }
    (amount / target).clamp(0.0, 1.0)
}

/// FYC row with progress toward a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueProgress {
    pub fyc: f64,
    pub target: f64,
    pub progress: f64,
}

impl RevenueProgress {
    pub fn new(fyc: f64, target: f64) -> Self {
        Self {
            fyc,
            target,
            progress: progress(fyc, target),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    pub member: String,
    pub fyc: f64,
}

/// Top FYC earner of a month, if they reached `min_amount`.
///
/// Ties go to the alphabetically first member.
pub fn monthly_champion(board: &RevenueBoard, min_amount: f64) -> Option<Champion> {
    board
        .iter()
        .filter(|(_, fyc)| **fyc >= min_amount && **fyc > 0.0)
        .fold(None::<(&String, f64)>, |best, (member, fyc)| match best {
            Some((_, top)) if top >= *fyc => best,
            _ => Some((member, *fyc)),
        })
        .map(|(member, fyc)| Champion {
            member: member.clone(),
            fyc,
        })
}
