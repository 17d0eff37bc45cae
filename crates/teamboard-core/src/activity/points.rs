//! Point rules for logged activities.
//!
//! Rules are matched by substring against the activity type, highest value
//! first, so a label that mentions both a signed policy and a discussion is
//! worth the policy's points. Both the canonical keys and the team's picker
//! Cantonese labels carry a marker.

/// A single point rule: any marker found in the type string awards `points`.
#[derive(Debug, Clone, Copy)]
pub struct PointRule {
    pub markers: &'static [&'static str],
    pub points: u32,
}

/// Points for a type string that matches no rule.
pub const BASE_POINTS: u32 = 1;

/// Rule table in priority order.
pub const POINT_RULES: &[PointRule] = &[
    // new-member code issued
    PointRule {
        markers: &["出code", "new_member_code"],
        points: 8,
    },
    // policy signed
    PointRule {
        markers: &["簽單", "policy_signed"],
        points: 5,
    },
    // candidate exam registered
    PointRule {
        markers: &["報考試", "candidate_exam"],
        points: 3,
    },
    // insurance or recruiting talk
    PointRule {
        markers: &["傾", "_talk"],
        points: 2,
    },
];

/// Map an activity type string to its point value.
///
/// Total over all inputs: anything that matches no rule is a plain meeting
/// and earns [`BASE_POINTS`].
pub fn points_for(activity_type: &str) -> u32 {
    POINT_RULES
        .iter()
        .find(|rule| rule.markers.iter().any(|m| activity_type.contains(m)))
        .map(|rule| rule.points)
        .unwrap_or(BASE_POINTS)
}
