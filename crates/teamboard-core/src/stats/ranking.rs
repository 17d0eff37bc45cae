//! Ordered leaderboards.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of a ranked leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing<V> {
    /// Competition rank: equal keys share a rank and the next rank skips.
    pub rank: usize,
    pub member: String,
    #[serde(flatten)]
    pub value: V,
}

/// Sort entries by `key` descending, then member name ascending, and assign
/// competition ranks ("1, 1, 3").
pub fn rank_by<V, K, F>(entries: impl IntoIterator<Item = (String, V)>, key: F) -> Vec<Standing<V>>
where
    K: PartialOrd,
    F: Fn(&V) -> K,
{
    let mut rows: Vec<(String, V)> = entries.into_iter().collect();
    rows.sort_by(|(name_a, a), (name_b, b)| {
        key(b)
            .partial_cmp(&key(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| name_a.cmp(name_b))
    });

    let mut standings: Vec<Standing<V>> = Vec::with_capacity(rows.len());
    for (i, (member, value)) in rows.into_iter().enumerate() {
        let rank = match standings.last() {
            Some(prev) if key(&prev.value).partial_cmp(&key(&value)) == Some(Ordering::Equal) => {
                prev.rank
            }
            _ => i + 1,
        };
        standings.push(Standing {
            rank,
            member,
            value,
        });
    }
    standings
}
