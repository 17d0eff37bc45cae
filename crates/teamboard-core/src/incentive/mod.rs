//! Weekly "winner takes all" incentive pool.
//!
//! Every member who logs fewer than the minimum number of activities in a
//! week pays a penalty into the pool. The top scorer takes the pool; ties
//! split it evenly. When nobody was penalized the house funds the pool
//! instead. A week in which nobody scores carries the pool forward.

pub mod season;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{ConfigError, Result, ValidationError};
use crate::stats::{PointsBoard, Tally};

pub use season::{replay_season, WeekSettlement};

/// How laggards are identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaggardRule {
    /// Fewer than `min_activity_count` activities
    #[default]
    Count,
    /// Fewer than `min_score` points
    Score { min_score: u64 },
}

/// Who may win the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinnerEligibility {
    /// Only members who are not laggards
    #[default]
    MetMinimum,
    /// Every member, laggards included
    AnyMember,
}

/// Parameters of the weekly game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveRules {
    #[serde(default = "default_min_activity_count")]
    pub min_activity_count: i64,
    #[serde(default = "default_penalty_per_miss")]
    pub penalty_per_miss: i64,
    #[serde(default = "default_house_subsidy")]
    pub house_subsidy: i64,
    #[serde(default)]
    pub laggard_rule: LaggardRule,
    #[serde(default)]
    pub winner_eligibility: WinnerEligibility,
}

fn default_min_activity_count() -> i64 {
    3
}
fn default_penalty_per_miss() -> i64 {
    100
}
fn default_house_subsidy() -> i64 {
    100
}

impl Default for IncentiveRules {
    fn default() -> Self {
        Self {
            min_activity_count: default_min_activity_count(),
            penalty_per_miss: default_penalty_per_miss(),
            house_subsidy: default_house_subsidy(),
            laggard_rule: LaggardRule::default(),
            winner_eligibility: WinnerEligibility::default(),
        }
    }
}

impl IncentiveRules {
    /// Check the rules make a playable game.
    ///
    /// # Errors
    /// A minimum of zero or less would make every member compliant, and
    /// negative money amounts are meaningless; both are configuration errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_activity_count <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "incentive.min_activity_count".into(),
                message: format!("must be at least 1, got {}", self.min_activity_count),
            });
        }
        if self.penalty_per_miss < 0 {
            return Err(ConfigError::InvalidValue {
                key: "incentive.penalty_per_miss".into(),
                message: format!("must not be negative, got {}", self.penalty_per_miss),
            });
        }
        if self.house_subsidy < 0 {
            return Err(ConfigError::InvalidValue {
                key: "incentive.house_subsidy".into(),
                message: format!("must not be negative, got {}", self.house_subsidy),
            });
        }
        if let LaggardRule::Score { min_score: 0 } = self.laggard_rule {
            return Err(ConfigError::InvalidValue {
                key: "incentive.laggard_rule".into(),
                message: "score threshold must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn is_laggard(&self, tally: &Tally) -> bool {
        match self.laggard_rule {
            LaggardRule::Count => i64::from(tally.count) < self.min_activity_count,
            LaggardRule::Score { min_score } => tally.score < min_score,
        }
    }
}

/// Where this week's base pool came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolSource {
    Penalties,
    House,
}

/// Settlement of one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyIncentive {
    pub laggards: BTreeSet<String>,
    pub penalty_pool: i64,
    pub funded_by: PoolSource,
    /// Highest score on the board, eligible or not
    pub max_score: u64,
    /// Score the winners reached; 0 when the pool rolls over
    pub winning_score: u64,
    pub winners: BTreeSet<String>,
    /// Amount paid out, or carried forward when there are no winners
    pub pool: i64,
    pub payout_per_winner: f64,
    pub prior_rollover: i64,
    pub new_rollover: i64,
}

impl WeeklyIncentive {
    pub fn rolled_over(&self) -> bool {
        self.winners.is_empty()
    }
}

/// Settle one week's board.
///
/// # Errors
/// Fails fast on invalid rules (see [`IncentiveRules::validate`]) or a
/// negative `prior_rollover`.
pub fn compute_weekly_incentive(
    weekly_scores: &PointsBoard,
    rules: &IncentiveRules,
    prior_rollover: i64,
) -> Result<WeeklyIncentive> {
    rules.validate()?;
    if prior_rollover < 0 {
        return Err(ValidationError::InvalidValue {
            field: "prior_rollover".into(),
            message: format!("must not be negative, got {prior_rollover}"),
        }
        .into());
    }

    let laggards: BTreeSet<String> = weekly_scores
        .iter()
        .filter(|(_, tally)| rules.is_laggard(tally))
        .map(|(member, _)| member.clone())
        .collect();

    let penalty_pool = (laggards.len() as i64).saturating_mul(rules.penalty_per_miss);
    let (funded_by, base_pool) = if penalty_pool > 0 {
        (PoolSource::Penalties, penalty_pool)
    } else {
        (PoolSource::House, rules.house_subsidy)
    };

    let max_score = weekly_scores.values().map(|t| t.score).max().unwrap_or(0);
    let contenders = weekly_scores.iter().filter(|(member, _)| match rules.winner_eligibility {
        WinnerEligibility::AnyMember => true,
        WinnerEligibility::MetMinimum => !laggards.contains(*member),
    });
    let winning_score = contenders.clone().map(|(_, t)| t.score).max().unwrap_or(0);
    let pool = base_pool.saturating_add(prior_rollover);

    if winning_score == 0 {
        tracing::info!(
            laggards = laggards.len(),
            carried = pool,
            "no eligible scorer this week, pool rolls over"
        );
        return Ok(WeeklyIncentive {
            laggards,
            penalty_pool,
            funded_by,
            max_score,
            winning_score: 0,
            winners: BTreeSet::new(),
            pool,
            payout_per_winner: 0.0,
            prior_rollover,
            new_rollover: pool,
        });
    }

    let winners: BTreeSet<String> = contenders
        .filter(|(_, t)| t.score == winning_score)
        .map(|(member, _)| member.clone())
        .collect();
    let payout_per_winner = pool as f64 / winners.len() as f64;

    tracing::info!(
        laggards = laggards.len(),
        winners = winners.len(),
        pool,
        payout_per_winner,
        "weekly incentive settled"
    );

    Ok(WeeklyIncentive {
        laggards,
        penalty_pool,
        funded_by,
        max_score,
        winning_score,
        winners,
        pool,
        payout_per_winner,
        prior_rollover,
        new_rollover: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn board(rows: &[(&str, u64, u32)]) -> PointsBoard {
        rows.iter()
            .map(|(m, score, count)| (m.to_string(), Tally::new(*score, *count)))
            .collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn scenario_penalties_fund_single_winner() {
        let scores = board(&[("A", 3, 2), ("B", 12, 4), ("C", 0, 0)]);
        let out = compute_weekly_incentive(&scores, &IncentiveRules::default(), 0).unwrap();
        assert_eq!(out.laggards, set(&["A", "C"]));
        assert_eq!(out.penalty_pool, 200);
        assert_eq!(out.max_score, 12);
        assert_eq!(out.winners, set(&["B"]));
        assert_eq!(out.payout_per_winner, 200.0);
        assert_eq!(out.new_rollover, 0);
        assert_eq!(out.funded_by, PoolSource::Penalties);
    }

    #[test]
    fn laggard_tied_on_top_does_not_share() {
        let scores = board(&[("member1", 10, 3), ("member2", 10, 1), ("member3", 7, 3)]);
        let out = compute_weekly_incentive(&scores, &IncentiveRules::default(), 0).unwrap();
        assert_eq!(out.laggards, set(&["member2"]));
        assert_eq!(out.pool, 100);
        assert_eq!(out.winners, set(&["member1"]));
        assert_eq!(out.payout_per_winner, 100.0);
    }

    #[test]
    fn compliant_tie_splits_evenly() {
        let scores = board(&[("member1", 10, 3), ("member2", 10, 4), ("member3", 7, 1)]);
        let out = compute_weekly_incentive(&scores, &IncentiveRules::default(), 0).unwrap();
        assert_eq!(out.winners, set(&["member1", "member2"]));
        assert_eq!(out.pool, 100);
        assert_eq!(out.payout_per_winner, 50.0);
    }

    #[test]
    fn any_member_eligibility_lets_laggards_share() {
        let rules = IncentiveRules {
            winner_eligibility: WinnerEligibility::AnyMember,
            ..IncentiveRules::default()
        };
        let scores = board(&[("member1", 10, 3), ("member2", 10, 1), ("member3", 7, 3)]);
        let out = compute_weekly_incentive(&scores, &rules, 0).unwrap();
        assert_eq!(out.winners, set(&["member1", "member2"]));
        assert_eq!(out.payout_per_winner, 50.0);
    }

    #[test]
    fn house_subsidy_when_everyone_complies() {
        let solo = board(&[("A", 9, 3), ("B", 4, 3), ("C", 5, 4), ("D", 3, 3)]);
        let out = compute_weekly_incentive(&solo, &IncentiveRules::default(), 0).unwrap();
        assert!(out.laggards.is_empty());
        assert_eq!(out.funded_by, PoolSource::House);
        assert_eq!(out.pool, 100);
        assert_eq!(out.payout_per_winner, 100.0);

        let pair = board(&[("A", 9, 3), ("B", 9, 3)]);
        let out = compute_weekly_incentive(&pair, &IncentiveRules::default(), 0).unwrap();
        assert_eq!(out.pool, 100);
        assert_eq!(out.payout_per_winner, 50.0);
    }

    #[test]
    fn scoreless_week_rolls_over_then_pays_out() {
        let idle = board(&[("A", 0, 0)]);
        let week1 = compute_weekly_incentive(&idle, &IncentiveRules::default(), 0).unwrap();
        assert!(week1.rolled_over());
        assert_eq!(week1.new_rollover, 100);
        assert_eq!(week1.payout_per_winner, 0.0);

        let active = board(&[("A", 4, 3), ("B", 1, 1)]);
        let week2 =
            compute_weekly_incentive(&active, &IncentiveRules::default(), week1.new_rollover)
                .unwrap();
        assert_eq!(week2.pool, 200);
        assert_eq!(week2.winners, set(&["A"]));
        assert_eq!(week2.new_rollover, 0);
    }

    #[test]
    fn rollover_compounds_across_idle_weeks() {
        let idle = board(&[("A", 0, 0), ("B", 0, 0)]);
        let mut carried = 0;
        for _ in 0..3 {
            carried = compute_weekly_incentive(&idle, &IncentiveRules::default(), carried)
                .unwrap()
                .new_rollover;
        }
        assert_eq!(carried, 600);
    }

    #[test]
    fn all_laggards_with_points_roll_over_by_default() {
        let scores = board(&[("A", 16, 2), ("B", 1, 1)]);
        let out = compute_weekly_incentive(&scores, &IncentiveRules::default(), 0).unwrap();
        assert_eq!(out.max_score, 16);
        assert!(out.winners.is_empty());
        assert_eq!(out.new_rollover, 200);
    }

    #[test]
    fn empty_board_rolls_house_subsidy() {
        let out =
            compute_weekly_incentive(&PointsBoard::new(), &IncentiveRules::default(), 0).unwrap();
        assert!(out.laggards.is_empty());
        assert_eq!(out.new_rollover, 100);
    }

    #[test]
    fn score_rule_flags_low_scorers() {
        let rules = IncentiveRules {
            laggard_rule: LaggardRule::Score { min_score: 5 },
            ..IncentiveRules::default()
        };
        let scores = board(&[("A", 4, 4), ("B", 8, 1)]);
        let out = compute_weekly_incentive(&scores, &rules, 0).unwrap();
        assert_eq!(out.laggards, set(&["A"]));
        assert_eq!(out.winners, set(&["B"]));
    }

    #[test]
    fn non_positive_minimum_is_config_error() {
        for min in [0, -1] {
            let rules = IncentiveRules {
                min_activity_count: min,
                ..IncentiveRules::default()
            };
            let err = compute_weekly_incentive(&PointsBoard::new(), &rules, 0).unwrap_err();
            assert!(matches!(err, CoreError::Config(ConfigError::InvalidValue { .. })));
        }
    }

    #[test]
    fn negative_rollover_rejected() {
        let err = compute_weekly_incentive(&PointsBoard::new(), &IncentiveRules::default(), -1)
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
