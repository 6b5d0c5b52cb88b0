//! # Referral Reward Aggregation
//!
//! Override rewards earned on the simulated output of up to 20 downline
//! generations.
//!
//! ## Reward Rates
//!
//! | Generation | Rate |
//! |------------|------|
//! | 1 | 15% |
//! | 2-3 | 10% |
//! | 4-20 | 5% |
//! | >20 | 0% |
//!
//! Two consistency models, each applied uniformly by its entry point:
//! [`referral_rewards`] applies the tier rate to the steady-state daily
//! average of one promotional simulation per tier, while
//! [`project_referral_rewards`] replays each tier through a
//! [`CompoundingPool`] and applies the rate to every day's instantaneous
//! output.

use crate::constants::PROJECTION_HORIZON_DAYS;
use crate::engine::simulate;
use crate::error::Result;
use crate::params::{SimulationParams, TokenPrices};
use crate::pool::CompoundingPool;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Deepest generation that still earns a reward
pub const MAX_REFERRAL_DEPTH: u32 = 20;

/// Reward rate for a generation depth (1 = direct referrals).
///
/// Depths outside 1..=20 earn nothing; an over-deep tier degrades to a
/// zero reward rather than failing the batch.
pub fn referral_reward_rate(level: u32) -> f64 {
    match level {
        1 => 0.15,
        2 | 3 => 0.10,
        4..=MAX_REFERRAL_DEPTH => 0.05,
        _ => 0.0,
    }
}

/// One upline tier: a generation depth and its pooled downline stake
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferralTier {
    /// Generation depth, 1-based
    pub level: u32,
    /// Pooled downline investment in ASC
    pub staked_asc: f64,
}

/// Snapshot reward for one tier
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferralRewardResult {
    /// Generation depth
    pub level: u32,
    /// Steady-state daily ANT output of the tier's pooled stake
    pub daily_output_ant: f64,
    /// Applied reward rate
    pub reward_rate: f64,
    /// Daily override reward in ANT
    pub daily_reward_ant: f64,
}

/// One row of the day-indexed referral projection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferralProjectionRow {
    /// Day index, 1-based
    pub day: u32,
    /// Combined ANT output of all tiers
    pub team_output_ant: f64,
    /// Per-tier ANT outputs, in input order
    pub level_outputs_ant: Vec<f64>,
    /// Per-tier rewards, in input order
    pub level_rewards_ant: Vec<f64>,
    /// Day's total reward across tiers
    pub total_reward_ant: f64,
    /// Running sum of rewards up to and including this day
    pub accumulated_reward_ant: f64,
    /// Combined pooled stake across tiers in ASC
    pub total_staked_asc: f64,
}

/// Snapshot aggregation: one promotional simulation per tier, reward on
/// the steady-state daily average.
pub fn referral_rewards(tiers: &[ReferralTier]) -> Result<Vec<ReferralRewardResult>> {
    let prices = TokenPrices::default();
    let mut results = Vec::with_capacity(tiers.len());
    for tier in tiers {
        let rate = referral_reward_rate(tier.level);
        let daily_output = if tier.staked_asc > 0.0 {
            let params = SimulationParams::promotional(prices.asc_to_usdt(tier.staked_asc))?;
            simulate(&params)?.daily_average_ant
        } else {
            0.0
        };
        debug!(level = tier.level, daily_output, rate, "tier reward");
        results.push(ReferralRewardResult {
            level: tier.level,
            daily_output_ant: daily_output,
            reward_rate: rate,
            daily_reward_ant: daily_output * rate,
        });
    }
    Ok(results)
}

/// Day-indexed aggregation over the 540-day projection horizon: each tier
/// compounds independently through its own pool and the tier rate applies
/// to the day's instantaneous output.
pub fn project_referral_rewards(tiers: &[ReferralTier]) -> Result<Vec<ReferralProjectionRow>> {
    // A tier with no positive stake seeds an empty pool and yields zero
    // rows, same degradation as the snapshot path.
    let mut pools = tiers
        .iter()
        .map(|tier| CompoundingPool::new(tier.staked_asc.max(0.0)))
        .collect::<Result<Vec<_>>>()?;
    let rates: Vec<f64> = tiers
        .iter()
        .map(|tier| referral_reward_rate(tier.level))
        .collect();

    let mut rows = Vec::with_capacity(PROJECTION_HORIZON_DAYS as usize);
    let mut accumulated = 0.0;

    for day in 1..=PROJECTION_HORIZON_DAYS {
        let mut level_outputs = Vec::with_capacity(pools.len());
        let mut level_rewards = Vec::with_capacity(pools.len());
        for (pool, rate) in pools.iter_mut().zip(&rates) {
            let output = pool.advance()?;
            level_outputs.push(output);
            level_rewards.push(output * rate);
        }

        let team_output: f64 = level_outputs.iter().sum();
        let total_reward: f64 = level_rewards.iter().sum();
        let total_staked: f64 = pools.iter().map(|p| p.staked_asc()).sum();
        accumulated += total_reward;

        rows.push(ReferralProjectionRow {
            day,
            team_output_ant: team_output,
            level_outputs_ant: level_outputs,
            level_rewards_ant: level_rewards,
            total_reward_ant: total_reward,
            accumulated_reward_ant: accumulated,
            total_staked_asc: total_staked,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_decay() {
        assert!(referral_reward_rate(1) > referral_reward_rate(2));
        assert_eq!(referral_reward_rate(2), referral_reward_rate(3));
        assert!(referral_reward_rate(3) > referral_reward_rate(4));
        assert_eq!(referral_reward_rate(4), referral_reward_rate(20));
        assert_eq!(referral_reward_rate(21), 0.0);
        assert_eq!(referral_reward_rate(0), 0.0);
    }

    #[test]
    fn test_snapshot_rewards() {
        let tiers = [
            ReferralTier { level: 1, staked_asc: 1000.0 },
            ReferralTier { level: 2, staked_asc: 1000.0 },
            ReferralTier { level: 5, staked_asc: 1000.0 },
        ];
        let results = referral_rewards(&tiers).unwrap();

        assert_eq!(results.len(), 3);
        // Same pooled stake, same simulated output
        assert_eq!(results[0].daily_output_ant, results[1].daily_output_ant);
        // Rewards decay with depth
        assert!(results[0].daily_reward_ant > results[1].daily_reward_ant);
        assert!(results[1].daily_reward_ant > results[2].daily_reward_ant);
    }

    #[test]
    fn test_empty_tier_degrades_to_zero() {
        let tiers = [
            ReferralTier { level: 1, staked_asc: 1000.0 },
            ReferralTier { level: 2, staked_asc: 0.0 },
        ];
        let results = referral_rewards(&tiers).unwrap();
        assert!(results[0].daily_reward_ant > 0.0);
        assert_eq!(results[1].daily_output_ant, 0.0);
        assert_eq!(results[1].daily_reward_ant, 0.0);
    }

    #[test]
    fn test_negative_stake_tier_degrades_in_both_models() {
        let tiers = [
            ReferralTier { level: 1, staked_asc: 1000.0 },
            ReferralTier { level: 2, staked_asc: -50.0 },
        ];

        let results = referral_rewards(&tiers).unwrap();
        assert!(results[0].daily_reward_ant > 0.0);
        assert_eq!(results[1].daily_output_ant, 0.0);
        assert_eq!(results[1].daily_reward_ant, 0.0);

        // The projection must not abort the batch either; the bad tier
        // contributes zero output on every day.
        let rows = project_referral_rewards(&tiers).unwrap();
        assert_eq!(rows.len(), PROJECTION_HORIZON_DAYS as usize);
        for row in &rows {
            assert!(row.level_outputs_ant[0] > 0.0);
            assert_eq!(row.level_outputs_ant[1], 0.0);
            assert_eq!(row.level_rewards_ant[1], 0.0);
        }
    }

    #[test]
    fn test_projection_accumulates_monotonically() {
        let tiers = [
            ReferralTier { level: 1, staked_asc: 2000.0 },
            ReferralTier { level: 2, staked_asc: 1000.0 },
        ];
        let rows = project_referral_rewards(&tiers).unwrap();

        assert_eq!(rows.len(), PROJECTION_HORIZON_DAYS as usize);
        for pair in rows.windows(2) {
            assert!(pair[1].accumulated_reward_ant >= pair[0].accumulated_reward_ant);
        }
        // Maturities grow the team stake over time
        assert!(rows.last().unwrap().total_staked_asc > rows[0].total_staked_asc);
    }

    #[test]
    fn test_projection_row_consistency() {
        let tiers = [
            ReferralTier { level: 1, staked_asc: 2000.0 },
            ReferralTier { level: 3, staked_asc: 1000.0 },
        ];
        let rows = project_referral_rewards(&tiers).unwrap();
        let row = &rows[99];

        let team: f64 = row.level_outputs_ant.iter().sum();
        assert!((row.team_output_ant - team).abs() < 1e-9);
        let reward: f64 = row.level_rewards_ant.iter().sum();
        assert!((row.total_reward_ant - reward).abs() < 1e-9);
        assert!(
            (row.level_rewards_ant[0] - row.level_outputs_ant[0] * 0.15).abs() < 1e-9
        );
    }
}
