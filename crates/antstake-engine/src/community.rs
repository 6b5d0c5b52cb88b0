//! # Community Reward Aggregation
//!
//! Community levels V1-V9, each with a fixed pooled-staking figure,
//! qualification requirements and a reward-rate band.
//!
//! | Level | Total Staking | Qualification | Reward Band |
//! |-------|---------------|---------------|-------------|
//! | V1 | 20,000 | 1 path >= 20,000 | 3-5% |
//! | V2 | 50,000 | paths >= 20,000 and >= 30,000 | 5-8% |
//! | V3 | 100,000 | 2 downline V2 | 8-10% |
//! | V4 | 200,000 | 2 downline V3 | 10-12% |
//! | V5 | 600,000 | 3 downline V4 | 12-15% |
//! | V6 | 1,800,000 | 3 downline V5 | 15-18% |
//! | V7 | 5,400,000 | 3 downline V6 | 18-20% |
//! | V8 | 16,200,000 | 3 downline V7 | 20-25% |
//! | V9 | 48,600,000 | 2 downline V8 + path >= 1,600,000 | 25-30% |
//!
//! Levels V1-V2 qualify on path stakes, V3 and above on downline
//! community counts; V9 requires both. A user-chosen reward rate is
//! clamped into the level band, never rejected.

use crate::constants::PROJECTION_HORIZON_DAYS;
use crate::engine::simulate;
use crate::error::{EngineError, Result};
use crate::params::SimulationParams;
use crate::pool::CompoundingPool;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Community level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CommunityLevel {
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
    V8,
    V9,
}

/// Inclusive reward-rate band for a level
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardBand {
    pub min: f64,
    pub max: f64,
}

impl RewardBand {
    /// Clamp a user-chosen rate into the band
    pub fn clamp(&self, rate: f64) -> f64 {
        rate.max(self.min).min(self.max)
    }
}

/// Qualification requirements for a level. Every configured group must be
/// satisfied: each path minimum needs a distinct qualifying path, and the
/// downline group needs the configured count at the configured level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CommunityRequirements {
    /// Per-path minimum stakes in USDT; empty when the level is
    /// downline-qualified only
    pub path_minimums: &'static [f64],
    /// Required downline community level, if any
    pub downline_level: Option<CommunityLevel>,
    /// Required count of downline communities at that level
    pub downline_count: u32,
}

impl CommunityLevel {
    /// All levels, lowest first
    pub const ALL: [CommunityLevel; 9] = [
        Self::V1,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V7,
        Self::V8,
        Self::V9,
    ];

    /// Fixed pooled staking for the level, in USDT
    pub fn total_staking(&self) -> f64 {
        match self {
            Self::V1 => 20_000.0,
            Self::V2 => 50_000.0,
            Self::V3 => 100_000.0,
            Self::V4 => 200_000.0,
            Self::V5 => 600_000.0,
            Self::V6 => 1_800_000.0,
            Self::V7 => 5_400_000.0,
            Self::V8 => 16_200_000.0,
            Self::V9 => 48_600_000.0,
        }
    }

    /// Reward-rate band for the level
    pub fn reward_band(&self) -> RewardBand {
        let (min, max) = match self {
            Self::V1 => (0.03, 0.05),
            Self::V2 => (0.05, 0.08),
            Self::V3 => (0.08, 0.10),
            Self::V4 => (0.10, 0.12),
            Self::V5 => (0.12, 0.15),
            Self::V6 => (0.15, 0.18),
            Self::V7 => (0.18, 0.20),
            Self::V8 => (0.20, 0.25),
            Self::V9 => (0.25, 0.30),
        };
        RewardBand { min, max }
    }

    /// Qualification requirements for the level
    pub fn requirements(&self) -> CommunityRequirements {
        match self {
            Self::V1 => CommunityRequirements {
                path_minimums: &[20_000.0],
                downline_level: None,
                downline_count: 0,
            },
            Self::V2 => CommunityRequirements {
                path_minimums: &[30_000.0, 20_000.0],
                downline_level: None,
                downline_count: 0,
            },
            Self::V3 => CommunityRequirements {
                path_minimums: &[],
                downline_level: Some(Self::V2),
                downline_count: 2,
            },
            Self::V4 => CommunityRequirements {
                path_minimums: &[],
                downline_level: Some(Self::V3),
                downline_count: 2,
            },
            Self::V5 => CommunityRequirements {
                path_minimums: &[],
                downline_level: Some(Self::V4),
                downline_count: 3,
            },
            Self::V6 => CommunityRequirements {
                path_minimums: &[],
                downline_level: Some(Self::V5),
                downline_count: 3,
            },
            Self::V7 => CommunityRequirements {
                path_minimums: &[],
                downline_level: Some(Self::V6),
                downline_count: 3,
            },
            Self::V8 => CommunityRequirements {
                path_minimums: &[],
                downline_level: Some(Self::V7),
                downline_count: 3,
            },
            Self::V9 => CommunityRequirements {
                path_minimums: &[1_600_000.0],
                downline_level: Some(Self::V8),
                downline_count: 2,
            },
        }
    }
}

impl fmt::Display for CommunityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for CommunityLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "V1" => Ok(Self::V1),
            "V2" => Ok(Self::V2),
            "V3" => Ok(Self::V3),
            "V4" => Ok(Self::V4),
            "V5" => Ok(Self::V5),
            "V6" => Ok(Self::V6),
            "V7" => Ok(Self::V7),
            "V8" => Ok(Self::V8),
            "V9" => Ok(Self::V9),
            other => Err(EngineError::UnknownCommunityLevel(other.to_string())),
        }
    }
}

/// Which parts of a level's requirements are unmet
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingRequirements {
    /// Additional qualifying paths needed
    pub paths: Option<u32>,
    /// Smallest per-path minimum that no remaining path satisfies
    pub path_amount: Option<f64>,
    /// Required downline level, when the downline group is unmet
    pub downline_level: Option<CommunityLevel>,
    /// Additional downline communities needed at that level
    pub downline_count: Option<u32>,
}

/// Snapshot reward for a community level
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommunityRewardResult {
    /// Evaluated level
    pub level: CommunityLevel,
    /// Pooled staking used for the simulation, in USDT
    pub total_staking: f64,
    /// Reward rate after clamping into the level band
    pub reward_rate: f64,
    /// Daily reward in ANT; 0 when unqualified
    pub daily_reward_ant: f64,
    /// Whether all requirement groups are satisfied
    pub is_qualified: bool,
    /// Unmet requirements, present only when unqualified
    pub missing: Option<MissingRequirements>,
}

/// One row of the day-indexed community projection
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommunityProjectionRow {
    /// Day index, 1-based
    pub day: u32,
    /// Pooled stake's ANT output for the day
    pub team_output_ant: f64,
    /// Day's reward in ANT
    pub reward_ant: f64,
    /// Running sum of rewards up to and including this day
    pub accumulated_reward_ant: f64,
    /// Pool size in ASC after the day's maturities
    pub staked_asc: f64,
}

/// Pure qualification predicate. Returns `None` when every configured
/// requirement group for the level is satisfied, otherwise the unmet parts.
///
/// `path_stakes` are the caller's per-path stakes in USDT;
/// `downline_counts` maps a community level to how many downline
/// communities hold it.
pub fn qualification(
    level: CommunityLevel,
    path_stakes: &[f64],
    downline_counts: &HashMap<CommunityLevel, u32>,
) -> Option<MissingRequirements> {
    let req = level.requirements();
    let mut missing = MissingRequirements::default();
    let mut qualified = true;

    if !req.path_minimums.is_empty() {
        // Greedy pairing: largest stake against largest minimum.
        let mut stakes: Vec<f64> = path_stakes.to_vec();
        stakes.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        let mut minimums = req.path_minimums.to_vec();
        minimums.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        let mut unmet = 0u32;
        let mut first_unmet_amount = None;
        for (i, minimum) in minimums.iter().enumerate() {
            let satisfied = stakes.get(i).map(|s| s >= minimum).unwrap_or(false);
            if !satisfied {
                unmet += 1;
                if first_unmet_amount.is_none() {
                    first_unmet_amount = Some(*minimum);
                }
            }
        }
        if unmet > 0 {
            qualified = false;
            missing.paths = Some(unmet);
            missing.path_amount = first_unmet_amount;
        }
    }

    if let Some(downline_level) = req.downline_level {
        let have = downline_counts.get(&downline_level).copied().unwrap_or(0);
        if have < req.downline_count {
            qualified = false;
            missing.downline_level = Some(downline_level);
            missing.downline_count = Some(req.downline_count - have);
        }
    }

    if qualified {
        None
    } else {
        Some(missing)
    }
}

/// Snapshot aggregation: qualification plus a single-day reward on the
/// steady-state output of the level's pooled staking.
///
/// An unqualified level degrades to a zero reward with the unmet
/// requirements recorded; it never aborts.
pub fn community_reward(
    level: CommunityLevel,
    path_stakes: &[f64],
    downline_counts: &HashMap<CommunityLevel, u32>,
    reward_rate: f64,
) -> Result<CommunityRewardResult> {
    let rate = level.reward_band().clamp(reward_rate);
    let total_staking = level.total_staking();
    let daily_output = simulate(&SimulationParams::promotional(total_staking)?)?.daily_average_ant;

    let missing = qualification(level, path_stakes, downline_counts);
    let is_qualified = missing.is_none();
    let daily_reward = if is_qualified { daily_output * rate } else { 0.0 };

    debug!(?level, rate, daily_reward, is_qualified, "community reward");

    Ok(CommunityRewardResult {
        level,
        total_staking,
        reward_rate: rate,
        daily_reward_ant: daily_reward,
        is_qualified,
        missing,
    })
}

/// Day-indexed projection over the 540-day horizon: the level's pooled
/// staking compounds through a [`CompoundingPool`] and the clamped rate
/// applies to each day's instantaneous output.
pub fn project_community_rewards(
    level: CommunityLevel,
    reward_rate: f64,
) -> Result<Vec<CommunityProjectionRow>> {
    let rate = level.reward_band().clamp(reward_rate);
    let prices = crate::params::TokenPrices::default();
    let mut pool = CompoundingPool::new(prices.usdt_to_asc(level.total_staking()))?;

    let mut rows = Vec::with_capacity(PROJECTION_HORIZON_DAYS as usize);
    let mut accumulated = 0.0;

    for day in 1..=PROJECTION_HORIZON_DAYS {
        let output = pool.advance()?;
        let reward = output * rate;
        accumulated += reward;
        rows.push(CommunityProjectionRow {
            day,
            team_output_ant: output,
            reward_ant: reward,
            accumulated_reward_ant: accumulated,
            staked_asc: pool.staked_asc(),
        });
    }

    Ok(rows)
}
