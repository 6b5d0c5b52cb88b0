//! # Schedule Tables
//!
//! Enumerated staking and release periods with their bonus and burn-fee
//! rates. Only the listed period lengths are valid; anything else fails
//! validation rather than defaulting.
//!
//! | Staking Period | Bonus Rate |
//! |----------------|------------|
//! | 1 day | 0% |
//! | 30 days | 10% |
//! | 60 days | 20% |
//! | 90 days | 30% |
//! | 180 days | 40% |
//! | 360 days | 50% |
//!
//! | Release Period | Burn Fee |
//! |----------------|----------|
//! | 7 days | 30% |
//! | 15 days | 20% |
//! | 30 days | 10% |
//! | 60 days | 0% |

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Supported staking period lengths
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StakingPeriod {
    /// 1 day, no bonus
    Days1,
    /// 30 days, 10% bonus
    Days30,
    /// 60 days, 20% bonus
    Days60,
    /// 90 days, 30% bonus
    Days90,
    /// 180 days, 40% bonus
    Days180,
    /// 360 days, 50% bonus
    Days360,
}

impl StakingPeriod {
    /// All supported staking periods, shortest first
    pub const ALL: [StakingPeriod; 6] = [
        Self::Days1,
        Self::Days30,
        Self::Days60,
        Self::Days90,
        Self::Days180,
        Self::Days360,
    ];

    /// Resolve a day count to a supported period
    pub fn from_days(days: u32) -> Result<Self> {
        match days {
            1 => Ok(Self::Days1),
            30 => Ok(Self::Days30),
            60 => Ok(Self::Days60),
            90 => Ok(Self::Days90),
            180 => Ok(Self::Days180),
            360 => Ok(Self::Days360),
            other => Err(EngineError::UnsupportedStakingPeriod(other)),
        }
    }

    /// Period length in days
    pub fn days(&self) -> u32 {
        match self {
            Self::Days1 => 1,
            Self::Days30 => 30,
            Self::Days60 => 60,
            Self::Days90 => 90,
            Self::Days180 => 180,
            Self::Days360 => 360,
        }
    }

    /// Bonus rate applied on top of the base daily yield
    pub fn bonus_rate(&self) -> f64 {
        match self {
            Self::Days1 => 0.0,
            Self::Days30 => 0.1,
            Self::Days60 => 0.2,
            Self::Days90 => 0.3,
            Self::Days180 => 0.4,
            Self::Days360 => 0.5,
        }
    }
}

/// Supported release period lengths
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleasePeriod {
    /// 7 days, 30% burn fee
    Days7,
    /// 15 days, 20% burn fee
    Days15,
    /// 30 days, 10% burn fee
    Days30,
    /// 60 days, no burn fee
    Days60,
}

impl ReleasePeriod {
    /// All supported release periods, shortest first
    pub const ALL: [ReleasePeriod; 4] =
        [Self::Days7, Self::Days15, Self::Days30, Self::Days60];

    /// Resolve a day count to a supported period
    pub fn from_days(days: u32) -> Result<Self> {
        match days {
            7 => Ok(Self::Days7),
            15 => Ok(Self::Days15),
            30 => Ok(Self::Days30),
            60 => Ok(Self::Days60),
            other => Err(EngineError::UnsupportedReleasePeriod(other)),
        }
    }

    /// Period length in days
    pub fn days(&self) -> u32 {
        match self {
            Self::Days7 => 7,
            Self::Days15 => 15,
            Self::Days30 => 30,
            Self::Days60 => 60,
        }
    }

    /// Early-exit burn fee deducted from the released share
    pub fn burn_fee(&self) -> f64 {
        match self {
            Self::Days7 => 0.3,
            Self::Days15 => 0.2,
            Self::Days30 => 0.1,
            Self::Days60 => 0.0,
        }
    }
}
