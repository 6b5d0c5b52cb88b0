//! # Antstake Engine - Staking Payout Simulation & Reward Aggregation
//!
//! Deterministic calculation core for a multi-tier staking payout scheme:
//! a principal staked in ASC earns a constant gross daily yield in ANT,
//! 30% of which compounds through 30-day reinvestment sub-positions while
//! 70% is released to the holder on a smoothed schedule after a burn fee.
//! Upstream referrers and community tiers earn override rewards on the
//! simulated downstream output.
//!
//! ## Yield Split
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  principal × (1 − fee) × roi × freq × (1 + bonus)  per day   │
//! ├──────────────────────────┬───────────────────────────────────┤
//! │  30% reinvested          │  70% released                     │
//! │  30-day sub-position     │  × (1 − burn fee), smoothed over  │
//! │  principal returns at    │  the release period starting the  │
//! │  maturity                │  day after accrual                │
//! └──────────────────────────┴───────────────────────────────────┘
//! ```
//!
//! ## Schedule Tables
//!
//! | Staking Period | Bonus | | Release Period | Burn Fee |
//! |----------------|-------|-|----------------|----------|
//! | 1 day   | 0%  | | 7 days  | 30% |
//! | 30 days | 10% | | 15 days | 20% |
//! | 60 days | 20% | | 30 days | 10% |
//! | 90 days | 30% | | 60 days | 0%  |
//! | 180 days| 40% | |         |     |
//! | 360 days| 50% | |         |     |
//!
//! All entry points are pure functions: no I/O, no shared state, bounded
//! horizons (at most a few hundred iterations per run).

pub mod community;
pub mod engine;
pub mod error;
pub mod params;
pub mod pool;
pub mod referral;
pub mod schedule;

// Re-exports
pub use community::{
    CommunityLevel, CommunityProjectionRow, CommunityRequirements, CommunityRewardResult,
    MissingRequirements,
};
pub use engine::{simulate, DailyLedgerEntry, SimulationResult};
pub use error::{EngineError, Result};
pub use params::{SimulationParams, TokenPrices};
pub use pool::CompoundingPool;
pub use referral::{ReferralProjectionRow, ReferralRewardResult, ReferralTier};
pub use schedule::{ReleasePeriod, StakingPeriod};

/// Global economic constants shared by the engine and both aggregators.
pub mod constants {
    /// Yield events per day
    pub const DAILY_FREQUENCY: f64 = 1.0;

    /// Share of each day's yield released to the holder
    pub const RELEASE_RATIO: f64 = 0.7;

    /// Share of each day's yield diverted into reinvestment
    pub const REINVEST_RATIO: f64 = 0.3;

    /// Reinvestment sub-positions mature after this many days
    pub const REINVEST_TERM_DAYS: u32 = 30;

    /// Default daily rate of return: 1%
    pub const DEFAULT_DAILY_ROI: f64 = 0.01;

    /// Minimum configurable daily rate of return: 0.2%
    pub const MIN_DAILY_ROI: f64 = 0.002;

    /// Maximum configurable daily rate of return: 1%
    pub const MAX_DAILY_ROI: f64 = 0.01;

    /// Default platform fee: 10%
    pub const DEFAULT_PLATFORM_FEE: f64 = 0.1;

    /// Minimum configurable platform fee: 5%
    pub const MIN_PLATFORM_FEE: f64 = 0.05;

    /// Maximum configurable platform fee: 10%
    pub const MAX_PLATFORM_FEE: f64 = 0.1;

    /// ANT price in USDT
    pub const ANT_PRICE_USDT: f64 = 1.0;

    /// ASC price in USDT
    pub const ASC_PRICE_USDT: f64 = 1.0;

    /// Horizon for referral/community day-indexed projections
    pub const PROJECTION_HORIZON_DAYS: u32 = 540;

    /// Staking period the promotional simulations use
    pub const PROMO_STAKING_DAYS: u32 = 360;

    /// Release period the promotional simulations use
    pub const PROMO_RELEASE_DAYS: u32 = 30;
}

pub use constants::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_sum_to_one() {
        assert!((RELEASE_RATIO + REINVEST_RATIO - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roi_range_contains_default() {
        assert!(DEFAULT_DAILY_ROI >= MIN_DAILY_ROI);
        assert!(DEFAULT_DAILY_ROI <= MAX_DAILY_ROI);
        assert!(DEFAULT_PLATFORM_FEE >= MIN_PLATFORM_FEE);
        assert!(DEFAULT_PLATFORM_FEE <= MAX_PLATFORM_FEE);
    }
}
