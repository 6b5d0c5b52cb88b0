//! Validated simulation parameters and token pricing.

use crate::constants::*;
use crate::error::{EngineError, Result};
use crate::schedule::{ReleasePeriod, StakingPeriod};
use serde::{Deserialize, Serialize};

/// Immutable input parameters for one simulation run.
///
/// Build through [`SimulationParams::new`] so the enumerated periods and
/// rate bounds are checked up front; the engine never computes a partial
/// ledger on invalid input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Investment amount in USDT. Zero yields a degenerate all-zero ledger.
    pub investment_amount: f64,

    /// Total lifetime of the position
    pub staking_period: StakingPeriod,

    /// Window over which each day's released share is smoothed
    pub release_period: ReleasePeriod,

    /// Fractional daily yield before fees and bonus
    pub daily_roi: f64,

    /// Fractional fee deducted from the principal before yield computation
    pub platform_fee: f64,
}

impl SimulationParams {
    /// Build validated parameters from raw day counts and rates
    pub fn new(
        investment_amount: f64,
        staking_days: u32,
        release_days: u32,
        daily_roi: f64,
        platform_fee: f64,
    ) -> Result<Self> {
        let params = Self {
            investment_amount,
            staking_period: StakingPeriod::from_days(staking_days)?,
            release_period: ReleasePeriod::from_days(release_days)?,
            daily_roi,
            platform_fee,
        };
        params.validate()?;
        Ok(params)
    }

    /// Fixed promotional configuration used by the referral and community
    /// aggregators: 360-day staking, 30-day release, default rates.
    pub fn promotional(investment_amount: f64) -> Result<Self> {
        Self::new(
            investment_amount,
            PROMO_STAKING_DAYS,
            PROMO_RELEASE_DAYS,
            DEFAULT_DAILY_ROI,
            DEFAULT_PLATFORM_FEE,
        )
    }

    /// Check amount and rate bounds
    pub fn validate(&self) -> Result<()> {
        if !self.investment_amount.is_finite() || self.investment_amount < 0.0 {
            return Err(EngineError::InvalidInvestment(self.investment_amount));
        }
        if !self.daily_roi.is_finite()
            || self.daily_roi < MIN_DAILY_ROI
            || self.daily_roi > MAX_DAILY_ROI
        {
            return Err(EngineError::DailyRoiOutOfRange {
                value: self.daily_roi,
                min: MIN_DAILY_ROI,
                max: MAX_DAILY_ROI,
            });
        }
        if !self.platform_fee.is_finite()
            || self.platform_fee < MIN_PLATFORM_FEE
            || self.platform_fee > MAX_PLATFORM_FEE
        {
            return Err(EngineError::PlatformFeeOutOfRange {
                value: self.platform_fee,
                min: MIN_PLATFORM_FEE,
                max: MAX_PLATFORM_FEE,
            });
        }
        Ok(())
    }
}

/// Token prices in USDT, used to convert between the staked token (ASC)
/// and the yield token (ANT)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenPrices {
    /// ANT price in USDT
    pub ant: f64,
    /// ASC price in USDT
    pub asc: f64,
}

impl Default for TokenPrices {
    fn default() -> Self {
        Self {
            ant: ANT_PRICE_USDT,
            asc: ASC_PRICE_USDT,
        }
    }
}

impl TokenPrices {
    /// Convert a USDT amount to ASC
    pub fn usdt_to_asc(&self, usdt: f64) -> f64 {
        usdt / self.asc
    }

    /// Convert an ANT amount to ASC via its USDT value
    pub fn ant_to_asc(&self, ant: f64) -> f64 {
        ant * self.ant / self.asc
    }

    /// Convert an ASC amount to USDT
    pub fn asc_to_usdt(&self, asc: f64) -> f64 {
        asc * self.asc
    }

    /// Convert an ANT amount to USDT
    pub fn ant_to_usdt(&self, ant: f64) -> f64 {
        ant * self.ant
    }
}
