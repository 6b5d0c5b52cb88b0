//! # Daily Simulation Engine
//!
//! Produces the full day-by-day ledger for one staked position, including
//! the reinvestment sub-positions it spawns internally.
//!
//! ## Canonical policy
//!
//! - The gross daily yield of the original position is constant; only
//!   reinvestment sub-positions compound.
//! - Day `d`'s released share is smoothed over days `d+1 ..= d+release`,
//!   so nothing releases on day 1.
//! - Reinvestment yield starts the day after the record is created and the
//!   staking bonus applies to it, same as to the original yield.
//! - The ledger horizon extends past the staking period until every
//!   trailing release window and reinvestment maturity has drained.

use crate::constants::*;
use crate::error::Result;
use crate::params::{SimulationParams, TokenPrices};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One reinvestment sub-position.
///
/// Created whenever a day's yield diverts a nonzero amount into
/// reinvestment, removed from the live arena once its principal has been
/// paid out on the maturity day.
#[derive(Clone, Copy, Debug)]
struct ReinvestRecord {
    /// Reinvested amount in ANT
    principal: f64,
    /// First day this record's yield is counted
    start_day: u32,
    /// Absolute day index at which the principal is returned in full
    maturity_day: u32,
    /// Fixed per-day yield, computed once at creation
    daily_yield: f64,
}

/// One row of the daily ledger
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLedgerEntry {
    /// Day index, 1-based
    pub day: u32,

    /// ANT released today from prior days' smoothed schedules
    pub release_ant: f64,

    /// ANT newly diverted into reinvestment today
    pub reinvest_ant: f64,

    /// ANT yielded today by all live reinvestment records
    pub reinvest_yield_ant: f64,

    /// Principal maturing today: reinvestment records due today, plus the
    /// full converted principal on the staking maturity day
    pub maturity_release_ant: f64,

    /// Total non-principal yield for the day
    pub total_yield_ant: f64,

    /// All of the day's inflows, principal included, as a percentage of
    /// the original investment
    pub roi_percent: f64,
}

/// Aggregate output of one simulation run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Converted principal in ASC
    pub asc_amount: f64,

    /// Lifetime sum of non-principal yield
    pub total_yield_ant: f64,

    /// Lifetime sum of principal-maturity payouts
    pub total_maturity_release_ant: f64,

    /// Average monthly non-principal yield; 0 for a single-day staking
    /// period since there is no multi-day base to extrapolate from
    pub monthly_yield_ant: f64,

    /// Average daily non-principal yield over the staking period
    pub daily_average_ant: f64,

    /// Full ordered ledger, one entry per simulated day
    pub daily_ledger: Vec<DailyLedgerEntry>,
}

/// Run the daily simulation for one staked position.
///
/// Pure and deterministic; validates the parameters before any
/// computation. A zero investment amount returns a well-formed all-zero
/// ledger rather than failing.
pub fn simulate(params: &SimulationParams) -> Result<SimulationResult> {
    params.validate()?;

    let prices = TokenPrices::default();
    let amount = params.investment_amount;
    let staking_days = params.staking_period.days();
    let release_days = params.release_period.days();

    let asc_amount = prices.usdt_to_asc(amount);
    let bonus = params.staking_period.bonus_rate();
    let burn_fee = params.release_period.burn_fee();

    // Constant across all days; the original principal does not compound.
    let daily_gross =
        amount * (1.0 - params.platform_fee) * params.daily_roi * DAILY_FREQUENCY * (1.0 + bonus);
    let reinvest_share = daily_gross * REINVEST_RATIO;
    let release_after_burn = daily_gross * RELEASE_RATIO * (1.0 - burn_fee);
    let per_day_release = release_after_burn / release_days as f64;

    // Horizon drains all trailing release windows and reinvestment
    // maturities. The last record is created on day staking_days - 1.
    let last_release_day = staking_days + release_days;
    let last_maturity_day = if staking_days > 1 {
        staking_days - 1 + REINVEST_TERM_DAYS
    } else {
        0
    };
    let horizon = last_release_day.max(last_maturity_day);

    debug!(
        amount,
        staking_days, release_days, daily_gross, horizon, "starting simulation"
    );

    // Accumulate the smoothed release schedules up front; each accrual day
    // pays out over the window that starts the following day.
    let mut releases = vec![0.0_f64; horizon as usize + 1];
    for accrual_day in 1..=staking_days {
        for offset in 1..=release_days {
            let pay_day = accrual_day + offset;
            if pay_day <= horizon {
                releases[pay_day as usize] += per_day_release;
            }
        }
    }

    let mut records: Vec<ReinvestRecord> = Vec::new();
    let mut ledger = Vec::with_capacity(horizon as usize);
    let mut total_yield = 0.0;
    let mut total_maturity = 0.0;

    for day in 1..=horizon {
        // No record on the final staking day: its term would outlive the
        // position's own accrual without ever being fed.
        let reinvest_today = if day < staking_days && reinvest_share > 0.0 {
            records.push(ReinvestRecord {
                principal: reinvest_share,
                start_day: day + 1,
                maturity_day: day + REINVEST_TERM_DAYS,
                daily_yield: reinvest_share * params.daily_roi * DAILY_FREQUENCY * (1.0 + bonus),
            });
            reinvest_share
        } else {
            0.0
        };

        let mut reinvest_yield = 0.0;
        let mut matured_principal = 0.0;
        for record in &records {
            if record.start_day <= day {
                reinvest_yield += record.daily_yield;
            }
            if record.maturity_day == day {
                matured_principal += record.principal;
            }
        }
        records.retain(|record| record.maturity_day > day);

        let staking_maturity = if day == staking_days { asc_amount } else { 0.0 };
        let maturity_release = staking_maturity + matured_principal;

        let release_today = releases[day as usize];
        let day_yield = release_today + reinvest_yield;
        total_yield += day_yield;
        total_maturity += maturity_release;

        let roi_percent = if amount > 0.0 {
            (day_yield + maturity_release) / amount * 100.0
        } else {
            0.0
        };

        ledger.push(DailyLedgerEntry {
            day,
            release_ant: release_today,
            reinvest_ant: reinvest_today,
            reinvest_yield_ant: reinvest_yield,
            maturity_release_ant: maturity_release,
            total_yield_ant: day_yield,
            roi_percent,
        });
    }

    let monthly_yield = if staking_days > 1 {
        total_yield / (staking_days as f64 / 30.0)
    } else {
        0.0
    };
    let daily_average = total_yield / staking_days as f64;

    debug!(total_yield, total_maturity, "simulation complete");

    Ok(SimulationResult {
        asc_amount,
        total_yield_ant: total_yield,
        total_maturity_release_ant: total_maturity,
        monthly_yield_ant: monthly_yield,
        daily_average_ant: daily_average,
        daily_ledger: ledger,
    })
}
