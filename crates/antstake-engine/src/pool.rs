//! # Compounding Pool
//!
//! State machine behind the day-indexed reward projections: a pooled stake
//! whose base daily output comes from the simulation engine, growing as
//! reinvested sub-principal matures back into the pool.
//!
//! State is `{staked_asc, base_output_ant, live reinvestment records}`.
//! The transition on a day where a record matures converts the matured ANT
//! back into ASC, enlarges the pool and re-runs the engine for a fresh
//! steady-state output; on every other day the state carries unchanged.

use crate::constants::*;
use crate::engine::simulate;
use crate::error::Result;
use crate::params::{SimulationParams, TokenPrices};
use tracing::debug;

/// Reinvestment record tracked at pool level
#[derive(Clone, Copy, Debug)]
struct PoolRecord {
    /// Reinvested amount in ANT
    amount_ant: f64,
    /// Absolute day index at which the amount re-enters the pool
    maturity_day: u32,
    /// Steady-state daily output of the reinvested amount
    daily_return_ant: f64,
}

/// A pooled stake whose output compounds through 30-day reinvestment.
#[derive(Clone, Debug)]
pub struct CompoundingPool {
    staked_asc: f64,
    base_output_ant: f64,
    records: Vec<PoolRecord>,
    prices: TokenPrices,
    day: u32,
}

impl CompoundingPool {
    /// Seed a pool with an initial stake in ASC
    pub fn new(staked_asc: f64) -> Result<Self> {
        let prices = TokenPrices::default();
        let base_output_ant = Self::steady_state_output(staked_asc, &prices)?;
        Ok(Self {
            staked_asc,
            base_output_ant,
            records: Vec::new(),
            prices,
            day: 0,
        })
    }

    /// Current pool size in ASC
    pub fn staked_asc(&self) -> f64 {
        self.staked_asc
    }

    /// Most recently simulated day; 0 before the first [`advance`](Self::advance)
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Current steady-state base output in ANT per day
    pub fn base_output_ant(&self) -> f64 {
        self.base_output_ant
    }

    fn steady_state_output(staked_asc: f64, prices: &TokenPrices) -> Result<f64> {
        let params = SimulationParams::promotional(prices.asc_to_usdt(staked_asc))?;
        Ok(simulate(&params)?.daily_average_ant)
    }

    /// Advance the pool to the next day and return that day's total ANT
    /// output. The pool keeps its own day cursor, so maturities keyed on
    /// absolute day indices cannot be skipped or replayed.
    pub fn advance(&mut self) -> Result<f64> {
        self.day += 1;
        let day = self.day;
        // Matured sub-principal re-enters the pool and refreshes the
        // steady-state output.
        let matured_ant: f64 = self
            .records
            .iter()
            .filter(|r| r.maturity_day == day)
            .map(|r| r.amount_ant)
            .sum();
        if matured_ant > 0.0 {
            self.staked_asc += self.prices.ant_to_asc(matured_ant);
            self.base_output_ant = Self::steady_state_output(self.staked_asc, &self.prices)?;
            debug!(day, matured_ant, staked_asc = self.staked_asc, "pool grew");
        }
        self.records.retain(|r| r.maturity_day > day);

        let reinvest_output: f64 = self.records.iter().map(|r| r.daily_return_ant).sum();
        let total_output = self.base_output_ant + reinvest_output;

        let reinvest_ant = total_output * REINVEST_RATIO;
        if reinvest_ant > 0.0 {
            let reinvest_params =
                SimulationParams::promotional(self.prices.ant_to_usdt(reinvest_ant))?;
            self.records.push(PoolRecord {
                amount_ant: reinvest_ant,
                maturity_day: day + REINVEST_TERM_DAYS,
                daily_return_ant: simulate(&reinvest_params)?.daily_average_ant,
            });
        }

        Ok(total_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_stays_empty() {
        let mut pool = CompoundingPool::new(0.0).unwrap();
        for _ in 0..60 {
            assert_eq!(pool.advance().unwrap(), 0.0);
        }
        assert_eq!(pool.staked_asc(), 0.0);
        assert_eq!(pool.day(), 60);
    }

    #[test]
    fn test_pool_grows_on_maturity() {
        let mut pool = CompoundingPool::new(20_000.0).unwrap();
        let initial = pool.staked_asc();

        for _ in 0..30 {
            pool.advance().unwrap();
        }
        assert_eq!(pool.staked_asc(), initial);

        // Day-1 reinvestment matures on day 31
        pool.advance().unwrap();
        assert_eq!(pool.day(), 31);
        assert!(pool.staked_asc() > initial);
    }

    #[test]
    fn test_output_compounds() {
        let mut pool = CompoundingPool::new(20_000.0).unwrap();
        let first = pool.advance().unwrap();
        let mut last = first;
        for _ in 1..90 {
            last = pool.advance().unwrap();
        }
        assert!(last > first);
    }

    #[test]
    fn test_day_cursor_is_internal() {
        // The cursor lives in the pool, so every call moves exactly one
        // day and the day-31 maturity lands after exactly 31 calls.
        let mut pool = CompoundingPool::new(20_000.0).unwrap();
        assert_eq!(pool.day(), 0);
        let initial = pool.staked_asc();
        for expected in 1..=30 {
            pool.advance().unwrap();
            assert_eq!(pool.day(), expected);
            assert_eq!(pool.staked_asc(), initial);
        }
        pool.advance().unwrap();
        assert_eq!(pool.day(), 31);
        assert!(pool.staked_asc() > initial);
    }

    #[test]
    fn test_base_output_matches_engine() {
        let pool = CompoundingPool::new(20_000.0).unwrap();
        let expected = simulate(&SimulationParams::promotional(20_000.0).unwrap())
            .unwrap()
            .daily_average_ant;
        assert_eq!(pool.base_output_ant(), expected);
    }
}
