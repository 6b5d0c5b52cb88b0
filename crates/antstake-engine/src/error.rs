//! Error types for Antstake engine operations

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur during parameter validation.
///
/// The engine performs no partial computation on invalid input: every entry
/// point validates first and either returns a complete ledger or one of
/// these errors. A zero investment amount is not an error; it produces a
/// well-formed all-zero result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Investment amount is negative or not a finite number
    #[error("Invalid investment amount: {0}")]
    InvalidInvestment(f64),

    /// Staking period is not one of the enumerated supported lengths
    #[error("Unsupported staking period: {0} days")]
    UnsupportedStakingPeriod(u32),

    /// Release period is not one of the enumerated supported lengths
    #[error("Unsupported release period: {0} days")]
    UnsupportedReleasePeriod(u32),

    /// Daily rate of return outside the configured bounds
    #[error("Daily rate of return {value} outside allowed range [{min}, {max}]")]
    DailyRoiOutOfRange { value: f64, min: f64, max: f64 },

    /// Platform fee outside the configured bounds
    #[error("Platform fee {value} outside allowed range [{min}, {max}]")]
    PlatformFeeOutOfRange { value: f64, min: f64, max: f64 },

    /// Community level name could not be parsed
    #[error("Unknown community level: {0}")]
    UnknownCommunityLevel(String),
}
