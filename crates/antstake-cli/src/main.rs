//! Antstake CLI
//!
//! Command-line frontend for the simulation engine, standing in for the
//! presentation layer: parses parameters, runs the engine and renders the
//! resulting ledgers as text or JSON.

use antstake_engine::{
    community, referral, simulate, CommunityLevel, ReferralTier, SimulationParams,
};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "antstake")]
#[command(version = "0.1.0")]
#[command(about = "Staking payout simulation and reward aggregation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the daily ledger of one staked position
    Simulate {
        /// Investment amount in USDT
        #[arg(short, long)]
        amount: f64,

        /// Staking period in days (1, 30, 60, 90, 180 or 360)
        #[arg(short, long, default_value = "90")]
        staking_period: u32,

        /// Release period in days (7, 15, 30 or 60)
        #[arg(short, long, default_value = "30")]
        release_period: u32,

        /// Daily rate of return
        #[arg(long, default_value_t = antstake_engine::DEFAULT_DAILY_ROI)]
        daily_roi: f64,

        /// Platform fee
        #[arg(long, default_value_t = antstake_engine::DEFAULT_PLATFORM_FEE)]
        platform_fee: f64,

        /// Number of ledger rows to print (all with --json)
        #[arg(long, default_value = "10")]
        days: usize,

        /// Emit the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Aggregate referral override rewards across upline generations
    Referral {
        /// Tier as LEVEL:STAKED_ASC, repeatable (e.g. --tier 1:5000 --tier 2:2000)
        #[arg(short, long = "tier", required = true)]
        tiers: Vec<String>,

        /// Run the 540-day compounding projection instead of the snapshot
        #[arg(long)]
        project: bool,

        /// Emit the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a community level: qualification and reward
    Community {
        /// Community level (V1..V9)
        #[arg(short, long)]
        level: CommunityLevel,

        /// Reward rate; clamped into the level's band
        #[arg(short, long)]
        rate: f64,

        /// Path stake in USDT, repeatable
        #[arg(long = "path")]
        paths: Vec<f64>,

        /// Downline community as LEVEL:COUNT, repeatable
        #[arg(long = "downline")]
        downlines: Vec<String>,

        /// Run the 540-day compounding projection instead of the snapshot
        #[arg(long)]
        project: bool,

        /// Emit the full result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn parse_tier(spec: &str) -> Result<ReferralTier, String> {
    let (level, stake) = spec
        .split_once(':')
        .ok_or_else(|| format!("expected LEVEL:STAKED_ASC, got '{spec}'"))?;
    Ok(ReferralTier {
        level: level
            .parse()
            .map_err(|_| format!("invalid level '{level}'"))?,
        staked_asc: stake
            .parse()
            .map_err(|_| format!("invalid stake '{stake}'"))?,
    })
}

fn parse_downline(spec: &str) -> Result<(CommunityLevel, u32), String> {
    let (level, count) = spec
        .split_once(':')
        .ok_or_else(|| format!("expected LEVEL:COUNT, got '{spec}'"))?;
    Ok((
        level.parse().map_err(|e| format!("{e}"))?,
        count
            .parse()
            .map_err(|_| format!("invalid count '{count}'"))?,
    ))
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate {
            amount,
            staking_period,
            release_period,
            daily_roi,
            platform_fee,
            days,
            json,
        } => {
            let params =
                SimulationParams::new(amount, staking_period, release_period, daily_roi, platform_fee)?;
            tracing::info!(
                "Simulating {} USDT over {} days ({}-day release)",
                amount,
                staking_period,
                release_period
            );
            let result = simulate(&params)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            println!("Principal:            {:.2} ASC", result.asc_amount);
            println!("Total yield:          {:.2} ANT", result.total_yield_ant);
            println!(
                "Total maturity:       {:.2} ANT",
                result.total_maturity_release_ant
            );
            println!("Monthly yield:        {:.2} ANT", result.monthly_yield_ant);
            println!("Daily average yield:  {:.4} ANT", result.daily_average_ant);
            println!();
            println!("{:>5} {:>12} {:>12} {:>12} {:>12} {:>8}",
                "day", "release", "reinvest", "reinv.yield", "maturity", "roi%");
            for entry in result.daily_ledger.iter().take(days) {
                println!(
                    "{:>5} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>8.4}",
                    entry.day,
                    entry.release_ant,
                    entry.reinvest_ant,
                    entry.reinvest_yield_ant,
                    entry.maturity_release_ant,
                    entry.roi_percent,
                );
            }
        }

        Commands::Referral {
            tiers,
            project,
            json,
        } => {
            let tiers = tiers
                .iter()
                .map(|s| parse_tier(s))
                .collect::<Result<Vec<_>, _>>()?;

            if project {
                let rows = referral::project_referral_rewards(&tiers)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                } else {
                    let last = rows.last().ok_or("empty projection")?;
                    println!("Projection horizon:   {} days", rows.len());
                    println!("Final team stake:     {:.2} ASC", last.total_staked_asc);
                    println!(
                        "Accumulated reward:   {:.2} ANT",
                        last.accumulated_reward_ant
                    );
                }
                return Ok(());
            }

            let results = referral::referral_rewards(&tiers)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("{:>5} {:>14} {:>8} {:>14}", "level", "output/day", "rate", "reward/day");
                for r in &results {
                    println!(
                        "{:>5} {:>14.4} {:>7.1}% {:>14.4}",
                        r.level,
                        r.daily_output_ant,
                        r.reward_rate * 100.0,
                        r.daily_reward_ant,
                    );
                }
            }
        }

        Commands::Community {
            level,
            rate,
            paths,
            downlines,
            project,
            json,
        } => {
            if project {
                let rows = community::project_community_rewards(level, rate)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                } else {
                    let last = rows.last().ok_or("empty projection")?;
                    println!("Projection horizon:   {} days", rows.len());
                    println!("Final pooled stake:   {:.2} ASC", last.staked_asc);
                    println!(
                        "Accumulated reward:   {:.2} ANT",
                        last.accumulated_reward_ant
                    );
                }
                return Ok(());
            }

            let mut downline_counts: HashMap<CommunityLevel, u32> = HashMap::new();
            for spec in &downlines {
                let (downline_level, count) = parse_downline(spec)?;
                *downline_counts.entry(downline_level).or_insert(0) += count;
            }

            let result = community::community_reward(level, &paths, &downline_counts, rate)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Level:         {}", result.level);
                println!("Total staking: {:.2} USDT", result.total_staking);
                println!("Reward rate:   {:.1}%", result.reward_rate * 100.0);
                println!("Qualified:     {}", result.is_qualified);
                println!("Daily reward:  {:.4} ANT", result.daily_reward_ant);
                if let Some(missing) = result.missing {
                    if let Some(paths) = missing.paths {
                        println!(
                            "Missing:       {} path(s), next minimum {:.0} USDT",
                            paths,
                            missing.path_amount.unwrap_or(0.0)
                        );
                    }
                    if let (Some(dl_level), Some(count)) =
                        (missing.downline_level, missing.downline_count)
                    {
                        println!("Missing:       {} downline {} communities", count, dl_level);
                    }
                }
            }
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tier() {
        let tier = parse_tier("1:5000").unwrap();
        assert_eq!(tier.level, 1);
        assert_eq!(tier.staked_asc, 5000.0);
        assert!(parse_tier("nope").is_err());
        assert!(parse_tier("x:5000").is_err());
    }

    #[test]
    fn test_parse_downline() {
        let (level, count) = parse_downline("V4:3").unwrap();
        assert_eq!(level, CommunityLevel::V4);
        assert_eq!(count, 3);
        assert!(parse_downline("V10:3").is_err());
    }
}
