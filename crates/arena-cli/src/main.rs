//! Arena CLI
//!
//! Command-line interface for evaluating team bonus, earnings and join rules
//! against a team snapshot exported by the dashboard.

mod config;

use anyhow::Context;
use arena_teams::{check_join, MemberEarnings, MemberRole, Team, TeamMember, TeamSettings};
use clap::{Parser, Subcommand};
use config::{ArenaConfig, LogFormat, LoggingConfig};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "arena")]
#[command(version = "0.1.0")]
#[command(about = "Arena team bonus, earnings and join eligibility", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "~/.arena/arena.toml")]
    config: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the team bonus breakdown
    Bonus {
        /// Team snapshot (JSON)
        #[arg(short, long)]
        team: PathBuf,
    },

    /// Show team earnings and per-member projections
    Earnings {
        /// Team snapshot (JSON)
        #[arg(short, long)]
        team: PathBuf,
    },

    /// Apply the team multiplier to an amount
    Apply {
        /// Team snapshot (JSON)
        #[arg(short, long)]
        team: PathBuf,

        /// Earnings figure (may be negative)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: f64,
    },

    /// Check whether a stake is enough to join a team
    CanJoin {
        /// Team snapshot (JSON)
        #[arg(short, long)]
        team: PathBuf,

        /// Prospective member's staked amount
        #[arg(short, long, allow_hyphen_values = true)]
        stake: f64,
    },

    /// Print an example team snapshot
    Sample,

    /// Version information
    Version,
}

fn init_logging(verbose: bool, logging: &LoggingConfig) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn expand_path(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(rest) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
    }
    path.to_path_buf()
}

fn load_team(path: &Path) -> anyhow::Result<Team> {
    let path = expand_path(path);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read team snapshot {:?}", path))?;
    let team: Team = serde_json::from_str(&content)
        .with_context(|| format!("Invalid team snapshot {:?}", path))?;

    tracing::info!(team = %team.id, members = team.member_count(), "Loaded team snapshot");
    Ok(team)
}

/// One row of the earnings table
fn member_line(member: &MemberEarnings) -> String {
    format!(
        "  {:<44} {:<8} {:>12.2} -> {:>12.2}",
        member.address,
        member.role.name(),
        member.base,
        member.boosted
    )
}

/// The three-member fixture used across the dashboard docs
fn sample_team() -> anyhow::Result<Team> {
    let rank = |n: u32| NonZeroU32::new(n).context("leaderboard ranks start at 1");
    let members = vec![
        TeamMember::new("0x1111", MemberRole::Captain)
            .with_weekly_earnings(450.0)
            .with_staked(12_000.0)
            .with_rank(rank(5)?)
            .with_achievements(["first_stake", "whale", "streak_30"]),
        TeamMember::new("0x2222", MemberRole::Member)
            .with_weekly_earnings(320.0)
            .with_staked(8_000.0)
            .with_rank(rank(27)?)
            .with_achievements(["first_stake", "streak_7"]),
        TeamMember::new("0x3333", MemberRole::Member)
            .with_weekly_earnings(210.0)
            .with_staked(3_000.0)
            .with_achievements(["first_stake"]),
    ];
    Ok(Team::new(
        "team-lions",
        "Liquid Lions",
        members,
        10,
        TeamSettings::with_min_stake(100.0),
    )?
    .with_created_at(1_718_000_000))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = expand_path(&cli.config);
    let loaded = ArenaConfig::load(&config_path)
        .with_context(|| format!("Failed to load config {:?}", config_path))?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    init_logging(cli.verbose, &config.logging);
    if found {
        tracing::info!("Config: {:?}", config_path);
    } else {
        tracing::info!("Config not found at {:?}, using default rates", config_path);
    }

    let rates = &config.bonus;

    match cli.command {
        Commands::Bonus { team } => {
            let team = load_team(&team)?;
            let bonuses = rates.calculate(&team);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&bonuses)?);
            } else {
                println!("Team: {} ({} members)", team.name, team.member_count());
                println!("  Member count: {:>6.2}%", bonuses.member_count * 100.0);
                println!("  Synergy:      {:>6.2}%", bonuses.synergy * 100.0);
                println!("  Achievements: {:>6.2}%", bonuses.achievements * 100.0);
                println!("  Captain:      {:>6.2}%", bonuses.captain * 100.0);
                println!(
                    "Total multiplier: {:.4}x (+{:.2}%)",
                    bonuses.total_multiplier,
                    bonuses.bonus_percent()
                );
            }
        }

        Commands::Earnings { team } => {
            let team = load_team(&team)?;
            let earnings = rates.earnings(&team);
            let members = rates.member_earnings(&team);

            if cli.json {
                let report = serde_json::json!({
                    "team": earnings,
                    "members": members,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Team: {}", team.name);
                println!("  Base earnings:  {:.2}", earnings.base_earnings);
                println!("  Multiplier:     {:.4}x", earnings.multiplier);
                println!("  Bonus earnings: {:.2}", earnings.bonus_earnings);
                println!("  Total earnings: {:.2}", earnings.total_earnings);
                println!("");
                println!("Members:");
                for member in &members {
                    println!("{}", member_line(member));
                }
            }
        }

        Commands::Apply { team, amount } => {
            let team = load_team(&team)?;
            let boosted = rates.apply(amount, &team);

            if cli.json {
                println!("{}", serde_json::json!({ "amount": amount, "boosted": boosted }));
            } else {
                println!("{:.2} -> {:.2}", amount, boosted);
            }
        }

        Commands::CanJoin { team, stake } => {
            let team = load_team(&team)?;
            let decision = check_join(stake, &team);

            if cli.json {
                let reason = decision.as_ref().err().map(|r| r.to_string());
                println!(
                    "{}",
                    serde_json::json!({ "canJoin": decision.is_ok(), "reason": reason })
                );
            } else {
                match decision {
                    Ok(()) => println!("Yes: a stake of {} can join {}", stake, team.name),
                    Err(reason) => println!("No: {}", reason),
                }
            }
        }

        Commands::Sample => {
            println!("{}", serde_json::to_string_pretty(&sample_team()?)?);
        }

        Commands::Version => {
            println!("Arena CLI v0.1.0");
            println!("Rust: {}", rustc_version_runtime::version());
            println!("");
            println!("Default rates:");
            println!(
                "  Member count: {}% per member, cap {}%",
                arena_teams::MEMBER_BONUS_STEP * 100.0,
                arena_teams::MEMBER_BONUS_CAP * 100.0
            );
            println!("  Synergy:      up to {}%", arena_teams::SYNERGY_BONUS_MAX * 100.0);
            println!(
                "  Achievements: {}% each, cap {}%",
                arena_teams::ACHIEVEMENT_BONUS_STEP * 100.0,
                arena_teams::ACHIEVEMENT_BONUS_CAP * 100.0
            );
            println!(
                "  Captain:      {}% if rank <= {}",
                arena_teams::CAPTAIN_BONUS * 100.0,
                arena_teams::CAPTAIN_RANK_THRESHOLD
            );
        }
    }

    Ok(())
}
