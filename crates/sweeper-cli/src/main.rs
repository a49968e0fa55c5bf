use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sweeper_core::impls::{InMemoryRecordStore, JsonFileSettingsStore};
use sweeper_core::ports::{Clock, FixedClock};
use sweeper_core::{RetentionConfig, RetentionPeriod, SchedulerBuilder, TickOutcome};

/// Replays a stream of host events against the retention scheduler.
///
/// Every simulated event stores one record and ticks the scheduler, the same
/// way an HTTP interceptor would on each intercepted call. Scheduler state is
/// kept in `<state-dir>/<preferences_name>.json`, so repeated runs pick up
/// where the previous one stopped.
#[derive(Debug, Parser)]
#[command(name = "sweeper", version)]
struct Args {
    /// Retention period (unlimited, one_hour, one_day, one_week).
    /// Overrides the value from --config.
    #[arg(long)]
    period: Option<RetentionPeriod>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the persisted scheduler state.
    #[arg(long, default_value = ".sweeper")]
    state_dir: PathBuf,

    /// Number of simulated events.
    #[arg(long, default_value_t = 48)]
    ticks: u32,

    /// Simulated minutes between two events.
    #[arg(long, default_value_t = 15)]
    step_minutes: i64,

    /// Simulated start time (RFC 3339). Defaults to the current time.
    #[arg(long)]
    start: Option<DateTime<Utc>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RetentionConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RetentionConfig::default(),
    };
    if let Some(period) = args.period {
        config.period = period;
    }

    let clock = FixedClock::new(args.start.unwrap_or_else(Utc::now));
    let records = InMemoryRecordStore::new();
    let settings = JsonFileSettingsStore::new(&args.state_dir, &config.preferences_name);
    tracing::info!(
        period = %config.period,
        state_file = %settings.path().display(),
        "Starting retention replay"
    );

    let scheduler = SchedulerBuilder::new(config)
        .clock(Arc::new(clock.clone()))
        .settings(Arc::new(settings))
        .records(Arc::new(records.clone()))
        .build()?;

    let step = Duration::try_minutes(args.step_minutes)
        .with_context(|| format!("--step-minutes {} is out of range", args.step_minutes))?;
    for i in 0..args.ticks {
        records.insert(clock.now(), format!("GET /api/items/{i}")).await;

        match scheduler.tick_now().await {
            Ok(TickOutcome::Cleaned(report)) => {
                println!(
                    "[{}] cleaned: deleted={} threshold={} remaining={}",
                    report.ran_at,
                    report.deleted,
                    report.threshold,
                    records.len().await
                );
            }
            Ok(TickOutcome::NotDue { next_due_after }) => {
                tracing::debug!(now = %clock.now(), next_due_after = %next_due_after, "not due");
            }
            Err(e) => {
                // The scheduler stays usable; the next due tick retries.
                tracing::error!(error = %e, kind = ?e.kind(), "retention tick failed");
            }
        }

        clock.advance(step);
    }

    let status = scheduler.status().await;
    println!("{}", serde_json::to_string_pretty(&status)?);
    println!("records left: {}", records.len().await);
    Ok(())
}
