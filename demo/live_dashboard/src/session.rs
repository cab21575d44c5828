//! A timed run of the live feed that reports snapshots to a writer.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use lending_engine::{FeedStatistics, LiveFeed};
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::info;

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::render::render;

/// One dashboard run.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    config: DemoConfig,
}

impl DashboardSession {
    /// Creates a session for a validated configuration.
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }

    /// Session configuration.
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Runs the feed until `stop` resolves or the configured duration elapses.
    ///
    /// A report is written every `report_interval_secs`; the final line is the
    /// feed statistics as JSON.
    pub async fn run<W, S>(&self, out: &mut W, stop: S) -> Result<FeedStatistics, DemoError>
    where
        W: Write,
        S: Future<Output = ()>,
    {
        let config = &self.config;
        let mut tour = config.tour()?;
        let feed = LiveFeed::spawn(config.feed.clone())?;

        let report_period = Duration::from_secs(config.report_interval_secs.max(1));
        let mut report = interval_at(Instant::now() + report_period, report_period);
        report.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let tour_period = Duration::from_secs(config.tour_interval_secs.max(1));
        let mut tour_timer = interval_at(Instant::now() + tour_period, tour_period);

        let has_deadline = config.duration_secs > 0;
        let deadline = sleep(Duration::from_secs(config.duration_secs));
        tokio::pin!(deadline);
        tokio::pin!(stop);

        info!(
            duration_secs = config.duration_secs,
            tour_stops = tour.len(),
            "Dashboard session started"
        );

        loop {
            tokio::select! {
                _ = &mut stop => {
                    info!("Stop requested");
                    break;
                }
                _ = &mut deadline, if has_deadline => break,
                _ = report.tick() => {
                    writeln!(out, "{}", render(&feed.snapshot(), config.output)?)?;
                }
                _ = tour_timer.tick(), if !tour.is_empty() => {
                    if let (Some(filters), Some(source)) = (tour.next_stop(), feed.filter_source()) {
                        source.set(filters);
                    }
                }
            }
        }

        let stats = feed.shutdown().await?;
        writeln!(out, "{}", serde_json::to_string(&stats)?)?;
        info!(
            ticks = stats.ticks.total(),
            reinitializations = stats.reinitializations,
            "Dashboard session finished"
        );
        Ok(stats)
    }
}
