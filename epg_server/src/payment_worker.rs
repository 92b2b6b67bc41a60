//! The background task that drives the reconciliation loop.
use std::time::{Duration, Instant};

use epg_engine::{assets::AssetRegistry, events::EventProducers, Reconciler, SqliteDatabase};
use log::*;
use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::integrations::EthereumReader;

/// Spawns the reconciliation worker, which checks pending orders against the chain every `period`.
///
/// The first tick runs immediately. If a tick runs longer than the period, the missed firings are skipped rather
/// than queued, so ticks never overlap and never bunch up. Do not await the returned handle; it runs for the life
/// of the process.
pub fn start_reconciler_worker(
    db: SqliteDatabase,
    chain: EthereumReader,
    assets: AssetRegistry,
    producers: EventProducers,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let reconciler = Reconciler::new(db, chain, assets, producers);
        let mut timer = tokio::time::interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("🔄️ Reconciliation worker started. Pending orders are checked every {}s", period.as_secs());
        loop {
            timer.tick().await;
            let started = Instant::now();
            match reconciler.run_once().await {
                Ok(summary) if summary.pending > 0 => {
                    info!(
                        "🔄️ Tick done in {}ms. {} pending, {} settled, {} failed",
                        started.elapsed().as_millis(),
                        summary.pending,
                        summary.settled,
                        summary.failed
                    );
                },
                Ok(_) => {},
                Err(e) => {
                    error!("🔄️ Could not list pending orders. Skipping this tick entirely. {e}");
                },
            }
            if started.elapsed() > period {
                warn!(
                    "🔄️ The reconciliation tick took {}ms, which is longer than the {}ms interval. Intermediate \
                     ticks are being skipped",
                    started.elapsed().as_millis(),
                    period.as_millis()
                );
            }
        }
    })
}
