use std::future::pending;
use std::time::Duration;

use chrono::Utc;
use metrics::counter;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, sleep_until, Instant, Interval, MissedTickBehavior};

use crate::ingestion::{run_refresh_cycle, RefreshContext};
use crate::models::{ChangeNotification, ChangeOp};
use crate::ranking::PeriodWindows;

/// Trailing-edge debounce. Each trigger pushes the deadline out to
/// `now + window`; pending deadlines are replaced, never accumulated.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarm and return `true` if the deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Whether a change notification warrants a recompute: a fresh transition
/// into "won" with a completion time inside the current month.
pub fn should_refresh(notification: &ChangeNotification, windows: &PeriodWindows) -> bool {
    match notification.op {
        ChangeOp::Insert | ChangeOp::Update => {}
        ChangeOp::Delete => return false,
    }

    if !notification.status.is_won() {
        return false;
    }

    if notification.op == ChangeOp::Update {
        if let Some(old) = &notification.old_status {
            if old.is_won() {
                return false;
            }
        }
    }

    notification
        .completed_at
        .is_some_and(|ts| windows.in_current_month(ts))
}

/// Drive the refresh pipeline:
/// 1. One unconditional bootstrap cycle
/// 2. Filtered change notifications arm the debouncer
/// 3. When the debounce deadline passes, run one cycle
/// 4. Optionally, run a cycle every `interval`
///
/// Cycles run inline, so two never overlap. Notifications that queue up
/// during a slow fetch re-arm the debouncer once the cycle finishes.
pub async fn run_refresh_scheduler(
    ctx: RefreshContext,
    mut notifications: mpsc::Receiver<ChangeNotification>,
    debounce: Duration,
    interval: Option<Duration>,
    mut shutdown: watch::Receiver<bool>,
) {
    tracing::info!(
        debounce_ms = debounce.as_millis() as u64,
        interval_secs = interval.map(|i| i.as_secs()),
        "Refresh scheduler started"
    );

    if !run_cycle(&ctx, "bootstrap", &mut shutdown).await {
        return;
    }

    let mut debouncer = Debouncer::new(debounce);
    let mut ticker = interval.map(|period| {
        let mut t = interval_at(Instant::now() + period, period);
        t.set_missed_tick_behavior(MissedTickBehavior::Skip);
        t
    });
    let mut listening = true;

    loop {
        let deadline = debouncer.deadline();

        tokio::select! {
            received = notifications.recv(), if listening => {
                match received {
                    Some(notification) => {
                        let windows = PeriodWindows::at(Utc::now(), ctx.utc_offset);
                        if should_refresh(&notification, &windows) {
                            debouncer.trigger(Instant::now());
                        } else {
                            counter!("change_notifications_discarded_total").increment(1);
                            tracing::debug!(
                                op = ?notification.op,
                                status = %notification.status,
                                "Change notification ignored"
                            );
                        }
                    }
                    None => {
                        tracing::warn!("Change notification channel closed");
                        listening = false;
                    }
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if debouncer.take_due(Instant::now()) && !run_cycle(&ctx, "change", &mut shutdown).await {
                    break;
                }
            }
            _ = next_tick(&mut ticker) => {
                if !run_cycle(&ctx, "interval", &mut shutdown).await {
                    break;
                }
            }
            _ = shutdown.changed() => break,
        }
    }

    tracing::info!("Refresh scheduler stopped");
}

/// Run one cycle unless shutdown arrives first. Returns `false` on shutdown;
/// the in-flight fetch is dropped and its result never applied.
async fn run_cycle(ctx: &RefreshContext, trigger: &str, shutdown: &mut watch::Receiver<bool>) -> bool {
    tracing::debug!(trigger, "Refresh cycle starting");
    tokio::select! {
        _ = run_refresh_cycle(ctx) => true,
        _ = shutdown.changed() => false,
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(t) => {
            t.tick().await;
        }
        None => pending::<()>().await,
    }
}
