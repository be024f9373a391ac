//! Timer-driven runner for the deployment simulation.
//!
//! `DeployDriver` owns everything the pure state machine must not know
//! about: the tick interval, the random progress ramp, and cancellation.
//! Consumers watch `DeployRun` snapshots over a `tokio::sync::watch`
//! channel and decide how to render them.

use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use vahla_types::agent::AgentDraft;
use vahla_types::error::DeployError;
use vahla_types::skill::Skill;

use super::simulator::DeployRun;

/// Default wall-clock interval between simulation ticks.
pub const DEFAULT_TICK: Duration = Duration::from_millis(500);

/// Inclusive bounds of the per-tick progress delta.
pub const DELTA_MIN: u8 = 10;
pub const DELTA_MAX: u8 = 24;

/// Draw one progress delta from the bounded uniform ramp.
fn random_delta() -> u8 {
    rand::thread_rng().gen_range(DELTA_MIN..=DELTA_MAX)
}

/// The cart contents frozen at the moment the run started.
///
/// Cart edits after this point are invisible to the run; the installer is
/// rendered from this snapshot, not from live cart state.
#[derive(Debug, Clone)]
pub struct DeploySnapshot {
    pub agent_name: String,
    pub skills: Vec<Skill>,
}

/// Configures and launches deployment runs.
pub struct DeployDriver {
    tick: Duration,
    delta_source: Box<dyn FnMut() -> u8 + Send>,
}

impl DeployDriver {
    /// Driver with the default tick interval and random ramp.
    pub fn new() -> Self {
        Self::with_tick(DEFAULT_TICK)
    }

    /// Driver with a custom tick interval and the random ramp.
    pub fn with_tick(tick: Duration) -> Self {
        Self {
            tick,
            delta_source: Box::new(random_delta),
        }
    }

    /// Replace the progress ramp with a deterministic delta source.
    ///
    /// The state machine is driven externally, so tests can feed fixed
    /// deltas instead of sampling the RNG.
    pub fn with_delta_source(mut self, source: impl FnMut() -> u8 + Send + 'static) -> Self {
        self.delta_source = Box::new(source);
        self
    }

    /// Start a run over a frozen snapshot of the given draft.
    ///
    /// Refuses to start when the cart is empty -- there is nothing to
    /// deploy. Once started, the run completes or is abandoned via the
    /// handle; later cart mutations do not affect it.
    pub fn start(self, draft: &AgentDraft) -> Result<DeployHandle, DeployError> {
        if draft.is_empty() {
            return Err(DeployError::EmptyCart);
        }

        let snapshot = DeploySnapshot {
            agent_name: draft.agent_name.clone(),
            skills: draft.skills.clone(),
        };

        let (tx, updates) = watch::channel(DeployRun::new());
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_loop(
            self.tick,
            self.delta_source,
            tx,
            cancel.clone(),
        ));

        debug!(
            agent = %snapshot.agent_name,
            skills = snapshot.skills.len(),
            "deployment run started"
        );

        Ok(DeployHandle {
            snapshot,
            updates,
            cancel,
            task,
        })
    }
}

impl Default for DeployDriver {
    fn default() -> Self {
        Self::new()
    }
}

/// Tick loop: advance the run on each interval, publish a snapshot, stop
/// at the terminal state or on cancellation.
async fn run_loop(
    tick: Duration,
    mut delta_source: Box<dyn FnMut() -> u8 + Send>,
    tx: watch::Sender<DeployRun>,
    cancel: CancellationToken,
) -> DeployRun {
    let mut run = DeployRun::new();
    let mut interval = tokio::time::interval(tick);
    // The first interval tick completes immediately; consume it so the
    // run spends a full tick at progress 0.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!(progress = run.progress, "deployment run abandoned");
                break;
            }
            _ = interval.tick() => {
                run.tick(delta_source());
                let _ = tx.send(run.clone());
                if run.is_complete() {
                    break;
                }
            }
        }
    }

    run
}

/// A live deployment run.
///
/// Dropping the handle cancels the tick task: no orphaned timer callback
/// may mutate run state after the owning view is gone.
#[derive(Debug)]
pub struct DeployHandle {
    snapshot: DeploySnapshot,
    /// Latest run snapshot; receivers see every log line (logs are
    /// carried in full on each snapshot) even if intermediate snapshots
    /// are conflated.
    pub updates: watch::Receiver<DeployRun>,
    cancel: CancellationToken,
    task: JoinHandle<DeployRun>,
}

impl DeployHandle {
    /// The cart contents frozen when the run started.
    pub fn snapshot(&self) -> &DeploySnapshot {
        &self.snapshot
    }

    /// Abandon the run: stop the tick task without waiting for it.
    pub fn abandon(&self) {
        self.cancel.cancel();
    }

    /// Wait for the run to finish (terminal state or abandonment) and
    /// return its final state.
    pub async fn wait(mut self) -> DeployRun {
        let last = self.updates.borrow_and_update().clone();
        // A JoinError can only mean the task panicked or the runtime is
        // shutting down; fall back to the last observed snapshot.
        (&mut self.task).await.unwrap_or(last)
    }
}

impl Drop for DeployHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vahla_types::deploy::DeployStatus;

    fn draft() -> AgentDraft {
        let mut d = AgentDraft::new("Sentinel");
        d.add_skill(Skill::new("Alpha", "pip install alpha")).unwrap();
        d
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_completes() {
        let handle = DeployDriver::with_tick(Duration::from_millis(10))
            .start(&draft())
            .unwrap();

        let run = handle.wait().await;
        assert!(run.is_complete());
        assert_eq!(run.progress, 100);
        assert_eq!(run.phase, 4);
        assert_eq!(run.logs.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deterministic_ramp_tick_count() {
        // A fixed delta of 25 reaches 100 in exactly four ticks.
        let handle = DeployDriver::with_tick(Duration::from_millis(10))
            .with_delta_source(|| 25)
            .start(&draft())
            .unwrap();

        let run = handle.wait().await;
        assert_eq!(run.progress, 100);
        assert_eq!(run.status, DeployStatus::Complete);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cart_refused_before_any_tick() {
        let empty = AgentDraft::new("Sentinel");
        let err = DeployDriver::new().start(&empty).unwrap_err();
        assert!(matches!(err, DeployError::EmptyCart));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandon_stops_ticking() {
        let handle = DeployDriver::with_tick(Duration::from_millis(10))
            .with_delta_source(|| 1)
            .start(&draft())
            .unwrap();

        let updates = handle.updates.clone();

        // Let a few ticks land.
        tokio::time::sleep(Duration::from_millis(35)).await;
        handle.abandon();
        let run = handle.wait().await;
        assert!(!run.is_complete());

        let frozen_progress = updates.borrow().progress;
        // Time marches on; the abandoned run must not.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(updates.borrow().progress, frozen_progress);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_frozen_at_start() {
        let mut d = draft();
        let handle = DeployDriver::with_tick(Duration::from_millis(10))
            .start(&d)
            .unwrap();

        // Mutating the cart after start does not leak into the run.
        d.add_skill(Skill::new("Beta", "npm i beta")).unwrap();
        assert_eq!(handle.snapshot().skills.len(), 1);
        assert_eq!(handle.snapshot().skills[0].name, "Alpha");

        let _ = handle.wait().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let handle = DeployDriver::with_tick(Duration::from_millis(10))
            .with_delta_source(|| 1)
            .start(&draft())
            .unwrap();

        let mut updates = handle.updates.clone();
        drop(handle);

        // The sender side is dropped once the task exits; the watch
        // channel closing is the observable proof of teardown.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(updates.changed().await.is_err() || !updates.borrow().is_complete());
    }
}
