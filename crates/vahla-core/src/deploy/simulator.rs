//! Pure deployment state machine.
//!
//! `DeployRun` advances through four one-shot phases as its progress
//! counter crosses fixed thresholds. The coarse `status` drives UI
//! iconography while the fine-grained phase counter gates narrative log
//! lines; keeping them separate lets several log beats land within a
//! single visible status.

use serde::{Deserialize, Serialize};

use vahla_types::deploy::DeployStatus;

/// One narrative checkpoint in the simulation.
struct PhaseSpec {
    /// Progress value that must be reached for the phase to fire.
    threshold: u8,
    /// Status asserted when the phase fires. `None` keeps the current one.
    status: Option<DeployStatus>,
    /// Log lines appended when the phase fires, in declared order.
    lines: &'static [&'static str],
}

/// The phase table. Index N is the transition from phase N to phase N+1.
///
/// Phases 1 and 2 both run under `Compiling`: phase 1 fires while the
/// initial status is still in effect, phase 2 re-asserts it. Preserved
/// as observed in the deploy flow.
static PHASES: [PhaseSpec; 4] = [
    PhaseSpec {
        threshold: 20,
        status: None,
        lines: &["> Uplink established. Streaming skill matrix..."],
    },
    PhaseSpec {
        threshold: 50,
        status: Some(DeployStatus::Compiling),
        lines: &["> Compiling neural pathways..."],
    },
    PhaseSpec {
        threshold: 80,
        status: Some(DeployStatus::Securing),
        lines: &[
            "> Engaging ClawSec hardening protocol...",
            "> Sealing unit perimeter...",
        ],
    },
    PhaseSpec {
        threshold: 100,
        status: Some(DeployStatus::Complete),
        lines: &["> DEPLOYMENT COMPLETE. UNIT IS OPERATIONAL."],
    },
];

/// One client-local, ephemeral execution of the provisioning simulation.
///
/// Observable surface: `progress` (0-100, monotonically non-decreasing),
/// `status`, and `logs` (append-only). The run is created in-memory when a
/// deployment starts and abandoned when the view is torn down; nothing is
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployRun {
    /// Progress counter, 0-100.
    pub progress: u8,
    /// Strictly-increasing phase counter (0-4) gating one-shot log emission.
    pub phase: u8,
    /// Coarse UI-facing stage label.
    pub status: DeployStatus,
    /// Append-only narrative log.
    pub logs: Vec<String>,
}

impl DeployRun {
    /// A fresh run: progress 0, phase 0, status `Compiling`, no logs.
    pub fn new() -> Self {
        Self {
            progress: 0,
            phase: 0,
            status: DeployStatus::Compiling,
            logs: Vec::new(),
        }
    }

    /// Advance the run by a progress delta.
    ///
    /// Progress is clamped at 100. Every threshold crossed for the first
    /// time fires its phase in order: status updates and log lines are
    /// applied exactly once per phase. A single large delta may fire
    /// several phases in one call. Ticking a complete run is a no-op.
    pub fn tick(&mut self, delta: u8) {
        if self.is_complete() {
            return;
        }

        self.progress = self.progress.saturating_add(delta).min(100);

        while (self.phase as usize) < PHASES.len() {
            let next = &PHASES[self.phase as usize];
            if self.progress < next.threshold {
                break;
            }
            self.phase += 1;
            if let Some(status) = next.status {
                self.status = status;
            }
            self.logs.extend(next.lines.iter().map(|s| s.to_string()));
        }
    }

    /// Whether the run has reached its terminal state.
    pub fn is_complete(&self) -> bool {
        self.status == DeployStatus::Complete
    }
}

impl Default for DeployRun {
    fn default() -> Self {
        Self::new()
    }
}
