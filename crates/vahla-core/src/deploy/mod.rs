//! The simulated deployment pipeline.
//!
//! Split into a pure state machine ([`simulator`]) and a timer-driven
//! runner ([`driver`]). The state machine knows nothing about clocks or
//! randomness -- it consumes progress deltas and crosses phase thresholds.
//! The driver owns the tick interval, the random ramp, and cancellation.

pub mod driver;
pub mod simulator;

pub use driver::{DeployDriver, DeployHandle, DeploySnapshot};
pub use simulator::DeployRun;
