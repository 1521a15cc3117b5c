//! Reflow lifecycle: triggers, debouncing, and the pass controller.
//!
//! Event sources publish [`ReflowTrigger`]s through cloned
//! [`ReflowHandle`]s. The [`ReflowController`] coalesces them and re-runs
//! pagination against a [`Surface`], then chases late layout changes with
//! per-frame refits for a bounded time.

mod controller;
mod options;
mod trigger;

pub use controller::{ReflowController, ReflowState, Surface};
pub use options::ReflowOptions;
pub use trigger::{reflow_channel, Debouncer, PassKind, ReflowHandle, ReflowRequest, ReflowTrigger};
