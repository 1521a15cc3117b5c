//! Reflow triggers, the request channel, and per-trigger debouncing.

use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// External signal that the current pages may be stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflowTrigger {
    /// Window or visual viewport resized
    Resize,
    /// Device rotated
    OrientationChange,
    /// Web fonts finished loading
    FontsReady,
    /// An image or media element finished loading
    ImageLoaded,
    /// Math typesetting finished
    TypesetReady,
    /// Page `load` fired
    PageLoad,
    /// Page restored from the back/forward cache
    PageShow,
    /// Visual viewport scrolled (URL bar or keyboard settling)
    ViewportScroll,
    /// Page content mutated in place
    ContentMutated,
}

/// How much work a trigger needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    /// Re-fit scales of the existing pages only
    FitOnly,
    /// Normalize, split, group, pack and fit from scratch
    Full,
}

impl ReflowTrigger {
    /// Every trigger, in declaration order.
    pub const ALL: [ReflowTrigger; 9] = [
        ReflowTrigger::Resize,
        ReflowTrigger::OrientationChange,
        ReflowTrigger::FontsReady,
        ReflowTrigger::ImageLoaded,
        ReflowTrigger::TypesetReady,
        ReflowTrigger::PageLoad,
        ReflowTrigger::PageShow,
        ReflowTrigger::ViewportScroll,
        ReflowTrigger::ContentMutated,
    ];

    /// Work this trigger requires.
    pub fn pass_kind(self) -> PassKind {
        match self {
            ReflowTrigger::PageShow
            | ReflowTrigger::ViewportScroll
            | ReflowTrigger::ContentMutated => PassKind::FitOnly,
            _ => PassKind::Full,
        }
    }

    /// Short name for logs.
    pub fn label(self) -> &'static str {
        match self {
            ReflowTrigger::Resize => "resize",
            ReflowTrigger::OrientationChange => "orientation",
            ReflowTrigger::FontsReady => "fonts",
            ReflowTrigger::ImageLoaded => "image",
            ReflowTrigger::TypesetReady => "typeset",
            ReflowTrigger::PageLoad => "load",
            ReflowTrigger::PageShow => "pageshow",
            ReflowTrigger::ViewportScroll => "scroll",
            ReflowTrigger::ContentMutated => "mutation",
        }
    }
}

/// One message on the reflow channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflowRequest {
    pub trigger: ReflowTrigger,
    pub at: Instant,
}

/// Cloneable producer side of the reflow channel.
///
/// Event sources hold a handle each; the controller is the only consumer.
#[derive(Debug, Clone)]
pub struct ReflowHandle {
    sender: Sender<ReflowRequest>,
}

impl ReflowHandle {
    /// Publish a trigger observed at `at`.
    ///
    /// Returns `false` once the controller has been dropped.
    pub fn request(&self, trigger: ReflowTrigger, at: Instant) -> bool {
        self.sender.send(ReflowRequest { trigger, at }).is_ok()
    }

    /// Publish a trigger observed now.
    pub fn request_now(&self, trigger: ReflowTrigger) -> bool {
        self.request(trigger, Instant::now())
    }
}

/// Create the unbounded reflow channel.
pub fn reflow_channel() -> (ReflowHandle, Receiver<ReflowRequest>) {
    let (sender, receiver) = crossbeam_channel::unbounded();
    (ReflowHandle { sender }, receiver)
}

/// Trailing-edge debouncer keyed by trigger.
///
/// Every request for a trigger pushes its deadline out to `at + delay`, so a
/// burst fires once, `delay` after its last event.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    pending: BTreeMap<ReflowTrigger, Instant>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `trigger` to fire `delay` after `at`, replacing any earlier
    /// deadline.
    pub fn schedule(&mut self, trigger: ReflowTrigger, at: Instant, delay: Duration) {
        self.pending.insert(trigger, at + delay);
    }

    /// Remove and return every trigger whose deadline is at or before `now`.
    pub fn take_due(&mut self, now: Instant) -> Vec<ReflowTrigger> {
        let due: Vec<ReflowTrigger> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(trigger, _)| *trigger)
            .collect();
        for trigger in &due {
            self.pending.remove(trigger);
        }
        due
    }

    /// Earliest pending deadline.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Check if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of triggers waiting.
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
