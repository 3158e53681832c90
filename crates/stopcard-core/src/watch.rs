//! Latest-plan handle shared between one writer and any number of readers.
//!
//! The engine returns plans by value. A caller that wants other components to
//! see the current plan creates a watch, keeps the publisher and hands out
//! readers. This is meant for callers embedding the engine in a long-running
//! process; the one-shot `stopcards` binary prints its plan directly.

use crate::models::StopCardPlan;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Default)]
struct Slot {
    revision: u64,
    plan: Option<Arc<StopCardPlan>>,
}

/// The only writer of a watch. Deliberately not `Clone`.
#[derive(Debug)]
pub struct PlanPublisher {
    slot: Arc<RwLock<Slot>>,
}

/// Read side of a watch.
#[derive(Debug, Clone)]
pub struct PlanReader {
    slot: Arc<RwLock<Slot>>,
}

/// Create a linked publisher/reader pair.
pub fn plan_watch() -> (PlanPublisher, PlanReader) {
    let slot = Arc::new(RwLock::new(Slot::default()));
    (
        PlanPublisher { slot: slot.clone() },
        PlanReader { slot },
    )
}

impl PlanPublisher {
    /// Replace the current plan, returning the new revision.
    pub fn publish(&mut self, plan: StopCardPlan) -> u64 {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.revision += 1;
        slot.plan = Some(Arc::new(plan));
        tracing::debug!(revision = slot.revision, "plan published");
        slot.revision
    }

    pub fn reader(&self) -> PlanReader {
        PlanReader {
            slot: self.slot.clone(),
        }
    }
}

impl PlanReader {
    pub fn latest(&self) -> Option<Arc<StopCardPlan>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .plan
            .clone()
    }

    /// Number of plans published so far.
    pub fn revision(&self) -> u64 {
        self.slot.read().unwrap_or_else(PoisonError::into_inner).revision
    }
}
