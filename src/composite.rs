//! # Composite Accumulation
//!
//! Groups consecutive continuation-marked regions into one composite. The
//! accumulator is a value: each step consumes it and hands back the next
//! state together with anything ready for output.

use tracing::debug;

use crate::region::{CompositeRegion, Entry, Region};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Accumulator {
    #[default]
    Idle,
    Accumulating(Vec<Region>),
}

impl Accumulator {
    /// Feeds one region. A continued region opens or extends the chain;
    /// an unmarked one is emitted alone, or closes and seals an open chain.
    pub fn push(self, region: Region, is_continuation: bool) -> (Accumulator, Option<Entry>) {
        match (self, is_continuation) {
            (Accumulator::Idle, true) => (Accumulator::Accumulating(vec![region]), None),
            (Accumulator::Idle, false) => (Accumulator::Idle, Some(Entry::Region(region))),
            (Accumulator::Accumulating(mut members), true) => {
                members.push(region);
                (Accumulator::Accumulating(members), None)
            }
            (Accumulator::Accumulating(mut members), false) => {
                members.push(region);
                debug!(members = members.len(), "sealed composite region");
                (Accumulator::Idle, Some(Entry::Composite(CompositeRegion { members })))
            }
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Accumulator::Accumulating(_))
    }

    /// Takes whatever chain is still open, leaving the accumulator idle.
    pub fn into_open_chain(self) -> Option<CompositeRegion> {
        match self {
            Accumulator::Idle => None,
            Accumulator::Accumulating(members) => Some(CompositeRegion { members }),
        }
    }
}
