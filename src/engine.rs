//! Stage engine: the pure heart of the loan flow
//!
//! `plan_turn` decides everything a submission will do: field writes,
//! assistant lines, milestone toasts, stage advances, and the pacing
//! between them. It performs no I/O and never sleeps; the session runtime
//! executes the resulting plan step by step.

pub mod extract;
pub mod plan;
pub mod script;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use plan::{apply_advance, apply_mutation, Milestone, Mutation, TurnPlan, TurnStep};
pub use transition::plan_turn;
