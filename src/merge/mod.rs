//! Network merging module.
//!
//! This module turns two per-prior prediction tables into one network:
//! - Groups: grouped-predictor membership map
//! - Ungroup: expand `pred.group.N` rows into member rows
//! - Reconcile: merge overlapping (regulator, target) pairs
//! - Pipeline: the end-to-end combine

pub mod groups;
pub mod pipeline;
pub mod reconcile;
pub mod ungroup;

pub use groups::{example_group_map, is_group_id, GroupMap};
pub use pipeline::*;
pub use reconcile::{reconcile, DroppedPair, ReconcileResult};
pub use ungroup::{expand_grouped, UngroupResult};
