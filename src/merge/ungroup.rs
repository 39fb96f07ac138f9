//! Expand grouped-predictor rows into individual-regulator rows.
//!
//! A `pred.group.N` row stands for several regulators the inference run
//! could not tell apart. Before two networks can be merged edge-by-edge,
//! each grouped row is replaced by one copy per member regulator, all
//! sharing the original row's target, score and prior.
//!
//! ```text
//! Grouped input                     Expanded output
//! ┌──────────────────────────┐      ┌────────────────────────┐
//! │ pred.group.1 → HLA-DRA   │      │ RFXANK → HLA-DRA       │
//! └──────────────────────────┘  →   │ RFXAP  → HLA-DRA       │
//!                                   └────────────────────────┘
//! ```

use crate::models::Interaction;

use super::groups::{is_group_id, GroupMap};

/// Result of expanding grouped predictors.
#[derive(Debug)]
pub struct UngroupResult {
    /// Rows with grouped rows replaced by member rows.
    pub interactions: Vec<Interaction>,
    /// Number of grouped rows that were expanded.
    pub expanded_rows: usize,
    /// Number of member rows the expansion produced.
    pub emitted_rows: usize,
    /// Group ids seen in the table but absent from the map; their rows are
    /// dropped because there is no regulator to attribute them to.
    pub unknown_groups: Vec<String>,
}

/// Replace every grouped-predictor row with one row per member regulator.
pub fn expand_grouped(interactions: Vec<Interaction>, map: &GroupMap) -> UngroupResult {
    let mut out = Vec::with_capacity(interactions.len());
    let mut expanded_rows = 0;
    let mut emitted_rows = 0;
    let mut unknown_groups: Vec<String> = Vec::new();

    for interaction in interactions {
        if !is_group_id(&interaction.regulator) {
            out.push(interaction);
            continue;
        }

        match map.members(&interaction.regulator) {
            Some(members) => {
                expanded_rows += 1;
                emitted_rows += members.len();
                for member in members {
                    out.push(Interaction::new(
                        member.clone(),
                        interaction.target.clone(),
                        interaction.score,
                        interaction.prior,
                    ));
                }
            }
            None => {
                if !unknown_groups.contains(&interaction.regulator) {
                    unknown_groups.push(interaction.regulator.clone());
                }
            }
        }
    }

    UngroupResult {
        interactions: out,
        expanded_rows,
        emitted_rows,
        unknown_groups,
    }
}
