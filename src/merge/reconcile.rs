//! Reconcile overlapping predictions from the concatenated networks.
//!
//! Rows are grouped by (regulator, target). A pair predicted once passes
//! through unchanged. A pair predicted by both priors is merged into one
//! row: the sign comes from the TRRUST prediction, the magnitude is the
//! largest absolute score in the group, and the prior label becomes BOTH.
//!
//! ```text
//! Concatenated input                 Reconciled output
//! ┌─────────────────────────────┐    ┌──────────────────────────────┐
//! │ JUN → FOS   -2.0   CHROM    │    │ JUN → FOS    5.0   BOTH      │
//! │ JUN → FOS    5.0   TRRUST   │ →  ├──────────────────────────────┤
//! │ ATF1 → MYC  12.0   CHROM    │    │ ATF1 → MYC  12.0   CHROM     │
//! └─────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! A duplicated pair with no TRRUST row carries no sign to reconcile with
//! and is dropped from the output.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Interaction, PairKey, Prior};

/// A duplicated pair that had no row from the sign-giving prior.
#[derive(Debug, Clone, Serialize)]
pub struct DroppedPair {
    pub key: PairKey,
    /// How many rows the group contained.
    pub rows: usize,
}

/// Result of reconciling the concatenated networks.
#[derive(Debug)]
pub struct ReconcileResult {
    /// Reconciled rows, sorted by (regulator, target).
    pub interactions: Vec<Interaction>,
    /// Number of pairs merged from multiple rows.
    pub both_pairs: usize,
    /// Duplicated pairs dropped for lack of a sign-giving row.
    pub dropped: Vec<DroppedPair>,
}

/// Sign of a score; zero stays zero, unlike `f64::signum`.
fn sign(score: f64) -> f64 {
    if score > 0.0 {
        1.0
    } else if score < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Group interactions by pair and merge duplicates.
///
/// `sign_from` names the prior whose prediction decides the sign of a
/// merged score (TRRUST in the published pipeline). Output is sorted by
/// pair key, so repeated combines of the same inputs produce identical
/// tables.
pub fn reconcile(interactions: Vec<Interaction>, sign_from: Prior) -> ReconcileResult {
    let mut pairs: BTreeMap<PairKey, Vec<Interaction>> = BTreeMap::new();
    for interaction in interactions {
        pairs.entry(interaction.key()).or_default().push(interaction);
    }

    let mut out = Vec::with_capacity(pairs.len());
    let mut both_pairs = 0;
    let mut dropped = Vec::new();

    for (key, group) in pairs {
        if group.len() == 1 {
            out.extend(group);
            continue;
        }

        let signer = group.iter().find(|i| i.prior == sign_from);
        match signer {
            Some(signer) => {
                let magnitude = group
                    .iter()
                    .map(|i| i.score.abs())
                    .fold(0.0_f64, f64::max);
                both_pairs += 1;
                out.push(Interaction::new(
                    key.regulator,
                    key.target,
                    sign(signer.score) * magnitude,
                    Prior::Both,
                ));
            }
            None => {
                dropped.push(DroppedPair { key, rows: group.len() });
            }
        }
    }

    ReconcileResult {
        interactions: out,
        both_pairs,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_pair_merges_to_both() {
        let rows = vec![
            Interaction::new("JUN", "FOS", -12.0, Prior::Chrom),
            Interaction::new("JUN", "FOS", 5.0, Prior::Trrust),
        ];

        let result = reconcile(rows, Prior::Trrust);

        assert_eq!(result.interactions.len(), 1);
        assert_eq!(result.both_pairs, 1);
        let merged = &result.interactions[0];
        // Sign from TRRUST (+), magnitude from CHROM (12.0)
        assert_eq!(merged.score, 12.0);
        assert_eq!(merged.prior, Prior::Both);
    }

    #[test]
    fn test_negative_sign_wins_over_larger_positive() {
        let rows = vec![
            Interaction::new("JUN", "FOS", 50.0, Prior::Chrom),
            Interaction::new("JUN", "FOS", -3.0, Prior::Trrust),
        ];

        let result = reconcile(rows, Prior::Trrust);
        assert_eq!(result.interactions[0].score, -50.0);
    }

    #[test]
    fn test_zero_trrust_score_reconciles_to_zero() {
        let rows = vec![
            Interaction::new("JUN", "FOS", 50.0, Prior::Chrom),
            Interaction::new("JUN", "FOS", 0.0, Prior::Trrust),
        ];

        let result = reconcile(rows, Prior::Trrust);
        assert_eq!(result.interactions[0].score, 0.0);
        assert_eq!(result.interactions[0].prior, Prior::Both);
    }

    #[test]
    fn test_singletons_keep_their_prior() {
        let rows = vec![
            Interaction::new("ATF1", "MYC", 12.0, Prior::Chrom),
            Interaction::new("E2F1", "CCNE1", 4.0, Prior::Trrust),
        ];

        let result = reconcile(rows, Prior::Trrust);

        assert_eq!(result.interactions.len(), 2);
        assert_eq!(result.both_pairs, 0);
        assert_eq!(result.interactions[0].prior, Prior::Chrom);
        assert_eq!(result.interactions[1].prior, Prior::Trrust);
    }

    #[test]
    fn test_duplicate_without_sign_source_is_dropped() {
        let rows = vec![
            Interaction::new("JUN", "FOS", 2.0, Prior::Chrom),
            Interaction::new("JUN", "FOS", 3.0, Prior::Chrom),
            Interaction::new("ATF1", "MYC", 1.0, Prior::Trrust),
        ];

        let result = reconcile(rows, Prior::Trrust);

        assert_eq!(result.interactions.len(), 1);
        assert_eq!(result.interactions[0].regulator, "ATF1");
        assert_eq!(result.dropped.len(), 1);
        assert_eq!(result.dropped[0].key.regulator, "JUN");
        assert_eq!(result.dropped[0].rows, 2);
    }

    #[test]
    fn test_duplicate_pair_within_sign_source_emits_one_row() {
        // Expansion can duplicate a pair inside the TRRUST table itself
        let rows = vec![
            Interaction::new("RFXANK", "CD74", -4.0, Prior::Trrust),
            Interaction::new("RFXANK", "CD74", 9.0, Prior::Trrust),
        ];

        let result = reconcile(rows, Prior::Trrust);

        assert_eq!(result.interactions.len(), 1);
        // Sign from the first TRRUST row in input order
        assert_eq!(result.interactions[0].score, -9.0);
        assert_eq!(result.interactions[0].prior, Prior::Both);
    }

    #[test]
    fn test_output_sorted_by_pair() {
        let rows = vec![
            Interaction::new("JUN", "FOS", 1.0, Prior::Chrom),
            Interaction::new("ATF1", "TP53", 1.0, Prior::Chrom),
            Interaction::new("ATF1", "MYC", 1.0, Prior::Chrom),
        ];

        let result = reconcile(rows, Prior::Trrust);
        let keys: Vec<_> = result
            .interactions
            .iter()
            .map(|i| (i.regulator.as_str(), i.target.as_str()))
            .collect();
        assert_eq!(keys, vec![("ATF1", "MYC"), ("ATF1", "TP53"), ("JUN", "FOS")]);
    }
}
