//! Pair-counting comparison of a clustering against ground-truth labels.
//!
//! Purely diagnostic: clustering correctness never depends on this module.

use crate::strategy::Cluster;
use serde::{Deserialize, Serialize};

/// Pair-confusion counts between a clustering result and ground truth.
///
/// Each unordered pair of clustered, labelled samples falls into exactly one
/// cell: `e11` grouped together in both the result and the truth, `e10`
/// together in the result only, `e01` together in the truth only, `e00`
/// split in both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConfusion {
    pub e00: u64,
    pub e01: u64,
    pub e10: u64,
    pub e11: u64,
}

impl PairConfusion {
    /// Fraction of pairs on which the result and the truth agree.
    pub fn rand_index(&self) -> f64 {
        let agree = self.e00 + self.e11;
        let total = agree + self.e01 + self.e10;
        if total == 0 {
            return 1.0;
        }
        agree as f64 / total as f64
    }
}

/// Count pair agreements between `clusters` and per-sample `truth` labels.
///
/// `truth[i]` is the ground-truth label of sample index `i`. Samples without
/// a truth label, or absent from every cluster (noise), are left out of the
/// tally.
pub fn pair_confusion<L: PartialEq>(clusters: &[Cluster], truth: &[Option<L>]) -> PairConfusion {
    let mut labelled: Vec<(usize, usize)> = Vec::new(); // (sample, cluster)
    for (c, members) in clusters.iter().enumerate() {
        for &s in members {
            if truth.get(s).is_some_and(Option::is_some) {
                labelled.push((s, c));
            }
        }
    }

    let mut counts = PairConfusion::default();
    for (k, &(i, ci)) in labelled.iter().enumerate() {
        for &(j, cj) in &labelled[k + 1..] {
            let same_result = ci == cj;
            let same_truth = truth[i] == truth[j];
            match (same_result, same_truth) {
                (true, true) => counts.e11 += 1,
                (true, false) => counts.e10 += 1,
                (false, true) => counts.e01 += 1,
                (false, false) => counts.e00 += 1,
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn truth_of(labels: &[&str]) -> Vec<Option<&'static str>> {
        labels
            .iter()
            .map(|&l| match l {
                "-" => None,
                "a" => Some("a"),
                "b" => Some("b"),
                _ => Some("c"),
            })
            .collect()
    }

    #[test]
    fn perfect_clustering_has_no_disagreements() {
        let clusters = vec![vec![0, 1, 2], vec![3, 4]];
        let truth = truth_of(&["a", "a", "a", "b", "b"]);
        let counts = pair_confusion(&clusters, &truth);

        assert_eq!(
            counts,
            PairConfusion {
                e00: 6,
                e01: 0,
                e10: 0,
                e11: 4,
            }
        );
        assert_relative_eq!(counts.rand_index(), 1.0);
    }

    #[test]
    fn split_truth_group_counts_against_e01() {
        // Truth says 0..=3 belong together; the result split them 2/2.
        let clusters = vec![vec![0, 1], vec![2, 3]];
        let truth = truth_of(&["a", "a", "a", "a"]);
        let counts = pair_confusion(&clusters, &truth);

        assert_eq!(counts.e11, 2);
        assert_eq!(counts.e01, 4);
        assert_eq!(counts.e10, 0);
        assert_eq!(counts.e00, 0);
        assert_relative_eq!(counts.rand_index(), 2.0 / 6.0);
    }

    #[test]
    fn merged_truth_groups_count_against_e10() {
        let clusters = vec![vec![0, 1, 2, 3]];
        let truth = truth_of(&["a", "a", "b", "b"]);
        let counts = pair_confusion(&clusters, &truth);

        assert_eq!(counts.e11, 2);
        assert_eq!(counts.e10, 4);
        assert_eq!(counts.e01, 0);
        assert_eq!(counts.e00, 0);
    }

    #[test]
    fn unlabelled_and_noise_samples_are_skipped() {
        // Sample 2 has no truth label; sample 4 was noise (in no cluster).
        let clusters = vec![vec![0, 1, 2], vec![3]];
        let truth = truth_of(&["a", "a", "-", "b", "b"]);
        let counts = pair_confusion(&clusters, &truth);

        assert_eq!(
            counts,
            PairConfusion {
                e00: 2,
                e01: 0,
                e10: 0,
                e11: 1,
            }
        );
    }

    #[test]
    fn empty_tally_is_vacuously_perfect() {
        let counts = pair_confusion::<&str>(&[], &[]);
        assert_relative_eq!(counts.rand_index(), 1.0);
    }
}
