//! Combination generation - every three-player grouping of a player set
//!
//! Level 4 - Utilities

use trio_core::{PlayerId, Triple};

/// Generate all C(n,3) canonical triples for a set of player ids.
///
/// Repeated ids are collapsed first. Output is in ascending canonical order
/// and empty for fewer than three distinct players.
pub fn generate_all_combinations(ids: &[PlayerId]) -> Vec<Triple> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    let n = ids.len();
    let mut triples = Vec::with_capacity(binomial3(n));
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                if let Some(triple) = Triple::new(ids[i], ids[j], ids[k]) {
                    triples.push(triple);
                }
            }
        }
    }
    triples
}

fn binomial3(n: usize) -> usize {
    if n < 3 {
        0
    } else {
        n * (n - 1) * (n - 2) / 6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(n: u32) -> Vec<PlayerId> {
        (1..=n).collect()
    }

    #[test]
    fn test_counts_match_binomial() {
        for n in 0..=12u32 {
            let triples = generate_all_combinations(&ids(n));
            assert_eq!(triples.len(), binomial3(n as usize), "n={}", n);
        }
    }

    #[test]
    fn test_no_duplicates() {
        let triples = generate_all_combinations(&ids(9));
        let unique: HashSet<_> = triples.iter().collect();
        assert_eq!(unique.len(), triples.len());
    }

    #[test]
    fn test_each_player_appears_c_n_minus_1_2_times() {
        let n = 8u32;
        let triples = generate_all_combinations(&ids(n));
        let expected = ((n - 1) * (n - 2) / 2) as usize;
        for id in 1..=n {
            let count = triples.iter().filter(|t| t.contains(id)).count();
            assert_eq!(count, expected, "player {}", id);
        }
    }

    #[test]
    fn test_fewer_than_three_is_empty() {
        assert!(generate_all_combinations(&[]).is_empty());
        assert!(generate_all_combinations(&[4, 9]).is_empty());
    }

    #[test]
    fn test_repeated_ids_collapsed() {
        let triples = generate_all_combinations(&[5, 3, 5, 1, 3]);
        assert_eq!(triples, vec![Triple::new(1, 3, 5).unwrap()]);
    }

    #[test]
    fn test_three_players_single_triple() {
        let triples = generate_all_combinations(&[30, 10, 20]);
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].ids(), [10, 20, 30]);
    }
}
