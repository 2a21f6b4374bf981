use crate::encoder::IncidenceMatrix;
use crate::index::Index;
use crate::item::Item;
use crate::itemset::{min_count, FrequentItemsets, Itemset};
use crate::vec_sets::{join_on_prefix, subsets_missing_one};
use fnv::FnvHashSet;
use log::debug;
use rayon::prelude::*;

/// Generates the candidate (k+1)-itemsets from the sorted frequent
/// k-itemsets: pairs sharing their first k-1 items are joined, then any
/// candidate with an infrequent k-subset is pruned.
pub fn generate_candidates(frequent: &[Vec<Item>]) -> Vec<Vec<Item>> {
    let lookup: FnvHashSet<&[Item]> = frequent.iter().map(|itemset| itemset.as_slice()).collect();
    let mut candidates: Vec<Vec<Item>> = vec![];
    for (i, a) in frequent.iter().enumerate() {
        // Itemsets sharing a's prefix are contiguous and follow it.
        for b in &frequent[i + 1..] {
            let candidate = match join_on_prefix(a, b) {
                Some(candidate) => candidate,
                None => break,
            };
            if subsets_missing_one(&candidate).all(|subset| lookup.contains(subset.as_slice())) {
                candidates.push(candidate);
            }
        }
    }
    candidates
}

/// Level-wise frequent itemset search. `min_count` is the absolute count an
/// itemset needs to be frequent.
pub fn apriori(matrix: &IncidenceMatrix, min_count: u32, max_len: Option<usize>) -> FrequentItemsets {
    let mut result = FrequentItemsets::new(matrix.num_rows());
    if matrix.is_empty() || max_len == Some(0) {
        return result;
    }
    let index = Index::from_matrix(matrix);

    // Level 1: every column is a candidate.
    let mut level: Vec<Vec<Item>> = vec![];
    for column in 0..matrix.num_columns() {
        let item = Item::from_index(column);
        let count = index.count(&[item]);
        if count >= min_count {
            result.insert(Itemset::new(vec![item]), count);
            level.push(vec![item]);
        }
    }
    debug!("Apriori level 1: {} frequent items", level.len());

    let mut k = 1;
    while !level.is_empty() && max_len.map_or(true, |max| k < max) {
        k += 1;
        let candidates = generate_candidates(&level);
        let num_candidates = candidates.len();

        let mut survivors: Vec<(Vec<Item>, u32)> = candidates
            .into_par_iter()
            .map(|candidate| {
                let count = index.count(&candidate);
                (candidate, count)
            })
            .filter(|&(_, count)| count >= min_count)
            .collect();
        survivors.sort();

        debug!(
            "Apriori level {}: {} candidates, {} frequent",
            k,
            num_candidates,
            survivors.len()
        );

        level = Vec::with_capacity(survivors.len());
        for (itemset, count) in survivors {
            result.insert(Itemset::new(itemset.clone()), count);
            level.push(itemset);
        }
    }

    result
}

/// Apriori with the threshold given as a fraction of transactions.
pub fn apriori_with_support(
    matrix: &IncidenceMatrix,
    min_support: f64,
    max_len: Option<usize>,
) -> FrequentItemsets {
    apriori(matrix, min_count(min_support, matrix.num_rows()), max_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::item::to_item_vec;

    fn support(frequent: &FrequentItemsets, items: &[u32]) -> Option<f64> {
        frequent.support_of(&to_item_vec(items))
    }

    #[test]
    fn test_generate_candidates() {
        let level = vec![
            to_item_vec(&[1, 2]),
            to_item_vec(&[1, 3]),
            to_item_vec(&[1, 4]),
            to_item_vec(&[2, 3]),
        ];
        // {1,2,4} and {1,3,4} are pruned: {2,4} and {3,4} are not frequent.
        assert_eq!(generate_candidates(&level), vec![to_item_vec(&[1, 2, 3])]);
        assert!(generate_candidates(&[]).is_empty());
        assert_eq!(
            generate_candidates(&[to_item_vec(&[0]), to_item_vec(&[1]), to_item_vec(&[2])]),
            vec![to_item_vec(&[0, 1]), to_item_vec(&[0, 2]), to_item_vec(&[1, 2])]
        );
    }

    #[test]
    fn test_apriori_basket() {
        // Columns: A=0, B=1, C=2.
        let (matrix, _) = encode(vec![
            vec!["A", "B"],
            vec!["A", "B", "C"],
            vec!["A"],
            vec!["B", "C"],
        ]);
        let frequent = apriori_with_support(&matrix, 0.5, None);
        assert_eq!(frequent.len(), 5);
        assert_eq!(support(&frequent, &[0]), Some(0.75));
        assert_eq!(support(&frequent, &[1]), Some(0.75));
        assert_eq!(support(&frequent, &[2]), Some(0.5));
        assert_eq!(support(&frequent, &[0, 1]), Some(0.5));
        assert_eq!(support(&frequent, &[1, 2]), Some(0.5));
        assert_eq!(support(&frequent, &[0, 2]), None);
        assert_eq!(support(&frequent, &[0, 1, 2]), None);
    }

    #[test]
    fn test_apriori_max_len() {
        let (matrix, _) = encode(vec![vec![1, 2, 3], vec![1, 2, 3], vec![1, 2]]);
        let frequent = apriori_with_support(&matrix, 0.5, Some(2));
        assert_eq!(frequent.max_len(), 2);
        assert_eq!(frequent.len(), 6);
        let unbounded = apriori_with_support(&matrix, 0.5, None);
        assert_eq!(unbounded.len(), 7);
        assert!(apriori_with_support(&matrix, 0.5, Some(0)).is_empty());
    }

    #[test]
    fn test_apriori_full_support() {
        let (matrix, _) = encode(vec![vec!["x", "y"], vec!["x", "z"], vec!["x"]]);
        let frequent = apriori_with_support(&matrix, 1.0, None);
        assert_eq!(frequent.len(), 1);
        assert_eq!(support(&frequent, &[0]), Some(1.0));

        let (matrix, _) = encode(vec![vec!["x"], vec!["y"]]);
        assert!(apriori_with_support(&matrix, 1.0, None).is_empty());
    }

    #[test]
    fn test_apriori_empty() {
        let (matrix, _) = encode(Vec::<Vec<u32>>::new());
        let frequent = apriori_with_support(&matrix, 0.1, None);
        assert!(frequent.is_empty());
        assert_eq!(frequent.num_transactions(), 0);
    }
}
