use basket::{
    encode, generate_rules, mine_frequent_itemsets, Algorithm, FrequentItemsets, Itemset, Metric,
    MiningConfig,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn arb_transactions() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(0u8..8, 0..6), 0..25)
}

fn arb_min_support() -> impl Strategy<Value = f64> {
    prop_oneof![Just(1.0), Just(0.5), 0.05f64..1.0]
}

fn mine(transactions: &[Vec<u8>], min_support: f64, algorithm: Algorithm) -> FrequentItemsets {
    let (matrix, _) = encode(transactions.to_vec());
    mine_frequent_itemsets(&matrix, min_support, algorithm).unwrap()
}

fn brute_force_count(transactions: &[Vec<u8>], itemset: &[u8]) -> usize {
    transactions
        .iter()
        .filter(|t| itemset.iter().all(|item| t.contains(item)))
        .count()
}

proptest! {
    #[test]
    fn apriori_and_fpgrowth_agree(transactions in arb_transactions(), min_support in arb_min_support()) {
        let apriori = mine(&transactions, min_support, Algorithm::Apriori);
        let fpgrowth = mine(&transactions, min_support, Algorithm::FpGrowth);
        prop_assert_eq!(apriori, fpgrowth);
    }

    #[test]
    fn max_len_agrees_across_algorithms(
        transactions in arb_transactions(),
        min_support in arb_min_support(),
        max_len in 1usize..4,
    ) {
        let (matrix, _) = encode(transactions);
        let apriori = basket::mine_with_config(
            &matrix,
            &MiningConfig::new(min_support, Algorithm::Apriori).with_max_len(max_len),
        ).unwrap();
        let fpgrowth = basket::mine_with_config(
            &matrix,
            &MiningConfig::new(min_support, Algorithm::FpGrowth).with_max_len(max_len),
        ).unwrap();
        prop_assert!(apriori.max_len() <= max_len);
        prop_assert_eq!(apriori, fpgrowth);
    }

    #[test]
    fn supports_match_brute_force(transactions in arb_transactions(), min_support in arb_min_support()) {
        let (matrix, itemizer) = encode(transactions.clone());
        let frequent = mine_frequent_itemsets(&matrix, min_support, Algorithm::FpGrowth).unwrap();
        for (itemset, support) in frequent.iter() {
            let labels = itemizer.decode(itemset.items());
            let count = brute_force_count(&transactions, &labels);
            prop_assert_eq!(support, count as f64 / transactions.len() as f64);
            prop_assert!(support >= min_support);
        }
        // Nothing frequent is missed among single items.
        for label in itemizer.labels() {
            let support = brute_force_count(&transactions, &[*label]) as f64 / transactions.len() as f64;
            let item = itemizer.id_of(label).unwrap();
            prop_assert_eq!(
                frequent.contains(&Itemset::new(vec![item])),
                support >= min_support
            );
        }
    }

    #[test]
    fn frequent_itemsets_are_downward_closed(transactions in arb_transactions(), min_support in arb_min_support()) {
        let frequent = mine(&transactions, min_support, Algorithm::Apriori);
        for (itemset, support) in frequent.iter() {
            if itemset.len() < 2 {
                continue;
            }
            for skip in 0..itemset.len() {
                let mut subset = itemset.items().to_vec();
                subset.remove(skip);
                let subset_support = frequent.support(&Itemset::new(subset));
                prop_assert!(subset_support.is_some());
                prop_assert!(subset_support.unwrap() >= support);
            }
        }
    }

    #[test]
    fn rule_metrics_are_bounded(transactions in arb_transactions(), min_support in arb_min_support()) {
        let frequent = mine(&transactions, min_support, Algorithm::FpGrowth);
        let rules = generate_rules(&frequent, Metric::Confidence, 0.0).unwrap();
        for rule in &rules {
            prop_assert!(rule.confidence() > 0.0 && rule.confidence() <= 1.0 + 1e-12);
            prop_assert!(rule.lift() > 0.0);
            prop_assert!(rule.support() <= rule.antecedent_support);
            prop_assert!(rule.support() <= rule.consequent_support);
            let union: BTreeSet<_> = rule.antecedent.iter().chain(rule.consequent.iter()).collect();
            prop_assert_eq!(union.len(), rule.antecedent.len() + rule.consequent.len());
        }
    }

    #[test]
    fn encoding_round_trips(transactions in arb_transactions()) {
        let (matrix, itemizer) = encode(transactions.clone());
        prop_assert_eq!(matrix.num_rows(), transactions.len());
        for (row, transaction) in transactions.iter().enumerate() {
            let expected: Vec<u8> = transaction.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
            prop_assert_eq!(itemizer.decode(&matrix.row_items(row)), expected);
        }
    }

    #[test]
    fn mining_is_idempotent(transactions in arb_transactions(), min_support in arb_min_support()) {
        let (matrix, _) = encode(transactions);
        for &algorithm in &[Algorithm::Apriori, Algorithm::FpGrowth] {
            let first = mine_frequent_itemsets(&matrix, min_support, algorithm).unwrap();
            let second = mine_frequent_itemsets(&matrix, min_support, algorithm).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

#[test]
fn worked_example() {
    let (matrix, itemizer) = encode(vec![
        vec!["A", "B"],
        vec!["A", "B", "C"],
        vec!["A"],
        vec!["B", "C"],
    ]);
    let id = |label: &'static str| itemizer.id_of(&label).unwrap();
    for &algorithm in &[Algorithm::Apriori, Algorithm::FpGrowth] {
        let frequent = mine_frequent_itemsets(&matrix, 0.5, algorithm).unwrap();
        assert_eq!(frequent.support(&Itemset::new(vec![id("A")])), Some(0.75));
        assert_eq!(frequent.support(&Itemset::new(vec![id("B")])), Some(0.75));
        assert_eq!(frequent.support(&Itemset::new(vec![id("C")])), Some(0.5));
        assert_eq!(frequent.support(&Itemset::new(vec![id("A"), id("B")])), Some(0.5));
        assert_eq!(frequent.max_len(), 2);

        let rules = generate_rules(&frequent, Metric::Confidence, 0.0).unwrap();
        let a_to_b = rules
            .iter()
            .find(|r| r.to_string(&itemizer) == "A => B")
            .unwrap();
        assert!((a_to_b.confidence() - 0.6667).abs() < 1e-3);
        assert!((a_to_b.lift() - 0.8889).abs() < 1e-3);
    }
}

#[test]
fn full_support_keeps_only_universal_items() {
    let (matrix, itemizer) = encode(vec![vec!["x", "y"], vec!["x", "y", "z"], vec!["y", "x"]]);
    let frequent = mine_frequent_itemsets(&matrix, 1.0, Algorithm::FpGrowth).unwrap();
    let mut found: Vec<Vec<&str>> = frequent
        .sorted()
        .into_iter()
        .map(|(itemset, _)| itemizer.decode(itemset.items()))
        .collect();
    found.sort();
    assert_eq!(found, vec![vec!["x"], vec!["x", "y"], vec!["y"]]);
}

#[test]
fn empty_input_gives_empty_results() {
    let (matrix, itemizer) = encode(Vec::<Vec<String>>::new());
    assert!(itemizer.is_empty());
    for &algorithm in &[Algorithm::Apriori, Algorithm::FpGrowth] {
        let frequent = mine_frequent_itemsets(&matrix, 0.5, algorithm).unwrap();
        assert!(frequent.is_empty());
        assert!(generate_rules(&frequent, Metric::Lift, 1.0).unwrap().is_empty());
    }
}
