use crate::error::{Error, Result};
use crate::item::Item;
use fnv::FnvHashMap;
use itertools::Itertools;
use std::cmp;

/// A non-empty set of items in canonical (ascending) order, so equal sets
/// compare and hash the same.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct Itemset {
    items: Vec<Item>,
}

impl Itemset {
    pub fn new(items: Vec<Item>) -> Itemset {
        Itemset {
            items: items.into_iter().sorted().dedup().collect(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: Item) -> bool {
        self.items.binary_search(&item).is_ok()
    }
}

// Shorter itemsets first, then lexicographic.
impl Ord for Itemset {
    fn cmp(&self, other: &Itemset) -> cmp::Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.items.cmp(&other.items))
    }
}

impl PartialOrd for Itemset {
    fn partial_cmp(&self, other: &Itemset) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Vec<Item>> for Itemset {
    fn from(items: Vec<Item>) -> Itemset {
        Itemset::new(items)
    }
}

/// Frequent itemsets with their absolute occurrence counts. Support is
/// derived as count over the number of transactions mined.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrequentItemsets {
    counts: FnvHashMap<Itemset, u32>,
    num_transactions: usize,
}

impl FrequentItemsets {
    pub fn new(num_transactions: usize) -> FrequentItemsets {
        FrequentItemsets {
            counts: FnvHashMap::default(),
            num_transactions,
        }
    }

    pub fn insert(&mut self, itemset: Itemset, count: u32) {
        self.counts.insert(itemset, count);
    }

    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, itemset: &Itemset) -> Option<u32> {
        self.counts.get(itemset).cloned()
    }

    pub fn support(&self, itemset: &Itemset) -> Option<f64> {
        self.count(itemset).map(|count| self.to_support(count))
    }

    /// Support of an itemset given as a sorted item slice.
    pub fn support_of(&self, items: &[Item]) -> Option<f64> {
        self.support(&Itemset {
            items: items.to_vec(),
        })
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.counts.contains_key(itemset)
    }

    fn to_support(&self, count: u32) -> f64 {
        count as f64 / self.num_transactions as f64
    }

    /// Itemsets and their supports in canonical order.
    pub fn sorted(&self) -> Vec<(&Itemset, f64)> {
        self.counts
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(itemset, &count)| (itemset, self.to_support(count)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, f64)> + '_ {
        self.counts
            .iter()
            .map(move |(itemset, &count)| (itemset, self.to_support(count)))
    }

    pub fn max_len(&self) -> usize {
        self.counts.keys().map(Itemset::len).max().unwrap_or(0)
    }
}

impl Extend<(Itemset, u32)> for FrequentItemsets {
    fn extend<I: IntoIterator<Item = (Itemset, u32)>>(&mut self, iter: I) {
        self.counts.extend(iter);
    }
}

pub fn validate_min_support(min_support: f64) -> Result<()> {
    if min_support.is_nan() || min_support <= 0.0 || min_support > 1.0 {
        return Err(Error::InvalidThreshold {
            name: "min_support",
            value: min_support,
        });
    }
    Ok(())
}

/// Smallest count c such that c / num_transactions >= min_support, computed
/// with the same floating point division used to report support.
pub fn min_count(min_support: f64, num_transactions: usize) -> u32 {
    let n = num_transactions as f64;
    let qualifies = |count: u32| count as f64 / n >= min_support;
    let mut count = (min_support * n).ceil().max(1.0) as u32;
    while count > 1 && qualifies(count - 1) {
        count -= 1;
    }
    while (count as usize) <= num_transactions && !qualifies(count) {
        count += 1;
    }
    count
}
