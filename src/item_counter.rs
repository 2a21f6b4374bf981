use crate::item::Item;
use std::cmp::Ordering;

/// Dense occurrence counter indexed by item id.
#[derive(Clone, Debug, Default)]
pub struct ItemCounter {
    counter: Vec<u32>,
}

impl ItemCounter {
    pub fn new() -> ItemCounter {
        ItemCounter { counter: vec![] }
    }

    pub fn add(&mut self, item: &Item, count: u32) {
        let index = item.as_index();
        if self.counter.len() <= index {
            self.counter.resize(index + 1, 0);
        }
        self.counter[index] += count;
    }

    pub fn get(&self, item: &Item) -> u32 {
        self.counter.get(item.as_index()).cloned().unwrap_or(0)
    }

    /// Items with at least `min_count` occurrences, in ascending item order.
    pub fn items_with_count_at_least(&self, min_count: u32) -> Vec<Item> {
        self.counter
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0 && count >= min_count)
            .map(|(index, _)| Item::from_index(index))
            .collect()
    }

    /// Most frequent first; equal counts keep item order.
    pub fn cmp_descending(&self, a: &Item, b: &Item) -> Ordering {
        self.get(b).cmp(&self.get(a)).then_with(|| a.cmp(b))
    }

    pub fn sort_descending(&self, v: &mut [Item]) {
        v.sort_by(|a, b| self.cmp_descending(a, b));
    }
}
