use crate::item::Item;
use fnv::FnvHashMap;
use std::hash::Hash;

/// The ordered universe of item labels. Columns are assigned in ascending
/// label order, so `Item` order agrees with label order.
#[derive(Clone, Debug)]
pub struct Itemizer<T> {
    label_to_item: FnvHashMap<T, Item>,
    item_to_label: Vec<T>,
}

impl<T> Itemizer<T>
where
    T: Ord + Hash + Clone,
{
    pub fn new() -> Itemizer<T> {
        Itemizer {
            label_to_item: FnvHashMap::default(),
            item_to_label: vec![],
        }
    }

    /// Builds the universe from labels in any order, duplicates allowed.
    pub fn from_labels<I>(labels: I) -> Itemizer<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut item_to_label: Vec<T> = labels.into_iter().collect();
        item_to_label.sort();
        item_to_label.dedup();
        let label_to_item = item_to_label
            .iter()
            .enumerate()
            .map(|(index, label)| (label.clone(), Item::from_index(index)))
            .collect();
        Itemizer {
            label_to_item,
            item_to_label,
        }
    }

    pub fn id_of(&self, label: &T) -> Option<Item> {
        self.label_to_item.get(label).cloned()
    }

    pub fn label_of(&self, item: Item) -> &T {
        &self.item_to_label[item.as_index()]
    }

    pub fn decode(&self, items: &[Item]) -> Vec<T> {
        items.iter().map(|&item| self.label_of(item).clone()).collect()
    }

    /// Column labels, in column order.
    pub fn labels(&self) -> &[T] {
        &self.item_to_label
    }

    pub fn len(&self) -> usize {
        self.item_to_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_to_label.is_empty()
    }
}

impl<T> Default for Itemizer<T>
where
    T: Ord + Hash + Clone,
{
    fn default() -> Self {
        Itemizer::new()
    }
}
