// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::encoder::IncidenceMatrix;
use crate::item::Item;
use crate::item_counter::ItemCounter;
use crate::itemset::{min_count, FrequentItemsets, Itemset};
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

/// A prefix path and the number of transactions that share it.
pub type WeightedPath = (Vec<Item>, u32);

const ROOT: usize = 0;

#[derive(Debug)]
struct FPNode {
    // None only for the root.
    item: Option<Item>,
    count: u32,
    children: Vec<usize>,
    parent: Option<usize>,
}

impl FPNode {
    fn new(item: Option<Item>, parent: Option<usize>) -> FPNode {
        FPNode {
            item,
            count: 0,
            children: Vec::with_capacity(1),
            parent,
        }
    }

    fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Prefix tree over frequency-ordered transactions. Nodes live in an arena
/// owned by the tree; children and parent links are arena indices. The header
/// table (`item_lists`) holds, per item, the indices of every node carrying
/// that item.
pub struct FPTree {
    nodes: Vec<FPNode>,
    item_count: ItemCounter,
    item_lists: Vec<Vec<usize>>,
    num_transactions: u32,
}

impl FPTree {
    pub fn new() -> FPTree {
        FPTree {
            nodes: vec![FPNode::new(None, None)],
            item_count: ItemCounter::new(),
            item_lists: Vec::new(),
            num_transactions: 0,
        }
    }

    /// Builds a tree from weighted paths in two passes: count each item,
    /// then insert every path restricted to items with at least `min_count`
    /// occurrences, most frequent item first.
    pub fn from_weighted_paths(paths: &[WeightedPath], min_count: u32) -> FPTree {
        let mut item_count = ItemCounter::new();
        for (path, count) in paths {
            for item in path {
                item_count.add(item, *count);
            }
        }

        let mut tree = FPTree::new();
        for (path, count) in paths {
            let mut transaction: Vec<Item> = path
                .iter()
                .cloned()
                .filter(|item| item_count.get(item) >= min_count)
                .collect();
            item_count.sort_descending(&mut transaction);
            tree.insert(&transaction, *count);
        }
        tree
    }

    pub fn from_matrix(matrix: &IncidenceMatrix, min_count: u32) -> FPTree {
        let paths: Vec<WeightedPath> = matrix.rows().map(|row| (row, 1)).collect();
        FPTree::from_weighted_paths(&paths, min_count)
    }

    fn add_node(&mut self, parent: usize, item: Item) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FPNode::new(Some(item), Some(parent)));
        self.nodes[parent].children.push(id);
        self.add_to_item_list(item, id);
        id
    }

    fn add_to_item_list(&mut self, item: Item, id: usize) {
        let index = item.as_index();
        if index >= self.item_lists.len() {
            self.item_lists.resize(index + 1, vec![]);
        }
        self.item_lists[index].push(id);
    }

    fn child_of(&self, id: usize, item: Item) -> Option<usize> {
        self.nodes[id]
            .children
            .iter()
            .cloned()
            .find(|&child| self.nodes[child].item == Some(item))
    }

    fn insert_child(&mut self, id: usize, item: Item, count: u32) -> usize {
        let child_id = match self.child_of(id, item) {
            Some(child_id) => child_id,
            None => self.add_node(id, item),
        };
        self.nodes[child_id].count += count;
        child_id
    }

    /// Inserts an already ordered transaction `count` times.
    pub fn insert(&mut self, transaction: &[Item], count: u32) {
        self.num_transactions += count;
        let mut id = ROOT;
        for &item in transaction {
            self.item_count.add(&item, count);
            id = self.insert_child(id, item, count);
        }
    }

    pub fn item_count(&self) -> &ItemCounter {
        &self.item_count
    }

    pub fn num_transactions(&self) -> u32 {
        self.num_transactions
    }

    /// Number of nodes, excluding the root.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes() == 0
    }

    fn path_from_root_to_excluding(&self, node_id: usize) -> Vec<Item> {
        let mut path = vec![];
        let mut id = self.nodes[node_id].parent;
        while let Some(parent) = id {
            let node = &self.nodes[parent];
            if node.is_root() {
                break;
            }
            if let Some(item) = node.item {
                path.push(item);
            }
            id = node.parent;
        }
        path.reverse();
        path
    }

    /// The prefix paths leading to every node carrying `item`, each weighted
    /// by that node's count.
    pub fn conditional_pattern_base(&self, item: Item) -> Vec<WeightedPath> {
        match self.item_lists.get(item.as_index()) {
            Some(item_list) => item_list
                .iter()
                .map(|&node_id| {
                    (
                        self.path_from_root_to_excluding(node_id),
                        self.nodes[node_id].count,
                    )
                })
                .collect(),
            None => vec![],
        }
    }

    pub fn construct_conditional_tree(&self, item: Item, min_count: u32) -> FPTree {
        FPTree::from_weighted_paths(&self.conditional_pattern_base(item), min_count)
    }

    /// If the tree does not branch, its nodes from the root down with their
    /// counts.
    pub fn single_path(&self) -> Option<Vec<(Item, u32)>> {
        let mut path = vec![];
        let mut id = ROOT;
        loop {
            let node = &self.nodes[id];
            match node.children.len() {
                0 => return Some(path),
                1 => {
                    id = node.children[0];
                    let child = &self.nodes[id];
                    path.push((child.item?, child.count));
                }
                _ => return None,
            }
        }
    }

    #[cfg(test)]
    fn check_invariants(&self) -> bool {
        let children_fit = self.nodes.iter().all(|node| {
            node.is_root()
                || node.count >= node.children.iter().map(|&c| self.nodes[c].count).sum::<u32>()
        });
        let header_sums_match = self.item_lists.iter().enumerate().all(|(index, ids)| {
            let total: u32 = ids.iter().map(|&id| self.nodes[id].count).sum();
            total == self.item_count.get(&Item::from_index(index))
        });
        children_fit && header_sums_match
    }
}

impl Default for FPTree {
    fn default() -> Self {
        FPTree::new()
    }
}

fn within_len(len: usize, max_len: Option<usize>) -> bool {
    max_len.map_or(true, |max| len <= max)
}

// Every combination of the path's nodes, joined with the suffix. A
// combination's count is that of its deepest node.
fn enumerate_single_path(
    path: &[(Item, u32)],
    min_count: u32,
    suffix: &[Item],
    max_len: Option<usize>,
) -> Vec<(Itemset, u32)> {
    let mut itemsets = vec![];
    for k in 1..=path.len() {
        if !within_len(suffix.len() + k, max_len) {
            break;
        }
        for combination in path.iter().combinations(k) {
            let count = combination.iter().map(|&&(_, count)| count).min().unwrap_or(0);
            if count < min_count {
                continue;
            }
            let mut items: Vec<Item> = suffix.to_vec();
            items.extend(combination.iter().map(|&&(item, _)| item));
            itemsets.push((Itemset::new(items), count));
        }
    }
    itemsets
}

/// Recursively mines `fptree`, returning every frequent itemset that extends
/// `suffix`, with its count.
pub fn fp_growth(
    fptree: &FPTree,
    min_count: u32,
    suffix: &[Item],
    max_len: Option<usize>,
) -> Vec<(Itemset, u32)> {
    if !within_len(suffix.len() + 1, max_len) {
        return vec![];
    }

    if let Some(path) = fptree.single_path() {
        return enumerate_single_path(&path, min_count, suffix, max_len);
    }

    // Least frequent items first; their conditional trees are smallest.
    let mut items: Vec<Item> = fptree.item_count().items_with_count_at_least(min_count);
    items.sort_by(|a, b| fptree.item_count().cmp_descending(b, a));

    items
        .par_iter()
        .flat_map(|&item| -> Vec<(Itemset, u32)> {
            let mut itemset: Vec<Item> = suffix.to_vec();
            itemset.push(item);
            let count = fptree.item_count().get(&item);

            let mut result = vec![];
            if within_len(itemset.len() + 1, max_len) {
                let conditional_tree = fptree.construct_conditional_tree(item, min_count);
                if !conditional_tree.is_empty() {
                    result = fp_growth(&conditional_tree, min_count, &itemset, max_len);
                }
            }
            result.push((Itemset::new(itemset), count));
            result
        })
        .collect()
}

pub fn fpgrowth(matrix: &IncidenceMatrix, min_count: u32, max_len: Option<usize>) -> FrequentItemsets {
    let mut result = FrequentItemsets::new(matrix.num_rows());
    if matrix.is_empty() {
        return result;
    }
    let fptree = FPTree::from_matrix(matrix, min_count);
    debug!(
        "FPTree built from {} transactions with {} nodes",
        fptree.num_transactions(),
        fptree.num_nodes()
    );
    result.extend(fp_growth(&fptree, min_count, &[], max_len));
    result
}

/// FP-Growth with the threshold given as a fraction of transactions.
pub fn fpgrowth_with_support(
    matrix: &IncidenceMatrix,
    min_support: f64,
    max_len: Option<usize>,
) -> FrequentItemsets {
    fpgrowth(matrix, min_count(min_support, matrix.num_rows()), max_len)
}
