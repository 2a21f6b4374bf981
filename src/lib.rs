//! Market basket analysis: frequent itemset mining (Apriori or FP-Growth)
//! and association rule derivation over a one-hot transaction matrix.
//!
//! ```
//! use basket::{encode, generate_rules, mine_frequent_itemsets, Algorithm, Metric};
//!
//! let transactions = vec![vec!["A", "B"], vec!["A", "B", "C"], vec!["A"], vec!["B", "C"]];
//! let (matrix, itemizer) = encode(transactions);
//! let frequent = mine_frequent_itemsets(&matrix, 0.5, Algorithm::FpGrowth).unwrap();
//! let rules = generate_rules(&frequent, Metric::Lift, 1.0).unwrap();
//! for rule in &rules {
//!     println!("{} lift={}", rule.to_string(&itemizer), rule.lift());
//! }
//! ```

pub mod apriori;
pub mod encoder;
pub mod error;
pub mod fptree;
pub mod generate_rules;
mod index;
pub mod item;
mod item_counter;
pub mod itemizer;
pub mod itemset;
pub mod mining;
pub mod rule;
mod vec_sets;

pub use encoder::{encode, IncidenceMatrix};
pub use error::{Error, Result};
pub use generate_rules::{generate_rules, sort_rules, Metric};
pub use item::Item;
pub use itemizer::Itemizer;
pub use itemset::{FrequentItemsets, Itemset};
pub use mining::{mine_frequent_itemsets, mine_with_config, Algorithm, MiningConfig};
pub use rule::Rule;
