use crate::error::{Error, Result};
use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::itemset::FrequentItemsets;
use crate::vec_sets::union;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// An association rule antecedent => consequent. Both sides are sorted,
/// disjoint, and their union is a frequent itemset.
#[derive(Clone, Debug)]
pub struct Rule {
    pub antecedent: Vec<Item>,
    pub consequent: Vec<Item>,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    pub conviction: f64,
}

// Can't derive Eq as f64 doesn't satisfy Eq.
impl Eq for Rule {}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
    }
}

fn lookup_support(frequent: &FrequentItemsets, items: &[Item], role: &str) -> Result<f64> {
    frequent.support_of(items).ok_or_else(|| {
        Error::InternalConsistency(format!(
            "{} {:?} of a frequent itemset is missing from the collection",
            role, items
        ))
    })
}

impl Rule {
    /// Computes the metrics of antecedent => consequent from the supports
    /// recorded in `frequent`. Every side and their union must be present.
    pub fn make(
        antecedent: Vec<Item>,
        consequent: Vec<Item>,
        frequent: &FrequentItemsets,
    ) -> Result<Rule> {
        if antecedent.is_empty() || consequent.is_empty() {
            return Err(Error::InternalConsistency(
                "rule with an empty side".to_owned(),
            ));
        }

        let ac_vec: Vec<Item> = union(&antecedent, &consequent);
        let ac_sup = lookup_support(frequent, &ac_vec, "itemset")?;
        let a_sup = lookup_support(frequent, &antecedent, "antecedent")?;
        let c_sup = lookup_support(frequent, &consequent, "consequent")?;

        let confidence = ac_sup / a_sup;
        let lift = confidence / c_sup;
        let leverage = ac_sup - a_sup * c_sup;
        let conviction = if confidence >= 1.0 {
            f64::INFINITY
        } else {
            (1.0 - c_sup) / (1.0 - confidence)
        };

        Ok(Rule {
            antecedent,
            consequent,
            antecedent_support: a_sup,
            consequent_support: c_sup,
            support: ac_sup,
            confidence,
            lift,
            leverage,
            conviction,
        })
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn lift(&self) -> f64 {
        self.lift
    }

    pub fn support(&self) -> f64 {
        self.support
    }

    /// The itemset the rule was derived from.
    pub fn merge(&self) -> Vec<Item> {
        union(&self.antecedent, &self.consequent)
    }

    pub fn antecedent_labels<T>(&self, itemizer: &Itemizer<T>) -> Vec<T>
    where
        T: Ord + Hash + Clone,
    {
        itemizer.decode(&self.antecedent)
    }

    pub fn consequent_labels<T>(&self, itemizer: &Itemizer<T>) -> Vec<T>
    where
        T: Ord + Hash + Clone,
    {
        itemizer.decode(&self.consequent)
    }

    pub fn to_string<T>(&self, itemizer: &Itemizer<T>) -> String
    where
        T: Ord + Hash + Clone + Display,
    {
        [
            item_vec_to_string(&self.antecedent, itemizer),
            " => ".to_owned(),
            item_vec_to_string(&self.consequent, itemizer),
        ]
        .join("")
    }
}

/// Space separated labels. Items are already in label order.
pub fn item_vec_to_string<T>(items: &[Item], itemizer: &Itemizer<T>) -> String
where
    T: Ord + Hash + Clone + Display,
{
    items
        .iter()
        .map(|&item| itemizer.label_of(item).to_string())
        .collect::<Vec<String>>()
        .join(" ")
}
