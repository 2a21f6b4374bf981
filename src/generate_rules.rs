use crate::error::{Error, Result};
use crate::item::Item;
use crate::itemset::FrequentItemsets;
use crate::rule::Rule;
use crate::vec_sets::split_out;
use itertools::Itertools;
use log::debug;
use ordered_float::OrderedFloat;
use std::fmt;
use std::str::FromStr;

/// The rule measure a threshold applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Metric {
    Support,
    Confidence,
    Lift,
    Leverage,
    Conviction,
}

impl Metric {
    pub fn value(&self, rule: &Rule) -> f64 {
        match self {
            Metric::Support => rule.support,
            Metric::Confidence => rule.confidence,
            Metric::Lift => rule.lift,
            Metric::Leverage => rule.leverage,
            Metric::Conviction => rule.conviction,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Metric::Support => "support",
            Metric::Confidence => "confidence",
            Metric::Lift => "lift",
            Metric::Leverage => "leverage",
            Metric::Conviction => "conviction",
        }
    }

    pub fn validate_threshold(&self, threshold: f64) -> Result<()> {
        let valid = match self {
            Metric::Support | Metric::Confidence => (0.0..=1.0).contains(&threshold),
            Metric::Leverage => (-1.0..=1.0).contains(&threshold),
            Metric::Lift | Metric::Conviction => threshold >= 0.0,
        };
        if !valid {
            return Err(Error::InvalidThreshold {
                name: self.name(),
                value: threshold,
            });
        }
        Ok(())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Metric> {
        match s.to_ascii_lowercase().as_str() {
            "support" => Ok(Metric::Support),
            "confidence" => Ok(Metric::Confidence),
            "lift" => Ok(Metric::Lift),
            "leverage" => Ok(Metric::Leverage),
            "conviction" => Ok(Metric::Conviction),
            other => Err(Error::InvalidArgument(format!("unknown metric '{}'", other))),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Every way of splitting a sorted itemset into non-empty antecedent and
// consequent, smallest antecedents first.
fn splits(items: &[Item]) -> impl Iterator<Item = (Vec<Item>, Vec<Item>)> + '_ {
    (1..items.len()).flat_map(move |k| {
        items.iter().cloned().combinations(k).map(move |antecedent| {
            let consequent = split_out(items, &antecedent);
            (antecedent, consequent)
        })
    })
}

/// Derives every rule from `frequent` whose `metric` is at least
/// `min_threshold`. Rules come out grouped by source itemset in canonical
/// order.
pub fn generate_rules(
    frequent: &FrequentItemsets,
    metric: Metric,
    min_threshold: f64,
) -> Result<Vec<Rule>> {
    metric.validate_threshold(min_threshold)?;

    let mut rules: Vec<Rule> = vec![];
    let mut considered = 0;
    for (itemset, _) in frequent.sorted().into_iter().filter(|(i, _)| i.len() > 1) {
        for (antecedent, consequent) in splits(itemset.items()) {
            considered += 1;
            let rule = Rule::make(antecedent, consequent, frequent)?;
            if metric.value(&rule) >= min_threshold {
                rules.push(rule);
            }
        }
    }
    debug!(
        "Kept {} of {} candidate rules with {} >= {}",
        rules.len(),
        considered,
        metric,
        min_threshold
    );
    Ok(rules)
}

/// Orders rules by descending `metric`, ties by antecedent then consequent.
pub fn sort_rules(rules: &mut [Rule], metric: Metric) {
    rules.sort_by(|a, b| {
        OrderedFloat(metric.value(b))
            .cmp(&OrderedFloat(metric.value(a)))
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
}
