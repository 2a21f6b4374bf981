use crate::apriori::apriori;
use crate::encoder::IncidenceMatrix;
use crate::error::{Error, Result};
use crate::fptree::fpgrowth;
use crate::itemset::{min_count, validate_min_support, FrequentItemsets};
use log::info;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Apriori,
    FpGrowth,
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Algorithm> {
        match s.to_ascii_lowercase().as_str() {
            "apriori" => Ok(Algorithm::Apriori),
            "fpgrowth" | "fp-growth" | "fp_growth" => Ok(Algorithm::FpGrowth),
            other => Err(Error::InvalidArgument(format!(
                "unknown algorithm '{}', expected apriori or fpgrowth",
                other
            ))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::Apriori => write!(f, "apriori"),
            Algorithm::FpGrowth => write!(f, "fpgrowth"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MiningConfig {
    pub min_support: f64,
    pub algorithm: Algorithm,
    /// Longest itemset to report; unbounded when None.
    pub max_len: Option<usize>,
}

impl MiningConfig {
    pub fn new(min_support: f64, algorithm: Algorithm) -> MiningConfig {
        MiningConfig {
            min_support,
            algorithm,
            max_len: None,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> MiningConfig {
        self.max_len = Some(max_len);
        self
    }
}

/// Finds every itemset whose support in `matrix` is at least `min_support`.
/// Both algorithms return the same collection.
pub fn mine_frequent_itemsets(
    matrix: &IncidenceMatrix,
    min_support: f64,
    algorithm: Algorithm,
) -> Result<FrequentItemsets> {
    mine_with_config(matrix, &MiningConfig::new(min_support, algorithm))
}

pub fn mine_with_config(matrix: &IncidenceMatrix, config: &MiningConfig) -> Result<FrequentItemsets> {
    validate_min_support(config.min_support)?;

    let timer = Instant::now();
    let min_count = min_count(config.min_support, matrix.num_rows());
    let frequent = match config.algorithm {
        Algorithm::Apriori => apriori(matrix, min_count, config.max_len),
        Algorithm::FpGrowth => fpgrowth(matrix, min_count, config.max_len),
    };
    info!(
        "{} found {} frequent itemsets (min count {}) in {} ms",
        config.algorithm,
        frequent.len(),
        min_count,
        timer.elapsed().as_millis()
    );
    Ok(frequent)
}
