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

use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Store, StoreOption};
use basket::{Algorithm, Metric, MiningConfig};

pub struct Arguments {
    pub input_file_path: String,
    pub output_rules_path: String,
    pub transaction_column: String,
    pub item_column: String,
    pub mining: MiningConfig,
    pub metric: Metric,
    pub min_threshold: f64,
}

fn exit_with(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

pub fn parse_args_or_exit() -> Arguments {
    let mut input_file_path = String::new();
    let mut output_rules_path = String::new();
    let mut transaction_column = String::from("InvoiceNo");
    let mut item_column = String::from("Item");
    let mut min_support: f64 = 0.01;
    let mut algorithm = String::from("fpgrowth");
    let mut metric = String::from("lift");
    let mut min_threshold: f64 = 1.0;
    let mut max_len: Option<usize> = None;

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Market basket analysis: frequent itemsets and association rules.");

        parser
            .refer(&mut input_file_path)
            .add_option(
                &["--input"],
                Store,
                "Input CSV with one row per purchased item and a header row.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut output_rules_path)
            .add_option(
                &["--output"],
                Store,
                "File path in which to store output rules. \
                 Format: antecedents,consequents,support,confidence,lift.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut transaction_column)
            .add_option(
                &["--transaction-column"],
                Store,
                "Column identifying the transaction a row belongs to.",
            )
            .metavar("name");

        parser
            .refer(&mut item_column)
            .add_option(&["--item-column"], Store, "Column holding the item.")
            .metavar("name");

        parser
            .refer(&mut min_support)
            .add_option(
                &["--min-support"],
                Store,
                "Minimum itemset support threshold, in range (0,1].",
            )
            .metavar("threshold");

        parser
            .refer(&mut algorithm)
            .add_option(&["--algorithm"], Store, "apriori or fpgrowth.")
            .metavar("name");

        parser
            .refer(&mut metric)
            .add_option(
                &["--metric"],
                Store,
                "Rule metric to filter on: support, confidence, lift, leverage or conviction.",
            )
            .metavar("name");

        parser
            .refer(&mut min_threshold)
            .add_option(&["--min-threshold"], Store, "Minimum value of the rule metric.")
            .metavar("threshold");

        parser
            .refer(&mut max_len)
            .add_option(&["--max-len"], StoreOption, "Longest itemset to mine.")
            .metavar("length");

        if env::args().count() == 1 {
            // Nothing sensible to do if help can't be written.
            let _ = parser.print_help("Usage:", &mut io::stderr());
            process::exit(1);
        }

        if let Err(err) = parser.parse_args() {
            process::exit(err);
        }
    }

    if !(min_support > 0.0 && min_support <= 1.0) {
        exit_with("Minimum itemset support must be in range (0,1]");
    }

    let algorithm: Algorithm = algorithm
        .parse()
        .unwrap_or_else(|err| exit_with(&format!("{}", err)));
    let metric: Metric = metric
        .parse()
        .unwrap_or_else(|err| exit_with(&format!("{}", err)));
    if let Err(err) = metric.validate_threshold(min_threshold) {
        exit_with(&format!("{}", err));
    }

    let mut mining = MiningConfig::new(min_support, algorithm);
    mining.max_len = max_len;

    Arguments {
        input_file_path,
        output_rules_path,
        transaction_column,
        item_column,
        mining,
        metric,
        min_threshold,
    }
}
