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

use basket::{Error, Result};
use fnv::FnvHashMap;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;

/// Reads a CSV of (transaction id, item) rows and groups the items by
/// transaction id. Transactions keep the order their id was first seen.
pub struct TransactionReader<R> {
    reader: R,
    transaction_column: String,
    item_column: String,
}

impl TransactionReader<BufReader<File>> {
    pub fn open(path: &str, transaction_column: &str, item_column: &str) -> Result<Self> {
        let file = File::open(path)?;
        Ok(TransactionReader::new(
            BufReader::new(file),
            transaction_column,
            item_column,
        ))
    }
}

impl<R: BufRead> TransactionReader<R> {
    pub fn new(reader: R, transaction_column: &str, item_column: &str) -> Self {
        TransactionReader {
            reader,
            transaction_column: transaction_column.to_owned(),
            item_column: item_column.to_owned(),
        }
    }

    pub fn read_transactions(self) -> Result<Vec<Vec<String>>> {
        let mut lines = self.reader.lines();
        let header = match lines.next() {
            Some(line) => split_fields(&line?),
            None => return Ok(vec![]),
        };
        let column_index = |name: &str| {
            header
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| Error::MissingColumn(name.to_owned()))
        };
        let tid_index = column_index(&self.transaction_column)?;
        let item_index = column_index(&self.item_column)?;

        let mut transactions: Vec<Vec<String>> = vec![];
        let mut tid_to_transaction: FnvHashMap<String, usize> = FnvHashMap::default();
        for (line_number, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_fields(&line);
            let field = |index: usize| {
                fields.get(index).ok_or_else(|| Error::MalformedRow {
                    // One for the header, one for counting from 1.
                    line: line_number + 2,
                    reason: format!("expected at least {} fields, found {}", index + 1, fields.len()),
                })
            };
            let tid = field(tid_index)?;
            let item = field(item_index)?;
            if item.is_empty() {
                continue;
            }
            let position = *tid_to_transaction.entry(tid.clone()).or_insert_with(|| {
                transactions.push(vec![]);
                transactions.len() - 1
            });
            transactions[position].push(item.clone());
        }
        Ok(transactions)
    }
}

// Splits a CSV line on commas outside double quotes, unquoting fields and
// trimming surrounding whitespace.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(field.trim().to_owned());
                field.clear();
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_owned());
    fields
}

#[cfg(test)]
mod tests {
    use super::{split_fields, TransactionReader};
    use basket::Error;
    use std::io::Cursor;

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("a,b, c"), vec!["a", "b", "c"]);
        assert_eq!(split_fields("1,\"Milk, whole\""), vec!["1", "Milk, whole"]);
        assert_eq!(split_fields("\"say \"\"hi\"\"\",x"), vec!["say \"hi\"", "x"]);
        assert_eq!(split_fields(""), vec![""]);
    }

    #[test]
    fn test_groups_by_transaction() {
        let csv = "Date,InvoiceNo,Item\n\
                   2024-01-01,1001,Bread\n\
                   2024-01-01,1002,Milk\n\
                   2024-01-01,1001,Butter\n\
                   \n\
                   2024-01-02,1001,Bread\n\
                   2024-01-02,1003,Eggs\n";
        let transactions = TransactionReader::new(Cursor::new(csv), "InvoiceNo", "Item")
            .read_transactions()
            .unwrap();
        assert_eq!(
            transactions,
            vec![
                vec!["Bread", "Butter", "Bread"],
                vec!["Milk"],
                vec!["Eggs"],
            ]
        );
    }

    #[test]
    fn test_missing_column() {
        let csv = "Invoice,Product\n1,Bread\n";
        match TransactionReader::new(Cursor::new(csv), "InvoiceNo", "Product").read_transactions() {
            Err(Error::MissingColumn(name)) => assert_eq!(name, "InvoiceNo"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_short_row() {
        let csv = "InvoiceNo,Item\n1,Bread\n2\n";
        match TransactionReader::new(Cursor::new(csv), "InvoiceNo", "Item").read_transactions() {
            Err(Error::MalformedRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        let transactions = TransactionReader::new(Cursor::new(""), "InvoiceNo", "Item")
            .read_transactions()
            .unwrap();
        assert!(transactions.is_empty());
    }
}
