use crate::item::Item;
use crate::itemizer::Itemizer;
use log::debug;
use std::collections::BTreeSet;
use std::hash::Hash;

/// Row major boolean matrix: one row per transaction, one column per item of
/// the universe. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncidenceMatrix {
    cells: Vec<bool>,
    num_rows: usize,
    num_columns: usize,
}

impl IncidenceMatrix {
    /// Builds a matrix from rows of column ids. Ids must be below
    /// `num_columns`; repeats within a row are ignored.
    pub fn from_rows(rows: &[Vec<Item>], num_columns: usize) -> IncidenceMatrix {
        let mut cells = vec![false; rows.len() * num_columns];
        for (row, items) in rows.iter().enumerate() {
            for item in items {
                assert!(item.as_index() < num_columns, "item outside universe");
                cells[row * num_columns + item.as_index()] = true;
            }
        }
        IncidenceMatrix {
            cells,
            num_rows: rows.len(),
            num_columns,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0 || self.num_columns == 0
    }

    pub fn get(&self, row: usize, item: Item) -> bool {
        self.row(row)[item.as_index()]
    }

    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.num_columns;
        &self.cells[start..start + self.num_columns]
    }

    /// The items present in a row, in column order.
    pub fn row_items(&self, row: usize) -> Vec<Item> {
        self.row(row)
            .iter()
            .enumerate()
            .filter(|&(_, &present)| present)
            .map(|(index, _)| Item::from_index(index))
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<Item>> + '_ {
        (0..self.num_rows).map(move |row| self.row_items(row))
    }

    /// Number of rows containing every item in `items`. Scans the matrix.
    pub fn count_rows_containing(&self, items: &[Item]) -> u32 {
        (0..self.num_rows)
            .filter(|&row| {
                let cells = self.row(row);
                items.iter().all(|item| cells[item.as_index()])
            })
            .count() as u32
    }
}

/// One-hot encodes `transactions`. Duplicate items inside a transaction
/// collapse to presence. Columns are the distinct items in ascending order,
/// so the output is a pure function of the input.
pub fn encode<T, I, J>(transactions: I) -> (IncidenceMatrix, Itemizer<T>)
where
    T: Ord + Hash + Clone,
    I: IntoIterator<Item = J>,
    J: IntoIterator<Item = T>,
{
    let baskets: Vec<BTreeSet<T>> = transactions
        .into_iter()
        .map(|transaction| transaction.into_iter().collect())
        .collect();

    let itemizer = Itemizer::from_labels(baskets.iter().flat_map(|basket| basket.iter().cloned()));

    let rows: Vec<Vec<Item>> = baskets
        .iter()
        .map(|basket| {
            basket
                .iter()
                .filter_map(|label| itemizer.id_of(label))
                .collect()
        })
        .collect();

    let matrix = IncidenceMatrix::from_rows(&rows, itemizer.len());
    debug!(
        "Encoded {} transactions over {} distinct items",
        matrix.num_rows(),
        matrix.num_columns()
    );
    (matrix, itemizer)
}

#[cfg(test)]
mod tests {
    use super::encode;
    use crate::item::to_item_vec;

    #[test]
    fn test_encode() {
        let transactions = vec![
            vec!["b", "a"],
            vec!["a", "b", "c", "a"],
            vec!["a"],
            vec!["c", "b"],
        ];
        let (matrix, itemizer) = encode(transactions.clone());
        assert_eq!(itemizer.labels(), &["a", "b", "c"]);
        assert_eq!(matrix.num_rows(), 4);
        assert_eq!(matrix.num_columns(), 3);
        assert_eq!(matrix.row(0), &[true, true, false]);
        assert_eq!(matrix.row(1), &[true, true, true]);
        assert_eq!(matrix.row(2), &[true, false, false]);
        assert_eq!(matrix.row(3), &[false, true, true]);
        assert_eq!(matrix.row_items(3), to_item_vec(&[1, 2]));
        assert_eq!(matrix.count_rows_containing(&to_item_vec(&[0, 1])), 2);
        assert_eq!(matrix.count_rows_containing(&[]), 4);

        for (row, transaction) in transactions.iter().enumerate() {
            let mut expected = transaction.clone();
            expected.sort();
            expected.dedup();
            assert_eq!(itemizer.decode(&matrix.row_items(row)), expected);
        }
    }

    #[test]
    fn test_encode_empty() {
        let (matrix, itemizer) = encode(Vec::<Vec<String>>::new());
        assert_eq!(matrix.num_rows(), 0);
        assert_eq!(matrix.num_columns(), 0);
        assert!(matrix.is_empty());
        assert!(itemizer.is_empty());
    }

    #[test]
    fn test_encode_empty_transaction() {
        let (matrix, itemizer) = encode(vec![vec![], vec![7u32, 3]]);
        assert_eq!(itemizer.labels(), &[3, 7]);
        assert_eq!(matrix.num_rows(), 2);
        assert!(matrix.row_items(0).is_empty());
        assert_eq!(itemizer.decode(&matrix.row_items(1)), vec![3, 7]);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let a = encode(vec![vec!["x", "y"], vec!["z"]]);
        let b = encode(vec![vec!["y", "x"], vec!["z"]]);
        assert_eq!(a.0, b.0);
        assert_eq!(a.1.labels(), b.1.labels());
    }
}
