use crate::encoder::IncidenceMatrix;
use crate::item::Item;

/// Vertical layout of an incidence matrix: for each column, the ascending
/// list of rows in which it is set.
pub struct Index {
    index: Vec<Vec<usize>>,
    transaction_count: usize,
}

impl Index {
    pub fn from_matrix(matrix: &IncidenceMatrix) -> Index {
        let mut index: Vec<Vec<usize>> = vec![vec![]; matrix.num_columns()];
        for tid in 0..matrix.num_rows() {
            for (column, &present) in matrix.row(tid).iter().enumerate() {
                if present {
                    index[column].push(tid);
                }
            }
        }
        Index {
            index,
            transaction_count: matrix.num_rows(),
        }
    }

    /// Number of transactions containing all of `itemset`.
    pub fn count(&self, itemset: &[Item]) -> u32 {
        if itemset.is_empty() {
            return self.transaction_count as u32;
        }

        let mut tid_lists: Vec<&Vec<usize>> = Vec::with_capacity(itemset.len());
        for item in itemset {
            match self.index.get(item.as_index()) {
                Some(tids) => tid_lists.push(tids),
                None => return 0,
            }
        }
        if tid_lists.len() == 1 {
            return tid_lists[0].len() as u32;
        }
        // Walk the shortest list, probing the others.
        tid_lists.sort_by_key(|tids| tids.len());

        let mut p: Vec<usize> = vec![0; tid_lists.len()];

        let mut count = 0;
        for &tid in tid_lists[0].iter() {
            let mut tid_in_all_item_tid_lists = true;
            for i in 1..tid_lists.len() {
                while p[i] < tid_lists[i].len() && tid_lists[i][p[i]] < tid {
                    p[i] += 1;
                }
                if p[i] == tid_lists[i].len() || tid_lists[i][p[i]] != tid {
                    tid_in_all_item_tid_lists = false;
                    break;
                }
            }
            if tid_in_all_item_tid_lists {
                count += 1
            }
        }
        count
    }
}
