/// A column of the incidence matrix. Items compare in the same order as the
/// labels of the universe they were encoded from.
#[derive(Copy, Clone, Hash, PartialOrd, PartialEq, Eq, Ord, Debug)]
pub struct Item {
    id: u32,
}

impl Item {
    pub fn with_id(id: u32) -> Item {
        Item { id }
    }
    pub fn from_index(index: usize) -> Item {
        Item { id: index as u32 }
    }
    pub fn as_index(&self) -> usize {
        self.id as usize
    }
}

#[cfg(test)]
pub fn to_item_vec(nums: &[u32]) -> Vec<Item> {
    nums.iter().map(|&i| Item::with_id(i)).collect()
}
