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

// All functions here assume their inputs are sorted and duplicate free.

pub fn union<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Ord + Copy,
{
    let mut c: Vec<T> = Vec::with_capacity(a.len() + b.len());
    let mut ap = 0;
    let mut bp = 0;
    while ap < a.len() && bp < b.len() {
        if a[ap] < b[bp] {
            c.push(a[ap]);
            ap += 1;
        } else if b[bp] < a[ap] {
            c.push(b[bp]);
            bp += 1;
        } else {
            c.push(a[ap]);
            ap += 1;
            bp += 1;
        }
    }
    c.extend_from_slice(&a[ap..]);
    c.extend_from_slice(&b[bp..]);
    c
}

// Removes the items of b from a. Every item of b must be in a.
pub fn split_out<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Ord + Copy,
{
    let mut c: Vec<T> = Vec::with_capacity(a.len());
    let mut ap = 0;
    let mut bp = 0;
    while ap < a.len() && bp < b.len() {
        if a[ap] < b[bp] {
            c.push(a[ap]);
            ap += 1;
        } else if b[bp] < a[ap] {
            panic!("Tried to remove item that's not in set!");
        } else {
            ap += 1;
            bp += 1;
        }
    }
    assert!(bp == b.len(), "Tried to remove item that's not in set!");
    c.extend_from_slice(&a[ap..]);
    c
}

/// Joins two k-sets sharing their first k-1 items into the (k+1)-set
/// containing both. Returns None unless the prefixes match and the last item
/// of `a` precedes the last item of `b`.
pub fn join_on_prefix<T>(a: &[T], b: &[T]) -> Option<Vec<T>>
where
    T: Ord + Copy,
{
    if a.is_empty() || a.len() != b.len() {
        return None;
    }
    let k = a.len() - 1;
    if a[..k] != b[..k] || a[k] >= b[k] {
        return None;
    }
    let mut c: Vec<T> = Vec::with_capacity(a.len() + 1);
    c.extend_from_slice(a);
    c.push(b[k]);
    Some(c)
}

/// Every subset of `items` with exactly one item removed.
pub fn subsets_missing_one<T>(items: &[T]) -> impl Iterator<Item = Vec<T>> + '_
where
    T: Copy,
{
    (0..items.len()).map(move |skip| {
        items
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != skip)
            .map(|(_, &x)| x)
            .collect()
    })
}
