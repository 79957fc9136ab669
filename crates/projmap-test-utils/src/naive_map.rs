// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// A naive, inefficient map that acts as an oracle for property-based tests.
///
/// Entries are stored in a vector without internal indexes, and lookups are
/// linear scans comparing projections.
#[derive(Debug)]
pub struct NaiveMap<K, V, S> {
    entries: Vec<(K, V)>,
    project: fn(&K) -> S,
}

impl<K, V, S: PartialEq> NaiveMap<K, V, S> {
    pub fn new(project: fn(&K) -> S) -> Self {
        Self { entries: Vec::new(), project }
    }

    fn position(&self, key: &K) -> Option<usize> {
        let surrogate = (self.project)(key);
        self.entries.iter().position(|(k, _)| (self.project)(k) == surrogate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.position(key)?;
        Some(&self.entries[index].1)
    }

    pub fn get_key(&self, key: &K) -> Option<&K> {
        let index = self.position(key)?;
        Some(&self.entries[index].0)
    }

    /// Replaces the entry with the same projection in place, or appends.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.position(&key) {
            Some(index) => {
                Some(std::mem::replace(&mut self.entries[index], (key, value)))
            }
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Appends the entry if its projection is absent. Returns whether it was
    /// appended.
    pub fn insert_unique(&mut self, key: K, value: V) -> bool {
        if self.position(&key).is_some() {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let index = self.position(key)?;
        Some(self.entries.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A naive one-to-many map that acts as an oracle for property-based tests.
///
/// The item counter follows the same rules as `GroupedLookup`: plus one per
/// non-empty add or push, minus the group size on delete, minus one per
/// deleted value. It can go negative.
#[derive(Debug)]
pub struct NaiveLookup<K, V, S> {
    groups: NaiveMap<K, Vec<V>, S>,
    item_size: isize,
}

impl<K, V: PartialEq, S: PartialEq> NaiveLookup<K, V, S> {
    pub fn new(project: fn(&K) -> S) -> Self {
        Self { groups: NaiveMap::new(project), item_size: 0 }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn item_size(&self) -> isize {
        self.item_size
    }

    pub fn get(&self, key: &K) -> &[V] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add(&mut self, key: K, values: Vec<V>) {
        if values.is_empty() {
            return;
        }
        match self.groups.position(&key) {
            Some(index) => self.groups.entries[index].1.extend(values),
            None => self.groups.entries.push((key, values)),
        }
        self.item_size += 1;
    }

    pub fn delete(&mut self, key: &K) -> bool {
        match self.groups.remove(key) {
            Some((_, group)) => {
                self.item_size -= group.len() as isize;
                true
            }
            None => false,
        }
    }

    pub fn delete_value(&mut self, key: &K, value: &V) -> bool {
        let Some(index) = self.groups.position(key) else {
            return false;
        };
        let group = &mut self.groups.entries[index].1;
        let Some(ix) = group.iter().position(|v| v == value) else {
            return false;
        };
        group.remove(ix);
        if group.is_empty() {
            self.groups.entries.remove(index);
        }
        self.item_size -= 1;
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.groups.iter().map(|(k, group)| (k, group.as_slice()))
    }

    pub fn clear(&mut self) {
        self.groups.clear();
        self.item_size = 0;
    }
}
