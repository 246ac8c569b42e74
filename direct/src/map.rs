use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Index;

/// Mapping that iterates in insertion order.
///
/// Re-inserting an existing key replaces the value in place; removing a key
/// shifts every later entry down by one.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    positions: HashMap<K, usize>,
}

impl<K: Hash + Eq + Clone, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the previous value when `key` was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&position) = self.positions.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let &position = self.positions.get(key)?;
        Some(&self.entries[position].1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let &position = self.positions.get(key)?;
        Some(&mut self.entries[position].1)
    }

    /// Like `get`, but also hands back the stored key instance.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let &position = self.positions.get(key)?;
        let (key, value) = &self.entries[position];
        Some((key, value))
    }

    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.entries.get(index).map(|(key, value)| (key, value))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let position = self.positions.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for (key, _) in &self.entries[position..] {
            if let Some(slot) = self.positions.get_mut(key) {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<K: Hash + Eq + Clone, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Same keys with equal values, regardless of order.
impl<K: Hash + Eq + Clone, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Hash + Eq + Clone, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: Hash + Eq + Clone, V> Index<&K> for OrderedMap<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not present in OrderedMap"),
        }
    }
}

impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq + Clone, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Borrowing iterator over an [`OrderedMap`], in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    entries: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back().map(|(key, value)| (key, value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            entries: self.entries.iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_follows_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        map.insert("c", 3);
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn overwriting_keeps_the_original_position() {
        let mut map = OrderedMap::new();
        map.insert("x", 1);
        map.insert("y", 2);
        assert_eq!(map.insert("x", 10), Some(1));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0), Some((&"x", &10)));
        assert_eq!(map[&"x"], 10);
    }

    #[test]
    fn remove_shifts_later_entries() {
        let entries = [("a", 1), ("b", 2), ("c", 3), ("d", 4)];
        let mut map: OrderedMap<_, _> = entries.into_iter().collect();
        assert_eq!(map.remove(&"b"), Some(2));
        assert_eq!(map.remove(&"b"), None);
        assert_eq!(map.get(&"c"), Some(&3));
        assert_eq!(map.get(&"d"), Some(&4));
        assert_eq!(map.get_index(1), Some((&"c", &3)));
        let values: Vec<_> = map.values().copied().collect();
        assert_eq!(values, [1, 3, 4]);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut map = OrderedMap::new();
        map.insert(1, String::from("one"));
        if let Some(value) = map.get_mut(&1) {
            value.push('!');
        }
        assert_eq!(map.get(&1).map(String::as_str), Some("one!"));
        assert!(map.get_mut(&2).is_none());
    }

    #[test]
    fn equality_ignores_order() {
        let left: OrderedMap<_, _> = [(1, 'a'), (2, 'b')].into_iter().collect();
        let right: OrderedMap<_, _> = [(2, 'b'), (1, 'a')].into_iter().collect();
        let other: OrderedMap<_, _> = [(1, 'a'), (2, 'c')].into_iter().collect();
        assert_eq!(left, right);
        assert_ne!(left, other);
    }

    #[test]
    fn get_key_value_hands_back_the_stored_key() {
        let stored = String::from("key");
        let mut map = OrderedMap::new();
        map.insert(stored.clone(), 1);

        let lookup = String::from("key");
        let (key, value) = map.get_key_value(&lookup).unwrap();
        assert_eq!(key, &stored);
        assert!(!std::ptr::eq(key, &lookup));
        assert!(std::ptr::eq(key, map.keys().next().unwrap()));
        assert_eq!(value, &1);
        assert!(map.get_key_value(&String::from("missing")).is_none());
    }

    #[test]
    fn borrowed_iteration_matches_iter() {
        let map: OrderedMap<_, _> = [("b", 2), ("a", 1)].into_iter().collect();
        let mut seen = Vec::new();
        for (key, value) in &map {
            seen.push((*key, *value));
        }
        assert_eq!(seen, [("b", 2), ("a", 1)]);
        assert!(map.iter().eq(&map));
        assert_eq!(map.iter().len(), 2);
        assert_eq!(map.iter().next_back(), Some((&"a", &1)));
    }

    #[test]
    fn clear_empties_the_map() {
        let mut map: OrderedMap<_, _> = [(1, 1), (2, 2)].into_iter().collect();
        assert!(!map.is_empty());
        map.clear();
        assert!(map.is_empty());
        assert!(!map.contains_key(&1));
        map.insert(3, 3);
        assert_eq!(map.get_index(0), Some((&3, &3)));
    }
}
