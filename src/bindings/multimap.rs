use std::{
    borrow::Borrow,
    collections::{hash_map, HashMap},
    fmt::{Debug, Formatter},
    hash::Hash,
    slice::Iter,
};

/// A map from keys to ordered groups of values.
///
/// Values added under the same key are kept in insertion order, and that
/// order is what consumers use to break ties between them. Looking up a key
/// that was never added yields an empty group rather than an error.
///
/// ```
/// use injection_engine::Multimap;
///
/// let mut map = Multimap::new();
/// map.add("fruit", "apple");
/// map.add("fruit", "pear");
///
/// assert_eq!(&["apple", "pear"], map.get("fruit"));
/// assert!(map.get("vegetable").is_empty());
/// ```
pub struct Multimap<K, V> {
    groups: HashMap<K, Vec<V>>,
}

impl<K, V> Multimap<K, V>
where
    K: Hash + Eq,
{
    /// Creates an empty multimap.
    #[must_use]
    pub fn new() -> Self {
        Multimap {
            groups: HashMap::new(),
        }
    }

    /// Appends a value to the group for `key`, creating the group if it
    /// doesn't exist yet.
    pub fn add(&mut self, key: K, value: V) {
        self.groups.entry(key).or_default().push(value);
    }

    /// Gets the group for `key` in insertion order. The group is empty if
    /// nothing was added under `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if at least one value is stored under `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        !self.get(key).is_empty()
    }

    /// Removes the first value under `key` equal to `value`. Returns `true`
    /// if a value was removed. The remaining values keep their order.
    pub fn remove<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        let group = match self.groups.get_mut(key) {
            Some(group) => group,
            None => return false,
        };
        let index = match group.iter().position(|existing| existing == value) {
            Some(index) => index,
            None => return false,
        };

        group.remove(index);
        if group.is_empty() {
            self.groups.remove(key);
        }

        true
    }

    /// Removes and returns the whole group for `key`.
    pub fn remove_all<Q>(&mut self, key: &Q) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.groups.remove(key).unwrap_or_default()
    }

    /// Removes every group.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Iterates over the keys that have at least one value, in no
    /// particular order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.keys()
    }

    /// Iterates over every key and value pair. Keys come in no particular
    /// order, but values under the same key come in insertion order.
    #[must_use]
    pub fn iter(&self) -> MultimapIter<'_, K, V> {
        MultimapIter {
            groups: self.groups.iter(),
            current: None,
        }
    }

    /// Gets the total number of values across all keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Returns `true` if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<K, V> Default for Multimap<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Multimap::new()
    }
}

impl<K, V> Clone for Multimap<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Multimap {
            groups: self.groups.clone(),
        }
    }
}

impl<K, V> Debug for Multimap<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.groups.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for Multimap<K, V>
where
    K: Hash + Eq,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Multimap<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Multimap::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V> IntoIterator for &'a Multimap<K, V>
where
    K: Hash + Eq,
{
    type Item = (&'a K, &'a V);
    type IntoIter = MultimapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the key and value pairs of a [`Multimap`].
pub struct MultimapIter<'a, K, V> {
    groups: hash_map::Iter<'a, K, Vec<V>>,
    current: Option<(&'a K, Iter<'a, V>)>,
}

impl<'a, K, V> Iterator for MultimapIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Try to get next item in current group
            if let Some((key, values)) = self.current.as_mut() {
                if let Some(value) = values.next() {
                    return Some((*key, value));
                }
            }

            // Try to go to next group
            let (key, values) = self.groups.next()?;
            self.current = Some((key, values.iter()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_yields_empty_group() {
        let map: Multimap<&str, i32> = Multimap::new();
        assert!(map.get("missing").is_empty());
        assert!(!map.contains_key("missing"));
    }

    #[test]
    fn remove_keeps_order_of_remaining_values() {
        let mut map = Multimap::new();
        map.extend([("a", 1), ("a", 2), ("a", 3), ("b", 4)]);

        assert!(map.remove("a", &2));
        assert!(!map.remove("a", &2));
        assert_eq!(&[1, 3], map.get("a"));
        assert_eq!(3, map.len());
    }

    #[test]
    fn removing_last_value_removes_key() {
        let mut map = Multimap::new();
        map.add("a", 1);
        assert!(map.remove("a", &1));
        assert!(map.is_empty());
        assert_eq!(0, map.keys().count());
    }

    #[test]
    fn remove_all_returns_group() {
        let mut map: Multimap<_, _> = [("a", 1), ("a", 2)].into_iter().collect();
        assert_eq!(vec![1, 2], map.remove_all("a"));
        assert!(map.remove_all("a").is_empty());
    }

    #[test]
    fn iter_visits_every_value() {
        let map: Multimap<_, _> =
            [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();

        let mut pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort_unstable();
        assert_eq!(vec![("a", 1), ("a", 3), ("b", 2)], pairs);
    }
}
