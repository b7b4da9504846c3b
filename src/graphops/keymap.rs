/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! Case-insensitive string set/map primitives used throughout the graph
//! engine. A single canonical normalization (lowercasing) is applied at
//! insertion time, per the "choose one canonical form" design note: every
//! key and tag value that enters a `KeySet`/`KeyMap` is lowercased first,
//! so comparisons and hashing never need to special-case ASCII casing.

use fxhash::FxHashMap;
use std::collections::BTreeSet;

/// Lowercases a string to its canonical, comparison-ready form.
pub fn canonical(s: &str) -> String {
    s.to_lowercase()
}

/// A case-insensitively deduplicated set of strings. Backed by a `BTreeSet`
/// of canonical forms so iteration order is always deterministic (needed
/// for JSON/DOT emission, which must not leak hash-map ordering).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySet {
    values: BTreeSet<String>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_iter<I, S>(it: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for v in it {
            set.insert(v.as_ref());
        }
        set
    }

    pub fn insert(&mut self, value: &str) -> bool {
        self.values.insert(canonical(value))
    }

    pub fn remove(&mut self, value: &str) -> bool {
        self.values.remove(&canonical(value))
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(&canonical(value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.values.iter()
    }

    pub fn union(&self, other: &KeySet) -> KeySet {
        KeySet {
            values: self.values.union(&other.values).cloned().collect(),
        }
    }

    pub fn intersection(&self, other: &KeySet) -> KeySet {
        KeySet {
            values: self.values.intersection(&other.values).cloned().collect(),
        }
    }

    pub fn difference(&self, other: &KeySet) -> KeySet {
        KeySet {
            values: self.values.difference(&other.values).cloned().collect(),
        }
    }

    pub fn symmetric_difference(&self, other: &KeySet) -> KeySet {
        KeySet {
            values: self
                .values
                .symmetric_difference(&other.values)
                .cloned()
                .collect(),
        }
    }

    pub fn is_subset(&self, other: &KeySet) -> bool {
        self.values.is_subset(&other.values)
    }

    pub fn is_superset(&self, other: &KeySet) -> bool {
        self.values.is_superset(&other.values)
    }

    pub fn overlaps(&self, other: &KeySet) -> bool {
        !self.values.is_disjoint(&other.values)
    }

    pub fn union_with(&mut self, other: &KeySet) {
        for v in other.values.iter() {
            self.values.insert(v.clone());
        }
    }
}

impl FromIterator<String> for KeySet {
    fn from_iter<I: IntoIterator<Item = String>>(it: I) -> Self {
        let mut set = Self::new();
        for v in it {
            set.values.insert(canonical(&v));
        }
        set
    }
}

/// A case-insensitive map from string keys to arbitrary values.
#[derive(Clone, Debug, Default)]
pub struct KeyMap<V> {
    entries: FxHashMap<String, V>,
}

impl<V> KeyMap<V> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(&canonical(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(&canonical(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&canonical(key))
    }

    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        self.entries.insert(canonical(key), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.remove(&canonical(key))
    }

    pub fn entry_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        self.entries
            .entry(canonical(key))
            .or_insert_with(default)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Keys in ascending order. Used wherever output must be deterministic.
    pub fn sorted_keys(&self) -> Vec<&String> {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &V)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut V)> {
        self.entries.iter_mut()
    }
}

/// `KeyMap<KeySet>`, with the multimap-style convenience operations the
/// reach/domain closures and tag bags build on top of.
pub type KeySetMap = KeyMap<KeySet>;

impl KeySetMap {
    /// Inserts `v` into the set at `k`, creating the set on first use.
    pub fn add_pair(&mut self, k: &str, v: &str) {
        self.entry_or_insert_with(k, KeySet::new).insert(v);
    }

    /// Removes `v` from the set at `k`. If the set becomes empty and
    /// `prune` is set, the entry itself is dropped. This happens even if
    /// `v` was never present.
    pub fn remove_pair(&mut self, k: &str, v: &str, prune: bool) {
        if let Some(set) = self.get_mut(k) {
            set.remove(v);
            if prune && set.is_empty() {
                self.remove(k);
            }
        }
    }

    /// Deep union, keyed by `k`: every set in `other` is unioned into the
    /// matching set here (creating it if absent).
    pub fn union_with(&mut self, other: &KeySetMap) {
        for (k, set) in other.iter() {
            self.entry_or_insert_with(k, KeySet::new).union_with(set);
        }
    }

    pub fn pair_count(&self) -> usize {
        self.iter().map(|(_, set)| set.len()).sum()
    }
}

/// A read-only projection of a `KeySetMap`. Analyses hold their own
/// `MapView`s (owned copies, not borrows into the live graph) so that a
/// `GraphAnalyzer` snapshot is independent of subsequent graph mutation.
#[derive(Clone, Debug, Default)]
pub struct MapView {
    inner: KeySetMap,
}

impl MapView {
    pub fn new(inner: KeySetMap) -> Self {
        Self { inner }
    }

    pub fn get(&self, key: &str) -> Option<&KeySet> {
        self.inner.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &KeySet)> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Unions the sets mapped by each key in `seeds`, ignoring seeds this
    /// view has no entry for.
    pub fn project<'a, I>(&self, seeds: I) -> KeySet
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut out = KeySet::new();
        self.project_into(seeds, &mut out);
        out
    }

    pub fn project_into<'a, I>(&self, seeds: I, target: &mut KeySet)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for seed in seeds {
            if let Some(set) = self.get(seed) {
                target.union_with(set);
            }
        }
    }

    /// Maps each `(k, seeds)` pair in `seed_map` to `(k, project(seeds))`.
    pub fn project_map(&self, seed_map: &KeySetMap) -> KeySetMap {
        let mut out = KeySetMap::new();
        for (k, seeds) in seed_map.iter() {
            out.insert(k, self.project(seeds.iter()));
        }
        out
    }

    /// The subset of `keys` that do not appear in the union of `seeds`'
    /// images, without ever materializing that union: each key is checked
    /// against each seed's image in turn and short-circuits on the first
    /// hit.
    pub fn not_in_projection(&self, keys: &KeySet, seeds: &KeySet) -> KeySet {
        let mut result = KeySet::new();
        'keys: for k in keys.iter() {
            for seed in seeds.iter() {
                if let Some(set) = self.get(seed) {
                    if set.contains(k) {
                        continue 'keys;
                    }
                }
            }
            result.insert(k);
        }
        result
    }

    /// `not_in_projection(keys, keys)`: the keys not reachable from one
    /// another through this view.
    pub fn not_in_self_projection(&self, keys: &KeySet) -> KeySet {
        self.not_in_projection(keys, keys)
    }

    /// The transitive-reduction operator used by `purify`: applies
    /// `not_in_self_projection` to every key's own seed set in `seed_map`,
    /// producing a full survivors map in one pass.
    pub fn not_in_self_projection_map(&self, seed_map: &KeySetMap) -> KeySetMap {
        let mut out = KeySetMap::new();
        for (k, seeds) in seed_map.iter() {
            out.insert(k, self.not_in_self_projection(seeds));
        }
        out
    }
}
