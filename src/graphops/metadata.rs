/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! Attribute bag attached to every node, edge and graph: string properties
//! plus keyed sets of tag strings.

use crate::graphops::keymap::{KeyMap, KeySet, KeySetMap};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Attribute bag: case-insensitive string properties, plus keyed sets of
/// case-insensitive tag strings. The unkeyed tag set (key `""`) always
/// exists, even when empty.
#[derive(Clone, Debug, Default)]
pub struct Metadata {
    properties: KeyMap<String>,
    keyed_tags: KeySetMap,
}

impl Metadata {
    /// The key under which unkeyed tags live.
    pub const UNKEYED: &'static str = "";

    pub fn new() -> Self {
        let mut keyed_tags = KeySetMap::new();
        keyed_tags.insert(Self::UNKEYED, KeySet::new());
        Self {
            properties: KeyMap::new(),
            keyed_tags,
        }
    }

    /// Sets a property, or removes it if `value` is `None`.
    pub fn set_property(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                self.properties.insert(key, v.to_owned());
            }
            None => {
                self.properties.remove(key);
            }
        }
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&String, &String)> {
        self.properties.iter()
    }

    /// Returns the mutable tag set for `key`, creating an empty one on
    /// first read.
    pub fn tags(&mut self, key: &str) -> &mut KeySet {
        self.keyed_tags.entry_or_insert_with(key, KeySet::new)
    }

    /// Returns the set for `key` only if it exists and is non-empty; an
    /// empty set is treated as absent for read purposes.
    pub fn try_get_tags(&self, key: &str) -> Option<&KeySet> {
        self.keyed_tags.get(key).filter(|set| !set.is_empty())
    }

    pub fn keyed_tags(&self) -> &KeySetMap {
        &self.keyed_tags
    }

    /// True iff the set for `key` (if any) shares at least one element
    /// with `candidates`.
    pub fn has_any_tag<'a, I>(&self, key: &str, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self.keyed_tags.get(key) {
            Some(set) => candidates.into_iter().any(|t| set.contains(t)),
            None => false,
        }
    }

    /// Copies selected data from `source`. Properties are overwritten by
    /// the source's; tag sets are unioned per key.
    pub fn import(&mut self, source: &Metadata, tags: bool, properties: bool) {
        if properties {
            for (k, v) in source.properties.iter() {
                self.properties.insert(k, v.clone());
            }
        }
        if tags {
            self.keyed_tags.union_with(&source.keyed_tags);
        }
    }

    /// Projects this metadata's properties and tags onto `obj` as sibling
    /// JSON fields: properties become string fields, unkeyed
    /// tags become an array under `tags` (written only if non-empty), and
    /// keyed tags become an object under `keytags` whose values collapse
    /// to a single string when the set has exactly one element.
    pub fn add_to_object(&self, obj: &mut Map<String, Value>) {
        for (k, v) in self.properties.iter() {
            obj.insert(k.clone(), Value::String(v.clone()));
        }
        if let Some(unkeyed) = self.try_get_tags(Self::UNKEYED) {
            let arr: Vec<Value> = unkeyed.iter().map(|t| Value::String(t.clone())).collect();
            obj.insert("tags".to_string(), Value::Array(arr));
        }
        let mut keytags = Map::new();
        for key in self.keyed_tags.sorted_keys() {
            if key == Self::UNKEYED {
                continue;
            }
            if let Some(set) = self.try_get_tags(key) {
                keytags.insert(key.clone(), tag_set_to_value(set));
            }
        }
        if !keytags.is_empty() {
            obj.insert("keytags".to_string(), Value::Object(keytags));
        }
    }

    /// Reconstructs a `Metadata` from a JSON object. `reserved`
    /// lists field names that are structural at this level (e.g. `key`,
    /// `targets` on a node) and must not be treated as properties; `tags`
    /// and `keytags` are always reserved. Malformed entries (non-string
    /// properties, non-string tag elements) are silently skipped. A
    /// single bad tag must not lose the rest of the graph.
    pub fn fill_from_object(obj: &Map<String, Value>, reserved: &HashSet<&str>) -> Self {
        let mut meta = Self::new();
        for (k, v) in obj.iter() {
            if k == "tags" || k == "keytags" || reserved.contains(k.as_str()) {
                continue;
            }
            if let Value::String(s) = v {
                meta.set_property(k, Some(s));
            }
        }
        if let Some(Value::Array(arr)) = obj.get("tags") {
            for item in arr {
                if let Value::String(s) = item {
                    meta.tags(Self::UNKEYED).insert(s);
                }
            }
        }
        if let Some(Value::Object(keytags)) = obj.get("keytags") {
            for (key, value) in keytags.iter() {
                match value {
                    Value::String(s) => {
                        meta.tags(key).insert(s);
                    }
                    Value::Array(arr) => {
                        for item in arr {
                            if let Value::String(s) = item {
                                meta.tags(key).insert(s);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        meta
    }
}

fn tag_set_to_value(set: &KeySet) -> Value {
    if set.len() == 1 {
        Value::String(set.iter().next().unwrap().clone())
    } else {
        Value::Array(set.iter().map(|t| Value::String(t.clone())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_property_removes_on_none() {
        let mut m = Metadata::new();
        m.set_property("module", Some("m1"));
        assert_eq!(m.get_property("module"), Some("m1"));
        m.set_property("module", None);
        assert_eq!(m.get_property("MODULE"), None);
    }

    #[test]
    fn empty_tag_set_reads_as_absent() {
        let mut m = Metadata::new();
        m.tags("deps");
        assert!(m.try_get_tags("deps").is_none());
        m.tags("deps").insert("x");
        assert!(m.try_get_tags("deps").is_some());
    }

    #[test]
    fn roundtrip_via_object() {
        let mut m = Metadata::new();
        m.set_property("module", Some("m1"));
        m.tags(Metadata::UNKEYED).insert("seed");
        m.tags("color").insert("red");
        m.tags("color").insert("blue");

        let mut obj = Map::new();
        m.add_to_object(&mut obj);
        assert_eq!(obj.get("module"), Some(&Value::String("m1".into())));
        assert_eq!(obj.get("tags"), Some(&Value::Array(vec!["seed".into()])));

        let reserved = HashSet::new();
        let back = Metadata::fill_from_object(&obj, &reserved);
        assert_eq!(back.get_property("module"), Some("m1"));
        assert!(back.try_get_tags(Metadata::UNKEYED).unwrap().contains("seed"));
        assert_eq!(back.try_get_tags("color").unwrap().len(), 2);
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let mut obj = Map::new();
        obj.insert("good".into(), Value::String("ok".into()));
        obj.insert("bad".into(), Value::Number(3.into()));
        obj.insert("tags".into(), Value::Array(vec![Value::String("t".into()), Value::Bool(true)]));
        let reserved = HashSet::new();
        let meta = Metadata::fill_from_object(&obj, &reserved);
        assert_eq!(meta.get_property("good"), Some("ok"));
        assert_eq!(meta.get_property("bad"), None);
        assert_eq!(meta.try_get_tags(Metadata::UNKEYED).unwrap().len(), 1);
    }
}
