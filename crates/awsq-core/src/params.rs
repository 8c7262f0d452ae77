//! Ordered wire parameters for one request.

use crate::signing::url_encode;

/// Ordered `name -> value` mapping with unique names.
///
/// Insertion order is the order of the request body; signing re-sorts.
/// Façades only insert parameters that are set, so absent values never
/// reach the signer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    pairs: Vec<(String, String)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set of parameters starting with `Action=<action>`.
    pub fn for_action(action: &str) -> Self {
        let mut p = Self::new();
        p.insert("Action", action);
        p
    }

    /// Insert or replace. A replaced value keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((name, value)),
        }
        self
    }

    /// Insert only when `value` is set.
    pub fn insert_opt<V: ToString>(&mut self, name: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.insert(name, v.to_string());
        }
        self
    }

    pub fn insert_bool(&mut self, name: &str, value: bool) -> &mut Self {
        self.insert(name, if value { "true" } else { "false" })
    }

    /// Flatten a list as `prefix.1`, `prefix.2`, ...
    pub fn insert_list<I, V>(&mut self, prefix: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for (i, item) in items.into_iter().enumerate() {
            self.insert(format!("{}.{}", prefix, i + 1), item);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Request body: `name=value` pairs in insertion order, url-encoded, joined by `&`.
    pub fn to_body(&self) -> String {
        let mut out = String::with_capacity(512);
        for (i, (k, v)) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(&url_encode(k));
            out.push('=');
            out.push_str(&url_encode(v));
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut p = ParameterSet::new();
        for (k, v) in iter {
            p.insert(k, v);
        }
        p
    }
}
