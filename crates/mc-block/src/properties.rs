//! Immutable property mapping of a block variant.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Complete property assignment of a variant, ordered by property name.
///
/// Cloning shares the underlying map, so composite blocks built from a
/// canonical variant reuse its mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Properties(Arc<BTreeMap<String, String>>);

impl Properties {
    pub fn new(map: BTreeMap<String, String>) -> Self {
        Self(Arc::new(map))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// Owned copy of the mapping, used as the base of an overlay.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        (*self.0).clone()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Formats as `k=v,k=v`.
pub(crate) fn describe(map: &BTreeMap<String, String>) -> String {
    map.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", describe(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_insertion_order() {
        let a: Properties = [("facing", "north"), ("half", "top")].into_iter().collect();
        let b: Properties = [("half", "top"), ("facing", "north")].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "[facing=north,half=top]");
    }

    #[test]
    fn different_values_are_not_equal() {
        let a: Properties = [("lit", "true")].into_iter().collect();
        let b: Properties = [("lit", "false")].into_iter().collect();
        assert_ne!(a, b);
    }

    #[test]
    fn lookups() {
        let p: Properties = [("lit", "true")].into_iter().collect();
        assert_eq!(p.get("lit"), Some("true"));
        assert_eq!(p.get("facing"), None);
        assert!(p.contains_key("lit"));
        assert_eq!(p.len(), 1);
        assert!(Properties::default().is_empty());
        assert_eq!(p.iter().collect::<Vec<_>>(), vec![("lit", "true")]);
    }
}
