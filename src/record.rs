//! [`RawRecord`] is the only thing a schema needs from its input.

use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

/// Untyped input that can be asked for a raw value by field name.
///
/// Absence is distinct from a present but empty value: `get()` must only
/// return `None` if the record has no entry for `name` at all.
pub trait RawRecord {
    /// Type of the record's raw values.
    type Value: ?Sized;

    /// Look up the raw value stored under `name`.
    fn get(&self, name: &str) -> Option<&Self::Value>;
}

impl<K, V, S> RawRecord for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    type Value = V;

    fn get(&self, name: &str) -> Option<&V> {
        HashMap::get(self, name)
    }
}

impl<K, V> RawRecord for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
{
    type Value = V;

    fn get(&self, name: &str) -> Option<&V> {
        BTreeMap::get(self, name)
    }
}

/// Key/value pairs, e.g. decoded form data. The first pair for a key wins.
impl<K, V> RawRecord for [(K, V)]
where
    K: AsRef<str>,
{
    type Value = V;

    fn get(&self, name: &str) -> Option<&V> {
        self.iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| value)
    }
}

impl<K, V> RawRecord for Vec<(K, V)>
where
    K: AsRef<str>,
{
    type Value = V;

    fn get(&self, name: &str) -> Option<&V> {
        RawRecord::get(self.as_slice(), name)
    }
}

impl<R> RawRecord for &R
where
    R: RawRecord + ?Sized,
{
    type Value = R::Value;

    fn get(&self, name: &str) -> Option<&Self::Value> {
        (**self).get(name)
    }
}

#[cfg(feature = "json")]
impl RawRecord for serde_json::Map<String, serde_json::Value> {
    type Value = serde_json::Value;

    fn get(&self, name: &str) -> Option<&serde_json::Value> {
        serde_json::Map::get(self, name)
    }
}
