use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::Bound;
use std::rc::Rc;

use crate::datatype::{Key, Kind, Value};
use crate::error::{FlexError, Result};

/// A backing mapping that more than one holder can reference.
pub type MappingHandle = Rc<RefCell<Mapping>>;

/// Key-unique associative storage with declared key and value kinds.
///
/// The declared kinds are fixed at allocation. Every insertion is checked
/// against them, so stored entries never drift from the declaration.
#[derive(Debug, Clone)]
pub struct Mapping {
    key_kind: Kind,
    value_kind: Kind,
    entries: BTreeMap<Key, Value>,
}

impl Mapping {
    pub fn new(key_kind: Kind, value_kind: Kind) -> Result<Self> {
        if !key_kind.is_key_kind() {
            return Err(FlexError::NotAKeyKind(key_kind));
        }
        Ok(Self {
            key_kind,
            value_kind,
            entries: BTreeMap::new(),
        })
    }
    /// The empty mapping used when nothing else is known: symbolic keys, any value.
    pub fn empty() -> Self {
        Self {
            key_kind: Kind::Symbol,
            value_kind: Kind::Any,
            entries: BTreeMap::new(),
        }
    }
    /// A new mapping with the same declared kinds and no entries.
    pub fn emptied(&self) -> Self {
        Self {
            key_kind: self.key_kind,
            value_kind: self.value_kind,
            entries: BTreeMap::new(),
        }
    }
    pub fn key_kind(&self) -> Kind {
        self.key_kind
    }
    pub fn value_kind(&self) -> Kind {
        self.value_kind
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn contains(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }
    /// Checks a key/value pair against the declared kinds, widening numbers
    /// where the value bound asks for it.
    pub fn admit(&self, key: Key, value: Value) -> Result<(Key, Value)> {
        if !key.kind().is_subkind_of(self.key_kind) {
            return Err(FlexError::IncompatibleConversion {
                what: format!("key {}", key),
                expected: self.key_kind,
                found: key.kind(),
            });
        }
        let found = value.kind();
        match self.value_kind.coerce(value) {
            Some(value) => Ok((key, value)),
            None => Err(FlexError::IncompatibleConversion {
                what: format!("value for key {}", key),
                expected: self.value_kind,
                found,
            }),
        }
    }
    pub fn insert(&mut self, key: Key, value: Value) -> Result<Option<Value>> {
        let (key, value) = self.admit(key, value)?;
        Ok(self.entries.insert(key, value))
    }
    // only for pairs that already went through `admit`
    pub(crate) fn put(&mut self, key: Key, value: Value) {
        self.entries.insert(key, value);
    }
    /// Inserts `default` when `key` is vacant and returns the stored value.
    pub fn get_or_insert(&mut self, key: Key, default: Value) -> Result<Value> {
        if let Some(value) = self.entries.get(&key) {
            return Ok(value.clone());
        }
        let (key, value) = self.admit(key, default)?;
        match self.entries.entry(key) {
            Entry::Vacant(e) => Ok(e.insert(value).clone()),
            Entry::Occupied(e) => Ok(e.get().clone()),
        }
    }
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.entries.remove(key)
    }
    pub fn clear(&mut self) {
        self.entries.clear();
    }
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }
    /// The first entry strictly after `after`, or the first entry overall.
    pub fn entry_after(&self, after: Option<&Key>) -> Option<(Key, Value)> {
        let next = match after {
            None => self.entries.iter().next(),
            Some(key) => self
                .entries
                .range::<Key, _>((Bound::Excluded(key), Bound::Unbounded))
                .next(),
        };
        next.map(|(k, v)| (k.clone(), v.clone()))
    }
    pub fn into_shared(self) -> MappingHandle {
        Rc::new(RefCell::new(self))
    }
}

// Equal mappings hold equal entries, whatever their declared kinds.
impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_is_checked_against_declared_kinds() {
        let mut m = Mapping::new(Kind::Text, Kind::Float).unwrap();
        assert_eq!(m.insert("dx".into(), Value::Int(1)).unwrap(), None);
        assert_eq!(m.get(&"dx".into()), Some(&Value::Float(1.0)));
        assert!(matches!(
            m.insert(Key::Int(1), Value::Float(0.5)),
            Err(FlexError::IncompatibleConversion { expected: Kind::Text, found: Kind::Int, .. })
        ));
        assert!(matches!(
            m.insert("units".into(), "km".into()),
            Err(FlexError::IncompatibleConversion { expected: Kind::Float, found: Kind::Text, .. })
        ));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn only_key_kinds_can_key_a_mapping() {
        assert_eq!(Mapping::new(Kind::Float, Kind::Any), Err(FlexError::NotAKeyKind(Kind::Float)));
        assert!(Mapping::new(Kind::Any, Kind::Any).is_ok());
    }

    #[test]
    fn entry_after_walks_in_key_order() {
        let mut m = Mapping::new(Kind::Int, Kind::Any).unwrap();
        for i in [3, 1, 2] {
            m.insert(Key::Int(i), Value::Int(i * 10)).unwrap();
        }
        let first = m.entry_after(None).unwrap();
        assert_eq!(first, (Key::Int(1), Value::Int(10)));
        let second = m.entry_after(Some(&first.0)).unwrap();
        assert_eq!(second.0, Key::Int(2));
        assert_eq!(m.entry_after(Some(&Key::Int(3))), None);
    }
}
