// used to print out readable forms of a record
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::contents::Contents;
use crate::datatype::{DataType, Key, Kind, Value};
use crate::error::{FlexError, Result};
use crate::mapping::{Mapping, MappingHandle};
use crate::present::{Presentation, render};

// ------------- Storage -------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Only this record can reach its mapping.
    Exclusive,
    /// The mapping is aliased through a [`MappingHandle`].
    Shared,
}

/// The one backing mapping a record holds, tagged by how it is owned.
#[derive(Debug)]
pub enum Storage {
    Owned(Mapping),
    Shared(MappingHandle),
}

impl Storage {
    pub fn ownership(&self) -> Ownership {
        match self {
            Storage::Owned(_) => Ownership::Exclusive,
            Storage::Shared(_) => Ownership::Shared,
        }
    }
    pub fn with<R>(&self, f: impl FnOnce(&Mapping) -> R) -> R {
        match self {
            Storage::Owned(mapping) => f(mapping),
            Storage::Shared(handle) => f(&handle.borrow()),
        }
    }
    pub fn with_mut<R>(&mut self, f: impl FnOnce(&mut Mapping) -> R) -> R {
        match self {
            Storage::Owned(mapping) => f(mapping),
            Storage::Shared(handle) => f(&mut handle.borrow_mut()),
        }
    }
    /// Turns owned storage into shared storage in place and hands out a handle.
    pub fn share(&mut self) -> MappingHandle {
        if let Storage::Shared(handle) = self {
            return Rc::clone(handle);
        }
        let owned = std::mem::replace(self, Storage::Owned(Mapping::empty()));
        let handle = owned.into_handle();
        *self = Storage::Shared(Rc::clone(&handle));
        handle
    }
    pub fn into_handle(self) -> MappingHandle {
        match self {
            Storage::Owned(mapping) => mapping.into_shared(),
            Storage::Shared(handle) => handle,
        }
    }
}

// ------------- RecordType -------------

/// A record variant together with the kinds its mapping was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordType {
    pub name: &'static str,
    pub key_kind: Kind,
    pub value_kind: Kind,
}
impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{{{}, {}}}", self.name, self.key_kind, self.value_kind)
    }
}

// ------------- Merge sources -------------

/// Anything whose entries can be merged into a record.
pub trait MergeSource {
    fn kinds(&self) -> (Kind, Kind);
    fn collect_entries(&self) -> Vec<(Key, Value)>;
}

impl MergeSource for Mapping {
    fn kinds(&self) -> (Kind, Kind) {
        (self.key_kind(), self.value_kind())
    }
    fn collect_entries(&self) -> Vec<(Key, Value)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<T: Flexible> MergeSource for T {
    fn kinds(&self) -> (Kind, Kind) {
        (self.key_kind(), self.value_kind())
    }
    fn collect_entries(&self) -> Vec<(Key, Value)> {
        self.storage().with(|m| m.collect_entries())
    }
}

// ------------- Flexible -------------

/// The capability every record variant implements.
///
/// Variants only supply access to their [`Storage`]; the rest of the record
/// contract is provided here and works purely through that access. Variants
/// may pin their key and value kinds, which then hold for every instance.
pub trait Flexible: Sized {
    const TYPE_NAME: &'static str;
    const KEY_KIND: Option<Kind> = None;
    const VALUE_KIND: Option<Kind> = None;

    fn storage(&self) -> &Storage;
    fn storage_mut(&mut self) -> &mut Storage;
    fn from_storage(storage: Storage) -> Self;
    fn into_storage(self) -> Storage;

    /// Builds a record with its own freshly allocated mapping.
    fn construct(contents: Contents) -> Result<Self> {
        let mapping = contents.pin(Self::KEY_KIND, Self::VALUE_KIND)?.build()?;
        Ok(Self::from_storage(Storage::Owned(mapping)))
    }
    /// Builds a record aliasing `handle`, see [`crate::wrap::wrap`].
    fn wrap(handle: &MappingHandle) -> Result<Self> {
        crate::wrap::wrap(handle)
    }

    fn key_kind(&self) -> Kind {
        self.storage().with(|m| m.key_kind())
    }
    fn value_kind(&self) -> Kind {
        self.storage().with(|m| m.value_kind())
    }
    fn record_type(&self) -> RecordType {
        let (key_kind, value_kind) = self.storage().with(|m| (m.key_kind(), m.value_kind()));
        RecordType {
            name: Self::TYPE_NAME,
            key_kind,
            value_kind,
        }
    }
    fn ownership(&self) -> Ownership {
        self.storage().ownership()
    }

    fn len(&self) -> usize {
        self.storage().with(|m| m.len())
    }
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn contains(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.storage().with(|m| m.contains(&key))
    }
    fn get(&self, key: impl Into<Key>) -> Result<Value> {
        let key = key.into();
        self.storage()
            .with(|m| m.get(&key).cloned())
            .ok_or_else(|| FlexError::NotFound { key })
    }
    /// Reads a value as a native Rust type.
    fn get_as<T: DataType>(&self, key: impl Into<Key>) -> Result<T> {
        let key = key.into();
        let value = self.get(&key)?;
        value.to::<T>().ok_or_else(|| FlexError::IncompatibleConversion {
            what: format!("value for key {}", key),
            expected: T::KIND,
            found: value.kind(),
        })
    }
    fn get_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.get(key).unwrap_or_else(|_| default.into())
    }
    /// Inserts or overwrites. Fails only when the key or value does not fit
    /// the record's kinds.
    fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Result<&mut Self> {
        let (key, value) = (key.into(), value.into());
        self.storage_mut().with_mut(|m| m.insert(key, value))?;
        Ok(self)
    }
    fn get_or_insert(&mut self, key: impl Into<Key>, default: impl Into<Value>) -> Result<Value> {
        let (key, default) = (key.into(), default.into());
        self.storage_mut().with_mut(|m| m.get_or_insert(key, default))
    }
    fn remove(&mut self, key: impl Into<Key>) -> Result<&mut Self> {
        let key = key.into();
        match self.storage_mut().with_mut(|m| m.remove(&key)) {
            Some(_) => Ok(self),
            None => Err(FlexError::NotFound { key }),
        }
    }
    /// Removes and returns the value under `key`.
    fn pop(&mut self, key: impl Into<Key>) -> Result<Value> {
        let key = key.into();
        self.storage_mut()
            .with_mut(|m| m.remove(&key))
            .ok_or_else(|| FlexError::NotFound { key })
    }
    fn pop_or(&mut self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.pop(key).unwrap_or_else(|_| default.into())
    }
    fn clear(&mut self) -> &mut Self {
        self.storage_mut().with_mut(|m| m.clear());
        self
    }

    fn entries(&self) -> Entries<'_> {
        Entries::new(self.storage())
    }
    fn keys(&self) -> Keys<'_> {
        Keys(self.entries())
    }
    fn values(&self) -> Values<'_> {
        Values(self.entries())
    }

    /// A new record holding this record's entries followed by each source's,
    /// later sources winning. Kinds widen to cover every participant unless
    /// the variant pins them.
    fn merged(&self, sources: &[&dyn MergeSource]) -> Result<Self> {
        let (mut key_kind, mut value_kind) = (self.key_kind(), self.value_kind());
        for source in sources {
            let (k, v) = source.kinds();
            key_kind = key_kind.join(k);
            value_kind = value_kind.join(v);
        }
        let key_kind = Self::KEY_KIND.unwrap_or(key_kind);
        let value_kind = Self::VALUE_KIND.unwrap_or(value_kind);
        debug!(
            type_name = Self::TYPE_NAME,
            sources = sources.len(),
            %key_kind,
            %value_kind,
            "merging into new record"
        );
        let mut mapping = Mapping::new(key_kind, value_kind)?;
        let own = self.collect_entries();
        let incoming = sources.iter().flat_map(|s| s.collect_entries());
        for (key, value) in own.into_iter().chain(incoming) {
            mapping.insert(key, value)?;
        }
        Ok(Self::from_storage(Storage::Owned(mapping)))
    }
    /// Merges every source into this record in order. Each incoming entry is
    /// checked before anything is written, so a failure leaves the record as it was.
    fn merge_into(&mut self, sources: &[&dyn MergeSource]) -> Result<&mut Self> {
        let incoming: Vec<(Key, Value)> =
            sources.iter().flat_map(|s| s.collect_entries()).collect();
        let admitted = self.storage().with(|m| {
            incoming
                .into_iter()
                .map(|(k, v)| m.admit(k, v))
                .collect::<Result<Vec<_>>>()
        })?;
        debug!(
            type_name = Self::TYPE_NAME,
            sources = sources.len(),
            entries = admitted.len(),
            "merging in place"
        );
        self.storage_mut().with_mut(|m| {
            for (key, value) in admitted {
                trace!(%key, "merge entry");
                m.put(key, value);
            }
        });
        Ok(self)
    }

    /// A new, empty, exclusively owned record with the same kinds.
    fn empty_copy(&self) -> Self {
        Self::from_storage(Storage::Owned(self.storage().with(|m| m.emptied())))
    }
    fn empty_copy_with(&self, key_kind: Option<Kind>, value_kind: Option<Kind>) -> Result<Self> {
        let contents = Contents::new()
            .key_kind(key_kind.unwrap_or(self.key_kind()))
            .value_kind(value_kind.unwrap_or(self.value_kind()));
        Self::construct(contents)
    }
    /// An exclusively owned copy. Nested records stay shared with the original.
    fn copy(&self) -> Self {
        Self::from_storage(Storage::Owned(self.storage().with(|m| m.clone())))
    }
    /// Converts to other declared kinds. Asking for the kinds the record already
    /// has hands back the very same record, storage included.
    fn convert(self, key_kind: Kind, value_kind: Kind) -> Result<Self> {
        if self.key_kind() == key_kind && self.value_kind() == value_kind {
            return Ok(self);
        }
        debug!(
            type_name = Self::TYPE_NAME,
            from = %self.record_type(),
            %key_kind,
            %value_kind,
            "converting record"
        );
        let contents = self.storage().with(|m| Contents::new().mapping(m));
        Self::construct(contents.key_kind(key_kind).value_kind(value_kind))
    }

    /// Shares this record's mapping, turning exclusive storage into shared storage.
    fn share(&mut self) -> MappingHandle {
        self.storage_mut().share()
    }
    fn into_handle(self) -> MappingHandle {
        self.into_storage().into_handle()
    }

    fn render(&self) -> String {
        render(self, &Presentation::default())
    }
    fn render_with(&self, presentation: &Presentation) -> String {
        render(self, presentation)
    }
}

/// Entry-wise equality between any two records.
pub fn same_entries<A: Flexible, B: Flexible>(a: &A, b: &B) -> bool {
    a.storage().with(|x| b.storage().with(|y| x == y))
}

// ------------- Live views -------------

/// Ordered entries of a record, read from the mapping one step at a time.
///
/// Every step looks up the entry following the last one yielded, so the view
/// reflects changes made through another alias of a shared mapping.
#[derive(Clone)]
pub struct Entries<'a> {
    storage: &'a Storage,
    cursor: Option<Key>,
    finished: bool,
}

impl<'a> Entries<'a> {
    fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            cursor: None,
            finished: false,
        }
    }
}

impl Iterator for Entries<'_> {
    type Item = (Key, Value);
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let next = self.storage.with(|m| m.entry_after(self.cursor.as_ref()));
        match next {
            Some((key, value)) => {
                self.cursor = Some(key.clone());
                Some((key, value))
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

#[derive(Clone)]
pub struct Keys<'a>(Entries<'a>);

impl Iterator for Keys<'_> {
    type Item = Key;
    fn next(&mut self) -> Option<Key> {
        self.0.next().map(|(k, _)| k)
    }
}

#[derive(Clone)]
pub struct Values<'a>(Entries<'a>);

impl Iterator for Values<'_> {
    type Item = Value;
    fn next(&mut self) -> Option<Value> {
        self.0.next().map(|(_, v)| v)
    }
}

// ------------- Record -------------

/// The general purpose record. Its kinds are resolved per instance when it is built.
#[derive(Debug)]
pub struct Record {
    storage: Storage,
}

impl Flexible for Record {
    const TYPE_NAME: &'static str = "Record";
    fn storage(&self) -> &Storage {
        &self.storage
    }
    fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }
    fn from_storage(storage: Storage) -> Self {
        Self { storage }
    }
    fn into_storage(self) -> Storage {
        self.storage
    }
}

impl Record {
    /// An empty record with symbolic keys and unconstrained values.
    pub fn new() -> Self {
        Self {
            storage: Storage::Owned(Mapping::empty()),
        }
    }
    pub fn from_fields<'a, V: Into<Value>>(
        fields: impl IntoIterator<Item = (&'a str, V)>,
    ) -> Result<Self> {
        let contents = fields
            .into_iter()
            .fold(Contents::new(), |contents, (name, value)| contents.field(name, value));
        Self::construct(contents)
    }
    pub fn from_pairs<K: Into<Key>, V: Into<Value>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self> {
        Self::construct(Contents::new().pairs(pairs))
    }
    /// Copies `mapping` into a record of its own.
    pub fn from_mapping(mapping: &Mapping) -> Result<Self> {
        Self::construct(Contents::new().mapping(mapping))
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        same_entries(self, other)
    }
}
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
impl From<Record> for Value {
    fn from(record: Record) -> Value {
        Value::Record(record.into_handle())
    }
}
