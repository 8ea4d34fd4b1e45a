//! The construction protocol shared by every record type.
//!
//! A [`Contents`] collects constructor input in exactly one style (keyword
//! fields, key/value pairs or a source mapping) and turns it into a freshly
//! allocated [`Mapping`] whose kinds come from [`crate::resolve`].

use tracing::debug;

use crate::attribute::translate_attribute;
use crate::datatype::{Key, Kind, Symbol, Value};
use crate::error::{FlexError, Result};
use crate::mapping::Mapping;
use crate::resolve::{Hints, Observed, Resolved, resolve};

#[derive(Debug, Clone, Default)]
enum Source {
    #[default]
    Nothing,
    Fields(Vec<(String, Value)>),
    Pairs(Vec<(Key, Value)>),
    Mapping(Mapping),
}

impl Source {
    fn style(&self) -> &'static str {
        match self {
            Source::Nothing => "no input",
            Source::Fields(_) => "keyword fields",
            Source::Pairs(_) => "key/value pairs",
            Source::Mapping(_) => "a source mapping",
        }
    }
}

/// Constructor input for a record.
#[derive(Debug, Clone, Default)]
pub struct Contents {
    source: Source,
    hints: Hints,
    // the first style clash, reported when building
    clash: Option<(&'static str, &'static str)>,
}

impl Contents {
    pub fn new() -> Self {
        Self::default()
    }
    /// Adds a keyword-style field. The name must be a valid symbol.
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let Source::Nothing = self.source {
            self.source = Source::Fields(Vec::new());
        }
        match &mut self.source {
            Source::Fields(fields) => fields.push((name.to_string(), value.into())),
            other => {
                self.clash.get_or_insert((other.style(), "keyword fields"));
            }
        }
        self
    }
    /// Adds a key/value pair. Repeated keys keep the last value.
    pub fn pair(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        if let Source::Nothing = self.source {
            self.source = Source::Pairs(Vec::new());
        }
        match &mut self.source {
            Source::Pairs(pairs) => pairs.push((key.into(), value.into())),
            other => {
                self.clash.get_or_insert((other.style(), "key/value pairs"));
            }
        }
        self
    }
    pub fn pairs<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        let mut contents = self;
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_none() {
            // an empty sequence still fixes the style
            match contents.source {
                Source::Nothing => contents.source = Source::Pairs(Vec::new()),
                Source::Pairs(_) => {}
                ref other => {
                    let style = other.style();
                    contents.clash.get_or_insert((style, "key/value pairs"));
                }
            }
        }
        for (k, v) in pairs {
            contents = contents.pair(k, v);
        }
        contents
    }
    /// Copies every entry of `mapping` (one level deep) into the new record.
    pub fn mapping(mut self, mapping: &Mapping) -> Self {
        if let Source::Nothing = self.source {
            self.source = Source::Mapping(mapping.clone());
        } else {
            self.clash.get_or_insert((self.source.style(), "a source mapping"));
        }
        self
    }
    pub fn key_kind(mut self, kind: Kind) -> Self {
        self.hints.key_kind = Some(kind);
        self
    }
    pub fn value_kind(mut self, kind: Kind) -> Self {
        self.hints.value_kind = Some(kind);
        self
    }
    /// Tighten the value kind to the one kind every supplied value shares.
    pub fn narrow_values(mut self) -> Self {
        self.hints.narrow_values = true;
        self
    }
    /// Pins kinds a record type fixes for all of its instances. Explicit kinds
    /// that disagree with the pinned ones are rejected.
    pub fn pin(mut self, key_kind: Option<Kind>, value_kind: Option<Kind>) -> Result<Self> {
        if let Some(pinned) = key_kind {
            match self.hints.key_kind {
                Some(asked) if asked != pinned => {
                    return Err(FlexError::IncompatibleConversion {
                        what: "explicit key kind".to_string(),
                        expected: pinned,
                        found: asked,
                    });
                }
                _ => self.hints.key_kind = Some(pinned),
            }
        }
        if let Some(pinned) = value_kind {
            match self.hints.value_kind {
                Some(asked) if asked != pinned => {
                    return Err(FlexError::IncompatibleConversion {
                        what: "explicit value kind".to_string(),
                        expected: pinned,
                        found: asked,
                    });
                }
                _ => self.hints.value_kind = Some(pinned),
            }
        }
        Ok(self)
    }
    /// Allocates and fills the backing mapping. Nothing is allocated when
    /// the input mixes styles.
    pub fn build(self) -> Result<Mapping> {
        if let Some((first, second)) = self.clash {
            return Err(FlexError::AmbiguousConstruction { first, second });
        }
        let style = self.source.style();
        match self.source {
            Source::Nothing => {
                let resolved = resolve(&self.hints, Observed::Nothing);
                log_resolved(style, &resolved);
                Mapping::new(resolved.key_kind, resolved.value_kind)
            }
            Source::Fields(fields) => {
                let fields = fields
                    .into_iter()
                    .map(|(name, value)| -> Result<(Symbol, Value)> {
                        Ok((Symbol::new(&name)?, value))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let resolved = resolve(&self.hints, Observed::Fields(&fields));
                log_resolved(style, &resolved);
                let mut mapping = Mapping::new(resolved.key_kind, resolved.value_kind)?;
                for (name, value) in fields {
                    let key = if Kind::Symbol.is_subkind_of(resolved.key_kind) {
                        Key::Symbol(name)
                    } else {
                        let name = name.as_str();
                        translate_attribute(resolved.key_kind, name, "keyword construction")?
                    };
                    mapping.insert(key, value)?;
                }
                Ok(mapping)
            }
            Source::Pairs(pairs) => {
                let resolved = resolve(&self.hints, Observed::Pairs(&pairs));
                log_resolved(style, &resolved);
                let mut mapping = Mapping::new(resolved.key_kind, resolved.value_kind)?;
                for (key, value) in pairs {
                    mapping.insert(key, value)?;
                }
                Ok(mapping)
            }
            Source::Mapping(source) => {
                let resolved = resolve(&self.hints, Observed::Mapping(&source));
                log_resolved(style, &resolved);
                let mut mapping = Mapping::new(resolved.key_kind, resolved.value_kind)?;
                for (key, value) in source.iter() {
                    mapping.insert(key.clone(), value.clone())?;
                }
                Ok(mapping)
            }
        }
    }
}

fn log_resolved(style: &str, resolved: &Resolved) {
    debug!(
        style,
        key_kind = %resolved.key_kind,
        value_kind = %resolved.value_kind,
        "building mapping"
    );
}
