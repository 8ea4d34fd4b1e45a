//! Picks the key and value kinds a freshly built mapping is allocated with.
//!
//! Rules, in order of precedence:
//! 1. kinds given explicitly by the caller are used verbatim;
//! 2. keyword fields always produce symbolic keys;
//! 3. pairs produce the join of the observed key kinds (all-textual keys stay `Text`);
//! 4. a source mapping passes on its declared key kind;
//! 5. values are unconstrained (`Any`) unless narrowing was asked for and every
//!    observed value shares one concrete kind tighter than the current bound.

use crate::datatype::{Key, Kind, Symbol, Value};
use crate::mapping::Mapping;

/// Caller supplied overrides for resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hints {
    pub key_kind: Option<Kind>,
    pub value_kind: Option<Kind>,
    pub narrow_values: bool,
}

/// The construction input the kinds are inferred from.
#[derive(Debug, Clone, Copy)]
pub enum Observed<'a> {
    Nothing,
    Fields(&'a [(Symbol, Value)]),
    Pairs(&'a [(Key, Value)]),
    Mapping(&'a Mapping),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub key_kind: Kind,
    pub value_kind: Kind,
}

pub fn resolve(hints: &Hints, observed: Observed) -> Resolved {
    let key_kind = hints.key_kind.unwrap_or_else(|| match observed {
        Observed::Nothing | Observed::Fields(_) => Kind::Symbol,
        Observed::Pairs(pairs) => common_key_kind(pairs.iter().map(|(k, _)| k)),
        Observed::Mapping(m) => m.key_kind(),
    });
    let value_kind = hints.value_kind.unwrap_or_else(|| {
        if !hints.narrow_values {
            return Kind::Any;
        }
        let (bound, narrowed) = match observed {
            Observed::Nothing => (Kind::Any, None),
            Observed::Fields(fields) => {
                (Kind::Any, common_value_kind(fields.iter().map(|(_, v)| v)))
            }
            Observed::Pairs(pairs) => (Kind::Any, common_value_kind(pairs.iter().map(|(_, v)| v))),
            Observed::Mapping(m) => (m.value_kind(), common_value_kind(m.iter().map(|(_, v)| v))),
        };
        match narrowed {
            Some(kind) if kind != bound && kind.is_subkind_of(bound) => kind,
            _ => Kind::Any,
        }
    });
    Resolved {
        key_kind,
        value_kind,
    }
}

/// Most specific common kind of the given keys, `Symbol` when there are none.
pub fn common_key_kind<'a>(keys: impl Iterator<Item = &'a Key>) -> Kind {
    let kinds: Vec<Kind> = keys.map(Key::kind).collect();
    if kinds.is_empty() {
        return Kind::Symbol;
    }
    // textual keys never loosen past Text
    if kinds.iter().all(|k| *k == Kind::Text) {
        return Kind::Text;
    }
    kinds[1..].iter().fold(kinds[0], |acc, k| acc.join(*k))
}

/// The single concrete kind shared by every value, if there is one.
pub fn common_value_kind<'a>(mut values: impl Iterator<Item = &'a Value>) -> Option<Kind> {
    let first = values.next()?.kind();
    if values.all(|v| v.kind() == first) {
        Some(first)
    } else {
        None
    }
}
