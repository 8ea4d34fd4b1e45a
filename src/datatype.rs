// used to print out readable forms of kinds, keys and values
use std::fmt;
// symbols share their text, records share their storage
use std::rc::Rc;

// so regular expressions don't have to be recompiled
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{FlexError, Result};
use crate::mapping::MappingHandle;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*!?$").unwrap();
}

// ------------- Kind -------------

/// Runtime type tag for keys and values.
///
/// Kinds form a small lattice rooted at `Any`. `Number` is the only abstract
/// kind below the root and sits above `Int` and `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Any,
    Number,
    Int,
    Float,
    Bool,
    Text,
    Symbol,
    Nothing,
    List,
    Record,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Any => "Any",
            Kind::Number => "Number",
            Kind::Int => "Int",
            Kind::Float => "Float",
            Kind::Bool => "Bool",
            Kind::Text => "Text",
            Kind::Symbol => "Symbol",
            Kind::Nothing => "Nothing",
            Kind::List => "List",
            Kind::Record => "Record",
        }
    }
    pub fn parent(&self) -> Option<Kind> {
        match self {
            Kind::Any => None,
            Kind::Int | Kind::Float => Some(Kind::Number),
            _ => Some(Kind::Any),
        }
    }
    /// True when `self` is `other` or one of its descendants.
    pub fn is_subkind_of(&self, other: Kind) -> bool {
        let mut current = Some(*self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }
    /// The most specific kind both `self` and `other` descend from.
    pub fn join(&self, other: Kind) -> Kind {
        let mut current = Some(*self);
        while let Some(kind) = current {
            if other.is_subkind_of(kind) {
                return kind;
            }
            current = kind.parent();
        }
        Kind::Any
    }
    pub fn is_key_kind(&self) -> bool {
        matches!(
            self,
            Kind::Any | Kind::Symbol | Kind::Text | Kind::Int | Kind::Bool
        )
    }
    /// Fits `value` under this kind as a bound. Numeric widening from `Int`
    /// into `Float` is the only conversion; everything else must already fit.
    pub fn coerce(&self, value: Value) -> Option<Value> {
        if value.kind().is_subkind_of(*self) {
            return Some(value);
        }
        match (value, self) {
            (Value::Int(i), Kind::Float) => Some(Value::Float(i as f64)),
            _ => None,
        }
    }
}
impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Symbol -------------

/// An identifier-like token, the key kind attribute names map to directly.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Rc<str>);

impl Symbol {
    pub fn new(name: &str) -> Result<Symbol> {
        if IDENTIFIER.is_match(name) {
            Ok(Symbol(Rc::from(name)))
        } else {
            Err(FlexError::InvalidSymbol(name.to_string()))
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl TryFrom<&str> for Symbol {
    type Error = FlexError;
    fn try_from(name: &str) -> Result<Symbol> {
        Symbol::new(name)
    }
}
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

// ------------- Key -------------

/// A backing mapping key. Ordering is by kind first, then naturally within a kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Text(String),
    Symbol(Symbol),
}

impl Key {
    pub fn kind(&self) -> Kind {
        match self {
            Key::Bool(_) => Kind::Bool,
            Key::Int(_) => Kind::Int,
            Key::Text(_) => Kind::Text,
            Key::Symbol(_) => Kind::Symbol,
        }
    }
}
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{}", b),
            Key::Int(i) => write!(f, "{}", i),
            Key::Text(s) => write!(f, "{}", s),
            Key::Symbol(s) => write!(f, "{}", s),
        }
    }
}
impl From<Symbol> for Key {
    fn from(s: Symbol) -> Key {
        Key::Symbol(s)
    }
}
impl From<&Symbol> for Key {
    fn from(s: &Symbol) -> Key {
        Key::Symbol(s.clone())
    }
}
impl From<&str> for Key {
    fn from(s: &str) -> Key {
        Key::Text(s.to_string())
    }
}
impl From<String> for Key {
    fn from(s: String) -> Key {
        Key::Text(s)
    }
}
impl From<i64> for Key {
    fn from(i: i64) -> Key {
        Key::Int(i)
    }
}
impl From<i32> for Key {
    fn from(i: i32) -> Key {
        Key::Int(i as i64)
    }
}
impl From<bool> for Key {
    fn from(b: bool) -> Key {
        Key::Bool(b)
    }
}
impl From<&Key> for Key {
    fn from(k: &Key) -> Key {
        k.clone()
    }
}

// ------------- Value -------------

/// Anything a record can hold. Nested records are held by handle, so copying
/// a value shares the nested storage rather than duplicating it.
#[derive(Debug, Clone)]
pub enum Value {
    Nothing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Symbol(Symbol),
    List(Vec<Value>),
    Record(MappingHandle),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nothing => Kind::Nothing,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Text(_) => Kind::Text,
            Value::Symbol(_) => Kind::Symbol,
            Value::List(_) => Kind::List,
            Value::Record(_) => Kind::Record,
        }
    }
    /// Typed extraction, see [`DataType`].
    pub fn to<T: DataType>(&self) -> Option<T> {
        T::extract(self)
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_handle(&self) -> Option<&MappingHandle> {
        match self {
            Value::Record(handle) => Some(handle),
            _ => None,
        }
    }
}
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nothing, Value::Nothing) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            _ => false,
        }
    }
}
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nothing => write!(f, "nothing"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Symbol(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                let items: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Record(handle) => write!(f, "{}", handle.borrow()),
        }
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}
impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}
impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Int(i as i64)
    }
}
impl From<f64> for Value {
    fn from(x: f64) -> Value {
        Value::Float(x)
    }
}
impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}
impl From<Symbol> for Value {
    fn from(s: Symbol) -> Value {
        Value::Symbol(s)
    }
}
impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::List(items)
    }
}
impl From<MappingHandle> for Value {
    fn from(handle: MappingHandle) -> Value {
        Value::Record(handle)
    }
}
impl From<()> for Value {
    fn from(_: ()) -> Value {
        Value::Nothing
    }
}

// ------------- Data Types --------------

/// Native Rust types a [`Value`] can be extracted into.
pub trait DataType: Sized {
    // static stuff which needs to be implemented downstream
    const KIND: Kind;
    fn extract(value: &Value) -> Option<Self>;
}

impl DataType for bool {
    const KIND: Kind = Kind::Bool;
    fn extract(value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}
impl DataType for i64 {
    const KIND: Kind = Kind::Int;
    fn extract(value: &Value) -> Option<i64> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}
impl DataType for f64 {
    const KIND: Kind = Kind::Float;
    fn extract(value: &Value) -> Option<f64> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}
impl DataType for String {
    const KIND: Kind = Kind::Text;
    fn extract(value: &Value) -> Option<String> {
        value.as_text().map(str::to_string)
    }
}
impl DataType for Symbol {
    const KIND: Kind = Kind::Symbol;
    fn extract(value: &Value) -> Option<Symbol> {
        match value {
            Value::Symbol(s) => Some(s.clone()),
            _ => None,
        }
    }
}
