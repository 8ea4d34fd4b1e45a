//! Attribute-style access layered over key-based access.
//!
//! An attribute name becomes a key by a rule chosen solely from the record's
//! key kind. Records keyed by anything other than symbols or text have no rule,
//! and fail on first attribute access rather than at construction.

use crate::container::Flexible;
use crate::datatype::{Key, Kind, Symbol, Value};
use crate::error::{FlexError, Result};

pub fn translate_attribute(key_kind: Kind, name: &str, type_name: &str) -> Result<Key> {
    match key_kind {
        Kind::Symbol => Ok(Key::Symbol(Symbol::new(name)?)),
        Kind::Text => Ok(Key::Text(Symbol::new(name)?.as_str().to_string())),
        _ => Err(FlexError::UnsupportedKeyConversion {
            attribute: name.to_string(),
            key_kind,
            type_name: type_name.to_string(),
        }),
    }
}

/// `record.attr("dx")` reads what `record.get(key)` reads for the translated key.
pub trait AttributeAccess: Flexible {
    fn attribute_key(&self, name: &str) -> Result<Key> {
        translate_attribute(self.key_kind(), name, &self.record_type().to_string())
    }
    fn attr(&self, name: &str) -> Result<Value> {
        let key = self.attribute_key(name)?;
        self.get(key)
    }
    fn set_attr(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        let key = self.attribute_key(name)?;
        self.set(key, value)
    }
    fn remove_attr(&mut self, name: &str) -> Result<&mut Self> {
        let key = self.attribute_key(name)?;
        self.remove(key)
    }
    fn has_attr(&self, name: &str) -> Result<bool> {
        let key = self.attribute_key(name)?;
        Ok(self.contains(key))
    }
}

impl<T: Flexible> AttributeAccess for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_depends_only_on_key_kind() {
        assert_eq!(
            translate_attribute(Kind::Symbol, "dx", "Record").unwrap(),
            Key::Symbol(Symbol::new("dx").unwrap())
        );
        assert_eq!(
            translate_attribute(Kind::Text, "dx", "Record").unwrap(),
            Key::Text("dx".to_string())
        );
        for kind in [Kind::Int, Kind::Bool, Kind::Any] {
            let err = translate_attribute(kind, "dx", "Record").unwrap_err();
            assert!(matches!(
                err,
                FlexError::UnsupportedKeyConversion { key_kind, .. } if key_kind == kind
            ));
        }
    }

    #[test]
    fn attribute_names_are_symbols() {
        let err = translate_attribute(Kind::Text, "not a name", "Record").unwrap_err();
        assert_eq!(err, FlexError::InvalidSymbol("not a name".to_string()));
    }
}
