//! Flexrecord – dictionary-backed records with key and attribute-style access.
//!
//! A *record* is a dynamic container whose shape is not fixed in advance. Its
//! entries live in exactly one backing [`Mapping`], which declares a key kind
//! and a value kind at allocation and checks every insertion against them:
//! * A [`Kind`] is a runtime type tag (`Any`, `Number`, `Int`, `Float`, `Text`, `Symbol`, ...).
//! * A [`Key`] is a bool, integer, text or [`Symbol`] (an identifier-like token).
//! * A [`Value`] is anything a record holds, including nested records (held by handle).
//!
//! Entries can be reached by key (`record.get("units")`) or, for records keyed
//! by symbols or text, by attribute name (`record.attr("units")`).
//!
//! ## Modules
//! * [`datatype`] – kinds, symbols, keys and values.
//! * [`resolve`] – picks the kinds a new mapping is allocated with.
//! * [`contents`] – the construction protocol ([`Contents`]).
//! * [`mapping`] – the backing [`Mapping`] and its shared [`MappingHandle`].
//! * [`container`] – the [`Flexible`] capability, [`Storage`] and the general [`Record`].
//! * [`attribute`] – attribute names to keys ([`AttributeAccess`]).
//! * [`wrap`] – records aliasing an existing mapping.
//! * [`extend`] – [`flexible_record!`] for declaring new record variants.
//! * [`present`] – diagnostic rendering.
//! * [`settings`] – layered configuration and logging setup.
//!
//! ## Ownership
//! A record either owns its mapping ([`Storage::Owned`], built by copying input)
//! or shares it ([`Storage::Shared`], built by [`wrap()`]). Writes through a
//! shared record are visible to every other holder of the handle. Records are
//! single threaded; nothing here locks.
//!
//! ## Quick Start
//! ```
//! use flexrecord::{AttributeAccess, Flexible, Kind, Record, Value};
//!
//! let mut survey = Record::from_pairs([
//!     ("units", Value::from("km")),
//!     ("dx", 0.20.into()),
//!     ("dy", 0.15.into()),
//! ])
//! .unwrap();
//! assert_eq!(survey.key_kind(), Kind::Text);
//! survey.set("units", 50).unwrap().remove("dx").unwrap();
//! assert_eq!(survey.attr("units").unwrap(), Value::Int(50));
//! assert!(!survey.contains("dx"));
//! ```

pub mod attribute;
pub mod container;
pub mod contents;
pub mod datatype;
pub mod error;
pub mod extend;
pub mod mapping;
pub mod present;
pub mod resolve;
pub mod settings;
pub mod wrap;

pub use attribute::{AttributeAccess, translate_attribute};
pub use container::{
    Entries, Flexible, Keys, MergeSource, Ownership, Record, RecordType, Storage, Values,
};
pub use contents::Contents;
pub use datatype::{DataType, Key, Kind, Symbol, Value};
pub use error::{FlexError, Result};
pub use mapping::{Mapping, MappingHandle};
pub use present::Presentation;
pub use settings::Settings;
pub use wrap::{wrap, wrap_with};
