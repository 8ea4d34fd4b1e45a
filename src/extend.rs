//! Shorthand for declaring record variants.
//!
//! ```
//! use flexrecord::{flexible_record, AttributeAccess, Contents, Flexible, Kind};
//!
//! flexible_record!(
//!     /// Settings for a survey run.
//!     pub struct Survey
//! );
//! flexible_record!(pub struct Labels: Text => Text);
//!
//! let mut survey = Survey::new();
//! survey.set_attr("units", "km").unwrap();
//! assert_eq!(survey.attr("units").unwrap().as_text(), Some("km"));
//!
//! let labels = Labels::from_contents(Contents::new().pair("dx", "east")).unwrap();
//! assert_eq!(labels.value_kind(), Kind::Text);
//! ```

/// Declares a record variant with a private storage field and the
/// [`Flexible`](crate::Flexible) wiring, so it carries the whole record
/// contract. Without kinds the variant has symbolic keys and unconstrained values.
#[macro_export]
macro_rules! flexible_record {
    (@define $(#[$meta:meta])* $vis:vis struct $name:ident : $key:ident => $value:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis struct $name {
            storage: $crate::Storage,
        }

        impl $crate::Flexible for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const KEY_KIND: ::std::option::Option<$crate::Kind> =
                ::std::option::Option::Some($crate::Kind::$key);
            const VALUE_KIND: ::std::option::Option<$crate::Kind> =
                ::std::option::Option::Some($crate::Kind::$value);
            fn storage(&self) -> &$crate::Storage {
                &self.storage
            }
            fn storage_mut(&mut self) -> &mut $crate::Storage {
                &mut self.storage
            }
            fn from_storage(storage: $crate::Storage) -> Self {
                Self { storage }
            }
            fn into_storage(self) -> $crate::Storage {
                self.storage
            }
        }

        impl $name {
            /// Builds a record through the shared construction protocol.
            #[allow(dead_code)]
            $vis fn from_contents(contents: $crate::Contents) -> $crate::Result<Self> {
                <Self as $crate::Flexible>::construct(contents)
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::container::same_entries(self, other)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", <Self as $crate::Flexible>::render(self))
            }
        }

        impl ::std::convert::From<$name> for $crate::Value {
            fn from(record: $name) -> $crate::Value {
                $crate::Value::Record(<$name as $crate::Flexible>::into_handle(record))
            }
        }
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident) => {
        $crate::flexible_record!(@define $(#[$meta])* $vis struct $name: Symbol => Any);

        impl $name {
            /// An empty record.
            #[allow(dead_code)]
            $vis fn new() -> Self {
                <Self as $crate::Flexible>::from_storage($crate::Storage::Owned(
                    $crate::Mapping::empty(),
                ))
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident : $key:ident => $value:ident) => {
        $crate::flexible_record!(@define $(#[$meta])* $vis struct $name: $key => $value);
    };
}
