//! Records that alias an existing mapping instead of copying it.
//!
//! A wrapped record and every other holder of the [`MappingHandle`] see the
//! same entries: a write through one is visible through all of them.

use std::rc::Rc;

use tracing::debug;

use crate::container::{Flexible, Storage};
use crate::datatype::Kind;
use crate::error::{FlexError, Result};
use crate::mapping::MappingHandle;

pub fn wrap<C: Flexible>(mapping: &MappingHandle) -> Result<C> {
    wrap_with(mapping, None, None)
}

/// Wraps `mapping` as a `C`, requiring the mapping's declared kinds to equal
/// both the kinds `C` pins and any kinds asked for here.
pub fn wrap_with<C: Flexible>(
    mapping: &MappingHandle,
    key_kind: Option<Kind>,
    value_kind: Option<Kind>,
) -> Result<C> {
    let (actual_key, actual_value) = {
        let m = mapping.borrow();
        (m.key_kind(), m.value_kind())
    };
    for expected in [C::KEY_KIND, key_kind].into_iter().flatten() {
        if expected != actual_key {
            return Err(FlexError::IncompatibleConversion {
                what: format!("key kind of a mapping wrapped as {}", C::TYPE_NAME),
                expected,
                found: actual_key,
            });
        }
    }
    for expected in [C::VALUE_KIND, value_kind].into_iter().flatten() {
        if expected != actual_value {
            return Err(FlexError::IncompatibleConversion {
                what: format!("value kind of a mapping wrapped as {}", C::TYPE_NAME),
                expected,
                found: actual_value,
            });
        }
    }
    debug!(
        type_name = C::TYPE_NAME,
        key_kind = %actual_key,
        value_kind = %actual_value,
        "wrapping shared mapping"
    );
    Ok(C::from_storage(Storage::Shared(Rc::clone(mapping))))
}
