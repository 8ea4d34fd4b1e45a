use flexrecord::{
    AttributeAccess, FlexError, Flexible, Key, Kind, Mapping, Ownership, Record, Value,
    flexible_record, wrap, wrap_with,
};

flexible_record!(pub struct Fixed);

fn shared_text_mapping() -> flexrecord::MappingHandle {
    let mut mapping = Mapping::new(Kind::Text, Kind::Any).unwrap();
    mapping.insert("units".into(), "km".into()).unwrap();
    mapping.into_shared()
}

#[test]
fn wrapped_records_alias_the_mapping() {
    let handle = shared_text_mapping();
    let mut record: Record = wrap(&handle).unwrap();
    assert_eq!(record.ownership(), Ownership::Shared);
    record.set("dx", 0.2).unwrap();
    assert_eq!(handle.borrow().get(&"dx".into()), Some(&Value::Float(0.2)));
    handle.borrow_mut().insert("dy".into(), 0.15.into()).unwrap();
    assert_eq!(record.get("dy").unwrap(), Value::Float(0.15));
    record.clear();
    assert!(handle.borrow().is_empty());
}

#[test]
fn wrapped_records_take_the_mapping_kinds() {
    let handle = shared_text_mapping();
    let record = Record::wrap(&handle).unwrap();
    assert_eq!(record.key_kind(), Kind::Text);
    assert_eq!(record.attr("units").unwrap(), Value::from("km"));
}

#[test]
fn explicit_kinds_must_match_the_mapping() {
    let handle = shared_text_mapping();
    assert!(wrap_with::<Record>(&handle, Some(Kind::Text), Some(Kind::Any)).is_ok());
    let err = wrap_with::<Record>(&handle, Some(Kind::Symbol), None).unwrap_err();
    assert!(matches!(
        err,
        FlexError::IncompatibleConversion { expected: Kind::Symbol, found: Kind::Text, .. }
    ));
    let err = wrap_with::<Record>(&handle, None, Some(Kind::Float)).unwrap_err();
    assert!(matches!(
        err,
        FlexError::IncompatibleConversion { expected: Kind::Float, found: Kind::Any, .. }
    ));
}

#[test]
fn pinned_variants_check_on_wrap() {
    let err = wrap::<Fixed>(&shared_text_mapping()).unwrap_err();
    assert!(matches!(err, FlexError::IncompatibleConversion { expected: Kind::Symbol, .. }));
    let handle = Mapping::empty().into_shared();
    let mut fixed: Fixed = wrap(&handle).unwrap();
    fixed.set_attr("a", 1).unwrap();
    assert_eq!(handle.borrow().len(), 1);
}

#[test]
fn two_wrappers_see_each_other() {
    let handle = shared_text_mapping();
    let mut left = Record::wrap(&handle).unwrap();
    let right = Record::wrap(&handle).unwrap();
    left.remove("units").unwrap();
    assert!(!right.contains("units"));
    assert_eq!(left, right);
}

#[test]
fn sharing_an_owned_record() {
    let mut record = Record::from_pairs([("a", 1)]).unwrap();
    let handle = record.share();
    assert_eq!(record.ownership(), Ownership::Shared);
    let mut alias = Record::wrap(&handle).unwrap();
    alias.set("b", 2).unwrap();
    assert!(record.contains("b"));
    // a copy never aliases
    let mut copy = record.copy();
    copy.set("c", 3).unwrap();
    assert!(!alias.contains("c"));
}

#[test]
fn views_are_live() {
    let handle = shared_text_mapping();
    let record = Record::wrap(&handle).unwrap();
    let mut keys = record.keys();
    assert_eq!(keys.next(), Some(Key::from("units")));
    handle.borrow_mut().insert("zone".into(), 7.into()).unwrap();
    assert_eq!(keys.next(), Some(Key::from("zone")));
    assert_eq!(keys.next(), None);
    assert_eq!(record.values().collect::<Vec<_>>(), vec![Value::from("km"), Value::Int(7)]);
}

#[test]
fn merging_a_record_into_its_own_alias() {
    let handle = shared_text_mapping();
    let mut left = Record::wrap(&handle).unwrap();
    let right = Record::wrap(&handle).unwrap();
    left.merge_into(&[&right]).unwrap();
    assert_eq!(left.len(), 1);
}
