use flexrecord::{AttributeAccess, FlexError, Flexible, Key, Kind, Record, Symbol, Value};

#[test]
fn symbol_keys_use_the_name_itself() {
    let mut record = Record::new();
    record.set_attr("units", "km").unwrap();
    assert_eq!(record.get(Symbol::new("units").unwrap()).unwrap(), Value::from("km"));
    record.set(Symbol::new("dx").unwrap(), 0.2).unwrap();
    assert_eq!(record.attr("dx").unwrap(), Value::Float(0.2));
}

#[test]
fn text_keys_use_the_name_as_text() {
    let mut record = Record::from_pairs([("units", "km")]).unwrap();
    assert_eq!(record.attr("units").unwrap(), record.get("units").unwrap());
    record.set_attr("dx", 0.2).unwrap();
    assert_eq!(record.get("dx").unwrap(), Value::Float(0.2));
    record.remove_attr("units").unwrap();
    assert!(!record.contains("units"));
    assert!(record.has_attr("dx").unwrap());
}

#[test]
fn missing_attributes_are_not_found() {
    let record = Record::from_pairs([("units", "km")]).unwrap();
    assert_eq!(record.attr("dx").unwrap_err(), FlexError::NotFound { key: Key::from("dx") });
}

#[test]
fn integer_keys_have_no_attributes() {
    let mut record = Record::from_pairs([(1, "one"), (2, "two")]).unwrap();
    for name in ["one", "two", "x", "len"] {
        let err = record.attr(name).unwrap_err();
        assert_eq!(
            err,
            FlexError::UnsupportedKeyConversion {
                attribute: name.to_string(),
                key_kind: Kind::Int,
                type_name: "Record{Int, Any}".to_string(),
            }
        );
        assert!(matches!(
            record.set_attr(name, 1),
            Err(FlexError::UnsupportedKeyConversion { .. })
        ));
        assert!(matches!(
            record.remove_attr(name),
            Err(FlexError::UnsupportedKeyConversion { .. })
        ));
        assert!(matches!(record.has_attr(name), Err(FlexError::UnsupportedKeyConversion { .. })));
    }
    // key access still works
    assert_eq!(record.get(1).unwrap(), Value::from("one"));
}

#[test]
fn mixed_keys_have_no_attributes() {
    let record =
        Record::from_pairs([(Key::Int(1), Value::Int(1)), (Key::from("a"), Value::Int(2))])
            .unwrap();
    assert_eq!(record.key_kind(), Kind::Any);
    assert!(matches!(
        record.attr("a"),
        Err(FlexError::UnsupportedKeyConversion { key_kind: Kind::Any, .. })
    ));
}

#[test]
fn attribute_names_must_be_identifiers() {
    let record = Record::new();
    assert_eq!(
        record.attr("two words").unwrap_err(),
        FlexError::InvalidSymbol("two words".to_string())
    );
}
