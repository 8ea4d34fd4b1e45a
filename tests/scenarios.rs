use flexrecord::{AttributeAccess, Contents, Flexible, Kind, Record, Symbol, Value};

#[test]
fn survey_with_text_keys() {
    let mut survey = Record::from_pairs([
        ("units", Value::from("km")),
        ("dx", 0.20.into()),
        ("dy", 0.15.into()),
    ])
    .unwrap();
    assert_eq!(survey.key_kind(), Kind::Text);
    assert_eq!(survey.len(), 3);
    survey.set("units", 50).unwrap();
    assert_eq!(survey.get("units").unwrap(), Value::Int(50));
    survey.remove("dx").unwrap();
    assert!(!survey.contains("dx"));
    assert_eq!(survey.pop_or("units", 99), Value::Int(50));
    assert_eq!(survey.len(), 1);
    assert_eq!(survey.to_string(), "Record{Text, Any} with 1 entry\n  dy: 0.15");
}

#[test]
fn keyword_record() {
    let c = Symbol::new("c").unwrap();
    let mut record = Record::construct(Contents::new().field("a", 1).field("b", 2)).unwrap();
    assert_eq!(record.key_kind(), Kind::Symbol);
    assert_eq!(record.value_kind(), Kind::Any);
    assert_eq!(record.get_or(&c, 0), Value::Int(0));
    assert!(!record.contains(&c));
    assert_eq!(record.get_or_insert(&c, 0).unwrap(), Value::Int(0));
    assert!(record.contains(&c));
    assert_eq!(record.get(&c).unwrap(), Value::Int(0));
    assert_eq!(record.attr("c").unwrap(), Value::Int(0));
}

#[test]
fn chained_edits() {
    let mut record = Record::new();
    record
        .set_attr("a", 1)
        .unwrap()
        .set_attr("b", 2)
        .unwrap()
        .remove_attr("a")
        .unwrap()
        .clear()
        .set_attr("c", 3)
        .unwrap();
    assert_eq!(record.keys().map(|k| k.to_string()).collect::<Vec<_>>(), vec!["c"]);
}

#[test]
fn merging_three_sources_in_order() {
    let mut target = Record::from_pairs([("a", 0)]).unwrap();
    let first = Record::from_pairs([("a", 1), ("b", 1)]).unwrap();
    let second = Record::from_pairs([("b", 2), ("c", 2)]).unwrap();
    let third = Record::from_pairs([("c", 3)]).unwrap();
    target.merge_into(&[&first, &second, &third]).unwrap();
    let entries: Vec<(String, Value)> = target.entries().map(|(k, v)| (k.to_string(), v)).collect();
    assert_eq!(
        entries,
        vec![
            ("a".to_string(), Value::Int(1)),
            ("b".to_string(), Value::Int(2)),
            ("c".to_string(), Value::Int(3)),
        ]
    );
}

#[test]
fn failed_merge_leaves_target_untouched() {
    let mut target = Record::construct(Contents::new().pair("a", 0).value_kind(Kind::Int)).unwrap();
    let good = Record::from_pairs([("b", 1)]).unwrap();
    let bad = Record::from_pairs([("c", "three")]).unwrap();
    assert!(target.merge_into(&[&good, &bad]).is_err());
    assert_eq!(target.len(), 1);
    assert!(!target.contains("b"));
}
