use super::*;
use serde_json::json;

#[test]
fn every_tag_round_trips_through_its_wire_name() {
    for tag in TypeTag::ALL {
        assert_eq!(TypeTag::parse(tag.as_str()), Some(tag));
    }
    assert_eq!(TypeTag::parse("Vector"), None);
    assert_eq!(TypeTag::parse("heap"), None);
    assert_eq!(TypeTag::parse(""), None);
}

#[test]
fn families_share_strategies() {
    for tag in [TypeTag::Vector, TypeTag::List, TypeTag::Deque] {
        assert_eq!(tag.entry().strategy, Strategy::Indexed);
    }
    for tag in [
        TypeTag::Set,
        TypeTag::Multiset,
        TypeTag::UnorderedSet,
        TypeTag::UnorderedMultiset,
    ] {
        assert_eq!(tag.entry().strategy, Strategy::SortedByValue);
    }
    for tag in [
        TypeTag::Map,
        TypeTag::Multimap,
        TypeTag::UnorderedMap,
        TypeTag::UnorderedMultimap,
    ] {
        assert_eq!(tag.entry().shape, Shape::Entries);
    }
    assert_eq!(TypeTag::Stack.entry().strategy, Strategy::TopFirst);
    assert_eq!(TypeTag::Queue.entry().strategy, Strategy::FrontToBack);
    assert_eq!(TypeTag::PriorityQueue.entry().strategy, Strategy::MaxFirst);
}

#[test]
fn scalar_shapes_are_strict() {
    assert!(TypeTag::Scalar.validate(&json!(3.5)).is_ok());
    assert!(TypeTag::Scalar.validate(&json!("3")).is_err());
    assert!(TypeTag::String.validate(&json!("abc")).is_ok());
    assert!(TypeTag::String.validate(&json!(1)).is_err());
    assert!(TypeTag::Bool.validate(&json!(false)).is_ok());
    assert!(TypeTag::Bool.validate(&json!(0)).is_err());
}

#[test]
fn sequence_rejects_non_arrays() {
    let v = TypeTag::Vector.validate(&json!("not-an-array")).unwrap_err();
    assert_eq!(v.expected, "array");
    assert_eq!(v.found, "string");
    assert!(v.path.is_empty());
    assert_eq!(v.to_string(), "data: expected array, found string");

    let data = json!([1, "two", true, [3]]);
    let TypedValue::Sequence(items) = TypeTag::Deque.validate(&data).unwrap() else {
        panic!("expected sequence");
    };
    assert_eq!(items.len(), 4);
}

#[test]
fn grid_reports_the_bad_row() {
    let data = json!([[1, 2], 3]);
    let v = TypeTag::Matrix.validate(&data).unwrap_err();
    assert_eq!(v.path, vec![SchemaPathElem::Index(1)]);
    assert_eq!(v.to_string(), "data[1]: expected array, found number");

    let ragged = json!([[1, 2, 3], [4]]);
    let TypedValue::Grid(rows) = TypeTag::Matrix.validate(&ragged).unwrap() else {
        panic!("expected grid");
    };
    assert_eq!(rows[0].len(), 3);
    assert_eq!(rows[1].len(), 1);
}

#[test]
fn entries_require_key_and_value() {
    let ok = json!([{"key": "a", "value": 1}, {"key": "b", "value": [1, 2]}]);
    let TypedValue::Entries(entries) = TypeTag::Map.validate(&ok).unwrap() else {
        panic!("expected entries");
    };
    assert_eq!(entries[1].key, &json!("b"));

    let missing = json!([{"key": "a"}]);
    let v = TypeTag::Multimap.validate(&missing).unwrap_err();
    assert_eq!(
        v.path,
        vec![SchemaPathElem::Index(0), SchemaPathElem::Field("value")]
    );

    let bare = json!([["a", 1]]);
    assert!(TypeTag::UnorderedMap.validate(&bare).is_err());
}

#[test]
fn pair_needs_exactly_two_elements() {
    assert!(matches!(
        TypeTag::Pair.validate(&json!([1, "x"])),
        Ok(TypedValue::Pair(_, _))
    ));
    assert!(TypeTag::Pair.validate(&json!([1])).is_err());
    assert!(TypeTag::Pair.validate(&json!([1, 2, 3])).is_err());
    assert!(TypeTag::Tuple.validate(&json!([1, 2, 3])).is_ok());
    assert!(TypeTag::Tuple.validate(&json!([])).is_ok());
}

#[test]
fn validation_borrows_without_copying() {
    let data = json!([5, 6]);
    let TypedValue::Sequence(items) = TypeTag::Vector.validate(&data).unwrap() else {
        panic!("expected sequence");
    };
    let JsonValue::Array(backing) = &data else {
        unreachable!()
    };
    assert!(std::ptr::eq(items.as_ptr(), backing.as_ptr()));
}

#[test]
fn from_str_reports_unrecognized_tags() {
    assert_eq!("deque".parse::<TypeTag>().unwrap(), TypeTag::Deque);
    let err = "heap".parse::<TypeTag>().unwrap_err();
    assert!(matches!(err, VizError::UnrecognizedType(ref t) if t == "heap"));
}
