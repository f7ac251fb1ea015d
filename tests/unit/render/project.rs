use super::*;
use crate::scene::model::{History, Highlights};
use serde_json::json;

fn obj(type_name: &str, data: JsonValue, highlights: &[(&str, HighlightState)]) -> Object {
    let highlights: Highlights = highlights
        .iter()
        .map(|(k, s)| ((*k).to_owned(), *s))
        .collect();
    Object::new(type_name, data, highlights)
}

fn texts(body: &ViewBody) -> Vec<&str> {
    body.cells().iter().map(|c| c.text.as_str()).collect()
}

fn states(body: &ViewBody) -> Vec<HighlightState> {
    body.cells().iter().map(|c| c.state).collect()
}

use HighlightState::{Active, Default as D, Found, Read, Write};

#[test]
fn scalar_string_and_bool_use_key_zero() {
    let v = project_object("n", &obj("scalar", json!(42), &[("0", Write)])).unwrap();
    assert_eq!(texts(&v.body), ["42"]);
    assert_eq!(states(&v.body), [Write]);

    let v = project_object("s", &obj("string", json!("hi"), &[])).unwrap();
    assert_eq!(texts(&v.body), ["\"hi\""]);
    assert_eq!(states(&v.body), [D]);

    let v = project_object("b", &obj("bool", json!(true), &[("0", Read)])).unwrap();
    assert_eq!(texts(&v.body), ["true"]);
    assert_eq!(states(&v.body), [Read]);
}

#[test]
fn vector_keeps_storage_order_with_index_keys() {
    let v = project_object("arr", &obj("vector", json!([10, 20, 30]), &[("1", Read)])).unwrap();
    assert_eq!(texts(&v.body), ["10", "20", "30"]);
    assert_eq!(states(&v.body), [D, Read, D]);
    let indices: Vec<Option<usize>> = v.body.cells().iter().map(|c| c.index).collect();
    assert_eq!(indices, [Some(0), Some(1), Some(2)]);
}

#[test]
fn set_sorts_and_keys_highlights_by_value() {
    let v = project_object("s", &obj("set", json!([3, 1, 2]), &[("2", Found)])).unwrap();
    assert_eq!(texts(&v.body), ["1", "2", "3"]);
    assert_eq!(states(&v.body), [D, Found, D]);
}

#[test]
fn multiset_duplicates_share_a_highlight() {
    let v = project_object(
        "ms",
        &obj("unordered_multiset", json!([5, 1, 5]), &[("5", Active)]),
    )
    .unwrap();
    assert_eq!(texts(&v.body), ["1", "5", "5"]);
    assert_eq!(states(&v.body), [D, Active, Active]);
}

#[test]
fn matrix_uses_row_col_keys() {
    let v = project_object(
        "g",
        &obj("matrix", json!([[1, 2], [3, 4]]), &[("1-0", Write)]),
    )
    .unwrap();
    let ViewBody::Grid { rows } = &v.body else {
        panic!("expected grid");
    };
    assert_eq!(rows[0][0].state, D);
    assert_eq!(rows[1][0].text, "3");
    assert_eq!(rows[1][0].state, Write);
    assert_eq!(rows[1][1].state, D);
}

#[test]
fn map_sorts_by_key_and_highlights_by_key() {
    let v = project_object(
        "scores",
        &obj(
            "unordered_map",
            json!([
                {"key": 30, "value": "c"},
                {"key": 4, "value": "a"},
                {"key": 12, "value": "b"}
            ]),
            &[("12", Found)],
        ),
    )
    .unwrap();
    let ViewBody::Entries { entries } = &v.body else {
        panic!("expected entries");
    };
    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, ["4", "12", "30"]);
    assert_eq!(entries[1].value, "b");
    assert_eq!(entries[1].state, Found);
    assert_eq!(entries[0].state, D);
}

#[test]
fn multimap_keeps_storage_order_for_equal_keys() {
    let v = project_object(
        "mm",
        &obj(
            "multimap",
            json!([
                {"key": "b", "value": 1},
                {"key": "a", "value": 2},
                {"key": "b", "value": 3}
            ]),
            &[],
        ),
    )
    .unwrap();
    let ViewBody::Entries { entries } = &v.body else {
        panic!("expected entries");
    };
    let values: Vec<&str> = entries.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(values, ["2", "1", "3"]);
}

#[test]
fn stack_shows_top_first_and_only_top_is_highlighted() {
    let v = project_object(
        "st",
        &obj("stack", json!([1, 2, 3]), &[("top", Active), ("0", Found)]),
    )
    .unwrap();
    assert_eq!(texts(&v.body), ["3", "2", "1"]);
    assert_eq!(states(&v.body), [Active, D, D]);
}

#[test]
fn queue_highlights_front_and_back_only() {
    let v = project_object(
        "q",
        &obj(
            "queue",
            json!([7, 8, 9]),
            &[("front", Read), ("back", Write), ("1", Found)],
        ),
    )
    .unwrap();
    assert_eq!(texts(&v.body), ["7", "8", "9"]);
    assert_eq!(states(&v.body), [Read, D, Write]);

    let single = project_object("q1", &obj("queue", json!([7]), &[("back", Write)])).unwrap();
    assert_eq!(states(&single.body), [D]);
}

#[test]
fn priority_queue_sorts_descending_with_top_on_max() {
    let v = project_object(
        "pq",
        &obj("priority_queue", json!([2, 9, 4]), &[("top", Found)]),
    )
    .unwrap();
    assert_eq!(texts(&v.body), ["9", "4", "2"]);
    assert_eq!(states(&v.body), [Found, D, D]);
}

#[test]
fn pair_and_tuple_use_positional_keys() {
    let v = project_object("p", &obj("pair", json!(["a", 1]), &[("1", Write)])).unwrap();
    assert_eq!(texts(&v.body), ["a", "1"]);
    assert_eq!(states(&v.body), [D, Write]);

    let v = project_object("t", &obj("tuple", json!([1, 2.5, "x"]), &[("2", Read)])).unwrap();
    assert_eq!(texts(&v.body), ["1", "2.5", "x"]);
    assert_eq!(states(&v.body), [D, D, Read]);
}

#[test]
fn empty_containers_render_empty_rows() {
    for tag in ["vector", "set", "stack", "queue", "priority_queue", "tuple"] {
        let v = project_object("e", &obj(tag, json!([]), &[("top", Active)])).unwrap();
        assert!(v.body.cells().is_empty(), "{tag}");
        assert!(!v.body.is_placeholder(), "{tag}");
    }
}

#[test]
fn malformed_object_becomes_placeholder_and_siblings_render() {
    let h = History::from_json(
        r#"[{"message": "m", "objects": {
            "bad": {"type": "vector", "data": "not-an-array"},
            "good": {"type": "vector", "data": [1]},
            "odd": {"type": "heap", "data": [1]},
            "nodata": {"type": "pair"}
        }}]"#,
    )
    .unwrap();
    let view = project_frame(&h.frames()[0]);
    let names: Vec<&str> = view.objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["bad", "good", "nodata"]);
    assert!(view.objects[0].body.is_placeholder());
    assert_eq!(texts(&view.objects[1].body), ["1"]);
    assert!(view.objects[2].body.is_placeholder());
}

#[test]
fn untyped_entries_become_placeholders_not_skips() {
    let h = History::from_json(
        r#"[{"message": "m", "objects": {
            "num": 5,
            "notype": {"data": [1]},
            "badtype": {"type": ["vector"], "data": [1]},
            "good": {"type": "scalar", "data": 1}
        }}]"#,
    )
    .unwrap();
    let view = project_frame(&h.frames()[0]);
    let names: Vec<&str> = view.objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["num", "notype", "badtype", "good"]);
    for o in &view.objects[..3] {
        assert_eq!(o.tag, None);
        assert!(o.body.is_placeholder());
    }
    assert_eq!(
        view.objects[0].body,
        ViewBody::Placeholder {
            reason: "expected object, found number".to_owned()
        }
    );
    assert_eq!(view.objects[3].tag, Some(TypeTag::Scalar));
}

#[test]
fn projection_is_idempotent_and_leaves_frame_untouched() {
    let h = History::from_json(
        r#"[{"message": "m", "objects": {
            "s": {"type": "set", "data": [3, 1, 2], "highlights": {"2": "found"}},
            "pq": {"type": "priority_queue", "data": [1, 5, 3]},
            "m": {"type": "map", "data": [{"key": 2, "value": 0}, {"key": 1, "value": 0}]}
        }}]"#,
    )
    .unwrap();
    let frame = &h.frames()[0];
    let before = frame.clone();
    let a = project_frame(frame);
    let b = project_frame(frame);
    assert_eq!(a, b);
    assert_eq!(frame, &before);
    assert_eq!(frame.objects.get("s").unwrap().data(), &json!([3, 1, 2]));
}
