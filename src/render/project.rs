use crate::render::cell::{cell_text, display_cmp, key_text};
use crate::render::view::{Caption, Cell, EntryView, FrameView, ObjectView, ViewBody};
use crate::scene::model::{Frame, HighlightState, Object};
use crate::schema::registry::{Strategy, TypeTag, TypedValue};
use serde_json::Value as JsonValue;

/// Project a frame into its display model.
///
/// Pure: the frame is only borrowed, sorting happens on references, and the same frame always
/// projects to the same view. Objects with an unrecognized tag are left out; objects whose data
/// does not fit their tag become [`ViewBody::Placeholder`] without affecting their siblings.
#[tracing::instrument(skip(frame), fields(objects = frame.objects.len()))]
pub fn project_frame(frame: &Frame) -> FrameView {
    let objects = frame
        .objects
        .iter()
        .filter_map(|(name, object)| project_object(name, object))
        .collect();
    FrameView {
        message: frame.message.clone(),
        objects,
    }
}

/// Project one object. Returns `None` when its type tag is not registered.
pub fn project_object(name: &str, object: &Object) -> Option<ObjectView> {
    if let Some(reason) = object.shape_error() {
        tracing::warn!(name, reason, "malformed object rendered as placeholder");
        return Some(ObjectView {
            name: name.to_owned(),
            tag: None,
            body: ViewBody::Placeholder {
                reason: reason.to_owned(),
            },
        });
    }

    let Some(tag) = object.type_tag() else {
        tracing::debug!(name, type_name = object.type_name(), "skipping unrecognized type");
        return None;
    };

    let body = match tag.validate(object.data()) {
        Ok(typed) => layout(tag, tag.entry().strategy, typed, object),
        Err(violation) => {
            tracing::warn!(name, %tag, %violation, "object rendered as placeholder");
            ViewBody::Placeholder {
                reason: violation.to_string(),
            }
        }
    };

    Some(ObjectView {
        name: name.to_owned(),
        tag: Some(tag),
        body,
    })
}

fn layout(tag: TypeTag, strategy: Strategy, typed: TypedValue<'_>, object: &Object) -> ViewBody {
    match (strategy, typed) {
        (Strategy::Single, TypedValue::Leaf(value)) => ViewBody::Single {
            cell: Cell::new(single_text(tag, value), object.highlight("0")),
        },
        (Strategy::Indexed, TypedValue::Sequence(items)) => ViewBody::Row {
            cells: items
                .iter()
                .enumerate()
                .map(|(i, v)| Cell::indexed(cell_text(v), object.highlight(&i.to_string()), i))
                .collect(),
            caption: None,
        },
        (Strategy::SortedByValue, TypedValue::Sequence(items)) => {
            let mut sorted: Vec<&JsonValue> = items.iter().collect();
            sorted.sort_by(|a, b| display_cmp(a, b));
            ViewBody::Row {
                cells: sorted
                    .into_iter()
                    .map(|v| Cell::new(cell_text(v), object.highlight(&key_text(v))))
                    .collect(),
                caption: None,
            }
        }
        (Strategy::Grid, TypedValue::Grid(rows)) => ViewBody::Grid {
            rows: rows
                .iter()
                .enumerate()
                .map(|(r, row)| {
                    row.iter()
                        .enumerate()
                        .map(|(c, v)| Cell::new(cell_text(v), object.highlight(&format!("{r}-{c}"))))
                        .collect()
                })
                .collect(),
        },
        (Strategy::SortedEntries, TypedValue::Entries(mut entries)) => {
            entries.sort_by(|a, b| display_cmp(a.key, b.key));
            ViewBody::Entries {
                entries: entries
                    .into_iter()
                    .map(|e| EntryView {
                        key: cell_text(e.key),
                        value: cell_text(e.value),
                        state: object.highlight(&key_text(e.key)),
                    })
                    .collect(),
            }
        }
        (Strategy::TopFirst, TypedValue::Sequence(items)) => ViewBody::Row {
            cells: role_cells(items.iter().rev(), object, |i, _| (i == 0).then_some("top")),
            caption: Some(Caption {
                head: "TOP",
                tail: None,
            }),
        },
        (Strategy::FrontToBack, TypedValue::Sequence(items)) => ViewBody::Row {
            cells: role_cells(items.iter(), object, |i, len| {
                if i == 0 {
                    Some("front")
                } else if i + 1 == len {
                    Some("back")
                } else {
                    None
                }
            }),
            caption: Some(Caption {
                head: "FRONT",
                tail: Some("BACK"),
            }),
        },
        (Strategy::MaxFirst, TypedValue::Sequence(items)) => {
            let mut sorted: Vec<&JsonValue> = items.iter().collect();
            sorted.sort_by(|a, b| display_cmp(b, a));
            ViewBody::Row {
                cells: role_cells(sorted.into_iter(), object, |i, _| {
                    (i == 0).then_some("top")
                }),
                caption: Some(Caption {
                    head: "MAX HEAP (TOP)",
                    tail: None,
                }),
            }
        }
        (Strategy::Positional, TypedValue::Pair(first, second)) => ViewBody::Row {
            cells: vec![
                Cell::new(cell_text(first), object.highlight("0")),
                Cell::new(cell_text(second), object.highlight("1")),
            ],
            caption: None,
        },
        (Strategy::Positional, TypedValue::Sequence(items)) => ViewBody::Row {
            cells: items
                .iter()
                .enumerate()
                .map(|(i, v)| Cell::new(cell_text(v), object.highlight(&i.to_string())))
                .collect(),
            caption: None,
        },
        (strategy, _) => ViewBody::Placeholder {
            reason: format!("{tag}: {strategy:?} layout cannot use this shape"),
        },
    }
}

/// Cells whose highlight comes from a role key (`top`, `front`, `back`) chosen by display
/// position. Positions without a role stay `Default`.
fn role_cells<'a>(
    values: impl ExactSizeIterator<Item = &'a JsonValue>,
    object: &Object,
    role: impl Fn(usize, usize) -> Option<&'static str>,
) -> Vec<Cell> {
    let len = values.len();
    values
        .enumerate()
        .map(|(i, v)| {
            let state = role(i, len).map_or(HighlightState::Default, |key| object.highlight(key));
            Cell::new(cell_text(v), state)
        })
        .collect()
}

fn single_text(tag: TypeTag, value: &JsonValue) -> String {
    match (tag, value) {
        (TypeTag::String, JsonValue::String(s)) => format!("\"{s}\""),
        _ => cell_text(value),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/project.rs"]
mod tests;
