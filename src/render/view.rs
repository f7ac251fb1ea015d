use crate::scene::model::HighlightState;
use crate::schema::registry::TypeTag;
use serde::Serialize;

/// Display model of one frame.
///
/// Produced fresh for each render from a borrowed [`crate::Frame`]; owns all of its text so it
/// never aliases frame data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameView {
    /// Frame status message.
    pub message: String,
    /// Rendered objects in engine order. Unrecognized tags are absent.
    pub objects: Vec<ObjectView>,
}

/// Display model of one named object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectView {
    /// Object name.
    pub name: String,
    /// Declared type. `None` when the entry had no readable `type`.
    #[serde(rename = "type")]
    pub tag: Option<TypeTag>,
    /// Laid-out content.
    pub body: ViewBody,
}

/// One displayed value with its resolved highlight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Value text.
    pub text: String,
    /// Resolved highlight state.
    pub state: HighlightState,
    /// Storage index label, shown for indexed sequences only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl Cell {
    pub(crate) fn new(text: String, state: HighlightState) -> Self {
        Self {
            text,
            state,
            index: None,
        }
    }

    pub(crate) fn indexed(text: String, state: HighlightState, index: usize) -> Self {
        Self {
            text,
            state,
            index: Some(index),
        }
    }
}

/// One displayed map entry. The highlight applies to the value side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntryView {
    /// Key text.
    pub key: String,
    /// Value text.
    pub value: String,
    /// Resolved highlight state.
    pub state: HighlightState,
}

/// Labels printed around a row of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Caption {
    /// Label before the first cell.
    pub head: &'static str,
    /// Label after the last cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail: Option<&'static str>,
}

/// Laid-out object content.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewBody {
    /// Scalar, string or bool.
    Single {
        /// The cell.
        cell: Cell,
    },
    /// Linear containers in display order.
    Row {
        /// Cells in display order.
        cells: Vec<Cell>,
        /// Optional end labels.
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<Caption>,
    },
    /// Matrix rows.
    Grid {
        /// Rows in storage order.
        rows: Vec<Vec<Cell>>,
    },
    /// Map-family entries sorted by key.
    Entries {
        /// Entries in display order.
        entries: Vec<EntryView>,
    },
    /// `data` did not match the declared type.
    Placeholder {
        /// Why the object could not be laid out.
        reason: String,
    },
}

impl ViewBody {
    /// Return `true` for the schema-violation placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Cells of a single-value or row body, in display order.
    pub fn cells(&self) -> &[Cell] {
        match self {
            Self::Single { cell } => std::slice::from_ref(cell),
            Self::Row { cells, .. } => cells,
            Self::Grid { .. } | Self::Entries { .. } | Self::Placeholder { .. } => &[],
        }
    }
}
