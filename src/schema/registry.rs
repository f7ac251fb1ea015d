//! Closed table of recognized object type tags.
//!
//! Every tag maps to one [`RegistryEntry`]: the [`Shape`] its `data` must have and the
//! [`Strategy`] the renderer uses to lay it out. Both live in one exhaustive `match`, so a new tag
//! does not compile until it has a shape and a strategy.

use crate::foundation::error::VizError;
use crate::schema::validate::SchemaPathElem;
use serde_json::Value as JsonValue;
use std::fmt;

/// Recognized object type tags.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    /// Numeric scalar.
    Scalar,
    /// String scalar.
    String,
    /// Boolean scalar.
    Bool,
    /// Dynamic array.
    Vector,
    /// Linked list.
    List,
    /// Double-ended queue.
    Deque,
    /// Ordered set.
    Set,
    /// Ordered multiset.
    Multiset,
    /// Hash set.
    UnorderedSet,
    /// Hash multiset.
    UnorderedMultiset,
    /// Two-dimensional array.
    Matrix,
    /// Ordered map.
    Map,
    /// Ordered multimap.
    Multimap,
    /// Hash map.
    UnorderedMap,
    /// Hash multimap.
    UnorderedMultimap,
    /// LIFO stack, stored bottom to top.
    Stack,
    /// FIFO queue, stored front to back.
    Queue,
    /// Max-heap.
    PriorityQueue,
    /// Two-element product.
    Pair,
    /// N-element product.
    Tuple,
}

impl TypeTag {
    /// Every registered tag.
    pub const ALL: [Self; 20] = [
        Self::Scalar,
        Self::String,
        Self::Bool,
        Self::Vector,
        Self::List,
        Self::Deque,
        Self::Set,
        Self::Multiset,
        Self::UnorderedSet,
        Self::UnorderedMultiset,
        Self::Matrix,
        Self::Map,
        Self::Multimap,
        Self::UnorderedMap,
        Self::UnorderedMultimap,
        Self::Stack,
        Self::Queue,
        Self::PriorityQueue,
        Self::Pair,
        Self::Tuple,
    ];

    /// Wire name of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Vector => "vector",
            Self::List => "list",
            Self::Deque => "deque",
            Self::Set => "set",
            Self::Multiset => "multiset",
            Self::UnorderedSet => "unordered_set",
            Self::UnorderedMultiset => "unordered_multiset",
            Self::Matrix => "matrix",
            Self::Map => "map",
            Self::Multimap => "multimap",
            Self::UnorderedMap => "unordered_map",
            Self::UnorderedMultimap => "unordered_multimap",
            Self::Stack => "stack",
            Self::Queue => "queue",
            Self::PriorityQueue => "priority_queue",
            Self::Pair => "pair",
            Self::Tuple => "tuple",
        }
    }

    /// Look up a wire name. Matching is exact.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Registry entry for this tag.
    pub fn entry(self) -> RegistryEntry {
        use Shape as Sh;
        use Strategy as St;

        let (shape, strategy) = match self {
            Self::Scalar => (Sh::Number, St::Single),
            Self::String => (Sh::Text, St::Single),
            Self::Bool => (Sh::Boolean, St::Single),
            Self::Vector | Self::List | Self::Deque => (Sh::Sequence, St::Indexed),
            Self::Set | Self::Multiset | Self::UnorderedSet | Self::UnorderedMultiset => {
                (Sh::Sequence, St::SortedByValue)
            }
            Self::Matrix => (Sh::Grid, St::Grid),
            Self::Map | Self::Multimap | Self::UnorderedMap | Self::UnorderedMultimap => {
                (Sh::Entries, St::SortedEntries)
            }
            Self::Stack => (Sh::Sequence, St::TopFirst),
            Self::Queue => (Sh::Sequence, St::FrontToBack),
            Self::PriorityQueue => (Sh::Sequence, St::MaxFirst),
            Self::Pair => (Sh::Pair, St::Positional),
            Self::Tuple => (Sh::Sequence, St::Positional),
        };
        RegistryEntry { shape, strategy }
    }

    /// Validate `data` against this tag's shape.
    pub fn validate(self, data: &JsonValue) -> Result<TypedValue<'_>, SchemaViolation> {
        self.entry().shape.validate(data)
    }
}

impl std::str::FromStr for TypeTag {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| VizError::unrecognized_type(s))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape and strategy registered for one tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Required shape of `data`.
    pub shape: Shape,
    /// Layout and highlight addressing used by the renderer.
    pub strategy: Strategy,
}

/// Required JSON shape of an object's `data`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// A JSON number.
    Number,
    /// A JSON string.
    Text,
    /// A JSON boolean.
    Boolean,
    /// An array of elements.
    Sequence,
    /// An array of arrays (rows may differ in length).
    Grid,
    /// An array of `{"key": .., "value": ..}` objects.
    Entries,
    /// An array of exactly two elements.
    Pair,
}

/// Layout and highlight addressing scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// One cell, key `"0"`.
    Single,
    /// Storage order with index labels, key = index.
    Indexed,
    /// Ascending by value, key = the value.
    SortedByValue,
    /// Rows and columns, key = `"row-col"`.
    Grid,
    /// Ascending by key, key = the entry key.
    SortedEntries,
    /// Storage reversed, key `"top"` on the first displayed cell.
    TopFirst,
    /// Storage order, keys `"front"`/`"back"` on the end cells.
    FrontToBack,
    /// Descending by value, key `"top"` on the first displayed cell.
    MaxFirst,
    /// Storage order, key = position.
    Positional,
}

/// `data` viewed through its validated shape. Borrows the frame; never copies or reorders it.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue<'a> {
    /// Scalar payload.
    Leaf(&'a JsonValue),
    /// Flat sequence in storage order.
    Sequence(&'a [JsonValue]),
    /// Rows in storage order.
    Grid(Vec<&'a [JsonValue]>),
    /// Key/value entries in storage order.
    Entries(Vec<Entry<'a>>),
    /// Exactly two elements.
    Pair(&'a JsonValue, &'a JsonValue),
}

/// One map-family entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entry<'a> {
    /// Entry key.
    pub key: &'a JsonValue,
    /// Entry value.
    pub value: &'a JsonValue,
}

/// `data` did not match the declared shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Location inside `data` (empty = `data` itself).
    pub path: Vec<SchemaPathElem>,
    /// What the shape required there.
    pub expected: &'static str,
    /// JSON kind actually found.
    pub found: &'static str,
}

impl SchemaViolation {
    fn at(path: Vec<SchemaPathElem>, expected: &'static str, found: &JsonValue) -> Self {
        Self {
            path,
            expected,
            found: json_kind(found),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data")?;
        for p in &self.path {
            write!(f, "{p}")?;
        }
        write!(f, ": expected {}, found {}", self.expected, self.found)
    }
}

impl Shape {
    /// Check `data` and return the borrowed typed view.
    pub fn validate(self, data: &JsonValue) -> Result<TypedValue<'_>, SchemaViolation> {
        match self {
            Self::Number => match data {
                JsonValue::Number(_) => Ok(TypedValue::Leaf(data)),
                other => Err(SchemaViolation::at(vec![], "number", other)),
            },
            Self::Text => match data {
                JsonValue::String(_) => Ok(TypedValue::Leaf(data)),
                other => Err(SchemaViolation::at(vec![], "string", other)),
            },
            Self::Boolean => match data {
                JsonValue::Bool(_) => Ok(TypedValue::Leaf(data)),
                other => Err(SchemaViolation::at(vec![], "bool", other)),
            },
            Self::Sequence => expect_array(data, vec![]).map(TypedValue::Sequence),
            Self::Grid => {
                let rows = expect_array(data, vec![])?;
                let mut out = Vec::with_capacity(rows.len());
                for (r, row) in rows.iter().enumerate() {
                    out.push(expect_array(row, vec![SchemaPathElem::Index(r)])?);
                }
                Ok(TypedValue::Grid(out))
            }
            Self::Entries => {
                let items = expect_array(data, vec![])?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let JsonValue::Object(fields) = item else {
                        return Err(SchemaViolation::at(
                            vec![SchemaPathElem::Index(i)],
                            "{key, value} object",
                            item,
                        ));
                    };
                    let key = fields.get("key").ok_or_else(|| SchemaViolation {
                        path: vec![SchemaPathElem::Index(i), SchemaPathElem::Field("key")],
                        expected: "entry key",
                        found: "nothing",
                    })?;
                    let value = fields.get("value").ok_or_else(|| SchemaViolation {
                        path: vec![SchemaPathElem::Index(i), SchemaPathElem::Field("value")],
                        expected: "entry value",
                        found: "nothing",
                    })?;
                    out.push(Entry { key, value });
                }
                Ok(TypedValue::Entries(out))
            }
            Self::Pair => {
                let items = expect_array(data, vec![])?;
                match items {
                    [first, second] => Ok(TypedValue::Pair(first, second)),
                    _ => Err(SchemaViolation {
                        path: vec![],
                        expected: "array of 2 elements",
                        found: "array of another length",
                    }),
                }
            }
        }
    }
}

fn expect_array(
    value: &JsonValue,
    path: Vec<SchemaPathElem>,
) -> Result<&[JsonValue], SchemaViolation> {
    match value {
        JsonValue::Array(items) => Ok(items),
        other => Err(SchemaViolation::at(path, "array", other)),
    }
}

/// Short name of a JSON value's kind.
pub fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/registry.rs"]
mod tests;
