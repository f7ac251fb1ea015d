use crate::foundation::error::{VizError, VizResult};
use crate::render::cell::cell_text;
use crate::schema::registry::{TypeTag, json_kind};
use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Per-element display state.
///
/// Absent highlight keys resolve to [`HighlightState::Default`]. Unknown state names decode as
/// `Default` instead of failing the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HighlightState {
    /// No emphasis.
    #[default]
    Default,
    /// Element was read.
    Read,
    /// Element was written.
    Write,
    /// Element took part in a comparison.
    Compare,
    /// Element was visited.
    Visited,
    /// Element is the current focus.
    Active,
    /// Element matched a search.
    Found,
}

impl HighlightState {
    /// Every state, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Default,
        Self::Read,
        Self::Write,
        Self::Compare,
        Self::Visited,
        Self::Active,
        Self::Found,
    ];

    /// Wire name of the state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Read => "read",
            Self::Write => "write",
            Self::Compare => "compare",
            Self::Visited => "visited",
            Self::Active => "active",
            Self::Found => "found",
        }
    }

    /// Parse a wire name. Unknown names map to `Default`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == name)
            .unwrap_or_default()
    }

    /// Return `true` for anything but `Default`.
    pub fn is_highlighted(self) -> bool {
        self != Self::Default
    }
}

impl fmt::Display for HighlightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HighlightState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HighlightState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = JsonValue::deserialize(deserializer)?;
        Ok(match raw {
            JsonValue::String(s) => Self::from_name(&s),
            _ => Self::Default,
        })
    }
}

/// Highlight table of one object: addressing key -> state.
///
/// Keys are addressing keys (index, `"row-col"`, element value, `"top"`, ...), never display
/// positions. Their meaning depends on the object's type.
pub type Highlights = BTreeMap<String, HighlightState>;

/// One named object inside a frame.
///
/// `type_name` is kept verbatim so that tags outside the registry survive decoding and can be
/// skipped at render time. `data` is kept as raw JSON and only interpreted by the registry.
/// An entry that is not an object or has no string `type` keeps the reason in `shape_error` and
/// renders as a placeholder.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    type_name: String,
    data: JsonValue,
    highlights: Highlights,
    shape_error: Option<String>,
}

impl Object {
    /// Create an object from its three parts.
    pub fn new(type_name: impl Into<String>, data: JsonValue, highlights: Highlights) -> Self {
        Self {
            type_name: type_name.into(),
            data,
            highlights,
            shape_error: None,
        }
    }

    /// Build an object from any JSON value.
    ///
    /// Never fails: a non-object value or a missing or non-string `type` is recorded as a shape
    /// error, and a non-object `highlights` is treated as empty.
    pub fn from_json(value: JsonValue) -> Self {
        let mut fields = match value {
            JsonValue::Object(fields) => fields,
            other => {
                let mut out = Self::new(String::new(), JsonValue::Null, Highlights::new());
                out.shape_error = Some(format!("expected object, found {}", json_kind(&other)));
                return out;
            }
        };

        let (type_name, shape_error) = match fields.remove("type") {
            Some(JsonValue::String(s)) => (s, None),
            Some(other) => (
                String::new(),
                Some(format!("type: expected string, found {}", json_kind(&other))),
            ),
            None => (String::new(), Some("type: expected string, found nothing".to_owned())),
        };
        let data = fields.remove("data").unwrap_or(JsonValue::Null);
        let highlights = match fields.remove("highlights") {
            Some(JsonValue::Object(map)) => map
                .into_iter()
                .map(|(k, v)| {
                    let state = match v {
                        JsonValue::String(s) => HighlightState::from_name(&s),
                        _ => HighlightState::Default,
                    };
                    (k, state)
                })
                .collect(),
            _ => Highlights::new(),
        };

        Self {
            type_name,
            data,
            highlights,
            shape_error,
        }
    }

    /// Why the entry could not be read as an object, if it could not.
    pub fn shape_error(&self) -> Option<&str> {
        self.shape_error.as_deref()
    }

    /// Declared type tag, verbatim.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared type tag, if it is part of the registry.
    pub fn type_tag(&self) -> Option<TypeTag> {
        TypeTag::parse(&self.type_name)
    }

    /// Raw payload.
    pub fn data(&self) -> &JsonValue {
        &self.data
    }

    /// Highlight table.
    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    /// Resolve an addressing key, defaulting when absent.
    pub fn highlight(&self, key: &str) -> HighlightState {
        self.highlights.get(key).copied().unwrap_or_default()
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", &self.type_name)?;
        map.serialize_entry("data", &self.data)?;
        map.serialize_entry("highlights", &self.highlights)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Object {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_json(JsonValue::deserialize(deserializer)?))
    }
}

/// Objects of one frame, in the order the engine emitted them.
///
/// Decoding preserves document order. A repeated name keeps its first position and takes the
/// last value. Anything other than a JSON object decodes as an empty table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Objects {
    entries: Vec<(String, Object)>,
}

impl Objects {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `name`. Replacement keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, object: Object) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = object;
            return;
        }
        self.entries.push((name, object));
    }

    /// Look up an object by name.
    pub fn get(&self, name: &str) -> Option<&Object> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, o)| o)
    }

    /// Iterate in engine order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Object)> {
        self.entries.iter().map(|(n, o)| (n.as_str(), o))
    }

    /// Object names in engine order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the frame has no objects.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Object)> for Objects {
    fn from_iter<I: IntoIterator<Item = (String, Object)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (name, object) in iter {
            out.insert(name, object);
        }
        out
    }
}

impl Serialize for Objects {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, object) in &self.entries {
            map.serialize_entry(name, object)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Objects {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ObjectsVisitor;

        impl<'de> Visitor<'de> for ObjectsVisitor {
            type Value = Objects;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of object name to object")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Objects, E> {
                Ok(Objects::new())
            }

            fn visit_bool<E: serde::de::Error>(self, _: bool) -> Result<Objects, E> {
                Ok(Objects::new())
            }

            fn visit_i64<E: serde::de::Error>(self, _: i64) -> Result<Objects, E> {
                Ok(Objects::new())
            }

            fn visit_u64<E: serde::de::Error>(self, _: u64) -> Result<Objects, E> {
                Ok(Objects::new())
            }

            fn visit_f64<E: serde::de::Error>(self, _: f64) -> Result<Objects, E> {
                Ok(Objects::new())
            }

            fn visit_str<E: serde::de::Error>(self, _: &str) -> Result<Objects, E> {
                Ok(Objects::new())
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Objects, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Objects::new())
            }

            fn visit_map<A>(self, mut access: A) -> Result<Objects, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = Objects::new();
                while let Some((name, object)) = access.next_entry::<String, Object>()? {
                    out.insert(name, object);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_any(ObjectsVisitor)
    }
}

/// One execution snapshot.
///
/// Decoding is lenient: a missing `message` is empty, a non-string one is shown as its cell text,
/// and an element that is not a JSON object decodes as an empty frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Frame {
    /// Status line shown above the objects.
    pub message: String,
    /// Named objects in engine order.
    pub objects: Objects,
}

impl Frame {
    /// Create a frame.
    pub fn new(message: impl Into<String>, objects: Objects) -> Self {
        Self {
            message: message.into(),
            objects,
        }
    }
}

fn message_text(value: JsonValue) -> String {
    match value {
        JsonValue::String(s) => s,
        JsonValue::Null => String::new(),
        other => cell_text(&other),
    }
}

impl<'de> Deserialize<'de> for Frame {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FrameVisitor;

        impl<'de> Visitor<'de> for FrameVisitor {
            type Value = Frame;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a frame object")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Frame, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut frame = Frame::default();
                while let Some(key) = access.next_key::<String>()? {
                    match key.as_str() {
                        "message" => frame.message = message_text(access.next_value()?),
                        "objects" => frame.objects = access.next_value()?,
                        _ => {
                            access.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(frame)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Frame, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Frame::default())
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Frame, E> {
                Ok(Frame::default())
            }

            fn visit_bool<E: serde::de::Error>(self, _: bool) -> Result<Frame, E> {
                Ok(Frame::default())
            }

            fn visit_i64<E: serde::de::Error>(self, _: i64) -> Result<Frame, E> {
                Ok(Frame::default())
            }

            fn visit_u64<E: serde::de::Error>(self, _: u64) -> Result<Frame, E> {
                Ok(Frame::default())
            }

            fn visit_f64<E: serde::de::Error>(self, _: f64) -> Result<Frame, E> {
                Ok(Frame::default())
            }

            fn visit_str<E: serde::de::Error>(self, _: &str) -> Result<Frame, E> {
                Ok(Frame::default())
            }
        }

        deserializer.deserialize_any(FrameVisitor)
    }
}

/// Immutable, ordered sequence of frames from one invocation.
///
/// Cloning is cheap and shares the frames; there is no way to mutate a frame once it is part of
/// a history.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    frames: Arc<[Frame]>,
}

impl History {
    /// Wrap frames into a history.
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Decode the serialized frame array an engine returns.
    ///
    /// Empty output, invalid JSON and a top-level value that is not an array are engine failures.
    /// Problems inside a frame are left for the renderer.
    pub fn from_json(text: &str) -> VizResult<Self> {
        if text.trim().is_empty() {
            return Err(VizError::engine("engine returned empty output"));
        }
        let frames: Vec<Frame> = serde_json::from_str(text)
            .map_err(|e| VizError::engine(format!("malformed engine output: {e}")))?;
        Ok(Self::new(frames))
    }

    /// Decode a history from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> VizResult<Self> {
        let frames: Vec<Frame> = serde_json::from_reader(r)
            .map_err(|e| VizError::serde(format!("parse history JSON: {e}")))?;
        Ok(Self::new(frames))
    }

    /// Decode a history from a JSON file on disk.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> VizResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            VizError::validation(format!("open history JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    /// Encode back to the engine's JSON shape.
    pub fn to_json(&self) -> VizResult<String> {
        serde_json::to_string(&*self.frames).map_err(|e| VizError::serde(e.to_string()))
    }

    /// Frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Return `true` when both handles share the same frame storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.frames, &other.frames)
    }
}

impl From<Vec<Frame>> for History {
    fn from(frames: Vec<Frame>) -> Self {
        Self::new(frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
