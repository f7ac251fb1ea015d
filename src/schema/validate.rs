use crate::foundation::error::VizError;
use crate::scene::model::History;
use crate::schema::registry::TypeTag;
use std::fmt;

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    /// Fixed field of the envelope, e.g. `objects` or `data`.
    Field(&'static str),
    /// Engine-chosen key, e.g. an object name.
    Name(String),
    /// Array position.
    Index(usize),
}

impl fmt::Display for SchemaPathElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, ".{name}"),
            Self::Name(name) => write!(f, ".{name}"),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// One schema violation, located by a JSON path from the history root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Location, starting at the frame index.
    pub path: Vec<SchemaPathElem>,
    /// What was wrong there.
    pub message: String,
}

impl SchemaError {
    fn at(path: Vec<SchemaPathElem>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

pub(crate) fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        s.push_str(&p.to_string());
    }
    s
}

/// Every violation found in a history, printed one per line.
#[derive(Debug, Clone)]
pub struct SchemaErrors {
    /// Violations in frame order.
    pub errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl From<SchemaErrors> for VizError {
    fn from(errors: SchemaErrors) -> Self {
        VizError::schema(errors.to_string())
    }
}

/// Object whose type tag is outside the registry. Rendered as nothing; not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedObject {
    /// Frame index.
    pub frame: usize,
    /// Object name.
    pub name: String,
    /// Declared type, verbatim.
    pub type_name: String,
}

/// Result of checking every object of every frame.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Frames checked.
    pub frames: usize,
    /// Objects checked, skipped ones included.
    pub objects: usize,
    /// Objects with an unrecognized type tag.
    pub skipped: Vec<SkippedObject>,
    /// Objects that do not fit their shape.
    pub errors: Vec<SchemaError>,
}

impl CheckReport {
    /// Return `true` when no object violated its shape.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Turn violations into an error, keeping skips as informational.
    pub fn into_result(self) -> Result<Self, SchemaErrors> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(SchemaErrors {
                errors: self.errors,
            })
        }
    }
}

/// Validate every object of every frame.
///
/// Unrecognized type tags are listed as skips. Malformed entries and shape violations become
/// located [`SchemaError`]s.
pub fn check_history(history: &History) -> CheckReport {
    let mut report = CheckReport {
        frames: history.len(),
        ..CheckReport::default()
    };

    for (fi, frame) in history.frames().iter().enumerate() {
        for (name, object) in frame.objects.iter() {
            report.objects += 1;
            if let Some(reason) = object.shape_error() {
                report.errors.push(SchemaError::at(
                    vec![
                        SchemaPathElem::Index(fi),
                        SchemaPathElem::Field("objects"),
                        SchemaPathElem::Name(name.to_owned()),
                    ],
                    reason,
                ));
                continue;
            }

            let tag = match object.type_name().parse::<TypeTag>() {
                Ok(tag) => tag,
                Err(err) => {
                    tracing::debug!(frame = fi, name, %err, "object skipped");
                    report.skipped.push(SkippedObject {
                        frame: fi,
                        name: name.to_owned(),
                        type_name: object.type_name().to_owned(),
                    });
                    continue;
                }
            };

            if let Err(v) = tag.validate(object.data()) {
                let mut path = vec![
                    SchemaPathElem::Index(fi),
                    SchemaPathElem::Field("objects"),
                    SchemaPathElem::Name(name.to_owned()),
                    SchemaPathElem::Field("data"),
                ];
                path.extend(v.path.iter().cloned());
                report.errors.push(SchemaError::at(
                    path,
                    format!("{tag} expects {}, found {}", v.expected, v.found),
                ));
            }
        }
    }

    report
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
