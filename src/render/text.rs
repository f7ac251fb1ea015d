use crate::foundation::error::VizResult;
use crate::render::backend::FrameRenderer;
use crate::render::view::{Caption, Cell, FrameView, ObjectView, ViewBody};
use std::fmt::Write as _;

/// Plain-text renderer.
///
/// Cells print as `[v]`, highlighted cells as `[v|state]`. Indexed rows get an index line under
/// the cells, matrix columns are padded to a common width.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    indent: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl TextRenderer {
    /// Create a renderer with the default two-space indent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a frame view into a string.
    pub fn render_view(&self, view: &FrameView) -> String {
        let mut out = String::new();
        out.push_str(&view.message);
        out.push('\n');
        for object in &view.objects {
            out.push('\n');
            self.render_object(&mut out, object);
        }
        out
    }

    fn render_object(&self, out: &mut String, object: &ObjectView) {
        let pad = " ".repeat(self.indent);
        match object.tag {
            Some(tag) => {
                let _ = writeln!(out, "{} ({tag})", object.name);
            }
            None => {
                let _ = writeln!(out, "{}", object.name);
            }
        }

        match &object.body {
            ViewBody::Single { cell } => {
                let _ = writeln!(out, "{pad}{}", cell_token(cell));
            }
            ViewBody::Row { cells, caption } => {
                let tokens: Vec<String> = cells.iter().map(cell_token).collect();
                let _ = writeln!(out, "{pad}{}", row_line(&tokens, *caption));
                if cells.iter().any(|c| c.index.is_some()) {
                    let labels: Vec<String> = cells
                        .iter()
                        .zip(&tokens)
                        .map(|(c, t)| {
                            let label = c.index.map(|i| i.to_string()).unwrap_or_default();
                            format!(" {label:<width$}", width = t.chars().count() - 1)
                        })
                        .collect();
                    let _ = writeln!(out, "{pad}{}", labels.join(" ").trim_end());
                }
            }
            ViewBody::Grid { rows } => {
                let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
                let mut widths = vec![0usize; cols];
                let tokens: Vec<Vec<String>> = rows
                    .iter()
                    .map(|row| row.iter().map(cell_token).collect())
                    .collect();
                for row in &tokens {
                    for (c, t) in row.iter().enumerate() {
                        widths[c] = widths[c].max(t.chars().count());
                    }
                }
                for row in &tokens {
                    let line: Vec<String> = row
                        .iter()
                        .enumerate()
                        .map(|(c, t)| format!("{t:<width$}", width = widths[c]))
                        .collect();
                    let _ = writeln!(out, "{pad}{}", line.join(" ").trim_end());
                }
            }
            ViewBody::Entries { entries } => {
                for e in entries {
                    let value = token(&e.value, e.state.is_highlighted().then_some(e.state.as_str()));
                    let _ = writeln!(out, "{pad}{} -> {value}", e.key);
                }
            }
            ViewBody::Placeholder { reason } => {
                let _ = writeln!(out, "{pad}<invalid: {reason}>");
            }
        }
    }
}

impl FrameRenderer for TextRenderer {
    fn render(&self, view: &FrameView) -> VizResult<String> {
        Ok(self.render_view(view))
    }
}

fn row_line(tokens: &[String], caption: Option<Caption>) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(tokens.len() + 2);
    if let Some(c) = caption {
        parts.push(c.head);
    }
    parts.extend(tokens.iter().map(String::as_str));
    if let Some(tail) = caption.and_then(|c| c.tail) {
        parts.push(tail);
    }
    parts.join(" ")
}

fn cell_token(cell: &Cell) -> String {
    token(
        &cell.text,
        cell.state.is_highlighted().then_some(cell.state.as_str()),
    )
}

fn token(text: &str, state: Option<&str>) -> String {
    match state {
        Some(s) => format!("[{text}|{s}]"),
        None => format!("[{text}]"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
