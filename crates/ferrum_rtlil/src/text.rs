//! Indented text buffers.

use ferrum_hdl::{AttrValue, SrcLoc};
use std::fmt::{self, Write};

/// Accumulates the RTLIL text of one scope.
///
/// Each scope owns its own emitter and appends it to its parent's when it
/// closes, so a scope's text lands after anything the parent emitted while
/// the scope was open.
#[derive(Debug, Default)]
pub struct Emitter {
    buf: String,
}

impl Emitter {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one line, indented by `indent` levels of two spaces.
    pub fn line(&mut self, indent: usize, args: fmt::Arguments<'_>) {
        for _ in 0..indent {
            self.buf.push_str("  ");
        }
        // Writing into a `String` cannot fail.
        let _ = self.buf.write_fmt(args);
        self.buf.push('\n');
    }

    /// Writes an `attribute` line.
    pub fn attribute(&mut self, indent: usize, name: &str, value: &AttrValue) {
        self.line(
            indent,
            format_args!("attribute \\{name} {}", render_value(value)),
        );
    }

    /// Writes a `src` attribute if a location is known.
    pub fn src(&mut self, indent: usize, src: Option<&SrcLoc>) {
        if let Some(src) = src {
            self.attribute(indent, "src", &AttrValue::Str(src.to_string()));
        }
    }

    /// Appends a closed child scope.
    pub fn append(&mut self, child: Emitter) {
        self.buf.push_str(&child.buf);
    }

    /// Returns the accumulated text.
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Renders an attribute or parameter value: integers in decimal, strings
/// quoted with `\` and `"` escaped.
pub fn render_value(value: &AttrValue) -> String {
    match value {
        AttrValue::Int(n) => n.to_string(),
        AttrValue::Str(s) => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push('"');
            for c in s.chars() {
                if matches!(c, '"' | '\\') {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('"');
            out
        }
    }
}
