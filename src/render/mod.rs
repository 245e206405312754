//! Indented outline to box-drawing tree.
//!
//! ```text
//! /                /
//!  src             ├─ src/
//!   main.rs   =>   │  └─ main.rs
//!  Cargo.toml      └─ Cargo.toml
//! ```
//!
//! Rendering is a single forward pass over the non-blank lines. Each line's
//! prefix is rebuilt from the stack of ancestors that are still open, so the
//! only state carried between lines is that stack.

pub mod glyphs;

use crate::parser::{preprocess_outline, AnnotatedLine, StackFrame};
use glyphs::{connector, continuation, DIR_SEPARATOR};

/// Knobs for [`render_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append `/` to lines inferred to be directories, unless already present.
    pub append_slash: bool,
    /// Pass a line that is exactly `/` through unprefixed at any indent.
    pub literal_root: bool,
}

impl RenderOptions {
    pub fn with_slash(append_slash: bool) -> Self {
        Self {
            append_slash,
            ..Self::default()
        }
    }
}

/// Render `text` as a tree. Never fails; empty or all-blank input gives `""`.
pub fn render(text: &str, append_slash: bool) -> String {
    render_with(text, &RenderOptions::with_slash(append_slash))
}

pub fn render_with(text: &str, options: &RenderOptions) -> String {
    let lines = preprocess_outline(text);
    let mut stack: Vec<StackFrame> = Vec::new();
    let mut out = String::new();

    for line in &lines {
        if options.literal_root && line.name() == "/" {
            out.push('/');
            out.push('\n');
            continue;
        }

        let indent = line.indent();

        if indent == 0 {
            stack.clear();
            push_name(&mut out, line, options);
            out.push('\n');
            continue;
        }

        while stack.last().is_some_and(|frame| frame.indent >= indent) {
            stack.pop();
        }

        for frame in &stack {
            out.push_str(continuation(frame.is_last_sibling));
        }
        out.push_str(connector(line.is_last_sibling));
        push_name(&mut out, line, options);
        out.push('\n');

        stack.push(StackFrame {
            indent,
            is_last_sibling: line.is_last_sibling,
        });
    }

    out
}

fn push_name(out: &mut String, line: &AnnotatedLine, options: &RenderOptions) {
    let name = line.name();
    out.push_str(name);
    if options.append_slash && line.is_directory && !name.ends_with(DIR_SEPARATOR) {
        out.push(DIR_SEPARATOR);
    }
}
