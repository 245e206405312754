/// One non-blank line of raw outline input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine {
    pub raw: String,
    /// Number of leading whitespace characters.
    pub indent: usize,
    pub name: String,
}

/// Outline line with the structural facts the renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLine {
    pub line: OutlineLine,
    /// The next non-blank line is indented deeper than this one.
    pub is_directory: bool,
    /// No later line at the same indent before the enclosing group closes.
    pub is_last_sibling: bool,
}

impl AnnotatedLine {
    pub fn indent(&self) -> usize {
        self.line.indent
    }

    pub fn name(&self) -> &str {
        &self.line.name
    }
}

/// An open ancestor while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFrame {
    pub indent: usize,
    pub is_last_sibling: bool,
}
