use super::types::OutlineLine;

/// Indent of the line after `index`, or `None` at the end of input.
pub fn next_indent(lines: &[OutlineLine], index: usize) -> Option<usize> {
    lines.get(index + 1).map(|l| l.indent)
}

/// Scan forward from `index`: a later line at the same indent means a sibling
/// follows; a shallower line (or end of input) closes the group first.
pub fn is_last_sibling(lines: &[OutlineLine], index: usize, indent: usize) -> bool {
    for line in lines.iter().skip(index + 1) {
        if line.indent == indent {
            return false;
        }
        if line.indent < indent {
            return true;
        }
    }
    true
}
