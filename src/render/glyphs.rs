//! Box-drawing pieces of a rendered line.

/// Continuation under an ancestor that still has siblings below it.
pub const PIPE: &str = "│  ";
/// Continuation under an ancestor that was the last sibling.
pub const BLANK: &str = "   ";
pub const TEE: &str = "├─ ";
pub const ELBOW: &str = "└─ ";

pub const DIR_SEPARATOR: char = '/';

pub fn connector(is_last_sibling: bool) -> &'static str {
    if is_last_sibling {
        ELBOW
    } else {
        TEE
    }
}

pub fn continuation(is_last_sibling: bool) -> &'static str {
    if is_last_sibling {
        BLANK
    } else {
        PIPE
    }
}
