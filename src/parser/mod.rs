mod preprocessor;
mod siblings;
mod types;

pub use preprocessor::{annotate_lines, collect_outline_lines, count_leading_whitespace, preprocess_outline};
pub use siblings::{is_last_sibling, next_indent};
pub use types::{AnnotatedLine, OutlineLine, StackFrame};
