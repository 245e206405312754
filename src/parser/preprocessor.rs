use super::siblings::{is_last_sibling, next_indent};
use super::types::{AnnotatedLine, OutlineLine};

/// Count leading whitespace characters. Tabs count as one, no width is assumed.
pub fn count_leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Split on `\n` and drop lines that are empty after trimming.
pub fn collect_outline_lines(text: &str) -> Vec<OutlineLine> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| OutlineLine {
            raw: line.to_string(),
            indent: count_leading_whitespace(line),
            name: line.trim().to_string(),
        })
        .collect()
}

/// Attach directory and last-sibling flags. Indices refer to the filtered
/// list only, so blank lines never influence either flag.
pub fn annotate_lines(lines: Vec<OutlineLine>) -> Vec<AnnotatedLine> {
    let flags: Vec<(bool, bool)> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let is_directory = next_indent(&lines, i).is_some_and(|next| next > line.indent);
            (is_directory, is_last_sibling(&lines, i, line.indent))
        })
        .collect();

    lines
        .into_iter()
        .zip(flags)
        .map(|(line, (is_directory, is_last_sibling))| AnnotatedLine {
            line,
            is_directory,
            is_last_sibling,
        })
        .collect()
}

/// Full preprocessing pipeline
pub fn preprocess_outline(text: &str) -> Vec<AnnotatedLine> {
    annotate_lines(collect_outline_lines(text))
}
