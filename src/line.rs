/// Split one raw CSV line into fields.
///
/// Quote characters are dropped rather than interpreted, so a quoted field
/// holding a comma splits in two. Empty fields are kept.
pub fn decode_line(line: &str) -> Vec<String> {
    let cleaned: String = line
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | '\n' | '\r'))
        .collect();

    cleaned.split(',').map(str::to_string).collect()
}
