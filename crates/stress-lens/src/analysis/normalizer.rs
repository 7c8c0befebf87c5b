/// Reduce free text to lowercase ASCII alphanumerics separated by single spaces.
///
/// Anything outside `[a-z0-9]` after lowercasing (punctuation, accented letters,
/// emoji) is treated as a word boundary. The result may be empty.
pub fn normalize(value: &str) -> String {
    let lowered = value.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
