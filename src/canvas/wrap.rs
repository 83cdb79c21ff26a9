//! Greedy line breaking with real glyph widths.

/// Break `text` into lines no wider than `max_width`.
///
/// Explicit newlines always break. Words are separated by whitespace and
/// packed greedily; a single word wider than the line is split between
/// characters. Empty input yields no lines, an empty paragraph yields one
/// empty line.
pub fn wrap_lines(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if measure(word) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, max_width, &measure);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        lines.push(current);
    }

    lines
}

/// Split an over-long word into chunks that each fit, at least one char each.
fn break_word(word: &str, max_width: f32, measure: &impl Fn(&str) -> f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();

    for ch in word.chars() {
        current.push(ch);
        if measure(&current) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
