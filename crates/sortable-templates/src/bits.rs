/// Split tag content on whitespace while respecting quoted regions.
///
/// A backslash inside a quoted region escapes the next character, so `\"`
/// does not close a double-quoted bit. Quote characters are kept in the
/// returned bits; use [`strip_quotes`] to remove them.
#[must_use]
pub fn split_contents(s: &str) -> Vec<String> {
    let mut pieces = Vec::with_capacity((s.len() / 8).clamp(2, 8));
    let mut start = None;
    let mut quote: Option<char> = None;
    let mut escape = false;

    for (idx, ch) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if quote.is_some() => escape = true,
            '"' | '\'' if quote == Some(ch) => quote = None,
            '"' | '\'' if quote.is_none() => {
                quote = Some(ch);
                start.get_or_insert(idx);
            }
            _ if quote.is_none() && ch.is_whitespace() => {
                if let Some(s_start) = start.take() {
                    pieces.push(s[s_start..idx].to_owned());
                }
            }
            _ => {
                start.get_or_insert(idx);
            }
        }
    }
    if let Some(s_start) = start {
        pieces.push(s[s_start..].to_owned());
    }
    pieces
}

/// Remove every leading and trailing `"` or `'` from a bit.
#[must_use]
pub fn strip_quotes(bit: &str) -> &str {
    bit.trim_matches(|c| c == '"' || c == '\'')
}

/// Upper-case the first character and lower-case the rest.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
