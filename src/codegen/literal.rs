/// Quotes `text` as a Java string literal.
///
/// Every string literal written into generated source goes through here.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Makes free text safe inside a `/** ... */` comment.
///
/// A literal `*/` would close the comment early, so its slash becomes the
/// HTML entity `&#47;`, which Javadoc renders as `/`.
pub fn javadoc_text(text: &str) -> String {
    text.replace("*/", "*&#47;")
}

/// True if `code` is a single complete string literal such as `"abc"`.
pub fn is_quoted_literal(code: &str) -> bool {
    let Some(inner) = code
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };
    let mut escaped = false;
    for c in inner.chars() {
        match (escaped, c) {
            (true, _) => escaped = false,
            (false, '\\') => escaped = true,
            (false, '"') => return false,
            _ => {}
        }
    }
    !escaped
}

/// True if `code` is a bare numeric literal such as `42`, `-1.5` or `2e3`.
pub fn is_numeric_literal(code: &str) -> bool {
    let trimmed = code.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && trimmed.parse::<f64>().is_ok()
}
