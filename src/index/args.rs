//! Argument-list text parsing.
//!
//! Turns declaration text such as `"(const Area &area, float scale=1.0f) const"`
//! into the ordered list of required argument types. Commas nested inside
//! `<>`, `()`, `[]` or `{}` do not split arguments, so template arguments like
//! `std::map<int, float>` stay whole.

/// Text between the first `(` and its matching `)`.
///
/// Without an opening parenthesis the whole text is taken as the argument
/// body; an unbalanced list runs to the end of the text.
pub fn argument_body(text: &str) -> &str {
    let Some(open) = text.find('(') else {
        return text.trim();
    };
    let inner = &text[open + 1..];
    let mut depth = 0usize;
    for (pos, ch) in inner.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return &inner[..pos],
            ')' => depth -= 1,
            _ => {}
        }
    }
    inner
}

/// Split an argument body on top-level commas.
fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (pos, ch) in body.char_indices() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            ',' if depth <= 0 => {
                parts.push(&body[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

/// Required argument types, in order, with defaulted arguments removed.
///
/// An argument is defaulted when it carries an `=` marker. Empty entries and
/// a lone `void` yield no arguments.
pub fn parse_arg_list(text: &str) -> Vec<String> {
    let body = argument_body(text).trim();
    if body.is_empty() || body == "void" {
        return Vec::new();
    }

    split_top_level(body)
        .into_iter()
        .map(str::trim)
        .filter(|arg| !arg.is_empty() && !arg.contains('='))
        .map(|arg| arg.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

/// The trailing parenthesised text of a reference, starting at the first `(`.
pub fn trailing_args(reference: &str) -> Option<&str> {
    reference.find('(').map(|pos| &reference[pos..])
}
