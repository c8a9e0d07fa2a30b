//! Placeholder utilities
//!
//! Statements are assembled with `?` placeholders and rewritten into the
//! target dialect's style as the last step. Quoted text is never touched.

use crate::dialect::PlaceholderStyle;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
    Backtick,
}

impl Quote {
    fn step(self, c: char) -> Self {
        match (self, c) {
            (Quote::None, '\'') => Quote::Single,
            (Quote::None, '"') => Quote::Double,
            (Quote::None, '`') => Quote::Backtick,
            (Quote::Single, '\'') | (Quote::Double, '"') | (Quote::Backtick, '`') => Quote::None,
            (state, _) => state,
        }
    }
}

/// Count `?` placeholders outside quoted text
pub fn count_placeholders(sql: &str) -> usize {
    let mut quote = Quote::None;
    let mut count = 0;
    for c in sql.chars() {
        if quote == Quote::None && c == '?' {
            count += 1;
        }
        quote = quote.step(c);
    }
    count
}

/// Highest index among numbered tokens already written in `style`
fn highest_numbered(sql: &str, style: PlaceholderStyle) -> usize {
    let prefix = match style {
        PlaceholderStyle::Question => return 0,
        PlaceholderStyle::Dollar => "$",
        PlaceholderStyle::AtP => "@p",
        PlaceholderStyle::Colon => ":",
    };

    let mut quote = Quote::None;
    let mut highest = 0;
    for (pos, c) in sql.char_indices() {
        if quote == Quote::None && sql[pos..].starts_with(prefix) {
            let digits: String = sql[pos + prefix.len()..]
                .chars()
                .take_while(|d| d.is_ascii_digit())
                .collect();
            if let Ok(index) = digits.parse::<usize>() {
                highest = highest.max(index);
            }
        }
        quote = quote.step(c);
    }
    highest
}

/// Rewrite `?` placeholders into `style`.
///
/// Numbering continues after the highest token of the same style already in
/// the statement, so `:1 ... ?` becomes `:1 ... :2`.
pub fn rewrite_placeholders(sql: &str, style: PlaceholderStyle) -> String {
    if style == PlaceholderStyle::Question {
        return sql.to_string();
    }

    let mut out = String::with_capacity(sql.len() + 16);
    let mut quote = Quote::None;
    let mut index = highest_numbered(sql, style);
    for c in sql.chars() {
        if quote == Quote::None && c == '?' {
            index += 1;
            out.push_str(&style.render(index));
        } else {
            out.push(c);
        }
        quote = quote.step(c);
    }
    out
}
