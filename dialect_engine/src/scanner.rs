//! Keyword scanning over SQL text
//!
//! Matching is case-insensitive and treats every ASCII whitespace byte as a
//! plain space, so `"\nFROM\t"` matches `" FROM "`. The uppercase copy keeps
//! byte offsets identical to the original text, and every keyword starts with
//! an ASCII space, so returned offsets are always valid `str` boundaries.

/// Clauses that may follow the `WHERE` body
pub(crate) const TRAILING_CLAUSES: &[&str] = &[
    " GROUP BY ",
    " HAVING ",
    " WINDOW ",
    " ORDER BY ",
    " LIMIT ",
    " OFFSET ",
    " FETCH ",
    " FOR UPDATE",
];

/// Clauses that limit the row set and must stay after `ORDER BY`
pub(crate) const LIMITING_CLAUSES: &[&str] = &[" LIMIT ", " OFFSET ", " FETCH ", " FOR UPDATE"];

/// Limiting clauses that cap the number of rows
pub(crate) const ROW_LIMITING_CLAUSES: &[&str] = &[" LIMIT ", " OFFSET ", " FETCH "];

pub(crate) struct Scan {
    upper: Vec<u8>,
}

impl Scan {
    pub fn new(sql: &str) -> Self {
        let upper = sql
            .bytes()
            .map(|b| {
                if b.is_ascii_whitespace() {
                    b' '
                } else {
                    b.to_ascii_uppercase()
                }
            })
            .collect();
        Self { upper }
    }

    /// Plain substring test, blind to quotes and nesting
    pub fn contains(&self, token: &str) -> bool {
        let token = token.as_bytes();
        !token.is_empty()
            && token.len() <= self.upper.len()
            && self.upper.windows(token.len()).any(|w| w == token)
    }

    /// Whether the uppercase text, ignoring leading whitespace, starts with `token`
    pub fn starts_with(&self, token: &str) -> bool {
        let start = self.upper.iter().position(|b| *b != b' ').unwrap_or(self.upper.len());
        self.upper[start..].starts_with(token.as_bytes())
    }

    /// Offset of `keyword` at parenthesis depth 0 and outside quoted text,
    /// at or after `from`
    pub fn find_top_level(&self, keyword: &str, from: usize) -> Option<usize> {
        let keyword = keyword.as_bytes();
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;

        for (i, &b) in self.upper.iter().enumerate() {
            if let Some(q) = quote {
                if b == q {
                    quote = None;
                }
                continue;
            }
            match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'(' => depth += 1,
                b')' => depth = depth.saturating_sub(1),
                _ => {
                    if depth == 0 && i >= from && self.upper[i..].starts_with(keyword) {
                        return Some(i);
                    }
                }
            }
        }
        None
    }

    /// Earliest top-level offset of any of `keywords`
    pub fn find_first_top_level(&self, keywords: &[&str], from: usize) -> Option<usize> {
        keywords
            .iter()
            .filter_map(|k| self.find_top_level(k, from))
            .min()
    }
}
