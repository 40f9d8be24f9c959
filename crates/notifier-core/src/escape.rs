//! Markup escaping for values interpolated into message headers.

/// Characters to backslash-escape in header values.
///
/// The default escapes only `_`, which Telegram's legacy Markdown parser
/// treats as an italic delimiter and which is common in job names. The
/// other entity delimiters (`*`, `` ` ``, `[`) are left alone unless a
/// wider policy is chosen, since the parser tolerates them in most names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapePolicy {
    chars: Vec<char>,
}

impl Default for EscapePolicy {
    fn default() -> Self {
        Self { chars: vec!['_'] }
    }
}

impl EscapePolicy {
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut chars: Vec<char> = chars.into_iter().collect();
        chars.sort_unstable();
        chars.dedup();
        Self { chars }
    }

    /// Every delimiter recognised by Telegram's legacy Markdown mode.
    pub fn legacy_markdown() -> Self {
        Self::new(['_', '*', '`', '['])
    }

    /// Insert values verbatim.
    pub fn none() -> Self {
        Self { chars: Vec::new() }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn escape(&self, text: &str) -> String {
        if self.chars.is_empty() {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if self.chars.contains(&c) {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }
}
