//! Word-level prompt diff highlighting
//!
//! Marks every word of the current prompt that does not occur anywhere in
//! the previous prompt. Comparison is set membership over whitespace
//! separated words, exact and case-sensitive. Removed or reordered words are
//! never reported.

use crate::content::{strip_tags, Prompt};
use serde::Serialize;
use std::collections::HashSet;

/// CSS class wrapped around words that are new in this iteration
pub const NEW_WORD_CLASS: &str = "new-word";

/// A word of the current prompt and whether it is new
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffToken {
    pub text: String,
    pub is_new: bool,
}

/// Counts for the "N new details added" line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub new_words: usize,
    pub total_words: usize,
}

impl DiffSummary {
    pub fn of(tokens: &[DiffToken]) -> Self {
        Self {
            new_words: tokens.iter().filter(|t| t.is_new).count(),
            total_words: tokens.len(),
        }
    }
}

/// Remove inline emphasis markup before comparison
pub fn strip_markup(text: &str) -> String {
    strip_tags(text)
}

/// Tokenize `current` against the vocabulary of `previous`
///
/// Both inputs must already be plain text.
pub fn diff_words(current: &str, previous: &str) -> Vec<DiffToken> {
    let known: HashSet<&str> = previous.split_whitespace().collect();
    current
        .split_whitespace()
        .map(|word| DiffToken {
            text: word.to_string(),
            is_new: !known.contains(word),
        })
        .collect()
}

/// Highlight new words of `current` relative to `previous`
///
/// With no previous text (first iteration) the input comes back unchanged.
/// Otherwise both sides are stripped of markup and the result is escaped
/// HTML with new words wrapped in `<span class="new-word">`.
pub fn highlight(current: &str, previous: Option<&str>) -> String {
    match diff_text(current, previous) {
        Some(tokens) => render_markup(&tokens),
        None => current.to_string(),
    }
}

/// Tokens behind [`highlight`], `None` when there is no previous text
pub fn diff_text(current: &str, previous: Option<&str>) -> Option<Vec<DiffToken>> {
    previous.map(|previous| diff_words(&strip_markup(current), &strip_markup(previous)))
}

/// Structured variant of [`highlight`] for segment-based prompts
///
/// Returns `None` for the first iteration, where no baseline exists.
pub fn highlight_prompt(current: &Prompt, previous: Option<&Prompt>) -> Option<Vec<DiffToken>> {
    previous.map(|previous| diff_words(&current.plain_text(), &previous.plain_text()))
}

/// Join tokens with single spaces, wrapping new ones
pub fn render_markup(tokens: &[DiffToken]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if token.is_new {
            out.push_str(&format!(
                "<span class=\"{}\">{}</span>",
                NEW_WORD_CLASS,
                escape_html(&token.text)
            ));
        } else {
            out.push_str(&escape_html(&token.text));
        }
    }
    out
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
