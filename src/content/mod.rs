//! Tutorial content model
//!
//! Prompts are stored as emphasis segments rather than HTML fragments, so
//! the diff logic never sees a markup dialect. Legacy markup strings can
//! still be parsed with [`Prompt::from_markup`].

mod catalog;

pub use catalog::{
    Catalog, ChallengeStep, ResourceCategory, ResourceItem, TechniqueStep, TutorialInfo,
    TutorialSection,
};

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors from building content
#[derive(Error, Debug, PartialEq)]
pub enum ContentError {
    #[error("Iteration sequence for '{0}' is empty")]
    EmptySequence(String),

    #[error("Unbalanced emphasis markup at byte {0}")]
    UnbalancedMarkup(usize),
}

/// A run of prompt text, optionally emphasized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Prompt text made of emphasis segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Prompt {
    segments: Vec<Segment>,
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<(/?)[A-Za-z][^>]*>").expect("valid tag regex"))
}

impl Prompt {
    /// Build a prompt from segments, dropping empty ones
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments: segments.into_iter().filter(|s| !s.text.is_empty()).collect(),
        }
    }

    /// A prompt with no emphasis
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Segment::plain(text)])
    }

    /// Parse a legacy markup string such as
    /// `Vibrant <span class="highlight">Kutch</span> desert`.
    ///
    /// Text inside any element is emphasized. Nested elements stay emphasized
    /// until the outermost one closes.
    pub fn from_markup(markup: &str) -> Result<Self, ContentError> {
        let mut segments = Vec::new();
        let mut depth: usize = 0;
        let mut last = 0;

        for caps in tag_regex().captures_iter(markup) {
            let tag = caps.get(0).expect("group 0 always present");
            let text = &markup[last..tag.start()];
            if !text.is_empty() {
                segments.push(Segment {
                    text: text.to_string(),
                    emphasized: depth > 0,
                });
            }
            last = tag.end();

            if &caps[1] == "/" {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ContentError::UnbalancedMarkup(tag.start()))?;
            } else if !tag.as_str().ends_with("/>") {
                depth += 1;
            }
        }

        if depth != 0 {
            return Err(ContentError::UnbalancedMarkup(markup.len()));
        }
        let tail = &markup[last..];
        if !tail.is_empty() {
            segments.push(Segment::plain(tail));
        }

        Ok(Self::new(segments))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Concatenated text with emphasis removed
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Phrases that were emphasized in the source data
    pub fn emphasized_phrases(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter(|s| s.emphasized)
            .map(|s| s.text.as_str())
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(&segment.text)?;
        }
        Ok(())
    }
}

/// Remove inline markup tags, keeping their text
///
/// Idempotent: stripping an already stripped string is a no-op.
pub fn strip_tags(markup: &str) -> String {
    tag_regex().replace_all(markup, "").into_owned()
}

/// One refinement step of an example
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Iteration {
    pub prompt: Prompt,
    pub analysis: String,
    pub image_ref: String,
    pub image_alt: String,
    pub caption: Option<String>,
}

/// Non-empty ordered list of iterations
///
/// Each entry refines the one before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IterationSequence {
    iterations: Vec<Iteration>,
}

impl IterationSequence {
    pub fn new(name: &str, iterations: Vec<Iteration>) -> Result<Self, ContentError> {
        if iterations.is_empty() {
            return Err(ContentError::EmptySequence(name.to_string()));
        }
        Ok(Self { iterations })
    }

    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    /// Never true for a sequence built through `new`
    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Iteration> {
        self.iterations.get(index)
    }

    /// The iteration `index` is compared against, if any
    pub fn previous_of(&self, index: usize) -> Option<&Iteration> {
        index.checked_sub(1).and_then(|i| self.iterations.get(i))
    }

    pub fn as_slice(&self) -> &[Iteration] {
        &self.iterations
    }

    pub fn iter(&self) -> impl Iterator<Item = &Iteration> {
        self.iterations.iter()
    }
}

/// A named example with its iteration sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Example {
    pub id: String,
    pub title: String,
    pub description: String,
    pub iterations: IterationSequence,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iteration(prompt: &str) -> Iteration {
        Iteration {
            prompt: Prompt::plain(prompt),
            analysis: String::new(),
            image_ref: String::new(),
            image_alt: String::new(),
            caption: None,
        }
    }

    #[test]
    fn test_from_markup_segments() {
        let prompt = Prompt::from_markup(
            r#"Vibrant <span class="highlight">Rann Utsav</span>, white desert"#,
        )
        .unwrap();

        assert_eq!(
            prompt.segments(),
            &[
                Segment::plain("Vibrant "),
                Segment::emphasized("Rann Utsav"),
                Segment::plain(", white desert"),
            ]
        );
        assert_eq!(prompt.plain_text(), "Vibrant Rann Utsav, white desert");
    }

    #[test]
    fn test_from_markup_nested_and_self_closing() {
        let prompt = Prompt::from_markup("a <b>bold <i>deep</i> text</b><br/> end").unwrap();
        let emphasized: Vec<&str> = prompt.emphasized_phrases().collect();
        assert_eq!(emphasized, vec!["bold ", "deep", " text"]);
        assert_eq!(prompt.plain_text(), "a bold deep text end");
    }

    #[test]
    fn test_from_markup_unbalanced() {
        assert_eq!(
            Prompt::from_markup("a </span> b"),
            Err(ContentError::UnbalancedMarkup(2))
        );
        assert_eq!(
            Prompt::from_markup("a <span>b"),
            Err(ContentError::UnbalancedMarkup(9))
        );
    }

    #[test]
    fn test_markup_plain_text_matches_strip() {
        let markup = r#"<span class="highlight">golden sunset</span> light, <em>camels</em>."#;
        let prompt = Prompt::from_markup(markup).unwrap();
        assert_eq!(prompt.plain_text(), strip_tags(markup));
    }

    #[test]
    fn test_strip_tags_idempotent() {
        let markup = r#"x <span class="highlight">y</span> 3 < 4 and 5 > 2"#;
        let once = strip_tags(markup);
        assert_eq!(once, "x y 3 < 4 and 5 > 2");
        assert_eq!(strip_tags(&once), once);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert_eq!(
            IterationSequence::new("empty", vec![]),
            Err(ContentError::EmptySequence("empty".to_string()))
        );
    }

    #[test]
    fn test_previous_of() {
        let seq = IterationSequence::new("s", vec![iteration("a"), iteration("b")]).unwrap();
        assert!(seq.previous_of(0).is_none());
        assert_eq!(seq.previous_of(1).unwrap().prompt.plain_text(), "a");
        assert!(seq.previous_of(5).is_none());
    }
}
