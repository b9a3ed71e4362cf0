//! Page theme as a scoped resource
//!
//! Applying a theme injects a style block into a [`StyleSheet`] and hands
//! back a [`ThemeGuard`]. Dropping the guard removes the block again, so a
//! view never leaves its styles behind.

use crate::diff::NEW_WORD_CLASS;
use std::cell::RefCell;
use tracing::debug;

/// Tutorial color palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub neutral_light: &'static str,
    pub neutral_dark: &'static str,
}

impl Theme {
    pub fn tutorial() -> Self {
        Self {
            name: "tutorial",
            primary: "#E85A4F",
            secondary: "#FFB347",
            accent: "#35845B",
            neutral_light: "#F5F3F0",
            neutral_dark: "#4A4238",
        }
    }

    /// CSS for this theme, including the diff highlight class
    pub fn css(&self) -> String {
        format!(
            ":root {{ --primary: {}; --secondary: {}; --accent: {}; --neutral-light: {}; --neutral-dark: {}; }}\n\
             body {{ background: var(--neutral-light); color: var(--neutral-dark); }}\n\
             .highlight {{ color: var(--primary); font-weight: 600; }}\n\
             .{} {{ background: var(--secondary); border-radius: 3px; padding: 0 2px; }}",
            self.primary,
            self.secondary,
            self.accent,
            self.neutral_light,
            self.neutral_dark,
            NEW_WORD_CLASS
        )
    }
}

#[derive(Debug)]
struct StyleBlock {
    id: u64,
    owner: &'static str,
    css: String,
}

/// The set of style blocks currently injected into a document
#[derive(Debug, Default)]
pub struct StyleSheet {
    blocks: RefCell<Vec<StyleBlock>>,
    next_id: RefCell<u64>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject `theme` until the returned guard is dropped
    pub fn apply(&self, theme: &Theme) -> ThemeGuard<'_> {
        let id = {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            *next
        };
        debug!(theme = theme.name, id, "Applying theme");
        self.blocks.borrow_mut().push(StyleBlock {
            id,
            owner: theme.name,
            css: theme.css(),
        });
        ThemeGuard { sheet: self, id }
    }

    pub fn len(&self) -> usize {
        self.blocks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.borrow().is_empty()
    }

    /// `<style>` elements for every active block, in injection order
    pub fn render(&self) -> String {
        self.blocks
            .borrow()
            .iter()
            .map(|b| format!("<style data-theme=\"{}\">\n{}\n</style>", b.owner, b.css))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn release(&self, id: u64) {
        self.blocks.borrow_mut().retain(|b| b.id != id);
    }
}

/// Keeps a theme applied; reverts it on drop
#[must_use = "dropping the guard immediately reverts the theme"]
pub struct ThemeGuard<'a> {
    sheet: &'a StyleSheet,
    id: u64,
}

impl Drop for ThemeGuard<'_> {
    fn drop(&mut self) {
        debug!(id = self.id, "Reverting theme");
        self.sheet.release(self.id);
    }
}
