//! Iteration navigation state machine
//!
//! The store tracks which example is active and which of its iterations is
//! selected. Every transition is bounded: out-of-range moves are ignored,
//! never raised.

use crate::content::{Catalog, Example, Iteration, Prompt};
use crate::diff::{self, DiffSummary, DiffToken};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Snapshot of the selected iteration, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct IterationView {
    pub example_id: String,
    /// Zero-based position in the sequence
    pub index: usize,
    pub total: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub prompt: Prompt,
    /// Words new relative to the previous iteration; `None` on the first
    pub diff: Option<Vec<DiffToken>>,
    pub summary: Option<DiffSummary>,
    /// Display markup for the prompt
    pub highlighted_prompt: String,
    pub analysis: String,
    pub image_ref: String,
    pub image_alt: String,
    pub caption: Option<String>,
}

impl IterationView {
    /// Build the view for `index` of `example`
    pub fn build(example: &Example, index: usize) -> Option<Self> {
        let sequence = &example.iterations;
        let current: &Iteration = sequence.get(index)?;
        let previous = sequence.previous_of(index);

        let diff = diff::highlight_prompt(&current.prompt, previous.map(|p| &p.prompt));
        let highlighted_prompt = match &diff {
            Some(tokens) => diff::render_markup(tokens),
            None => diff::escape_html(&current.prompt.plain_text()),
        };

        Some(Self {
            example_id: example.id.clone(),
            index,
            total: sequence.len(),
            can_go_back: index > 0,
            can_go_forward: index + 1 < sequence.len(),
            summary: diff.as_deref().map(DiffSummary::of),
            diff,
            prompt: current.prompt.clone(),
            highlighted_prompt,
            analysis: current.analysis.clone(),
            image_ref: current.image_ref.clone(),
            image_alt: current.image_alt.clone(),
            caption: current.caption.clone(),
        })
    }
}

/// Navigation state for one viewing session
pub struct IterationStore {
    catalog: Arc<Catalog>,
    example_idx: usize,
    current_index: usize,
}

impl IterationStore {
    /// Create a store positioned on the first iteration of the first example
    ///
    /// Returns `None` if the catalog has no examples.
    pub fn new(catalog: Arc<Catalog>) -> Option<Self> {
        if catalog.examples.is_empty() {
            return None;
        }
        Some(Self {
            catalog,
            example_idx: 0,
            current_index: 0,
        })
    }

    fn example(&self) -> &Example {
        &self.catalog.examples[self.example_idx]
    }

    /// Switch to another example and rewind to its first iteration
    ///
    /// Unknown ids leave the current selection untouched.
    pub fn select_example(&mut self, id: &str) -> bool {
        match self.catalog.examples.iter().position(|e| e.id == id) {
            Some(idx) => {
                debug!(example = id, "Selected example");
                self.example_idx = idx;
                self.current_index = 0;
                true
            }
            None => {
                warn!(example = id, "Unknown example, keeping current selection");
                false
            }
        }
    }

    /// Jump to `index`; returns whether the index changed
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len() {
            debug!(index, len = self.len(), "Ignoring out-of-range navigation");
            return false;
        }
        let changed = index != self.current_index;
        self.current_index = index;
        changed
    }

    /// Advance one iteration; no-op on the last
    pub fn next(&mut self) -> bool {
        self.go_to(self.current_index + 1)
    }

    /// Go back one iteration; no-op on the first
    pub fn previous(&mut self) -> bool {
        match self.current_index.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn example_id(&self) -> &str {
        &self.example().id
    }

    pub fn len(&self) -> usize {
        self.example().iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn can_go_back(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current_index + 1 < self.len()
    }

    pub fn current(&self) -> &Iteration {
        // current_index is kept within bounds by every transition
        &self.example().iterations.as_slice()[self.current_index]
    }

    pub fn previous_iteration(&self) -> Option<&Iteration> {
        self.example().iterations.previous_of(self.current_index)
    }

    /// Render-ready snapshot of the current iteration
    pub fn view(&self) -> Option<IterationView> {
        IterationView::build(self.example(), self.current_index)
    }
}
