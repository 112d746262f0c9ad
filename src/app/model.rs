//! Application model: the item list and everything the UI shows about it.
//!
//! `App` owns the list; the UI redraws from it every frame. Mutations report
//! what they changed (new selection, number of rows touched) so callers can
//! put it in the status line.

use std::collections::BTreeSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::concat::{ConcatError, ConcatPlan};
use crate::config::ConcatSettings;
use crate::library::{
    MediaItem, SortKey, SortOrder, Totals, move_block, move_item, sort_items, totals, totals_of,
};
use crate::payload::{Pasteboard, PayloadError, decode_rows, encode_rows};

/// Which question the input line at the bottom is asking.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PromptKind {
    /// Paths to add to the list.
    AddFiles,
    /// Output path (without extension) for the concatenation.
    SaveAs,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// The main application model.
pub struct App {
    pub items: Vec<MediaItem>,
    /// Row under the cursor. While dragging it may equal `items.len()`,
    /// the gap after the last row.
    pub cursor: usize,
    /// Explicitly marked rows.
    pub selection: BTreeSet<usize>,
    pub sort: Option<(SortKey, SortOrder)>,
    pub prompt: Option<Prompt>,
    pub status: Option<String>,
    pasteboard: Pasteboard,
}

impl App {
    /// Create a new `App` with the provided list of `items`.
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items,
            cursor: 0,
            selection: BTreeSet::new(),
            sort: None,
            prompt: None,
            status: None,
            pasteboard: Pasteboard::default(),
        }
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Largest position the cursor may take.
    fn cursor_limit(&self) -> usize {
        if self.is_dragging() {
            self.items.len()
        } else {
            self.items.len().saturating_sub(1)
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.cursor_limit());
    }

    /// Move the cursor down one row, wrapping to the top.
    pub fn next(&mut self) {
        if !self.has_items() {
            return;
        }
        self.cursor = if self.cursor >= self.cursor_limit() {
            0
        } else {
            self.cursor + 1
        };
    }

    /// Move the cursor up one row, wrapping to the bottom.
    pub fn prev(&mut self) {
        if !self.has_items() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.cursor_limit()
        } else {
            self.cursor - 1
        };
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn last(&mut self) {
        self.cursor = self.cursor_limit();
    }

    /// Mark or unmark the row under the cursor.
    pub fn toggle_selected(&mut self) {
        if self.cursor >= self.items.len() {
            return;
        }
        if !self.selection.remove(&self.cursor) {
            self.selection.insert(self.cursor);
        }
    }

    pub fn select_all(&mut self) {
        self.selection = (0..self.items.len()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Rows an action applies to: the marked rows, or the cursor row when
    /// nothing is marked.
    pub fn effective_selection(&self) -> BTreeSet<usize> {
        if !self.selection.is_empty() {
            return self.selection.clone();
        }
        if self.cursor < self.items.len() {
            BTreeSet::from([self.cursor])
        } else {
            BTreeSet::new()
        }
    }

    /// Append `items` to the end of the list. Returns how many were added.
    pub fn add_items(&mut self, items: Vec<MediaItem>) -> usize {
        let n = items.len();
        self.items.extend(items);
        n
    }

    /// Remove the selected rows. Returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        let doomed = self.effective_selection();
        let before = self.items.len();
        let mut index = 0;
        self.items.retain(|_| {
            let keep = !doomed.contains(&index);
            index += 1;
            keep
        });
        self.selection.clear();
        self.clamp_cursor();
        before - self.items.len()
    }

    /// Sort the list by `key`. Asking for the key already in effect flips
    /// the direction; a new key starts ascending. The cursor and marks stay
    /// on the same items.
    pub fn sort_by(&mut self, key: SortKey) -> (SortKey, SortOrder) {
        let order = match self.sort {
            Some((current, order)) if current == key => order.flipped(),
            _ => SortOrder::Ascending,
        };
        self.apply_sort(key, order);
        (key, order)
    }

    /// Sort by `key` in the given direction.
    pub fn apply_sort(&mut self, key: SortKey, order: SortOrder) {
        let cursor_item = self.items.get(self.cursor).cloned();
        let marked: Vec<MediaItem> = self
            .selection
            .iter()
            .filter_map(|&i| self.items.get(i).cloned())
            .collect();

        sort_items(&mut self.items, key, order);
        self.sort = Some((key, order));

        if let Some(item) = cursor_item {
            self.cursor = self.position_of(&item).unwrap_or(0);
        }
        self.selection = marked.iter().filter_map(|m| self.position_of(m)).collect();
    }

    fn position_of(&self, item: &MediaItem) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    /// Pick up the selected rows for a drag. Returns how many rows were
    /// picked up; zero means there was nothing to drag.
    pub fn begin_drag(&mut self) -> usize {
        let rows = self.effective_selection();
        if rows.is_empty() {
            return 0;
        }
        match encode_rows(&rows) {
            Ok(data) => self.pasteboard.write(data),
            Err(e) => {
                log::warn!("could not start drag: {e}");
                return 0;
            }
        }
        self.selection = rows.clone();
        rows.len()
    }

    pub fn is_dragging(&self) -> bool {
        !self.pasteboard.is_empty()
    }

    pub fn cancel_drag(&mut self) {
        self.pasteboard.clear();
        self.clamp_cursor();
    }

    /// Drop the dragged rows in front of row `target` (`items.len()` drops
    /// them at the end).
    pub fn drop_at(&mut self, target: usize) -> Result<Range<usize>, PayloadError> {
        let data = self.pasteboard.take().ok_or(PayloadError::NoDrag)?;
        let result = self.drop_payload(&data, target);
        self.clamp_cursor();
        result
    }

    /// Accept a row payload dropped in front of row `target`. On success the
    /// moved rows become the selection and their positions are returned. A
    /// payload that can't be read is rejected and the list is left as it was.
    pub fn drop_payload(&mut self, data: &[u8], target: usize) -> Result<Range<usize>, PayloadError> {
        let rows = decode_rows(data)?;
        let moved = rows.iter().filter(|&&i| i < self.items.len()).count();
        let start = move_block(&mut self.items, &rows, target);
        self.selection = (start..start + moved).collect();
        self.cursor = start.min(self.items.len().saturating_sub(1));
        Ok(start..start + moved)
    }

    /// Drop the dragged rows at the cursor.
    pub fn drop_at_cursor(&mut self) -> Result<Range<usize>, PayloadError> {
        self.drop_at(self.cursor)
    }

    /// Nudge the selected rows one place down (`down`) or up, as one block.
    /// Returns their new positions, or `None` when already at the edge.
    pub fn shift_selection(&mut self, down: bool) -> Option<Range<usize>> {
        let rows = self.effective_selection();
        let (&lo, &hi) = (rows.first()?, rows.last()?);
        if (down && hi + 1 >= self.items.len()) || (!down && lo == 0) {
            return None;
        }

        let range = if rows.len() == 1 {
            let to = if down { lo + 2 } else { lo - 1 };
            let at = move_item(&mut self.items, lo, to)?;
            at..at + 1
        } else {
            let target = if down { hi + 2 } else { lo - 1 };
            let start = move_block(&mut self.items, &rows, target);
            start..start + rows.len()
        };

        if !self.selection.is_empty() {
            self.selection = range.clone().collect();
        }
        let nudged = if down {
            self.cursor + 1
        } else {
            self.cursor.saturating_sub(1)
        };
        self.cursor = nudged.clamp(range.start, range.end - 1);
        Some(range)
    }

    pub fn totals(&self) -> Totals {
        totals(&self.items)
    }

    pub fn selection_totals(&self) -> Totals {
        totals_of(&self.items, &self.selection)
    }

    /// Paths to hand to the previewer, in list order.
    pub fn preview_paths(&self) -> Vec<PathBuf> {
        self.effective_selection()
            .iter()
            .filter_map(|&i| self.items.get(i))
            .map(|item| item.path.clone())
            .collect()
    }

    /// Plan the concatenation of the whole list into `dest`.
    pub fn concat_plan(
        &self,
        dest: &Path,
        settings: &ConcatSettings,
    ) -> Result<ConcatPlan, ConcatError> {
        ConcatPlan::new(&self.items, dest, settings)
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(Prompt {
            kind,
            input: String::new(),
        });
    }

    pub fn push_prompt_str(&mut self, s: &str) {
        if let Some(p) = self.prompt.as_mut() {
            p.input.push_str(s);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(p) = self.prompt.as_mut() {
            p.input.pop();
        }
    }

    /// Close the prompt, returning what was typed.
    pub fn take_prompt(&mut self) -> Option<Prompt> {
        self.prompt.take()
    }
}
