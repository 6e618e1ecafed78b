//! Selection and scroll state for a list with non-selectable header rows.
//!
//! The rows themselves come from the store; this only tracks where the
//! cursor is. Items are never filtered or reordered here.

pub struct SectionList {
    /// `true` for rows the cursor may land on.
    selectable: Vec<bool>,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl SectionList {
    pub fn new() -> Self {
        Self {
            selectable: Vec::new(),
            selected: 0,
            scroll_offset: 0,
        }
    }

    /// Replace the row layout. Selection is clamped and moved off headers.
    pub fn set_rows(&mut self, selectable: Vec<bool>) {
        self.selectable = selectable;
        if self.selected >= self.selectable.len() {
            self.selected = self.selectable.len().saturating_sub(1);
        }
        if !self.is_selectable(self.selected) {
            self.selected = self
                .next_selectable(self.selected)
                .or_else(|| self.prev_selectable(self.selected))
                .unwrap_or(0);
        }
        if self.scroll_offset > self.selected {
            self.scroll_offset = self.selected;
        }
    }

    fn is_selectable(&self, row: usize) -> bool {
        self.selectable.get(row).copied().unwrap_or(false)
    }

    fn next_selectable(&self, from: usize) -> Option<usize> {
        (from..self.selectable.len()).find(|&i| self.selectable[i])
    }

    fn prev_selectable(&self, from: usize) -> Option<usize> {
        let end = from.min(self.selectable.len().saturating_sub(1));
        (0..=end).rev().find(|&i| self.is_selectable(i))
    }

    pub fn select_up(&mut self, n: usize) {
        let mut target = self.selected;
        for _ in 0..n {
            match target.checked_sub(1).and_then(|t| self.prev_selectable(t)) {
                Some(t) => target = t,
                None => break,
            }
        }
        self.selected = target;
    }

    pub fn select_down(&mut self, n: usize) {
        let mut target = self.selected;
        for _ in 0..n {
            match self.next_selectable(target + 1) {
                Some(t) => target = t,
                None => break,
            }
        }
        self.selected = target;
    }

    pub fn select_first(&mut self) {
        self.selected = self.next_selectable(0).unwrap_or(0);
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        if let Some(last) = self.prev_selectable(self.selectable.len()) {
            self.selected = last;
        }
    }

    /// Row index of the cursor, if it rests on a selectable row.
    pub fn selected_row(&self) -> Option<usize> {
        self.is_selectable(self.selected).then_some(self.selected)
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
            // Keep the section header above the first entry in view.
            if self.scroll_offset > 0 && !self.is_selectable(self.scroll_offset - 1) {
                self.scroll_offset -= 1;
            }
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected.saturating_sub(height - 1);
        }
    }

    /// Visible row range for a viewport of `height` rows.
    pub fn visible_range(&self, height: usize) -> std::ops::Range<usize> {
        let start = self.scroll_offset.min(self.selectable.len());
        let end = (start + height).min(self.selectable.len());
        start..end
    }

    /// Handle a click at `row` within the rendered area.
    /// Returns true if the click landed on a selectable row.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if self.is_selectable(target) {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn scroll_by(&mut self, delta: isize) {
        if delta < 0 {
            self.select_up(delta.unsigned_abs());
        } else {
            self.select_down(delta as usize);
        }
    }
}

impl Default for SectionList {
    fn default() -> Self {
        Self::new()
    }
}
