use driverconnect_engine::ViewMore;
use ratatui::layout::Rect;

/// What the cursor can land on inside the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRow {
    Notification(usize),
    ViewMore,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationsState {
    pub open: bool,
    pub cursor: usize,
    /// First row drawn; follows the cursor.
    pub offset: usize,
    pub bell_area: Rect,
    pub last_area: Rect,
    pub row_areas: Vec<Rect>,
}

impl NotificationsState {
    /// Shown notifications plus the "View More" row when there is more.
    pub fn row_count(total: usize, pager: &ViewMore) -> usize {
        pager.visible(total) + usize::from(pager.has_more(total))
    }

    pub fn row_at(index: usize, total: usize, pager: &ViewMore) -> Option<PanelRow> {
        let shown = pager.visible(total);
        if index < shown {
            Some(PanelRow::Notification(index))
        } else if index == shown && pager.has_more(total) {
            Some(PanelRow::ViewMore)
        } else {
            None
        }
    }

    /// Moves down one row. Past the last row this reveals the next page when
    /// there is one (the cursor lands on the first new notification) and
    /// wraps to the top otherwise. Returns whether a page was revealed.
    pub fn move_down(&mut self, total: usize, pager: &mut ViewMore) -> bool {
        let len = Self::row_count(total, pager);
        if len == 0 {
            self.cursor = 0;
            return false;
        }
        if self.cursor + 1 < len {
            self.cursor += 1;
            return false;
        }
        if pager.advance(total) {
            self.clamp(total, pager);
            return true;
        }
        self.cursor = 0;
        false
    }

    pub fn move_up(&mut self, total: usize, pager: &ViewMore) {
        let len = Self::row_count(total, pager);
        self.cursor = if len == 0 { 0 } else { (self.cursor + len - 1) % len };
    }

    pub fn clamp(&mut self, total: usize, pager: &ViewMore) {
        self.cursor = self.cursor.min(Self::row_count(total, pager).saturating_sub(1));
        self.offset = self.offset.min(self.cursor);
    }

    /// Adjusts `offset` so the cursor row is among the `height` drawn rows.
    pub fn scroll_to_cursor(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }

    pub fn toggle_open(&mut self) -> bool {
        self.open = !self.open;
        if !self.open {
            self.row_areas.clear();
        }
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_more_row_exists_only_while_more_is_hidden() {
        let mut pager = ViewMore::new(2);
        assert_eq!(NotificationsState::row_count(5, &pager), 3);
        assert_eq!(NotificationsState::row_at(2, 5, &pager), Some(PanelRow::ViewMore));
        pager.advance(5);
        pager.advance(5);
        assert_eq!(NotificationsState::row_count(5, &pager), 5);
        assert_eq!(NotificationsState::row_at(4, 5, &pager), Some(PanelRow::Notification(4)));
        assert_eq!(NotificationsState::row_at(5, 5, &pager), None);
    }

    #[test]
    fn moving_past_the_last_row_reveals_the_next_page() {
        let mut pager = ViewMore::new(10);
        let mut state = NotificationsState::default();
        for _ in 0..10 {
            assert!(!state.move_down(15, &mut pager));
        }
        assert_eq!(NotificationsState::row_at(state.cursor, 15, &pager), Some(PanelRow::ViewMore));

        assert!(state.move_down(15, &mut pager));
        assert_eq!(pager.visible(15), 15);
        assert_eq!(NotificationsState::row_at(state.cursor, 15, &pager), Some(PanelRow::Notification(10)));

        for _ in 0..4 {
            state.move_down(15, &mut pager);
        }
        assert_eq!(state.cursor, 14);
        assert!(!state.move_down(15, &mut pager));
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn offset_keeps_the_cursor_on_screen() {
        let mut state = NotificationsState {
            cursor: 9,
            ..NotificationsState::default()
        };
        state.scroll_to_cursor(6);
        assert_eq!(state.offset, 4);
        state.cursor = 2;
        state.scroll_to_cursor(6);
        assert_eq!(state.offset, 2);
        state.scroll_to_cursor(0);
        assert_eq!(state.offset, 2);
    }

    #[test]
    fn clamp_follows_a_shrinking_list() {
        let pager = ViewMore::new(10);
        let mut state = NotificationsState {
            cursor: 7,
            ..NotificationsState::default()
        };
        state.clamp(3, &pager);
        assert_eq!(state.cursor, 2);
        state.clamp(0, &pager);
        assert_eq!(state.cursor, 0);
    }
}
