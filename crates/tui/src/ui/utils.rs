//! Layout and hit-testing helpers shared by the components.

use ratatui::layout::{Position, Rect};

/// Index of the area under the pointer, if any.
pub fn find_target_index_by_mouse_position(areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    areas.iter().position(|area| area.contains(Position { x, y }))
}

/// A `width` x `height` rectangle anchored at the top-right corner of
/// `bounds`, shrunk to fit.
pub fn top_right_rect(width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    Rect::new(bounds.right().saturating_sub(width), bounds.y, width, height)
}

/// Clips `rect` so it lies within `bounds`.
pub fn clip_to(rect: Rect, bounds: Rect) -> Rect {
    rect.intersection(bounds)
}

/// Shortens `text` to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_testing_finds_the_row_under_the_pointer() {
        let rows = [Rect::new(0, 1, 10, 1), Rect::new(0, 2, 10, 1)];
        assert_eq!(find_target_index_by_mouse_position(&rows, 3, 2), Some(1));
        assert_eq!(find_target_index_by_mouse_position(&rows, 11, 2), None);
    }

    #[test]
    fn top_right_rect_fits_inside_bounds() {
        let area = top_right_rect(40, 3, Rect::new(0, 0, 30, 10));
        assert_eq!(area, Rect::new(0, 0, 30, 3));
        assert_eq!(top_right_rect(10, 3, Rect::new(0, 0, 30, 10)).x, 20);
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("Tow assigned", 5), "Tow …");
        assert_eq!(truncate("Tow", 5), "Tow");
    }
}
