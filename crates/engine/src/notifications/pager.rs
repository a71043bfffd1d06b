/// "View More" paging over an already fully loaded list.
///
/// Holds how many entries to show; advancing adds a fixed step and stops once
/// everything is shown. No fetching happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewMore {
    shown: usize,
    step: usize,
}

impl ViewMore {
    pub fn new(step: usize) -> Self {
        let step = step.max(1);
        Self { shown: step, step }
    }

    pub fn visible(&self, total: usize) -> usize {
        self.shown.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.shown < total
    }

    /// Reveals another step if there is more to show.
    pub fn advance(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.shown += self.step;
        true
    }

    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible(items.len())]
    }

    pub fn reset(&mut self) {
        self.shown = self.step;
    }
}

#[cfg(test)]
mod tests {
    use super::ViewMore;

    #[test]
    fn advances_by_step_and_caps_at_the_list_length() {
        let mut pager = ViewMore::new(10);
        assert_eq!(pager.visible(25), 10);
        assert!(pager.advance(25));
        assert_eq!(pager.visible(25), 20);
        assert!(pager.advance(25));
        assert_eq!(pager.visible(25), 25);
        assert!(!pager.advance(25));
        assert!(!pager.has_more(25));
    }

    #[test]
    fn short_lists_never_advance() {
        let mut pager = ViewMore::new(10);
        assert!(!pager.advance(3));
        assert_eq!(pager.window(&[1, 2, 3]), &[1, 2, 3]);
    }

    #[test]
    fn zero_step_is_clamped() {
        let mut pager = ViewMore::new(0);
        assert_eq!(pager.visible(5), 1);
        assert!(pager.advance(5));
        assert_eq!(pager.visible(5), 2);
    }
}
