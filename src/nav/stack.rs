use tracing::{debug, warn};

use super::frame::ViewFrame;

/// Ordered drill-down stack. The last frame is the one on screen; an empty
/// stack means the selected tab root is on screen.
///
/// All operations are synchronous and infallible. Observers poll
/// [`NavigationStore::revision`] instead of registering callbacks; the shell
/// redraws once per event turn, so a monotonic counter is enough to know
/// whether anything moved.
#[derive(Default)]
pub struct NavigationStore {
    stack: Vec<ViewFrame>,
    revision: u64,
}

impl NavigationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame. Always appends, even when the id matches the current
    /// top frame; that is the double-submit signature, so it gets a warning
    /// in the trace. Coalescing duplicates is a product decision nobody has
    /// made yet.
    pub fn push_view(&mut self, frame: ViewFrame) {
        if let Some(top) = self.stack.last()
            && top.id() == frame.id()
        {
            warn!(id = frame.id(), "pushing frame with the same id as the current top");
        }
        debug!(
            id = frame.id(),
            kind = frame.kind().as_str(),
            depth = self.stack.len() + 1,
            "push view"
        );
        self.stack.push(frame);
        self.revision += 1;
    }

    /// Remove and return the top frame. Popping an empty stack is a silent
    /// no-op; double-taps on a back affordance must never bring the shell
    /// down.
    pub fn pop_view(&mut self) -> Option<ViewFrame> {
        let popped = self.stack.pop();
        if let Some(frame) = &popped {
            debug!(id = frame.id(), depth = self.stack.len(), "pop view");
            self.revision += 1;
        }
        popped
    }

    /// Discard every frame in one step. Used when the active tab changes
    /// while a drill-down is open, so stale frames cannot resurface under
    /// the new tab.
    pub fn pop_to_root(&mut self) {
        if self.stack.is_empty() {
            return;
        }
        debug!(discarded = self.stack.len(), "pop to root");
        self.stack.clear();
        self.revision += 1;
    }

    pub fn current_frame(&self) -> Option<&ViewFrame> {
        self.stack.last()
    }

    pub fn frames(&self) -> &[ViewFrame] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{Payload, ViewKind};

    fn frame(id: &str) -> ViewFrame {
        ViewFrame::new(id, id, ViewKind::EmployeeDetail, Payload::new())
    }

    #[test]
    fn push_then_pop_is_lifo() {
        let mut nav = NavigationStore::new();
        nav.push_view(frame("a"));
        nav.push_view(frame("b"));
        nav.push_view(frame("c"));

        assert_eq!(nav.pop_view().map(|f| f.id().to_string()).as_deref(), Some("c"));
        assert_eq!(nav.pop_view().map(|f| f.id().to_string()).as_deref(), Some("b"));
        assert_eq!(nav.current_frame().map(|f| f.id()), Some("a"));
    }

    #[test]
    fn pop_on_empty_stack_is_a_noop() {
        let mut nav = NavigationStore::new();
        assert!(nav.pop_view().is_none());
        assert!(nav.pop_view().is_none());
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn pop_on_empty_stack_leaves_revision_untouched() {
        let mut nav = NavigationStore::new();
        let before = nav.revision();
        nav.pop_view();
        nav.pop_to_root();
        assert_eq!(nav.revision(), before);
    }

    #[test]
    fn pop_to_root_discards_everything_at_once() {
        let mut nav = NavigationStore::new();
        nav.push_view(frame("a"));
        nav.push_view(frame("b"));
        let before = nav.revision();

        nav.pop_to_root();
        assert!(nav.is_empty());
        assert_eq!(nav.revision(), before + 1);
    }

    #[test]
    fn duplicate_top_id_still_appends() {
        let mut nav = NavigationStore::new();
        nav.push_view(frame("emp-detail-1"));
        nav.push_view(frame("emp-detail-1"));
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn revision_moves_on_every_mutation() {
        let mut nav = NavigationStore::new();
        let r0 = nav.revision();
        nav.push_view(frame("a"));
        let r1 = nav.revision();
        nav.pop_view();
        let r2 = nav.revision();
        assert!(r0 < r1 && r1 < r2);
    }
}
