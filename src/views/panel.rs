//! Open/closed state for collapsible panels

use crate::layout::LayoutMode;

/// Two states, closed initially; only `toggle` and `close` move between them
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PanelState {
    open: bool,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Wide layouts pin the panel; narrow ones follow the open flag
    pub fn is_visible(&self, layout: LayoutMode) -> bool {
        match layout {
            LayoutMode::Wide => true,
            LayoutMode::Narrow => self.open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        assert!(!PanelState::new().is_open());
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut panel = PanelState::new();
        panel.toggle();
        panel.toggle();
        assert!(!panel.is_open());

        panel.toggle();
        let before = panel;
        panel.toggle();
        panel.toggle();
        assert_eq!(panel, before);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut panel = PanelState::new();
        panel.close();
        assert!(!panel.is_open());
        panel.toggle();
        panel.close();
        panel.close();
        assert!(!panel.is_open());
    }

    #[test]
    fn test_visibility_by_layout() {
        let mut panel = PanelState::new();
        assert!(panel.is_visible(LayoutMode::Wide));
        assert!(!panel.is_visible(LayoutMode::Narrow));
        panel.toggle();
        assert!(panel.is_visible(LayoutMode::Narrow));
    }
}
