//! Top navigation bar with a collapsible side navigation panel

use crate::constants::{DEFAULT_NAV_ITEMS, DEFAULT_NOTIFICATIONS, NAV_TITLE, PROFILE_NAV_ITEM};
use crate::layout::LayoutMode;
use crate::views::panel::PanelState;

/// Navigation bar state. Owns nothing but the side panel flag and
/// the text typed into the search box.
#[derive(Clone, Debug)]
pub struct NavigationBar {
    title: String,
    panel: PanelState,
    search_query: String,
    notifications: u32,
    items: Vec<String>,
    active_item: usize,
}

impl Default for NavigationBar {
    fn default() -> Self {
        let items = DEFAULT_NAV_ITEMS.iter().map(|s| s.to_string()).collect();
        NavigationBar::new(items, DEFAULT_NOTIFICATIONS)
    }
}

impl NavigationBar {
    pub fn new(items: Vec<String>, notifications: u32) -> Self {
        let active_item = items
            .iter()
            .position(|item| item == PROFILE_NAV_ITEM)
            .unwrap_or(0);
        NavigationBar {
            title: String::from(NAV_TITLE),
            panel: PanelState::new(),
            search_query: String::new(),
            notifications,
            items,
            active_item,
        }
    }

    pub fn toggle_side_panel(&mut self) {
        self.panel.toggle();
        tracing::debug!(open = self.panel.is_open(), "Side panel toggled");
    }

    /// Dismissal from the panel itself (outside click, explicit close)
    pub fn close_side_panel(&mut self) {
        self.panel.close();
    }

    pub fn side_panel_visible(&self, layout: LayoutMode) -> bool {
        self.panel.is_visible(layout)
    }

    /// Search box and Invite are only laid out on wide terminals
    pub fn search_visible(&self, layout: LayoutMode) -> bool {
        layout == LayoutMode::Wide
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn notifications(&self) -> u32 {
        self.notifications
    }

    pub fn has_unread(&self) -> bool {
        self.notifications > 0
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn active_item(&self) -> usize {
        self.active_item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_then_close() {
        let mut nav = NavigationBar::default();
        assert!(!nav.side_panel_visible(LayoutMode::Narrow));
        nav.toggle_side_panel();
        assert!(nav.side_panel_visible(LayoutMode::Narrow));
        nav.close_side_panel();
        assert!(!nav.side_panel_visible(LayoutMode::Narrow));
    }

    #[test]
    fn test_close_from_closed_stays_closed() {
        let mut nav = NavigationBar::default();
        nav.close_side_panel();
        assert!(!nav.side_panel_visible(LayoutMode::Narrow));
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let mut nav = NavigationBar::default();
        nav.toggle_side_panel();
        nav.toggle_side_panel();
        assert!(!nav.side_panel_visible(LayoutMode::Narrow));
    }

    #[test]
    fn test_narrow_layout_hides_search_and_closed_panel() {
        let mut nav = NavigationBar::default();
        assert!(!nav.search_visible(LayoutMode::Narrow));
        assert!(!nav.side_panel_visible(LayoutMode::Narrow));
        assert!(nav.side_panel_visible(LayoutMode::Wide));
        nav.toggle_side_panel();
        assert!(nav.side_panel_visible(LayoutMode::Narrow));
    }

    #[test]
    fn test_profile_item_is_active() {
        let nav = NavigationBar::default();
        assert_eq!(nav.items()[nav.active_item()], PROFILE_NAV_ITEM);

        let custom = NavigationBar::new(vec!["Home".into()], 0);
        assert_eq!(custom.active_item(), 0);
        assert!(!custom.has_unread());
        assert!(nav.has_unread());
    }

    #[test]
    fn test_set_search_query_replaces_text() {
        let mut nav = NavigationBar::default();
        nav.set_search_query("shoes");
        nav.set_search_query("boots");
        assert_eq!(nav.search_query(), "boots");
        assert!(nav.search_visible(LayoutMode::Wide));
    }
}
