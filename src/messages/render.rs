//! Render state - data structure sent from App layer to UI for rendering

use crate::layout::LayoutMode;
use crate::messages::ui_events::{Focus, InputMode};
use crate::models::{ProfileDraft, ProfileField};
use crate::picture::PictureSummary;
use crate::views::NavigationBar;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub layout: LayoutMode,

    // Navigation bar
    pub nav_title: String,
    pub search_query: String,
    pub search_visible: bool,
    pub notifications: u32,
    pub has_unread: bool,
    pub nav_items: Vec<String>,
    pub active_nav_item: usize,
    pub side_panel_visible: bool,

    // Profile
    pub draft: ProfileDraft,
    pub picture: Option<PictureSummary>,
    pub drawer_visible: bool,

    // UI state
    pub focus: Focus,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<String>,

    // Popups
    pub show_help: bool,
    pub show_picture_input: bool,
    pub picture_path_input: String,
}

impl RenderState {
    pub fn full_name(&self) -> String {
        self.draft.full_name()
    }

    pub fn admin_name_visible(&self) -> bool {
        self.draft.admin_name_visible()
    }

    /// Text currently held by a focusable element, if it holds text
    pub fn text_for(&self, focus: Focus) -> &str {
        match focus {
            Focus::Search => &self.search_query,
            Focus::Field(field) => self.draft.form.get(field),
            Focus::DateOfBirth => &self.draft.date_of_birth,
            Focus::AdminName => &self.draft.admin_name,
            Focus::UserType | Focus::Update => "",
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        let nav = NavigationBar::default();
        let layout = LayoutMode::Wide;
        RenderState {
            layout,
            nav_title: nav.title().to_string(),
            search_query: String::new(),
            search_visible: nav.search_visible(layout),
            notifications: nav.notifications(),
            has_unread: nav.has_unread(),
            nav_items: nav.items().to_vec(),
            active_nav_item: nav.active_item(),
            side_panel_visible: nav.side_panel_visible(layout),
            draft: ProfileDraft::default(),
            picture: None,
            drawer_visible: true,
            focus: Focus::Field(ProfileField::Bio),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status: None,
            show_help: false,
            show_picture_input: false,
            picture_path_input: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PROFILE_NAV_ITEM;

    #[test]
    fn test_default_highlights_profile_item() {
        let render = RenderState::default();
        assert_eq!(render.nav_items[render.active_nav_item], PROFILE_NAV_ITEM);
        assert!(render.search_visible);
        assert!(render.has_unread);
    }
}
