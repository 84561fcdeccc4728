//! App state - pure data structure with no terminal I/O

use crate::config::Settings;
use crate::layout::LayoutMode;
use crate::messages::ui_events::{Focus, InputMode};
use crate::messages::RenderState;
use crate::models::ProfileField;
use crate::views::{NavigationBar, ProfileView};

/// Main application state
pub struct AppState {
    // Views
    pub profile: ProfileView,
    pub nav: NavigationBar,

    // Layout
    pub layout: LayoutMode,
    pub breakpoint: u16,

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

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let profile = ProfileView::new(settings.initial_draft());
        Self::with_profile(settings, profile)
    }

    /// Build around an existing profile view (custom picture store or submitter)
    pub fn with_profile(settings: &Settings, profile: ProfileView) -> Self {
        AppState {
            profile,
            nav: NavigationBar::new(settings.nav_items.clone(), settings.notifications),
            layout: LayoutMode::Wide,
            breakpoint: settings.breakpoint,
            focus: Focus::Field(ProfileField::Bio),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status: None,
            show_help: false,
            show_picture_input: false,
            picture_path_input: String::new(),
        }
    }

    /// Get the text behind the focused element ("" for non-text elements)
    pub fn current_input(&self) -> &str {
        match self.focus {
            Focus::Search => self.nav.search_query(),
            Focus::Field(field) => self.profile.field(field),
            Focus::DateOfBirth => &self.profile.draft().date_of_birth,
            Focus::AdminName => &self.profile.draft().admin_name,
            Focus::UserType | Focus::Update => "",
        }
    }

    /// Write the focused element's text through its view setter
    pub fn commit_input(&mut self, value: String) {
        match self.focus {
            Focus::Search => self.nav.set_search_query(value),
            Focus::Field(field) => self.profile.update_field(field, value),
            Focus::DateOfBirth => self.profile.set_date_of_birth(value),
            Focus::AdminName => self.profile.set_admin_name(value),
            Focus::UserType | Focus::Update => {}
        }
    }

    /// End the session: releases the profile picture handle
    pub fn teardown(self) {
        self.profile.teardown();
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            layout: self.layout,
            nav_title: self.nav.title().to_string(),
            search_query: self.nav.search_query().to_string(),
            search_visible: self.nav.search_visible(self.layout),
            notifications: self.nav.notifications(),
            has_unread: self.nav.has_unread(),
            nav_items: self.nav.items().to_vec(),
            active_nav_item: self.nav.active_item(),
            side_panel_visible: self.nav.side_panel_visible(self.layout),
            draft: self.profile.draft().clone(),
            picture: self.profile.picture_summary(),
            drawer_visible: self.profile.drawer_visible(self.layout),
            focus: self.focus,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            status: self.status.clone(),
            show_help: self.show_help,
            show_picture_input: self.show_picture_input,
            picture_path_input: self.picture_path_input.clone(),
        }
    }
}
