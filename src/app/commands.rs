//! Command handlers - state transitions for each UI event

use std::fs;
use std::path::PathBuf;

use crate::app::AppState;
use crate::layout::LayoutMode;
use crate::messages::ui_events::InputMode;

impl AppState {
    // ========================
    // Focus
    // ========================

    pub fn next_focus(&mut self) {
        self.stop_editing();
        self.focus = self.focus.next(self.layout, self.profile.admin_name_visible());
    }

    pub fn prev_focus(&mut self) {
        self.stop_editing();
        self.focus = self.focus.prev(self.layout, self.profile.admin_name_visible());
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.focus.is_text() {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if !self.focus.is_text() || cursor_pos > self.current_input().len() {
            return;
        }
        let mut input = self.current_input().to_string();
        input.insert(cursor_pos, c);
        self.commit_input(input);
        self.cursor_position = cursor_pos + c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 || !self.focus.is_text() {
            return;
        }
        let mut input = self.current_input().to_string();
        let prev_pos = input[..self.cursor_position]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        input.remove(prev_pos);
        self.commit_input(input);
        self.cursor_position = prev_pos;
    }

    // ========================
    // Form
    // ========================

    pub fn cycle_user_type(&mut self) {
        self.profile.cycle_user_type();
    }

    pub fn submit(&mut self) {
        self.stop_editing();
        self.status = Some(match self.profile.submit() {
            Ok(()) => String::from("Profile updated"),
            Err(e) => {
                tracing::warn!(error = %e, "Profile update failed");
                format!("Update failed: {}", e)
            }
        });
    }

    // ========================
    // Panels
    // ========================

    /// The menu and drawer triggers only exist on narrow layouts
    pub fn toggle_side_panel(&mut self) {
        if self.layout.is_narrow() {
            self.nav.toggle_side_panel();
        }
    }

    pub fn toggle_drawer(&mut self) {
        if self.layout.is_narrow() {
            self.profile.toggle_drawer();
        }
    }

    /// Dismiss both collapsible panels
    pub fn close_panels(&mut self) {
        self.nav.close_side_panel();
        self.profile.close_drawer();
    }

    // ========================
    // Layout
    // ========================

    pub fn set_viewport_width(&mut self, width: u16) {
        let layout = LayoutMode::from_width(width, self.breakpoint);
        if layout != self.layout {
            tracing::debug!(width, layout = layout.as_str(), "Layout changed");
            self.layout = layout;
        }

        let admin_visible = self.profile.admin_name_visible();
        if !self.focus.available(self.layout, admin_visible) {
            self.stop_editing();
            self.focus = self.focus.next(self.layout, admin_visible);
        }
    }

    // ========================
    // Picture selection
    // ========================

    pub fn open_picture_input(&mut self) {
        self.stop_editing();
        self.show_picture_input = true;
    }

    pub fn picture_path_char(&mut self, c: char) {
        self.picture_path_input.push(c);
    }

    pub fn picture_path_backspace(&mut self) {
        self.picture_path_input.pop();
    }

    pub fn cancel_picture_input(&mut self) {
        self.show_picture_input = false;
        self.picture_path_input.clear();
        // Dismissing the picker is a selection of nothing
        self.profile.select_profile_picture(None);
    }

    pub fn select_picture(&mut self) {
        let input = self.picture_path_input.trim();
        let selection = if input.is_empty() {
            None
        } else {
            Some(PathBuf::from(expand_home(input)))
        };

        if self.profile.select_profile_picture(selection) {
            let name = self
                .profile
                .picture()
                .map(|p| p.file_name().to_string())
                .unwrap_or_default();
            self.status = Some(format!("Picture set: {}", name));
        }

        self.show_picture_input = false;
        self.picture_path_input.clear();
    }

    pub fn picture_path_autocomplete(&mut self) {
        let input = expand_home(&self.picture_path_input);
        let path = PathBuf::from(&input);

        // A complete directory name gets its separator
        if path.is_dir() && !input.ends_with('/') && !input.is_empty() {
            self.picture_path_input = format!("{}/", input);
            return;
        }

        // Get parent directory and prefix to match
        let (parent, prefix) = if input.is_empty() {
            (PathBuf::from("."), String::new())
        } else if input.ends_with('/') {
            (PathBuf::from(&input), String::new())
        } else if let Some(parent) = path.parent() {
            let prefix = path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let parent = if parent.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                parent.to_path_buf()
            };
            (parent, prefix)
        } else {
            return;
        };

        let Ok(entries) = fs::read_dir(&parent) else {
            return;
        };
        let mut matches: Vec<(String, bool)> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let is_dir = e.path().is_dir();
                e.file_name().into_string().ok().map(|name| (name, is_dir))
            })
            .filter(|(name, _)| name.starts_with(&prefix) && !name.starts_with('.'))
            .collect();
        matches.sort();

        let base = if input.is_empty() || !input.contains('/') {
            PathBuf::new()
        } else {
            parent
        };

        if let [(name, is_dir)] = matches.as_slice() {
            let completed = base.join(name).to_string_lossy().to_string();
            self.picture_path_input = if *is_dir {
                format!("{}/", completed)
            } else {
                completed
            };
        } else if matches.len() > 1 {
            let names: Vec<String> = matches.iter().map(|(name, _)| name.clone()).collect();
            if let Some(common) = common_prefix(&names) {
                if common.len() > prefix.len() {
                    self.picture_path_input = base.join(&common).to_string_lossy().to_string();
                }
            }
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

/// Expand a leading ~ to the home directory
fn expand_home(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

/// Find common prefix among strings
fn common_prefix(strings: &[String]) -> Option<String> {
    let first = strings.first()?;
    let mut prefix_len = first.len();

    for s in &strings[1..] {
        prefix_len = first
            .char_indices()
            .zip(s.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, a), _)| i + a.len_utf8())
            .unwrap_or(0)
            .min(prefix_len);
    }

    if prefix_len > 0 {
        Some(first[..prefix_len].to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::messages::ui_events::Focus;
    use crate::models::{ProfileDraft, ProfileField, ProfileSubmission, UserType};
    use crate::picture::PictureStore;
    use crate::views::ProfileView;
    use std::fs::File;
    use tempfile::tempdir;

    fn type_text(state: &mut AppState, text: &str) {
        state.start_editing();
        for c in text.chars() {
            state.enter_char(c);
        }
        state.stop_editing();
    }

    fn focus_field(state: &mut AppState, field: ProfileField) {
        state.focus = Focus::Field(field);
    }

    #[test]
    fn test_typing_updates_full_name() {
        let mut state = AppState::default();
        focus_field(&mut state, ProfileField::FirstName);
        type_text(&mut state, "Ada");
        focus_field(&mut state, ProfileField::LastName);
        type_text(&mut state, "Lovelace");
        assert_eq!(state.to_render_state().full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_edit_in_middle_with_multibyte_chars() {
        let mut state = AppState::default();
        focus_field(&mut state, ProfileField::City);
        type_text(&mut state, "Zürch");
        state.start_editing();
        state.move_cursor_left();
        state.move_cursor_left();
        state.enter_char('i');
        assert_eq!(state.profile.field(ProfileField::City), "Zürich");
        state.move_cursor_left();
        state.move_cursor_left();
        state.delete_char();
        assert_eq!(state.profile.field(ProfileField::City), "Zrich");
    }

    #[test]
    fn test_non_text_focus_does_not_edit() {
        let mut state = AppState::default();
        state.focus = Focus::UserType;
        state.start_editing();
        assert_eq!(state.input_mode, InputMode::Normal);
        state.enter_char('x');
        state.delete_char();
        assert_eq!(state.current_input(), "");
    }

    #[test]
    fn test_admin_name_focus_follows_user_type() {
        let mut state = AppState::default();
        state.focus = Focus::UserType;
        state.next_focus();
        assert_eq!(state.focus, Focus::Update);

        state.focus = Focus::UserType;
        state.cycle_user_type();
        state.cycle_user_type();
        assert_eq!(state.profile.draft().user_type, Some(UserType::Organization));
        state.next_focus();
        assert_eq!(state.focus, Focus::AdminName);
        type_text(&mut state, "Babbage");

        state.focus = Focus::UserType;
        state.cycle_user_type();
        let render = state.to_render_state();
        assert!(!render.admin_name_visible());
        assert_eq!(render.draft.admin_name, "Babbage");
    }

    #[test]
    fn test_narrow_resize_moves_focus_off_search() {
        let mut state = AppState::default();
        state.focus = Focus::Search;
        state.start_editing();
        state.set_viewport_width(40);
        assert_eq!(state.layout, LayoutMode::Narrow);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.focus, Focus::Field(ProfileField::Bio));
    }

    #[test]
    fn test_panels_follow_layout() {
        let mut state = AppState::default();
        state.set_viewport_width(200);
        let render = state.to_render_state();
        assert!(render.side_panel_visible);
        assert!(render.drawer_visible);

        state.set_viewport_width(60);
        assert!(!state.to_render_state().side_panel_visible);
        state.toggle_side_panel();
        state.toggle_drawer();
        let render = state.to_render_state();
        assert!(render.side_panel_visible);
        assert!(render.drawer_visible);

        state.close_panels();
        let render = state.to_render_state();
        assert!(!render.side_panel_visible);
        assert!(!render.drawer_visible);
    }

    #[test]
    fn test_wide_toggles_do_not_leak_into_narrow() {
        let mut state = AppState::default();
        state.set_viewport_width(200);
        state.toggle_drawer();
        state.toggle_side_panel();

        state.set_viewport_width(60);
        let render = state.to_render_state();
        assert!(!render.side_panel_visible);
        assert!(!render.drawer_visible);
    }

    #[test]
    fn test_edits_reach_date_and_search() {
        let mut state = AppState::default();
        state.focus = Focus::DateOfBirth;
        type_text(&mut state, "1815-12-10");
        state.start_editing();
        state.delete_char();
        state.enter_char('1');
        assert_eq!(state.profile.draft().date_of_birth, "1815-12-11");

        state.focus = Focus::Search;
        type_text(&mut state, "boots");
        let render = state.to_render_state();
        assert_eq!(render.search_query, "boots");
        assert_eq!(render.text_for(Focus::Search), "boots");
    }

    #[test]
    fn test_empty_picture_input_keeps_picture() {
        let mut state = AppState::default();
        state.open_picture_input();
        state.picture_path_input = String::from("avatar.png");
        state.select_picture();
        let uri = state.to_render_state().picture.map(|p| p.uri);
        assert!(uri.is_some());

        state.open_picture_input();
        state.picture_path_input = String::from("   ");
        state.select_picture();
        assert_eq!(state.to_render_state().picture.map(|p| p.uri), uri);

        state.open_picture_input();
        state.picture_path_char('x');
        state.cancel_picture_input();
        assert_eq!(state.to_render_state().picture.map(|p| p.uri), uri);
        assert!(!state.show_picture_input);
    }

    #[test]
    fn test_teardown_releases_picture() {
        let store = PictureStore::new();
        let profile = ProfileView::with_parts(
            ProfileDraft::default(),
            store.clone(),
            Box::new(crate::submit::LogSubmitter),
        );
        let mut state = AppState::with_profile(&Settings::default(), profile);
        state.picture_path_input = String::from("a.png");
        state.select_picture();
        state.picture_path_input = String::from("b.png");
        state.select_picture();
        assert_eq!(store.live_count(), 1);
        state.teardown();
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn test_submit_failure_sets_status() {
        let failing = |_: &ProfileSubmission| Err::<(), _>(anyhow::anyhow!("offline"));
        let profile = ProfileView::with_parts(
            ProfileDraft::default(),
            PictureStore::new(),
            Box::new(failing),
        );
        let mut state = AppState::with_profile(&Settings::default(), profile);
        state.submit();
        assert_eq!(state.status.as_deref(), Some("Update failed: offline"));

        let mut state = AppState::default();
        state.submit();
        assert_eq!(state.status.as_deref(), Some("Profile updated"));
    }

    #[test]
    fn test_autocomplete_single_file() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("portrait.png")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();

        let mut state = AppState::default();
        state.picture_path_input = format!("{}/por", dir.path().display());
        state.picture_path_autocomplete();
        assert_eq!(
            state.picture_path_input,
            dir.path().join("portrait.png").to_string_lossy()
        );
    }

    #[test]
    fn test_autocomplete_common_prefix_and_dirs() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("avatar-old.png")).unwrap();
        File::create(dir.path().join("avatar-new.png")).unwrap();
        std::fs::create_dir(dir.path().join("photos")).unwrap();

        let mut state = AppState::default();
        state.picture_path_input = format!("{}/av", dir.path().display());
        state.picture_path_autocomplete();
        assert_eq!(
            state.picture_path_input,
            dir.path().join("avatar-").to_string_lossy()
        );

        state.picture_path_input = format!("{}/ph", dir.path().display());
        state.picture_path_autocomplete();
        assert_eq!(
            state.picture_path_input,
            format!("{}/", dir.path().join("photos").display())
        );
    }

    #[test]
    fn test_common_prefix() {
        let names = vec!["abc".to_string(), "abd".to_string()];
        assert_eq!(common_prefix(&names), Some("ab".to_string()));
        assert_eq!(common_prefix(&["x".to_string(), "y".to_string()]), None);
        assert_eq!(common_prefix(&[]), None);
    }
}
