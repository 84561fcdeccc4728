//! App actor - message loop processing UI events

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::Settings;
use crate::messages::{RenderState, UiEvent};

/// App actor that owns the session state
pub struct AppActor {
    state: AppState,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(settings: &Settings, render_tx: mpsc::UnboundedSender<RenderState>) -> Self {
        Self::with_state(AppState::new(settings), render_tx)
    }

    pub fn with_state(state: AppState, render_tx: mpsc::UnboundedSender<RenderState>) -> Self {
        AppActor { state, render_tx }
    }

    /// Run the actor message loop until Quit or the UI hangs up
    pub async fn run(mut self, mut ui_rx: mpsc::UnboundedReceiver<UiEvent>) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        while let Some(event) = ui_rx.recv().await {
            if self.handle_ui_event(event) {
                break;
            }
            let _ = self.render_tx.send(self.state.to_render_state());
        }

        tracing::info!("Session ended");
        self.state.teardown();
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Focus
            UiEvent::NextFocus => self.state.next_focus(),
            UiEvent::PrevFocus => self.state.prev_focus(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Form
            UiEvent::CycleUserType => self.state.cycle_user_type(),
            UiEvent::Submit => self.state.submit(),

            // Panels
            UiEvent::ToggleSidePanel => self.state.toggle_side_panel(),
            UiEvent::ToggleDrawer => self.state.toggle_drawer(),
            UiEvent::ClosePanels => self.state.close_panels(),

            // Picture
            UiEvent::OpenPictureInput => self.state.open_picture_input(),
            UiEvent::PicturePathChar(c) => self.state.picture_path_char(c),
            UiEvent::PicturePathBackspace => self.state.picture_path_backspace(),
            UiEvent::PicturePathAutocomplete => self.state.picture_path_autocomplete(),
            UiEvent::SelectPicture => self.state.select_picture(),
            UiEvent::CancelPictureInput => self.state.cancel_picture_input(),

            // Terminal
            UiEvent::Resize(width) => self.state.set_viewport_width(width),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProfileDraft, ProfileField};
    use crate::picture::PictureStore;
    use crate::submit::LogSubmitter;
    use crate::views::ProfileView;

    #[tokio::test]
    async fn test_actor_renders_and_tears_down() {
        let store = PictureStore::new();
        let profile =
            ProfileView::with_parts(ProfileDraft::default(), store.clone(), Box::new(LogSubmitter));
        let state = AppState::with_profile(&Settings::default(), profile);

        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let actor = AppActor::with_state(state, render_tx);

        ui_tx.send(UiEvent::Resize(60)).unwrap();
        ui_tx.send(UiEvent::ToggleSidePanel).unwrap();
        ui_tx.send(UiEvent::OpenPictureInput).unwrap();
        for c in "me.png".chars() {
            ui_tx.send(UiEvent::PicturePathChar(c)).unwrap();
        }
        ui_tx.send(UiEvent::SelectPicture).unwrap();
        ui_tx.send(UiEvent::NextFocus).unwrap();
        ui_tx.send(UiEvent::StartEditing).unwrap();
        for c in "Ada".chars() {
            ui_tx.send(UiEvent::CharInput(c)).unwrap();
        }
        ui_tx.send(UiEvent::Quit).unwrap();

        actor.run(ui_rx).await;

        let mut last = None;
        while let Ok(render) = render_rx.try_recv() {
            last = Some(render);
        }
        let last = last.unwrap();
        assert!(last.layout.is_narrow());
        assert!(last.side_panel_visible);
        assert_eq!(last.picture.map(|p| p.file_name), Some("me.png".to_string()));
        assert_eq!(last.draft.form.get(ProfileField::FirstName), "Ada");
        assert_eq!(store.live_count(), 0);
    }
}
