//! Profile / account settings view
//!
//! Holds one editing session: the draft, the currently displayed picture
//! and the mobile drawer flag. Every operation is a local state
//! transition; only [`ProfileView::submit`] reaches outside, through the
//! injected [`ProfileSubmitter`].

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;

use crate::layout::LayoutMode;
use crate::models::{ProfileDraft, ProfileField, UserType};
use crate::picture::{PictureHandle, PictureStore, PictureSummary};
use crate::submit::{LogSubmitter, ProfileSubmitter};
use crate::views::panel::PanelState;

pub struct ProfileView {
    draft: ProfileDraft,
    picture: Option<PictureHandle>,
    store: PictureStore,
    drawer: PanelState,
    submitter: Box<dyn ProfileSubmitter>,
}

impl fmt::Debug for ProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileView")
            .field("draft", &self.draft)
            .field("picture", &self.picture)
            .field("drawer", &self.drawer)
            .finish_non_exhaustive()
    }
}

impl Default for ProfileView {
    fn default() -> Self {
        ProfileView::new(ProfileDraft::default())
    }
}

impl ProfileView {
    pub fn new(draft: ProfileDraft) -> Self {
        ProfileView::with_parts(draft, PictureStore::new(), Box::new(LogSubmitter))
    }

    pub fn with_parts(
        draft: ProfileDraft,
        store: PictureStore,
        submitter: Box<dyn ProfileSubmitter>,
    ) -> Self {
        ProfileView {
            draft,
            picture: None,
            store,
            drawer: PanelState::new(),
            submitter,
        }
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    // ========================
    // Picture
    // ========================

    /// Replace the displayed picture with `selection`. `None` (nothing
    /// chosen) leaves the current picture in place.
    pub fn select_profile_picture(&mut self, selection: Option<PathBuf>) -> bool {
        let Some(path) = selection else {
            return false;
        };

        let handle = self.store.create(path);
        tracing::info!(
            id = handle.id(),
            file = %handle.file_name(),
            "Profile picture selected"
        );
        if let Some(previous) = self.picture.replace(handle) {
            self.store.release(previous);
        }
        true
    }

    pub fn picture(&self) -> Option<&PictureHandle> {
        self.picture.as_ref()
    }

    pub fn picture_summary(&self) -> Option<PictureSummary> {
        self.picture.as_ref().map(PictureHandle::summary)
    }

    // ========================
    // Fields
    // ========================

    /// Last write wins; no validation
    pub fn update_field(&mut self, field: ProfileField, value: impl Into<String>) {
        *self.draft.form.get_mut(field) = value.into();
    }

    pub fn field(&self, field: ProfileField) -> &str {
        self.draft.form.get(field)
    }

    /// Switching away from organization hides the admin name but keeps it
    pub fn set_user_type(&mut self, user_type: UserType) {
        self.draft.user_type = Some(user_type);
    }

    pub fn cycle_user_type(&mut self) {
        let next = self
            .draft
            .user_type
            .map(|t| t.next())
            .unwrap_or(UserType::Individual);
        self.set_user_type(next);
    }

    /// Free text, last write wins
    pub fn set_date_of_birth(&mut self, value: impl Into<String>) {
        self.draft.date_of_birth = value.into();
    }

    pub fn set_admin_name(&mut self, value: impl Into<String>) {
        self.draft.admin_name = value.into();
    }

    pub fn admin_name_visible(&self) -> bool {
        self.draft.admin_name_visible()
    }

    pub fn full_name(&self) -> String {
        self.draft.full_name()
    }

    // ========================
    // Drawer
    // ========================

    pub fn toggle_drawer(&mut self) {
        self.drawer.toggle();
        tracing::debug!(open = self.drawer.is_open(), "Profile drawer toggled");
    }

    pub fn close_drawer(&mut self) {
        self.drawer.close();
    }

    pub fn drawer_visible(&self, layout: LayoutMode) -> bool {
        self.drawer.is_visible(layout)
    }

    // ========================
    // Submit / teardown
    // ========================

    /// Hand the current draft to the submit collaborator
    pub fn submit(&mut self) -> Result<()> {
        let picture = self.picture.as_ref().map(|p| p.uri().to_string());
        let submission = self.draft.to_submission(picture.as_deref());
        self.submitter.submit(&submission)
    }

    /// End the session, releasing the picture handle
    pub fn teardown(mut self) {
        self.release_picture();
    }

    fn release_picture(&mut self) {
        if let Some(handle) = self.picture.take() {
            self.store.release(handle);
        }
    }
}

impl Drop for ProfileView {
    fn drop(&mut self) {
        self.release_picture();
    }
}
