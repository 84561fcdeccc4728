//! # Profile TUI
//!
//! A terminal account-settings page with a responsive navigation bar.
//!
//! ## Features
//! - Profile form: identity, address, bio, date of birth, user type
//! - Admin name shown only for organization accounts
//! - Session-local profile picture handles, released on replace and teardown
//! - Summary drawer with points, level and account status
//! - Side navigation panel that collapses on narrow terminals
//! - Pluggable submit hook for the Update button
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)

pub mod app;
pub mod config;
pub mod constants;
pub mod layout;
pub mod messages;
pub mod models;
pub mod picture;
pub mod submit;
pub mod ui;
pub mod views;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Settings;
pub use layout::LayoutMode;
pub use messages::{RenderState, UiEvent};
pub use models::{ProfileDraft, ProfileField, ProfileSubmission, UserType};
pub use picture::{PictureHandle, PictureStore};
pub use submit::{LogSubmitter, ProfileSubmitter};
pub use views::{NavigationBar, PanelState, ProfileView};
