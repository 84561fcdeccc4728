//! View state for the navigation bar and the profile page
//!
//! Both views are independent: neither reads the other's state.

pub mod navbar;
pub mod panel;
pub mod profile;

pub use navbar::NavigationBar;
pub use panel::PanelState;
pub use profile::ProfileView;
