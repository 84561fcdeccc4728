//! Application constants
//!
//! Centralized location for labels and configuration defaults.

/// Application name
pub const APP_NAME: &str = "Profile TUI";

/// Directory under $HOME holding the config file
pub const CONFIG_DIR: &str = ".profile-tui";

/// Config file name inside CONFIG_DIR
pub const CONFIG_FILE: &str = "config.yaml";

/// Default log file (written to the working directory)
pub const DEFAULT_LOG_FILE: &str = "profile-tui.log";

/// Terminal width (columns) below which the layout is narrow
pub const DEFAULT_BREAKPOINT: u16 = 100;

/// Width of the summary drawer and the side navigation panel
pub const DRAWER_WIDTH: u16 = 32;

/// Navigation bar title
pub const NAV_TITLE: &str = "All Brands";

/// Profile page title
pub const PAGE_TITLE: &str = "Profile";

/// Placeholder for the search box
pub const SEARCH_PLACEHOLDER: &str = "Search app";

/// Shown in place of an avatar when no picture has been selected
pub const AVATAR_PLACEHOLDER: &str = "/static/images/avatar-placeholder.png";

/// Unread notifications shown on the bell badge
pub const DEFAULT_NOTIFICATIONS: u32 = 4;

/// Scheme prefix for transient picture handles
pub const PICTURE_URI_PREFIX: &str = "blob:profile-tui/";

/// Default side navigation sections
pub const DEFAULT_NAV_ITEMS: [&str; 4] = ["Overview", "Brands", "Profile", "Settings"];

/// Side navigation section that hosts the profile view
pub const PROFILE_NAV_ITEM: &str = "Profile";
