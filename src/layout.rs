//! Responsive layout selection
//!
//! The terminal width is supplied by the caller, so layout decisions stay
//! testable without a live terminal.

/// Narrow collapses the drawers behind toggles; Wide shows them permanently
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LayoutMode {
    Narrow,
    #[default]
    Wide,
}

impl LayoutMode {
    /// Widths strictly below `breakpoint` are narrow
    pub fn from_width(width: u16, breakpoint: u16) -> LayoutMode {
        if width < breakpoint {
            LayoutMode::Narrow
        } else {
            LayoutMode::Wide
        }
    }

    pub fn is_narrow(&self) -> bool {
        *self == LayoutMode::Narrow
    }

    pub fn as_str(&self) -> &str {
        match self {
            LayoutMode::Narrow => "narrow",
            LayoutMode::Wide => "wide",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_exclusive() {
        assert_eq!(LayoutMode::from_width(99, 100), LayoutMode::Narrow);
        assert_eq!(LayoutMode::from_width(100, 100), LayoutMode::Wide);
        assert_eq!(LayoutMode::from_width(240, 100), LayoutMode::Wide);
    }

    #[test]
    fn test_zero_width_is_narrow() {
        assert!(LayoutMode::from_width(0, 1).is_narrow());
        assert!(!LayoutMode::from_width(0, 0).is_narrow());
    }
}
