//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::layout::LayoutMode;
use crate::models::ProfileField;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Focus navigation
    NextFocus,
    PrevFocus,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Form actions
    CycleUserType,
    Submit,

    // Panels
    ToggleSidePanel,
    ToggleDrawer,
    ClosePanels,

    // Picture selection
    OpenPictureInput,
    PicturePathChar(char),
    PicturePathBackspace,
    PicturePathAutocomplete,
    SelectPicture,
    CancelPictureInput,

    // Terminal
    Resize(u16),

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focusable element, in tab order
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Search,
    Field(ProfileField),
    DateOfBirth,
    UserType,
    AdminName,
    Update,
}

impl Focus {
    /// Full ring; `available` filters it for the current state
    fn ring() -> Vec<Focus> {
        let mut ring = vec![Focus::Search];
        ring.extend(ProfileField::ALL.into_iter().map(Focus::Field));
        ring.extend([Focus::DateOfBirth, Focus::UserType, Focus::AdminName, Focus::Update]);
        ring
    }

    /// Whether this element is laid out at all
    pub fn available(&self, layout: LayoutMode, admin_visible: bool) -> bool {
        match self {
            Focus::Search => layout == LayoutMode::Wide,
            Focus::AdminName => admin_visible,
            _ => true,
        }
    }

    pub fn next(&self, layout: LayoutMode, admin_visible: bool) -> Focus {
        self.step(layout, admin_visible, true)
    }

    pub fn prev(&self, layout: LayoutMode, admin_visible: bool) -> Focus {
        self.step(layout, admin_visible, false)
    }

    fn step(&self, layout: LayoutMode, admin_visible: bool, forward: bool) -> Focus {
        let ring = Focus::ring();
        let len = ring.len();
        let start = ring.iter().position(|f| f == self).unwrap_or(0);
        (1..=len)
            .map(|offset| {
                if forward {
                    ring[(start + offset) % len]
                } else {
                    ring[(start + len - offset) % len]
                }
            })
            .find(|f| f.available(layout, admin_visible))
            .unwrap_or(*self)
    }

    /// Elements that take typed text
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Focus::Search | Focus::Field(_) | Focus::DateOfBirth | Focus::AdminName
        )
    }

    pub fn label(&self) -> &str {
        match self {
            Focus::Search => "Search",
            Focus::Field(field) => field.label(),
            Focus::DateOfBirth => "Date of Birth",
            Focus::UserType => "User Type",
            Focus::AdminName => "Admin Name",
            Focus::Update => "Update",
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    focus: Focus,
    input_mode: InputMode,
    show_help: bool,
    show_picture_input: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('s') => return Some(UiEvent::Submit),
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if show_picture_input {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelPictureInput),
            KeyCode::Enter => Some(UiEvent::SelectPicture),
            KeyCode::Tab => Some(UiEvent::PicturePathAutocomplete),
            KeyCode::Backspace => Some(UiEvent::PicturePathBackspace),
            KeyCode::Char(c) => Some(UiEvent::PicturePathChar(c)),
            _ => None,
        };
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextFocus),
            KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevFocus),
            KeyCode::Char('n') => Some(UiEvent::ToggleSidePanel),
            KeyCode::Char('m') => Some(UiEvent::ToggleDrawer),
            KeyCode::Char('p') => Some(UiEvent::OpenPictureInput),
            KeyCode::Esc => Some(UiEvent::ClosePanels),
            KeyCode::Char('e') | KeyCode::Enter | KeyCode::Char(' ') => match focus {
                Focus::UserType => Some(UiEvent::CycleUserType),
                Focus::Update => Some(UiEvent::Submit),
                _ => Some(UiEvent::StartEditing),
            },
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Tab => Some(UiEvent::NextFocus),
            KeyCode::BackTab => Some(UiEvent::PrevFocus),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}
