//! Profile TUI - Actor-based account settings page
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use profile_tui::app::AppActor;
use profile_tui::config::Settings;
use profile_tui::constants::{DRAWER_WIDTH, PAGE_TITLE, SEARCH_PLACEHOLDER};
use profile_tui::messages::ui_events::{key_to_ui_event, Focus, InputMode};
use profile_tui::messages::{RenderState, UiEvent};
use profile_tui::models::ProfileField;
use profile_tui::ui::{
    avatar_label, centered_rect, focus_style, initials, or_placeholder, render_button,
    render_input, render_progress,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (settings, config_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", &settings.log_file);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    if let Some(e) = config_error {
        tracing::warn!(error = %format!("{:#}", e), "Config unreadable, using defaults");
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn app actor
    let app_actor = AppActor::new(&settings, render_tx);
    let app_handle = tokio::spawn(app_actor.run(ui_rx));

    // Seed the layout with the starting terminal width
    let size = terminal.size()?;
    let _ = ui_tx.send(UiEvent::Resize(size.width));

    // Run UI loop (synchronous with async polling)
    let result = run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await;

    // Let the actor finish its teardown
    let _ = app_handle.await;

    result
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(event) = key_to_ui_event(
                        key,
                        current_state.focus,
                        current_state.input_mode,
                        current_state.show_help,
                        current_state.show_picture_input,
                    ) {
                        let quit = matches!(event, UiEvent::Quit);
                        let _ = ui_tx.send(event);
                        if quit {
                            break;
                        }
                    }
                }
                Event::Resize(width, _) => {
                    let _ = ui_tx.send(UiEvent::Resize(width));
                }
                _ => {}
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Navigation bar
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_nav_bar(f, state, main_chunks[0]);
    draw_body(f, state, main_chunks[1]);
    draw_status_bar(f, state, main_chunks[2]);

    // Popups
    if state.show_help {
        draw_help_popup(f, area);
    }

    if state.show_picture_input {
        draw_picture_input_popup(f, state, area);
    }
}

fn draw_nav_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let narrow = state.layout.is_narrow();

    let mut constraints = Vec::new();
    if narrow {
        constraints.push(Constraint::Length(5)); // Menu trigger
    }
    constraints.push(Constraint::Length(state.nav_title.len() as u16 + 4));
    if state.search_visible {
        constraints.push(Constraint::Min(20)); // Search
        constraints.push(Constraint::Length(10)); // Invite
    } else {
        constraints.push(Constraint::Min(0));
    }
    constraints.push(Constraint::Length(6)); // Notifications
    constraints.push(Constraint::Length(6)); // Avatar

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let mut idx = 0;
    if narrow {
        let menu = Paragraph::new(" ≡ ")
            .block(Block::default().borders(Borders::ALL).title("n"))
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(menu, chunks[idx]);
        idx += 1;
    }

    let title = Paragraph::new(Span::styled(
        format!(" {} ", state.nav_title),
        Style::default().bold(),
    ))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[idx]);
    idx += 1;

    if state.search_visible {
        let is_focused = state.focus == Focus::Search;
        let editing = is_focused && state.input_mode == InputMode::Editing;
        let search = render_input(
            &state.search_query,
            SEARCH_PLACEHOLDER,
            String::from(" Search "),
            is_focused,
            editing,
        );
        f.render_widget(search, chunks[idx]);
        if editing {
            set_cursor(f, chunks[idx], &state.search_query, state.cursor_position);
        }
        idx += 1;

        let invite = Paragraph::new(" Invite ")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Magenta).bold());
        f.render_widget(invite, chunks[idx]);
    }
    idx += 1;

    let bell_style = if state.has_unread {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let bell = if state.has_unread { "🔔•" } else { "🔔" };
    let notifications = Paragraph::new(bell)
        .style(bell_style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(notifications, chunks[idx]);
    idx += 1;

    let avatar = Paragraph::new(initials(&state.full_name()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(avatar, chunks[idx]);
}

fn draw_body(f: &mut Frame, state: &RenderState, area: Rect) {
    if state.layout.is_narrow() {
        // Temporary drawers float over the page
        draw_settings(f, state, area);

        let mut x = area.x;
        if state.side_panel_visible {
            let width = (DRAWER_WIDTH / 2).min(area.width);
            let panel = Rect::new(x, area.y, width, area.height);
            f.render_widget(Clear, panel);
            draw_side_nav(f, state, panel);
            x += width;
        }
        if state.drawer_visible {
            let width = DRAWER_WIDTH.min(area.width.saturating_sub(x - area.x));
            let drawer = Rect::new(x, area.y, width, area.height);
            f.render_widget(Clear, drawer);
            draw_summary_drawer(f, state, drawer);
        }
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(DRAWER_WIDTH / 2),
            Constraint::Length(DRAWER_WIDTH),
            Constraint::Min(0),
        ])
        .split(area);

    draw_side_nav(f, state, chunks[0]);
    draw_summary_drawer(f, state, chunks[1]);
    draw_settings(f, state, chunks[2]);
}

fn draw_side_nav(f: &mut Frame, state: &RenderState, area: Rect) {
    let items: Vec<ListItem> = state
        .nav_items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == state.active_nav_item {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            ListItem::new(format!(" {}", item)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Menu "),
    );
    f.render_widget(list, area);
}

fn draw_summary_drawer(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", PAGE_TITLE));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Identity + personal info + points
            Constraint::Length(1),  // Level progress
            Constraint::Min(0),     // Account
        ])
        .split(inner);

    let draft = &state.draft;
    let dim = Style::default().fg(Color::DarkGray);
    let name = state.full_name();

    let top = vec![
        Line::from(avatar_label(state.picture.as_ref())),
        Line::from(Span::styled(or_placeholder(&name, " ").to_string(), Style::default().bold())),
        Line::from(Span::styled(draft.user_type_label().to_string(), dim)),
        Line::from(""),
        Line::from(format!("Bio: {}", or_placeholder(&draft.form.bio, "No bio available"))),
        Line::from(format!("Email: {}", or_placeholder(&draft.form.email, "Not provided"))),
        Line::from(format!("Phone: {}", or_placeholder(&draft.form.phone_number, "Not provided"))),
        Line::from(""),
        Line::from(format!("Points: {}", draft.gamification.points)),
        Line::from(format!("Level: {}", draft.gamification.level)),
    ];
    f.render_widget(Paragraph::new(top).wrap(Wrap { trim: true }), chunks[0]);

    f.render_widget(render_progress(draft.gamification.progress_ratio()), chunks[1]);

    let account = vec![
        Line::from(Span::styled("[ Redeem Points ]", Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(format!("Achievements: {}", draft.account.achievements_label())),
        Line::from(""),
        Line::from(format!("Subscription: {}", draft.account.subscription)),
        Line::from(format!("Renewal: {}", draft.account.renewal)),
        Line::from(Span::styled("Security Settings", Style::default().underlined())),
        Line::from(""),
        Line::from(Span::styled("View Public Profile", Style::default().underlined())),
    ];
    f.render_widget(Paragraph::new(account).wrap(Wrap { trim: true }), chunks[2]);
}

fn draw_settings(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Account Settings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (picture_area, form_area) = if state.layout.is_narrow() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(inner);
        (chunks[0], chunks[1])
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(33), Constraint::Percentage(67)])
            .split(inner);
        (chunks[0], chunks[1])
    };

    draw_picture_box(f, state, picture_area);
    draw_form(f, state, form_area);
}

fn draw_picture_box(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = vec![Line::from(avatar_label(state.picture.as_ref()))];
    if let Some(picture) = &state.picture {
        lines.push(Line::from(Span::styled(
            picture.uri.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(Span::styled(
        "p: Change Picture",
        Style::default().fg(Color::Cyan),
    )));

    let picture = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Picture "));
    f.render_widget(picture, area);
}

fn draw_form(f: &mut Frame, state: &RenderState, area: Rect) {
    // Rows of (left, right) elements; right None spans the full width
    let mut rows: Vec<(Focus, Option<Focus>)> = vec![
        (Focus::Field(ProfileField::Bio), None),
        (Focus::Field(ProfileField::FirstName), Some(Focus::Field(ProfileField::LastName))),
        (Focus::Field(ProfileField::Email), Some(Focus::Field(ProfileField::PhoneNumber))),
        (Focus::Field(ProfileField::City), Some(Focus::Field(ProfileField::StateCounty))),
        (Focus::Field(ProfileField::Postcode), Some(Focus::Field(ProfileField::Country))),
        (Focus::DateOfBirth, Some(Focus::UserType)),
    ];
    if state.admin_name_visible() {
        rows.push((Focus::AdminName, None));
    }

    let mut constraints: Vec<Constraint> = rows.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(1)); // Update button
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, (left, right)) in rows.iter().enumerate() {
        match right {
            Some(right) => {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(chunks[i]);
                draw_form_element(f, state, *left, halves[0]);
                draw_form_element(f, state, *right, halves[1]);
            }
            None => draw_form_element(f, state, *left, chunks[i]),
        }
    }

    let button = render_button("Update", state.focus == Focus::Update);
    f.render_widget(button, chunks[rows.len()]);
}

fn draw_form_element(f: &mut Frame, state: &RenderState, focus: Focus, area: Rect) {
    let is_focused = state.focus == focus;
    let editing = is_focused && state.input_mode == InputMode::Editing;

    match focus {
        Focus::UserType => {
            let (text, style) = match state.draft.user_type {
                Some(t) => (t.label(), Style::default()),
                None => ("Select...", Style::default().fg(Color::DarkGray)),
            };
            let select = Paragraph::new(Span::styled(format!("{} ▾", text), style)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(focus_style(is_focused, false))
                    .title(" User Type "),
            );
            f.render_widget(select, area);
        }
        Focus::DateOfBirth => {
            let display = state.draft.date_of_birth_display();
            let title = if display != state.draft.date_of_birth {
                format!(" Date of Birth ({}) ", display)
            } else {
                String::from(" Date of Birth ")
            };
            let text = state.text_for(focus);
            f.render_widget(render_input(text, "YYYY-MM-DD", title, is_focused, editing), area);
            if editing {
                set_cursor(f, area, text, state.cursor_position);
            }
        }
        _ => {
            let text = state.text_for(focus);
            let title = format!(" {} ", focus.label());
            f.render_widget(render_input(text, "", title, is_focused, editing), area);
            if editing {
                set_cursor(f, area, text, state.cursor_position);
            }
        }
    }
}

/// Place the terminal cursor inside a bordered input
fn set_cursor(f: &mut Frame, area: Rect, text: &str, cursor_position: usize) {
    let column = text
        .get(..cursor_position)
        .map(|s| s.chars().count())
        .unwrap_or(0) as u16;
    let max_x = area.x + area.width.saturating_sub(2);
    let cursor_x = (area.x + column + 1).min(max_x);
    f.set_cursor_position(Position::new(cursor_x, area.y + 1));
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Tab:next field | Ctrl+S:update "
    } else if state.layout.is_narrow() {
        " Tab:field | e:edit | n:menu | m:profile | p:picture | ?:help | q:quit "
    } else {
        " Tab:field | e:edit | p:picture | Ctrl+S:update | ?:help | q:quit "
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::DarkGray))];
    if let Some(status) = &state.status {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Green),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 PROFILE TUI - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Next / previous field
   n                  Toggle side menu (narrow terminals)
   m                  Toggle profile drawer (narrow terminals)
   Esc                Close side menu and drawer

 FORM
   e / Enter          Edit field
   Enter              Cycle user type / press Update
   Ctrl+S             Update profile
   p                  Change picture (Tab completes paths)

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_picture_input_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Change Picture (Enter to select, Esc to cancel) ")
        .style(Style::default().bg(Color::Black));

    let content = if state.picture_path_input.is_empty() {
        "Enter image file path...\n\nExample: ~/Pictures/avatar.png"
    } else {
        state.picture_path_input.as_str()
    };

    let input = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(input, popup_area);
}
