use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use pocket_coordinator::clipboard;
use pocket_coordinator::config::AppConfig;
use pocket_coordinator::persist;
use pocket_coordinator::session::Session;
use pocket_coordinator::state::{Action, AppState, Mode, Picker, apply_action};

struct App {
    state: AppState,
    copy_requested: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            copy_requested: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let action = match &self.state.mode {
            Mode::Editing { .. } => match key.code {
                KeyCode::Enter => Some(Action::Activate),
                KeyCode::Esc => Some(Action::Cancel),
                KeyCode::Backspace => Some(Action::Backspace),
                KeyCode::Char(c) => Some(Action::Input(c)),
                _ => None,
            },
            Mode::Picking(_) => match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Action::Next),
                KeyCode::Char('k') | KeyCode::Up => Some(Action::Prev),
                KeyCode::Enter => Some(Action::Activate),
                KeyCode::Esc => Some(Action::Cancel),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            Mode::Browse => match key.code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('j') | KeyCode::Down => Some(Action::Next),
                KeyCode::Char('k') | KeyCode::Up => Some(Action::Prev),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
                KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::IncreaseGames),
                KeyCode::Char('-') => Some(Action::DecreaseGames),
                KeyCode::Char('g') | KeyCode::Char('G') => Some(Action::Generate),
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    self.copy_requested = true;
                    None
                }
                KeyCode::Char('?') => Some(Action::ToggleHelp),
                KeyCode::Esc => Some(Action::Cancel),
                _ => None,
            },
        };
        if let Some(action) = action {
            apply_action(&mut self.state, action);
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();
    let today = chrono::Local::now().date_naive();
    let session = Session::load(&config, today).context("unable to start session")?;

    let mut state = AppState::new(session);
    state.push_log(format!(
        "[INFO] Loaded {} teams, {} maps",
        state.session.roster().len(),
        state.session.maps().len()
    ));
    let previous = persist::load_archive(&config.archive_path);
    state.record_previous_archive(&config.archive_path, previous);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(state);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui(f, &app.state))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.copy_requested {
            app.copy_requested = false;
            let outcome = clipboard::copy_to_clipboard(&mut io::stdout(), &app.state.announcement);
            app.state.record_copy(outcome);
        }

        if app.state.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);
    render_form(frame, columns[0], state);
    render_announcement(frame, columns[1], state);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if let Mode::Picking(picker) = &state.mode {
        render_picker(frame, frame.size(), state, picker);
    }
    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let roster = state.session.roster();
    let bye = if roster.has_bye() { " | bye slot" } else { "" };
    let line1 = format!(
        "  .-.  POCKET COORDINATOR | {} teams | {} matches{bye}",
        roster.len(),
        roster.num_matches()
    );
    let line2 = " /___\\".to_string();
    let line3 = "  |_|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.mode {
        Mode::Browse => {
            "j/k/↑/↓ Move | Enter Pick | +/- Games | g Generate | c Copy | ? Help | q Quit".to_string()
        }
        Mode::Picking(_) => "j/k/↑/↓ Choose | Enter Select | Esc Cancel".to_string(),
        Mode::Editing { .. } => "Type time | Backspace Delete | Enter Save | Esc Cancel".to_string(),
    }
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Matches").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = state.fields();
    if fields.is_empty() {
        let empty = Paragraph::new("Not enough teams for a match").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }
    if inner.height == 0 {
        return;
    }

    let (start, end) = visible_range(state.selected, fields.len(), inner.height as usize);
    for (row, idx) in (start..end).enumerate() {
        let field = fields[idx];
        let selected = idx == state.selected;
        let value = match &state.mode {
            Mode::Editing { buffer, .. } if selected => format!("{buffer}_"),
            _ => state.field_value(field),
        };
        let style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let row_area = Rect {
            x: inner.x,
            y: inner.y + row as u16,
            width: inner.width,
            height: 1,
        };
        let line = format!("{:<32} {value}", state.field_label(field));
        frame.render_widget(Paragraph::new(line).style(style), row_area);
    }
}

fn render_announcement(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = if state.announcement.is_empty() {
        "Press g to generate the announcement".to_string()
    } else {
        state.announcement.clone()
    };
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Announcement").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_picker(frame: &mut Frame, area: Rect, state: &AppState, picker: &Picker) {
    let popup_area = centered_rect(50, 60, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(state.field_label(picker.field))
        .borders(Borders::ALL);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    if inner.height == 0 {
        return;
    }

    let (start, end) = visible_range(picker.selected, picker.options.len(), inner.height as usize);
    for (row, idx) in (start..end).enumerate() {
        let style = if idx == picker.selected {
            Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let row_area = Rect {
            x: inner.x,
            y: inner.y + row as u16,
            width: inner.width,
            height: 1,
        };
        let label = Picker::option_label(&picker.options[idx]);
        frame.render_widget(Paragraph::new(label.to_string()).style(style), row_area);
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let skip = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Pocket Coordinator - Help",
        "",
        "Form:",
        "  j/k or ↑/↓   Move between fields",
        "  Enter        Pick team/map/winner, edit time, toggle confirmed",
        "  + / -        More or fewer games (3 to 6)",
        "  g            Generate announcement and save results",
        "  c            Copy announcement to clipboard",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Picker:",
        "  j/k or ↑/↓   Move",
        "  Enter / Esc  Select / cancel",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
