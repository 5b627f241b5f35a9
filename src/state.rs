use std::collections::VecDeque;
use std::io;
use std::path::Path;

use crate::clipboard::CopyOutcome;
use crate::error::{DataLoadError, GameCountBoundaryWarning, SelectionError};
use crate::matches::{TeamSlot, Winner, match_label, upcoming_label};
use crate::session::Session;
use crate::validate::MatchRecord;

const MAX_LOGS: usize = 200;
const EMPTY_CHOICE: &str = "-";

/// One editable row of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Team { index: usize, slot: TeamSlot },
    GameCount { index: usize },
    Map { index: usize, game: usize },
    Winner { index: usize, game: usize },
    Bye,
    UpcomingTeam { index: usize, slot: TeamSlot },
    Schedule { index: usize },
    Confirmed { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    pub field: Field,
    pub options: Vec<Option<String>>,
    pub selected: usize,
}

impl Picker {
    pub fn option_label(option: &Option<String>) -> &str {
        option.as_deref().unwrap_or(EMPTY_CHOICE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Picking(Picker),
    Editing { index: usize, buffer: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Next,
    Prev,
    Activate,
    Cancel,
    IncreaseGames,
    DecreaseGames,
    Generate,
    Input(char),
    Backspace,
    ToggleHelp,
    Quit,
}

pub struct AppState {
    pub session: Session,
    pub selected: usize,
    pub mode: Mode,
    pub announcement: String,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            selected: 0,
            mode: Mode::Browse,
            announcement: String::new(),
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
            should_quit: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Rows in display order. Rebuilt on every call since game counts change.
    pub fn fields(&self) -> Vec<Field> {
        let board = self.session.board();
        let mut out = Vec::new();
        for (index, m) in board.matches().iter().enumerate() {
            out.push(Field::Team {
                index,
                slot: TeamSlot::Team1,
            });
            out.push(Field::Team {
                index,
                slot: TeamSlot::Team2,
            });
            out.push(Field::GameCount { index });
            for game in 0..m.game_count() {
                out.push(Field::Map { index, game });
                out.push(Field::Winner { index, game });
            }
        }
        if board.bye_enabled() {
            out.push(Field::Bye);
        }
        for index in 0..board.upcoming().len() {
            out.push(Field::UpcomingTeam {
                index,
                slot: TeamSlot::Team1,
            });
            out.push(Field::UpcomingTeam {
                index,
                slot: TeamSlot::Team2,
            });
            out.push(Field::Schedule { index });
            out.push(Field::Confirmed { index });
        }
        out
    }

    pub fn selected_field(&self) -> Option<Field> {
        self.fields().get(self.selected).copied()
    }

    pub fn field_label(&self, field: Field) -> String {
        match field {
            Field::Team { index, slot } => format!("{} {}", match_label(index), slot_label(slot)),
            Field::GameCount { index } => format!("{} Number of Games", match_label(index)),
            Field::Map { index, game } => format!("{} Game {} Map", match_label(index), game + 1),
            Field::Winner { index, game } => {
                format!("{} Game {} Winner", match_label(index), game + 1)
            }
            Field::Bye => "Bye Team".to_string(),
            Field::UpcomingTeam { index, slot } => {
                format!("{} {}", upcoming_label(index), slot_label(slot))
            }
            Field::Schedule { index } => format!("{} Time", upcoming_label(index)),
            Field::Confirmed { index } => format!("{} Confirmed", upcoming_label(index)),
        }
    }

    pub fn field_value(&self, field: Field) -> String {
        let board = self.session.board();
        let text = |value: Option<&str>| value.unwrap_or(EMPTY_CHOICE).to_string();
        match field {
            Field::Team { index, slot } => text(board.matches().get(index).and_then(|m| m.team(slot))),
            Field::GameCount { index } => board
                .matches()
                .get(index)
                .map(|m| m.game_count().to_string())
                .unwrap_or_default(),
            Field::Map { index, game } => text(
                board
                    .matches()
                    .get(index)
                    .and_then(|m| m.games().get(game))
                    .and_then(|g| g.map.as_deref()),
            ),
            Field::Winner { index, game } => text(
                board
                    .matches()
                    .get(index)
                    .and_then(|m| m.games().get(game))
                    .and_then(|g| g.winner.as_ref())
                    .map(Winner::as_str),
            ),
            Field::Bye => text(board.bye()),
            Field::UpcomingTeam { index, slot } => {
                text(board.upcoming().get(index).and_then(|u| u.team(slot)))
            }
            Field::Schedule { index } => {
                text(board.upcoming().get(index).map(|u| u.scheduled_time.as_str()))
            }
            Field::Confirmed { index } => {
                let confirmed = board.upcoming().get(index).is_some_and(|u| u.confirmed);
                let value = if confirmed { "yes" } else { "no" };
                value.to_string()
            }
        }
    }

    /// Choices offered when a field is opened, blank first.
    pub fn choices(&self, field: Field) -> Option<Vec<Option<String>>> {
        let teams = || self.session.roster().teams().iter().cloned().map(Some);
        let mut out = vec![None];
        match field {
            Field::Team { .. } | Field::UpcomingTeam { .. } | Field::Bye => out.extend(teams()),
            Field::Map { game, .. } => out.extend(
                self.session
                    .maps()
                    .choices_for_game(game + 1)
                    .iter()
                    .cloned()
                    .map(Some),
            ),
            Field::Winner { index, .. } => {
                let m = self.session.board().matches().get(index)?;
                out.extend(m.winner_choices().into_iter().map(|w| Some(String::from(w))));
            }
            Field::GameCount { .. } | Field::Schedule { .. } | Field::Confirmed { .. } => {
                return None;
            }
        }
        Some(out)
    }

    pub fn record_copy(&mut self, outcome: io::Result<CopyOutcome>) {
        match outcome {
            Ok(CopyOutcome::Copied { bytes }) => {
                self.push_log(format!("[INFO] Copied to clipboard! ({bytes} bytes)"))
            }
            Ok(CopyOutcome::NothingToCopy) => {
                self.push_log("[WARN] No Content: There is no announcement to copy.")
            }
            Err(err) => self.push_log(format!("[ERROR] Clipboard write failed: {err}")),
        }
    }

    /// A missing archive is the normal first run and stays silent.
    pub fn record_previous_archive(&mut self, path: &Path, loaded: Result<Vec<MatchRecord>, DataLoadError>) {
        match loaded {
            Ok(previous) => self.push_log(format!(
                "[INFO] Previous archive holds {} matches ({})",
                previous.len(),
                path.display()
            )),
            Err(DataLoadError::Read { .. }) => {}
            Err(err) => self.push_log(format!("[WARN] Previous archive unreadable: {err}")),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.fields().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn report(&mut self, err: SelectionError) {
        let msg = match &err {
            SelectionError::DuplicateTeamSelection { .. } => {
                format!("[ERROR] Invalid Selection: {err}")
            }
            SelectionError::GameCountBoundary(GameCountBoundaryWarning::Maximum(_)) => {
                format!("[WARN] Maximum Games: {err}")
            }
            SelectionError::GameCountBoundary(GameCountBoundaryWarning::Minimum(_)) => {
                format!("[WARN] Minimum Games: {err}")
            }
            _ => format!("[ERROR] {err}"),
        };
        self.push_log(msg);
    }

    fn open(&mut self) {
        let Some(field) = self.selected_field() else {
            return;
        };
        match field {
            Field::Schedule { index } => {
                let buffer = self
                    .session
                    .board()
                    .upcoming()
                    .get(index)
                    .map(|u| u.scheduled_time.clone())
                    .unwrap_or_default();
                self.mode = Mode::Editing { index, buffer };
            }
            Field::Confirmed { index } => {
                let confirmed = self
                    .session
                    .board()
                    .upcoming()
                    .get(index)
                    .is_some_and(|u| u.confirmed);
                if let Err(err) = self.session.board_mut().set_confirmed(index, !confirmed) {
                    self.report(err);
                }
            }
            Field::GameCount { .. } => self.push_log("[INFO] Use +/- to change the number of games"),
            _ => {
                let Some(options) = self.choices(field) else {
                    return;
                };
                let current = self.field_value(field);
                let selected = options
                    .iter()
                    .position(|o| o.as_deref() == Some(current.as_str()))
                    .unwrap_or(0);
                self.mode = Mode::Picking(Picker {
                    field,
                    options,
                    selected,
                });
            }
        }
    }

    fn commit_pick(&mut self, picker: Picker) {
        let choice = picker.options.get(picker.selected).cloned().flatten();
        let board = self.session.board_mut();
        let result = match picker.field {
            Field::Team { index, slot } => board.set_team(index, slot, choice).map(|change| {
                if change.winners_cleared > 0 {
                    Some(format!(
                        "[INFO] {}: cleared {} game winner(s)",
                        match_label(index),
                        change.winners_cleared
                    ))
                } else {
                    None
                }
            }),
            Field::UpcomingTeam { index, slot } => {
                board.set_upcoming_team(index, slot, choice).map(|_| None)
            }
            Field::Map { index, game } => board.set_game_map(index, game, choice).map(|_| None),
            Field::Winner { index, game } => board
                .set_game_winner(index, game, choice.map(Winner::from))
                .map(|_| None),
            Field::Bye => board.set_bye(choice).map(|_| None),
            Field::GameCount { .. } | Field::Schedule { .. } | Field::Confirmed { .. } => Ok(None),
        };
        match result {
            Ok(Some(msg)) => self.push_log(msg),
            Ok(None) => {}
            Err(err) => self.report(err),
        }
    }

    fn adjust_games(&mut self, delta: isize) {
        let index = match self.selected_field() {
            Some(
                Field::Team { index, .. }
                | Field::GameCount { index }
                | Field::Map { index, .. }
                | Field::Winner { index, .. },
            ) => index,
            _ => {
                self.push_log("[INFO] Select a match to change its number of games");
                return;
            }
        };
        if let Err(err) = self.session.board_mut().set_game_count(index, delta) {
            self.report(err);
        }
        self.clamp_selection();
    }

    fn generate(&mut self) {
        match self.session.generate() {
            Ok(generated) => {
                self.announcement = generated.text;
                self.push_log(format!(
                    "[INFO] Announcement generated ({} results, {} fixtures)",
                    generated.period.results.len(),
                    generated.period.upcoming.len()
                ));
                match generated.archive {
                    Ok(()) => {
                        let path = self.session.archive_path().display().to_string();
                        self.push_log(format!("[INFO] Saved last week's matches to {path}"));
                    }
                    Err(err) => self.push_log(format!("[ERROR] {err}")),
                }
            }
            Err(err) => self.push_log(format!("[ERROR] Incomplete Selection: {err}")),
        }
    }
}

fn slot_label(slot: TeamSlot) -> &'static str {
    match slot {
        TeamSlot::Team1 => "Team 1",
        TeamSlot::Team2 => "Team 2",
    }
}

pub fn apply_action(state: &mut AppState, action: Action) {
    let mode = std::mem::replace(&mut state.mode, Mode::Browse);
    match mode {
        Mode::Picking(mut picker) => match action {
            Action::Next => {
                picker.selected = (picker.selected + 1).min(picker.options.len().saturating_sub(1));
                state.mode = Mode::Picking(picker);
            }
            Action::Prev => {
                picker.selected = picker.selected.saturating_sub(1);
                state.mode = Mode::Picking(picker);
            }
            Action::Activate => state.commit_pick(picker),
            Action::Cancel => {}
            Action::Quit => state.should_quit = true,
            _ => state.mode = Mode::Picking(picker),
        },
        Mode::Editing { index, mut buffer } => match action {
            Action::Input(c) => {
                buffer.push(c);
                state.mode = Mode::Editing { index, buffer };
            }
            Action::Backspace => {
                buffer.pop();
                state.mode = Mode::Editing { index, buffer };
            }
            Action::Activate => {
                if let Err(err) = state.session.board_mut().set_schedule(index, buffer.trim().to_string()) {
                    state.report(err);
                }
            }
            Action::Cancel => {}
            _ => state.mode = Mode::Editing { index, buffer },
        },
        Mode::Browse => match action {
            Action::Next => {
                let len = state.fields().len();
                if state.selected + 1 < len {
                    state.selected += 1;
                }
            }
            Action::Prev => state.selected = state.selected.saturating_sub(1),
            Action::Activate => state.open(),
            Action::IncreaseGames => state.adjust_games(1),
            Action::DecreaseGames => state.adjust_games(-1),
            Action::Generate => state.generate(),
            Action::ToggleHelp => state.help_overlay = !state.help_overlay,
            Action::Cancel => state.help_overlay = false,
            Action::Quit => state.should_quit = true,
            Action::Input(_) | Action::Backspace => {}
        },
    }
}
