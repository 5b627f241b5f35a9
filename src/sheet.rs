use serde::Deserialize;

use crate::error::SelectionError;
use crate::matches::{MIN_GAMES, MatchBoard, TeamSlot, Winner};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchSheet {
    #[serde(default)]
    pub matches: Vec<SheetMatch>,
    #[serde(default)]
    pub upcoming: Vec<SheetFixture>,
    #[serde(default)]
    pub bye: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetMatch {
    pub team1: Option<String>,
    pub team2: Option<String>,
    #[serde(default)]
    pub games: Vec<SheetGame>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetGame {
    pub map: Option<String>,
    pub winner: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetFixture {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub scheduled_time: Option<String>,
    #[serde(default)]
    pub confirmed: bool,
}

pub fn parse_sheet(raw: &str) -> Result<MatchSheet, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Replays the sheet through the board's setters so every selection rule
/// applies exactly as it does in the form.
pub fn apply_sheet(sheet: &MatchSheet, board: &mut MatchBoard) -> Result<(), SelectionError> {
    for (idx, entry) in sheet.matches.iter().enumerate() {
        board.set_team(idx, TeamSlot::Team1, entry.team1.clone())?;
        board.set_team(idx, TeamSlot::Team2, entry.team2.clone())?;

        let current = board.get(idx)?.game_count() as isize;
        let wanted = entry.games.len().max(MIN_GAMES) as isize;
        if wanted != current {
            board.set_game_count(idx, wanted - current)?;
        }
        for (game, result) in entry.games.iter().enumerate() {
            let winner = result.winner.clone().map(Winner::from);
            board.set_game_result(idx, game, result.map.clone(), winner)?;
        }
    }

    for (idx, fixture) in sheet.upcoming.iter().enumerate() {
        board.set_upcoming_team(idx, TeamSlot::Team1, fixture.team1.clone())?;
        board.set_upcoming_team(idx, TeamSlot::Team2, fixture.team2.clone())?;
        if let Some(time) = fixture.scheduled_time.as_ref() {
            board.set_schedule(idx, time.clone())?;
        }
        board.set_confirmed(idx, fixture.confirmed)?;
    }

    if let Some(team) = sheet.bye.as_ref().filter(|t| !t.trim().is_empty()) {
        board.set_bye(Some(team.clone()))?;
    }
    Ok(())
}
