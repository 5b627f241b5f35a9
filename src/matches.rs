use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameCountBoundaryWarning, SelectionError};
use crate::roster::{Roster, Team};

pub const MIN_GAMES: usize = 3;
pub const MAX_GAMES: usize = 6;
pub const DRAW: &str = "Draw";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Winner {
    Draw,
    Team(Team),
}

impl Winner {
    pub fn as_str(&self) -> &str {
        match self {
            Winner::Draw => DRAW,
            Winner::Team(team) => team,
        }
    }

    pub fn team(&self) -> Option<&str> {
        match self {
            Winner::Draw => None,
            Winner::Team(team) => Some(team),
        }
    }
}

impl From<String> for Winner {
    fn from(raw: String) -> Self {
        if raw == DRAW {
            Winner::Draw
        } else {
            Winner::Team(raw)
        }
    }
}

impl From<Winner> for String {
    fn from(winner: Winner) -> Self {
        match winner {
            Winner::Draw => DRAW.to_string(),
            Winner::Team(team) => team,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSlot {
    Team1,
    Team2,
}

impl TeamSlot {
    pub fn other(self) -> TeamSlot {
        match self {
            TeamSlot::Team1 => TeamSlot::Team2,
            TeamSlot::Team2 => TeamSlot::Team1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameResult {
    pub map: Option<String>,
    pub winner: Option<Winner>,
}

/// Majority of per-game winners; ties (including all draws) are a draw.
pub fn tally_winner<'a>(
    team1: &str,
    team2: &str,
    winners: impl IntoIterator<Item = &'a Winner>,
) -> Winner {
    let mut team1_wins = 0usize;
    let mut team2_wins = 0usize;
    for winner in winners {
        match winner.team() {
            Some(team) if team == team1 => team1_wins += 1,
            Some(team) if team == team2 => team2_wins += 1,
            _ => {}
        }
    }
    if team1_wins > team2_wins {
        Winner::Team(team1.to_string())
    } else if team2_wins > team1_wins {
        Winner::Team(team2.to_string())
    } else {
        Winner::Draw
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    team1: Option<Team>,
    team2: Option<Team>,
    games: Vec<GameResult>,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    pub fn new() -> Self {
        Self {
            team1: None,
            team2: None,
            games: vec![GameResult::default(); MIN_GAMES],
        }
    }

    pub fn team(&self, slot: TeamSlot) -> Option<&str> {
        match slot {
            TeamSlot::Team1 => self.team1.as_deref(),
            TeamSlot::Team2 => self.team2.as_deref(),
        }
    }

    pub fn team1(&self) -> Option<&str> {
        self.team1.as_deref()
    }

    pub fn team2(&self) -> Option<&str> {
        self.team2.as_deref()
    }

    pub fn games(&self) -> &[GameResult] {
        &self.games
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    pub fn winner_choices(&self) -> Vec<Winner> {
        let mut out = vec![Winner::Draw];
        out.extend(self.team1.iter().cloned().map(Winner::Team));
        out.extend(self.team2.iter().cloned().map(Winner::Team));
        out
    }

    pub fn overall_winner(&self) -> Winner {
        tally_winner(
            self.team1.as_deref().unwrap_or_default(),
            self.team2.as_deref().unwrap_or_default(),
            self.games.iter().filter_map(|g| g.winner.as_ref()),
        )
    }

    fn slot_mut(&mut self, slot: TeamSlot) -> &mut Option<Team> {
        match slot {
            TeamSlot::Team1 => &mut self.team1,
            TeamSlot::Team2 => &mut self.team2,
        }
    }

    fn clear_winners(&mut self) -> usize {
        let mut cleared = 0;
        for game in &mut self.games {
            if game.winner.take().is_some() {
                cleared += 1;
            }
        }
        cleared
    }

    fn allows_winner(&self, winner: &Winner) -> bool {
        match winner.team() {
            None => true,
            Some(team) => self.team1.as_deref() == Some(team) || self.team2.as_deref() == Some(team),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingMatch {
    pub team1: Option<Team>,
    pub team2: Option<Team>,
    pub scheduled_time: String,
    pub confirmed: bool,
}

impl UpcomingMatch {
    pub fn new(scheduled_time: impl Into<String>) -> Self {
        Self {
            team1: None,
            team2: None,
            scheduled_time: scheduled_time.into(),
            confirmed: false,
        }
    }

    pub fn team(&self, slot: TeamSlot) -> Option<&str> {
        match slot {
            TeamSlot::Team1 => self.team1.as_deref(),
            TeamSlot::Team2 => self.team2.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamChange {
    pub winners_cleared: usize,
}

pub fn match_label(index: usize) -> String {
    format!("Match {}", index + 1)
}

pub fn upcoming_label(index: usize) -> String {
    format!("Next Week Match {}", index + 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBoard {
    matches: Vec<Match>,
    upcoming: Vec<UpcomingMatch>,
    bye_enabled: bool,
    bye: Option<Team>,
}

impl MatchBoard {
    pub fn new(num_matches: usize, bye_enabled: bool, default_schedule: &str) -> Self {
        Self {
            matches: vec![Match::new(); num_matches],
            upcoming: vec![UpcomingMatch::new(default_schedule); num_matches],
            bye_enabled,
            bye: None,
        }
    }

    pub fn for_roster(roster: &Roster, default_schedule: &str) -> Self {
        Self::new(roster.num_matches(), roster.has_bye(), default_schedule)
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn upcoming(&self) -> &[UpcomingMatch] {
        &self.upcoming
    }

    pub fn bye_enabled(&self) -> bool {
        self.bye_enabled
    }

    pub fn bye(&self) -> Option<&str> {
        self.bye.as_deref()
    }

    pub fn get(&self, index: usize) -> Result<&Match, SelectionError> {
        let len = self.matches.len();
        self.matches
            .get(index)
            .ok_or(SelectionError::MatchOutOfRange { index, len })
    }

    /// Assigns a team and synchronously resets every winner of the match so
    /// no game keeps a winner that is no longer playing. Picking the team
    /// already in the other slot empties this slot instead.
    pub fn set_team(
        &mut self,
        index: usize,
        slot: TeamSlot,
        team: Option<Team>,
    ) -> Result<TeamChange, SelectionError> {
        let m = self.match_mut(index)?;
        let duplicate = team.is_some() && team.as_deref() == m.team(slot.other());
        *m.slot_mut(slot) = if duplicate { None } else { team.clone() };
        let winners_cleared = m.clear_winners();

        if duplicate {
            return Err(SelectionError::DuplicateTeamSelection {
                label: match_label(index),
                team: team.unwrap_or_default(),
            });
        }
        Ok(TeamChange { winners_cleared })
    }

    /// Moves the game count by `delta`. A count that would leave
    /// `MIN_GAMES..=MAX_GAMES` is rejected without touching the match.
    pub fn set_game_count(&mut self, index: usize, delta: isize) -> Result<usize, SelectionError> {
        let m = self.match_mut(index)?;
        let current = m.games.len() as isize;
        let target = current + delta;
        if target > MAX_GAMES as isize {
            return Err(GameCountBoundaryWarning::Maximum(MAX_GAMES).into());
        }
        if target < MIN_GAMES as isize {
            return Err(GameCountBoundaryWarning::Minimum(MIN_GAMES).into());
        }
        m.games.resize(target as usize, GameResult::default());
        Ok(m.games.len())
    }

    pub fn set_game_map(
        &mut self,
        index: usize,
        game: usize,
        map: Option<String>,
    ) -> Result<(), SelectionError> {
        self.game_mut(index, game)?.map = map;
        Ok(())
    }

    pub fn set_game_winner(
        &mut self,
        index: usize,
        game: usize,
        winner: Option<Winner>,
    ) -> Result<(), SelectionError> {
        if let Some(w) = winner.as_ref() {
            let m = self.get(index)?;
            if !m.allows_winner(w) {
                return Err(SelectionError::WinnerNotInMatch {
                    label: match_label(index),
                    winner: w.to_string(),
                });
            }
        }
        self.game_mut(index, game)?.winner = winner;
        Ok(())
    }

    pub fn set_game_result(
        &mut self,
        index: usize,
        game: usize,
        map: Option<String>,
        winner: Option<Winner>,
    ) -> Result<(), SelectionError> {
        self.set_game_winner(index, game, winner)?;
        self.set_game_map(index, game, map)
    }

    pub fn set_upcoming_team(
        &mut self,
        index: usize,
        slot: TeamSlot,
        team: Option<Team>,
    ) -> Result<(), SelectionError> {
        let fixture = self.upcoming_mut(index)?;
        let duplicate = team.is_some() && team.as_deref() == fixture.team(slot.other());
        let target = match slot {
            TeamSlot::Team1 => &mut fixture.team1,
            TeamSlot::Team2 => &mut fixture.team2,
        };
        if duplicate {
            *target = None;
            return Err(SelectionError::DuplicateTeamSelection {
                label: upcoming_label(index),
                team: team.unwrap_or_default(),
            });
        }
        *target = team;
        Ok(())
    }

    pub fn set_schedule(&mut self, index: usize, scheduled_time: String) -> Result<(), SelectionError> {
        self.upcoming_mut(index)?.scheduled_time = scheduled_time;
        Ok(())
    }

    pub fn set_confirmed(&mut self, index: usize, confirmed: bool) -> Result<(), SelectionError> {
        self.upcoming_mut(index)?.confirmed = confirmed;
        Ok(())
    }

    pub fn set_bye(&mut self, team: Option<Team>) -> Result<(), SelectionError> {
        if !self.bye_enabled {
            return Err(SelectionError::ByeUnavailable);
        }
        self.bye = team;
        Ok(())
    }

    fn match_mut(&mut self, index: usize) -> Result<&mut Match, SelectionError> {
        let len = self.matches.len();
        self.matches
            .get_mut(index)
            .ok_or(SelectionError::MatchOutOfRange { index, len })
    }

    fn game_mut(&mut self, index: usize, game: usize) -> Result<&mut GameResult, SelectionError> {
        self.match_mut(index)?
            .games
            .get_mut(game)
            .ok_or_else(|| SelectionError::GameOutOfRange {
                label: match_label(index),
                game: game + 1,
            })
    }

    fn upcoming_mut(&mut self, index: usize) -> Result<&mut UpcomingMatch, SelectionError> {
        let len = self.upcoming.len();
        self.upcoming
            .get_mut(index)
            .ok_or(SelectionError::MatchOutOfRange { index, len })
    }
}
