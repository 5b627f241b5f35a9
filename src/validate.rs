use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::matches::{MatchBoard, Winner, match_label, tally_winner, upcoming_label};
use crate::roster::Team;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub map: String,
    pub winner: Winner,
}

/// A completed match, in the shape written to the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub team1: Team,
    pub team2: Team,
    pub games: Vec<GameRecord>,
    pub overall_winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRecord {
    pub team1: Team,
    pub team2: Team,
    pub scheduled_time: String,
    pub confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidatedPeriod {
    pub results: Vec<MatchRecord>,
    pub upcoming: Vec<FixtureRecord>,
    pub bye: Option<Team>,
}

/// Checks every slot in order and stops at the first problem. Nothing is
/// returned unless the whole board is complete.
pub fn validate(board: &MatchBoard) -> Result<ValidatedPeriod, ValidationError> {
    let mut results = Vec::with_capacity(board.matches().len());
    for (idx, m) in board.matches().iter().enumerate() {
        let label = match_label(idx);
        let (team1, team2) = distinct_teams(m.team1(), m.team2(), &label)?;

        let mut games = Vec::with_capacity(m.game_count());
        for (game_idx, game) in m.games().iter().enumerate() {
            let map = game.map.as_deref().filter(|m| !m.is_empty());
            let (Some(map), Some(winner)) = (map, game.winner.as_ref()) else {
                return Err(ValidationError::IncompleteGame {
                    label,
                    game: game_idx + 1,
                });
            };
            games.push(GameRecord {
                map: map.to_string(),
                winner: winner.clone(),
            });
        }

        let overall_winner = tally_winner(team1, team2, games.iter().map(|g| &g.winner));
        results.push(MatchRecord {
            team1: team1.to_string(),
            team2: team2.to_string(),
            games,
            overall_winner,
        });
    }

    let mut upcoming = Vec::with_capacity(board.upcoming().len());
    for (idx, fixture) in board.upcoming().iter().enumerate() {
        let label = upcoming_label(idx);
        let (team1, team2) = distinct_teams(fixture.team1.as_deref(), fixture.team2.as_deref(), &label)?;
        upcoming.push(FixtureRecord {
            team1: team1.to_string(),
            team2: team2.to_string(),
            scheduled_time: fixture.scheduled_time.clone(),
            confirmed: fixture.confirmed,
        });
    }

    let bye = board
        .bye()
        .filter(|team| !team.trim().is_empty())
        .map(str::to_string);

    Ok(ValidatedPeriod {
        results,
        upcoming,
        bye,
    })
}

fn distinct_teams<'a>(
    team1: Option<&'a str>,
    team2: Option<&'a str>,
    label: &str,
) -> Result<(&'a str, &'a str), ValidationError> {
    let (Some(team1), Some(team2)) = (non_empty(team1), non_empty(team2)) else {
        return Err(ValidationError::MissingTeam {
            label: label.to_string(),
        });
    };
    if team1 == team2 {
        return Err(ValidationError::SameTeams {
            label: label.to_string(),
        });
    }
    Ok((team1, team2))
}

fn non_empty(team: Option<&str>) -> Option<&str> {
    team.filter(|t| !t.is_empty())
}
