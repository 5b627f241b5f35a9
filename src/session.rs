use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::announce;
use crate::config::AppConfig;
use crate::error::{ArchiveWriteError, DataLoadError, ValidationError};
use crate::matches::MatchBoard;
use crate::persist;
use crate::roster::{self, MapCatalog, Roster};
use crate::validate::{self, ValidatedPeriod};

/// Outcome of a successful generation. The text is final even when the
/// archive write failed.
#[derive(Debug)]
pub struct Generated {
    pub text: String,
    pub period: ValidatedPeriod,
    pub archive: Result<(), ArchiveWriteError>,
}

#[derive(Debug, Clone)]
pub struct Session {
    roster: Roster,
    maps: MapCatalog,
    board: MatchBoard,
    archive_path: PathBuf,
}

impl Session {
    pub fn load(config: &AppConfig, today: NaiveDate) -> Result<Self, DataLoadError> {
        let roster = roster::load_teams(&config.teams_path)?;
        let maps = roster::load_maps(&config.maps_path)?;
        Ok(Self::new(
            roster,
            maps,
            &config.schedule_for(today),
            config.archive_path.clone(),
        ))
    }

    pub fn new(roster: Roster, maps: MapCatalog, default_schedule: &str, archive_path: PathBuf) -> Self {
        let board = MatchBoard::for_roster(&roster, default_schedule);
        Self {
            roster,
            maps,
            board,
            archive_path,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn maps(&self) -> &MapCatalog {
        &self.maps
    }

    pub fn board(&self) -> &MatchBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut MatchBoard {
        &mut self.board
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    pub fn generate(&self) -> Result<Generated, ValidationError> {
        let period = validate::validate(&self.board)?;
        let text = announce::render_period(&period);
        let archive = persist::archive(&period.results, &self.archive_path);
        Ok(Generated {
            text,
            period,
            archive,
        })
    }
}
