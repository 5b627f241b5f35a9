use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::DataLoadError;
use crate::matches::DRAW;

pub type Team = String;

const MAP_NAME_DELIMITER: &str = "__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameMode {
    Control,
    Hybrid,
    Flashpoint,
    Push,
    Escort,
    Clash,
}

impl GameMode {
    pub const ALL: [GameMode; 6] = [
        GameMode::Control,
        GameMode::Hybrid,
        GameMode::Flashpoint,
        GameMode::Push,
        GameMode::Escort,
        GameMode::Clash,
    ];

    /// Mode played in the 1-based `game` of a match. Games past the sixth
    /// stay on the last mode.
    pub fn for_game(game: usize) -> GameMode {
        let idx = game.clamp(1, Self::ALL.len()) - 1;
        Self::ALL[idx]
    }

    pub fn key(self) -> &'static str {
        match self {
            GameMode::Control => "control",
            GameMode::Hybrid => "hybrid",
            GameMode::Flashpoint => "flashpoint",
            GameMode::Push => "push",
            GameMode::Escort => "escort",
            GameMode::Clash => "clash",
        }
    }

    pub fn from_key(raw: &str) -> Option<GameMode> {
        let key = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|mode| mode.key() == key)
    }
}

/// Teams for one session, sorted alphabetically. Duplicates in the source
/// are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    teams: Vec<Team>,
}

impl Roster {
    pub fn new(mut teams: Vec<Team>) -> Self {
        teams.sort();
        Self { teams }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn num_matches(&self) -> usize {
        self.teams.len() / 2
    }

    pub fn has_bye(&self) -> bool {
        self.teams.len() % 2 == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapCatalog {
    /// Every game offers the same maps.
    Flat(Vec<String>),
    /// Game N offers the maps of `GameMode::for_game(N)`.
    ByMode(BTreeMap<GameMode, Vec<String>>),
}

impl MapCatalog {
    pub fn choices_for_game(&self, game: usize) -> &[String] {
        match self {
            MapCatalog::Flat(maps) => maps,
            MapCatalog::ByMode(by_mode) => by_mode
                .get(&GameMode::for_game(game))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            MapCatalog::Flat(maps) => maps.len(),
            MapCatalog::ByMode(by_mode) => by_mode.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMaps {
    Flat(Vec<String>),
    ByMode(BTreeMap<String, Vec<String>>),
}

/// Display name embedded in a raw map identifier (`tag__Name__extra`).
pub fn map_display_name(raw: &str) -> Result<&str, DataLoadError> {
    let mut parts = raw.split(MAP_NAME_DELIMITER);
    let _tag = parts.next();
    parts
        .next()
        .map(str::trim)
        .ok_or_else(|| DataLoadError::InvalidMapName {
            entry: raw.to_string(),
        })
}

pub fn load_teams(path: &Path) -> Result<Roster, DataLoadError> {
    let raw = read_source(path)?;
    let teams = serde_json::from_str::<Vec<Team>>(&raw).map_err(|source| DataLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(entry) = teams.iter().find(|team| team.as_str() == DRAW) {
        return Err(DataLoadError::ReservedTeamName {
            entry: entry.clone(),
        });
    }
    Ok(Roster::new(teams))
}

pub fn load_maps(path: &Path) -> Result<MapCatalog, DataLoadError> {
    let raw = read_source(path)?;
    catalog_from_json(&raw, path)
}

pub fn catalog_from_json(raw: &str, path: &Path) -> Result<MapCatalog, DataLoadError> {
    let parsed = serde_json::from_str::<RawMaps>(raw).map_err(|source| DataLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match parsed {
        RawMaps::Flat(maps) => Ok(MapCatalog::Flat(sort_maps(maps)?)),
        RawMaps::ByMode(entries) => {
            let mut by_mode = BTreeMap::new();
            for (key, maps) in entries {
                let mode = GameMode::from_key(&key)
                    .ok_or_else(|| DataLoadError::UnknownGameMode { key: key.clone() })?;
                if by_mode.contains_key(&mode) {
                    return Err(DataLoadError::DuplicateGameMode { key });
                }
                by_mode.insert(mode, sort_maps(maps)?);
            }
            // Every game index needs at least one map to pick from.
            if let Some(mode) = GameMode::ALL
                .into_iter()
                .find(|mode| by_mode.get(mode).is_none_or(Vec::is_empty))
            {
                return Err(DataLoadError::MissingGameMode { mode: mode.key() });
            }
            Ok(MapCatalog::ByMode(by_mode))
        }
    }
}

fn sort_maps(maps: Vec<String>) -> Result<Vec<String>, DataLoadError> {
    let mut keyed = Vec::with_capacity(maps.len());
    for raw in maps {
        let key = map_display_name(&raw)?.to_string();
        keyed.push((key, raw));
    }
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, raw)| raw).collect())
}

fn read_source(path: &Path) -> Result<String, DataLoadError> {
    fs::read_to_string(path).map_err(|source| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
