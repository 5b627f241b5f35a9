use std::path::PathBuf;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::persist::DEFAULT_ARCHIVE_FILE;

pub const DEFAULT_TEAMS_FILE: &str = "teams.json";
pub const DEFAULT_MAPS_FILE: &str = "maps.json";
pub const DEFAULT_SCHEDULE: &str = "upcoming Friday 8PM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub teams_path: PathBuf,
    pub maps_path: PathBuf,
    pub archive_path: PathBuf,
    pub default_schedule: String,
    pub dated_schedule: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            teams_path: PathBuf::from(DEFAULT_TEAMS_FILE),
            maps_path: PathBuf::from(DEFAULT_MAPS_FILE),
            archive_path: PathBuf::from(DEFAULT_ARCHIVE_FILE),
            default_schedule: DEFAULT_SCHEDULE.to_string(),
            dated_schedule: false,
        }
    }
}

impl AppConfig {
    /// Reads the process environment and command line.
    pub fn from_env() -> Self {
        let args = std::env::args().skip(1).collect::<Vec<_>>();
        Self::resolve(&args, |key| std::env::var(key).ok())
    }

    /// Flags win over environment values, which win over defaults.
    pub fn resolve(args: &[String], env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let pick = |flag: &str, key: &str| parse_path_arg(args, flag).or_else(|| non_blank(env(key)));

        if let Some(path) = pick("teams", "POCKET_TEAMS_FILE") {
            config.teams_path = PathBuf::from(path);
        }
        if let Some(path) = pick("maps", "POCKET_MAPS_FILE") {
            config.maps_path = PathBuf::from(path);
        }
        if let Some(path) = pick("archive", "POCKET_ARCHIVE_FILE") {
            config.archive_path = PathBuf::from(path);
        }
        if let Some(text) = non_blank(env("POCKET_DEFAULT_SCHEDULE")) {
            config.default_schedule = text;
        }
        config.dated_schedule = env("POCKET_DATED_SCHEDULE")
            .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        config
    }

    /// Schedule text new fixtures start with, given the day the session opened.
    pub fn schedule_for(&self, today: NaiveDate) -> String {
        if !self.dated_schedule {
            return self.default_schedule.clone();
        }
        let friday = upcoming_friday(today);
        format!("{}, 8PM", friday.format("Friday %b %-d"))
    }
}

/// Next Friday strictly after `today`.
pub fn upcoming_friday(today: NaiveDate) -> NaiveDate {
    let from_monday = today.weekday().num_days_from_monday() as i64;
    let friday = Weekday::Fri.num_days_from_monday() as i64;
    let mut ahead = (friday - from_monday).rem_euclid(7);
    if ahead == 0 {
        ahead = 7;
    }
    today + Duration::days(ahead)
}

pub fn parse_path_arg(args: &[String], flag: &str) -> Option<String> {
    let long = format!("--{flag}");
    let prefix = format!("{long}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            if let Some(value) = non_blank(Some(value.to_string())) {
                return Some(value);
            }
        }
        if *arg == long
            && let Some(next) = args.get(idx + 1)
            && let Some(value) = non_blank(Some(next.clone()))
        {
            return Some(value);
        }
    }
    None
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
