use std::path::PathBuf;

use pocket_coordinator::error::DataLoadError;
use pocket_coordinator::roster::{GameMode, MapCatalog, load_maps, load_teams};

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

#[test]
fn teams_load_sorted() {
    let roster = load_teams(&fixture("teams.json")).expect("fixture should load");
    assert_eq!(roster.teams(), ["Falcons", "Owls", "Ravens", "Wolves"]);
    assert_eq!(roster.num_matches(), 2);
    assert!(!roster.has_bye());
}

#[test]
fn odd_roster_offers_bye() {
    let roster = load_teams(&fixture("teams_odd.json")).expect("fixture should load");
    assert_eq!(roster.len(), 5);
    assert_eq!(roster.num_matches(), 2);
    assert!(roster.has_bye());
}

#[test]
fn missing_team_file_is_a_read_error() {
    let err = load_teams(&fixture("no_such_teams.json")).unwrap_err();
    assert!(matches!(err, DataLoadError::Read { .. }));
}

#[test]
fn team_file_must_be_a_list_of_strings() {
    // The map catalog object is valid json but not a team list.
    let err = load_teams(&fixture("maps_by_mode.json")).unwrap_err();
    assert!(matches!(err, DataLoadError::Parse { .. }));
}

#[test]
fn flat_maps_sort_by_display_name() {
    let catalog = load_maps(&fixture("maps.json")).expect("fixture should load");
    let expected = [
        "hybrid__Blizzard World__4",
        "push__Colosseo__2",
        "escort__ Dorado __3",
        "control__Ilios__1",
    ];
    assert_eq!(catalog.choices_for_game(1), expected);
    assert_eq!(catalog.choices_for_game(5), expected);
    assert_eq!(catalog.len(), 4);
}

#[test]
fn mode_maps_follow_game_number() {
    let catalog = load_maps(&fixture("maps_by_mode.json")).expect("fixture should load");
    let MapCatalog::ByMode(by_mode) = &catalog else {
        panic!("expected per-mode catalog");
    };
    assert_eq!(by_mode.len(), GameMode::ALL.len());

    assert_eq!(catalog.choices_for_game(1), ["control__Ilios__b", "control__Nepal__a"]);
    assert_eq!(
        catalog.choices_for_game(2),
        ["hybrid__Eichenwalde__b", "hybrid__King's Row__a"]
    );
    assert_eq!(catalog.choices_for_game(4), ["push__Colosseo__b", "push__Esperanca__a"]);
    assert_eq!(catalog.choices_for_game(6), ["clash__Hanaoka__a"]);
}

#[test]
fn map_without_delimiter_names_the_entry() {
    let err = load_maps(&fixture("maps_bad.json")).unwrap_err();
    match err {
        DataLoadError::InvalidMapName { entry } => assert_eq!(entry, "Busan"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn team_named_like_a_draw_is_rejected() {
    let err = load_teams(&fixture("teams_reserved.json")).unwrap_err();
    match err {
        DataLoadError::ReservedTeamName { entry } => assert_eq!(entry, "Draw"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn mode_with_empty_map_list_fails_load() {
    let err = load_maps(&fixture("maps_missing_mode.json")).unwrap_err();
    assert!(matches!(err, DataLoadError::MissingGameMode { mode: "clash" }));
}

#[test]
fn mode_listed_twice_fails_load() {
    // BTreeMap order puts "Control" before "control".
    let err = load_maps(&fixture("maps_duplicate_mode.json")).unwrap_err();
    match err {
        DataLoadError::DuplicateGameMode { key } => assert_eq!(key, "control"),
        other => panic!("unexpected error: {other}"),
    }
}
