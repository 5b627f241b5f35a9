use std::fs;
use std::path::PathBuf;

use pocket_coordinator::announce;
use pocket_coordinator::error::ValidationError;
use pocket_coordinator::matches::{TeamSlot, Winner};
use pocket_coordinator::persist::load_archive;
use pocket_coordinator::roster::{MapCatalog, Roster};
use pocket_coordinator::session::Session;
use pocket_coordinator::sheet::{apply_sheet, parse_sheet};

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pocket_{test}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("temp dir should be writable");
    dir
}

fn session_with(archive: PathBuf) -> Session {
    let roster = Roster::new(
        ["Wolves", "Falcons", "Ravens", "Owls"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    let maps = MapCatalog::Flat(vec![
        "control__Ilios__1".to_string(),
        "hybrid__Midtown__2".to_string(),
        "flashpoint__Suravasa__3".to_string(),
    ]);
    Session::new(roster, maps, "upcoming Friday 8PM", archive)
}

fn fill(session: &mut Session) {
    let board = session.board_mut();
    let maps = ["control__Ilios__1", "hybrid__Midtown__2", "flashpoint__Suravasa__3"];
    let pairs = [("Falcons", "Owls", "Falcons"), ("Ravens", "Wolves", "Wolves")];
    for (idx, (t1, t2, winner)) in pairs.into_iter().enumerate() {
        board.set_team(idx, TeamSlot::Team1, Some(t1.into())).unwrap();
        board.set_team(idx, TeamSlot::Team2, Some(t2.into())).unwrap();
        for (game, map) in maps.iter().enumerate() {
            board
                .set_game_result(idx, game, Some(map.to_string()), Some(Winner::Team(winner.into())))
                .unwrap();
        }
    }
    board.set_upcoming_team(0, TeamSlot::Team1, Some("Falcons".into())).unwrap();
    board.set_upcoming_team(0, TeamSlot::Team2, Some("Ravens".into())).unwrap();
    board.set_confirmed(0, true).unwrap();
    board.set_upcoming_team(1, TeamSlot::Team1, Some("Owls".into())).unwrap();
    board.set_upcoming_team(1, TeamSlot::Team2, Some("Wolves".into())).unwrap();
    board.set_schedule(1, "Sat 6PM".into()).unwrap();
}

const EXPECTED: &str = "@Intramurals

once again, we're looking to **stream** some games this week.
please schedule your games asap in #match-chats so we can plan to stream them <3

**────────────**

:hibiscus: **MATCHES LAST WEEK**

:coconut:Falcons vs. :coconut:Owls: Falcons WIN
control__Ilios__1: Falcons
hybrid__Midtown__2: Falcons
flashpoint__Suravasa__3: Falcons

:coconut:Ravens vs. :coconut:Wolves: Wolves WIN
control__Ilios__1: Wolves
hybrid__Midtown__2: Wolves
flashpoint__Suravasa__3: Wolves

**────────────**

:hibiscus: **MATCHES THIS WEEK**

@Falcons vs. @Ravens :white_check_mark:
[upcoming Friday 8PM]

@Owls vs. @Wolves
[Sat 6PM]

**────────────**
";

#[test]
fn full_period_renders_and_archives() {
    let dir = scratch_dir("full_period");
    let archive = dir.join("last_week_matches.json");
    let mut session = session_with(archive.clone());
    fill(&mut session);

    let generated = session.generate().expect("complete board should generate");
    assert_eq!(generated.text, EXPECTED);
    assert!(generated.archive.is_ok());

    let reloaded = load_archive(&archive).expect("archive should reload");
    assert_eq!(reloaded, generated.period.results);
    assert_eq!(reloaded[1].overall_winner, Winner::Team("Wolves".into()));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn rendering_is_deterministic() {
    let dir = scratch_dir("deterministic");
    let mut session = session_with(dir.join("a.json"));
    fill(&mut session);
    let first = session.generate().unwrap();
    let second = session.generate().unwrap();
    assert_eq!(first.text, second.text);
    assert_eq!(
        announce::render_period(&first.period),
        announce::render(&second.period.results, &second.period.upcoming, None)
    );
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn incomplete_board_writes_nothing() {
    let dir = scratch_dir("fail_closed");
    let archive = dir.join("last_week_matches.json");
    let mut session = session_with(archive.clone());
    fill(&mut session);
    session.board_mut().set_game_map(1, 2, None).unwrap();

    let err = session.generate().unwrap_err();
    assert_eq!(
        err,
        ValidationError::IncompleteGame {
            label: "Match 2".into(),
            game: 3
        }
    );
    assert!(!archive.exists());

    session.board_mut().set_team(0, TeamSlot::Team2, None).unwrap();
    let err = session.generate().unwrap_err();
    assert_eq!(err, ValidationError::MissingTeam { label: "Match 1".into() });
    assert!(!archive.exists());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn archive_failure_keeps_the_text() {
    let dir = scratch_dir("archive_failure");
    // A regular file where the archive's parent directory should be.
    let blocker = dir.join("blocker");
    fs::write(&blocker, "x").unwrap();
    let mut session = session_with(blocker.join("last_week_matches.json"));
    fill(&mut session);

    let generated = session.generate().expect("validation passes");
    assert_eq!(generated.text, EXPECTED);
    let err = generated.archive.unwrap_err();
    assert!(err.to_string().starts_with("Failed to save last week's matches"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn sheet_replays_into_the_board() {
    let dir = scratch_dir("sheet");
    let mut session = session_with(dir.join("out.json"));
    let raw = fs::read_to_string(fixture("sheet.json")).unwrap();
    let sheet = parse_sheet(&raw).expect("fixture should parse");
    apply_sheet(&sheet, session.board_mut()).expect("sheet selections are valid");

    assert_eq!(session.board().matches()[0].game_count(), 4);
    let generated = session.generate().expect("sheet is complete");
    assert!(
        generated
            .text
            .contains(":coconut:Falcons vs. :coconut:Owls: Owls WIN\n")
    );
    assert!(generated.text.contains(":coconut:Ravens vs. :coconut:Wolves: DRAW\n"));
    assert!(generated.text.contains("@Owls vs. @Wolves\n[Sat 6PM]\n"));
    assert!(!generated.text.contains("**Bye:**"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn bye_team_is_announced() {
    let dir = scratch_dir("bye");
    let roster = Roster::new(
        ["Bears", "Falcons", "Owls"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    let maps = MapCatalog::Flat(vec!["control__Ilios__1".to_string()]);
    let mut session = Session::new(roster, maps, "upcoming Friday 8PM", dir.join("out.json"));
    let board = session.board_mut();
    board.set_team(0, TeamSlot::Team1, Some("Falcons".into())).unwrap();
    board.set_team(0, TeamSlot::Team2, Some("Owls".into())).unwrap();
    for game in 0..3 {
        board
            .set_game_result(0, game, Some("control__Ilios__1".into()), Some(Winner::Draw))
            .unwrap();
    }
    board.set_upcoming_team(0, TeamSlot::Team1, Some("Bears".into())).unwrap();
    board.set_upcoming_team(0, TeamSlot::Team2, Some("Owls".into())).unwrap();
    board.set_bye(Some("Bears".into())).unwrap();

    let text = session.generate().unwrap().text;
    assert!(text.contains(
        "Owls: DRAW\ncontrol__Ilios__1: Draw\ncontrol__Ilios__1: Draw\ncontrol__Ilios__1: Draw\n\n**────────────**\n\n**Bye:** Bears has a bye this week.\n\n**────────────**\n\n:hibiscus: **MATCHES THIS WEEK**"
    ));

    let _ = fs::remove_dir_all(dir);
}
