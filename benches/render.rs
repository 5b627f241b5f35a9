use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use pocket_coordinator::announce;
use pocket_coordinator::matches::{MAX_GAMES, MatchBoard, TeamSlot, Winner};
use pocket_coordinator::validate::validate;

fn full_board(num_matches: usize) -> MatchBoard {
    let mut board = MatchBoard::new(num_matches, false, "upcoming Friday 8PM");
    for idx in 0..num_matches {
        let home = format!("Team {}", idx * 2);
        let away = format!("Team {}", idx * 2 + 1);
        board
            .set_team(idx, TeamSlot::Team1, Some(home.clone()))
            .expect("fresh slot");
        board
            .set_team(idx, TeamSlot::Team2, Some(away.clone()))
            .expect("distinct teams");
        board.set_game_count(idx, 3).expect("within bounds");
        for game in 0..MAX_GAMES {
            let winner = match game % 3 {
                0 => Winner::Team(home.clone()),
                1 => Winner::Team(away.clone()),
                _ => Winner::Draw,
            };
            board
                .set_game_result(idx, game, Some(format!("mode__Map {game}__x")), Some(winner))
                .expect("winner is playing");
        }
        board
            .set_upcoming_team(idx, TeamSlot::Team1, Some(away))
            .expect("fresh slot");
        board
            .set_upcoming_team(idx, TeamSlot::Team2, Some(home))
            .expect("distinct teams");
    }
    board
}

fn bench_validate_and_render(c: &mut Criterion) {
    let board = full_board(16);
    c.bench_function("validate_16_matches", |b| {
        b.iter(|| validate(black_box(&board)).expect("complete board"))
    });

    let period = validate(&board).expect("complete board");
    c.bench_function("render_16_matches", |b| {
        b.iter(|| announce::render_period(black_box(&period)))
    });
}

criterion_group!(benches, bench_validate_and_render);
criterion_main!(benches);
