use crate::matches::Winner;
use crate::validate::{FixtureRecord, MatchRecord, ValidatedPeriod};

const HEADER: &str = "@Intramurals\n\n\
once again, we're looking to **stream** some games this week.\n\
please schedule your games asap in #match-chats so we can plan to stream them <3\n\n";
const SEPARATOR: &str = "**────────────**\n";
const LAST_WEEK_HEADING: &str = ":hibiscus: **MATCHES LAST WEEK**\n\n";
const THIS_WEEK_HEADING: &str = ":hibiscus: **MATCHES THIS WEEK**\n\n";
const RESULT_MARKER: &str = ":coconut:";
const CONFIRMED_MARKER: &str = " :white_check_mark:";

pub fn render_period(period: &ValidatedPeriod) -> String {
    render(&period.results, &period.upcoming, period.bye.as_deref())
}

pub fn render(results: &[MatchRecord], upcoming: &[FixtureRecord], bye: Option<&str>) -> String {
    let mut out = String::with_capacity(512 + 128 * (results.len() + upcoming.len()));
    out.push_str(HEADER);
    out.push_str(SEPARATOR);
    out.push('\n');

    out.push_str(LAST_WEEK_HEADING);
    for record in results {
        push_result(&mut out, record);
    }

    if let Some(team) = bye.filter(|t| !t.is_empty()) {
        out.push_str(SEPARATOR);
        out.push('\n');
        out.push_str(&format!("**Bye:** {team} has a bye this week.\n\n"));
    }

    out.push_str(SEPARATOR);
    out.push('\n');
    out.push_str(THIS_WEEK_HEADING);
    for fixture in upcoming {
        push_fixture(&mut out, fixture);
    }

    out.push_str(SEPARATOR);
    out
}

fn push_result(out: &mut String, record: &MatchRecord) {
    let outcome = match &record.overall_winner {
        Winner::Draw => "DRAW".to_string(),
        Winner::Team(team) => format!("{team} WIN"),
    };
    out.push_str(&format!(
        "{RESULT_MARKER}{} vs. {RESULT_MARKER}{}: {outcome}\n",
        record.team1, record.team2
    ));
    for game in &record.games {
        out.push_str(&format!("{}: {}\n", game.map, game.winner));
    }
    out.push('\n');
}

fn push_fixture(out: &mut String, fixture: &FixtureRecord) {
    let marker = if fixture.confirmed { CONFIRMED_MARKER } else { "" };
    out.push_str(&format!("@{} vs. @{}{marker}\n", fixture.team1, fixture.team2));
    out.push_str(&format!("[{}]\n", fixture.scheduled_time));
    out.push('\n');
}
