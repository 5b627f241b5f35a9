use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use pocket_coordinator::config::{AppConfig, parse_path_arg};
use pocket_coordinator::session::Session;
use pocket_coordinator::sheet;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let sheet_path = parse_path_arg(&args, "sheet")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: announce_sheet --sheet=PATH [--teams=PATH] [--maps=PATH] [--archive=PATH]"))?;

    let config = AppConfig::from_env();
    let today = chrono::Local::now().date_naive();
    let mut session = Session::load(&config, today).context("unable to start session")?;

    let raw = fs::read_to_string(&sheet_path)
        .with_context(|| format!("unable to read sheet {}", sheet_path.display()))?;
    let parsed = sheet::parse_sheet(&raw).context("invalid match sheet")?;
    sheet::apply_sheet(&parsed, session.board_mut()).context("rejected selection in match sheet")?;

    let generated = session.generate().context("announcement not generated")?;
    print!("{}", generated.text);

    if let Err(err) = generated.archive {
        eprintln!("error: {err}");
    } else {
        eprintln!(
            "Saved {} matches to {}",
            generated.period.results.len(),
            session.archive_path().display()
        );
    }
    Ok(())
}
