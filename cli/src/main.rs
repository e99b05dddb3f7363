use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sweeper_core::{BoardEngine, CellCount, Coord, Difficulty, Preset, RejectionPlacer};

use clock::WallClock;
use command::{Command, HELP};
use settings::Settings;

mod clock;
mod command;
mod render;
mod settings;

type Engine = BoardEngine<RejectionPlacer, WallClock>;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Difficulty preset: beginner, intermediate or expert
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Custom board height, needs --cols and --mines
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    /// Custom board width
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    /// Custom mine count, must leave at least one safe cell
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Flags first, then the settings file, then beginner.
    fn difficulty(&self, settings: &Settings) -> anyhow::Result<Difficulty> {
        if let (Some(rows), Some(cols), Some(mines)) = (self.rows, self.cols, self.mines) {
            return Difficulty::new(rows, cols, mines)
                .with_context(|| format!("Invalid board {rows}x{cols} with {mines} mines"));
        }
        Ok(self
            .preset
            .map(Difficulty::from)
            .or_else(|| settings.difficulty())
            .unwrap_or_default())
    }
}

fn print_game(out: &mut impl Write, engine: &mut Engine) -> io::Result<()> {
    engine.poll_ticks();
    writeln!(out, "{}", render::status_line(&engine.state()))?;
    write!(out, "{}", render::board(&*engine))?;
    out.flush()
}

fn run_command(engine: &mut Engine, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Reveal(coords) => {
            let outcome = engine
                .reveal(coords)
                .with_context(|| format!("Cannot reveal {coords:?}"))?;
            log::info!("Reveal {:?}: {:?}", coords, outcome);
        }
        Command::Flag(coords) => {
            let outcome = engine
                .toggle_flag(coords)
                .with_context(|| format!("Cannot flag {coords:?}"))?;
            log::info!("Flag {:?}: {:?}", coords, outcome);
        }
        Command::NewGame(preset) => {
            let difficulty = preset.map_or_else(|| engine.difficulty(), Difficulty::from);
            engine.new_game(difficulty);
        }
        Command::Help | Command::Quit => {}
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let difficulty = args.difficulty(&settings)?;
    let seed = args
        .seed
        .or(settings.game.seed)
        .unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut engine = Engine::new(difficulty, RejectionPlacer::seeded(seed), WallClock::new());

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{HELP}")?;
    print_game(&mut stdout, &mut engine)?;

    for line in stdin.lock().lines() {
        let line = line.context("Could not read command")?;
        if line.trim().is_empty() {
            print_game(&mut stdout, &mut engine)?;
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(stdout, "{HELP}")?,
            command => {
                // out-of-range coordinates are reported, the game goes on
                if let Err(err) = run_command(&mut engine, command) {
                    writeln!(stdout, "{err:#}")?;
                    continue;
                }
                print_game(&mut stdout, &mut engine)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sweeper").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_beginner() {
        let difficulty = args(&[]).difficulty(&Settings::default()).unwrap();
        assert_eq!(difficulty, Difficulty::BEGINNER);
    }

    #[test]
    fn custom_board_flags() {
        let difficulty = args(&["--rows", "5", "--cols", "6", "--mines", "7"])
            .difficulty(&Settings::default())
            .unwrap();
        assert_eq!(difficulty, Difficulty::new(5, 6, 7).unwrap());
    }

    #[test]
    fn custom_board_needs_all_three_flags() {
        let result = Args::try_parse_from(["sweeper", "--rows", "5", "--cols", "6"]);
        assert!(result.is_err());
    }

    #[test]
    fn overfull_board_is_rejected() {
        let result = args(&["--rows", "2", "--cols", "2", "--mines", "4"])
            .difficulty(&Settings::default());
        assert!(result.is_err());
    }

    #[test]
    fn preset_flag_beats_settings_file() {
        let settings = Settings::parse("[game]\npreset = \"intermediate\"\n").unwrap();

        assert_eq!(
            args(&["--preset", "expert"]).difficulty(&settings).unwrap(),
            Difficulty::EXPERT
        );
        assert_eq!(args(&[]).difficulty(&settings).unwrap(), Difficulty::INTERMEDIATE);
    }

    #[test]
    fn new_game_command_keeps_or_switches_difficulty() {
        let mut engine = Engine::new(
            Difficulty::EXPERT,
            RejectionPlacer::seeded(1),
            WallClock::new(),
        );
        run_command(&mut engine, Command::Reveal((0, 0))).unwrap();

        run_command(&mut engine, Command::NewGame(None)).unwrap();
        assert_eq!(engine.difficulty(), Difficulty::EXPERT);
        assert_eq!(engine.revealed_count(), 0);

        run_command(&mut engine, Command::NewGame(Some(Preset::Beginner))).unwrap();
        assert_eq!(engine.difficulty(), Difficulty::BEGINNER);
    }

    #[test]
    fn out_of_range_move_is_an_error() {
        let mut engine = Engine::new(
            Difficulty::BEGINNER,
            RejectionPlacer::seeded(1),
            WallClock::new(),
        );
        assert!(run_command(&mut engine, Command::Reveal((9, 0))).is_err());
    }
}
