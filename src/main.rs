//! Eist entry point
//!
//! Headless native runner: plays a level pack with no renderer attached and
//! logs the simulation's signals and sound cues.
//!
//! Usage: `eist [pack.json] [progress.json] [settings.json]`

use std::path::PathBuf;

use eist::audio::AudioMixer;
use eist::consts::TICKS_PER_SECOND;
use eist::level::{LevelPack, demo_pack};
use eist::sim::{GameEvent, Grid, Simulation, TickInput};
use eist::{Progress, Settings, Tuning};

/// Give up after ten minutes of simulated play
const MAX_TICKS: u32 = 10 * 60 * TICKS_PER_SECOND;

fn main() {
    env_logger::init();
    log::info!("Eist (headless) starting...");

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let pack = match args.next() {
        Some(path) => LevelPack::from_json(&std::fs::read_to_string(path)?)?,
        None => demo_pack(),
    };
    let progress_path = args.next().map(PathBuf::from);
    let progress = match &progress_path {
        Some(path) => Progress::load(path)?,
        None => Progress::new(),
    };

    let settings = match args.next() {
        Some(path) => Settings::load(PathBuf::from(path).as_path())?,
        None => Settings::default(),
    };
    let grid = Grid::default();
    let board_width = pack
        .levels
        .iter()
        .map(|level| grid.px(level.cols as f32))
        .fold(0.0, f32::max);
    let mixer = AudioMixer::new(&settings, grid.origin.x, board_width);

    log::info!("Playing pack '{}' ({} levels)", pack.name, pack.len());
    let mut sim = Simulation::new(pack, grid, Tuning::default(), progress, 0x5eed)?;

    let input = TickInput::default();
    for _ in 0..MAX_TICKS {
        let events = sim.frame(&input)?;
        for event in &events {
            if let Some(cue) = mixer.cue(event) {
                log::debug!("sound {:?} pan {:+.2}", cue.effect, cue.pan);
            }
            if *event == GameEvent::GameFinished {
                log::info!("All levels complete after {} ticks", sim.clock().ticks());
                return save(&sim, progress_path.as_ref());
            }
        }
    }

    log::warn!("Stopped after {} ticks without finishing the pack", MAX_TICKS);
    save(&sim, progress_path.as_ref())
}

fn save(sim: &Simulation<Progress>, path: Option<&PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = path {
        sim.progress().save(path)?;
    }
    Ok(())
}
