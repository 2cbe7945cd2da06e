//! Host driver: load the config, run the cloth headless for a number of frames while logging its energy,
//! then optionally save snapshots, plot, and open the viewer.

use std::{env, path::PathBuf, process, time::Instant};

use cloth_sim::{
    playback::{save_snapshots, SnapShot},
    properties::{lowest_point, EnergySample},
    Cloth, Config,
};
use log::{debug, error, info};

const SAVE_FILE: &str = "config.cloth";
const DEFAULT_SNAPSHOT_FILE: &str = "snapshots.cloth";

const DEFAULT_FRAMES: usize = 600;
/// Frames between energy log lines.
const LOG_RATIO: usize = 60;

const USAGE: &str = "usage: cloth_sim [frames] [--save-config] [--snapshots]";

struct Args {
    frames: usize,
    save_config: bool,
    snapshots: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut result = Args {
        frames: DEFAULT_FRAMES,
        save_config: false,
        snapshots: false,
    };

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--save-config" => result.save_config = true,
            "--snapshots" => result.snapshots = true,
            other => {
                result.frames = other
                    .parse()
                    .map_err(|_| format!("unrecognized argument: {other}"))?;
            }
        }
    }

    Ok(result)
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            process::exit(2);
        }
    };

    let save_path = PathBuf::from(SAVE_FILE);
    let config = match Config::load(&save_path) {
        Ok(cfg) => {
            info!("Loaded config from {SAVE_FILE}");
            cfg
        }
        Err(_) => Config::default(),
    };

    if args.save_config {
        match config.save(&save_path) {
            Ok(()) => info!("Saved config to {SAVE_FILE}"),
            Err(e) => error!("Error saving config: {e}"),
        }
    }

    let mut cloth = match Cloth::new(&config) {
        Ok(c) => c,
        Err(e) => {
            error!("Unable to build the cloth: {e}");
            process::exit(1);
        }
    };

    let start = Instant::now();
    let mut samples = vec![EnergySample::measure(&cloth)];
    let mut snapshots = vec![SnapShot::take(&cloth)];
    let mut floor_contacts = 0;

    for frame in 1..=args.frames {
        let stats = cloth.step();
        floor_contacts += stats.floor_contacts;

        let sample = EnergySample::measure(&cloth);
        samples.push(sample);

        if frame % LOG_RATIO == 0 {
            debug!(
                "t: {:.3}s KE: {:.4} PE: {:.4} Elastic: {:.4} Max strain: {:.3}",
                sample.time, sample.kinetic, sample.potential, sample.elastic, sample.max_strain
            );
        }
        if args.snapshots && frame % config.snapshot_ratio.max(1) == 0 {
            snapshots.push(SnapShot::take(&cloth));
        }
    }

    info!(
        "Ran {} frames ({:.3}s simulated) in {}ms. Floor contacts: {floor_contacts}. Lowest point: {:.3}",
        args.frames,
        cloth.time_elapsed(),
        start.elapsed().as_millis(),
        lowest_point(cloth.particles()),
    );

    if args.snapshots {
        match save_snapshots(&PathBuf::from(DEFAULT_SNAPSHOT_FILE), &snapshots) {
            Ok(()) => info!(
                "Saved {} snapshots to {DEFAULT_SNAPSHOT_FILE}",
                snapshots.len()
            ),
            Err(e) => error!("Error saving snapshots: {e}"),
        }
    }

    if let Some(last) = samples.last() {
        info!("Final total energy: {:.4}", last.total());
    }

    #[cfg(feature = "plot")]
    {
        if let Err(e) = cloth_sim::properties::plot_energy(&samples, "cloth") {
            error!("Error plotting energy: {e}");
        }
    }

    #[cfg(feature = "gui")]
    {
        // The viewer starts from a fresh cloth; the headless run above is for diagnostics.
        match Cloth::new(&config) {
            Ok(cloth) => cloth_sim::render::render(cloth_sim::render::State::new(config, cloth)),
            Err(e) => error!("Unable to build the cloth: {e}"),
        }
    }
}
