//! Polyspin headless driver
//!
//! Runs a scripted session without a window: drops a ball every quarter
//! second, logs once per simulated second, and prints the final render
//! snapshot as JSON.
//!
//! Usage: `polyspin [CONFIG.json | hexagons | pentagons] [SECONDS]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library on the web; the host page drives it
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;

    use polyspin::SimConfig;
    use polyspin::config::Preset;
    use polyspin::consts::FRAME_RATE;
    use polyspin::renderer::{RenderStyle, tessellate};
    use polyspin::sim::{Simulation, StepReport, TickInput, tick};

    const DEFAULT_SECONDS: f32 = 10.0;
    const SPAWN_EVERY_FRAMES: u64 = (FRAME_RATE / 4.0) as u64;

    fn load_config(arg: Option<&str>) -> Result<SimConfig, Box<dyn Error>> {
        let Some(arg) = arg else {
            return Ok(SimConfig::default());
        };
        if let Some(preset) = Preset::from_str(arg) {
            log::info!("Using preset {}", preset.as_str());
            return Ok(SimConfig::from_preset(preset));
        }
        Ok(SimConfig::load(arg)?)
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let config = load_config(args.first().map(String::as_str))?;
        let seconds = match args.get(1) {
            Some(s) => s.parse::<f32>()?,
            None => DEFAULT_SECONDS,
        };

        let mut sim = Simulation::new(config)?;
        let frame_dt = 1.0 / FRAME_RATE;
        let total_frames = (seconds * FRAME_RATE).round() as u64;
        let mut second = StepReport::default();

        log::info!("Running {} frames ({}s)", total_frames, seconds);

        for frame in 0..total_frames {
            let input = if frame % SPAWN_EVERY_FRAMES == 0 {
                TickInput::spawn()
            } else {
                TickInput::default()
            };
            let report = tick(&mut sim, &input, frame_dt);
            second.absorb(report.totals);

            if (frame + 1) % FRAME_RATE as u64 == 0 {
                log::info!(
                    "t={:>5.2}s balls={:>3} KE={:>12.1} spawned={} ball_hits={} wall_hits={} clamps={} culled={}",
                    sim.time(),
                    sim.balls().len(),
                    sim.total_kinetic_energy(),
                    second.spawned,
                    second.ball_contacts,
                    second.wall_contacts,
                    second.bounds_clamps,
                    second.culled
                );
                second = StepReport::default();
            }
        }
        sim.stop();

        let snapshot = sim.snapshot();
        let vertices = tessellate(&snapshot, &RenderStyle::default());
        log::info!(
            "Final frame: {} edges, {} balls, {} vertices",
            snapshot.edge_count(),
            snapshot.balls.len(),
            vertices.len()
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    }
}
