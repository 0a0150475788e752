use std::path::PathBuf;

use clap::Parser;
use instant::Instant;
use log::{error, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use cloth_motion::camera::OrbitCamera;
use cloth_motion::trace::TraceRecorder;
use cloth_motion::units::{Milliseconds, Radians, Seconds};
use cloth_motion::viewer::GarmentViewer;
use cloth_motion::{ClothConfig, ClothError, GarmentMesh, Preset, SceneNode};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless run of the garment cloth motion", long_about = None)]
struct Args {
    /// Tuning preset
    #[arg(long, default_value_t = Preset::Canonical)]
    preset: Preset,

    /// JSON config file, used instead of the preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Total simulated seconds
    #[arg(long, default_value_t = 6.0)]
    seconds: f32,

    /// Seconds of orbiting before the garment is released
    #[arg(long, default_value_t = 2.0)]
    spin_seconds: f32,

    /// Orbit speed while spinning, in rad/s
    #[arg(long, default_value_t = 1.5)]
    spin_speed: f32,

    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Seed for frame time jitter and the occasional hitch
    #[arg(long)]
    jitter: Option<u64>,

    #[arg(long, default_value_t = 24)]
    rings: usize,

    #[arg(long, default_value_t = 48)]
    segments: usize,

    /// Write a per-frame trace, CSV or .json
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    if let Err(error) = run(Args::parse()) {
        error!("{error}");
        std::process::exit(1);
    }
}

fn frame_delta(rng: Option<&mut ChaCha8Rng>, frame: f32) -> f32 {
    let Some(rng) = rng else {
        return frame;
    };
    if rng.random_bool(0.02) {
        rng.random_range(0.1..0.5)
    } else {
        frame * rng.random_range(0.8..1.25)
    }
}

fn run(args: Args) -> Result<(), ClothError> {
    let config = match &args.config {
        Some(path) => ClothConfig::from_json_file(path)?,
        None => args.preset.config(),
    };
    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }
    if args.fps <= 0.0 {
        return Err(ClothError::InvalidConfig("fps must be positive".to_string()));
    }

    let garment = GarmentMesh::skirt(args.rings, args.segments, 1.0, 4.5);
    info!("Garment with {} vertices", garment.vertex_count());
    let mut viewer = GarmentViewer::new(OrbitCamera::default(), config);
    viewer.attach(SceneNode::group("garment").with_child(SceneNode::with_mesh("skirt", garment)));

    let mut rng = args.jitter.map(ChaCha8Rng::seed_from_u64);
    let mut trace = args.trace.as_ref().map(|_| TraceRecorder::new(format!("{} spin", args.preset)));
    let frame = 1.0 / args.fps;
    let started = Instant::now();
    let mut clock = 0.0_f64;
    let mut elapsed = 0.0_f32;
    let mut frames = 0_usize;
    let mut peak_twist = 0.0_f32;
    let mut peak_stretch = 1.0_f32;
    while elapsed < args.seconds {
        let delta = frame_delta(rng.as_mut(), frame);
        if elapsed < args.spin_seconds {
            viewer.camera.rotate(Radians(args.spin_speed * delta));
        }
        clock += delta as f64 * 1000.0;
        elapsed += delta;
        viewer.frame(Milliseconds(clock), Seconds(delta));
        frames += 1;

        let engine = viewer.engine();
        peak_twist = peak_twist.max(engine.state().twist.abs());
        peak_stretch = peak_stretch.max(engine.max_radial_stretch());
        if let Some(trace) = trace.as_mut() {
            trace.record(engine, &viewer.last_signal());
        }
    }

    let engine = viewer.engine();
    println!("Frames: {frames} in {:.1}ms", started.elapsed().as_secs_f64() * 1000.0);
    println!("Simulated: {}", engine.simulation_time());
    println!("Peak twist: {peak_twist:.5}");
    println!("Peak radial stretch: {peak_stretch:.3}");
    println!("Final phase: {}", engine.state().phase());
    if let (Some(trace), Some(path)) = (&trace, &args.trace) {
        trace.save(path)?;
        println!("Saved: {:?}", path);
    }
    Ok(())
}
