/// Whole-engine behavior, driven through the public API the way a viewer would.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use cloth_motion::cloth::twist::{Phase, TwistState};
use cloth_motion::units::{Milliseconds, Radians, Seconds, FRAME_60};
use cloth_motion::{
    ClothConfig, ClothMotion, Direction, FrameReport, GarmentMesh, PositionBuffer, Preset, RotationSignal,
    RotationTracker, SceneNode,
};

fn calm_config() -> ClothConfig {
    let mut config = ClothConfig::default();
    config.wind.idle = 0.0;
    config.wind.active = 0.0;
    config.wind.secondary = 0.0;
    config
}

fn skirt() -> GarmentMesh {
    GarmentMesh::skirt(10, 24, 1.0, 5.0)
}

#[test]
fn test_rest_pose_survives_a_long_run() {
    let mut engine = ClothMotion::default();
    let mut mesh = skirt();
    let original = mesh.positions().to_vec();
    for frame in 0..600 {
        let signal = if frame % 200 < 120 { RotationSignal::spinning(1.2) } else { RotationSignal::still() };
        engine.update(&mut mesh, &signal, FRAME_60);
    }
    let rest = engine.rest_pose().map(|pose| pose.positions().to_vec());
    assert_eq!(rest, Some(original));
}

#[test]
fn test_twist_never_exceeds_saturation() {
    let mut engine = ClothMotion::default();
    let mut mesh = skirt();
    let max_twist = engine.config().twist.max_twist;
    for speed in [0.1, 1.0, 20.0, 500.0, -500.0] {
        for _ in 0..120 {
            engine.update(&mut mesh, &RotationSignal::spinning(speed), FRAME_60);
            assert!(engine.state().twist.abs() <= max_twist);
        }
    }
}

#[test]
fn test_slow_spin_rises_monotonically_to_target() {
    let mut engine = ClothMotion::new(calm_config());
    let mut mesh = skirt();
    let signal = RotationSignal::spinning(0.05);
    let target = TwistState::target_twist(&signal, &engine.config().twist);
    assert!(target > 0.0);
    let mut previous = 0.0;
    for _ in 0..120 {
        engine.update(&mut mesh, &signal, FRAME_60);
        let twist = engine.state().twist;
        assert!(twist >= previous, "twist fell from {previous} to {twist}");
        assert!(twist <= target + 1e-7);
        previous = twist;
    }
    assert!((previous - target).abs() < target * 0.01, "{previous} not near {target}");
}

#[test]
fn test_abrupt_stop_starts_a_swing() {
    let mut engine = ClothMotion::new(calm_config());
    let mut mesh = skirt();
    for _ in 0..120 {
        engine.update(&mut mesh, &RotationSignal::spinning(-0.05), FRAME_60);
    }
    let twist = engine.state().twist;
    assert!(twist < 0.0);
    engine.update(&mut mesh, &RotationSignal::still(), FRAME_60);
    let state = engine.state();
    assert_eq!(state.phase(), Phase::Swinging);
    assert!(state.oscillation.energy > 0.0);
    assert_eq!(state.oscillation.velocity.signum(), twist.signum());
}

#[test]
fn test_energy_decays_and_stays_spent() {
    let mut engine = ClothMotion::default();
    let mut mesh = skirt();
    for _ in 0..60 {
        engine.update(&mut mesh, &RotationSignal::spinning(1.5), FRAME_60);
    }
    let mut previous = f32::INFINITY;
    let mut spent_at = None;
    for frame in 0..3000 {
        engine.update(&mut mesh, &RotationSignal::still(), FRAME_60);
        let energy = engine.state().oscillation.energy;
        assert!(energy <= previous);
        if spent_at.is_some() {
            assert_eq!(energy, 0.0, "energy came back at frame {frame}");
        } else if energy == 0.0 {
            spent_at = Some(frame);
        }
        previous = energy;
    }
    assert!(spent_at.is_some());
    assert_eq!(engine.state().phase(), Phase::AtRest);
}

fn assert_contained_under_adversarial_input(config: ClothConfig, seed: u64) {
    let mut engine = ClothMotion::new(config);
    let mut mesh = skirt();
    let limit = engine.config().loosest_stretch();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..2000 {
        let signal = if rng.random_bool(0.7) {
            RotationSignal::spinning(rng.random_range(-80.0..80.0))
        } else {
            RotationSignal::still()
        };
        let raw = match rng.random_range(0..10) {
            0 => Seconds(0.0),
            1 => Seconds(-0.1),
            2 => Seconds(f32::NAN),
            3 => Seconds(rng.random_range(0.5..10.0)),
            _ => Seconds(rng.random_range(0.001..0.05)),
        };
        engine.update(&mut mesh, &signal, raw);
        let Some(rest) = engine.rest_pose() else {
            panic!("engine should be initialized");
        };
        for (live, rest) in mesh.positions().iter().zip(rest.positions()) {
            let rest_radius = Vec2::new(rest.x, rest.z).length();
            let radius = Vec2::new(live.x, live.z).length();
            assert!(radius.is_finite());
            assert!(radius <= rest_radius * limit + 1e-4, "{radius} vs rest {rest_radius}");
        }
        assert!(engine.max_radial_stretch() <= limit + 1e-4);
    }
}

#[test]
fn test_containment_under_adversarial_input() {
    assert_contained_under_adversarial_input(ClothConfig::default(), 7);
    assert_contained_under_adversarial_input(calm_config(), 7);
    for preset in [Preset::Silk, Preset::Denim] {
        assert_contained_under_adversarial_input(preset.config(), 11);
    }
}

#[test]
fn test_released_cloth_settles_back_to_rest() {
    let mut engine = ClothMotion::new(calm_config());
    let mut mesh = skirt();
    for _ in 0..90 {
        engine.update(&mut mesh, &RotationSignal::spinning(3.0), FRAME_60);
    }
    assert!(engine.state().twist.abs() > 0.0);
    let mut frames = 0;
    while engine.state().oscillation.energy > 0.0 || frames == 0 {
        engine.update(&mut mesh, &RotationSignal::still(), FRAME_60);
        frames += 1;
        assert!(frames < 5000, "swing never died out");
    }
    for _ in 0..2000 {
        engine.update(&mut mesh, &RotationSignal::still(), FRAME_60);
    }
    assert_eq!(engine.state().phase(), Phase::AtRest);
    let Some(rest_pose) = engine.rest_pose() else {
        panic!("engine should be initialized");
    };
    let gravity = engine.config().drape.gravity;
    for (live, rest) in mesh.positions().iter().zip(rest_pose.positions()) {
        let sag = (1.0 - rest_pose.height_factor(rest.y)) * gravity;
        let expected = *rest - Vec3::Y * sag;
        assert!((*live - expected).length() < 1e-4, "{live} vs {expected}");
    }
}

#[test]
fn test_late_mesh_is_captured_once() {
    let mut engine = ClothMotion::default();
    let mut scene = SceneNode::group("root");
    for _ in 0..30 {
        assert_eq!(engine.update(&mut scene, &RotationSignal::spinning(1.0), FRAME_60), FrameReport::Skipped);
    }
    assert_eq!(engine.simulation_time(), Seconds(0.0));

    let mesh = skirt();
    let original = mesh.positions().to_vec();
    scene = scene.with_child(SceneNode::group("body").with_child(SceneNode::with_mesh("dress", mesh)));
    for _ in 0..30 {
        let report = engine.update(&mut scene, &RotationSignal::spinning(1.0), FRAME_60);
        assert_eq!(report, FrameReport::Updated { vertices: original.len() });
    }
    assert_eq!(engine.rest_pose().map(|pose| pose.positions().to_vec()), Some(original));
    let version = scene.first_drawable().map(GarmentMesh::version);
    assert_eq!(version, Some(30));
}

#[test]
fn test_tracker_across_the_seam() {
    let mut tracker = RotationTracker::new();
    let step = 1000.0 / 60.0;
    let mut angle = 3.0_f32;
    let mut signal = tracker.sample(Radians(angle), Milliseconds(0.0));
    assert!(!signal.is_moving);
    for frame in 1..40 {
        angle = Radians(angle + 0.02).wrapped().0;
        signal = tracker.sample(Radians(angle), Milliseconds(frame as f64 * step));
        assert_eq!(signal.direction, Direction::Positive);
        assert!((*signal.angular_speed - 1.2).abs() < 1e-2, "speed {}", *signal.angular_speed);
    }
    assert!(angle < 0.0, "the seam was crossed");
}
