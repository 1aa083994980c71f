use std::time::Duration;

use swirl_core::{
    ArtParams, ArtSource, ColorMode, EngineConfig, FieldConfig, KindStyle, ModelConfig,
    ParticleConfig, ParticleKind, Preset, Ramp, Rgb, TimeStep,
};
use swirl_engine::{
    Compositor, Engine, Model,
    model::{Particle, radial_phase},
};

const TICK: Duration = Duration::from_millis(30);

fn art_config(text: &str) -> EngineConfig {
    EngineConfig {
        fps: 20.0,
        time_step: TimeStep::Fixed,
        color_mode: ColorMode::TrueColor,
        vertical_aspect: 0.5,
        batch_colors: true,
        model: ModelConfig::Field(FieldConfig::Art(ArtParams {
            source: ArtSource::Text(text.to_string()),
            swirl_speed: 0.06,
            twist: 1.2,
            outward_speed: 0.25,
            wobble_amplitude: 0.2,
            wobble_rate: 0.8,
            wobble_ripple: 10.0,
            hue_drift: 0.08,
            hue_radial: 2.5,
        })),
    }
}

fn still_config() -> EngineConfig {
    EngineConfig {
        fps: 1.0 / 0.03,
        time_step: TimeStep::Fixed,
        color_mode: ColorMode::Palette,
        vertical_aspect: 1.0,
        batch_colors: true,
        model: ModelConfig::Particles(ParticleConfig {
            spiral_strength: Ramp::constant(0.0),
            turbulence: Ramp::constant(0.0),
            gravity: 0.0,
            thread_pull: 0.0,
            thread_spiral: 0.0,
            absorption_radius: 0.0,
            styles: vec![KindStyle {
                kind: ParticleKind::Ejecta,
                glyphs: vec!['*'],
                colors: vec![Rgb::new(255, 255, 0)],
                lifetime: 1..=1,
            }],
            initial: Vec::new(),
            spawns: Vec::new(),
            globule_shadow: false,
            dust: 0.0,
        }),
    }
}

fn particle(x: f32, y: f32, vx: f32, vy: f32, lifetime: i32) -> Particle {
    Particle {
        x,
        y,
        vx,
        vy,
        symbol: '*',
        color: Rgb::new(255, 255, 0),
        lifetime,
        kind: ParticleKind::Ejecta,
        anchor: None,
    }
}

fn spawn(engine: &mut Engine, p: Particle) {
    match engine.model_mut() {
        Model::Particles(system) => system.spawn_particle(p),
        Model::Field(_) => panic!("expected a particle model"),
    }
}

#[test]
fn tiny_art_shows_its_center_at_start() {
    let mut engine = Engine::with_seed(art_config("@@@\n@@@\n@@@"), 0).unwrap();
    let mut compositor = Compositor::new(true);
    engine.resize(3, 3);
    engine.render(&mut compositor);
    assert_eq!(compositor.grid().get(1, 1).map(|c| c.ch), Some('@'));
}

#[test]
fn empty_art_is_fatal() {
    assert!(Engine::with_seed(art_config("\n\n"), 0).is_err());
}

#[test]
fn still_particle_is_drawn_once() {
    let mut engine = Engine::with_seed(still_config(), 0).unwrap();
    let mut compositor = Compositor::new(true);
    engine.resize(11, 11);
    spawn(&mut engine, particle(5.0, 5.0, 0.0, 0.0, 1));

    engine.render(&mut compositor);
    assert_eq!(compositor.grid().get(5, 5).map(|c| c.ch), Some('*'));
    engine.update(TICK);

    engine.render(&mut compositor);
    assert!(compositor.grid().cells().iter().all(|c| c.is_blank()));
}

#[test]
fn moving_particle_travels_its_lifetime() {
    let mut engine = Engine::with_seed(still_config(), 0).unwrap();
    let mut compositor = Compositor::new(true);
    engine.resize(400, 11);
    spawn(&mut engine, particle(5.0, 5.0, 1.0, 0.0, 300));

    for _ in 0..299 {
        engine.update(TICK);
    }
    // Last frame it is alive in: one step short of x0 + 300.
    engine.render(&mut compositor);
    assert_eq!(compositor.grid().get(304, 5).map(|c| c.ch), Some('*'));

    engine.update(TICK);
    let Model::Particles(system) = engine.model() else {
        panic!("expected a particle model");
    };
    assert!(system.is_empty());
}

#[test]
fn resize_between_ticks_rebuilds_geometry() {
    let mut engine = Engine::with_seed(Preset::Supernova.config(ColorMode::TrueColor), 5).unwrap();
    let mut compositor = Compositor::new(true);
    engine.resize(80, 24);
    engine.render(&mut compositor);
    engine.update(TICK);

    engine.resize(120, 40);
    engine.render(&mut compositor);
    assert_eq!(compositor.grid().cols(), 120);
    assert_eq!(compositor.grid().rows(), 40);
    let geometry = engine.geometry().unwrap();
    assert_eq!((geometry.cx, geometry.cy), (60.0, 20.0));
}

#[test]
fn radial_phase_survives_long_runs() {
    for t in [0.0, 3_600.0, 86_400.0 * 365.0, 1e12] {
        let r_out = radial_phase(0.75, 0.25, t);
        assert!((0.0..1.0).contains(&r_out));
    }
}

#[test]
fn every_preset_renders_and_encodes() {
    for preset in Preset::ALL {
        let mut engine = Engine::with_seed(preset.config(ColorMode::Palette), 11).unwrap();
        let mut compositor = Compositor::new(engine.config().batch_colors);
        engine.resize(80, 24);
        for _ in 0..3 {
            engine.render(&mut compositor);
            let bytes = compositor.encode().unwrap();
            assert!(bytes.starts_with(b"\x1b[1;1H"), "{}", preset.name());
            assert!(bytes.ends_with(b"\x1b[0m"), "{}", preset.name());
            engine.update(TICK);
        }
    }
}

#[test]
fn seeded_engines_agree() {
    let frame = |seed| {
        let mut engine = Engine::with_seed(Preset::Remnant.config(ColorMode::TrueColor), seed).unwrap();
        let mut compositor = Compositor::new(true);
        engine.resize(60, 20);
        for _ in 0..4 {
            engine.update(TICK);
        }
        engine.render(&mut compositor);
        compositor.grid().clone()
    };
    assert_eq!(frame(99), frame(99));
}
