//! Workshop Replay
//!
//! Runs a scripted input sequence through a headless workshop session and
//! logs what each frame hands to the renderer.
//!
//! ```text
//! workshop_replay [--config workshop.json] [--script frames.json]
//! ```
//!
//! A script is a JSON array of frames:
//!
//! ```json
//! [{ "delta": 0.016, "events": [{ "type": "Key", "key": "G", "pressed": true }] }]
//! ```

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use serde::Deserialize;
use tracing::{info, warn};
use workshop_engine::carving::{DeformableSurface, SurfaceId, TargetShape};
use workshop_engine::config::WorkshopConfig;
use workshop_engine::input::{InputEvent, KeyCode, MouseButton};
use workshop_engine::session::WorkshopSession;
use workshop_engine::tools::ToolCatalog;
use workshop_engine::world::{Interactable, SceneRegistry, Transform, WorldScene};

#[derive(Debug, Clone, Deserialize)]
struct ScriptFrame {
    delta: f32,
    #[serde(default)]
    events: Vec<InputEvent>,
}

impl ScriptFrame {
    fn idle(delta: f32) -> Self {
        Self {
            delta,
            events: Vec::new(),
        }
    }

    fn with(delta: f32, events: Vec<InputEvent>) -> Self {
        Self { delta, events }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "workshop_replay",
    about = "Replay scripted input through a headless workshop session"
)]
struct Args {
    /// Workshop tuning as JSON; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame script as JSON; a built-in demo runs when omitted
    #[arg(long)]
    script: Option<PathBuf>,
}

fn key(key: KeyCode, pressed: bool) -> InputEvent {
    InputEvent::Key { key, pressed }
}

/// Lock the view, pick up the chisel, carve for a while, look around,
/// inspect, then put everything down.
fn builtin_script() -> Vec<ScriptFrame> {
    const DT: f32 = 1.0 / 60.0;
    let mut frames = vec![
        ScriptFrame::idle(DT),
        ScriptFrame::with(
            DT,
            vec![
                InputEvent::PointerButton {
                    button: MouseButton::Left,
                    pressed: true,
                },
                InputEvent::PointerButton {
                    button: MouseButton::Left,
                    pressed: false,
                },
                InputEvent::PointerCapture { captured: true },
            ],
        ),
        ScriptFrame::with(DT, vec![key(KeyCode::G, true), key(KeyCode::G, false)]),
        ScriptFrame::with(DT, vec![key(KeyCode::E, true)]),
    ];
    frames.extend((0..40).map(|_| ScriptFrame::idle(DT)));
    frames.push(ScriptFrame::with(DT, vec![key(KeyCode::E, false)]));
    frames.extend((0..10).map(|_| {
        ScriptFrame::with(DT, vec![InputEvent::PointerMotion { dx: 6.0, dy: 2.0 }])
    }));
    frames.push(ScriptFrame::with(DT, vec![key(KeyCode::Tab, true)]));
    frames.extend((0..10).map(|_| {
        ScriptFrame::with(DT, vec![InputEvent::PointerMotion { dx: -15.0, dy: 0.0 }])
    }));
    frames.push(ScriptFrame::with(DT, vec![key(KeyCode::Escape, true)]));
    frames.push(ScriptFrame::with(DT, vec![key(KeyCode::Q, true)]));
    frames.push(ScriptFrame::idle(DT));
    frames
}

fn build_session(config: WorkshopConfig) -> Result<WorkshopSession, Box<dyn Error>> {
    let mut world = SceneRegistry::new();
    let root = world.root();
    let bench = world.add_node(
        "bench",
        root,
        Transform::from_translation(Vec3::new(0.0, 0.5, -2.0)),
        None,
    );
    world.add_interactable(
        "chisel",
        bench,
        Transform::from_translation(Vec3::new(0.0, 1.1, 1.0)),
        Vec3::new(0.05, 0.05, 0.1),
        Interactable::tool("chisel", "steel"),
    );

    let mut session = WorkshopSession::new(config, ToolCatalog::builtin(), world)?;
    session.add_surface(
        DeformableSurface::subdivided_box(
            SurfaceId(1),
            "wood",
            Transform::from_translation(Vec3::new(0.013, 1.593, -2.0)),
            Vec3::splat(0.4),
            8,
        )
        .with_target(TargetShape::Sphere {
            center: Vec3::ZERO,
            radius: 0.15,
        }),
    );
    Ok(session)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    println!("===========================================");
    println!("   Workshop - Scripted Replay");
    println!("===========================================");
    println!();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => WorkshopConfig::from_path(path)?,
        None => WorkshopConfig::default(),
    };

    let script = match &args.script {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            serde_json::from_str::<Vec<ScriptFrame>>(&json)?
        }
        None => builtin_script(),
    };
    if script.is_empty() {
        warn!("script has no frames");
    }

    let mut session = build_session(config)?;
    for (index, frame) in script.into_iter().enumerate() {
        for event in frame.events {
            session.handle_event(event);
        }
        let output = session.tick(frame.delta);
        info!(
            frame = index,
            mode = ?output.look_mode,
            position = ?output.camera.position,
            yaw = output.camera.yaw,
            pitch = output.camera.pitch,
            held = ?output.held,
            tool = ?output.equipped_tool,
            uploads = output.uploads.len(),
            "frame"
        );
        if let Some(carve) = output.carve {
            info!(
                affected = carve.affected,
                progress = carve.progress,
                contact = ?carve.contact,
                "carved"
            );
        }
    }

    for surface in session.surfaces() {
        info!(
            surface = surface.id().0,
            progress = surface.progress(),
            deviation = ?surface.target_deviation(),
            "final surface state"
        );
    }
    Ok(())
}
