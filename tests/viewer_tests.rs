//! Viewer Controller Tests
//!
//! Tests for:
//! - Surface lookup at startup and viewport resize
//! - Model display: placement, default animation, static models
//! - Load sequencing: superseded requests never touch the displayed model
//! - Load failures surfaced as typed errors
//! - Animation switching and the frame loop

use std::path::PathBuf;

use glam::{Quat, Vec3};

use skelview::animation::action::LoopMode;
use skelview::animation::compiler::{CompileOptions, KeyframeCompiler};
use skelview::animation::euler::euler_to_quat;
use skelview::app::{LoadOutcome, SurfaceHost, SurfaceSize, Viewer};
use skelview::assets::{MemoryAssetReader, ModelLoader, RigLoader, ViewerConfig};
use skelview::errors::{Error, LoadError};
use skelview::utils::Timer;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// A page exposing a single surface.
struct Page {
    selector: &'static str,
    size: SurfaceSize,
}

impl SurfaceHost for Page {
    fn find_surface(&self, selector: &str) -> Option<SurfaceSize> {
        (selector == self.selector).then_some(self.size)
    }
}

fn page() -> Page {
    Page {
        selector: ".webgl",
        size: SurfaceSize::new(1280, 720, 3.0),
    }
}

fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

fn shipped_viewer() -> Viewer {
    let config = ViewerConfig::load(assets_dir().join("viewer.json")).unwrap();
    Viewer::new(config, &page()).unwrap()
}

fn head_rotation(viewer: &Viewer) -> Quat {
    viewer
        .active_model()
        .and_then(|m| m.skeleton())
        .and_then(|s| s.bone_by_name("Head"))
        .map(|b| b.transform.rotation)
        .unwrap()
}

// ============================================================================
// Startup
// ============================================================================

#[test]
fn missing_surface_fails_fast() {
    let config = ViewerConfig {
        surface: "#canvas".to_string(),
        ..ViewerConfig::default()
    };

    let err = Viewer::new(config, &page()).err().unwrap();
    assert!(matches!(err, Error::MissingSurface(ref s) if s == "#canvas"), "{err}");
}

#[test]
fn viewport_follows_surface_and_resize() {
    let mut viewer = Viewer::new(ViewerConfig::default(), &page()).unwrap();

    let viewport = viewer.viewport();
    assert_eq!((viewport.width(), viewport.height()), (1280, 720));
    assert!(approx(viewport.pixel_ratio(), 2.0));

    viewer.resize(600, 400, 1.0);
    assert!(approx(viewer.viewport().aspect(), 1.5));
    assert_eq!(viewer.viewport().physical_size(), (600, 400));
}

// ============================================================================
// Display
// ============================================================================

#[tokio::test]
async fn human_model_is_placed_and_plays_idle() {
    let mut viewer = shipped_viewer();
    let loader = RigLoader::from_dir(assets_dir());

    let outcome = viewer.load_model(&loader, "human-model").await.unwrap();
    let LoadOutcome::Displayed { model, report } = outcome else {
        panic!("load was not displayed");
    };
    assert_eq!(model, "human-model");

    let report = report.unwrap();
    assert_eq!(report.eligible_count(), 11);
    assert!(report.skipped.is_empty(), "{:?}", report.skipped);

    assert_eq!(viewer.active_name(), Some("human-model"));
    assert_eq!(viewer.active_animation(), Some("idle"));
    assert_eq!(viewer.pending_request(), None);

    let human = viewer.active_model().unwrap();
    assert_eq!(human.transform.scale, Vec3::splat(4.0));
    assert_eq!(human.transform.position, Vec3::new(0.0, -5.0, 0.0));
    assert_eq!(human.mixer().unwrap().len(), 11);

    // first frame of the idle set is already applied
    let expected = euler_to_quat(Vec3::new(-0.3, 0.0, 0.0));
    assert!(head_rotation(&viewer).abs_diff_eq(expected, 1e-5));
}

#[tokio::test]
async fn static_model_has_no_animation() {
    let mut viewer = shipped_viewer();
    let loader = RigLoader::from_dir(assets_dir());

    let outcome = viewer.load_model(&loader, "car-model").await.unwrap();
    assert_eq!(
        outcome,
        LoadOutcome::Displayed {
            model: "car-model".to_string(),
            report: None
        }
    );

    let car = viewer.active_model().unwrap();
    assert!(car.skeleton().is_none());
    assert!(car.mixer().is_none());
    assert_eq!(car.transform.position, Vec3::new(0.0, -2.0, 0.0));
    assert_eq!(viewer.active_animation(), None);

    viewer.advance(0.5);
}

#[tokio::test]
async fn custom_compiler_options_reach_the_mixer() {
    let viewer = shipped_viewer();
    assert_eq!(
        viewer.config().model_names().collect::<Vec<_>>(),
        vec!["car-model", "human-model"]
    );

    let mut viewer = viewer.with_compiler(KeyframeCompiler::new(CompileOptions {
        loop_mode: LoopMode::Once,
        ..CompileOptions::default()
    }));
    let loader = RigLoader::from_dir(assets_dir());
    viewer.load_model(&loader, "human-model").await.unwrap();

    let mixer = viewer.active_model().unwrap().mixer().unwrap();
    assert!(mixer.actions().iter().all(|a| a.loop_mode == LoopMode::Once));
}

#[test]
fn unknown_model_is_rejected() {
    let mut viewer = shipped_viewer();
    let err = viewer.request_model("boat-model").unwrap_err();
    assert!(matches!(err, Error::UnknownModel(ref n) if n == "boat-model"));
    assert_eq!(viewer.pending_request(), None);
}

// ============================================================================
// Load sequencing
// ============================================================================

#[tokio::test]
async fn superseded_load_does_not_touch_the_new_model() {
    let mut viewer = shipped_viewer();
    let loader = RigLoader::from_dir(assets_dir());

    let human_ticket = viewer.request_model("human-model").unwrap();
    let car_ticket = viewer.request_model("car-model").unwrap();
    let human_again = viewer.request_model("human-model").unwrap();
    assert!(human_ticket.id() < car_ticket.id() && car_ticket.id() < human_again.id());
    assert_eq!(viewer.pending_request(), Some(human_again.id()));

    let (first, car, second) = tokio::join!(
        loader.load(human_ticket.path()),
        loader.load(car_ticket.path()),
        loader.load(human_again.path()),
    );

    let outcome = viewer.finish_load(human_again, second).unwrap();
    assert!(matches!(outcome, LoadOutcome::Displayed { .. }));
    viewer.advance(0.3);
    let rotation = head_rotation(&viewer);
    let time = viewer.active_model().unwrap().mixer().unwrap().actions()[0].time;

    let car_id = car_ticket.id();
    let stale = viewer.finish_load(car_ticket, car).unwrap();
    assert_eq!(stale, LoadOutcome::Stale { request: car_id });
    let stale = viewer.finish_load(human_ticket, first).unwrap();
    assert!(matches!(stale, LoadOutcome::Stale { .. }));

    assert_eq!(viewer.active_name(), Some("human-model"));
    let human = viewer.active_model().unwrap();
    assert_eq!(human.transform.scale, Vec3::splat(4.0));
    assert!(approx(human.mixer().unwrap().actions()[0].time, time));
    assert_eq!(head_rotation(&viewer), rotation);
}

#[tokio::test]
async fn stale_completion_before_the_current_one_is_ignored() {
    let mut viewer = shipped_viewer();
    let loader = RigLoader::from_dir(assets_dir());

    let car_ticket = viewer.request_model("car-model").unwrap();
    let human_ticket = viewer.request_model("human-model").unwrap();

    let car = loader.load(car_ticket.path()).await;
    let stale = viewer.finish_load(car_ticket, car).unwrap();
    assert!(matches!(stale, LoadOutcome::Stale { .. }));
    assert!(viewer.active_model().is_none());
    assert_eq!(viewer.pending_request(), Some(human_ticket.id()));

    let human = loader.load(human_ticket.path()).await;
    viewer.finish_load(human_ticket, human).unwrap();
    assert_eq!(viewer.active_name(), Some("human-model"));
}

#[tokio::test]
async fn selecting_a_model_removes_the_current_one() {
    let mut viewer = shipped_viewer();
    let loader = RigLoader::from_dir(assets_dir());

    viewer.load_model(&loader, "human-model").await.unwrap();
    assert!(viewer.active_model().is_some());

    let _ticket = viewer.request_model("car-model").unwrap();
    assert!(viewer.active_model().is_none());
    assert!(matches!(viewer.stop_animation(), Err(Error::NoActiveModel)));
}

// ============================================================================
// Load failures
// ============================================================================

#[tokio::test]
async fn load_failure_is_returned_as_load_error() {
    let config = ViewerConfig::from_json_str(
        r#"{ "models": [ { "name": "ghost", "path": "models/ghost.rig.json" } ] }"#,
    )
    .unwrap();
    let mut viewer = Viewer::new(config, &page()).unwrap();
    let loader = RigLoader::new(MemoryAssetReader::new());

    match viewer.load_model(&loader, "ghost").await.unwrap_err() {
        Error::Load(LoadError { path, .. }) => assert_eq!(path, "models/ghost.rig.json"),
        other => panic!("expected a load error, got {other}"),
    }
    assert_eq!(viewer.pending_request(), None);
    assert!(viewer.active_model().is_none());
}

#[tokio::test]
async fn stale_failure_is_discarded() {
    let mut viewer = shipped_viewer();
    let loader = RigLoader::from_dir(assets_dir());

    let old = viewer.request_model("car-model").unwrap();
    let outcome = viewer.load_model(&loader, "human-model").await.unwrap();
    assert!(matches!(outcome, LoadOutcome::Displayed { .. }));

    let failure = Err(LoadError::new(old.path(), "connection reset"));
    let outcome = viewer.finish_load(old, failure).unwrap();
    assert!(matches!(outcome, LoadOutcome::Stale { .. }));
    assert_eq!(viewer.active_name(), Some("human-model"));
}

// ============================================================================
// Animation control
// ============================================================================

#[tokio::test]
async fn switching_animation_replaces_the_clips() {
    let mut viewer = shipped_viewer();
    let loader = RigLoader::from_dir(assets_dir());
    viewer.load_model(&loader, "human-model").await.unwrap();

    let report = viewer.play_animation("walking").unwrap();
    assert_eq!(report.animated, vec!["Hip"]);
    assert_eq!(viewer.active_animation(), Some("walking"));

    let human = viewer.active_model().unwrap();
    assert_eq!(human.mixer().unwrap().len(), 1);
    // idle is gone, so the head is back at its rest rotation
    let head = human.skeleton().unwrap().bone_by_name("Head").unwrap();
    assert_eq!(head.transform.rotation, head.rest_pose().1);

    let err = viewer.play_animation("running").unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownAnimation { ref model, ref animation }
            if model == "human-model" && animation == "running"
    ));
    assert_eq!(viewer.active_animation(), Some("walking"));
}

#[tokio::test]
async fn stop_animation_restores_rest_pose() {
    let mut viewer = shipped_viewer();
    let loader = RigLoader::from_dir(assets_dir());
    viewer.load_model(&loader, "human-model").await.unwrap();
    viewer.advance(0.25);

    viewer.stop_animation().unwrap();
    assert_eq!(viewer.active_animation(), None);

    let human = viewer.active_model().unwrap();
    assert!(human.mixer().is_none());
    let head = human.skeleton().unwrap().bone_by_name("Head").unwrap();
    assert_eq!(head.transform.rotation, head.rest_pose().1);
}

#[test]
fn animation_control_needs_a_model() {
    let mut viewer = shipped_viewer();
    assert!(matches!(viewer.play_animation("idle"), Err(Error::NoActiveModel)));
    assert!(matches!(viewer.stop_animation(), Err(Error::NoActiveModel)));
    viewer.advance(1.0);
}

// ============================================================================
// Frame loop
// ============================================================================

#[tokio::test]
async fn frame_advances_by_the_timer_step() {
    let mut viewer = shipped_viewer();
    let loader = RigLoader::from_dir(assets_dir());
    viewer.load_model(&loader, "human-model").await.unwrap();

    let mut timer = Timer::new();
    let dt = viewer.frame(&mut timer);
    assert!(dt <= Timer::DEFAULT_MAX_DELTA.as_secs_f32());
    assert_eq!(timer.frame_count, 1);

    let mixer = viewer.active_model().unwrap().mixer().unwrap();
    assert!(mixer.actions().iter().all(|a| approx(a.time, dt)));
}

#[tokio::test]
async fn idle_cycle_returns_to_its_first_pose() {
    let mut viewer = shipped_viewer();
    let loader = RigLoader::from_dir(assets_dir());
    viewer.load_model(&loader, "human-model").await.unwrap();
    let start = head_rotation(&viewer);

    viewer.advance(0.25);
    assert!(!head_rotation(&viewer).abs_diff_eq(start, 1e-4));

    viewer.advance(0.75);
    assert!(head_rotation(&viewer).abs_diff_eq(start, 1e-5));
}
