//! Headless viewer driver.
//!
//! ```text
//! skelview <config.json> <model-name> [frames] [fps]
//! ```
//!
//! Loads the catalog, displays the model, advances its default animation for
//! `frames` fixed steps and logs the world position of every bone.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use skelview::app::{SurfaceHost, SurfaceSize};
use skelview::{LoadOutcome, RigLoader, Viewer, ViewerConfig};

/// Stand-in for a page or window: every selector resolves to one fixed-size
/// surface.
struct HeadlessHost {
    size: SurfaceSize,
}

impl SurfaceHost for HeadlessHost {
    fn find_surface(&self, _selector: &str) -> Option<SurfaceSize> {
        Some(self.size)
    }
}

struct Args {
    config: PathBuf,
    model: String,
    frames: u32,
    fps: f32,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args().skip(1);
    let (Some(config), Some(model)) = (args.next(), args.next()) else {
        bail!("usage: skelview <config.json> <model-name> [frames] [fps]");
    };
    let frames = args
        .next()
        .map(|s| s.parse::<u32>())
        .transpose()
        .context("frames must be a non-negative integer")?
        .unwrap_or(60);
    let fps = args
        .next()
        .map(|s| s.parse::<f32>())
        .transpose()
        .context("fps must be a number")?
        .unwrap_or(60.0);
    if !fps.is_finite() || fps <= 0.0 {
        bail!("fps must be positive, got {fps}");
    }

    Ok(Args {
        config: PathBuf::from(config),
        model,
        frames,
        fps,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = ViewerConfig::load(&args.config)
        .with_context(|| format!("reading {}", args.config.display()))?;

    let host = HeadlessHost {
        size: SurfaceSize::new(1280, 720, 1.0),
    };
    let mut viewer = Viewer::new(config, &host)?;

    let root = args.config.parent().unwrap_or(Path::new("."));
    let loader = RigLoader::from_dir(root);

    match viewer.load_model(&loader, &args.model).await? {
        LoadOutcome::Displayed { model, report } => {
            if let Some(report) = report {
                log::info!(
                    "'{model}': {} bone(s) animated, {} skipped",
                    report.animated.len(),
                    report.skipped.len()
                );
            }
        }
        LoadOutcome::Stale { request } => bail!("load request #{request} was superseded"),
    }

    let dt = 1.0 / args.fps;
    for _ in 0..args.frames {
        viewer.advance(dt);
    }

    let Some(model) = viewer.active_model_mut() else {
        bail!("no model displayed");
    };
    let name = model.name.clone();
    let Some(skeleton) = model.skeleton_mut() else {
        log::info!("'{name}' has no skeleton");
        return Ok(());
    };
    skeleton.update_world_matrices();
    for (handle, bone) in skeleton.bones() {
        let p = skeleton.world_position(handle).unwrap_or_default();
        log::info!(
            "{:<12} position [{:.3}, {:.3}, {:.3}]",
            bone.name,
            p.x,
            p.y,
            p.z
        );
    }
    Ok(())
}
