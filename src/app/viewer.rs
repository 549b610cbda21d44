//! Viewer controller.
//!
//! [`Viewer`] is the single owner of the application state: the model
//! catalog, the output viewport, the displayed model and, through that model,
//! its mixer.
//!
//! # Loading
//!
//! Selecting a model removes the current one immediately and issues a
//! [`LoadTicket`]. Tickets carry a monotonically increasing id and only the
//! most recent one is accepted by [`Viewer::finish_load`]; the completion of
//! a superseded request is reported as [`LoadOutcome::Stale`] and changes
//! nothing.
//!
//! ```rust,ignore
//! let ticket = viewer.request_model("human-model")?;
//! let result = loader.load(ticket.path()).await;
//! match viewer.finish_load(ticket, result)? {
//!     LoadOutcome::Displayed { .. } => {}
//!     LoadOutcome::Stale { .. } => {}
//! }
//! ```

use crate::animation::{CompileReport, KeyframeCompiler};
use crate::app::viewport::{SurfaceHost, Viewport};
use crate::assets::{ModelLoader, ViewerConfig};
use crate::errors::{Error, LoadError, Result};
use crate::scene::SkinnedModel;
use crate::utils::time::Timer;

/// Handle of one in-flight model load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    id: u64,
    model: String,
    path: String,
}

impl LoadTicket {
    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Asset path to hand to the loader.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The model is now displayed. `report` is set when a default animation
    /// was compiled.
    Displayed {
        model: String,
        report: Option<CompileReport>,
    },
    /// The request was superseded; its result was discarded.
    Stale { request: u64 },
}

struct ActiveModel {
    /// Catalog name, which may differ from the loaded model's own name.
    descriptor: String,
    model: SkinnedModel,
    animation: Option<String>,
}

pub struct Viewer {
    config: ViewerConfig,
    viewport: Viewport,
    compiler: KeyframeCompiler,

    active: Option<ActiveModel>,
    pending: Option<u64>,
    next_request: u64,
}

impl Viewer {
    /// Resolves the configured output surface and builds the viewer.
    ///
    /// Fails with [`Error::MissingSurface`] when the host has no surface
    /// matching `config.surface`.
    pub fn new(config: ViewerConfig, host: &impl SurfaceHost) -> Result<Self> {
        let Some(size) = host.find_surface(&config.surface) else {
            log::error!("render surface '{}' not found", config.surface);
            return Err(Error::MissingSurface(config.surface));
        };

        let viewport = Viewport::new(size, config.max_pixel_ratio);
        Ok(Self {
            config,
            viewport,
            compiler: KeyframeCompiler::default(),
            active: None,
            pending: None,
            next_request: 1,
        })
    }

    #[must_use]
    pub fn with_compiler(mut self, compiler: KeyframeCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) {
        self.viewport.resize(width, height, device_pixel_ratio);
        log::debug!(
            "viewport resized to {width}x{height} (aspect {:.3}, pixel ratio {})",
            self.viewport.aspect(),
            self.viewport.pixel_ratio()
        );
    }

    // ========================================================================
    // Active model
    // ========================================================================

    #[must_use]
    pub fn active_model(&self) -> Option<&SkinnedModel> {
        self.active.as_ref().map(|a| &a.model)
    }

    pub fn active_model_mut(&mut self) -> Option<&mut SkinnedModel> {
        self.active.as_mut().map(|a| &mut a.model)
    }

    /// Catalog name of the displayed model.
    #[must_use]
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.descriptor.as_str())
    }

    /// Name of the playing keyframe set.
    #[must_use]
    pub fn active_animation(&self) -> Option<&str> {
        self.active.as_ref().and_then(|a| a.animation.as_deref())
    }

    /// Id of the load request that will be accepted next, if any.
    #[must_use]
    pub fn pending_request(&self) -> Option<u64> {
        self.pending
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Starts switching to model `name`.
    ///
    /// The current model is removed right away and any earlier request is
    /// superseded.
    pub fn request_model(&mut self, name: &str) -> Result<LoadTicket> {
        let descriptor = self
            .config
            .model(name)
            .ok_or_else(|| Error::UnknownModel(name.to_string()))?;

        let ticket = LoadTicket {
            id: self.next_request,
            model: descriptor.name.clone(),
            path: descriptor.path.clone(),
        };
        self.next_request += 1;

        if let Some(previous) = self.active.take() {
            log::debug!("removed model '{}'", previous.model.name);
        }
        if let Some(superseded) = self.pending.replace(ticket.id) {
            log::debug!("load request #{superseded} superseded by #{}", ticket.id);
        }

        Ok(ticket)
    }

    /// Completes a load started with [`request_model`](Self::request_model).
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<SkinnedModel, LoadError>,
    ) -> Result<LoadOutcome> {
        if self.pending != Some(ticket.id) {
            log::warn!(
                "discarding stale load #{} of '{}'",
                ticket.id,
                ticket.model
            );
            return Ok(LoadOutcome::Stale { request: ticket.id });
        }
        self.pending = None;

        let mut model = result.inspect_err(|e| log::error!("{e}"))?;

        let descriptor = self
            .config
            .model(&ticket.model)
            .ok_or_else(|| Error::UnknownModel(ticket.model.clone()))?;

        model.transform.scale = descriptor.scale_vec();
        model.transform.position = descriptor.position_vec();

        let (animation, report) = match descriptor.default_keyframes() {
            Some((name, set)) => {
                let report = self.compiler.compile_and_play(&mut model, set);
                (Some(name.to_string()), Some(report))
            }
            None => (None, None),
        };
        model.advance(0.0);

        log::info!(
            "displaying '{}'{}",
            ticket.model,
            animation
                .as_deref()
                .map(|a| format!(" playing '{a}'"))
                .unwrap_or_default()
        );

        self.active = Some(ActiveModel {
            descriptor: ticket.model.clone(),
            model,
            animation,
        });
        Ok(LoadOutcome::Displayed {
            model: ticket.model,
            report,
        })
    }

    /// Requests, loads and displays model `name`.
    pub async fn load_model<L: ModelLoader>(&mut self, loader: &L, name: &str) -> Result<LoadOutcome> {
        let ticket = self.request_model(name)?;
        let result = loader.load(ticket.path()).await;
        self.finish_load(ticket, result)
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Replaces the playing keyframe set of the displayed model.
    pub fn play_animation(&mut self, name: &str) -> Result<CompileReport> {
        let active = self.active.as_mut().ok_or(Error::NoActiveModel)?;
        let set = self
            .config
            .model(&active.descriptor)
            .and_then(|d| d.animation(name))
            .ok_or_else(|| Error::UnknownAnimation {
                model: active.descriptor.clone(),
                animation: name.to_string(),
            })?;

        active.model.clear_animation();
        let report = self.compiler.compile_and_play(&mut active.model, set);
        active.model.advance(0.0);
        active.animation = Some(name.to_string());
        Ok(report)
    }

    /// Stops the animation and returns the bones to their rest pose.
    pub fn stop_animation(&mut self) -> Result<()> {
        let active = self.active.as_mut().ok_or(Error::NoActiveModel)?;
        active.model.clear_animation();
        active.animation = None;
        Ok(())
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Advances the displayed model's animation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if let Some(active) = self.active.as_mut() {
            active.model.advance(dt);
        }
    }

    /// Ticks `timer` and advances by the elapsed time. Returns the step used.
    pub fn frame(&mut self, timer: &mut Timer) -> f32 {
        let dt = timer.tick();
        self.advance(dt);
        dt
    }
}
