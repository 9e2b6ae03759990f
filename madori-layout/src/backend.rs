use crate::bias::NormalSource;
use crate::config::PlacementConfig;
use crate::display::{locate, Margin};
use crate::error::Result;
use crate::geometry::{Point, Rect, Size};
use crate::intent::LayoutIntent;
use crate::place::{compute, PlacementResult};

/// Access to the focused window and the attached displays.
pub trait WindowBackend {
    /// Current frame of the focused window, top-left origin.
    fn active_window_geometry(&self) -> Result<Rect>;

    /// Move and/or resize the focused window. `None` leaves that property
    /// unchanged. When both are given the position must be applied first,
    /// so the OS does not shrink a window that briefly hangs off an edge.
    fn set_active_window_geometry(&self, size: Option<Size>, position: Option<Point>)
        -> Result<()>;

    /// Display frames in system order, bottom-left origin. The first entry
    /// is the primary display.
    fn displays(&self) -> Result<Vec<Rect>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied(PlacementResult),
    /// The window was already at its target size; nothing was written.
    Unchanged,
}

/// Runs one placement per trigger: read, locate, compute, write.
pub struct Placer<B, N> {
    backend: B,
    bias: N,
    config: PlacementConfig,
}

impl<B: WindowBackend, N: NormalSource> Placer<B, N> {
    pub fn new(backend: B, bias: N, config: PlacementConfig) -> Self {
        Self {
            backend,
            bias,
            config,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn place(&mut self, intent: &LayoutIntent) -> Result<Outcome> {
        let window = self.backend.active_window_geometry()?;
        let frames = self.backend.displays()?;
        let screen = locate(&window, &frames)?;
        let margin = Margin::for_display(&screen, &self.config);

        tracing::debug!(
            "Placing {} window {:?} on display {:?} (margin {:?})",
            intent.mode,
            window,
            screen.region,
            margin
        );

        let Some(result) = compute(
            &window,
            &screen,
            margin,
            intent,
            &self.config,
            &mut self.bias,
        ) else {
            tracing::info!("{}: window already at target size", intent.mode);
            return Ok(Outcome::Unchanged);
        };

        let size = intent.mode.resizes().then_some(result.size);
        self.backend
            .set_active_window_geometry(size, Some(result.position))?;

        tracing::info!(
            "{}: {}x{} at ({}, {})",
            intent.mode,
            result.size.width,
            result.size.height,
            result.position.x,
            result.position.y
        );
        Ok(Outcome::Applied(result))
    }
}
