use crate::buffer::PixelBuffer;
use crate::color::{self, ScaleFactors};
use crate::error::EditError;

/// Display side of the pipeline: receives every freshly derived frame.
pub trait FrameSink {
    fn present(&mut self, frame: &PixelBuffer);
}

/// Sink for headless use; discards frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &PixelBuffer) {}
}

/// A loaded image together with the factors and output derived from it.
#[derive(Debug, Clone)]
struct Session {
    original: PixelBuffer,
    factors: ScaleFactors,
    derived: PixelBuffer,
}

#[derive(Debug, Clone)]
enum State {
    Empty,
    Loaded(Session),
}

/// Keeps the displayed frame consistent with the loaded image and the
/// current scale factors.
///
/// The derived frame is always recomputed from the untouched original, so
/// repeated adjustments never compound rounding error. Each instance is an
/// independent session; there is no shared state between pipelines.
#[derive(Debug)]
pub struct RenderPipeline<S: FrameSink = NullSink> {
    state: State,
    sink: S,
    revision: u64,
}

impl Default for RenderPipeline<NullSink> {
    fn default() -> Self {
        Self::new(NullSink)
    }
}

impl<S: FrameSink> RenderPipeline<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: State::Empty,
            sink,
            revision: 0,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    /// Number of frames derived so far; changes whenever the output does.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn session(&self) -> Result<&Session, EditError> {
        match &self.state {
            State::Loaded(session) => Ok(session),
            State::Empty => Err(EditError::NoImageLoaded),
        }
    }

    pub fn factors(&self) -> Result<ScaleFactors, EditError> {
        Ok(self.session()?.factors)
    }

    pub fn original(&self) -> Result<&PixelBuffer, EditError> {
        Ok(&self.session()?.original)
    }

    /// Replace the loaded image. Factors reset to neutral.
    pub fn on_load(&mut self, buffer: PixelBuffer) {
        log::info!("Loaded {}x{} image", buffer.width(), buffer.height());
        let factors = ScaleFactors::NEUTRAL;
        let derived = color::apply(&buffer, factors);
        self.state = State::Loaded(Session {
            original: buffer,
            factors,
            derived,
        });
        self.publish();
    }

    /// Apply new factors to the original image.
    ///
    /// Invalid factors are rejected and leave the previous frame in place.
    pub fn set_factors(&mut self, factors: ScaleFactors) -> Result<(), EditError> {
        if !self.is_loaded() {
            return Err(EditError::NoImageLoaded);
        }
        let factors = factors.validate().inspect_err(|e| log::warn!("{e}"))?;

        let State::Loaded(session) = &mut self.state else {
            return Err(EditError::NoImageLoaded);
        };
        session.derived = color::apply(&session.original, factors);
        session.factors = factors;
        log::debug!(
            "Applied factors r={:.3} g={:.3} b={:.3}",
            factors.r,
            factors.g,
            factors.b
        );
        self.publish();
        Ok(())
    }

    /// Gray-world balance of the original image, applied as new factors.
    ///
    /// Returns the factors that were applied. On a degenerate channel
    /// nothing changes.
    pub fn auto_fix(&mut self) -> Result<ScaleFactors, EditError> {
        let original = self.original()?;
        let factors = color::estimate(original).inspect_err(|e| log::warn!("Auto-fix: {e}"))?;
        log::info!(
            "Auto-fix factors r={:.4} g={:.4} b={:.4}",
            factors.r,
            factors.g,
            factors.b
        );
        self.set_factors(factors)?;
        Ok(factors)
    }

    /// Return to neutral factors.
    pub fn reset(&mut self) -> Result<(), EditError> {
        self.set_factors(ScaleFactors::NEUTRAL)
    }

    /// The current corrected frame, ready for encoding.
    pub fn export_frame(&self) -> Result<&PixelBuffer, EditError> {
        Ok(&self.session()?.derived)
    }

    fn publish(&mut self) {
        if let State::Loaded(session) = &self.state {
            self.revision += 1;
            self.sink.present(&session.derived);
        }
    }
}
