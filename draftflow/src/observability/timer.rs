use crate::stages::StageName;
use std::time::Instant;

/// Measures a single stage invocation.
#[derive(Debug)]
pub struct StageTimer {
    stage: StageName,
    start: Instant,
}

impl StageTimer {
    /// Starts timing `stage`.
    #[must_use]
    pub fn start(stage: StageName) -> Self {
        Self {
            stage,
            start: Instant::now(),
        }
    }

    /// The timed stage.
    #[must_use]
    pub fn stage(&self) -> StageName {
        self.stage
    }

    /// Elapsed wall time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}
