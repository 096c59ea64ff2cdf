/// Errors reported by the decomposition.
///
/// All of them are input validation failures. The only retry the crate performs
/// itself is the bounded capacity retry, whose exhaustion surfaces as
/// [`DecompError::RetryLimitExceeded`].
#[derive(Debug, thiserror::Error)]
pub enum DecompError {
    #[error("seed {seed:?} is not strictly inside the bounding box")]
    SeedOutOfBounds { seed: Vec<f64> },

    /// The seed coincides with an obstacle (or the growth ellipsoid collapsed
    /// against one) within the configured tolerance.
    #[error("seed is degenerate: obstacle {obstacle} lies within {distance:e} of it")]
    DegenerateSeed { obstacle: usize, distance: f64 },

    #[error("capacity retry gave up after {attempts} attempts (last capacity {capacity})")]
    RetryLimitExceeded { attempts: usize, capacity: usize },

    #[error("bounding box must be finite with min < max on every axis")]
    InvalidBoundingBox,

    #[error("dilation radius must be positive and finite, got {0}")]
    InvalidDilationRadius(f64),

    #[error("obstacle {index} has a non-finite coordinate")]
    NonFiniteObstacle { index: usize },

    #[error("obstacle index {index} does not fit a plane source id")]
    ObstacleIndexOverflow { index: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("failed to parse options: {0}")]
    Config(#[from] serde_json::Error),
}
