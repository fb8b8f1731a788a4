//! Configuration errors
//!
//! The simulation itself has no failure surface; only settings can be wrong.

/// Errors raised while loading or validating `Settings`.
#[derive(Debug)]
pub enum ConfigError {
    /// A length, speed or duration is zero, negative, NaN or infinite.
    NonPositive { field: &'static str, value: f32 },
    /// Ring radii must satisfy 0 < bullseye < middle < outer.
    RadiiNotNested { bullseye: f32, middle: f32, outer: f32 },
    /// Target motion bounds are empty (y_min >= y_max).
    EmptyMotionBounds { y_min: f32, y_max: f32 },
    /// Dart origin is outside the field or not left of the target.
    BadDartOrigin { x: f32, y: f32 },
    /// Initial heading must be finite and within [-360, 360] degrees.
    BadHeading(f32),
    /// Aim window must be in (0, 180) degrees.
    BadAimWindow(f32),
    /// Levels need at least one throw.
    NoThrows,
    /// Unlock threshold is zero or can never be reached.
    UnreachableThreshold { level: u8, threshold: u32, max_score: u32 },
    /// Obstacle placement is off the path or off the field.
    BadObstacle { index: usize, reason: &'static str },
    /// Standard I/O error.
    IoError(std::io::Error),
    /// JSON deserialization error.
    JsonError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be finite and positive, got {value}")
            }
            ConfigError::RadiiNotNested {
                bullseye,
                middle,
                outer,
            } => write!(
                f,
                "radii must be nested (bullseye {bullseye} < middle {middle} < outer {outer})"
            ),
            ConfigError::EmptyMotionBounds { y_min, y_max } => {
                write!(f, "target motion bounds are empty ({y_min} >= {y_max})")
            }
            ConfigError::BadDartOrigin { x, y } => {
                write!(f, "dart origin ({x}, {y}) must be inside the field and left of the target")
            }
            ConfigError::BadHeading(h) => {
                write!(f, "initial heading {h} must be finite and within [-360, 360] degrees")
            }
            ConfigError::BadAimWindow(w) => write!(f, "aim window {w} must be in (0, 180) degrees"),
            ConfigError::NoThrows => write!(f, "throws per level must be at least 1"),
            ConfigError::UnreachableThreshold {
                level,
                threshold,
                max_score,
            } => write!(
                f,
                "level {level} unlock threshold {threshold} is outside 1..={max_score}"
            ),
            ConfigError::BadObstacle { index, reason } => write!(f, "obstacle {index}: {reason}"),
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::JsonError(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::JsonError(e)
    }
}
