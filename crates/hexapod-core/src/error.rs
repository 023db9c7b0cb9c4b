use thiserror::Error;

/// Top-level error type for the hexapod kinematics crates.
#[derive(Debug, Error)]
pub enum HexapodError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Solver error: {0}")]
    Solve(#[from] SolveError),
}

/// Dimension/configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{name} must be positive, got {value}")]
    NonPositiveLength { name: &'static str, value: f64 },

    #[error("{name} must be finite")]
    NonFiniteValue { name: &'static str },
}

/// Inverse-kinematics solve errors.
///
/// Forward kinematics never fails; it is the solver's and the configuration
/// loader's job to never hand it invalid input.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error(
        "Unreachable target for {leg} leg: distance {distance:.4} from the femur joint \
         is outside [{min_reach:.4}, {max_reach:.4}]"
    )]
    UnreachableTarget {
        leg: &'static str,
        distance: f64,
        min_reach: f64,
        max_reach: f64,
    },

    #[error("Trigonometric domain violation in {context}: argument {value}")]
    DomainViolation { context: &'static str, value: f64 },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
