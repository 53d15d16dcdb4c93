//! Error types for the `oreganizer` binary.

/// Top-level error for the `oreganizer` binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: oreganizer_core::ConfigError,
    },

    /// An input file could not be loaded.
    #[error("input error: {source}")]
    Input {
        /// The underlying input error.
        #[from]
        source: oreganizer_core::InputError,
    },

    /// Planning failed.
    #[error("plan error: {source}")]
    Plan {
        /// The underlying planner error.
        #[from]
        source: oreganizer_core::PlanError,
    },

    /// The plan could not be serialized.
    #[error("failed to serialize plan: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The finished plan does not balance.
    #[error("{anomaly}")]
    Conservation {
        /// What failed to balance.
        anomaly: oreganizer_ledger::ConservationAnomaly,
    },
}
