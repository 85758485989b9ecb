//! Result and error types for Navegar.

use thiserror::Error;

/// Result type for Navegar operations
pub type NavegarResult<T> = Result<T, NavegarError>;

/// Errors that can occur in Navegar
#[derive(Debug, Error)]
pub enum NavegarError {
    /// No starting scene could be resolved when a navigator was requested
    #[error("No starting scene: {message}")]
    NoStartingScene {
        /// Error message
        message: String,
    },

    /// A scene name was not declared in the graph
    #[error("Unknown scene: {name}")]
    UnknownScene {
        /// The undeclared scene name
        name: String,
    },

    /// No directed route exists between two scenes
    #[error("No route from {from} to {to}")]
    NoRoute {
        /// Origin scene
        from: String,
        /// Destination scene
        to: String,
    },

    /// A scene guard did not become observable within the bounded wait
    #[error("Scene {scene} not observable after {ms}ms")]
    GuardTimeout {
        /// Scene whose guard timed out
        scene: String,
        /// Wait budget in milliseconds
        ms: u64,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NavegarError::UnknownScene {
            name: "Nowhere".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown scene: Nowhere");

        let err = NavegarError::NoRoute {
            from: "Home".to_string(),
            to: "Vault".to_string(),
        };
        assert_eq!(err.to_string(), "No route from Home to Vault");
    }

    #[test]
    fn test_guard_timeout_display() {
        let err = NavegarError::GuardTimeout {
            scene: "Settings".to_string(),
            ms: 3000,
        };
        assert!(err.to_string().contains("Settings"));
        assert!(err.to_string().contains("3000"));
    }
}
