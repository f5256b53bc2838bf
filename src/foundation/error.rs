use crate::layer::LayerKind;

/// Convenience result type used throughout terrella.
pub type GlobeResult<T> = Result<T, GlobeError>;

/// Top-level error type for composition, configuration and animation.
#[derive(thiserror::Error, Debug)]
pub enum GlobeError {
    /// Unknown property name, rejected value, or an invalid configuration surface.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A property was touched before the composition finished initializing.
    #[error("not initialized: {0}")]
    NotInitialized(String),

    /// A layer module failed during construction.
    #[error("layer '{layer}' failed to initialize: {source}")]
    LayerInitialization {
        /// Layer whose construction failed.
        layer: LayerKind,
        /// Underlying failure reported by the layer module.
        #[source]
        source: Box<GlobeError>,
    },

    /// A scene-graph operation referenced a missing node or would form a cycle.
    #[error("scene error: {0}")]
    Scene(String),

    /// A tween or deferred callback reported a failure.
    #[error("animation error: {0}")]
    Animation(String),

    /// Options or property payloads could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped external error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlobeError {
    /// Build a [`GlobeError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`GlobeError::NotInitialized`] value.
    pub fn not_initialized(msg: impl Into<String>) -> Self {
        Self::NotInitialized(msg.into())
    }

    /// Build a [`GlobeError::LayerInitialization`] value.
    pub fn layer_initialization(layer: LayerKind, source: GlobeError) -> Self {
        Self::LayerInitialization {
            layer,
            source: Box::new(source),
        }
    }

    /// Build a [`GlobeError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`GlobeError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`GlobeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GlobeError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
