//! Folding layers into one tree.

use camino::Utf8PathBuf;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::{MergeLayer, MergeProvenance, from_value};
use crate::error::ComposeError;
use crate::merge::Merger;

/// Ordered stack of [`MergeLayer`]s folded into a single tree.
///
/// Layers are applied in push order, so later layers take precedence.
///
/// ```rust
/// use config_merge::{MergeComposer, Merger};
/// use serde_json::json;
///
/// let mut composer = MergeComposer::new();
/// composer
///     .push_defaults(json!({"hosts": [{"name": "a", "port": 1}]}))
///     .push_environment(json!({"hosts": [{"name": "a", "port": 2}, {"name": "b"}]}));
///
/// let merged = composer.compose(&Merger::default())?;
/// assert_eq!(merged, json!({"hosts": [{"name": "a", "port": 2}, {"name": "b"}]}));
/// # Ok::<_, config_merge::ComposeError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MergeComposer {
    stack: Vec<MergeLayer>,
}

impl MergeComposer {
    /// An empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// An empty stack with room for `capacity` layers.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: Vec::with_capacity(capacity),
        }
    }

    /// Push application defaults.
    pub fn push_defaults(&mut self, value: Value) -> &mut Self {
        self.push_layer(MergeLayer::new(MergeProvenance::Defaults, value))
    }

    /// Push a file layer, remembering its path when known.
    pub fn push_file(&mut self, value: Value, path: Option<Utf8PathBuf>) -> &mut Self {
        let layer = MergeLayer::new(MergeProvenance::File, value);
        self.push_layer(match path {
            Some(file) => layer.with_path(file),
            None => layer,
        })
    }

    /// Push values collected from the environment.
    pub fn push_environment(&mut self, value: Value) -> &mut Self {
        self.push_layer(MergeLayer::new(MergeProvenance::Environment, value))
    }

    /// Push command-line overrides.
    pub fn push_cli(&mut self, value: Value) -> &mut Self {
        self.push_layer(MergeLayer::new(MergeProvenance::Cli, value))
    }

    /// Push a prepared layer on top of the stack.
    pub fn push_layer(&mut self, layer: MergeLayer) -> &mut Self {
        self.stack.push(layer);
        self
    }

    /// Number of layers pushed so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` when nothing has been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The layers in push order.
    #[must_use]
    pub fn layers(&self) -> &[MergeLayer] {
        &self.stack
    }

    /// Fold every layer, in push order, into a single tree.
    ///
    /// Composing no layers yields `null`. Folding stops at the first layer
    /// that cannot be merged.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Layer`] naming the failing layer and wrapping
    /// its [`crate::MergeError`].
    pub fn compose(self, merger: &Merger) -> Result<Value, ComposeError> {
        self.stack
            .into_iter()
            .enumerate()
            .try_fold(Value::Null, |mut merged, (index, layer)| {
                let (provenance, path, value) = layer.into_parts();
                debug!(index, %provenance, path = ?path, "merging configuration layer");
                merger
                    .merge(&mut merged, value)
                    .map_err(|source| ComposeError::Layer {
                        index,
                        provenance,
                        path,
                        source,
                    })?;
                Ok(merged)
            })
    }

    /// Compose the layers and deserialise the result into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Layer`] when a layer cannot be merged, or
    /// [`ComposeError::Deserialize`] when the merged tree does not fit `T`.
    pub fn extract<T: DeserializeOwned>(self, merger: &Merger) -> Result<T, ComposeError> {
        from_value(self.compose(merger)?)
    }
}

impl FromIterator<MergeLayer> for MergeComposer {
    fn from_iter<I: IntoIterator<Item = MergeLayer>>(iter: I) -> Self {
        Self {
            stack: iter.into_iter().collect(),
        }
    }
}

impl Extend<MergeLayer> for MergeComposer {
    fn extend<I: IntoIterator<Item = MergeLayer>>(&mut self, iter: I) {
        self.stack.extend(iter);
    }
}
