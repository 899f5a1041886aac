//! Layered configuration composition.
//!
//! A configuration is usually assembled from several sources of increasing
//! precedence: baked-in defaults, configuration files, environment variables
//! and command-line arguments. Each source is decoded into a
//! [`serde_json::Value`] and wrapped in a [`MergeLayer`] recording where it
//! came from. A [`MergeComposer`] collects the layers and folds them, in push
//! order, with a [`crate::Merger`].
//!
//! # Example
//!
//! ```rust
//! use camino::Utf8PathBuf;
//! use config_merge::{MergeComposer, Merger};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize)]
//! struct AppConfig {
//!     port: u16,
//!     features: Vec<String>,
//! }
//!
//! let mut composer = MergeComposer::new();
//! composer.push_defaults(json!({"port": 3000, "features": ["metrics"]}));
//! composer.push_file(
//!     json!({"features": ["metrics", "tracing"]}),
//!     Some(Utf8PathBuf::from("app.yaml")),
//! );
//! composer.push_cli(json!({"port": 4000}));
//!
//! let config: AppConfig = composer.extract(&Merger::default())?;
//! assert_eq!(config.port, 4000);
//! assert_eq!(config.features, ["metrics", "tracing"]);
//! # Ok::<_, config_merge::ComposeError>(())
//! ```

mod composer;
mod convert;
mod origin;

pub use composer::MergeComposer;
pub use convert::from_value;
pub use origin::{MergeLayer, MergeProvenance};
