//! Mode-aware configuration assembly for webpack-style bundlers.
//!
//! The crate turns [`BuildOptions`] into a [`BuildConfig`] tree: a base tree
//! merged with fragments gated on the [`BuildMode`], with ordered loader
//! chains for each style category. [`record::flatten`] splits ordered records
//! into parallel key/value sequences and backs the environment encoding.

pub mod assembler;
pub mod discovery;
pub mod env;
pub mod error;
pub mod loaders;
pub mod merge;
pub mod mode;
pub mod options;
pub mod pattern;
pub mod plugin;
pub mod record;
pub mod rules;
pub mod validation;

// Re-export main types
pub use assembler::{Assembler, BuildConfig};
pub use error::*;
pub use loaders::{LoaderChain, LoaderDescriptor, StyleCategory, StyleRules, style_loaders};
pub use merge::{Fragment, Guard, apply_fragments, deep_merge, merge_if};
pub use mode::BuildMode;
pub use options::{BuildOptions, FragmentSpec, PathsConfig, ResolvedPaths};
pub use plugin::{PluginDescriptor, PluginToggles};
pub use record::{KeyValueSplit, Record, flatten, flatten_object};

// Re-export discovery and validation
pub use discovery::{ConfigDiscovery, discover};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
