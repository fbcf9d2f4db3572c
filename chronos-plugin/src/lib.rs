//! Chronos Plugin System
//!
//! Every tool is exposed as a pure function plugin so that the server and
//! the facade can dispatch on a name and render help uniformly.

mod registry;
mod traits;

pub mod helpers;

pub use registry::PluginRegistry;
pub use traits::{ArgMeta, FunctionMeta, FunctionPlugin};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{ArgMeta, FunctionMeta, FunctionPlugin, PluginRegistry};
    pub use chronos_core::prelude::*;
}
