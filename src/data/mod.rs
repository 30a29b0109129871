//! Data loading
//!
//! Generator settings live in external RON files so dungeons can be tuned
//! without recompiling.

pub mod loader;

pub use loader::{
    export_default_profile, load_config, load_or_default, save_config, to_ron, GeneratorProfile,
};
