pub mod cache;
pub mod codec;
pub mod config;
pub mod context;
pub mod creation;
pub mod err;
pub mod model;
pub mod path;
pub mod resolver;
pub mod selector;
pub mod xattr;

pub use config::Config;
pub use context::Context;
pub use err::{Result, RvfsError};
pub use model::{Metadata, Pin, SvidQuery, Version, VersionQuery};
