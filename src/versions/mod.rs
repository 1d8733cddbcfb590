//! Release cycle discovery and version resolution

pub mod alternate;
pub mod feed;
pub mod resolver;
pub mod support;

pub use alternate::{GoSliceLiteral, VersionListExtractor, fetch_alternate_versions, resolve_alternate};
pub use feed::{ReleaseCycle, fetch_release_cycles, strip_v};
pub use resolver::{ImageResolver, decrement_patch};
pub use support::{filter_supported, today};
