//! Infrastructure layer - source adapters
//!
//! - `DirectorySource`: `<root>/<name>.geojson` on the local file system
//! - `MemorySource`: collections held in memory

pub mod directory;
pub mod memory;

pub use directory::DirectorySource;
pub use memory::MemorySource;
