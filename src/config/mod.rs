//! Configuration module

mod index;

pub use index::ArtifactFormat;
pub use index::FieldDefaults;
pub use index::IndexConfig;
pub use index::DEFAULT_AUTHOR;
