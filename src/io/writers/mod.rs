pub mod jpeg;
pub mod metadata;
