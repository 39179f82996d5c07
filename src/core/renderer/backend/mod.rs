// src/core/renderer/backend/mod.rs
#[cfg(feature = "gles30")]
pub mod gles;

// Re-export the selected backend under a common name:
#[cfg(feature = "gles30")]
pub use gles::GlesRenderer as SelectedRenderer;
