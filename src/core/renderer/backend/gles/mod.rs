mod gles;

pub use gles::GlesRenderer;
