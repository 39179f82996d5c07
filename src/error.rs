use std::{error::Error as StdError, fmt};

use glutin::error::Error as GlutinError;
use image::ImageError;
use winit::error::EventLoopError;

#[derive(Debug)]
pub enum AppError {
    Context(GlutinError),      // GL display/context/surface creation failures
    Gl(String, &'static str),  // GL info log or failure text + call-site context
    Image(ImageError),         // texture image decode failures
    Winit(EventLoopError),     // winit’s EventLoopError
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Context(e) => write!(f, "glutin: {e}"),
            Self::Gl(log, ctx) => write!(f, "GL error: {} (context: {})", log.trim_end(), ctx),
            Self::Image(e) => write!(f, "image: {e}"),
            Self::Winit(e) => write!(f, "winit: {e}"),
        }
    }
}

impl StdError for AppError {}

/// `?` conversions
impl From<GlutinError> for AppError {
    fn from(e: GlutinError) -> Self {
        Self::Context(e)
    }
}
impl From<ImageError> for AppError {
    fn from(e: ImageError) -> Self {
        Self::Image(e)
    }
}
impl From<EventLoopError> for AppError {
    fn from(e: EventLoopError) -> Self {
        Self::Winit(e)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

pub trait GlResultExt<T> {
    fn into_app_error(self, context: &'static str) -> Result<T>;
}

/// glow reports object-creation failures as `Err(String)`.
impl<T> GlResultExt<T> for std::result::Result<T, String> {
    fn into_app_error(self, context: &'static str) -> Result<T> {
        self.map_err(|log| AppError::Gl(log, context))
    }
}
