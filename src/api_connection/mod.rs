pub mod connection;
pub mod endpoints;
pub mod image;

pub use connection::{ApiConnectionError, GeminiClient, TextGenerator};
pub use image::ImageData;
