//! Turns a matched release into a Telegram notification: resolve the movie, format the message,
//! send it.

mod error;
pub mod facades;
pub mod models;
mod pipeline;

pub use error::PipelineError;
pub use pipeline::{PipelineState, ReleasePipeline};
