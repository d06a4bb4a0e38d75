//! CV extraction library

pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod experience;
pub mod input;
pub mod output;

pub use config::Config;
pub use error::{CvExtractError, Result};
