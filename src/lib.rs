pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::pipelines::raffle_pipeline::RafflePipeline;
pub use config::{cli::LocalStorage, CliConfig};
pub use core::engine::RaffleEngine;
pub use utils::error::{RaffleError, Result};
