pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{chat_completion::ChatCompletionClient, images::ImageLocator};
pub use config::TomlConfig;
pub use crate::core::{
    deck::load_reference_table, draw::draw, pipeline::InterpretationPipeline,
    prompt::format_prompt, session::ReadingSession,
};
pub use utils::error::{Result, TarotError};
