use crate::domain::model::CardView;
use crate::utils::error::{Result, TarotError};
use async_trait::async_trait;

/// The external language model: one prompt in, one completion out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn submit(&self, prompt: &str) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn deck_path(&self) -> &str;
    fn images_dir(&self) -> &str;
    fn llm_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn temperature(&self) -> f32;
    fn timeout_seconds(&self) -> u64;
    fn seed(&self) -> Option<u64>;
}

/// Output side of the interactive surface.
pub trait Presenter {
    fn show_cards(&mut self, cards: &[CardView]);
    fn show_progress(&mut self, message: &str);
    fn show_interpretation(&mut self, text: &str);
    fn warn(&mut self, message: &str);
    fn error(&mut self, error: &TarotError);
}
