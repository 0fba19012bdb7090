pub mod deck;
pub mod draw;
pub mod pipeline;
pub mod prompt;
pub mod session;

pub use crate::domain::model::{
    CardMeaning, CardView, DrawResult, DrawnCard, InterpretationRequest, ReferenceTable, SpreadSize,
};
pub use crate::domain::ports::{CompletionClient, ConfigProvider, Presenter};
pub use crate::utils::error::Result;
