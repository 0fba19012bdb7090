// Adapters layer: concrete implementations for external systems (model endpoint, images, terminal).

pub mod chat_completion;
pub mod images;
pub mod terminal;
