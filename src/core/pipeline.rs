use crate::core::prompt::format_prompt;
use crate::domain::model::{DrawnCard, InterpretationRequest, ReferenceTable};
use crate::domain::ports::CompletionClient;
use crate::utils::error::{Result, TarotError};
use std::sync::Arc;

/// Inputs → prompt → model → text. No branching, caching or retries.
pub struct InterpretationPipeline<C: CompletionClient> {
    table: Arc<ReferenceTable>,
    client: C,
}

impl<C: CompletionClient> InterpretationPipeline<C> {
    pub fn new(table: Arc<ReferenceTable>, client: C) -> Self {
        Self { table, client }
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    pub async fn interpret(&self, drawn: &[DrawnCard], context: &str) -> Result<String> {
        if drawn.is_empty() {
            return Err(TarotError::ValidationError {
                message: "no cards were drawn".to_string(),
            });
        }
        if context.trim().is_empty() {
            return Err(TarotError::ValidationError {
                message: "the reading context is empty".to_string(),
            });
        }

        let prompt = format_prompt(drawn, &self.table, context)?;
        tracing::debug!("Prompt ({} chars):\n{}", prompt.len(), prompt);

        let completion = self
            .client
            .submit(&prompt)
            .await
            .map_err(TarotError::into_interpretation)?;

        if completion.trim().is_empty() {
            return Err(TarotError::interpretation("the model returned an empty completion"));
        }

        tracing::info!("📜 Interpretation received ({} chars)", completion.len());
        Ok(completion)
    }

    pub async fn run(&self, request: &InterpretationRequest) -> Result<String> {
        self.interpret(&request.drawn, &request.context).await
    }
}
