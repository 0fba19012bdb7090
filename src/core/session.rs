use crate::adapters::images::ImageLocator;
use crate::core::draw::draw;
use crate::core::pipeline::InterpretationPipeline;
use crate::domain::model::{CardView, DrawResult, InterpretationRequest, SpreadSize};
use crate::domain::ports::{CompletionClient, Presenter};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const EMPTY_CONTEXT_WARNING: &str =
    "For a more precise reading, describe your situation or ask your question first.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Nothing was drawn; the user was asked for a context.
    Warned,
    Completed { drawn: DrawResult, interpretation: String },
    Failed,
}

/// Handles one user-triggered reading at a time. Errors raised while
/// handling a trigger go to the presenter and leave the session usable.
pub struct ReadingSession<C: CompletionClient> {
    pipeline: InterpretationPipeline<C>,
    images: ImageLocator,
    rng: StdRng,
}

impl<C: CompletionClient> ReadingSession<C> {
    pub fn new(pipeline: InterpretationPipeline<C>, images: ImageLocator, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                tracing::debug!("Using fixed draw seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Self {
            pipeline,
            images,
            rng,
        }
    }

    pub async fn trigger<P: Presenter>(
        &mut self,
        spread: SpreadSize,
        context: &str,
        presenter: &mut P,
    ) -> TriggerOutcome {
        if context.trim().is_empty() {
            presenter.warn(EMPTY_CONTEXT_WARNING);
            return TriggerOutcome::Warned;
        }

        match self.read(spread, context, presenter).await {
            Ok((drawn, interpretation)) => {
                presenter.show_interpretation(&interpretation);
                TriggerOutcome::Completed {
                    drawn,
                    interpretation,
                }
            }
            Err(e) => {
                tracing::error!(
                    "❌ Reading failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                presenter.error(&e);
                TriggerOutcome::Failed
            }
        }
    }

    async fn read<P: Presenter>(
        &mut self,
        spread: SpreadSize,
        context: &str,
        presenter: &mut P,
    ) -> Result<(DrawResult, String)> {
        let names = self.pipeline.table().names();
        let drawn = draw(spread.count(), &names, &mut self.rng)?;

        let views: Vec<CardView> = drawn
            .iter()
            .map(|card| CardView {
                name: card.name.clone(),
                reversed: card.reversed,
                image: self.images.locate(&card.name),
            })
            .collect();
        presenter.show_cards(&views);

        presenter.show_progress("🔮 Revealing the meanings...");
        let request = InterpretationRequest {
            drawn,
            context: context.to_string(),
        };
        let interpretation = self.pipeline.run(&request).await?;

        Ok((request.drawn, interpretation))
    }
}
