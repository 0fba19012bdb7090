use crate::domain::model::{DrawnCard, ReferenceTable};
use crate::utils::error::{Result, TarotError};

/// Renders one card as a block the model can read unambiguously.
fn card_block(position: usize, card: &DrawnCard, meaning: &str) -> String {
    format!(
        "{}. {} ({})\n   Meaning: {}",
        position,
        card.name,
        card.orientation(),
        meaning
    )
}

/// Lists every drawn card with the meaning matching its orientation.
pub fn card_details(drawn: &[DrawnCard], table: &ReferenceTable) -> Result<String> {
    let mut blocks = Vec::with_capacity(drawn.len());
    for (i, card) in drawn.iter().enumerate() {
        let meaning = table
            .get(&card.name)
            .ok_or_else(|| TarotError::LookupError {
                card: card.name.clone(),
            })?;
        blocks.push(card_block(i + 1, card, meaning.meaning_for(card.reversed)));
    }
    Ok(blocks.join("\n"))
}

/// Builds the instruction block sent to the model. `context` is embedded
/// verbatim.
pub fn format_prompt(drawn: &[DrawnCard], table: &ReferenceTable, context: &str) -> Result<String> {
    let details = card_details(drawn, table)?;

    Ok(format!(
        "Analyze the following tarot cards, based on the meanings provided \
(taking into account whether each card is upright or reversed):\n\
{details}\n\n\
When you talk about the person who drew the cards, call them \"the querent\", \
and always address the querent directly in the second person (\"you\").\n\
First, give a detailed analysis of the meaning of *each* card, upright or reversed.\n\
Then offer an overall interpretation of the cards *as a whole*, tying it to this context: {context}\n\
Finish with some advice for improving the situation.\n\
Always be professional and empathetic in your answer.\n"
    ))
}
