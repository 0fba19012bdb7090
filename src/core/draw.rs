use crate::domain::model::{DrawResult, DrawnCard};
use crate::utils::error::{Result, TarotError};
use rand::Rng;

/// Draws `count` distinct names uniformly at random, each independently
/// reversed with probability one half. Results keep the sampling order.
pub fn draw<R, S>(count: usize, names: &[S], rng: &mut R) -> Result<DrawResult>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    if count == 0 {
        return Err(TarotError::InvalidDrawCount { count });
    }
    if count > names.len() {
        return Err(TarotError::InsufficientCardsError {
            requested: count,
            available: names.len(),
        });
    }

    let picked = rand::seq::index::sample(rng, names.len(), count);
    let drawn: DrawResult = picked
        .into_iter()
        .map(|position| DrawnCard {
            name: names[position].as_ref().to_string(),
            reversed: rng.random_bool(0.5),
        })
        .collect();

    tracing::debug!(
        "🃏 Drew {} of {} cards: {:?}",
        count,
        names.len(),
        drawn
            .iter()
            .map(|card| format!("{} ({})", card.name, card.orientation()))
            .collect::<Vec<_>>()
    );

    Ok(drawn)
}
