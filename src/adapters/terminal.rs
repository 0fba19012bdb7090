use crate::domain::model::CardView;
use crate::domain::ports::Presenter;
use crate::utils::error::TarotError;
use std::io::Write;

pub const CLOSING_REMINDER: &str =
    "Remember: the cards offer insights and reflections, your future is in your hands.";

const RULE: &str = "---";

/// Prints readings to `out` and warnings and errors to `err`.
pub struct TerminalPresenter<W: Write, E: Write> {
    out: W,
    err: E,
}

impl TerminalPresenter<std::io::Stdout, std::io::Stderr> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout(), std::io::stderr())
    }
}

impl<W: Write, E: Write> TerminalPresenter<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }

    /// Returns the output and error writers.
    pub fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }

    pub fn banner(&mut self) {
        self.line("🔮 Interactive Tarot Reading");
        self.line("Welcome to your personalised tarot consultation!");
        self.line(RULE);
    }

    pub fn farewell(&mut self) {
        self.line(RULE);
        self.line(&format!("ℹ️  {}", CLOSING_REMINDER));
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!("Failed to flush terminal output: {}", e);
        }
    }

    fn error_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.err, "{}", text) {
            tracing::warn!("Failed to write to the error stream: {}", e);
        }
    }
}

impl<W: Write, E: Write> Presenter for TerminalPresenter<W, E> {
    fn show_cards(&mut self, cards: &[CardView]) {
        self.line("✨ The Cards Revealed:");
        self.line(RULE);
        for card in cards {
            match &card.image {
                Some(path) => self.line(&format!("🖼  {}  [{}]", card.caption(), path.display())),
                None => self.line(&format!("🃏 Symbol: {}", card.caption())),
            }
        }
        self.line(RULE);
    }

    fn show_progress(&mut self, message: &str) {
        self.line(message);
        self.flush();
    }

    fn show_interpretation(&mut self, text: &str) {
        self.line("📜 The Interpretation:");
        self.line(text);
    }

    fn warn(&mut self, message: &str) {
        self.flush();
        self.error_line(&format!("⚠️  {}", message));
    }

    fn error(&mut self, error: &TarotError) {
        self.flush();
        self.error_line(&format!("❌ An error occurred: {}", error.user_friendly_message()));
        self.error_line(&format!("💡 Suggestion: {}", error.recovery_suggestion()));
    }
}

#[cfg(feature = "cli")]
pub mod input {
    use crate::domain::model::SpreadSize;
    use crate::utils::error::{Result, TarotError};
    use dialoguer::{Confirm, Error as DialoguerError, Input, Select};
    use std::io::ErrorKind;

    /// Asks for the spread size. `None` when the user cancels.
    pub fn prompt_spread() -> Result<Option<SpreadSize>> {
        let items: Vec<String> = SpreadSize::ALL
            .iter()
            .map(|size| size.description().to_string())
            .collect();

        let selection = Select::new()
            .with_prompt("🃏 Choose the number of cards for your spread")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|err| TarotError::ValidationError {
                message: format!("Failed to select spread: {}", err),
            })?;

        Ok(selection.map(|index| SpreadSize::ALL[index]))
    }

    /// Asks for the free-text context. An empty answer is returned as-is.
    pub fn prompt_context() -> Result<Option<String>> {
        match Input::<String>::new()
            .with_prompt("✍️  Describe your situation or ask your question")
            .allow_empty(true)
            .interact_text()
        {
            Ok(value) => Ok(Some(value)),
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
            Err(err) => Err(TarotError::ValidationError {
                message: format!("Failed to read context: {}", err),
            }),
        }
    }

    pub fn prompt_another() -> Result<bool> {
        let answer = Confirm::new()
            .with_prompt("✨ Draw again?")
            .default(false)
            .interact_opt()
            .map_err(|err| TarotError::ValidationError {
                message: format!("Failed to read answer: {}", err),
            })?;
        Ok(answer.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    fn buffers() -> TerminalPresenter<Vec<u8>, Vec<u8>> {
        TerminalPresenter::new(Vec::new(), Vec::new())
    }

    fn streams(presenter: TerminalPresenter<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (out, err) = presenter.into_parts();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    /// Accepts writes but fails every flush.
    struct FlushFails(Vec<u8>);

    impl Write for FlushFails {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("broken pipe"))
        }
    }

    #[test]
    fn test_cards_fall_back_to_symbol_without_image() {
        let mut presenter = buffers();
        presenter.show_cards(&[
            CardView {
                name: "The Fool".to_string(),
                reversed: true,
                image: None,
            },
            CardView {
                name: "The Sun".to_string(),
                reversed: false,
                image: Some(PathBuf::from("images/The_Sun.jpg")),
            },
        ]);

        let (text, _) = streams(presenter);
        assert!(text.contains("🃏 Symbol: The Fool (R)"));
        assert!(text.contains("The Sun  [images/The_Sun.jpg]"));
        assert!(!text.contains("The Sun (R)"));
    }

    #[test]
    fn test_interpretation_and_farewell_written() {
        let mut presenter = buffers();
        presenter.show_interpretation("You stand at a crossroads.");
        presenter.farewell();

        let (text, errors) = streams(presenter);
        assert!(text.contains("📜 The Interpretation:\nYou stand at a crossroads."));
        assert!(text.contains(CLOSING_REMINDER));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_warnings_and_errors_go_to_error_writer() {
        let mut presenter = buffers();
        presenter.warn("Describe your situation first.");
        presenter.error(&TarotError::interpretation("model unavailable"));

        let (text, errors) = streams(presenter);
        assert!(text.is_empty());
        assert!(errors.contains("⚠️  Describe your situation first."));
        assert!(errors.contains("❌ An error occurred: The reading could not be interpreted: model unavailable"));
        assert!(errors.contains("💡 Suggestion: Check the model endpoint"));
    }

    #[test]
    fn test_failed_flush_does_not_stop_output() {
        let mut presenter = TerminalPresenter::new(FlushFails(Vec::new()), Vec::new());
        presenter.show_progress("🔮 Revealing the meanings...");
        presenter.show_interpretation("Patience.");

        let (out, _) = presenter.into_parts();
        let text = String::from_utf8(out.0).unwrap();
        assert!(text.contains("🔮 Revealing the meanings..."));
        assert!(text.contains("Patience."));
    }
}
