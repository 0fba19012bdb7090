use crate::config::TomlConfig;
use crate::domain::model::SpreadSize;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "tarot-reader")]
#[command(about = "Draw tarot cards and get an interpretation from a language model")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Reference table (`;`-separated, columns carte;dritto;rovescio)
    #[arg(long)]
    pub deck: Option<String>,

    /// Directory holding card images named like The_Fool.jpg
    #[arg(long)]
    pub images: Option<String>,

    /// Chat-completions endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub temperature: Option<f32>,

    /// Fixed RNG seed for reproducible draws
    #[arg(long)]
    pub seed: Option<u64>,

    /// Spread size (3, 5 or 7). With --context, runs a single reading and exits.
    #[arg(long)]
    pub cards: Option<SpreadSize>,

    /// Situation or question for a single reading
    #[arg(long)]
    pub context: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Command-line values take precedence over the file.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(deck) = &self.deck {
            config.deck.path = Some(deck.clone());
        }
        if let Some(images) = &self.images {
            config.deck.images_dir = Some(images.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.llm.endpoint = Some(endpoint.clone());
        }
        if let Some(model) = &self.model {
            config.llm.model = Some(model.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            config.llm.timeout_seconds = Some(timeout);
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = Some(temperature);
        }
        if let Some(seed) = self.seed {
            config.session.seed = Some(seed);
        }
    }

    /// Loads the file named by `--config` (or defaults) and applies the flags.
    pub fn resolve(&self) -> crate::utils::error::Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// One-shot mode when both the spread and the context come from flags.
    pub fn one_shot(&self) -> Option<(SpreadSize, &str)> {
        match (self.cards, self.context.as_deref()) {
            (Some(cards), Some(context)) => Some((cards, context)),
            _ => None,
        }
    }
}
