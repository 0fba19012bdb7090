use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tarot_reader::adapters::terminal::{input, TerminalPresenter};
use tarot_reader::core::session::TriggerOutcome;
use tarot_reader::core::ConfigProvider;
use tarot_reader::utils::error::ErrorSeverity;
use tarot_reader::utils::{logger, validation::Validate};
use tarot_reader::{
    load_reference_table, ChatCompletionClient, CliConfig, ImageLocator, InterpretationPipeline,
    ReadingSession, TarotError, TomlConfig,
};

fn exit_code(e: &TarotError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn startup_failure(stage: &str, e: TarotError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e).max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config: TomlConfig = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            startup_failure("Loading configuration", e);
        }
    };

    logger::init_with_level(cli.verbose, config.log_level());
    tracing::info!("Starting tarot-reader");
    tracing::debug!(
        "Resolved config: deck={}, images={}, endpoint={}, model={}",
        config.deck_path(),
        config.images_dir(),
        config.llm_endpoint(),
        config.model()
    );

    if let Err(e) = config.validate() {
        startup_failure("Configuration validation", e);
    }

    let table = match load_reference_table(config.deck_path()) {
        Ok(table) => Arc::new(table),
        Err(e) => startup_failure("Loading the reference table", e),
    };

    let client = match ChatCompletionClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => startup_failure("Creating the model client", e),
    };

    let pipeline = InterpretationPipeline::new(table, client);
    let mut session = ReadingSession::new(
        pipeline,
        ImageLocator::new(config.images_dir()),
        config.seed(),
    );
    let mut presenter = TerminalPresenter::stdout();

    presenter.banner();

    if let Some((spread, context)) = cli.one_shot() {
        let outcome = session.trigger(spread, context, &mut presenter).await;
        presenter.farewell();
        if outcome == TriggerOutcome::Failed {
            std::process::exit(2);
        }
        return Ok(());
    }

    loop {
        let Some(spread) = input::prompt_spread().context("reading the spread size")? else {
            break;
        };
        let Some(context) = input::prompt_context().context("reading the context")? else {
            break;
        };

        session.trigger(spread, &context, &mut presenter).await;

        if !input::prompt_another().context("reading the answer")? {
            break;
        }
    }

    presenter.farewell();
    Ok(())
}
