use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tarot_reader::adapters::terminal::TerminalPresenter;
use tarot_reader::core::session::TriggerOutcome;
use tarot_reader::core::{DrawnCard, SpreadSize};
use tarot_reader::{
    format_prompt, load_reference_table, ChatCompletionClient, ImageLocator,
    InterpretationPipeline, ReadingSession, TarotError,
};
use tempfile::TempDir;

const DECK: &str = "carte;dritto;rovescio
The Fool;New beginnings;Recklessness
The Magician;Willpower;Manipulation
The Empress;Abundance;Dependence
The Hermit;Introspection;Isolation
The Tower;Upheaval;Avoided disaster
The Star;Hope;Despair
The Sun;Joy;Temporary sadness
";

fn write_deck(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("tarocchi.csv");
    std::fs::write(&path, DECK).unwrap();
    path
}

fn model_client(server: &MockServer) -> ChatCompletionClient {
    ChatCompletionClient::new(
        server.url("/v1/chat/completions"),
        "test-model",
        Some("sk-test".to_string()),
        0.7,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[test]
fn test_bundled_deck_loads() {
    let table = load_reference_table(concat!(env!("CARGO_MANIFEST_DIR"), "/data/tarocchi.csv"))
        .unwrap();

    assert_eq!(table.len(), 22);
    assert!(table.contains("The Fool"));
    assert!(table.contains("The World"));
    assert!(table.cards().iter().all(|c| !c.upright.is_empty() && !c.reversed.is_empty()));
}

#[test]
fn test_prompt_for_fixed_draw_contains_only_drawn_meanings() {
    let temp_dir = TempDir::new().unwrap();
    let table = load_reference_table(write_deck(&temp_dir)).unwrap();

    let drawn = vec![
        DrawnCard { name: "The Fool".to_string(), reversed: false },
        DrawnCard { name: "The Tower".to_string(), reversed: true },
        DrawnCard { name: "The Sun".to_string(), reversed: false },
    ];
    let prompt = format_prompt(&drawn, &table, "career change").unwrap();

    assert!(prompt.contains("New beginnings"));
    assert!(prompt.contains("Avoided disaster"));
    assert!(prompt.contains("Joy"));
    assert!(prompt.contains("career change"));
    for absent in ["Recklessness", "Upheaval", "Temporary sadness", "Willpower", "Hope", "Isolation"] {
        assert!(!prompt.contains(absent), "unexpected meaning '{}'", absent);
    }
}

#[tokio::test]
async fn test_end_to_end_reading() {
    let temp_dir = TempDir::new().unwrap();
    let table = Arc::new(load_reference_table(write_deck(&temp_dir)).unwrap());

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("career change");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "You are ready to change course."}}]
            }));
    });

    let pipeline = InterpretationPipeline::new(table.clone(), model_client(&server));
    let mut session = ReadingSession::new(pipeline, ImageLocator::new(temp_dir.path()), Some(42));
    let mut presenter = TerminalPresenter::new(Vec::new(), Vec::new());

    let outcome = session
        .trigger(SpreadSize::Three, "career change", &mut presenter)
        .await;

    api_mock.assert();
    let drawn = match outcome {
        TriggerOutcome::Completed { drawn, interpretation } => {
            assert_eq!(interpretation, "You are ready to change course.");
            drawn
        }
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(drawn.len(), 3);
    assert!(drawn.iter().all(|card| table.contains(&card.name)));

    let (output, _) = presenter.into_parts();
    let output = String::from_utf8(output).unwrap();
    for card in &drawn {
        assert!(output.contains(&card.name));
    }
    assert!(output.contains("You are ready to change course."));
}

#[tokio::test]
async fn test_same_seed_draws_same_cards() {
    let temp_dir = TempDir::new().unwrap();
    let table = Arc::new(load_reference_table(write_deck(&temp_dir)).unwrap());

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"choices": [{"message": {"content": "ok"}}]}));
    });

    let mut draws = Vec::new();
    for _ in 0..2 {
        let pipeline = InterpretationPipeline::new(table.clone(), model_client(&server));
        let mut session = ReadingSession::new(pipeline, ImageLocator::new(temp_dir.path()), Some(7));
        let mut presenter = TerminalPresenter::new(Vec::new(), Vec::new());
        match session.trigger(SpreadSize::Seven, "family", &mut presenter).await {
            TriggerOutcome::Completed { drawn, .. } => draws.push(drawn),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    assert_eq!(draws[0], draws[1]);
}

#[tokio::test]
async fn test_model_failure_shows_no_interpretation() {
    let temp_dir = TempDir::new().unwrap();
    let table = Arc::new(load_reference_table(write_deck(&temp_dir)).unwrap());

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(503).body("overloaded");
    });

    let pipeline = InterpretationPipeline::new(table, model_client(&server));
    let mut session = ReadingSession::new(pipeline, ImageLocator::new(temp_dir.path()), None);
    let mut presenter = TerminalPresenter::new(Vec::new(), Vec::new());

    let outcome = session.trigger(SpreadSize::Five, "health", &mut presenter).await;

    api_mock.assert();
    assert_eq!(outcome, TriggerOutcome::Failed);
    let (output, errors) = presenter.into_parts();
    let output = String::from_utf8(output).unwrap();
    let errors = String::from_utf8(errors).unwrap();
    assert!(output.contains("The Cards Revealed"));
    assert!(!output.contains("📜 The Interpretation:"));
    assert!(errors.contains("❌ An error occurred: The reading could not be interpreted"));
    assert!(errors.contains("💡 Suggestion:"));
}

#[tokio::test]
async fn test_empty_context_makes_no_request() {
    let temp_dir = TempDir::new().unwrap();
    let table = Arc::new(load_reference_table(write_deck(&temp_dir)).unwrap());

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200);
    });

    let pipeline = InterpretationPipeline::new(table, model_client(&server));
    let mut session = ReadingSession::new(pipeline, ImageLocator::new(temp_dir.path()), None);
    let mut presenter = TerminalPresenter::new(Vec::new(), Vec::new());

    let outcome = session.trigger(SpreadSize::Three, "", &mut presenter).await;

    assert_eq!(outcome, TriggerOutcome::Warned);
    api_mock.assert_hits(0);
    let (output, errors) = presenter.into_parts();
    assert!(!String::from_utf8(output).unwrap().contains("The Cards Revealed"));
    assert!(String::from_utf8(errors)
        .unwrap()
        .contains(tarot_reader::core::session::EMPTY_CONTEXT_WARNING));
}

#[test]
fn test_schema_error_for_wrong_headers() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.csv");
    std::fs::write(&path, "name;upright;reversed\nThe Fool;a;b\n").unwrap();

    let err = load_reference_table(&path).unwrap_err();
    match err {
        TarotError::SchemaError { missing, found } => {
            assert_eq!(missing.len(), 3);
            assert_eq!(found, vec!["name", "upright", "reversed"]);
        }
        other => panic!("expected SchemaError, got {:?}", other),
    }
}
