use hugo::catalog::SchemaCatalog;
use hugo::error::HugoError;
use hugo::gateway::interpret_query_response;
use hugo::resolver::{build_prompt, parse_candidates, RelevanceCandidate};
use hugo::session::{ChatMessage, ChatSession};
use hugo::uploader::{UploadBatch, Uploader};

#[test]
fn resolver_output_is_subset_of_catalog() {
    let catalog = SchemaCatalog::procurement();
    // A messy but parseable model response mixing real and invented names.
    let raw = r#"```json
[
  {"table_name": "material_orders", "reason": "Tracks purchase orders."},
  {"table_name": "purchase_history", "reason": "Invented by the model."},
  {"table_name": "suppliers", "reason": "Holds lead times and pricing."}
]
```"#;
    let candidates = parse_candidates(raw, &catalog).unwrap();
    assert_eq!(candidates.len(), 2);
    for c in &candidates {
        assert!(catalog.contains(&c.table_name));
    }
}

#[test]
fn candidate_list_round_trips_through_json() {
    let original = vec![
        RelevanceCandidate {
            table_name: "stock_levels".to_string(),
            reason: "Current quantities per warehouse.".to_string(),
        },
        RelevanceCandidate {
            table_name: "dispatch_parameters".to_string(),
            reason: "Minimum stock thresholds.".to_string(),
        },
    ];
    let json = serde_json::to_string(&original).unwrap();
    let parsed: Vec<RelevanceCandidate> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn chat_turn_shape_survives_a_session() {
    let mut session = ChatSession::default();
    session.append(ChatMessage::user("Which parts are low in stock?"));
    session.append(ChatMessage::assistant("3 parts are below minimum stock."));

    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "Which parts are low in stock?");
    assert_eq!(history[1].content, "3 parts are below minimum stock.");

    session.reset();
    assert!(session.history().is_empty());
}

#[test]
fn backend_failure_text_reaches_the_user_unchanged() {
    let err = interpret_query_response(
        reqwest::StatusCode::BAD_GATEWAY,
        "upstream database unreachable",
    )
    .unwrap_err();
    match err {
        HugoError::Gateway(msg) => assert_eq!(msg, "upstream database unreachable"),
        other => panic!("expected Gateway error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_upload_batch_sends_nothing() {
    // The base URL is unroutable, so Ok can only mean no request went out.
    let uploader = Uploader::new("http://127.0.0.1:0".to_string());
    assert!(uploader.upload(UploadBatch::new()).await.is_ok());
}

#[test]
fn prompt_mentions_stock_tables_for_stock_questions() {
    let catalog = SchemaCatalog::procurement();
    let prompt = build_prompt(&catalog, "which parts are low in stock?");
    // The schema block always carries both stock tables, so the model has
    // what it needs to surface them.
    assert!(prompt.contains("stock_levels"));
    assert!(prompt.contains("stock_movements"));
    assert!(prompt.contains("which parts are low in stock?"));
}
