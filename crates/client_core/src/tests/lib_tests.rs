use super::*;
use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::AnimationTag;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    seen: Arc<Mutex<Vec<String>>>,
}

impl ServerState {
    async fn record(&self, line: String) {
        self.seen.lock().await.push(line);
    }
}

async fn handle_react(
    State(state): State<ServerState>,
    Json(body): Json<ReactRequest>,
) -> (StatusCode, Json<Value>) {
    state.record(format!("react {}", body.compounds.join(","))).await;
    let mut sorted = body.compounds.clone();
    sorted.sort();
    if sorted == ["HCl", "NaOH"] {
        (
            StatusCode::OK,
            Json(json!({
                "equation": "HCl + NaOH → NaCl + H2O",
                "description": "Neutralization",
                "animation": "neutralization",
                "products": [
                    {"name": "Sodium Chloride", "formula": "NaCl", "color": "white"},
                    {"name": "Water", "formula": "H2O", "color": "colorless"}
                ]
            })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "No reaction found for selected compounds."})),
        )
    }
}

async fn handle_autocomplete_compounds(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let prefix = query.get("prefix").cloned().unwrap_or_default();
    state.record(format!("compounds {prefix}")).await;
    Json(json!({"results": ["NaCl", "NaOH"]}))
}

async fn handle_autocomplete_elements(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let prefix = query.get("prefix").cloned().unwrap_or_default();
    state.record(format!("elements {prefix}")).await;
    Json(json!({"results": ["Na"]}))
}

async fn handle_web_search(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let query = query.get("query").cloned().unwrap_or_default();
    state.record(format!("web {query}")).await;
    if query == "unobtainium" {
        Json(json!({}))
    } else {
        Json(json!({"result": format!("about {query}")}))
    }
}

async fn handle_reaction_chain(Json(body): Json<ReactionChainRequest>) -> (StatusCode, Json<Value>) {
    if body.start == "HCl" && body.end == "NaCl" {
        (StatusCode::OK, Json(json!({"chain": ["HCl", "NaCl"]})))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "No reaction chain found."})),
        )
    }
}

async fn spawn_chem_server() -> anyhow::Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let app = Router::new()
        .route("/react", post(handle_react))
        .route("/autocomplete_compounds", get(handle_autocomplete_compounds))
        .route("/autocomplete_elements", get(handle_autocomplete_elements))
        .route("/web_search", get(handle_web_search))
        .route("/reaction_chain", post(handle_reaction_chain))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

#[tokio::test]
async fn react_posts_formulas_and_decodes_success() {
    let (server_url, state) = spawn_chem_server().await.expect("spawn server");
    let backend = HttpBackend::new(&server_url).expect("backend");

    let result = backend
        .react(&["HCl".to_string(), "NaOH".to_string()])
        .await
        .expect("reaction");

    assert_eq!(result.animation_tag, AnimationTag::Neutralization);
    let formulas: Vec<_> = result.products.iter().map(|p| p.formula.as_str()).collect();
    assert_eq!(formulas, ["NaCl", "H2O"]);
    assert_eq!(state.seen.lock().await.as_slice(), ["react HCl,NaOH"]);
}

#[tokio::test]
async fn react_surfaces_error_body_verbatim_despite_status() {
    let (server_url, _state) = spawn_chem_server().await.expect("spawn server");
    let backend = HttpBackend::new(&server_url).expect("backend");

    let err = backend
        .react(&["KI".to_string(), "Zn".to_string()])
        .await
        .expect_err("no reaction");

    assert_eq!(
        err,
        ServiceError::Rejected("No reaction found for selected compounds.".to_string())
    );
}

#[tokio::test]
async fn autocomplete_both_settles_both_lookups_with_encoded_prefix() {
    let (server_url, state) = spawn_chem_server().await.expect("spawn server");
    let backend = HttpBackend::new(&format!("{server_url}/")).expect("backend");

    let (compounds, elements) = autocomplete_both(&backend, "Na Cl&").await;

    assert_eq!(compounds.expect("compounds"), ["NaCl", "NaOH"]);
    assert_eq!(elements.expect("elements"), ["Na"]);
    let mut seen = state.seen.lock().await.clone();
    seen.sort();
    assert_eq!(seen, ["compounds Na Cl&", "elements Na Cl&"]);
}

#[tokio::test]
async fn web_search_maps_missing_result_to_none() {
    let (server_url, _state) = spawn_chem_server().await.expect("spawn server");
    let backend = HttpBackend::new(&server_url).expect("backend");

    assert_eq!(
        backend.web_search("H2SO4").await.expect("search"),
        Some("about H2SO4".to_string())
    );
    assert_eq!(backend.web_search("unobtainium").await.expect("search"), None);
}

#[tokio::test]
async fn reaction_chain_decodes_chain_and_rejection() {
    let (server_url, _state) = spawn_chem_server().await.expect("spawn server");
    let backend = HttpBackend::new(&server_url).expect("backend");

    assert_eq!(
        backend.reaction_chain("HCl", "NaCl").await.expect("chain"),
        ["HCl", "NaCl"]
    );
    assert!(backend
        .reaction_chain("Zn", "Au")
        .await
        .expect_err("no chain")
        .is_rejection());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let backend = HttpBackend::with_timeout(&format!("http://{addr}"), Duration::from_secs(2))
        .expect("backend");

    let err = backend
        .autocomplete_elements("Na")
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, ServiceError::Transport(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn missing_backend_reports_unavailable() {
    let err = MissingBackend
        .web_search("NaCl")
        .await
        .expect_err("no backend");
    assert!(matches!(err, ServiceError::Unavailable(_)));
    assert!(!UnsupportedSpeech.is_supported());
}

#[test]
fn rejects_unparseable_base_url() {
    let err = HttpBackend::new("not a url").err().expect("invalid url");
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}
