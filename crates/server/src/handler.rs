use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::debug;

use stashdb_common::{CommandError, StorageError};
use stashdb_protocol::{
    Command, GetListResponse, GetStringResponse, KeyQuery, PopResponse, PushQuery, SetListRequest,
    SetStringRequest, UpdateListRequest, UpdateStringRequest,
};
use stashdb_storage::{ListStore, StringStore};

use crate::error::ApiError;

/// Estado compartilhado entre os handlers: um handle para cada store.
#[derive(Clone)]
pub struct AppState {
    pub strings: StringStore,
    pub lists: ListStore<String>,
}

impl AppState {
    pub fn new(strings: StringStore, lists: ListStore<String>) -> Self {
        Self { strings, lists }
    }
}

/// Resultado de um comando bem-sucedido.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    NoContent,
    String(GetStringResponse),
    List(GetListResponse),
    Popped(PopResponse),
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::NoContent => StatusCode::NO_CONTENT.into_response(),
            Reply::String(body) => Json(body).into_response(),
            Reply::List(body) => Json(body).into_response(),
            Reply::Popped(body) => Json(body).into_response(),
        }
    }
}

/// Executa um comando contra os stores e monta a resposta.
pub fn execute_command(cmd: Command, state: &AppState) -> Result<Reply, StorageError> {
    let reply = match cmd {
        Command::GetString { key } => {
            let entry = state.strings.get(&key)?;
            let expires_at = entry.expires_at();
            Reply::String(GetStringResponse::new(entry.value, expires_at))
        }
        Command::SetString { key, value, ttl } => {
            state.strings.set(key, value, ttl)?;
            Reply::NoContent
        }
        Command::UpdateString { key, value } => {
            state.strings.update(&key, value)?;
            Reply::NoContent
        }
        Command::RemoveString { key } => {
            state.strings.remove(&key)?;
            Reply::NoContent
        }
        Command::GetList { key } => {
            let entry = state.lists.get(&key)?;
            let expires_at = entry.expires_at();
            Reply::List(GetListResponse::new(entry.value, expires_at))
        }
        Command::SetList { key, list, ttl } => {
            state.lists.set(key, list, ttl)?;
            Reply::NoContent
        }
        Command::UpdateList { key, list } => {
            state.lists.update(&key, list)?;
            Reply::NoContent
        }
        Command::RemoveList { key } => {
            state.lists.remove(&key)?;
            Reply::NoContent
        }
        Command::Push { key, value } => {
            state.lists.push(&key, value)?;
            Reply::NoContent
        }
        Command::Pop { key } => {
            let value = state.lists.pop(&key)?;
            Reply::Popped(PopResponse { value })
        }
    };
    Ok(reply)
}

fn run(state: &AppState, cmd: Command) -> Result<Reply, ApiError> {
    debug!("comando recebido: {cmd:?}");
    let name = cmd.name();
    execute_command(cmd, state).map_err(|e| {
        debug!("{name} falhou: {e}");
        ApiError::from(e)
    })
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, CommandError> {
    payload
        .map(|Json(t)| t)
        .map_err(|e| CommandError::InvalidBody(e.body_text()))
}

fn query<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, CommandError> {
    params
        .map(|Query(t)| t)
        .map_err(|e| CommandError::InvalidQuery(e.body_text()))
}

// --- Strings ---

pub async fn get_string(
    State(state): State<AppState>,
    params: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Reply, ApiError> {
    run(&state, Command::get_string(query(params)?)?)
}

pub async fn set_string(
    State(state): State<AppState>,
    payload: Result<Json<SetStringRequest>, JsonRejection>,
) -> Result<Reply, ApiError> {
    run(&state, Command::set_string(body(payload)?)?)
}

pub async fn update_string(
    State(state): State<AppState>,
    payload: Result<Json<UpdateStringRequest>, JsonRejection>,
) -> Result<Reply, ApiError> {
    run(&state, Command::update_string(body(payload)?)?)
}

pub async fn remove_string(
    State(state): State<AppState>,
    params: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Reply, ApiError> {
    run(&state, Command::remove_string(query(params)?)?)
}

// --- Lists ---

pub async fn get_list(
    State(state): State<AppState>,
    params: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Reply, ApiError> {
    run(&state, Command::get_list(query(params)?)?)
}

pub async fn set_list(
    State(state): State<AppState>,
    payload: Result<Json<SetListRequest>, JsonRejection>,
) -> Result<Reply, ApiError> {
    run(&state, Command::set_list(body(payload)?)?)
}

pub async fn update_list(
    State(state): State<AppState>,
    payload: Result<Json<UpdateListRequest>, JsonRejection>,
) -> Result<Reply, ApiError> {
    run(&state, Command::update_list(body(payload)?)?)
}

pub async fn remove_list(
    State(state): State<AppState>,
    params: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Reply, ApiError> {
    run(&state, Command::remove_list(query(params)?)?)
}

pub async fn push(
    State(state): State<AppState>,
    params: Result<Query<PushQuery>, QueryRejection>,
) -> Result<Reply, ApiError> {
    run(&state, Command::push(query(params)?)?)
}

pub async fn pop(
    State(state): State<AppState>,
    params: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Reply, ApiError> {
    run(&state, Command::pop(query(params)?)?)
}

/// Contagem de chaves por store. Inclui chaves expiradas ainda não acessadas.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "strings": state.strings.len(),
        "lists": state.lists.len(),
    }))
}
