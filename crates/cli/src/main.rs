use clap::{Args, Parser, Subcommand};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use stashdb_common::{DEFAULT_HOST, DEFAULT_PORT};
use stashdb_protocol::{
    ErrorResponse, SetListRequest, SetStringRequest, UpdateListRequest, UpdateStringRequest,
};

#[derive(Parser, Debug)]
#[command(name = "stashdb-cli", about = "StashDB CLI client")]
struct Cli {
    /// Endereço base do servidor
    #[arg(long, default_value_t = format!("http://{DEFAULT_HOST}:{DEFAULT_PORT}"))]
    url: String,
    /// Bearer token enviado em todas as requisições
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    store: Store,
}

#[derive(Subcommand, Debug)]
enum Store {
    /// Operações no store de strings
    Strings {
        #[command(subcommand)]
        op: StringOp,
    },
    /// Operações no store de listas
    Lists {
        #[command(subcommand)]
        op: ListOp,
    },
    /// Contagem de chaves do servidor
    Health,
}

#[derive(Args, Debug)]
struct Ttl {
    /// Segundos até expirar; zero ou negativo não expira
    #[arg(long, allow_negative_numbers = true)]
    ttl: Option<i64>,
}

#[derive(Subcommand, Debug)]
enum StringOp {
    Get { key: String },
    Set {
        key: String,
        value: String,
        #[command(flatten)]
        ttl: Ttl,
    },
    Update { key: String, value: String },
    Delete { key: String },
}

#[derive(Subcommand, Debug)]
enum ListOp {
    Get { key: String },
    Set {
        key: String,
        items: Vec<String>,
        #[command(flatten)]
        ttl: Ttl,
    },
    Update { key: String, items: Vec<String> },
    Delete { key: String },
    /// Adiciona ao final da lista
    Push { key: String, value: String },
    /// Remove do início da lista
    Pop { key: String },
}

/// Requisição HTTP montada a partir da linha de comando.
#[derive(Debug, PartialEq)]
struct ApiRequest {
    method: Method,
    path: &'static str,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    fn query(mut self, name: &'static str, value: String) -> Self {
        self.query.push((name, value));
        self
    }

    fn json(mut self, body: impl serde::Serialize) -> anyhow::Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

impl Store {
    fn into_request(self) -> anyhow::Result<ApiRequest> {
        const STRINGS: &str = "/strings";
        const LISTS: &str = "/lists/strings";

        let request = match self {
            Store::Strings { op } => match op {
                StringOp::Get { key } => ApiRequest::new(Method::GET, STRINGS).query("key", key),
                StringOp::Set { key, value, ttl } => {
                    ApiRequest::new(Method::POST, STRINGS).json(SetStringRequest {
                        key,
                        value,
                        ttl: ttl.ttl,
                    })?
                }
                StringOp::Update { key, value } => {
                    ApiRequest::new(Method::PUT, STRINGS).json(UpdateStringRequest { key, value })?
                }
                StringOp::Delete { key } => {
                    ApiRequest::new(Method::DELETE, STRINGS).query("key", key)
                }
            },
            Store::Lists { op } => match op {
                ListOp::Get { key } => ApiRequest::new(Method::GET, LISTS).query("key", key),
                ListOp::Set { key, items, ttl } => {
                    ApiRequest::new(Method::POST, LISTS).json(SetListRequest {
                        key,
                        list: items,
                        ttl: ttl.ttl,
                    })?
                }
                ListOp::Update { key, items } => {
                    ApiRequest::new(Method::PUT, LISTS).json(UpdateListRequest { key, list: items })?
                }
                ListOp::Delete { key } => ApiRequest::new(Method::DELETE, LISTS).query("key", key),
                ListOp::Push { key, value } => ApiRequest::new(Method::POST, "/lists/strings/push")
                    .query("key", key)
                    .query("value", value),
                ListOp::Pop { key } => {
                    ApiRequest::new(Method::POST, "/lists/strings/pop").query("key", key)
                }
            },
            Store::Health => ApiRequest::new(Method::GET, "/health"),
        };
        Ok(request)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let token = cli.token.filter(|t| !t.is_empty());
    let request = cli.store.into_request()?;

    let url = format!("{}{}", cli.url.trim_end_matches('/'), request.path);
    let mut builder = Client::new()
        .request(request.method, url)
        .query(&request.query);
    if let Some(token) = &token {
        builder = builder.bearer_auth(token);
    }
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }

    let response = builder.send().await?;
    let status = response.status();
    let text = response.text().await?;

    match format_response(status, &text) {
        Ok(output) => println!("{output}"),
        Err(message) => {
            eprintln!("(error) {message}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Corpo JSON formatado, ou o status quando não há corpo. Status não-2xx
/// viram `Err` com a mensagem do servidor.
fn format_response(status: StatusCode, body: &str) -> Result<String, String> {
    if !status.is_success() {
        return Err(match serde_json::from_str::<ErrorResponse>(body) {
            Ok(err) => err.error,
            Err(_) => format!("HTTP {status}"),
        });
    }

    if status == StatusCode::NO_CONTENT || body.is_empty() {
        return Ok(status.to_string());
    }

    Ok(match serde_json::from_str::<Value>(body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    })
}
