//! Autenticação por bearer token aplicada a todas as rotas de dados.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;
use tracing::warn;

use stashdb_common::AuthError;

use crate::error::ApiError;

#[derive(Clone)]
pub(crate) struct BearerAuth {
    api_key: Option<Arc<str>>,
}

impl BearerAuth {
    pub(crate) fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.map(Arc::from),
        }
    }

    fn check(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let header = headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        let token = match header.split_once(' ') {
            Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => token,
            _ => return Err(AuthError::InvalidToken),
        };

        // Sem chave configurada nenhum token é válido
        let Some(expected) = &self.api_key else {
            return Err(AuthError::InvalidToken);
        };
        if constant_time_eq(token, expected) {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

/// O tamanho da chave não é segredo; só o conteúdo é comparado em tempo constante.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}

pub(crate) async fn require_bearer(
    State(auth): State<BearerAuth>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(e) = auth.check(req.headers()) {
        warn!("requisição não autorizada em {}: {e}", req.uri().path());
        return Err(e.into());
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn no_api_key_rejects_all() {
        let auth = BearerAuth::new(None);
        assert_eq!(auth.check(&HeaderMap::new()), Err(AuthError::MissingToken));
        assert_eq!(auth.check(&headers("Bearer anything")), Err(AuthError::InvalidToken));
    }

    #[test]
    fn valid_bearer_token() {
        let auth = BearerAuth::new(Some("secret".into()));
        assert!(auth.check(&headers("Bearer secret")).is_ok());
    }

    #[test]
    fn missing_header() {
        let auth = BearerAuth::new(Some("secret".into()));
        assert_eq!(auth.check(&HeaderMap::new()), Err(AuthError::MissingToken));
    }

    #[test]
    fn wrong_token_or_scheme() {
        let auth = BearerAuth::new(Some("secret".into()));
        assert_eq!(auth.check(&headers("Bearer wrong")), Err(AuthError::InvalidToken));
        assert_eq!(auth.check(&headers("Basic secret")), Err(AuthError::InvalidToken));
        assert_eq!(auth.check(&headers("Bearer")), Err(AuthError::InvalidToken));
        assert_eq!(auth.check(&headers("Bearer secret extra")), Err(AuthError::InvalidToken));
    }

    #[test]
    fn constant_time_compare() {
        assert!(constant_time_eq("secret123", "secret123"));
        assert!(!constant_time_eq("secret123", "secret124"));
        assert!(!constant_time_eq("short", "muchlonger"));
    }
}
