/// Erros do engine de armazenamento.
///
/// Todos são resultados esperados de operações normais; nenhum indica
/// estado corrompido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("chave já existe")]
    AlreadyExists,
    #[error("chave não encontrada")]
    NotFound,
    #[error("chave expirada")]
    Expired,
    #[error("lista vazia")]
    EmptyList,
}

/// Erros de validação de requisições.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("chave não pode ser vazia")]
    EmptyKey,
    #[error("valor não pode ser vazio")]
    EmptyValue,
    #[error("corpo da requisição inválido: {0}")]
    InvalidBody(String),
    #[error("query string inválida: {0}")]
    InvalidQuery(String),
}

/// Erros de autenticação por bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("token ausente")]
    MissingToken,
    #[error("token inválido")]
    InvalidToken,
}

/// Erro top-level do StashDB.
#[derive(Debug, thiserror::Error)]
pub enum StashError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}
