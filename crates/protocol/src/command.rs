use std::time::Duration;

use stashdb_common::CommandError;

use crate::message::{
    KeyQuery, PushQuery, SetListRequest, SetStringRequest, UpdateListRequest, UpdateStringRequest,
};

/// Enum com todas as operações suportadas, já validadas.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    GetString {
        key: String,
    },
    SetString {
        key: String,
        value: String,
        ttl: Duration,
    },
    UpdateString {
        key: String,
        value: String,
    },
    RemoveString {
        key: String,
    },
    GetList {
        key: String,
    },
    SetList {
        key: String,
        list: Vec<String>,
        ttl: Duration,
    },
    UpdateList {
        key: String,
        list: Vec<String>,
    },
    RemoveList {
        key: String,
    },
    Push {
        key: String,
        value: String,
    },
    Pop {
        key: String,
    },
}

impl Command {
    pub fn get_string(query: KeyQuery) -> Result<Command, CommandError> {
        Ok(Command::GetString {
            key: non_empty_key(query.key)?,
        })
    }

    pub fn set_string(req: SetStringRequest) -> Result<Command, CommandError> {
        Ok(Command::SetString {
            key: non_empty_key(req.key)?,
            value: non_empty_value(req.value)?,
            ttl: ttl_from_secs(req.ttl.unwrap_or(0)),
        })
    }

    pub fn update_string(req: UpdateStringRequest) -> Result<Command, CommandError> {
        Ok(Command::UpdateString {
            key: non_empty_key(req.key)?,
            value: non_empty_value(req.value)?,
        })
    }

    pub fn remove_string(query: KeyQuery) -> Result<Command, CommandError> {
        Ok(Command::RemoveString {
            key: non_empty_key(query.key)?,
        })
    }

    pub fn get_list(query: KeyQuery) -> Result<Command, CommandError> {
        Ok(Command::GetList {
            key: non_empty_key(query.key)?,
        })
    }

    /// Lista vazia é válida: POP sobre ela retorna erro de lista vazia.
    pub fn set_list(req: SetListRequest) -> Result<Command, CommandError> {
        Ok(Command::SetList {
            key: non_empty_key(req.key)?,
            list: req.list,
            ttl: ttl_from_secs(req.ttl.unwrap_or(0)),
        })
    }

    pub fn update_list(req: UpdateListRequest) -> Result<Command, CommandError> {
        Ok(Command::UpdateList {
            key: non_empty_key(req.key)?,
            list: req.list,
        })
    }

    pub fn remove_list(query: KeyQuery) -> Result<Command, CommandError> {
        Ok(Command::RemoveList {
            key: non_empty_key(query.key)?,
        })
    }

    pub fn push(query: PushQuery) -> Result<Command, CommandError> {
        Ok(Command::Push {
            key: non_empty_key(query.key)?,
            value: non_empty_value(query.value)?,
        })
    }

    pub fn pop(query: KeyQuery) -> Result<Command, CommandError> {
        Ok(Command::Pop {
            key: non_empty_key(query.key)?,
        })
    }

    /// Nome curto usado nos logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetString { .. } => "GET",
            Command::SetString { .. } => "SET",
            Command::UpdateString { .. } => "UPDATE",
            Command::RemoveString { .. } => "REMOVE",
            Command::GetList { .. } => "LGET",
            Command::SetList { .. } => "LSET",
            Command::UpdateList { .. } => "LUPDATE",
            Command::RemoveList { .. } => "LREMOVE",
            Command::Push { .. } => "PUSH",
            Command::Pop { .. } => "POP",
        }
    }
}

/// Converte TTL em segundos; valores não-positivos significam sem expiração.
pub fn ttl_from_secs(secs: i64) -> Duration {
    u64::try_from(secs)
        .map(Duration::from_secs)
        .unwrap_or(Duration::ZERO)
}

fn non_empty_key(key: String) -> Result<String, CommandError> {
    if key.is_empty() {
        return Err(CommandError::EmptyKey);
    }
    Ok(key)
}

fn non_empty_value(value: String) -> Result<String, CommandError> {
    if value.is_empty() {
        return Err(CommandError::EmptyValue);
    }
    Ok(value)
}
