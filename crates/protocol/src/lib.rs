#![forbid(unsafe_code)]

mod command;
mod message;

pub use command::{Command, ttl_from_secs};
pub use message::{
    ErrorResponse, GetListResponse, GetStringResponse, KeyQuery, PopResponse, PushQuery,
    SetListRequest, SetStringRequest, UpdateListRequest, UpdateStringRequest, format_expiry,
};
