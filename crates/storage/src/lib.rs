#![forbid(unsafe_code)]

mod entry;
mod keyspace;
mod list;
mod map;
mod string;

pub use entry::{Deadline, Entry};
pub use list::ListStore;
pub use string::StringStore;
