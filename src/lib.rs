// src/lib.rs — Library root for projectchat

pub mod api;
pub mod chat;
pub mod infra;
pub mod provider;
pub mod schema;
pub mod store;
pub mod util;
