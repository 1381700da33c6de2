#[macro_use]
extern crate tracing;

mod client;
mod error;
pub mod observer;
mod schema;
mod source;
mod types;

pub use client::LocalApiClient;
pub use error::{
    ClientError,
    ConnectionError,
    MalformedMessageError,
};
pub use schema::CHAMP_SELECT_CONVERSATION;
pub use source::{
    ApiFuture,
    ChatApi,
    StatsSource,
};
pub use types::*;
