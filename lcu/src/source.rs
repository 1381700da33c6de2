use crate::{
    client::LocalApiClient,
    error::ClientError,
    types::{
        Conversation,
        HistoryRange,
        MatchHistory,
        Participant,
        RankedStats,
    },
};
use std::{
    future::Future,
    pin::Pin,
};

pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ClientError>> + Send + 'a>>;

/// Read access to the statistics the aggregation needs.
pub trait StatsSource: Send + Sync {
    /// Recent matches of one player.
    fn match_history<'a>(&'a self, puuid: &'a str, range: HistoryRange) -> ApiFuture<'a, MatchHistory>;

    /// Solo and flex queue ranks of one player.
    fn ranked_stats<'a>(&'a self, puuid: &'a str) -> ApiFuture<'a, RankedStats>;

    /// Members of the current champion select.
    fn champ_select_participants(&self) -> ApiFuture<'_, Vec<Participant>>;

    /// Region code of the logged in account.
    fn web_region(&self) -> ApiFuture<'_, String>;
}

/// The champion-select chat.
pub trait ChatApi: Send + Sync {
    fn champ_select_conversation(&self) -> ApiFuture<'_, Option<Conversation>>;

    fn post_message<'a>(&'a self, conversation_id: &'a str, body: &'a str) -> ApiFuture<'a, ()>;
}

impl StatsSource for LocalApiClient {
    fn match_history<'a>(&'a self, puuid: &'a str, range: HistoryRange) -> ApiFuture<'a, MatchHistory> {
        Box::pin(LocalApiClient::match_history(self, puuid, range))
    }

    fn ranked_stats<'a>(&'a self, puuid: &'a str) -> ApiFuture<'a, RankedStats> {
        Box::pin(LocalApiClient::ranked_stats(self, puuid))
    }

    fn champ_select_participants(&self) -> ApiFuture<'_, Vec<Participant>> {
        Box::pin(LocalApiClient::champ_select_participants(self))
    }

    fn web_region(&self) -> ApiFuture<'_, String> {
        Box::pin(LocalApiClient::web_region(self))
    }
}

impl ChatApi for LocalApiClient {
    fn champ_select_conversation(&self) -> ApiFuture<'_, Option<Conversation>> {
        Box::pin(LocalApiClient::champ_select_conversation(self))
    }

    fn post_message<'a>(&'a self, conversation_id: &'a str, body: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(LocalApiClient::post_chat_message(self, conversation_id, body))
    }
}
