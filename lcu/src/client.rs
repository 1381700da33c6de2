use crate::{
    error::ClientError,
    schema::{
        find_champ_select_conversation,
        ChatMessageRequest,
        ChatParticipantsResponse,
        MatchHistoryResponse,
        RankedStatsResponse,
        RegionLocaleResponse,
    },
    types::{
        Conversation,
        HistoryRange,
        MatchHistory,
        Participant,
        RankedStats,
    },
};
use reqwest::{
    header::{
        HeaderMap,
        HeaderValue,
        ACCEPT,
        CONTENT_TYPE,
    },
    Method,
    Response,
};
use serde::{
    de::DeserializeOwned,
    Serialize,
};
use url::Url;

const CHAT_MESSAGE_KIND: &str = "celebration";

/// Request/response wrapper around the local client API.
///
/// Every failure (transport, non-success status, unexpected body) comes back as a
/// [`ClientError`] value. Callers decide whether an absent answer matters.
#[derive(Debug, Clone)]
pub struct LocalApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LocalApiClient {
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|source| ClientError::Transport {
                path: base_url.to_string(),
                source,
            })?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let url = self.base_url.join(path).map_err(|source| ClientError::InvalidPath {
            path: path.to_string(),
            source,
        })?;
        trace!(%method, %url, "sending request");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ClientError::Transport {
            path: path.to_string(),
            source,
        })?;

        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| ClientError::Transport {
            path: path.to_string(),
            source,
        })?;
        // Some endpoints acknowledge with an empty body.
        let bytes: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };

        serde_json::from_slice(bytes).map_err(|err| ClientError::schema(path, err))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn match_history(&self, puuid: &str, range: HistoryRange) -> Result<MatchHistory, ClientError> {
        let path = format!(
            "/lol-match-history/v1/products/lol/{puuid}/matches?begIndex={}&endIndex={}",
            range.begin, range.end
        );
        let response: MatchHistoryResponse = self.get(&path).await?;
        MatchHistory::try_from(response).map_err(|message| ClientError::schema(&path, message))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn ranked_stats(&self, puuid: &str) -> Result<RankedStats, ClientError> {
        let response: RankedStatsResponse = self.get(&format!("/lol-ranked/v1/ranked-stats/{puuid}")).await?;
        Ok(response.into())
    }

    pub async fn champ_select_participants(&self) -> Result<Vec<Participant>, ClientError> {
        let response: ChatParticipantsResponse = self.get("/riotclient/chat/v5/participants").await?;
        Ok(response.into_champ_select())
    }

    pub async fn champ_select_conversation(&self) -> Result<Option<Conversation>, ClientError> {
        let conversations: Vec<Conversation> = self.get("/lol-chat/v1/conversations").await?;
        Ok(find_champ_select_conversation(conversations))
    }

    pub async fn post_chat_message(&self, conversation_id: &str, body: &str) -> Result<(), ClientError> {
        let message = ChatMessageRequest {
            body,
            kind: CHAT_MESSAGE_KIND,
        };
        let _: serde_json::Value = self
            .post(&format!("/lol-chat/v1/conversations/{conversation_id}/messages"), &message)
            .await?;
        Ok(())
    }

    /// Region code used by third party sites, e.g. `euw`.
    pub async fn web_region(&self) -> Result<String, ClientError> {
        let response: RegionLocaleResponse = self.get("/riotclient/region-locale").await?;
        Ok(response.web_region)
    }
}
