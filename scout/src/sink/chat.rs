use super::SinkError;
use champ_reveal_lcu::ChatApi;

/// Posts summary lines into the champion-select chat.
#[derive(Debug, Clone)]
pub struct ChatSink<C> {
    api: C,
}

impl<C: ChatApi> ChatSink<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    /// Posts `lines` in order and returns how many were delivered. A failed post is
    /// logged and does not stop the remaining lines.
    #[instrument(level = "debug", skip_all, fields(lines = lines.len()))]
    pub async fn post_lines(&self, lines: &[String]) -> Result<usize, SinkError> {
        let conversation = self
            .api
            .champ_select_conversation()
            .await
            .map_err(SinkError::Conversation)?
            .ok_or(SinkError::NoConversation)?;

        let mut delivered = 0;
        for line in lines {
            match self.api.post_message(&conversation.id, line).await {
                Ok(()) => delivered += 1,
                Err(err) => warn!(conversation = %conversation.id, "Failed to post chat line: {err}"),
            }
        }
        debug!(delivered, "Posted roster to chat");
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use champ_reveal_lcu::{
        ApiFuture,
        ClientError,
        Conversation,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeChat {
        conversation: Option<Conversation>,
        rejected: Option<&'static str>,
        posted: Mutex<Vec<(String, String)>>,
    }

    impl FakeChat {
        fn open() -> Self {
            Self {
                conversation: Some(Conversation {
                    id: "cs1".to_string(),
                    kind: "championSelect".to_string(),
                }),
                ..Default::default()
            }
        }
    }

    impl ChatApi for FakeChat {
        fn champ_select_conversation(&self) -> ApiFuture<'_, Option<Conversation>> {
            Box::pin(async move { Ok(self.conversation.clone()) })
        }

        fn post_message<'a>(&'a self, conversation_id: &'a str, body: &'a str) -> ApiFuture<'a, ()> {
            Box::pin(async move {
                if self.rejected == Some(body) {
                    return Err(ClientError::Status {
                        path: format!("/lol-chat/v1/conversations/{conversation_id}/messages"),
                        status: 500,
                    });
                }
                self.posted
                    .lock()
                    .unwrap()
                    .push((conversation_id.to_string(), body.to_string()));
                Ok(())
            })
        }
    }

    fn lines() -> Vec<String> {
        ["one", "two", "three"].map(String::from).to_vec()
    }

    #[tokio::test]
    async fn posts_every_line_in_order() {
        let sink = ChatSink::new(FakeChat::open());

        assert_eq!(sink.post_lines(&lines()).await.unwrap(), 3);
        let posted = sink.api.posted.lock().unwrap().clone();
        assert_eq!(
            posted,
            vec![
                ("cs1".to_string(), "one".to_string()),
                ("cs1".to_string(), "two".to_string()),
                ("cs1".to_string(), "three".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn failed_line_does_not_stop_the_rest() {
        let sink = ChatSink::new(FakeChat {
            rejected: Some("two"),
            ..FakeChat::open()
        });

        assert_eq!(sink.post_lines(&lines()).await.unwrap(), 2);
        let bodies = sink
            .api
            .posted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body.clone())
            .collect::<Vec<_>>();
        assert_eq!(bodies, vec!["one", "three"]);
    }

    #[tokio::test]
    async fn missing_conversation_skips_the_sink() {
        let sink = ChatSink::new(FakeChat::default());

        let err = sink.post_lines(&lines()).await.unwrap_err();
        assert!(matches!(err, SinkError::NoConversation));
        assert!(sink.api.posted.lock().unwrap().is_empty());
    }
}
