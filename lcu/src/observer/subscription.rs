use super::{
    frame::{
        parse_phase_frame,
        subscribe_frame,
        topic,
        GAMEFLOW_PHASE_URI,
    },
    tracker::{
        ObserverState,
        PhaseTracker,
        PhaseTransition,
    },
};
use crate::error::ConnectionError;
use futures::{
    SinkExt as _,
    Stream,
    StreamExt as _,
};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        client::IntoClientRequest as _,
        http::{
            header::SEC_WEBSOCKET_PROTOCOL,
            HeaderValue,
        },
        Error as WsError,
        Message,
    },
    MaybeTlsStream,
    WebSocketStream,
};
use tokio_util::sync::CancellationToken;
use url::Url;

pub type ChannelStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Location of the session state channel as published by the hosting environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    pub fn locate(published: Option<&Url>) -> Result<Self, ConnectionError> {
        published
            .cloned()
            .map(|url| Self { url })
            .ok_or(ConnectionError::EndpointUnavailable)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Owns the subscription to the gameflow phase topic.
pub struct PhaseObserver;

impl PhaseObserver {
    /// Connects to the channel and subscribes to gameflow phase events.
    ///
    /// The returned subscription yields phase transitions until the channel is lost
    /// or `cancel` fires.
    pub async fn start(
        endpoint: &Endpoint,
        cancel: CancellationToken,
    ) -> Result<PhaseSubscription<ChannelStream>, ConnectionError> {
        let url = endpoint.url().to_string();
        let connect_error = |source: WsError| ConnectionError::Connect {
            url: url.clone(),
            source: Box::new(source),
        };

        let mut request = url.as_str().into_client_request().map_err(connect_error)?;
        request
            .headers_mut()
            .insert(SEC_WEBSOCKET_PROTOCOL, HeaderValue::from_static("wamp"));

        info!("Connecting to the session channel at {url}");
        let (mut socket, response) = connect_async(request).await.map_err(connect_error)?;
        debug!(status = %response.status(), "Session channel connected");

        socket
            .send(Message::Text(subscribe_frame(GAMEFLOW_PHASE_URI).into()))
            .await
            .map_err(|source| ConnectionError::Handshake {
                topic: topic(GAMEFLOW_PHASE_URI),
                source: Box::new(source),
            })?;
        info!("Subscribed to {}", topic(GAMEFLOW_PHASE_URI));

        Ok(PhaseSubscription::new(socket, cancel))
    }
}

/// Lazy sequence of phase transitions read from a frame stream.
pub struct PhaseSubscription<S> {
    frames: S,
    tracker: PhaseTracker,
    cancel: CancellationToken,
    finished: bool,
}

impl<S> PhaseSubscription<S>
where
    S: Stream<Item = Result<Message, WsError>> + Unpin,
{
    pub fn new(frames: S, cancel: CancellationToken) -> Self {
        let mut tracker = PhaseTracker::default();
        tracker.connected();
        Self {
            frames,
            tracker,
            cancel,
            finished: false,
        }
    }

    pub fn state(&self) -> &ObserverState {
        self.tracker.state()
    }

    /// Waits for the next phase transition.
    ///
    /// Returns `None` once cancelled or after the loss of the channel has been reported.
    pub async fn next_transition(&mut self) -> Option<Result<PhaseTransition, ConnectionError>> {
        if self.finished {
            return None;
        }

        loop {
            let frame = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!("Phase subscription cancelled");
                    return self.finish(None);
                }
                frame = self.frames.next() => frame,
            };

            match frame {
                Some(Ok(Message::Text(text))) => match parse_phase_frame(text.as_str()) {
                    Ok(Some(phase)) => {
                        if let Some(transition) = self.tracker.observe(phase) {
                            debug!(from = ?transition.from, to = %transition.to, "Gameflow phase changed");
                            return Some(Ok(transition));
                        }
                        trace!("Repeated gameflow phase ignored");
                    }
                    Ok(None) => trace!("Ignoring frame {}", text.as_str()),
                    Err(err) => warn!("{err}"),
                },
                Some(Ok(Message::Close(frame))) => {
                    let reason = frame
                        .map(|frame| format!("closed by peer ({})", frame.reason.as_str()))
                        .unwrap_or_else(|| "closed by peer".to_string());
                    return self.finish(Some(ConnectionError::Lost(reason)));
                }
                Some(Ok(_)) => trace!("Ignoring non-text frame"),
                Some(Err(err)) => return self.finish(Some(ConnectionError::Lost(err.to_string()))),
                None => return self.finish(Some(ConnectionError::Lost("stream ended".to_string()))),
            }
        }
    }

    fn finish(&mut self, error: Option<ConnectionError>) -> Option<Result<PhaseTransition, ConnectionError>> {
        self.finished = true;
        self.tracker.disconnected();
        error.map(Err)
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<PhaseTransition, ConnectionError>> {
        futures::stream::unfold(self, |mut subscription| async move {
            subscription
                .next_transition()
                .await
                .map(|item| (item, subscription))
        })
    }
}
