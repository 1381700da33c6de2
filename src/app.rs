use champ_reveal_config::Config;
use champ_reveal_lcu::{
    observer::{
        Endpoint,
        PhaseObserver,
        PhaseTransition,
    },
    ChatApi,
    HistoryRange,
    LocalApiClient,
    StatsSource,
};
use champ_reveal_scout::{
    sink::{
        ChatSink,
        HtmlOverlay,
        PanelHandle,
        PanelSink,
    },
    AggregationInputError,
    Aggregator,
    Roster,
};
use eyre::{
    Context as _,
    Result,
};
use futures::StreamExt as _;
use std::time::Duration;
use tokio::sync::mpsc::{
    unbounded_channel,
    UnboundedSender,
};
use tokio_util::sync::CancellationToken;

type RunOutcome = (u64, Result<Roster, AggregationInputError>);

pub struct App {
    config: Config,
}

impl App {
    pub fn new(args: champ_reveal_config::Args) -> Result<Self> {
        let config = Config::load(args);
        debug!("Configuration: {config:#?}");
        Ok(Self { config })
    }

    /// Follows the gameflow phase until the session channel is lost or the process is interrupted.
    pub async fn run(self) -> Result<()> {
        let settle_delay = self.config.settle_delay()?;
        let client = LocalApiClient::new(self.config.api_url.clone()).wrap_err("Failed to create the API client")?;
        if !self.config.has_sinks() {
            warn!("Both the chat and the overlay are disabled, nothing will be shown");
        }

        let (results, mut outcomes) = unbounded_channel();
        let mut session = Session::new(
            Aggregator::new(client.clone(), HistoryRange::first(self.config.history_end_index)),
            self.config.textchat.then(|| ChatSink::new(client)),
            self.config
                .popup
                .then(|| Box::new(HtmlOverlay::new(self.config.overlay_path())) as Box<dyn PanelSink>),
            settle_delay,
            results,
        );

        let endpoint = Endpoint::locate(self.config.websocket_url.as_ref())?;
        let shutdown = CancellationToken::new();
        let transitions = PhaseObserver::start(&endpoint, shutdown.clone()).await?.into_stream();
        tokio::pin!(transitions);

        let result = loop {
            tokio::select! {
                transition = transitions.next() => match transition {
                    Some(Ok(transition)) => session.on_transition(&transition),
                    Some(Err(err)) => break Err(err).wrap_err("Session channel closed"),
                    None => break Ok(()),
                },
                Some((generation, outcome)) = outcomes.recv() => session.render(generation, outcome).await,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, shutting down");
                    shutdown.cancel();
                    break Ok(());
                }
            }
        };

        session.leave();
        result
    }
}

/// The champion select currently being served.
struct ActiveRun {
    generation: u64,
    cancel: CancellationToken,
    panel: Option<PanelHandle>,
}

/// Starts, supersedes and renders aggregation runs. All sink calls happen on the
/// controller task.
pub(crate) struct Session<S, C> {
    aggregator: Aggregator<S>,
    chat: Option<ChatSink<C>>,
    panel: Option<Box<dyn PanelSink>>,
    settle_delay: Duration,
    generation: u64,
    active: Option<ActiveRun>,
    results: UnboundedSender<RunOutcome>,
}

impl<S, C> Session<S, C>
where
    S: StatsSource + Clone + 'static,
    C: ChatApi,
{
    pub(crate) fn new(
        aggregator: Aggregator<S>,
        chat: Option<ChatSink<C>>,
        panel: Option<Box<dyn PanelSink>>,
        settle_delay: Duration,
        results: UnboundedSender<RunOutcome>,
    ) -> Self {
        Self {
            aggregator,
            chat,
            panel,
            settle_delay,
            generation: 0,
            active: None,
            results,
        }
    }

    pub(crate) fn on_transition(&mut self, transition: &PhaseTransition) {
        if transition.entered_champ_select() {
            self.enter();
        } else if transition.left_champ_select() {
            self.leave();
        } else {
            trace!(phase = %transition.to, "Phase change without effect");
        }
    }

    fn enter(&mut self) {
        self.leave();
        self.generation += 1;
        let generation = self.generation;
        info!(generation, "Entered champion select");

        let panel = self.panel.as_mut().and_then(|panel| {
            panel
                .show(generation)
                .inspect_err(|err| warn!("Unable to show the overlay: {err}"))
                .ok()
        });

        let cancel = CancellationToken::new();
        tokio::spawn({
            let aggregator = self.aggregator.clone();
            let results = self.results.clone();
            let settle_delay = self.settle_delay;
            let cancel = cancel.clone();
            async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => debug!(generation, "Aggregation run cancelled"),
                    outcome = async {
                        tokio::time::sleep(settle_delay).await;
                        aggregator.run(generation).await
                    } => {
                        let _ = results.send((generation, outcome));
                    }
                }
            }
        });

        self.active = Some(ActiveRun {
            generation,
            cancel,
            panel,
        });
    }

    /// Cancels the current run and tears the overlay down. No-op outside champion select.
    pub(crate) fn leave(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        info!(generation = active.generation, "Left champion select");
        active.cancel.cancel();

        if let (Some(panel), Some(handle)) = (self.panel.as_mut(), active.panel) {
            if let Err(err) = panel.hide(handle) {
                warn!("Unable to hide the overlay: {err}");
            }
        }
    }

    pub(crate) async fn render(&mut self, generation: u64, outcome: Result<Roster, AggregationInputError>) {
        let Some(active) = self.active.as_ref().filter(|active| active.generation == generation) else {
            debug!(generation, current = self.generation, "Dropping result of a superseded run");
            return;
        };

        let roster = match outcome {
            Ok(roster) => roster,
            Err(err) => {
                warn!("Aggregation run {generation} failed: {err}");
                return;
            }
        };

        if let Some(chat) = &self.chat {
            if let Err(err) = chat.post_lines(&roster.chat_lines()).await {
                warn!("Skipping chat: {err}");
            }
        }

        if let (Some(panel), Some(handle)) = (self.panel.as_mut(), active.panel.as_ref()) {
            if let Err(err) = panel.populate(handle, &roster.panel_lines(), &roster.links_html()) {
                warn!("Unable to populate the overlay: {err}");
            }
        }
        info!(generation, players = roster.summaries.len(), "Champion select roster rendered");
    }
}
