use crate::{
    links,
    metrics::{
        summarize,
        PlayerSummary,
    },
};
use champ_reveal_lcu::{
    ClientError,
    HistoryRange,
    Participant,
    StatsSource,
};
use derive_more::Display;
use futures::future::join_all;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FetchTarget {
    #[display("match history")]
    History,
    #[display("ranked stats")]
    Rank,
}

/// One per-participant lookup failed. Only that participant's field is affected.
#[derive(thiserror::Error, Debug)]
#[error("Failed to fetch {what} of {puuid}: {source}")]
pub struct FetchError {
    pub puuid: String,
    pub what: FetchTarget,
    #[source]
    pub source: ClientError,
}

/// The participant list could not be read, so there is nothing to aggregate.
#[derive(thiserror::Error, Debug)]
#[error("Unable to read the champion select participants: {0}")]
pub struct AggregationInputError(#[from] pub ClientError);

/// Result of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    /// Champion select entry this run was started for.
    pub generation: u64,
    /// One summary per participant, in participant order.
    pub summaries: Vec<PlayerSummary>,
    /// Region code for deep links, absent if it could not be read.
    pub region: Option<String>,
}

impl Roster {
    pub fn chat_lines(&self) -> Vec<String> {
        self.summaries.iter().map(PlayerSummary::chat_line).collect()
    }

    pub fn panel_lines(&self) -> Vec<String> {
        self.summaries.iter().map(PlayerSummary::panel_line).collect()
    }

    /// Lookup links for the whole roster, empty without a region or participants.
    pub fn links_html(&self) -> String {
        match &self.region {
            Some(region) => links::links_html(region, self.summaries.iter().map(|summary| &summary.participant)),
            None => String::new(),
        }
    }
}

/// Gathers the statistics of every participant concurrently and derives their summaries.
#[derive(Debug, Clone)]
pub struct Aggregator<S> {
    source: S,
    range: HistoryRange,
}

impl<S: StatsSource> Aggregator<S> {
    pub fn new(source: S, range: HistoryRange) -> Self {
        Self { source, range }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the participant list and the region, then aggregates.
    #[instrument(level = "debug", skip(self))]
    pub async fn run(&self, generation: u64) -> Result<Roster, AggregationInputError> {
        let participants = self.source.champ_select_participants().await?;
        info!(count = participants.len(), "Aggregating champion select participants");

        let region = self
            .source
            .web_region()
            .await
            .inspect_err(|err| warn!("Region unavailable, deep links are omitted: {err}"))
            .ok();

        let summaries = self.aggregate(&participants).await;
        Ok(Roster {
            generation,
            summaries,
            region,
        })
    }

    /// One summary per participant in input order. Failed lookups degrade that
    /// participant's fields instead of failing the batch.
    pub async fn aggregate(&self, participants: &[Participant]) -> Vec<PlayerSummary> {
        join_all(participants.iter().map(|participant| self.summarize_participant(participant))).await
    }

    async fn summarize_participant(&self, participant: &Participant) -> PlayerSummary {
        let puuid = participant.puuid.as_str();
        let (history, ranked) = tokio::join!(
            self.source.match_history(puuid, self.range),
            self.source.ranked_stats(puuid),
        );

        let history = history
            .map_err(|source| fetch_error(puuid, FetchTarget::History, source))
            .inspect_err(|err| warn!("{err}"))
            .ok();
        let ranked = ranked
            .map_err(|source| fetch_error(puuid, FetchTarget::Rank, source))
            .inspect_err(|err| warn!("{err}"))
            .ok();

        summarize(participant.clone(), ranked.as_ref(), history.as_ref())
    }
}

fn fetch_error(puuid: &str, what: FetchTarget, source: ClientError) -> FetchError {
    FetchError {
        puuid: puuid.to_string(),
        what,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{
        Kda,
        RankLabel,
        WinRate,
    };
    use champ_reveal_lcu::{
        ApiFuture,
        MatchHistory,
        MatchRecord,
        RankedEntry,
        RankedStats,
    };
    use pretty_assertions::assert_eq;
    use std::{
        collections::HashSet,
        sync::Arc,
        time::Duration,
    };
    use tokio::sync::Barrier;

    fn unavailable(path: &str) -> ClientError {
        ClientError::Status {
            path: path.to_string(),
            status: 503,
        }
    }

    fn record(won: bool) -> MatchRecord {
        MatchRecord {
            queue_id: 420,
            champion_id: 1,
            kills: 3.into(),
            deaths: 1.into(),
            assists: 2.into(),
            minions_killed: 150,
            gold: 10000,
            won,
            early_surrender: false,
            lane: "JUNGLE".to_string(),
            spells: [4, 11],
            items: [0; 7],
            game_type: "MATCHED_GAME".to_string(),
        }
    }

    /// In-memory statistics, keyed by puuid.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub participants: Vec<Participant>,
        pub participants_unavailable: bool,
        pub region: Option<String>,
        pub failing_history: HashSet<String>,
        pub failing_rank: HashSet<String>,
        pub barrier: Option<Arc<Barrier>>,
    }

    impl FakeSource {
        pub(crate) fn with_players(count: usize) -> Self {
            Self {
                participants: (1..=count)
                    .map(|n| Participant::new(format!("p{n}"), format!("Player{n}"), "EUW"))
                    .collect(),
                region: Some("euw".to_string()),
                ..Default::default()
            }
        }

        async fn rendezvous(&self) {
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
        }
    }

    impl StatsSource for FakeSource {
        fn match_history<'a>(&'a self, puuid: &'a str, _range: HistoryRange) -> ApiFuture<'a, MatchHistory> {
            Box::pin(async move {
                self.rendezvous().await;
                if self.failing_history.contains(puuid) {
                    return Err(unavailable("/lol-match-history"));
                }
                Ok(MatchHistory::new(vec![record(true), record(false)]))
            })
        }

        fn ranked_stats<'a>(&'a self, puuid: &'a str) -> ApiFuture<'a, RankedStats> {
            Box::pin(async move {
                self.rendezvous().await;
                if self.failing_rank.contains(puuid) {
                    return Err(unavailable("/lol-ranked"));
                }
                Ok(RankedStats {
                    solo: Some(RankedEntry::new("GOLD", "IV")),
                    flex: None,
                })
            })
        }

        fn champ_select_participants(&self) -> ApiFuture<'_, Vec<Participant>> {
            Box::pin(async move {
                if self.participants_unavailable {
                    return Err(unavailable("/riotclient/chat/v5/participants"));
                }
                Ok(self.participants.clone())
            })
        }

        fn web_region(&self) -> ApiFuture<'_, String> {
            Box::pin(async move { self.region.clone().ok_or_else(|| unavailable("/riotclient/region-locale")) })
        }
    }

    #[tokio::test]
    async fn one_failed_history_does_not_fail_the_batch() {
        let mut source = FakeSource::with_players(5);
        source.failing_history.insert("p3".to_string());
        let aggregator = Aggregator::new(source, HistoryRange::default());

        let roster = aggregator.run(1).await.unwrap();

        let names = roster
            .summaries
            .iter()
            .map(|summary| summary.participant.display_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Player1", "Player2", "Player3", "Player4", "Player5"]);

        let third = &roster.summaries[2];
        assert_eq!(third.win_rate, WinRate::NotAvailable);
        assert_eq!(third.primary_role, "N/A");
        assert_eq!(third.kda, Kda::NotAvailable);
        assert_eq!(third.rank, RankLabel::Ranked("G4".to_string()));

        let first = &roster.summaries[0];
        assert_eq!(first.chat_line(), "Player1 - G4 - 50% - JUNGLE - 5.00 KDA");
    }

    #[tokio::test]
    async fn failed_rank_is_unranked() {
        let mut source = FakeSource::with_players(2);
        source.failing_rank.insert("p2".to_string());
        let aggregator = Aggregator::new(source, HistoryRange::default());

        let summaries = aggregator.aggregate(&aggregator.source().participants).await;
        assert_eq!(summaries[0].rank, RankLabel::Ranked("G4".to_string()));
        assert_eq!(summaries[1].rank, RankLabel::Unranked);
        assert_eq!(summaries[1].win_rate, WinRate::Percent(50));
    }

    #[tokio::test]
    async fn unreadable_participants_abort_the_run() {
        let source = FakeSource {
            participants_unavailable: true,
            ..FakeSource::with_players(5)
        };
        let aggregator = Aggregator::new(source, HistoryRange::default());

        let err = aggregator.run(7).await.unwrap_err();
        assert!(matches!(err.0, ClientError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn missing_region_only_drops_links() {
        let source = FakeSource {
            region: None,
            ..FakeSource::with_players(1)
        };
        let roster = Aggregator::new(source, HistoryRange::default()).run(2).await.unwrap();

        assert_eq!(roster.generation, 2);
        assert_eq!(roster.summaries.len(), 1);
        assert_eq!(roster.links_html(), "");
    }

    #[tokio::test]
    async fn all_requests_are_in_flight_together() {
        // Every request waits until all ten are pending, so a sequential fetch would never finish.
        let source = FakeSource {
            barrier: Some(Arc::new(Barrier::new(10))),
            ..FakeSource::with_players(5)
        };
        let aggregator = Aggregator::new(source, HistoryRange::default());
        let participants = aggregator.source().participants.clone();

        let summaries = tokio::time::timeout(Duration::from_secs(5), aggregator.aggregate(&participants))
            .await
            .expect("requests were not issued concurrently");
        assert_eq!(summaries.len(), 5);
    }
}
