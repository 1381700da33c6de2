use derive_more::{
    Deref,
    Display,
};
use serde::{
    Deserialize,
    Serialize,
};

pub const CHAMP_SELECT_PHASE: &str = "ChampSelect";

/// A gameflow phase as announced on the session channel, e.g. `ChampSelect` or `InProgress`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, Serialize, Deserialize)]
pub struct SessionPhase(String);

impl SessionPhase {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn champ_select() -> Self {
        Self::new(CHAMP_SELECT_PHASE)
    }

    pub fn kind(&self) -> &str {
        &self.0
    }

    pub fn is_champ_select(&self) -> bool {
        self.0 == CHAMP_SELECT_PHASE
    }
}

/// One player of the active champion select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub puuid: String,
    pub display_name: String,
    pub tag: String,
}

impl Participant {
    pub fn new(puuid: impl Into<String>, display_name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            puuid: puuid.into(),
            display_name: display_name.into(),
            tag: tag.into(),
        }
    }

    /// `name#tag`, the form used by third party lookup sites.
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.display_name, self.tag)
    }
}

/// A per-match counter. Older history entries store several values joined by commas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(i64),
    Joined(String),
}

impl StatValue {
    /// All numbers carried by this value. Elements that are not numbers count as zero.
    pub fn values(&self) -> Vec<i64> {
        match self {
            StatValue::Number(value) => vec![*value],
            StatValue::Joined(joined) => joined
                .split(',')
                .map(|part| part.trim().parse::<i64>().unwrap_or(0))
                .collect(),
        }
    }

    pub fn sum(&self) -> i64 {
        self.values().into_iter().sum()
    }
}

impl From<i64> for StatValue {
    fn from(value: i64) -> Self {
        StatValue::Number(value)
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        StatValue::Joined(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub queue_id: i64,
    pub champion_id: i64,
    pub kills: StatValue,
    pub deaths: StatValue,
    pub assists: StatValue,
    pub minions_killed: i64,
    pub gold: i64,
    pub won: bool,
    pub early_surrender: bool,
    pub lane: String,
    pub spells: [i64; 2],
    pub items: [i64; 7],
    pub game_type: String,
}

/// Recent matches of one player, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, Serialize, Deserialize)]
pub struct MatchHistory(Vec<MatchRecord>);

impl MatchHistory {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self(records)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().map(|record| record.won)
    }

    pub fn lanes(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|record| record.lane.as_str())
    }
}

/// Inclusive index window requested from the match history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRange {
    pub begin: u32,
    pub end: u32,
}

impl HistoryRange {
    pub fn first(end: u32) -> Self {
        Self { begin: 0, end }
    }
}

impl Default for HistoryRange {
    fn default() -> Self {
        Self::first(20)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub tier: String,
    pub division: String,
    pub is_provisional: bool,
}

impl RankedEntry {
    pub fn new(tier: impl Into<String>, division: impl Into<String>) -> Self {
        Self {
            tier: tier.into(),
            division: division.into(),
            is_provisional: false,
        }
    }

    pub fn provisional(mut self) -> Self {
        self.is_provisional = true;
        self
    }
}

/// Rank entries of the two queues that are considered for the rank label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedStats {
    pub solo: Option<RankedEntry>,
    pub flex: Option<RankedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}
