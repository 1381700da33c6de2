//! Wire shapes of the local client API.
//!
//! Responses are deserialized into these structs first and converted into the
//! domain types afterwards, so a missing or renamed field surfaces as a schema
//! error instead of travelling on as a default value.

use crate::types::{
    Conversation,
    MatchHistory,
    MatchRecord,
    Participant,
    RankedEntry,
    RankedStats,
    StatValue,
};
use serde::{
    Deserialize,
    Serialize,
};

pub const CHAMP_SELECT_CONVERSATION: &str = "championSelect";
const CHAMP_SELECT_CID_MARKER: &str = "champ-select";

#[derive(Debug, Deserialize)]
pub(crate) struct MatchHistoryResponse {
    games: GamesPage,
}

#[derive(Debug, Deserialize)]
struct GamesPage {
    games: Vec<RawGame>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGame {
    queue_id: i64,
    game_type: String,
    participants: Vec<RawGameParticipant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGameParticipant {
    champion_id: i64,
    spell1_id: i64,
    spell2_id: i64,
    stats: RawStats,
    timeline: RawTimeline,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStats {
    kills: StatValue,
    deaths: StatValue,
    assists: StatValue,
    neutral_minions_killed: i64,
    total_minions_killed: i64,
    gold_earned: i64,
    win: bool,
    #[serde(default)]
    caused_early_surrender: bool,
    item0: i64,
    item1: i64,
    item2: i64,
    item3: i64,
    item4: i64,
    item5: i64,
    item6: i64,
}

#[derive(Debug, Deserialize)]
struct RawTimeline {
    lane: String,
}

impl TryFrom<RawGame> for MatchRecord {
    type Error = String;

    fn try_from(game: RawGame) -> Result<Self, Self::Error> {
        // The history endpoint only returns the requested player's own participant entry.
        let participant = game
            .participants
            .into_iter()
            .next()
            .ok_or_else(|| "match without participants".to_string())?;
        let stats = participant.stats;

        Ok(Self {
            queue_id: game.queue_id,
            champion_id: participant.champion_id,
            kills: stats.kills,
            deaths: stats.deaths,
            assists: stats.assists,
            minions_killed: stats.neutral_minions_killed + stats.total_minions_killed,
            gold: stats.gold_earned,
            won: stats.win,
            early_surrender: stats.caused_early_surrender,
            lane: participant.timeline.lane,
            spells: [participant.spell1_id, participant.spell2_id],
            items: [
                stats.item0,
                stats.item1,
                stats.item2,
                stats.item3,
                stats.item4,
                stats.item5,
                stats.item6,
            ],
            game_type: game.game_type,
        })
    }
}

impl TryFrom<MatchHistoryResponse> for MatchHistory {
    type Error = String;

    fn try_from(response: MatchHistoryResponse) -> Result<Self, Self::Error> {
        response
            .games
            .games
            .into_iter()
            .map(MatchRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(MatchHistory::new)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RankedStatsResponse {
    queue_map: QueueMap,
}

#[derive(Debug, Deserialize)]
struct QueueMap {
    #[serde(rename = "RANKED_SOLO_5x5", default)]
    solo: Option<RawRankedEntry>,
    #[serde(rename = "RANKED_FLEX_SR", default)]
    flex: Option<RawRankedEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRankedEntry {
    #[serde(default)]
    tier: Option<String>,
    #[serde(default)]
    division: Option<String>,
    #[serde(default)]
    is_provisional: bool,
}

impl From<RawRankedEntry> for RankedEntry {
    fn from(entry: RawRankedEntry) -> Self {
        Self {
            tier: entry.tier.unwrap_or_default(),
            division: entry.division.unwrap_or_default(),
            is_provisional: entry.is_provisional,
        }
    }
}

impl From<RankedStatsResponse> for RankedStats {
    fn from(response: RankedStatsResponse) -> Self {
        Self {
            solo: response.queue_map.solo.map(Into::into),
            flex: response.queue_map.flex.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatParticipantsResponse {
    participants: Vec<RawChatParticipant>,
}

#[derive(Debug, Deserialize)]
struct RawChatParticipant {
    cid: String,
    puuid: String,
    game_name: String,
    game_tag: String,
}

impl ChatParticipantsResponse {
    /// Keeps the members of the champion-select conversation, in the order the client lists them.
    pub(crate) fn into_champ_select(self) -> Vec<Participant> {
        self.participants
            .into_iter()
            .filter(|participant| participant.cid.contains(CHAMP_SELECT_CID_MARKER))
            .map(|participant| Participant::new(participant.puuid, participant.game_name, participant.game_tag))
            .collect()
    }
}

pub(crate) fn find_champ_select_conversation(conversations: Vec<Conversation>) -> Option<Conversation> {
    conversations
        .into_iter()
        .find(|conversation| conversation.kind == CHAMP_SELECT_CONVERSATION)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegionLocaleResponse {
    pub(crate) web_region: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessageRequest<'a> {
    pub(crate) body: &'a str,
    #[serde(rename = "type")]
    pub(crate) kind: &'a str,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{
        json,
        Value,
    };

    pub(crate) fn game(kills: Value, deaths: Value, assists: Value, win: bool, lane: &str) -> Value {
        json!({
            "queueId": 420,
            "gameType": "MATCHED_GAME",
            "participants": [{
                "championId": 99,
                "spell1Id": 4,
                "spell2Id": 14,
                "stats": {
                    "kills": kills,
                    "deaths": deaths,
                    "assists": assists,
                    "neutralMinionsKilled": 10,
                    "totalMinionsKilled": 150,
                    "goldEarned": 11000,
                    "win": win,
                    "causedEarlySurrender": false,
                    "item0": 1, "item1": 2, "item2": 3, "item3": 4,
                    "item4": 5, "item5": 6, "item6": 3340
                },
                "timeline": { "lane": lane }
            }]
        })
    }

    pub(crate) fn history(games: Vec<Value>) -> Value {
        json!({ "games": { "games": games } })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        fixtures::*,
        *,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn match_history_is_flattened_into_records() {
        let raw = history(vec![
            game(json!(5), json!(2), json!(7), true, "MIDDLE"),
            game(json!("1,2"), json!(3), json!(0), false, "JUNGLE"),
        ]);
        let response: MatchHistoryResponse = serde_json::from_value(raw).unwrap();
        let history = MatchHistory::try_from(response).unwrap();

        assert_eq!(history.len(), 2);
        let first = &history[0];
        assert_eq!(first.queue_id, 420);
        assert_eq!(first.champion_id, 99);
        assert_eq!(first.minions_killed, 160);
        assert_eq!(first.gold, 11000);
        assert!(first.won);
        assert_eq!(first.lane, "MIDDLE");
        assert_eq!(first.spells, [4, 14]);
        assert_eq!(first.items, [1, 2, 3, 4, 5, 6, 3340]);
        assert_eq!(history[1].kills, StatValue::Joined("1,2".to_string()));
    }

    #[test]
    fn missing_fields_are_rejected() {
        let raw = json!({ "games": { "games": [{ "queueId": 420, "gameType": "MATCHED_GAME" }] } });
        assert!(serde_json::from_value::<MatchHistoryResponse>(raw).is_err());

        let renamed = json!({ "games": [] });
        assert!(serde_json::from_value::<MatchHistoryResponse>(renamed).is_err());
    }

    #[test]
    fn match_without_participants_is_rejected() {
        let raw = json!({ "games": { "games": [{ "queueId": 420, "gameType": "MATCHED_GAME", "participants": [] }] } });
        let response: MatchHistoryResponse = serde_json::from_value(raw).unwrap();
        assert!(MatchHistory::try_from(response).is_err());
    }

    #[test]
    fn ranked_queue_map_is_read() {
        let raw = json!({
            "queueMap": {
                "RANKED_SOLO_5x5": { "tier": "SILVER", "division": "III", "isProvisional": false },
                "RANKED_FLEX_SR": { "tier": "", "division": "NA", "isProvisional": true },
                "RANKED_TFT": { "tier": "GOLD", "division": "I" }
            }
        });
        let stats = RankedStats::from(serde_json::from_value::<RankedStatsResponse>(raw).unwrap());
        assert_eq!(stats.solo, Some(RankedEntry::new("SILVER", "III")));
        assert_eq!(stats.flex, Some(RankedEntry::new("", "NA").provisional()));

        assert!(serde_json::from_value::<RankedStatsResponse>(json!({ "queues": [] })).is_err());
    }

    #[test]
    fn only_champ_select_members_are_kept() {
        let raw = json!({
            "participants": [
                { "cid": "abc@champ-select.eu1.pvp.net", "puuid": "p1", "game_name": "First", "game_tag": "EUW" },
                { "cid": "lobby@sec.pvp.net", "puuid": "p2", "game_name": "Lobby", "game_tag": "EUW" },
                { "cid": "abc@champ-select.eu1.pvp.net", "puuid": "p3", "game_name": "Third", "game_tag": "1234" }
            ]
        });
        let response: ChatParticipantsResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(
            response.into_champ_select(),
            vec![
                Participant::new("p1", "First", "EUW"),
                Participant::new("p3", "Third", "1234"),
            ]
        );
    }

    #[test]
    fn champ_select_conversation_is_found() {
        let conversations: Vec<Conversation> = serde_json::from_value(json!([
            { "id": "a", "type": "chat" },
            { "id": "b", "type": "championSelect" }
        ]))
        .unwrap();
        assert_eq!(find_champ_select_conversation(conversations).map(|c| c.id), Some("b".to_string()));
    }
}
