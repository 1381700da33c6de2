//! Display metrics derived from raw history and rank records. No I/O in here.

use champ_reveal_lcu::{
    MatchHistory,
    Participant,
    RankedEntry,
    RankedStats,
    StatValue,
};
use derive_more::Display;
use serde::Serialize;
use std::fmt;

pub const NOT_AVAILABLE: &str = "N/A";

/// Tiers that are split into divisions, in ascending order.
const DIVIDED_TIERS: [&str; 7] = ["IRON", "BRONZE", "SILVER", "GOLD", "PLATINUM", "EMERALD", "DIAMOND"];

/// Lane values the client uses when no role was assigned.
const UNASSIGNED_ROLES: [&str; 3] = ["NA", "NONE", ""];

fn roman_value(symbol: char) -> i32 {
    match symbol {
        'I' => 1,
        'V' => 5,
        'X' => 10,
        'L' => 50,
        'C' => 100,
        'D' => 500,
        'M' => 1000,
        _ => 0,
    }
}

/// Converts a roman numeral, reading right to left: a symbol smaller than the largest
/// one seen so far is subtracted, anything else is added. Unknown symbols count zero.
pub fn roman_to_number(roman: &str) -> i32 {
    let mut total = 0;
    let mut max_seen = 0;
    for value in roman.chars().rev().map(roman_value) {
        if value < max_seen {
            total -= value;
        } else {
            total += value;
            max_seen = value;
        }
    }
    total
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
pub enum RankLabel {
    Ranked(String),
    Unranked,
}

/// A rank entry counts if it names a real tier and division and placements are done.
pub fn is_valid_rank(entry: &RankedEntry) -> bool {
    !entry.tier.is_empty() && entry.tier != "NA" && !entry.division.is_empty() && !entry.is_provisional
}

/// `SILVER` + `III` becomes `S3`. Apex tiers have no divisions and keep their full name.
pub fn format_rank(entry: &RankedEntry) -> String {
    if DIVIDED_TIERS.contains(&entry.tier.as_str()) {
        let initial = entry.tier.chars().next().map(String::from).unwrap_or_default();
        format!("{initial}{}", roman_to_number(&entry.division))
    } else {
        entry.tier.clone()
    }
}

/// Solo queue wins over flex queue; neither being valid means unranked.
pub fn select_rank(solo: Option<&RankedEntry>, flex: Option<&RankedEntry>) -> RankLabel {
    [solo, flex]
        .into_iter()
        .flatten()
        .find(|entry| is_valid_rank(entry))
        .map(|entry| RankLabel::Ranked(format_rank(entry)))
        .unwrap_or(RankLabel::Unranked)
}

pub fn rank_label(stats: Option<&RankedStats>) -> RankLabel {
    stats
        .map(|stats| select_rank(stats.solo.as_ref(), stats.flex.as_ref()))
        .unwrap_or(RankLabel::Unranked)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum WinRate {
    #[display("{_0}%")]
    Percent(u32),
    #[display("N/A")]
    NotAvailable,
}

/// Share of won matches, rounded to a whole percent.
pub fn win_rate<I>(outcomes: I) -> WinRate
where
    I: IntoIterator<Item = bool>,
{
    let (wins, total) = outcomes
        .into_iter()
        .fold((0u32, 0u32), |(wins, total), won| (wins + u32::from(won), total + 1));
    if total == 0 {
        return WinRate::NotAvailable;
    }
    WinRate::Percent((100.0 * f64::from(wins) / f64::from(total)).round() as u32)
}

/// Most frequent role. Ties are joined with `/` in the order the roles first appeared.
pub fn most_common_role<I, S>(roles: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for role in roles {
        let role = role.as_ref();
        match counts.iter_mut().find(|(seen, _)| seen == role) {
            Some((_, count)) => *count += 1,
            None => counts.push((role.to_string(), 1)),
        }
    }

    let max = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let joined = counts
        .into_iter()
        .filter(|(_, count)| *count == max)
        .map(|(role, _)| role)
        .collect::<Vec<_>>()
        .join("/");

    if UNASSIGNED_ROLES.contains(&joined.as_str()) {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Kda {
    Perfect,
    Ratio(f64),
    NotAvailable,
}

impl fmt::Display for Kda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kda::Perfect => f.write_str("PERFECT"),
            Kda::Ratio(ratio) => write!(f, "{ratio:.2} KDA"),
            Kda::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

fn sum_stats(values: &[StatValue]) -> i64 {
    values.iter().map(StatValue::sum).sum()
}

/// `(kills + assists) / deaths` over all matches, rounded half up to two decimals.
pub fn calculate_kda(kills: &[StatValue], assists: &[StatValue], deaths: &[StatValue]) -> Kda {
    let kills = sum_stats(kills);
    let assists = sum_stats(assists);
    let deaths = sum_stats(deaths);
    if deaths == 0 {
        return Kda::Perfect;
    }
    let ratio = (kills + assists) as f64 / deaths as f64;
    Kda::Ratio((ratio * 100.0).round() / 100.0)
}

/// What gets shown for one player of the champion select.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub participant: Participant,
    pub rank: RankLabel,
    pub win_rate: WinRate,
    pub primary_role: String,
    pub kda: Kda,
}

impl PlayerSummary {
    /// Line posted to the champion-select chat.
    pub fn chat_line(&self) -> String {
        format!(
            "{} - {} - {} - {} - {}",
            self.participant.display_name, self.rank, self.win_rate, self.primary_role, self.kda
        )
    }

    /// Line shown in the overlay panel, which also carries the tag.
    pub fn panel_line(&self) -> String {
        format!(
            "{} #{} - {} - {} - {} - {}",
            self.participant.display_name, self.participant.tag, self.rank, self.win_rate, self.primary_role, self.kda
        )
    }
}

/// Builds the summary of one player. A missing or empty history leaves every
/// history based field at `N/A`.
pub fn summarize(participant: Participant, ranked: Option<&RankedStats>, history: Option<&MatchHistory>) -> PlayerSummary {
    let rank = rank_label(ranked);
    match history.filter(|history| !history.is_empty()) {
        Some(history) => {
            let kills = history.iter().map(|record| record.kills.clone()).collect::<Vec<_>>();
            let assists = history.iter().map(|record| record.assists.clone()).collect::<Vec<_>>();
            let deaths = history.iter().map(|record| record.deaths.clone()).collect::<Vec<_>>();
            PlayerSummary {
                participant,
                rank,
                win_rate: win_rate(history.outcomes()),
                primary_role: most_common_role(history.lanes()),
                kda: calculate_kda(&kills, &assists, &deaths),
            }
        }
        None => PlayerSummary {
            participant,
            rank,
            win_rate: WinRate::NotAvailable,
            primary_role: NOT_AVAILABLE.to_string(),
            kda: Kda::NotAvailable,
        },
    }
}
