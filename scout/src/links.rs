//! Multi-search links of third party lookup sites for a whole roster.

use crate::sink::html_escape;
use champ_reveal_lcu::Participant;
use url::Url;

const OPGG_BASE: &str = "https://www.op.gg/multisearch/";
const DEEPLOL_BASE: &str = "https://www.deeplol.gg/multi/";

fn riot_ids<'a>(participants: impl IntoIterator<Item = &'a Participant>) -> Vec<String> {
    participants.into_iter().map(Participant::riot_id).collect()
}

/// `https://www.op.gg/multisearch/{region}?summoners=name%23tag%2C...`
pub fn opgg_url<'a>(region: &str, participants: impl IntoIterator<Item = &'a Participant>) -> Option<Url> {
    let mut url = Url::parse(OPGG_BASE).ok()?.join(region).ok()?;
    url.query_pairs_mut()
        .append_pair("summoners", &riot_ids(participants).join(","));
    Some(url)
}

/// `https://www.deeplol.gg/multi/{region}/name%23tag,...`
pub fn deeplol_url<'a>(region: &str, participants: impl IntoIterator<Item = &'a Participant>) -> Option<Url> {
    let mut url = Url::parse(DEEPLOL_BASE).ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(region)
        .push(&riot_ids(participants).join(","));
    Some(url)
}

/// Link block shown below the roster in the overlay panel.
pub fn links_html<'a>(region: &str, participants: impl IntoIterator<Item = &'a Participant> + Clone) -> String {
    let links = [
        ("View on OP.GG", opgg_url(region, participants.clone())),
        ("View on deeplol.gg", deeplol_url(region, participants)),
    ];

    let anchors = links
        .into_iter()
        .filter_map(|(label, url)| {
            url.map(|url| {
                format!(
                    r#"<a href="{}" target="_blank" style="color: gold;">{label}</a>"#,
                    html_escape(url.as_str())
                )
            })
        })
        .collect::<Vec<_>>();

    if anchors.is_empty() {
        return String::new();
    }
    format!(r#"<p style="font-size: 12px">{}</p>"#, anchors.join("<br>"))
}
