use crate::{
    error::MalformedMessageError,
    types::SessionPhase,
};
use serde::Deserialize;
use serde_json::Value;

pub const GAMEFLOW_PHASE_URI: &str = "/lol-gameflow/v1/gameflow-phase";

/// WAMP opcode for subscribing to a topic.
const SUBSCRIBE: u8 = 5;
/// WAMP opcode of a published event.
const EVENT: u8 = 8;

/// Event topic name of a client API resource, e.g. `OnJsonApiEvent_lol-gameflow_v1_gameflow-phase`.
pub fn topic(uri: &str) -> String {
    format!("OnJsonApiEvent{}", uri.replace('/', "_"))
}

pub fn subscribe_frame(uri: &str) -> String {
    serde_json::json!([SUBSCRIBE, topic(uri)]).to_string()
}

#[derive(Debug, Deserialize)]
struct EventFrame(u8, String, EventPayload);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventPayload {
    data: Value,
    #[serde(default)]
    event_type: String,
}

/// Parses one text frame of the session channel.
///
/// Returns `Ok(None)` for well-formed frames that are not gameflow phase events.
pub fn parse_phase_frame(text: &str) -> Result<Option<SessionPhase>, MalformedMessageError> {
    let value: Value = serde_json::from_str(text).map_err(|err| MalformedMessageError::new(err, text))?;

    // Replies to our own subscribe call and other non-event frames carry no phase.
    if value.get(0).and_then(Value::as_u64) != Some(EVENT as u64) {
        return Ok(None);
    }

    let EventFrame(_, event_topic, payload) =
        serde_json::from_value(value).map_err(|err| MalformedMessageError::new(err, text))?;

    if event_topic != topic(GAMEFLOW_PHASE_URI) {
        return Ok(None);
    }

    match payload.data {
        Value::String(kind) => Ok(Some(SessionPhase::new(kind))),
        other => Err(MalformedMessageError::new(
            format!("{} event without a phase name: {other}", payload.event_type),
            text,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn event(data: &str) -> String {
        format!(
            r#"[8,"OnJsonApiEvent_lol-gameflow_v1_gameflow-phase",{{"data":{data},"eventType":"Update","uri":"/lol-gameflow/v1/gameflow-phase"}}]"#
        )
    }

    #[test]
    fn subscribe_frame_names_the_gameflow_topic() {
        assert_eq!(
            subscribe_frame(GAMEFLOW_PHASE_URI),
            r#"[5,"OnJsonApiEvent_lol-gameflow_v1_gameflow-phase"]"#
        );
    }

    #[test]
    fn phase_events_are_parsed() {
        assert_eq!(
            parse_phase_frame(&event(r#""ChampSelect""#)).unwrap(),
            Some(SessionPhase::champ_select())
        );
        assert_eq!(
            parse_phase_frame(&event(r#""InProgress""#)).unwrap(),
            Some(SessionPhase::new("InProgress"))
        );
    }

    #[test]
    fn unrelated_frames_are_skipped() {
        assert_eq!(parse_phase_frame("[]").unwrap(), None);
        assert_eq!(parse_phase_frame(r#"[0,"session-id",1,"server"]"#).unwrap(), None);
        let other_topic = r#"[8,"OnJsonApiEvent_lol-lobby_v2_lobby",{"data":{},"eventType":"Update"}]"#;
        assert_eq!(parse_phase_frame(other_topic).unwrap(), None);
    }

    #[test]
    fn malformed_frames_are_errors() {
        assert!(parse_phase_frame("not json").is_err());
        assert!(parse_phase_frame(r#"[8,"OnJsonApiEvent_lol-gameflow_v1_gameflow-phase"]"#).is_err());
        assert!(parse_phase_frame(&event("null")).is_err());
        assert!(parse_phase_frame(&event("42")).is_err());
    }
}
