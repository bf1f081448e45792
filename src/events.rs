//! External event injection
//!
//! A relay transport (out of scope here) fans out JSON messages shaped
//! `{ "type": string, "payload": { "kind"?, "lane"?, "x"? } }`. This
//! module parses them into [`InjectedEvent`]s for
//! [`GameState::inject`](crate::sim::GameState::inject); malformed or
//! unrecognized messages are dropped silently, never crashing the
//! simulation.

use serde::{Deserialize, Serialize};

use crate::sim::PowerUpKind;

/// A queued out-of-band spawn request. Applied immediately before the
/// next Spawner step, under the same caps and anti-clustering rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InjectedEvent {
    SpawnObstacle {
        lane: Option<usize>,
    },
    SpawnPowerUp {
        kind: Option<PowerUpKind>,
        lane: Option<usize>,
        x: Option<f32>,
    },
}

#[derive(Debug, Deserialize)]
struct RelayMessage {
    #[serde(rename = "type")]
    msg_type: String,
    #[serde(default)]
    payload: RelayPayload,
}

#[derive(Debug, Default, Deserialize)]
struct RelayPayload {
    kind: Option<String>,
    lane: Option<i64>,
    x: Option<f32>,
}

/// Parse one relay message. Returns `None` for anything that is not a
/// recognized spawn request.
pub fn parse_relay_message(raw: &str) -> Option<InjectedEvent> {
    let msg: RelayMessage = serde_json::from_str(raw).ok()?;
    let lane = msg.payload.lane.and_then(|l| usize::try_from(l).ok());
    match msg.msg_type.as_str() {
        "enemy" | "obstacle" | "spawn_enemy" => Some(InjectedEvent::SpawnObstacle { lane }),
        "powerup" | "spawn_powerup" => Some(InjectedEvent::SpawnPowerUp {
            kind: msg.payload.kind.as_deref().and_then(PowerUpKind::from_token),
            lane,
            x: msg.payload.x,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_powerup_message() {
        let ev = parse_relay_message(r#"{"type":"powerup","payload":{"kind":"boom","lane":2}}"#);
        assert_eq!(
            ev,
            Some(InjectedEvent::SpawnPowerUp {
                kind: Some(PowerUpKind::ClearBomb),
                lane: Some(2),
                x: None,
            })
        );
    }

    #[test]
    fn parses_obstacle_message_without_payload() {
        let ev = parse_relay_message(r#"{"type":"spawn_enemy"}"#);
        assert_eq!(ev, Some(InjectedEvent::SpawnObstacle { lane: None }));
    }

    #[test]
    fn unknown_kind_degrades_to_random() {
        let ev = parse_relay_message(r#"{"type":"powerup","payload":{"kind":"mystery","x":120.5}}"#);
        assert_eq!(
            ev,
            Some(InjectedEvent::SpawnPowerUp { kind: None, lane: None, x: Some(120.5) })
        );
    }

    #[test]
    fn garbage_is_dropped_silently() {
        assert_eq!(parse_relay_message("not json"), None);
        assert_eq!(parse_relay_message(r#"{"payload":{}}"#), None);
        assert_eq!(parse_relay_message(r#"{"type":"hello","ts":123}"#), None);
        // Negative lanes cannot index anything
        let ev = parse_relay_message(r#"{"type":"enemy","payload":{"lane":-3}}"#).unwrap();
        assert_eq!(ev, InjectedEvent::SpawnObstacle { lane: None });
    }
}
