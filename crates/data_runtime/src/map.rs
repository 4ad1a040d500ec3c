//! Map document: tiles, start placement, NPCs, tile events, encounter data.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MapSpec {
    pub width: u32,
    pub height: u32,
    /// Row-major tile codes, `tiles[z][x]`: 0 floor, 1 wall, 2 water.
    pub tiles: Vec<Vec<u8>>,
    pub start: StartSpec,
    /// Per-move probability of an encounter, in [0, 1].
    #[serde(default)]
    pub encounter_rate: f32,
    /// Candidate enemy ids for encounters on this map.
    #[serde(default)]
    pub enemies: Vec<String>,
    #[serde(default)]
    pub npcs: Vec<NpcSpec>,
    #[serde(default)]
    pub events: Vec<EventSpec>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StartSpec {
    pub x: i32,
    pub z: i32,
    /// Initial heading in degrees; 0 faces +z, 90 faces +x.
    #[serde(default)]
    pub heading_deg: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NpcSpec {
    pub name: String,
    pub x: i32,
    pub z: i32,
    #[serde(default)]
    pub asset: String,
    /// Ordered dialogue lines shown one per key press.
    #[serde(default)]
    pub lines: Vec<String>,
    /// Evaluated once the dialog closes, not per line.
    #[serde(default)]
    pub talk_event: Option<EventSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Heal,
    SetFlag,
    OpenDoor,
    Warp,
    Notice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Fires automatically when a move completes into the cell.
    Touch,
    /// Fires only on explicit interaction input.
    Action,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventSpec {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub z: i32,
    pub kind: EventKind,
    #[serde(default = "default_trigger")]
    pub trigger: TriggerKind,
    /// The event succeeds only when this flag holds the expected value.
    #[serde(default)]
    pub condition: Option<FlagCheckSpec>,
    /// Flag written on success (set_flag events).
    #[serde(default)]
    pub action: Option<FlagSetSpec>,
    /// Destination for warp events.
    #[serde(default)]
    pub warp_to: Option<WarpSpec>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub failure: Option<String>,
    /// Once-events succeed at most one time per session.
    #[serde(default)]
    pub once: bool,
}

fn default_trigger() -> TriggerKind {
    TriggerKind::Action
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlagCheckSpec {
    pub flag: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlagSetSpec {
    pub flag: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WarpSpec {
    pub map: String,
    pub x: i32,
    pub z: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_doc_parses_kinds_and_defaults() {
        let ev: EventSpec = serde_json::from_str(
            r#"{"x":4,"z":1,"kind":"open_door","condition":{"flag":"gate_key","value":"true"},
                "message":"The gate grinds open.","failure":"It will not budge.","once":true}"#,
        )
        .unwrap();
        assert_eq!(ev.kind, EventKind::OpenDoor);
        assert_eq!(ev.trigger, TriggerKind::Action);
        assert!(ev.once);
        assert_eq!(ev.condition.as_ref().unwrap().flag, "gate_key");
    }

    #[test]
    fn map_doc_parses_npcs_and_touch_events() {
        let map: MapSpec = serde_json::from_str(
            r#"{
                "width":2, "height":2, "tiles":[[0,0],[0,1]],
                "start":{"x":0,"z":0},
                "encounter_rate":0.25,
                "enemies":["slime"],
                "npcs":[{"name":"Maren","x":1,"z":0,"lines":["Hail."]}],
                "events":[{"x":0,"z":1,"kind":"warp","trigger":"touch",
                           "warp_to":{"map":"sunken_ward","x":1,"z":1}}]
            }"#,
        )
        .unwrap();
        assert_eq!(map.npcs.len(), 1);
        assert_eq!(map.events[0].trigger, TriggerKind::Touch);
        assert_eq!(map.events[0].warp_to.as_ref().unwrap().map, "sunken_ward");
        assert!(map.start.heading_deg.abs() < f32::EPSILON);
    }
}
