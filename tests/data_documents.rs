//! The bundled documents stay in sync with the schemas.

use hollowdeep::data::loader;
use hollowdeep::data::map::{EventKind, TriggerKind};

#[test]
fn enemy_table_carries_the_map_candidates() {
    let table = loader::load_enemy_table("enemies.json").unwrap();
    for map in ["hollow_gate", "sunken_ward"] {
        let spec = loader::load_map_spec(format!("maps/{map}.json")).unwrap();
        for id in &spec.enemies {
            assert!(table.contains_key(id), "{map} references unknown enemy {id}");
        }
    }
}

#[test]
fn gate_map_wires_key_flag_to_the_door() {
    let spec = loader::load_map_spec("maps/hollow_gate.json").unwrap();
    let door = spec
        .events
        .iter()
        .find(|e| e.kind == EventKind::OpenDoor)
        .expect("gate map has a door");
    let cond = door.condition.as_ref().expect("door is conditional");
    assert_eq!(cond.flag, "gate_key");
    let giver = spec
        .npcs
        .iter()
        .filter_map(|n| n.talk_event.as_ref())
        .find(|e| e.kind == EventKind::SetFlag)
        .expect("someone hands out the key");
    assert_eq!(giver.action.as_ref().unwrap().flag, "gate_key");
    assert!(giver.once);
}

#[test]
fn warps_are_symmetric_between_the_bundled_maps() {
    let gate = loader::load_map_spec("maps/hollow_gate.json").unwrap();
    let ward = loader::load_map_spec("maps/sunken_ward.json").unwrap();
    let down = gate
        .events
        .iter()
        .find(|e| e.kind == EventKind::Warp)
        .unwrap();
    assert_eq!(down.trigger, TriggerKind::Touch);
    assert_eq!(down.warp_to.as_ref().unwrap().map, "sunken_ward");
    let up = ward
        .events
        .iter()
        .find(|e| e.kind == EventKind::Warp)
        .unwrap();
    assert_eq!(up.warp_to.as_ref().unwrap().map, "hollow_gate");
}
