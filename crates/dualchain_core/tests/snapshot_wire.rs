use chrono::{TimeZone, Utc};
use dualchain_core::{ChainStore, Node, NodeDraft, Snapshot};
use uuid::Uuid;

fn node(content: &str, duration: u32) -> Node {
    Node::new(
        content,
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        duration,
    )
}

#[test]
fn node_serialization_uses_expected_wire_fields() {
    let mut paired = node("review", 45);
    let partner_id = Uuid::new_v4();
    paired.pair_id = Some(partner_id);

    let json = serde_json::to_value(&paired).unwrap();
    assert_eq!(json["id"], paired.id.to_string());
    assert_eq!(json["content"], "review");
    assert_eq!(json["dt"], "2024-01-01T09:00:00Z");
    assert_eq!(json["duration"], 45);
    assert_eq!(json["pairId"], partner_id.to_string());

    let decoded: Node = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, paired);
}

#[test]
fn unset_pairing_is_omitted_not_null() {
    let unpaired = node("solo", 0);

    let json = serde_json::to_value(&unpaired).unwrap();
    assert!(json.get("pairId").is_none());

    let decoded: Node = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.pair_id, None);
}

#[test]
fn missing_duration_defaults_to_zero_on_load() {
    let id = Uuid::new_v4();
    let raw = format!(
        r#"{{"id":"{id}","content":"legacy","dt":"2024-01-01T09:00:00Z"}}"#
    );

    let decoded: Node = serde_json::from_str(&raw).unwrap();
    assert_eq!(decoded.duration, 0);
    assert_eq!(decoded.pair_id, None);
}

#[test]
fn snapshot_round_trip_preserves_both_chains_structurally() {
    let mut chains = ChainStore::new();
    chains.add_node(
        NodeDraft {
            content: "paired".to_string(),
            dt: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            duration: 60,
        },
        true,
    );
    chains.add_node(
        NodeDraft {
            content: "solo".to_string(),
            dt: Utc.with_ymd_and_hms(2024, 1, 2, 10, 30, 0).unwrap(),
            duration: 0,
        },
        false,
    );

    let snapshot = chains.snapshot();
    let raw = serde_json::to_string(&snapshot).unwrap();
    let decoded: Snapshot = serde_json::from_str(&raw).unwrap();

    assert_eq!(decoded, snapshot);
    assert_eq!(ChainStore::from_snapshot(decoded), chains);
}

#[test]
fn snapshot_rejects_non_sequence_chains() {
    assert!(serde_json::from_str::<Snapshot>(r#"{"main": 5, "sub": []}"#).is_err());
    assert!(serde_json::from_str::<Snapshot>(r#"{"main": [], "sub": {"a": 1}}"#).is_err());
    assert!(serde_json::from_str::<Snapshot>("not json at all").is_err());
}
