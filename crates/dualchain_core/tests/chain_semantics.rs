use chrono::{TimeZone, Utc};
use dualchain_core::{ChainStore, Lane, NodeDraft, NodeInput};

fn draft(content: &str, minute: u32, duration: u32) -> NodeDraft {
    NodeDraft {
        content: content.to_string(),
        dt: Utc.with_ymd_and_hms(2024, 1, 1, 9, minute, 0).unwrap(),
        duration,
    }
}

#[test]
fn add_without_mirror_grows_sub_only_and_stays_unpaired() {
    let mut chains = ChainStore::new();

    let added = chains.add_node(draft("solo entry", 0, 15), false);

    assert_eq!(chains.sub().len(), 1);
    assert!(chains.main().is_empty());
    assert!(added.main.is_none());
    assert_eq!(added.sub.pair_id, None);
    assert_eq!(chains.sub()[0], added.sub);
}

#[test]
fn add_with_mirror_pairs_both_new_nodes_symmetrically() {
    let mut chains = ChainStore::new();

    let added = chains.add_node(draft("paired entry", 5, 30), true);
    let main_node = added.main.expect("mirrored node expected");

    assert_eq!(chains.sub().len(), 1);
    assert_eq!(chains.main().len(), 1);
    assert_ne!(added.sub.id, main_node.id);
    assert_eq!(added.sub.pair_id, Some(main_node.id));
    assert_eq!(main_node.pair_id, Some(added.sub.id));
    assert_eq!(main_node.content, added.sub.content);
    assert_eq!(main_node.dt, added.sub.dt);
    assert_eq!(main_node.duration, added.sub.duration);
}

#[test]
fn add_with_mirror_leaves_existing_pairings_untouched() {
    let mut chains = ChainStore::new();
    let first = chains.add_node(draft("first", 0, 10), true);
    let first_main = first.main.unwrap();

    chains.add_node(draft("second", 10, 10), true);

    assert_eq!(chains.sub()[0].pair_id, Some(first_main.id));
    assert_eq!(chains.main()[0].pair_id, Some(first.sub.id));
}

#[test]
fn ids_are_unique_across_both_chains() {
    let mut chains = ChainStore::new();
    for minute in 0..10 {
        chains.add_node(draft("entry", minute, 0), minute % 2 == 0);
    }

    let mut ids: Vec<_> = chains
        .main()
        .iter()
        .chain(chains.sub().iter())
        .map(|node| node.id)
        .collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn destroy_main_clears_chain_and_cascades_pairing_reset() {
    let mut chains = ChainStore::new();
    chains.add_node(draft("paired a", 0, 10), true);
    chains.add_node(draft("unpaired", 5, 10), false);
    chains.add_node(draft("paired b", 10, 10), true);

    chains.destroy_chain(Lane::Main);

    assert!(chains.main().is_empty());
    assert_eq!(chains.sub().len(), 3);
    assert!(chains.sub().iter().all(|node| node.pair_id.is_none()));
    assert_eq!(chains.sub()[0].content, "paired a");
}

#[test]
fn destroy_main_on_pairing_free_state_only_empties_main() {
    let mut chains = ChainStore::new();
    chains.add_node(draft("left alone", 0, 0), false);

    chains.destroy_chain(Lane::Main);

    assert!(chains.main().is_empty());
    assert_eq!(chains.sub().len(), 1);
    assert_eq!(chains.sub()[0].content, "left alone");
    assert_eq!(chains.sub()[0].pair_id, None);
}

#[test]
fn destroy_sub_leaves_main_nodes_bit_for_bit_unchanged() {
    let mut chains = ChainStore::new();
    let added = chains.add_node(draft("paired", 0, 10), true);
    let main_before = chains.main().to_vec();

    chains.destroy_chain(Lane::Sub);

    assert!(chains.sub().is_empty());
    assert_eq!(chains.main(), main_before.as_slice());
    // The reference now dangles but is still stored.
    assert_eq!(chains.main()[0].pair_id, Some(added.sub.id));
}

#[test]
fn find_pair_resolves_both_directions() {
    let mut chains = ChainStore::new();
    let added = chains.add_node(draft("paired", 0, 10), true);

    let sub_node = &chains.sub()[0];
    let main_node = &chains.main()[0];

    assert_eq!(chains.find_pair(sub_node, Lane::Sub), Some(main_node));
    assert_eq!(chains.find_pair(main_node, Lane::Main), Some(sub_node));
    assert_eq!(added.sub.id, sub_node.id);
}

#[test]
fn find_pair_treats_unset_and_dangling_references_as_absent() {
    let mut chains = ChainStore::new();
    chains.add_node(draft("unpaired", 0, 10), false);
    chains.add_node(draft("paired", 5, 10), true);

    let unpaired = chains.sub()[0].clone();
    assert_eq!(chains.find_pair(&unpaired, Lane::Sub), None);

    chains.destroy_chain(Lane::Sub);
    let dangling_main = chains.main()[0].clone();
    assert!(dangling_main.is_paired());
    assert_eq!(chains.find_pair(&dangling_main, Lane::Main), None);
}

#[test]
fn kickoff_entry_mirrors_into_main_with_mutual_pairing() {
    let mut chains = ChainStore::new();
    let input = NodeInput::new("Kickoff", "2024-01-01T09:00", Some(60));

    let added = chains.add_node(input.validate().unwrap(), true);
    let main_node = added.main.unwrap();

    let sub_last = chains.sub().last().unwrap();
    let main_last = chains.main().last().unwrap();
    assert_eq!(sub_last.content, "Kickoff");
    assert_eq!(sub_last.duration, 60);
    assert_eq!(main_last.content, "Kickoff");
    assert_eq!(main_last.duration, 60);
    assert_eq!(sub_last.pair_id, Some(main_node.id));
    assert_eq!(main_last.pair_id, Some(added.sub.id));
}
