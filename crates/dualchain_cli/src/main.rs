//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `dualchain_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use dualchain_core::{NodeInput, PersistenceConfig, ServiceConfig, TimelineService};

fn main() {
    println!("dualchain_core ping={}", dualchain_core::ping());
    println!("dualchain_core version={}", dualchain_core::core_version());

    // Exercise the full add path against a throwaway in-memory store.
    let Ok(store) = dualchain_core::open_snapshot_store(PersistenceConfig::LocalDbInMemory)
    else {
        eprintln!("dualchain_core smoke=failed stage=open_store");
        std::process::exit(1);
    };
    let mut service = TimelineService::new(store, ServiceConfig::default());
    service.load();

    let input = NodeInput::new("smoke check", "2024-01-01T09:00", Some(5));
    match service.add_node(&input, true) {
        Ok(outcome) => println!(
            "dualchain_core smoke=ok paired={} durable={}",
            outcome.added.main.is_some(),
            outcome.persisted.is_durable()
        ),
        Err(err) => {
            eprintln!("dualchain_core smoke=failed error={err}");
            std::process::exit(1);
        }
    }
}
