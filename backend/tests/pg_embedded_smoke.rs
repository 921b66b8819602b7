//! Optional embedded Postgres smoke test gated by RUN_PG_EMBEDDED.
//! Use `cargo test -- --ignored` with `RUN_PG_EMBEDDED=1` to run it.

use pg_embedded_setup_unpriv::TestCluster;
use shop_backend::outbound::persistence::{revert_all_migrations, run_pending_migrations};

/// Migrations apply and revert cleanly on a fresh cluster.
#[test]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn migrations_apply_and_revert() {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() != Ok("1") {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return;
    }

    let cluster = TestCluster::new().expect("embedded Postgres should start");
    let database = cluster
        .temporary_database("shop_smoke")
        .expect("temporary database");

    let applied = run_pending_migrations(database.url()).expect("migrate");
    assert_eq!(applied.len(), 3);
    assert!(
        run_pending_migrations(database.url())
            .expect("re-run")
            .is_empty()
    );

    let reverted = revert_all_migrations(database.url()).expect("reset");
    assert_eq!(reverted.len(), 3);
    let reapplied = run_pending_migrations(database.url()).expect("migrate after reset");
    assert_eq!(reapplied.len(), 3);
}
