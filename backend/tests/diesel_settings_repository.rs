//! `DieselSettingsRepository` against embedded PostgreSQL.

// Seed helpers are shared across suites; not every suite uses all of them.
#[allow(dead_code)]
mod support;

use electives::domain::ports::EnrollmentSettingsRepository;
use electives::outbound::persistence::DieselSettingsRepository;
use rstest::{fixture, rstest};

use support::Harness;
use support::cluster_skip::handle_cluster_setup_failure;

#[derive(diesel::QueryableByName)]
struct RowCount {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

fn settings_rows(harness: &Harness) -> i64 {
    use diesel::RunQueryDsl;

    let mut conn = harness.connection();
    diesel::sql_query("SELECT COUNT(*) AS count FROM settings")
        .get_result::<RowCount>(&mut conn)
        .expect("count settings rows")
        .count
}

#[fixture]
fn settings() -> Option<(Harness, DieselSettingsRepository)> {
    match Harness::start() {
        Ok(harness) => {
            let repository = DieselSettingsRepository::new(harness.pool());
            Some((harness, repository))
        }
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn missing_row_reads_as_closed(settings: Option<(Harness, DieselSettingsRepository)>) {
    let Some((harness, repository)) = settings else {
        eprintln!("SKIP-TEST-CLUSTER: missing_row_reads_as_closed skipped");
        return;
    };
    assert_eq!(settings_rows(&harness), 0);
    let open = harness
        .block_on(repository.is_enrollment_open())
        .expect("read flag");
    assert!(!open);
}

#[rstest]
fn first_write_creates_the_row_and_later_writes_update_it(
    settings: Option<(Harness, DieselSettingsRepository)>,
) {
    let Some((harness, repository)) = settings else {
        eprintln!(
            "SKIP-TEST-CLUSTER: first_write_creates_the_row_and_later_writes_update_it skipped"
        );
        return;
    };

    harness
        .block_on(repository.set_enrollment_open(true))
        .expect("open enrollment");
    assert_eq!(settings_rows(&harness), 1);
    assert!(
        harness
            .block_on(repository.is_enrollment_open())
            .expect("read flag")
    );

    harness
        .block_on(repository.set_enrollment_open(false))
        .expect("close enrollment");
    assert_eq!(settings_rows(&harness), 1);
    assert!(
        !harness
            .block_on(repository.is_enrollment_open())
            .expect("read flag")
    );
}
