//! Integration tests for `DieselEmailLogRepository` against embedded PostgreSQL.
//!
//! Each test gets a fresh database with the embedded migrations applied, so
//! the schema, its CHECK constraint and the conditional first-open update are
//! all exercised against a real server.

use chrono::{DateTime, Duration, TimeZone, Utc};
use open_tracker::domain::ports::{EmailLogRepository, EmailLogRepositoryError};
use open_tracker::domain::{EmailAddress, EmailLog, OpenEvent, TrackingId};
use open_tracker::outbound::persistence::{
    DbPool, DieselEmailLogRepository, PoolConfig, run_pending_migrations,
};
use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use postgres::error::SqlState;
use postgres::{Client, NoTls};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

mod support;

use support::pg_embed::test_cluster;
use support::{format_postgres_error, handle_cluster_setup_failure};

struct TestContext {
    runtime: Runtime,
    repository: DieselEmailLogRepository,
    database_url: String,
    migrations_applied: usize,
    _database: TemporaryDatabase,
    _cluster: TestCluster,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let db_name = format!("email_logs_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(db_name.as_str())
        .map_err(|err| format!("{err:?}"))?;
    let database_url = database.url().to_owned();

    let migrations_applied = runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database_url.as_str()).with_max_size(2);
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselEmailLogRepository::new(pool),
        database_url,
        migrations_applied,
        _database: database,
        _cluster: cluster,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

/// Whole seconds, so values survive PostgreSQL's microsecond precision.
fn timestamp(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0)
        .single()
        .expect("valid timestamp")
}

fn sent_log() -> EmailLog {
    EmailLog::new(
        TrackingId::generate(),
        EmailAddress::new("a@example.com").expect("valid address"),
        timestamp(0),
    )
}

fn open_event(minute: u32, ip: &str) -> OpenEvent {
    OpenEvent {
        opened_at: timestamp(minute),
        ip: ip.to_owned(),
    }
}

#[rstest]
fn migrations_apply_once(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: migrations_apply_once skipped");
        return;
    };

    assert!(context.migrations_applied > 0, "fresh database is migrated");
    let rerun = context
        .runtime
        .block_on(run_pending_migrations(&context.database_url))
        .expect("re-running migrations succeeds");
    assert_eq!(rerun, 0, "nothing left to apply");
}

#[rstest]
fn insert_then_find_returns_the_unopened_record(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: insert_then_find_returns_the_unopened_record skipped");
        return;
    };
    let repository = context.repository.clone();
    let log = sent_log();

    let found = context
        .runtime
        .block_on(async {
            repository.insert(&log).await?;
            repository.find_by_tracking_id(&log.tracking_id()).await
        })
        .expect("insert and find succeed")
        .expect("record exists");

    assert_eq!(found, log);
    assert!(!found.is_opened());
}

#[rstest]
fn first_open_wins(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: first_open_wins skipped");
        return;
    };
    let repository = context.repository.clone();
    let log = sent_log();
    let tracking_id = log.tracking_id();

    let (first, second, stored) = context
        .runtime
        .block_on(async {
            repository.insert(&log).await?;
            let first = repository
                .record_open(&tracking_id, &open_event(5, "1.2.3.4"))
                .await?;
            let second = repository
                .record_open(&tracking_id, &open_event(9, "9.9.9.9"))
                .await?;
            let stored = repository.find_by_tracking_id(&tracking_id).await?;
            Ok::<_, EmailLogRepositoryError>((first, second, stored))
        })
        .expect("repository calls succeed");

    assert!(first, "first fetch stamps the record");
    assert!(!second, "later fetches are ignored");
    let stored = stored.expect("record exists");
    assert_eq!(stored.opened_at(), Some(timestamp(5)));
    assert_eq!(stored.ip(), Some("1.2.3.4"));
}

#[rstest]
fn concurrent_opens_stamp_exactly_once(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_opens_stamp_exactly_once skipped");
        return;
    };
    let repository = context.repository.clone();
    let log = sent_log();
    let tracking_id = log.tracking_id();

    let outcomes = context
        .runtime
        .block_on(async {
            repository.insert(&log).await?;
            let first_event = open_event(5, "1.1.1.1");
            let second_event = open_event(5, "2.2.2.2");
            let (first, second) = tokio::join!(
                repository.record_open(&tracking_id, &first_event),
                repository.record_open(&tracking_id, &second_event),
            );
            Ok::<_, EmailLogRepositoryError>([first?, second?])
        })
        .expect("repository calls succeed");

    assert_eq!(outcomes.iter().filter(|won| **won).count(), 1);
}

#[rstest]
fn unknown_identifiers_are_neither_stamped_nor_found(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_identifiers_are_neither_stamped_nor_found skipped");
        return;
    };
    let repository = context.repository.clone();
    let tracking_id = TrackingId::generate();

    let (recorded, found) = context
        .runtime
        .block_on(async {
            let recorded = repository
                .record_open(&tracking_id, &open_event(1, "1.2.3.4"))
                .await?;
            let found = repository.find_by_tracking_id(&tracking_id).await?;
            Ok::<_, EmailLogRepositoryError>((recorded, found))
        })
        .expect("repository calls succeed");

    assert!(!recorded);
    assert!(found.is_none());
}

#[rstest]
fn duplicate_identifiers_are_query_errors(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_identifiers_are_query_errors skipped");
        return;
    };
    let repository = context.repository.clone();
    let log = sent_log();

    let error = context
        .runtime
        .block_on(async {
            repository.insert(&log).await?;
            repository.insert(&log).await
        })
        .expect_err("second insert violates the primary key");

    assert!(matches!(error, EmailLogRepositoryError::Query { .. }));
}

#[rstest]
fn schema_rejects_half_recorded_opens(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: schema_rejects_half_recorded_opens skipped");
        return;
    };

    let mut client = Client::connect(context.database_url.as_str(), NoTls)
        .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)));
    let error = client
        .execute(
            concat!(
                "INSERT INTO email_logs (tracking_id, email, sent_at, opened_at, ip) ",
                "VALUES ($1, 'a@example.com', now(), NULL, '1.2.3.4')"
            ),
            &[&Uuid::new_v4()],
        )
        .expect_err("ip without opened_at is rejected");

    assert_eq!(
        error.code(),
        Some(&SqlState::CHECK_VIOLATION),
        "{}",
        format_postgres_error(&error)
    );
}

#[rstest]
fn missing_schema_maps_to_query_error(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: missing_schema_maps_to_query_error skipped");
        return;
    };

    let mut client = Client::connect(context.database_url.as_str(), NoTls)
        .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)));
    client
        .batch_execute("DROP TABLE email_logs")
        .unwrap_or_else(|err| panic!("drop table: {}", format_postgres_error(&err)));

    let repository = context.repository.clone();
    let error = context
        .runtime
        .block_on(async { repository.find_by_tracking_id(&TrackingId::generate()).await })
        .expect_err("lookup fails without the table");

    assert!(matches!(error, EmailLogRepositoryError::Query { .. }));
}

#[rstest]
fn opened_records_read_back_with_both_fields(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: opened_records_read_back_with_both_fields skipped");
        return;
    };
    let repository = context.repository.clone();
    let log = sent_log();
    let tracking_id = log.tracking_id();
    let open = open_event(3, "");

    let stored = context
        .runtime
        .block_on(async {
            repository.insert(&log).await?;
            repository.record_open(&tracking_id, &open).await?;
            repository.find_by_tracking_id(&tracking_id).await
        })
        .expect("repository calls succeed")
        .expect("record exists");

    assert_eq!(stored, log.with_open(open));
    assert!(stored.opened_at().is_some_and(|at| at - timestamp(0) == Duration::minutes(3)));
}
