//! Test harnesses for integration testing.
//!
//! `TestHarness` runs the full router over an in-memory store and needs no
//! external services. `PostgresHarness` starts a shared Postgres container
//! once (testcontainers) and reuses it across tests.

use anyhow::{Context, Result};
use job_board::kernel::{BaseJobStore, MemoryJobStore, PostgresJobStore, ServerDeps};
use job_board::server::build_app;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use super::ApiClient;

fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Router + in-memory store. Each test gets a fresh, empty store.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let response = ctx.api().get("/jobs").await;
/// }
/// ```
pub struct TestHarness {
    /// Store handle - use this to inspect state behind the API.
    pub store: Arc<MemoryJobStore>,
    api: ApiClient,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        init_tracing();
        let store = Arc::new(MemoryJobStore::new());
        let deps = ServerDeps::new(store.clone());
        Self {
            store,
            api: ApiClient::new(build_app(deps)),
        }
    }

    /// Get an API client for this harness.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

/// Shared Postgres container that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        init_tracing();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Router + Postgres store on the shared container.
///
/// The jobs table is emptied on setup so tests can assert on full listings.
/// Tests using it must run with `--test-threads=1`.
pub struct PostgresHarness {
    pub db_pool: PgPool,
    pub store: Arc<PostgresJobStore>,
    api: ApiClient,
}

impl AsyncTestContext for PostgresHarness {
    async fn setup() -> Self {
        Self::new()
            .await
            .expect("Failed to create Postgres test harness")
    }
}

impl PostgresHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        sqlx::query("TRUNCATE jobs")
            .execute(&db_pool)
            .await
            .context("Failed to reset jobs table")?;

        let store = Arc::new(PostgresJobStore::new(db_pool.clone()));
        let deps = ServerDeps::new(store.clone() as Arc<dyn BaseJobStore>);

        Ok(Self {
            db_pool,
            store,
            api: ApiClient::new(build_app(deps)),
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
