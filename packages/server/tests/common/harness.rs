//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests.
//! The container and migrations are initialized once on first test, then reused.
//! Tests isolate themselves by working in a fresh organization (see
//! `fixtures::unique_organization`).

use anyhow::{Context, Result};
use axum::Router;
use server_core::common::{OrganizationId, OrganizationScope, StaffRole};
use server_core::domains::auth::JwtService;
use server_core::kernel::test_dependencies::MockImageStorage;
use server_core::kernel::{AesGcmIdentifierCodec, InMemoryOrganizationSelection, ServerDeps};
use server_core::server::build_app;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Fixed 32-byte test key for member tokens
pub const TEST_TOKEN_KEY: &str =
    "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

pub const TEST_JWT_SECRET: &str = "test_secret";
pub const TEST_JWT_ISSUER: &str = "coop-server-test";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    /// Initialize shared infrastructure (container + migrations).
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
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

/// Test harness that manages test infrastructure.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let org = unique_organization();
///     let scope = ctx.scope(org);
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: PgPool,
    /// Dependencies wired the way the server wires them, with mock storage.
    pub deps: ServerDeps,
    pub image_storage: Arc<MockImageStorage>,
    pub jwt_service: Arc<JwtService>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
            .await
            .expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        Self::with_image_storage(MockImageStorage::new()).await
    }

    /// Harness whose image storage rejects every write
    pub async fn with_failing_storage() -> Result<Self> {
        Self::with_image_storage(MockImageStorage::failing()).await
    }

    async fn with_image_storage(storage: MockImageStorage) -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let image_storage = Arc::new(storage);
        let jwt_service = Arc::new(JwtService::new(
            TEST_JWT_SECRET,
            TEST_JWT_ISSUER.to_string(),
        ));

        let deps = ServerDeps::new(
            db_pool.clone(),
            Arc::new(AesGcmIdentifierCodec::from_hex(TEST_TOKEN_KEY)?),
            image_storage.clone(),
            Arc::new(InMemoryOrganizationSelection::new(Duration::from_secs(60))),
            jwt_service.clone(),
        );

        Ok(Self {
            db_pool,
            deps,
            image_storage,
            jwt_service,
        })
    }

    /// Scope of a staff member working in `organization_id`
    pub fn scope(&self, organization_id: OrganizationId) -> OrganizationScope {
        OrganizationScope::new(organization_id, "EMP-TEST")
    }

    /// Full HTTP router over this harness's dependencies
    pub fn app(&self) -> Router {
        build_app(self.deps.clone(), &[], 10)
    }

    /// Bearer token for a staff member of `organization_id`
    pub fn staff_token(&self, staff_id: &str, organization_id: OrganizationId) -> String {
        self.jwt_service
            .create_token(staff_id, organization_id, StaffRole::Staff)
            .expect("Failed to create staff token")
    }

    /// Bearer token for a superadmin (home organization is irrelevant)
    pub fn superadmin_token(&self, staff_id: &str) -> String {
        self.jwt_service
            .create_token(staff_id, OrganizationId::new(1), StaffRole::Superadmin)
            .expect("Failed to create superadmin token")
    }
}
