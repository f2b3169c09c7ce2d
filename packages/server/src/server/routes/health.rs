//! Readiness of the registry
//!
//! Reports whether the registry tables answer and whether member tokens can
//! be minted. Unauthenticated.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use std::time::Duration;

use crate::common::MemberNo;
use crate::domains::organization::OrganizationPolicy;
use crate::kernel::ServerDeps;
use crate::server::app::AppState;

/// Upper bound on the registry probe
const REGISTRY_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Member number used to exercise the token codec; never stored
const CODEC_PROBE_MEMBER_NO: &str = "0000";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    registry: RegistryHealth,
    tokens: CheckResult,
}

#[derive(Debug, Serialize)]
pub struct RegistryHealth {
    #[serde(flatten)]
    check: CheckResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    configured_organizations: Option<i64>,
    pool_size: u32,
    idle_connections: usize,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CheckResult {
    fn ok() -> Self {
        Self {
            status: "ok",
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            status: "error",
            error: Some(error.into()),
        }
    }

    fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

async fn check_registry(deps: &ServerDeps) -> RegistryHealth {
    let probe = tokio::time::timeout(
        REGISTRY_PROBE_TIMEOUT,
        OrganizationPolicy::count_configured(&deps.db_pool),
    )
    .await;

    let (check, configured_organizations) = match probe {
        Ok(Ok(count)) => (CheckResult::ok(), Some(count)),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "registry probe failed");
            (CheckResult::failed(format!("query failed: {}", e)), None)
        }
        Err(_) => (
            CheckResult::failed(format!(
                "query timeout (>{}s)",
                REGISTRY_PROBE_TIMEOUT.as_secs()
            )),
            None,
        ),
    };

    RegistryHealth {
        check,
        configured_organizations,
        pool_size: deps.db_pool.size(),
        idle_connections: deps.db_pool.num_idle(),
    }
}

fn check_tokens(deps: &ServerDeps) -> CheckResult {
    let member_no = MemberNo::from(CODEC_PROBE_MEMBER_NO);
    let round_trip = deps
        .codec
        .encode(&member_no)
        .and_then(|token| deps.codec.decode(&token));

    match round_trip {
        Ok(decoded) if decoded == member_no => CheckResult::ok(),
        Ok(_) => CheckResult::failed("token round trip changed the member number"),
        Err(e) => {
            tracing::warn!(error = %e, "token codec probe failed");
            CheckResult::failed(e.to_string())
        }
    }
}

/// GET /health
///
/// 200 when the registry answers and tokens round-trip, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let registry = check_registry(&state.deps).await;
    let tokens = check_tokens(&state.deps);

    let healthy = registry.check.is_ok() && tokens.is_ok();
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" },
            registry,
            tokens,
        }),
    )
}
