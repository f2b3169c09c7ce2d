//! In-process superadmin organization selection with expiry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use crate::common::OrganizationId;
use crate::kernel::BaseOrganizationSelection;

pub struct InMemoryOrganizationSelection {
    ttl: Duration,
    entries: RwLock<HashMap<String, (OrganizationId, Instant)>>,
}

impl InMemoryOrganizationSelection {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl BaseOrganizationSelection for InMemoryOrganizationSelection {
    async fn selected(&self, staff_id: &str) -> Option<OrganizationId> {
        let entries = self.entries.read().await;
        entries
            .get(staff_id)
            .filter(|(_, selected_at)| selected_at.elapsed() < self.ttl)
            .map(|(organization_id, _)| *organization_id)
    }

    async fn select(&self, staff_id: &str, organization_id: OrganizationId) {
        debug!(staff_id = %staff_id, organization_id = %organization_id, "Organization selected");

        let mut entries = self.entries.write().await;
        // Drop stale selections while holding the write lock anyway
        entries.retain(|_, (_, selected_at)| selected_at.elapsed() < self.ttl);
        entries.insert(staff_id.to_string(), (organization_id, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_select_and_read_back() {
        let selection = InMemoryOrganizationSelection::new(Duration::from_secs(60));
        assert_eq!(selection.selected("root").await, None);

        selection.select("root", OrganizationId::new(5)).await;
        selection.select("root", OrganizationId::new(6)).await;

        assert_eq!(selection.selected("root").await, Some(OrganizationId::new(6)));
        assert_eq!(selection.selected("other").await, None);
    }

    #[tokio::test]
    async fn test_selection_expires() {
        let selection = InMemoryOrganizationSelection::new(Duration::ZERO);
        selection.select("root", OrganizationId::new(5)).await;

        assert_eq!(selection.selected("root").await, None);
    }
}
