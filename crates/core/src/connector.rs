//! Connector facade driven by the host governance engine

use std::sync::Arc;

use peoplegraph_domain::constants::MAX_PAGE_SIZE;
use peoplegraph_domain::{Annotations, PeopleGraphError, ResourceType, Result, RoleCatalogs};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::hierarchy::DepartmentHierarchy;
use crate::ports::PeopleDirectory;
use crate::syncers::{DepartmentSyncer, ResourceSyncer, RoleSyncer, UserSyncer};

/// Descriptive metadata shown by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
}

/// Entry point wiring the directory and role catalogs into syncers
pub struct PeopleConnector {
    directory: Arc<dyn PeopleDirectory>,
    department_roles: Arc<[String]>,
    organization_roles: Arc<[String]>,
}

impl PeopleConnector {
    /// Connector over `directory` with the injected role catalogs
    pub fn new(directory: Arc<dyn PeopleDirectory>, roles: RoleCatalogs) -> Self {
        Self {
            directory,
            department_roles: roles.department_roles.into(),
            organization_roles: roles.organization_roles.into(),
        }
    }

    #[must_use]
    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: "Zoho People".to_string(),
            description: "Syncs employees, departments and roles from Zoho People".to_string(),
        }
    }

    /// Probe the API with a one-record employee listing.
    ///
    /// # Errors
    /// Propagates the directory error unchanged.
    pub async fn validate(&self) -> Result<Annotations> {
        let page = self.directory.list_employees(1, "").await?;
        info!(records = page.records.len(), "Connector credentials validated");
        Ok(page.annotations)
    }

    #[must_use]
    pub fn resource_types(&self) -> Vec<ResourceType> {
        vec![ResourceType::user(), ResourceType::department(), ResourceType::role()]
    }

    /// One syncer per resource kind, in the order of [`Self::resource_types`]
    #[must_use]
    pub fn resource_syncers(&self) -> Vec<Arc<dyn ResourceSyncer>> {
        vec![
            Arc::new(UserSyncer::new(Arc::clone(&self.directory))),
            Arc::new(DepartmentSyncer::new(
                Arc::clone(&self.directory),
                Arc::clone(&self.department_roles),
            )),
            Arc::new(RoleSyncer::new(
                Arc::clone(&self.directory),
                Arc::clone(&self.organization_roles),
            )),
        ]
    }

    /// Syncer for a resource kind id, if the connector knows it
    #[must_use]
    pub fn syncer(&self, resource_type_id: &str) -> Option<Arc<dyn ResourceSyncer>> {
        self.resource_syncers().into_iter().find(|s| s.resource_type().id == resource_type_id)
    }

    /// Fetch every department and build the parent hierarchy.
    ///
    /// Cycles are logged, not rejected; use
    /// [`DepartmentHierarchy::ancestors`] to walk safely.
    ///
    /// # Errors
    /// Propagates directory errors, and returns `PeopleGraphError::Pagination`
    /// if the API keeps returning the same offset.
    pub async fn department_hierarchy(&self) -> Result<DepartmentHierarchy> {
        let mut departments = Vec::new();
        let mut page_token = String::new();
        let mut pages = 0_u32;

        loop {
            let page = self.directory.list_departments(MAX_PAGE_SIZE, &page_token).await?;
            pages += 1;
            departments.extend(page.records);

            if page.next_page_token.is_empty() {
                break;
            }
            if !page_token.is_empty() && page.next_page_token == page_token {
                return Err(PeopleGraphError::Pagination(format!(
                    "department listing did not advance past offset '{page_token}'"
                )));
            }
            page_token = page.next_page_token;
        }

        let hierarchy = DepartmentHierarchy::from_departments(&departments);
        debug!(pages, departments = hierarchy.len(), "Built department hierarchy");

        for cycle in hierarchy.detect_cycles() {
            warn!(cycle = ?cycle, "Department parent links form a cycle");
        }

        Ok(hierarchy)
    }
}
