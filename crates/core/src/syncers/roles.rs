use std::sync::Arc;

use async_trait::async_trait;
use peoplegraph_common::pagination::PageToken;
use peoplegraph_domain::constants::{ROLE_ASSIGNED_ENTITLEMENT, USER_RESOURCE_TYPE};
use peoplegraph_domain::{Entitlement, Grant, Resource, ResourceId, ResourceType, Result};
use tracing::debug;

use super::{ListPage, ResourceSyncer};
use crate::mapping::{embedded_role_resource, role_resource, user_resource};
use crate::pagination::Cursor;
use crate::ports::PeopleDirectory;

/// Roles come from the organization catalog. Each offers a single
/// "assigned" entitlement, granted to every employee whose record names it.
pub struct RoleSyncer {
    directory: Arc<dyn PeopleDirectory>,
    organization_roles: Arc<[String]>,
}

impl RoleSyncer {
    pub fn new(directory: Arc<dyn PeopleDirectory>, organization_roles: Arc<[String]>) -> Self {
        Self { directory, organization_roles }
    }
}

#[async_trait]
impl ResourceSyncer for RoleSyncer {
    fn resource_type(&self) -> ResourceType {
        ResourceType::role()
    }

    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        _token: &PageToken,
    ) -> Result<ListPage<Resource>> {
        let items = self.organization_roles.iter().map(|name| role_resource(name)).collect();
        Ok(ListPage::complete(items))
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _token: &PageToken,
    ) -> Result<ListPage<Entitlement>> {
        let name = &resource.display_name;
        let assigned = Entitlement::permission(resource, ROLE_ASSIGNED_ENTITLEMENT)
            .with_grantable_to(&ResourceType::user())
            .with_description(format!("Zoho role {name}"))
            .with_display_name(format!("assigned role {name}"));

        Ok(ListPage::complete(vec![assigned]))
    }

    /// Walks the employee listing one page per call and grants "assigned"
    /// to each employee whose embedded role maps to this role.
    async fn grants(&self, resource: &Resource, token: &PageToken) -> Result<ListPage<Grant>> {
        let role_id = resource.id.resource.as_str();
        let cursor = Cursor::decode(token, USER_RESOURCE_TYPE)?;
        let page = self.directory.list_employees(token.size, cursor.page_token()).await?;
        let next_page_token = cursor.advance(&page.next_page_token)?;

        let mut grants = Vec::new();
        for employee in &page.records {
            let holds_role = embedded_role_resource(employee)
                .is_some_and(|embedded| embedded.id.resource == role_id);
            if !holds_role {
                continue;
            }

            let user = user_resource(employee, "");
            if user.id.resource.is_empty() {
                debug!(
                    employee_id = %employee.employee_id,
                    "Skipping role holder without platform id"
                );
                continue;
            }

            let user_id = user.id.resource.clone();
            grants.push(
                Grant::new(&resource.id, ROLE_ASSIGNED_ENTITLEMENT, user)
                    .with_external_id(format!("role-grant:{role_id}:{user_id}")),
            );
        }
        debug!(role_id, count = grants.len(), "Derived role assignment grants");

        Ok(ListPage { items: grants, next_page_token, annotations: page.annotations })
    }
}
