use std::sync::Arc;

use async_trait::async_trait;
use peoplegraph_common::pagination::PageToken;
use peoplegraph_domain::constants::{DEPARTMENT_RESOURCE_TYPE, TEAM_LEAD_RELATION};
use peoplegraph_domain::{Entitlement, Grant, Resource, ResourceId, ResourceType, Result};
use tracing::debug;

use super::{ListPage, ResourceSyncer};
use crate::mapping::{department_resource, lead_user_resource};
use crate::pagination::Cursor;
use crate::ports::PeopleDirectory;

/// Departments map to groups. Each offers one entitlement per department
/// role and grants "Team Lead" to its lead.
pub struct DepartmentSyncer {
    directory: Arc<dyn PeopleDirectory>,
    department_roles: Arc<[String]>,
}

impl DepartmentSyncer {
    pub fn new(directory: Arc<dyn PeopleDirectory>, department_roles: Arc<[String]>) -> Self {
        Self { directory, department_roles }
    }
}

#[async_trait]
impl ResourceSyncer for DepartmentSyncer {
    fn resource_type(&self) -> ResourceType {
        ResourceType::department()
    }

    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> Result<ListPage<Resource>> {
        let cursor = Cursor::decode(token, DEPARTMENT_RESOURCE_TYPE)?;
        let page = self.directory.list_departments(token.size, cursor.page_token()).await?;
        let next_page_token = cursor.advance(&page.next_page_token)?;

        let items: Vec<Resource> = page.records.iter().map(department_resource).collect();
        debug!(count = items.len(), has_more = !next_page_token.is_empty(), "Listed departments");

        Ok(ListPage { items, next_page_token, annotations: page.annotations })
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _token: &PageToken,
    ) -> Result<ListPage<Entitlement>> {
        let user_type = ResourceType::user();
        let name = &resource.display_name;

        let entitlements = self
            .department_roles
            .iter()
            .map(|role| {
                Entitlement::permission(resource, role.as_str())
                    .with_grantable_to(&user_type)
                    .with_description(format!("Zoho role {role} for department {name}"))
                    .with_display_name(format!("{name} Department {role}"))
            })
            .collect();

        Ok(ListPage::complete(entitlements))
    }

    async fn grants(&self, resource: &Resource, _token: &PageToken) -> Result<ListPage<Grant>> {
        let department_id = resource.id.resource.as_str();
        let lookup = self.directory.get_department_by_id(department_id).await?;

        let grants: Vec<Grant> = lookup
            .records
            .iter()
            .filter_map(|department| {
                let lead_id = department.lead_id()?;
                let lead = lead_user_resource(department);
                let grant = Grant::new(&resource.id, TEAM_LEAD_RELATION, lead).with_external_id(
                    format!("department-grant:{department_id}:{lead_id}:{TEAM_LEAD_RELATION}"),
                );
                Some(grant)
            })
            .collect();
        debug!(department_id, count = grants.len(), "Derived department lead grants");

        Ok(ListPage::complete(grants).with_annotations(lookup.annotations))
    }
}
