use std::sync::Arc;

use async_trait::async_trait;
use peoplegraph_common::pagination::PageToken;
use peoplegraph_domain::constants::{DEPARTMENT_RESOURCE_TYPE, USER_RESOURCE_TYPE};
use peoplegraph_domain::{Entitlement, Grant, Resource, ResourceId, ResourceType, Result};
use tracing::debug;

use super::{ListPage, ResourceSyncer};
use crate::mapping::user_resource;
use crate::pagination::Cursor;
use crate::ports::PeopleDirectory;

/// Users are the leaves of the grant direction: they have no entitlements,
/// and their grants are the role they hold in their own department.
pub struct UserSyncer {
    directory: Arc<dyn PeopleDirectory>,
}

impl UserSyncer {
    pub fn new(directory: Arc<dyn PeopleDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> ResourceType {
        ResourceType::user()
    }

    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> Result<ListPage<Resource>> {
        let cursor = Cursor::decode(token, USER_RESOURCE_TYPE)?;
        let page = self.directory.list_employees(token.size, cursor.page_token()).await?;
        let next_page_token = cursor.advance(&page.next_page_token)?;

        let items: Vec<Resource> =
            page.records.iter().map(|employee| user_resource(employee, "")).collect();
        debug!(count = items.len(), has_more = !next_page_token.is_empty(), "Listed users");

        Ok(ListPage { items, next_page_token, annotations: page.annotations })
    }

    async fn entitlements(
        &self,
        _resource: &Resource,
        _token: &PageToken,
    ) -> Result<ListPage<Entitlement>> {
        Ok(ListPage::default())
    }

    async fn grants(&self, resource: &Resource, _token: &PageToken) -> Result<ListPage<Grant>> {
        let user_id = resource.id.resource.as_str();
        let lookup = self.directory.get_employee_by_id(user_id).await?;

        let grants: Vec<Grant> = lookup
            .records
            .iter()
            .filter(|employee| !employee.role.is_empty())
            .map(|employee| {
                let department = ResourceId::new(DEPARTMENT_RESOURCE_TYPE, &employee.department_id);
                Grant::new(&department, &employee.role, user_resource(employee, user_id))
                    .with_external_id(format!(
                        "department-grant:{}:{}:{}",
                        employee.department_id, user_id, employee.role
                    ))
            })
            .collect();
        debug!(user_id, count = grants.len(), "Derived user department grants");

        Ok(ListPage::complete(grants).with_annotations(lookup.annotations))
    }
}
