//! Resource syncers: one per resource kind.
//!
//! The host engine lists resources of a kind, then asks for each resource's
//! entitlements and grants. Calls that touch the API return its rate-limit
//! annotation alongside the items.

mod departments;
mod roles;
mod users;

use async_trait::async_trait;
use peoplegraph_common::pagination::PageToken;
use peoplegraph_domain::{
    Annotations, Entitlement, Grant, Resource, ResourceId, ResourceType, Result,
};

pub use departments::DepartmentSyncer;
pub use roles::RoleSyncer;
pub use users::UserSyncer;

/// Items returned by a syncer call plus the continuation token
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Empty when there is nothing more to fetch
    pub next_page_token: String,
    pub annotations: Annotations,
}

impl<T> ListPage<T> {
    /// Single, final page
    #[must_use]
    pub fn complete(items: Vec<T>) -> Self {
        Self { items, next_page_token: String::new(), annotations: Annotations::default() }
    }

    /// Attach the annotations of the fetch that produced this page
    #[must_use]
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self::complete(Vec::new())
    }
}

/// Builder for one resource kind of the governance graph
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    /// Kind this syncer produces
    fn resource_type(&self) -> ResourceType;

    /// List resources of this kind
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> Result<ListPage<Resource>>;

    /// Entitlements offered by `resource`
    async fn entitlements(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> Result<ListPage<Entitlement>>;

    /// Grants of entitlements on (or held by) `resource`
    async fn grants(&self, resource: &Resource, token: &PageToken) -> Result<ListPage<Grant>>;
}
