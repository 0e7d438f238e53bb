//! Port interfaces implemented by the infrastructure layer

use async_trait::async_trait;
use peoplegraph_domain::{Annotations, Department, Employee, Result};

/// Source of bearer credentials for API calls.
///
/// Implementations must be safe to call concurrently and repeatedly; caching
/// and refreshing are their concern.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Current access token
    async fn access_token(&self) -> Result<String>;
}

/// One page of a listing call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    /// Offset of the next page; empty when the collection is exhausted
    pub next_page_token: String,
    pub annotations: Annotations,
}

/// Result of a by-id lookup; an unknown id yields no records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lookup<T> {
    pub records: Vec<T>,
    pub annotations: Annotations,
}

/// Read-only access to the HR platform's employee and department forms.
///
/// Every call performs exactly one round trip and never retries.
#[async_trait]
pub trait PeopleDirectory: Send + Sync {
    /// List employees starting at `page_token` (empty for the first page)
    async fn list_employees(&self, page_size: u32, page_token: &str) -> Result<Page<Employee>>;

    /// List departments starting at `page_token` (empty for the first page)
    async fn list_departments(&self, page_size: u32, page_token: &str)
        -> Result<Page<Department>>;

    /// Fetch a single employee by record id
    async fn get_employee_by_id(&self, id: &str) -> Result<Lookup<Employee>>;

    /// Fetch a single department by record id
    async fn get_department_by_id(&self, id: &str) -> Result<Lookup<Department>>;
}
