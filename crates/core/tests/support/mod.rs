//! Shared test helpers for `peoplegraph-core` integration tests.
//!
//! Provides an in-memory `PeopleDirectory` and record fixtures so syncer
//! tests can focus on behaviour instead of HTTP plumbing.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use peoplegraph_core::ports::{Lookup, Page, PeopleDirectory};
use peoplegraph_domain::{
    Annotations, Department, Employee, PeopleGraphError, RateLimitDescription, RateLimitStatus,
    Result as DomainResult,
};

const MAX_PAGE: usize = 100;

/// In-memory mock for `PeopleDirectory`.
///
/// Pages follow the platform's offset rules: offsets are 1-based, an empty
/// token reads from offset 1 and yields next token "1", and a short page ends
/// the listing.
#[derive(Default, Clone)]
pub struct MockDirectory {
    employees: Arc<Vec<Employee>>,
    departments: Arc<Vec<Department>>,
    fail_with: Option<PeopleGraphError>,
    calls: Arc<AtomicUsize>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(mut self, employees: Vec<Employee>) -> Self {
        self.employees = Arc::new(employees);
        self
    }

    pub fn with_departments(mut self, departments: Vec<Department>) -> Self {
        self.departments = Arc::new(departments);
        self
    }

    /// Every call fails with `err`
    pub fn failing(mut self, err: PeopleGraphError) -> Self {
        self.fail_with = Some(err);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn page<T: Clone>(records: &[T], size: u32, token: &str) -> DomainResult<Page<T>> {
        let size = match size as usize {
            0 => MAX_PAGE,
            s if s > MAX_PAGE => MAX_PAGE,
            s => s,
        };
        let offset: usize = if token.is_empty() {
            1
        } else {
            token.parse().map_err(|_| PeopleGraphError::InvalidInput(token.to_string()))?
        };

        let start = offset.saturating_sub(1).min(records.len());
        let end = (start + size).min(records.len());
        let slice = records[start..end].to_vec();

        let next_page_token = if token.is_empty() {
            "1".to_string()
        } else if slice.len() < size {
            String::new()
        } else {
            (offset + size).to_string()
        };

        Ok(Page { records: slice, next_page_token, annotations: ok_annotations() })
    }
}

pub fn ok_annotations() -> Annotations {
    let mut annotations = Annotations::new();
    annotations.with_rate_limit(RateLimitDescription {
        status: RateLimitStatus::Ok,
        limit: 100,
        remaining: 99,
        reset_at: None,
    });
    annotations
}

#[async_trait]
impl PeopleDirectory for MockDirectory {
    async fn list_employees(
        &self,
        page_size: u32,
        page_token: &str,
    ) -> DomainResult<Page<Employee>> {
        self.record_call()?;
        Self::page(&self.employees, page_size, page_token)
    }

    async fn list_departments(
        &self,
        page_size: u32,
        page_token: &str,
    ) -> DomainResult<Page<Department>> {
        self.record_call()?;
        Self::page(&self.departments, page_size, page_token)
    }

    async fn get_employee_by_id(&self, id: &str) -> DomainResult<Lookup<Employee>> {
        self.record_call()?;
        let records = self
            .employees
            .iter()
            .filter(|e| e.zoho_id.to_string() == id || e.employee_id == id)
            .cloned()
            .collect();
        Ok(Lookup { records, annotations: ok_annotations() })
    }

    async fn get_department_by_id(&self, id: &str) -> DomainResult<Lookup<Department>> {
        self.record_call()?;
        let records =
            self.departments.iter().filter(|d| d.zoho_id.to_string() == id).cloned().collect();
        Ok(Lookup { records, annotations: ok_annotations() })
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn employee(
    zoho_id: i64,
    first: &str,
    last: &str,
    role: &str,
    department_id: &str,
) -> Employee {
    Employee {
        zoho_id,
        employee_id: format!("E{zoho_id}"),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email_id: format!("{}@example.com", first.to_lowercase()),
        role: role.to_string(),
        role_id: format!("rid-{}", role.to_lowercase()),
        department_id: department_id.to_string(),
        ..Employee::default()
    }
}

pub fn department(zoho_id: i64, name: &str, parent: &str, lead_id: &str) -> Department {
    Department {
        zoho_id,
        name: name.to_string(),
        mail_alias: format!("{}@example.com", name.to_lowercase()),
        parent_department_id: parent.to_string(),
        department_lead: if lead_id.is_empty() { String::new() } else { "Grace Hopper".into() },
        department_lead_id: lead_id.to_string(),
        department_lead_mail: if lead_id.is_empty() {
            String::new()
        } else {
            "grace@example.com".into()
        },
        ..Department::default()
    }
}

/// `count` employees numbered from 1, all in department 7
pub fn numbered_employees(count: i64) -> Vec<Employee> {
    (1..=count).map(|i| employee(i, &format!("First{i}"), "Last", "Team member", "7")).collect()
}
