//! Domain constants
//!
//! Centralized location for the fixed values the connector relies on.

// API surface
pub const DEFAULT_API_BASE_URL: &str = "https://people.zoho.com/people/api/forms";
pub const TOKEN_URL_TEMPLATE: &str = "https://accounts.zoho.{suffix}/oauth/v2/token";
pub const DEFAULT_REDIRECT_URI: &str = "https://www.zoho.com";

pub const EMPLOYEE_RECORDS_PATH: &str = "/employee/getRecords";
pub const EMPLOYEE_BY_ID_PATH: &str = "/employee/getDataByID";
pub const DEPARTMENT_RECORDS_PATH: &str = "/department/getRecords";
pub const DEPARTMENT_BY_ID_PATH: &str = "/department/getDataByID";

// Paging
pub const MAX_PAGE_SIZE: u32 = 100;
pub const FIRST_PAGE_INDEX: &str = "1";

// HTTP
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const TOKEN_REFRESH_THRESHOLD_SECS: i64 = 60;

// Resource kinds
pub const USER_RESOURCE_TYPE: &str = "user";
pub const DEPARTMENT_RESOURCE_TYPE: &str = "department";
pub const ROLE_RESOURCE_TYPE: &str = "role";

// Relations and entitlement slugs
pub const TEAM_LEAD_RELATION: &str = "Team Lead";
pub const ROLE_ASSIGNED_ENTITLEMENT: &str = "assigned";
pub const ROLE_ID_PREFIX: &str = "role_";

/// Roles a user can hold inside a department.
pub const DEFAULT_DEPARTMENT_ROLES: [&str; 6] =
    ["Admin", "Team member", "Manager", "Director", "Team Incharge", "Team Lead"];

/// Organization-wide role catalog.
pub const DEFAULT_ORGANIZATION_ROLES: [&str; 5] =
    ["Admin", "Team Incharge", "Team member", "Manager", "Director"];

// Hierarchy walks stop after this many hops even without a detected cycle
pub const MAX_HIERARCHY_DEPTH: usize = 256;
