//! Record mapping: HR records to graph resources.
//!
//! Every function here is pure. Department parent links are copied as-is;
//! ancestry walks go through [`crate::hierarchy::DepartmentHierarchy`].

use peoplegraph_domain::constants::{
    DEPARTMENT_RESOURCE_TYPE, ROLE_ID_PREFIX, ROLE_RESOURCE_TYPE, USER_RESOURCE_TYPE,
};
use peoplegraph_domain::{
    Department, Employee, GroupTrait, Profile, Resource, ResourceId, ResourceTraits, RoleTrait,
    UserStatus, UserTrait,
};
use serde_json::Value;

/// Canonical role resource id: `"role_"` + lowercase name, spaces as hyphens.
///
/// Used for both catalog roles and roles embedded on employee records.
#[must_use]
pub fn role_resource_id(role_name: &str) -> String {
    format!("{ROLE_ID_PREFIX}{}", role_name.to_lowercase().replace(' ', "-"))
}

fn insert_if_present(profile: &mut Profile, key: &str, value: &str) {
    if !value.is_empty() {
        profile.insert(key.to_string(), Value::from(value));
    }
}

fn login_for(email: &str, display_name: &str) -> String {
    if email.is_empty() { display_name.to_string() } else { email.to_string() }
}

/// Map an employee to a user resource.
///
/// The id is the platform id when non-zero, else `fallback_id` (the id the
/// record was looked up by, or empty when listing).
#[must_use]
pub fn user_resource(employee: &Employee, fallback_id: &str) -> Resource {
    let display_name = employee.display_name();
    let id = employee.platform_id().unwrap_or_else(|| fallback_id.to_string());

    let mut profile = Profile::new();
    profile.insert("employee_id".into(), Value::from(employee.employee_id.as_str()));
    profile.insert("first_name".into(), Value::from(employee.first_name.as_str()));
    profile.insert("last_name".into(), Value::from(employee.last_name.as_str()));
    profile.insert("email_id".into(), Value::from(employee.email_id.as_str()));
    profile.insert("zuid".into(), Value::from(employee.zuid.as_str()));
    insert_if_present(&mut profile, "designation", &employee.designation);
    insert_if_present(&mut profile, "department", &employee.department);
    insert_if_present(&mut profile, "reporting_to_id", &employee.reporting_to_id);
    insert_if_present(&mut profile, "employee_status", &employee.employee_status);

    Resource {
        id: ResourceId::new(USER_RESOURCE_TYPE, id),
        parent_resource_id: None,
        traits: ResourceTraits::User(UserTrait {
            profile,
            status: UserStatus::Enabled,
            login: login_for(&employee.email_id, &display_name),
        }),
        display_name,
    }
}

/// Synthetic user built from a department's lead fields.
///
/// Only used as the principal of the leadership grant; it is never merged
/// with the user resources produced by the listing.
#[must_use]
pub fn lead_user_resource(department: &Department) -> Resource {
    let mut profile = Profile::new();
    profile.insert("zoho_id".into(), Value::from(department.department_lead_id.as_str()));
    profile.insert("email".into(), Value::from(department.department_lead_mail.as_str()));

    Resource {
        id: ResourceId::new(USER_RESOURCE_TYPE, department.department_lead_id.as_str()),
        display_name: department.department_lead.clone(),
        parent_resource_id: None,
        traits: ResourceTraits::User(UserTrait {
            profile,
            status: UserStatus::Enabled,
            login: login_for(&department.department_lead_mail, &department.department_lead),
        }),
    }
}

/// Group resource for a department, parented to its parent department
#[must_use]
pub fn department_resource(department: &Department) -> Resource {
    let mut profile = Profile::new();
    profile.insert("department_id".into(), Value::from(department.zoho_id));
    profile.insert("department".into(), Value::from(department.name.as_str()));
    profile.insert("email".into(), Value::from(department.mail_alias.as_str()));

    Resource {
        id: ResourceId::new(DEPARTMENT_RESOURCE_TYPE, department.zoho_id.to_string()),
        display_name: department.name.clone(),
        parent_resource_id: department
            .parent_id()
            .map(|parent| ResourceId::new(DEPARTMENT_RESOURCE_TYPE, parent)),
        traits: ResourceTraits::Group(GroupTrait { profile }),
    }
}

/// Role resource for a catalog role name
#[must_use]
pub fn role_resource(role_name: &str) -> Resource {
    let mut profile = Profile::new();
    profile.insert("role_name".into(), Value::from(role_name));

    Resource {
        id: ResourceId::new(ROLE_RESOURCE_TYPE, role_resource_id(role_name)),
        display_name: role_name.to_string(),
        parent_resource_id: None,
        traits: ResourceTraits::Role(RoleTrait { profile }),
    }
}

/// Role resource for the role embedded on an employee record.
///
/// Keyed by the same slug as the catalog path; the raw `Role.ID` is kept in
/// the profile as `zoho_role_id`. `None` when the employee has no role.
#[must_use]
pub fn embedded_role_resource(employee: &Employee) -> Option<Resource> {
    if employee.role.is_empty() {
        return None;
    }

    let mut resource = role_resource(&employee.role);
    if let ResourceTraits::Role(role) = &mut resource.traits {
        insert_if_present(&mut role.profile, "zoho_role_id", &employee.role_id);
    }
    Some(resource)
}
