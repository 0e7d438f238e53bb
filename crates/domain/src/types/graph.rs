//! Governance graph model: typed resources, entitlements and grants.
//!
//! These values are request-scoped. They are recomputed on every listing or
//! grants call and never persisted.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEPARTMENT_RESOURCE_TYPE, ROLE_RESOURCE_TYPE, USER_RESOURCE_TYPE};

/// Free-form profile attributes attached to a resource trait
pub type Profile = BTreeMap<String, serde_json::Value>;

// ============================================================================
// Resource types
// ============================================================================

/// Shape a resource kind takes in the governance engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTrait {
    User,
    Group,
    Role,
}

/// Resource kind advertised to the host engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    pub id: String,
    pub display_name: String,
    pub traits: Vec<ResourceTrait>,
}

impl ResourceType {
    #[must_use]
    pub fn user() -> Self {
        Self {
            id: USER_RESOURCE_TYPE.to_string(),
            display_name: "User".to_string(),
            traits: vec![ResourceTrait::User],
        }
    }

    #[must_use]
    pub fn department() -> Self {
        Self {
            id: DEPARTMENT_RESOURCE_TYPE.to_string(),
            display_name: "Department".to_string(),
            traits: vec![ResourceTrait::Group],
        }
    }

    #[must_use]
    pub fn role() -> Self {
        Self {
            id: ROLE_RESOURCE_TYPE.to_string(),
            display_name: "Role".to_string(),
            traits: vec![ResourceTrait::Role],
        }
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Typed identifier of a graph node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    pub resource_type: String,
    pub resource: String,
}

impl ResourceId {
    #[must_use]
    pub fn new(resource_type: impl Into<String>, resource: impl Into<String>) -> Self {
        Self { resource_type: resource_type.into(), resource: resource.into() }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Unspecified,
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTrait {
    pub profile: Profile,
    pub status: UserStatus,
    pub login: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupTrait {
    pub profile: Profile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleTrait {
    pub profile: Profile,
}

/// Trait payload of a resource; exactly one per node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceTraits {
    User(UserTrait),
    Group(GroupTrait),
    Role(RoleTrait),
}

/// Graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_resource_id: Option<ResourceId>,
    pub traits: ResourceTraits,
}

impl Resource {
    /// Profile of whichever trait the resource carries
    #[must_use]
    pub fn profile(&self) -> &Profile {
        match &self.traits {
            ResourceTraits::User(t) => &t.profile,
            ResourceTraits::Group(t) => &t.profile,
            ResourceTraits::Role(t) => &t.profile,
        }
    }

    #[must_use]
    pub fn user_trait(&self) -> Option<&UserTrait> {
        match &self.traits {
            ResourceTraits::User(t) => Some(t),
            _ => None,
        }
    }

    /// Convenience lookup of a string profile attribute
    #[must_use]
    pub fn profile_str(&self, key: &str) -> Option<&str> {
        self.profile().get(key).and_then(serde_json::Value::as_str)
    }
}

// ============================================================================
// Entitlements and grants
// ============================================================================

fn entitlement_id(resource: &ResourceId, slug: &str) -> String {
    format!("{}:{}:{}", resource.resource_type, resource.resource, slug)
}

/// Grantable permission template attached to a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    pub id: String,
    pub resource: Resource,
    pub slug: String,
    pub display_name: String,
    pub description: String,
    /// Resource kinds this entitlement may be granted to
    pub grantable_to: Vec<String>,
}

impl Entitlement {
    /// Permission entitlement `slug` on `resource`
    #[must_use]
    pub fn permission(resource: &Resource, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id: entitlement_id(&resource.id, &slug),
            resource: resource.clone(),
            display_name: slug.clone(),
            slug,
            description: String::new(),
            grantable_to: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_grantable_to(mut self, resource_type: &ResourceType) -> Self {
        self.grantable_to.push(resource_type.id.clone());
        self
    }
}

/// Reference to an entitlement by resource and slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementRef {
    pub id: String,
    pub resource_id: ResourceId,
    pub slug: String,
}

impl EntitlementRef {
    #[must_use]
    pub fn new(resource_id: &ResourceId, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self { id: entitlement_id(resource_id, &slug), resource_id: resource_id.clone(), slug }
    }
}

/// Edge asserting that `principal` holds `entitlement`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    pub id: String,
    pub entitlement: EntitlementRef,
    pub principal: Resource,
    #[serde(default, skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

impl Grant {
    /// Edge `resource --slug--> principal`
    #[must_use]
    pub fn new(resource_id: &ResourceId, slug: impl Into<String>, principal: Resource) -> Self {
        let entitlement = EntitlementRef::new(resource_id, slug);
        let id = format!("{}:{}", entitlement.id, principal.id);
        Self { id, entitlement, principal, annotations: Annotations::default() }
    }

    /// Attach a stable external identifier used for deduplication
    #[must_use]
    pub fn with_external_id(mut self, id: impl Into<String>) -> Self {
        self.annotations.push(Annotation::ExternalId { id: id.into() });
        self
    }

    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.annotations.external_id()
    }
}

// ============================================================================
// Annotations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitStatus {
    Unspecified,
    Ok,
    Overlimit,
}

/// Quota signals read from a response's headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitDescription {
    pub status: RateLimitStatus,
    pub limit: i64,
    pub remaining: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    RateLimit(RateLimitDescription),
    ExternalId { id: String },
}

/// Side-channel metadata returned alongside a result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    /// Record rate-limit data, replacing any earlier description
    pub fn with_rate_limit(&mut self, description: RateLimitDescription) {
        self.0.retain(|a| !matches!(a, Annotation::RateLimit(_)));
        self.0.push(Annotation::RateLimit(description));
    }

    #[must_use]
    pub fn rate_limit(&self) -> Option<&RateLimitDescription> {
        self.0.iter().find_map(|a| match a {
            Annotation::RateLimit(desc) => Some(desc),
            Annotation::ExternalId { .. } => None,
        })
    }

    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.0.iter().find_map(|a| match a {
            Annotation::ExternalId { id } => Some(id.as_str()),
            Annotation::RateLimit(_) => None,
        })
    }

    /// Merge another set, later rate-limit data winning
    pub fn merge(&mut self, other: Annotations) {
        for annotation in other.0 {
            match annotation {
                Annotation::RateLimit(desc) => self.with_rate_limit(desc),
                other => self.0.push(other),
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }
}
