//! Domain types and models
//!
//! - [`people`]: HR records and response envelopes from the forms API
//! - [`graph`]: resources, entitlements and grants handed to the governance engine

pub mod graph;
pub mod people;

pub use graph::{
    Annotation, Annotations, Entitlement, EntitlementRef, Grant, GroupTrait, Profile,
    RateLimitDescription, RateLimitStatus, Resource, ResourceId, ResourceTrait, ResourceTraits,
    ResourceType, RoleTrait, UserStatus, UserTrait,
};
pub use people::{
    AddressParts, Department, EducationDetail, Employee, LookupEnvelope, PagedEnvelope,
    TabularSections, WorkExperience,
};
