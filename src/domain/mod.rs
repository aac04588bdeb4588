//! Account-agnostic domain types and the selection core.

pub mod error;
pub mod id;
pub mod plan;
pub mod policy;
pub mod record;
pub mod selection;

pub use error::DomainError;
pub use id::{Did, RecordUri};
pub use plan::DeletionPlan;
pub use policy::RetentionPolicy;
pub use record::{Like, Post};
pub use selection::build_plan;
