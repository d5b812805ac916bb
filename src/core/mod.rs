pub mod engine;

pub use crate::domain::model::{OrgNumber, ResolutionResult, Version};
pub use crate::domain::ports::{AcceptanceStore, NameDirectory, RoleRegistry};
pub use crate::utils::error::Result;
