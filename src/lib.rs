pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod gateway;
pub mod utils;

pub use adapters::{AltinnClient, OrgDirectoryClient, TermsStoreClient};
pub use config::{toml_config::TomlConfig, ServerConfig};
pub use core::engine::ResolutionEngine;
pub use domain::model::{OrgNumber, ResolutionResult, Version};
pub use domain::ports::{AcceptanceStore, NameDirectory, RoleRegistry};
pub use gateway::{router, AppState};
pub use utils::error::{Result, TermsError};
