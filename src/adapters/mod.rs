// Adapters layer: concrete clients for the external systems the engine
// depends on (role registry, name directory, acceptance store).

pub mod altinn;
pub mod org_directory;
pub mod terms_store;

pub use altinn::AltinnClient;
pub use org_directory::OrgDirectoryClient;
pub use terms_store::TermsStoreClient;
