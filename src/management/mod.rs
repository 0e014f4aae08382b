mod auth;
mod registry;

pub use auth::TokenManager;
pub use registry::Registration;
pub use registry::RegistryError;
pub use registry::ServiceDirectory;
