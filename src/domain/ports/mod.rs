mod auth_port;
mod catalog_port;
mod favorites_port;
mod token_storage_port;

pub use auth_port::{AuthGrant, AuthPort, Credentials, Registration};
pub use catalog_port::{CarQuery, CatalogPort};
pub use favorites_port::FavoritesPort;
pub use token_storage_port::TokenStoragePort;
