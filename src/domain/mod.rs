//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Toast notification entity.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Navigation state.
pub mod view;

pub use entities::{AuthToken, Car, CarId, CatalogFilters, Page, Pagination, PriceRange, UserProfile};
pub use errors::ApiError;
pub use notification::{Notification, NotificationId, NotificationKind};
pub use ports::{AuthPort, CatalogPort, FavoritesPort, TokenStoragePort};
pub use view::{ModalKind, View};
