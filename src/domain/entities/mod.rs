//! Domain entity definitions.

mod car;
mod filters;
mod pagination;
mod token;
mod user;

pub use car::{Car, CarId};
pub use filters::{CatalogFilters, PriceBounds, PriceRange, UnknownPriceRange};
pub use pagination::{Page, Pagination, visible_pages};
pub use token::AuthToken;
pub use user::UserProfile;
