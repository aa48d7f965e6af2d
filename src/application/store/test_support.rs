use std::sync::Arc;
use std::time::Duration;

use super::{MarketplaceStore, StorePorts, StoreSettings};
use crate::domain::entities::{AuthToken, Car, Page, Pagination, UserProfile};
use crate::domain::ports::mocks::{MockAuthPort, MockCatalogPort, MockFavoritesPort, MockTokenStorage};
use crate::domain::ports::AuthGrant;

pub const TOKEN: &str = "session-token";

pub fn profile() -> UserProfile {
    UserProfile::new("Ana", "ana@example.com")
}

pub fn grant(token: &str) -> AuthGrant {
    AuthGrant::new(AuthToken::new_unchecked(token), profile())
}

/// One result page whose cars are named after the page number.
pub fn page(current: u32, pages: u32) -> Page<Car> {
    let items = (1..=3)
        .map(|i| Car::new(format!("p{current}-{i}"), "Volvo", format!("V{i}0")))
        .collect();
    Page::new(items, Pagination::new(current, pages, u64::from(pages) * 3))
}

pub struct Harness {
    pub store: MarketplaceStore,
    pub catalog: Arc<MockCatalogPort>,
    pub favorites: Arc<MockFavoritesPort>,
    pub storage: Arc<MockTokenStorage>,
}

impl Harness {
    pub fn build(auth: MockAuthPort, storage: MockTokenStorage, favorites: MockFavoritesPort) -> Self {
        let catalog = Arc::new(MockCatalogPort::new());
        let favorites = Arc::new(favorites);
        let storage = Arc::new(storage);
        let store = MarketplaceStore::new(
            StorePorts {
                auth: Arc::new(auth),
                catalog: catalog.clone(),
                favorites: favorites.clone(),
                tokens: storage.clone(),
            },
            StoreSettings {
                featured_limit: 6,
                notification_duration: Duration::from_millis(3000),
            },
        );

        Self {
            store,
            catalog,
            favorites,
            storage,
        }
    }

    /// Anonymous store with empty backends.
    pub fn with_auth(auth: MockAuthPort) -> Self {
        Self::build(auth, MockTokenStorage::new(), MockFavoritesPort::new())
    }

    pub fn anonymous() -> Self {
        Self::with_auth(MockAuthPort::new())
    }

    /// Store whose stored token was confirmed and favorites loaded.
    pub async fn logged_in(saved: Vec<Car>) -> Self {
        let mut auth = MockAuthPort::new();
        auth.expect_fetch_profile().returning(|_| Ok(profile()));
        let storage = MockTokenStorage::with_token(AuthToken::new_unchecked(TOKEN));
        let harness = Self::build(auth, storage, MockFavoritesPort::with_favorites(saved));

        harness.store.check_auth().await;
        assert!(harness.store.is_logged_in());
        harness
    }
}
