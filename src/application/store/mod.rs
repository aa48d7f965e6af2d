//! Client-side state store for the marketplace.
//!
//! [`MarketplaceStore`] owns the session, catalog, favorites and UI state and
//! exposes the operations a front end triggers on user input. Operations take
//! `&self` and never hold the state lock across an `.await`, so several of
//! them may be in flight at once. Remote failures never escape an operation;
//! they end up in a form error, a notification or the log.

mod catalog;
mod favorites;
mod session;
mod state;

#[cfg(test)]
mod test_support;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::application::dto::{LoginForm, SignupForm};
use crate::application::services::NotificationQueue;
use crate::application::use_cases::{RestoreSessionUseCase, SignInUseCase};
use crate::domain::notification::DEFAULT_NOTIFICATION_DURATION;
use crate::domain::{
    AuthPort, AuthToken, Car, CarId, CatalogFilters, CatalogPort, FavoritesPort, ModalKind,
    Notification, Pagination, TokenStoragePort, UserProfile, View,
};

pub use state::{CatalogState, FavoritesState, SessionState, UiState};
use state::StoreState;

/// Number of cars requested for the featured strip.
pub const DEFAULT_FEATURED_LIMIT: u32 = 6;

/// Tunables of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// Cars requested for the featured strip.
    pub featured_limit: u32,
    /// How long a notification stays visible.
    pub notification_duration: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            featured_limit: DEFAULT_FEATURED_LIMIT,
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }
}

/// Adapters the store talks to.
#[derive(Clone)]
pub struct StorePorts {
    /// Login, registration and profile lookups.
    pub auth: Arc<dyn AuthPort>,
    /// Car listings.
    pub catalog: Arc<dyn CatalogPort>,
    /// Saved cars of the signed-in user.
    pub favorites: Arc<dyn FavoritesPort>,
    /// Token persistence between runs.
    pub tokens: Arc<dyn TokenStoragePort>,
}

/// Point-in-time copy of everything a front end renders.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub struct StoreSnapshot {
    pub is_logged_in: bool,
    pub user: UserProfile,
    pub view: View,
    pub modal: Option<ModalKind>,
    pub filters: CatalogFilters,
    pub cars: Vec<Car>,
    pub featured_cars: Vec<Car>,
    pub pagination: Pagination,
    pub visible_pages: Vec<u32>,
    pub favorites: Vec<Car>,
    pub loading_cars: bool,
    pub loading_featured: bool,
    pub loading_favorites: bool,
    pub is_loading: bool,
    pub login_error: String,
    pub signup_error: String,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadingFlag {
    Auth,
    Cars,
    Featured,
    Favorites,
}

impl LoadingFlag {
    fn slot(self, state: &mut StoreState) -> &mut bool {
        match self {
            Self::Auth => &mut state.ui.is_loading,
            Self::Cars => &mut state.catalog.loading_cars,
            Self::Featured => &mut state.catalog.loading_featured,
            Self::Favorites => &mut state.favorites.loading,
        }
    }
}

/// Raises a loading flag and lowers it on drop, whatever the outcome.
struct LoadingGuard<'a> {
    state: &'a Mutex<StoreState>,
    flag: LoadingFlag,
}

impl<'a> LoadingGuard<'a> {
    fn raise(state: &'a Mutex<StoreState>, flag: LoadingFlag) -> Self {
        *flag.slot(&mut state.lock()) = true;
        Self { state, flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.flag.slot(&mut self.state.lock()) = false;
    }
}

/// Session, catalog and favorites state shared with the presentation layer.
pub struct MarketplaceStore {
    state: Mutex<StoreState>,
    sign_in: SignInUseCase,
    restore: RestoreSessionUseCase,
    catalog_port: Arc<dyn CatalogPort>,
    favorites_port: Arc<dyn FavoritesPort>,
    notifications: NotificationQueue,
    toggle_locks: Mutex<HashMap<CarId, Arc<tokio::sync::Mutex<()>>>>,
    settings: StoreSettings,
}

impl MarketplaceStore {
    /// Creates an anonymous store on the home view.
    ///
    /// Nothing is loaded until [`Self::startup`] or another operation runs.
    #[must_use]
    pub fn new(ports: StorePorts, settings: StoreSettings) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            sign_in: SignInUseCase::new(ports.auth.clone(), ports.tokens.clone()),
            restore: RestoreSessionUseCase::new(ports.auth, ports.tokens),
            catalog_port: ports.catalog,
            favorites_port: ports.favorites,
            notifications: NotificationQueue::new(settings.notification_duration),
            toggle_locks: Mutex::new(HashMap::new()),
            settings,
        }
    }

    /// Restores the session, then loads the featured strip.
    pub async fn startup(&self) {
        self.check_auth().await;
        self.load_featured_cars().await;
    }

    /// Tunables the store was built with.
    #[must_use]
    pub const fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Toast queue fed by every store operation.
    #[must_use]
    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Captures the whole state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock();
        StoreSnapshot {
            is_logged_in: state.session.is_logged_in(),
            user: state.session.user().clone(),
            view: state.ui.view,
            modal: state.ui.modal,
            filters: state.catalog.filters.clone(),
            cars: state.catalog.cars.clone(),
            featured_cars: state.catalog.featured_cars.clone(),
            pagination: state.catalog.pagination,
            visible_pages: state.catalog.pagination.visible_pages(),
            favorites: state.favorites.favorites().to_vec(),
            loading_cars: state.catalog.loading_cars,
            loading_featured: state.catalog.loading_featured,
            loading_favorites: state.favorites.loading,
            is_loading: state.ui.is_loading,
            login_error: state.ui.login_error.clone(),
            signup_error: state.ui.signup_error.clone(),
            notifications: self.notifications.active(),
        }
    }

    /// Returns whether a session is active.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state.lock().session.is_logged_in()
    }

    /// Profile of the current user.
    #[must_use]
    pub fn user(&self) -> UserProfile {
        self.state.lock().session.user().clone()
    }

    /// Active page.
    #[must_use]
    pub fn view(&self) -> View {
        self.state.lock().ui.view
    }

    /// Open auth dialog, if any.
    #[must_use]
    pub fn modal(&self) -> Option<ModalKind> {
        self.state.lock().ui.modal
    }

    /// Error of the last failed login, empty when none.
    #[must_use]
    pub fn login_error(&self) -> String {
        self.state.lock().ui.login_error.clone()
    }

    /// Error of the last failed signup, empty when none.
    #[must_use]
    pub fn signup_error(&self) -> String {
        self.state.lock().ui.signup_error.clone()
    }

    /// Returns whether a login or signup request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.lock().ui.is_loading
    }

    /// Opens the login dialog.
    pub fn open_login(&self) {
        self.state.lock().ui.open_modal(ModalKind::Login);
    }

    /// Opens the signup dialog.
    pub fn open_signup(&self) {
        self.state.lock().ui.open_modal(ModalKind::Signup);
    }

    /// Closes the auth dialog and clears both forms.
    pub fn close_modal(&self) {
        self.state.lock().ui.close_modal();
    }

    /// Empties both auth forms and their errors without closing the dialog.
    pub fn reset_forms(&self) {
        self.state.lock().ui.reset_forms();
    }

    /// Edits the login form in place.
    pub fn update_login_form(&self, edit: impl FnOnce(&mut LoginForm)) {
        edit(&mut self.state.lock().ui.login_form);
    }

    /// Edits the signup form in place.
    pub fn update_signup_form(&self, edit: impl FnOnce(&mut SignupForm)) {
        edit(&mut self.state.lock().ui.signup_form);
    }

    /// Returns and clears a pending scroll-to-top request.
    pub fn take_scroll_request(&self) -> bool {
        std::mem::take(&mut self.state.lock().ui.scroll_to_top)
    }

    fn current_token(&self) -> Option<AuthToken> {
        self.state.lock().session.token().cloned()
    }

    fn loading(&self, flag: LoadingFlag) -> LoadingGuard<'_> {
        LoadingGuard::raise(&self.state, flag)
    }
}
