//! Plain state records owned by [`super::MarketplaceStore`].

use std::collections::HashSet;

use crate::application::dto::{LoginForm, SignupForm};
use crate::domain::{AuthToken, Car, CarId, CatalogFilters, ModalKind, Pagination, UserProfile, View};

/// Token and identity of the current user.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    token: Option<AuthToken>,
    user: UserProfile,
}

impl SessionState {
    /// Returns whether a token is held.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Bearer token of the session, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Profile of the signed-in user, or the anonymous one.
    #[must_use]
    pub const fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Returns whether `token` is still the active credential.
    #[must_use]
    pub fn is_current(&self, token: &AuthToken) -> bool {
        self.token.as_ref() == Some(token)
    }

    /// Adopts a confirmed token together with its profile.
    pub fn sign_in(&mut self, token: AuthToken, user: UserProfile) {
        self.token = Some(token);
        self.user = user;
    }

    /// Drops the token and resets to the anonymous identity.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = UserProfile::anonymous();
    }
}

/// Filters, results and pagination of the catalog views.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    /// Filters applied to the next search.
    pub filters: CatalogFilters,
    /// Current result page.
    pub cars: Vec<Car>,
    /// Featured strip.
    pub featured_cars: Vec<Car>,
    /// Pagination of `cars`.
    pub pagination: Pagination,
    /// Set while a result page is loading.
    pub loading_cars: bool,
    /// Set while the featured strip is loading.
    pub loading_featured: bool,
}

/// Saved cars plus the id index used for membership tests.
///
/// Both collections only change together through the methods below.
#[derive(Debug, Clone, Default)]
pub struct FavoritesState {
    favorites: Vec<Car>,
    favorite_ids: HashSet<CarId>,
    /// Set while favorites are loading.
    pub loading: bool,
}

impl FavoritesState {
    /// Saved records in server order.
    #[must_use]
    pub fn favorites(&self) -> &[Car] {
        &self.favorites
    }

    /// Ids of the saved records.
    #[must_use]
    pub const fn ids(&self) -> &HashSet<CarId> {
        &self.favorite_ids
    }

    /// Returns whether `id` is saved.
    #[must_use]
    pub fn contains(&self, id: &CarId) -> bool {
        self.favorite_ids.contains(id)
    }

    /// Replaces everything with a server response.
    pub fn replace(&mut self, favorites: Vec<Car>) {
        self.favorite_ids = favorites.iter().map(|car| car.id.clone()).collect();
        self.favorites = favorites;
    }

    /// Adds a record unless already present.
    pub fn insert(&mut self, car: Car) {
        if self.favorite_ids.insert(car.id.clone()) {
            self.favorites.push(car);
        }
    }

    /// Removes the record and its id.
    pub fn remove(&mut self, id: &CarId) {
        self.favorite_ids.remove(id);
        self.favorites.retain(|car| &car.id != id);
    }

    /// Forgets every saved car.
    pub fn clear(&mut self) {
        self.favorites.clear();
        self.favorite_ids.clear();
    }

    /// Returns whether the id index mirrors the record list exactly.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.favorites.len() == self.favorite_ids.len()
            && self
                .favorites
                .iter()
                .all(|car| self.favorite_ids.contains(&car.id))
    }
}

/// Navigation, dialogs and forms.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Active page.
    pub view: View,
    /// Open dialog, if any.
    pub modal: Option<ModalKind>,
    /// Login dialog fields.
    pub login_form: LoginForm,
    /// Signup dialog fields.
    pub signup_form: SignupForm,
    /// Error shown in the login dialog, empty when none.
    pub login_error: String,
    /// Error shown in the signup dialog, empty when none.
    pub signup_error: String,
    /// Set while a login or signup request is in flight.
    pub is_loading: bool,
    /// Pending request to scroll the page to the top.
    pub scroll_to_top: bool,
}

impl UiState {
    /// Empties both forms and their errors.
    pub fn reset_forms(&mut self) {
        self.login_form = LoginForm::default();
        self.signup_form = SignupForm::default();
        self.login_error.clear();
        self.signup_error.clear();
    }

    /// Shows the `kind` dialog.
    pub fn open_modal(&mut self, kind: ModalKind) {
        self.modal = Some(kind);
    }

    /// Hides the dialog and resets the forms.
    pub fn close_modal(&mut self) {
        self.modal = None;
        self.reset_forms();
    }
}

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub session: SessionState,
    pub catalog: CatalogState,
    pub favorites: FavoritesState,
    pub ui: UiState,
}
