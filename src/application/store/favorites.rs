use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, warn};

use super::{LoadingFlag, MarketplaceStore};
use crate::domain::{AuthToken, Car, CarId, View};

const LOGIN_REQUIRED: &str = "Please login to add favorites!";
const FAVORITE_ADDED: &str = "Added to favorites";
const FAVORITE_REMOVED: &str = "Removed from favorites";
const FAVORITES_FAILED: &str = "Failed to update favorites";

impl MarketplaceStore {
    /// Reloads favorites from the server.
    ///
    /// Does nothing when anonymous. Failures are only logged, and a response
    /// that lands after the session changed is discarded.
    pub async fn load_favorites(&self) -> bool {
        let Some(token) = self.current_token() else {
            return false;
        };
        let _loading = self.loading(LoadingFlag::Favorites);

        match self.favorites_port.list_favorites(&token).await {
            Ok(favorites) => {
                let mut state = self.state.lock();
                if !state.session.is_current(&token) {
                    debug!("Discarding favorites for a session that ended");
                    return false;
                }
                debug!(count = favorites.len(), "Favorites loaded");
                state.favorites.replace(favorites);
                true
            }
            Err(e) => {
                warn!(error = %e, network = e.is_network_error(), "Error loading favorites");
                false
            }
        }
    }

    /// Adds or removes `car` from favorites.
    ///
    /// Local state only changes after the server confirmed the change.
    /// Toggles of the same car run one after another; toggles of different
    /// cars interleave freely.
    pub async fn toggle_favorite(&self, car: &Car) -> bool {
        let Some(token) = self.current_token() else {
            self.notifications.error(LOGIN_REQUIRED);
            self.open_login();
            return false;
        };

        let lock = self.toggle_lock(&car.id);
        let toggled = {
            let _serial = lock.lock().await;
            self.apply_toggle(&token, car).await
        };
        self.release_toggle_lock(&car.id, lock);
        toggled
    }

    async fn apply_toggle(&self, token: &AuthToken, car: &Car) -> bool {
        let favorited = self.is_favorite(&car.id);
        let result = if favorited {
            self.favorites_port.remove_favorite(token, &car.id).await
        } else {
            self.favorites_port.add_favorite(token, &car.id).await
        };

        if let Err(e) = result {
            error!(error = %e, car_id = %car.id, "Error toggling favorite");
            self.notifications.error(FAVORITES_FAILED);
            return false;
        }

        let refresh = {
            let mut state = self.state.lock();
            if !state.session.is_current(token) {
                debug!(car_id = %car.id, "Session ended during toggle");
                return false;
            }
            if favorited {
                state.favorites.remove(&car.id);
            } else {
                state.favorites.insert(car.clone());
            }
            !favorited && state.ui.view == View::Favorites
        };

        if refresh {
            self.load_favorites().await;
        }

        self.notifications.success(if favorited {
            FAVORITE_REMOVED
        } else {
            FAVORITE_ADDED
        });
        true
    }

    fn toggle_lock(&self, id: &CarId) -> Arc<tokio::sync::Mutex<()>> {
        self.toggle_locks
            .lock()
            .entry(id.clone())
            .or_default()
            .clone()
    }

    fn release_toggle_lock(&self, id: &CarId, lock: Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self.toggle_locks.lock();
        // Map entry plus ours: nobody else is waiting.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(id);
        }
    }

    /// O(1) membership test against the id index.
    #[must_use]
    pub fn is_favorite(&self, id: &CarId) -> bool {
        self.state.lock().favorites.contains(id)
    }

    /// Saved cars.
    #[must_use]
    pub fn favorites(&self) -> Vec<Car> {
        self.state.lock().favorites.favorites().to_vec()
    }

    /// Ids of the saved cars.
    #[must_use]
    pub fn favorite_ids(&self) -> HashSet<CarId> {
        self.state.lock().favorites.ids().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::super::test_support::Harness;
    use crate::domain::ports::mocks::FavoriteCall;
    use crate::domain::{Car, CarId, ModalKind, NotificationKind, View};

    fn ids_of(cars: &[Car]) -> HashSet<CarId> {
        cars.iter().map(|car| car.id.clone()).collect()
    }

    fn assert_consistent(harness: &Harness) {
        assert_eq!(
            harness.store.favorite_ids(),
            ids_of(&harness.store.favorites())
        );
    }

    #[tokio::test]
    async fn test_anonymous_toggle_opens_login() {
        let harness = Harness::anonymous();

        assert!(!harness.store.toggle_favorite(&Car::new("a", "Audi", "A4")).await);

        let snapshot = harness.store.snapshot();
        assert_eq!(snapshot.modal, Some(ModalKind::Login));
        assert!(snapshot.favorites.is_empty());
        assert!(harness.store.favorite_ids().is_empty());
        assert!(harness.favorites.calls().is_empty());
        let toast = snapshot.notifications.last().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, "Please login to add favorites!");
    }

    #[tokio::test]
    async fn test_load_favorites_anonymous_is_noop() {
        let harness = Harness::anonymous();

        assert!(!harness.store.load_favorites().await);
        assert!(harness.favorites.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let harness = Harness::logged_in(Vec::new()).await;
        let car = Car::new("a", "Audi", "A4");

        assert!(harness.store.toggle_favorite(&car).await);
        assert!(harness.store.is_favorite(&car.id));
        assert_consistent(&harness);

        assert!(harness.store.toggle_favorite(&car).await);
        assert!(!harness.store.is_favorite(&car.id));
        assert_consistent(&harness);

        assert_eq!(
            harness.favorites.calls(),
            vec![
                FavoriteCall::List,
                FavoriteCall::Add(car.id.clone()),
                FavoriteCall::Remove(car.id.clone()),
            ]
        );
        let messages: Vec<_> = harness
            .store
            .notifications()
            .active()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["Added to favorites", "Removed from favorites"]);
    }

    #[tokio::test]
    async fn test_add_in_favorites_view_refreshes() {
        let harness = Harness::logged_in(Vec::new()).await;
        let car = Car::new("a", "Audi", "A4").with_year(2020);
        harness.favorites.know_car(car.clone());
        harness.store.navigate(View::Favorites).await;

        assert!(harness.store.toggle_favorite(&Car::new("a", "", "")).await);

        assert_eq!(harness.store.favorites(), vec![car]);
        assert_eq!(harness.favorites.calls().last(), Some(&FavoriteCall::List));
        assert_consistent(&harness);
    }

    #[tokio::test]
    async fn test_add_keeps_record_when_refresh_fails() {
        let harness = Harness::logged_in(Vec::new()).await;
        harness.store.navigate(View::Favorites).await;
        harness.favorites.set_fail_list(true);
        let car = Car::new("a", "Audi", "A4");

        assert!(harness.store.toggle_favorite(&car).await);

        assert_eq!(harness.store.favorites(), vec![car]);
        assert_consistent(&harness);
    }

    #[tokio::test]
    async fn test_failed_toggle_changes_nothing() {
        let saved = Car::new("a", "Audi", "A4");
        let harness = Harness::logged_in(vec![saved.clone()]).await;
        harness.favorites.set_fail_mutations(true);

        assert!(!harness.store.toggle_favorite(&saved).await);
        assert!(!harness.store.toggle_favorite(&Car::new("b", "BMW", "M3")).await);

        assert_eq!(harness.store.favorites(), vec![saved]);
        assert_consistent(&harness);
        let toast = harness.store.notifications().active().pop().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, "Failed to update favorites");
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_favorites() {
        let harness = Harness::logged_in(vec![Car::new("a", "Audi", "A4")]).await;
        harness.favorites.set_fail_list(true);
        let toasts_before = harness.store.notifications().len();

        assert!(!harness.store.load_favorites().await);

        assert_eq!(harness.store.favorites().len(), 1);
        assert!(!harness.store.snapshot().loading_favorites);
        assert_eq!(harness.store.notifications().len(), toasts_before);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_on_same_car_are_serialized() {
        let harness = Harness::logged_in(Vec::new()).await;
        let car = Car::new("a", "Audi", "A4");

        let (first, second) = tokio::join!(
            harness.store.toggle_favorite(&car),
            harness.store.toggle_favorite(&car)
        );

        assert!(first && second);
        assert!(!harness.store.is_favorite(&car.id));
        assert!(harness.favorites.saved_ids().is_empty());
        assert_eq!(
            &harness.favorites.calls()[1..],
            &[FavoriteCall::Add(car.id.clone()), FavoriteCall::Remove(car.id.clone())]
        );
        assert_consistent(&harness);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_on_different_cars_interleave() {
        let harness = Harness::logged_in(Vec::new()).await;
        let a = Car::new("a", "Audi", "A4");
        let b = Car::new("b", "BMW", "M3");

        let (first, second) = tokio::join!(
            harness.store.toggle_favorite(&a),
            harness.store.toggle_favorite(&b)
        );

        assert!(first && second);
        assert_eq!(
            harness.store.favorite_ids(),
            HashSet::from([a.id.clone(), b.id.clone()])
        );
        assert_eq!(
            &harness.favorites.calls()[1..],
            &[FavoriteCall::Add(a.id), FavoriteCall::Add(b.id)]
        );
        assert_consistent(&harness);
    }

    #[tokio::test]
    async fn test_logout_during_load_discards_response() {
        let harness = Harness::logged_in(vec![Car::new("a", "Audi", "A4")]).await;

        let (loaded, ()) = tokio::join!(harness.store.load_favorites(), harness.store.logout());

        assert!(!loaded);
        assert!(harness.store.favorites().is_empty());
        assert!(harness.store.favorite_ids().is_empty());
    }

    #[tokio::test]
    async fn test_logout_during_toggle_discards_result() {
        let harness = Harness::logged_in(Vec::new()).await;
        let car = Car::new("p1", "Porsche", "911");

        let (toggled, ()) =
            tokio::join!(harness.store.toggle_favorite(&car), harness.store.logout());

        assert!(!toggled);
        assert_eq!(
            harness.favorites.calls().last(),
            Some(&FavoriteCall::Add("p1".into()))
        );
        assert!(harness.store.favorites().is_empty());
        assert!(harness.store.favorite_ids().is_empty());
        assert!(!harness.store.is_favorite(&car.id));
        assert!(
            !harness
                .store
                .notifications()
                .active()
                .iter()
                .any(|n| n.message == super::FAVORITE_ADDED)
        );
    }
}
