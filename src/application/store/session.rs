use tracing::{debug, info, warn};

use super::{LoadingFlag, MarketplaceStore};
use crate::domain::View;

const LOGIN_SUCCESS: &str = "Login successful! Welcome back.";
const LOGIN_FAILED: &str = "Login failed. Please try again.";
const SIGNUP_SUCCESS: &str = "Account created successfully! Welcome to AutoSphere.";
const SIGNUP_FAILED: &str = "Signup failed. Please try again.";
const PASSWORDS_MISMATCH: &str = "Passwords do not match!";
const LOGGED_OUT: &str = "You have been logged out.";

impl MarketplaceStore {
    /// Restores the session from the persisted token.
    ///
    /// Any failure, including an unreadable store, is treated as "not
    /// authenticated" and ends in [`Self::logout`].
    pub async fn check_auth(&self) {
        let token = match self.restore.stored_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No stored session");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Auth check failed");
                self.logout().await;
                return;
            }
        };

        match self.restore.confirm(token).await {
            Ok(session) => {
                self.state.lock().session.sign_in(session.token, session.user);
                self.load_favorites().await;
            }
            Err(e) if e.is_auth_failure() => {
                info!(error = %e, "Stored session rejected");
                self.logout().await;
            }
            Err(e) => {
                warn!(error = %e, network = e.is_network_error(), "Auth check failed");
                self.logout().await;
            }
        }
    }

    /// Submits the login form. Returns whether the user is now signed in.
    pub async fn login(&self) -> bool {
        let credentials = {
            let mut state = self.state.lock();
            state.ui.login_error.clear();
            state.ui.login_form.credentials()
        };
        let _loading = self.loading(LoadingFlag::Auth);

        match self.sign_in.login(&credentials).await {
            Ok(grant) => {
                {
                    let mut state = self.state.lock();
                    state.session.sign_in(grant.token, grant.user);
                    state.ui.close_modal();
                }
                self.notifications.success(LOGIN_SUCCESS);
                self.load_favorites().await;
                true
            }
            Err(e) => {
                let message = e.server_message().unwrap_or(LOGIN_FAILED).to_string();
                self.state.lock().ui.login_error = message;
                false
            }
        }
    }

    /// Submits the signup form. Returns whether the account was created.
    ///
    /// Mismatched passwords fail locally without contacting the API.
    pub async fn signup(&self) -> bool {
        let registration = {
            let mut state = self.state.lock();
            state.ui.signup_error.clear();
            if !state.ui.signup_form.passwords_match() {
                debug!("Signup rejected locally: passwords differ");
                state.ui.signup_error = PASSWORDS_MISMATCH.to_string();
                return false;
            }
            state.ui.signup_form.registration()
        };
        let _loading = self.loading(LoadingFlag::Auth);

        match self.sign_in.register(&registration).await {
            Ok(grant) => {
                {
                    let mut state = self.state.lock();
                    state.session.sign_in(grant.token, grant.user);
                    state.ui.close_modal();
                }
                self.notifications.success(SIGNUP_SUCCESS);
                true
            }
            Err(e) => {
                let message = e.server_message().unwrap_or(SIGNUP_FAILED).to_string();
                self.state.lock().ui.signup_error = message;
                false
            }
        }
    }

    /// Ends the session and forgets everything tied to it.
    ///
    /// Session and favorites are cleared under one lock, so no reader sees
    /// one without the other.
    pub async fn logout(&self) {
        {
            let mut state = self.state.lock();
            state.session.clear();
            state.favorites.clear();
            if state.ui.view == View::Favorites {
                state.ui.view = View::Home;
            }
        }
        info!("Logged out");
        self.notifications.info(LOGGED_OUT);

        if let Err(e) = self.sign_in.delete_token().await {
            warn!(error = %e, "Stored token could not be removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{grant, page, profile, Harness};
    use crate::domain::entities::AuthToken;
    use crate::domain::ports::mocks::{FavoriteCall, MockAuthPort, MockTokenStorage};
    use crate::domain::ports::TokenStoragePort;
    use crate::domain::{ApiError, Car, ModalKind, NotificationKind, View};

    #[tokio::test]
    async fn test_check_auth_without_token_is_noop() {
        let mut auth = MockAuthPort::new();
        auth.expect_fetch_profile().never();
        let harness = Harness::with_auth(auth);

        harness.store.check_auth().await;

        assert!(!harness.store.is_logged_in());
        assert!(harness.store.notifications().active().is_empty());
        assert!(harness.favorites.calls().is_empty());
    }

    #[tokio::test]
    async fn test_check_auth_restores_session_and_favorites() {
        let harness =
            Harness::logged_in(vec![Car::new("a", "Audi", "A4"), Car::new("b", "BMW", "X5")]).await;

        let snapshot = harness.store.snapshot();
        assert!(snapshot.is_logged_in);
        assert_eq!(snapshot.user, profile());
        assert_eq!(snapshot.favorites.len(), 2);
        assert!(harness.store.is_favorite(&"a".into()));
    }

    #[tokio::test]
    async fn test_check_auth_failure_logs_out_silently() {
        let mut auth = MockAuthPort::new();
        auth.expect_fetch_profile()
            .returning(|_| Err(ApiError::unauthorized("jwt expired")));
        let storage = MockTokenStorage::with_token(AuthToken::new_unchecked("stale"));
        let harness = Harness::build(auth, storage, Default::default());

        harness.store.check_auth().await;

        assert!(!harness.store.is_logged_in());
        assert!(!harness.storage.has_token().await.unwrap());
        let kinds: Vec<_> = harness
            .store
            .notifications()
            .active()
            .into_iter()
            .map(|n| n.kind)
            .collect();
        assert!(!kinds.contains(&NotificationKind::Error));
    }

    #[tokio::test]
    async fn test_check_auth_unreachable_api_logs_out() {
        let mut auth = MockAuthPort::new();
        auth.expect_fetch_profile()
            .times(1)
            .returning(|_| Err(ApiError::network("connection refused")));
        let storage = MockTokenStorage::with_token(AuthToken::new_unchecked("saved"));
        let harness = Harness::build(auth, storage, Default::default());

        harness.store.check_auth().await;

        assert!(!harness.store.is_logged_in());
        assert!(harness.store.current_token().is_none());
        assert!(!harness.storage.has_token().await.unwrap());
        assert!(harness.favorites.calls().is_empty());
    }

    #[tokio::test]
    async fn test_check_auth_unreadable_storage_logs_out() {
        let mut auth = MockAuthPort::new();
        auth.expect_fetch_profile().never();
        let harness = Harness::build(auth, MockTokenStorage::unreadable(), Default::default());

        harness.store.check_auth().await;

        assert!(!harness.store.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut auth = MockAuthPort::new();
        auth.expect_login()
            .withf(|c| c.email == "ana@example.com" && c.password == "secret")
            .times(1)
            .returning(|_| Ok(grant("fresh")));
        let harness = Harness::with_auth(auth);
        harness.store.open_login();
        harness.store.update_login_form(|form| {
            form.email = "ana@example.com".into();
            form.password = "secret".into();
        });

        assert!(harness.store.login().await);

        let snapshot = harness.store.snapshot();
        assert!(snapshot.is_logged_in);
        assert_eq!(snapshot.modal, None);
        assert!(!snapshot.is_loading);
        assert!(snapshot.login_error.is_empty());
        assert_eq!(
            harness.storage.get_token().await.unwrap().unwrap().as_str(),
            "fresh"
        );
        assert_eq!(harness.favorites.calls(), vec![FavoriteCall::List]);
        assert_eq!(
            snapshot.notifications.last().unwrap().message,
            "Login successful! Welcome back."
        );

        harness.store.update_login_form(|form| {
            assert!(form.email.is_empty());
            assert!(form.password.is_empty());
        });
    }

    #[tokio::test]
    async fn test_login_failure_shows_server_message() {
        let mut auth = MockAuthPort::new();
        auth.expect_login()
            .returning(|_| Err(ApiError::rejected(401, "Invalid email or password")));
        let harness = Harness::with_auth(auth);
        harness.store.open_login();

        assert!(!harness.store.login().await);

        let snapshot = harness.store.snapshot();
        assert!(!snapshot.is_logged_in);
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.modal, Some(ModalKind::Login));
        assert_eq!(snapshot.login_error, "Invalid email or password");
        assert!(!harness.storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_login_network_failure_uses_generic_message() {
        let mut auth = MockAuthPort::new();
        auth.expect_login()
            .returning(|_| Err(ApiError::network("connection refused")));
        let harness = Harness::with_auth(auth);

        assert!(!harness.store.login().await);
        assert_eq!(harness.store.login_error(), "Login failed. Please try again.");
    }

    #[tokio::test]
    async fn test_signup_password_mismatch_skips_network() {
        let mut auth = MockAuthPort::new();
        auth.expect_register().never();
        let harness = Harness::with_auth(auth);
        harness.store.open_signup();
        harness.store.update_signup_form(|form| {
            form.name = "Ana".into();
            form.email = "ana@example.com".into();
            form.password = "one".into();
            form.confirm_password = "two".into();
        });

        assert!(!harness.store.signup().await);

        assert_eq!(harness.store.signup_error(), "Passwords do not match!");
        assert!(!harness.store.is_loading());
        assert_eq!(harness.store.modal(), Some(ModalKind::Signup));
    }

    #[tokio::test]
    async fn test_signup_success_does_not_load_favorites() {
        let mut auth = MockAuthPort::new();
        auth.expect_register()
            .withf(|r| r.name == "Ana" && r.password == "pw")
            .times(1)
            .returning(|_| Ok(grant("new-account")));
        let harness = Harness::with_auth(auth);
        harness.store.open_signup();
        harness.store.update_signup_form(|form| {
            form.name = "Ana".into();
            form.email = "ana@example.com".into();
            form.password = "pw".into();
            form.confirm_password = "pw".into();
        });

        assert!(harness.store.signup().await);

        assert!(harness.store.is_logged_in());
        assert_eq!(harness.store.modal(), None);
        assert!(harness.storage.has_token().await.unwrap());
        assert!(harness.favorites.calls().is_empty());
    }

    #[tokio::test]
    async fn test_signup_failure_fallback_message() {
        let mut auth = MockAuthPort::new();
        auth.expect_register()
            .returning(|_| Err(ApiError::decode("unexpected body")));
        let harness = Harness::with_auth(auth);

        assert!(!harness.store.signup().await);
        assert_eq!(harness.store.signup_error(), "Signup failed. Please try again.");
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let harness = Harness::logged_in(vec![Car::new("a", "Audi", "A4")]).await;
        harness.store.navigate(View::Favorites).await;

        harness.store.logout().await;

        let snapshot = harness.store.snapshot();
        assert!(!snapshot.is_logged_in);
        assert!(snapshot.user.is_anonymous());
        assert!(snapshot.favorites.is_empty());
        assert!(!harness.store.is_favorite(&"a".into()));
        assert_eq!(snapshot.view, View::Home);
        assert!(!harness.storage.has_token().await.unwrap());
        assert_eq!(
            snapshot.notifications.last().map(|n| (n.kind, n.message.as_str())),
            Some((NotificationKind::Info, "You have been logged out."))
        );
    }

    #[tokio::test]
    async fn test_logout_keeps_browse_view() {
        let harness = Harness::logged_in(Vec::new()).await;
        harness.catalog.push_response(Ok(page(1, 1)));
        harness.store.search().await;

        harness.store.logout().await;

        assert_eq!(harness.store.view(), View::Browse);
    }
}
