//! Command runner driving the store from the command line.

use std::io::Write;

use tracing::{debug, info};

use super::render;
use crate::application::{ImageResolver, MarketplaceStore};
use crate::domain::{Car, CarId, CatalogFilters, View};
use crate::infrastructure::config::{BrowseArgs, Command};

/// One CLI invocation over a store.
pub struct App {
    store: MarketplaceStore,
    images: ImageResolver,
}

impl App {
    /// Wraps a store and the resolver used for image links.
    #[must_use]
    pub const fn new(store: MarketplaceStore, images: ImageResolver) -> Self {
        Self { store, images }
    }

    /// The store commands run against.
    #[must_use]
    pub const fn store(&self) -> &MarketplaceStore {
        &self.store
    }

    /// Restores the session, runs `command` and prints the resulting state
    /// followed by every active notification.
    ///
    /// # Errors
    /// Returns error if writing to `out` fails.
    pub async fn run(&self, command: Command, out: &mut impl Write) -> color_eyre::Result<()> {
        self.store.startup().await;
        debug!(command = command.name(), logged_in = self.store.is_logged_in(), "Running command");

        match command {
            Command::Featured => self.featured(out)?,
            Command::Browse(args) => self.browse(args, out).await?,
            Command::Login { email, password } => self.login(email, password, out).await?,
            Command::Signup {
                name,
                email,
                password,
                confirm_password,
            } => {
                self.signup(name, email, password, confirm_password, out)
                    .await?;
            }
            Command::Favorites => self.favorites(out).await?,
            Command::Toggle { car_id } => self.toggle(CarId::from(car_id)).await,
            Command::Logout => self.store.logout().await,
            Command::Whoami => writeln!(out, "{}", render::session_line(&self.store.snapshot()))?,
        }

        for notification in self.store.notifications().active() {
            writeln!(out, "{}", render::notification_line(&notification))?;
        }
        info!("Command finished");
        Ok(())
    }

    fn featured(&self, out: &mut impl Write) -> std::io::Result<()> {
        let snapshot = self.store.snapshot();
        writeln!(out, "Featured cars")?;
        writeln!(
            out,
            "{}",
            render::car_list(&snapshot.featured_cars, &snapshot, &self.images)
        )
    }

    async fn browse(&self, args: BrowseArgs, out: &mut impl Write) -> std::io::Result<()> {
        self.store.set_filters(CatalogFilters {
            make: args.make.unwrap_or_default(),
            price_range: args.price_range.unwrap_or_default(),
            year: args.year.unwrap_or_default(),
            fuel: args.fuel.unwrap_or_default(),
            search_query: args.search.unwrap_or_default(),
        });
        self.store.search().await;

        if args.page != 1 && !self.store.change_page(args.page).await {
            writeln!(
                out,
                "Page {} is out of range, showing page {}.",
                args.page,
                self.store.pagination().current
            )?;
        }

        let snapshot = self.store.snapshot();
        writeln!(out, "{}", render::car_list(&snapshot.cars, &snapshot, &self.images))?;
        writeln!(
            out,
            "{}",
            render::pager(&snapshot.pagination, &snapshot.visible_pages)
        )
    }

    async fn login(&self, email: String, password: String, out: &mut impl Write) -> std::io::Result<()> {
        self.store.open_login();
        self.store.update_login_form(|form| {
            form.email = email;
            form.password = password;
        });

        if !self.store.login().await {
            writeln!(out, "Login failed: {}", self.store.login_error())?;
        }
        writeln!(out, "{}", render::session_line(&self.store.snapshot()))
    }

    async fn signup(
        &self,
        name: String,
        email: String,
        password: String,
        confirm_password: String,
        out: &mut impl Write,
    ) -> std::io::Result<()> {
        self.store.open_signup();
        self.store.update_signup_form(|form| {
            form.name = name;
            form.email = email;
            form.password = password;
            form.confirm_password = confirm_password;
        });

        if !self.store.signup().await {
            writeln!(out, "Signup failed: {}", self.store.signup_error())?;
        }
        writeln!(out, "{}", render::session_line(&self.store.snapshot()))
    }

    async fn favorites(&self, out: &mut impl Write) -> std::io::Result<()> {
        if !self.store.is_logged_in() {
            return writeln!(out, "Log in to see your favorites.");
        }
        self.store.navigate(View::Favorites).await;

        let snapshot = self.store.snapshot();
        writeln!(out, "Your favorites ({})", snapshot.favorites.len())?;
        writeln!(
            out,
            "{}",
            render::car_list(&snapshot.favorites, &snapshot, &self.images)
        )
    }

    async fn toggle(&self, id: CarId) {
        let car = self.known_car(&id).unwrap_or_else(|| Car::new(id, "", ""));
        self.store.toggle_favorite(&car).await;
    }

    /// Full record for `id` from whatever the store already holds.
    fn known_car(&self, id: &CarId) -> Option<Car> {
        let snapshot = self.store.snapshot();
        snapshot
            .favorites
            .into_iter()
            .chain(snapshot.featured_cars)
            .chain(snapshot.cars)
            .find(|car| &car.id == id)
    }
}
