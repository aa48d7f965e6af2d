use tracing::{debug, error};

use super::{LoadingFlag, MarketplaceStore};
use crate::domain::ports::CarQuery;
use crate::domain::{Car, CatalogFilters, Pagination, View};

const CARS_FAILED: &str = "Failed to load cars. Please try again.";
const FEATURED_FAILED: &str = "Failed to load featured cars.";

impl MarketplaceStore {
    /// Loads one page of the catalog with the current filters.
    ///
    /// On failure the previous results stay in place.
    pub async fn load_cars(&self, page: u32) -> bool {
        let query = CarQuery::from_filters(&self.state.lock().catalog.filters, page);
        let _loading = self.loading(LoadingFlag::Cars);

        match self.catalog_port.list_cars(&query).await {
            Ok(result) => {
                debug!(
                    page = result.pagination.current,
                    pages = result.pagination.pages,
                    count = result.items.len(),
                    "Cars loaded"
                );
                let mut state = self.state.lock();
                state.catalog.cars = result.items;
                state.catalog.pagination = result.pagination;
                true
            }
            Err(e) => {
                error!(error = %e, page, "Error loading cars");
                self.notifications.error(CARS_FAILED);
                false
            }
        }
    }

    /// Loads the featured strip into its own slot.
    pub async fn load_featured_cars(&self) -> bool {
        let query = CarQuery::featured(self.settings.featured_limit);
        let _loading = self.loading(LoadingFlag::Featured);

        match self.catalog_port.list_cars(&query).await {
            Ok(result) => {
                self.state.lock().catalog.featured_cars = result.items;
                true
            }
            Err(e) => {
                error!(error = %e, "Error loading featured cars");
                self.notifications.error(FEATURED_FAILED);
                false
            }
        }
    }

    /// Switches to the browse view and reloads from the first page.
    pub async fn search(&self) -> bool {
        self.state.lock().ui.view = View::Browse;
        self.load_cars(1).await
    }

    /// Loads `page` if it exists and asks the view to scroll to the top.
    ///
    /// Returns `false` without touching state when `page` is out of range.
    pub async fn change_page(&self, page: u32) -> bool {
        {
            let mut state = self.state.lock();
            if !state.catalog.pagination.contains(page) {
                debug!(page, pages = state.catalog.pagination.pages, "Page out of range");
                return false;
            }
            state.ui.scroll_to_top = true;
        }
        self.load_cars(page).await
    }

    /// Switches view, loading whatever the new view needs.
    pub async fn navigate(&self, view: View) {
        let (changed, needs_cars, logged_in) = {
            let mut state = self.state.lock();
            let changed = state.ui.view != view;
            state.ui.view = view;
            (
                changed,
                state.catalog.cars.is_empty(),
                state.session.is_logged_in(),
            )
        };
        if !changed {
            return;
        }

        match view {
            View::Browse if needs_cars => {
                self.load_cars(1).await;
            }
            View::Favorites if logged_in => {
                self.load_favorites().await;
            }
            _ => {}
        }
    }

    /// Replaces the filters. Takes effect on the next search.
    pub fn set_filters(&self, filters: CatalogFilters) {
        self.state.lock().catalog.filters = filters;
    }

    /// Edits the filters in place.
    pub fn update_filters(&self, edit: impl FnOnce(&mut CatalogFilters)) {
        edit(&mut self.state.lock().catalog.filters);
    }

    /// Sets the free text query.
    pub fn set_search_query(&self, query: impl Into<String>) {
        self.state.lock().catalog.filters.search_query = query.into();
    }

    /// Announces the car the user opened.
    pub fn view_car_details(&self, car: &Car) {
        self.notifications
            .success(format!("Viewing details for {}", car.title()));
    }

    /// Current filters.
    #[must_use]
    pub fn filters(&self) -> CatalogFilters {
        self.state.lock().catalog.filters.clone()
    }

    /// Current result page.
    #[must_use]
    pub fn cars(&self) -> Vec<Car> {
        self.state.lock().catalog.cars.clone()
    }

    /// Featured strip.
    #[must_use]
    pub fn featured_cars(&self) -> Vec<Car> {
        self.state.lock().catalog.featured_cars.clone()
    }

    /// Pagination of the current result page.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.state.lock().catalog.pagination
    }

    /// Pager window for the current pagination, computed on each call.
    #[must_use]
    pub fn visible_pages(&self) -> Vec<u32> {
        self.pagination().visible_pages()
    }
}
