//! Plain-text rendering of store state.

use std::fmt::Write;

use chrono::Local;

use crate::application::{ImageResolver, StoreSnapshot};
use crate::domain::{Car, Notification, Pagination};

const EMPTY_LIST: &str = "No cars found.";

/// One listing line: id, title, year, price, fuel, image.
#[must_use]
pub fn car_line(car: &Car, images: &ImageResolver, favorite: bool) -> String {
    let mut line = format!("{} {}", if favorite { '*' } else { ' ' }, car.id);
    let title = car.title();
    if !title.trim().is_empty() {
        let _ = write!(line, "  {}", title.trim());
    }
    if let Some(year) = car.year {
        let _ = write!(line, " ({year})");
    }
    if let Some(price) = car.price {
        let _ = write!(line, "  {}", format_price(price));
    }
    if let Some(fuel) = car.fuel.as_deref().filter(|f| !f.is_empty()) {
        let _ = write!(line, "  {fuel}");
    }
    let _ = write!(line, "\n    {}", images.primary_url(car));
    line
}

/// Whole-currency price with thousands separators, e.g. `$52,300`.
#[must_use]
pub fn format_price(price: f64) -> String {
    // Listing prices are whole currency units.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = price.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

/// Listing block, marking saved cars with `*`.
#[must_use]
pub fn car_list(cars: &[Car], snapshot: &StoreSnapshot, images: &ImageResolver) -> String {
    if cars.is_empty() {
        return EMPTY_LIST.to_string();
    }
    cars.iter()
        .map(|car| {
            let favorite = snapshot.favorites.iter().any(|saved| saved.id == car.id);
            car_line(car, images, favorite)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pager line, e.g. `Page 5 of 10 (97 cars)  ‹ 3 4 [5] 6 7 ›`.
#[must_use]
pub fn pager(pagination: &Pagination, visible: &[u32]) -> String {
    let mut line = format!(
        "Page {} of {} ({} cars)",
        pagination.current, pagination.pages, pagination.total
    );
    if visible.is_empty() {
        return line;
    }
    line.push_str("  ");
    if pagination.has_previous() {
        line.push_str("‹ ");
    }
    let pages: Vec<String> = visible
        .iter()
        .map(|&page| {
            if page == pagination.current {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    line.push_str(&pages.join(" "));
    if pagination.has_next() {
        line.push_str(" ›");
    }
    line
}

/// Toast line with the local time it was posted, e.g.
/// `14:05:09 [error] Failed to load cars.`.
#[must_use]
pub fn notification_line(notification: &Notification) -> String {
    format!(
        "{} [{}] {}",
        notification.posted_at.with_timezone(&Local).format("%H:%M:%S"),
        notification.kind.label(),
        notification.message
    )
}

/// Session banner shown by `whoami`.
#[must_use]
pub fn session_line(snapshot: &StoreSnapshot) -> String {
    if snapshot.is_logged_in {
        format!(
            "Logged in as {} <{}>",
            snapshot.user.display_name(),
            snapshot.user.email
        )
    } else {
        "Not logged in.".to_string()
    }
}
