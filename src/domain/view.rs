//! Navigation state shared with the presentation layer.

/// Top-level screen the presentation layer is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    /// Landing page with featured cars.
    #[default]
    Home,
    /// Searchable, paginated catalog.
    Browse,
    /// The signed-in user's saved cars.
    Favorites,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Browse => write!(f, "browse"),
            Self::Favorites => write!(f, "favorites"),
        }
    }
}

/// Authentication dialog variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Login,
    Signup,
}
