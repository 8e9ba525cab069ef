//! Client-side routes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no page at `{0}` (try `/` or `/about`)")]
    NotFound(String),
}

/// The two pages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    About,
}

impl Route {
    #[cfg(test)]
    pub const ALL: &[Route] = &[Route::Home, Route::About];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
        }
    }

    /// Resolve a path.  Trailing slashes are ignored and a missing leading
    /// slash is tolerated (`about` → `/about`).
    pub fn from_path(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim().trim_matches('/');
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Ok(Route::Home),
            "about" => Ok(Route::About),
            _ => Err(RouteError::NotFound(path.to_string())),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_paths() {
        assert_eq!(Route::from_path("/"), Ok(Route::Home));
        assert_eq!(Route::from_path(""), Ok(Route::Home));
        assert_eq!(Route::from_path("/about"), Ok(Route::About));
        assert_eq!(Route::from_path("about/"), Ok(Route::About));
        assert_eq!("/About".parse::<Route>(), Ok(Route::About));
    }

    #[test]
    fn unknown_path_is_not_found() {
        let err = Route::from_path("/blog").unwrap_err();
        assert_eq!(err, RouteError::NotFound("/blog".into()));
        assert!(err.to_string().contains("/blog"));
    }

    #[test]
    fn display_round_trips_through_paths() {
        for &route in Route::ALL {
            assert_eq!(Route::from_path(&route.to_string()), Ok(route));
        }
    }
}
