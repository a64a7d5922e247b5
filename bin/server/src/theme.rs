//! Light/dark theme preference.
//!
//! The only preference the service persists, and only in the browser.

use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration as TimeDuration;

/// Theme cookie name. Readable by page scripts so the theme applies before
/// the first API call.
pub const THEME_COOKIE: &str = "theme";

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    fn from_cookie(jar: &CookieJar) -> Self {
        match jar.get(THEME_COOKIE).map(|c| c.value()) {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
}

/// Returns the stored theme.
pub async fn current(jar: CookieJar) -> Json<ThemeResponse> {
    Json(ThemeResponse {
        theme: Theme::from_cookie(&jar),
    })
}

/// Flips the theme and stores the new choice.
pub async fn toggle(jar: CookieJar) -> (CookieJar, Json<ThemeResponse>) {
    let theme = Theme::from_cookie(&jar).toggled();
    let cookie = Cookie::build((THEME_COOKIE, theme.as_str()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::days(365));

    (jar.add(cookie), Json(ThemeResponse { theme }))
}
