//! Page rendering with minijinja
//!
//! Templates are compiled into the binary. Every page receives the pending
//! flash messages as `messages` next to its own data.

use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse, Response};
use chrono::NaiveDateTime;
use minijinja::{Environment, ErrorKind, Value};
use serde::Serialize;
use tracing::debug;

use crate::choices::{GENRES, STATES};
use crate::error::PageError;
use crate::flash::{Flash, CLEAR_FLASH};

const TEMPLATES: &[(&str, &str)] = &[
    ("layouts/main.html", include_str!("../templates/layouts/main.html")),
    ("pages/home.html", include_str!("../templates/pages/home.html")),
    ("pages/venues.html", include_str!("../templates/pages/venues.html")),
    ("pages/artists.html", include_str!("../templates/pages/artists.html")),
    ("pages/shows.html", include_str!("../templates/pages/shows.html")),
    ("pages/search_venues.html", include_str!("../templates/pages/search_venues.html")),
    ("pages/search_artists.html", include_str!("../templates/pages/search_artists.html")),
    ("pages/show_venue.html", include_str!("../templates/pages/show_venue.html")),
    ("pages/show_artist.html", include_str!("../templates/pages/show_artist.html")),
    ("forms/fields.html", include_str!("../templates/forms/fields.html")),
    ("forms/new_venue.html", include_str!("../templates/forms/new_venue.html")),
    ("forms/edit_venue.html", include_str!("../templates/forms/edit_venue.html")),
    ("forms/new_artist.html", include_str!("../templates/forms/new_artist.html")),
    ("forms/edit_artist.html", include_str!("../templates/forms/edit_artist.html")),
    ("forms/new_show.html", include_str!("../templates/forms/new_show.html")),
];

const FULL_FORMAT: &str = "%A %B, %-d, %Y at %-I:%M%p";
const MEDIUM_FORMAT: &str = "%a %m, %d, %Y %-I:%M%p";

/// Parse a serialized `NaiveDateTime` (`T` or space separated)
fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// `{{ show.start_time | datetime("full") }}`; `medium` when no format given
fn datetime_filter(value: String, format: Option<String>) -> Result<String, minijinja::Error> {
    let parsed = parse_datetime(&value).ok_or_else(|| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("not a datetime: {}", value),
        )
    })?;

    let pattern = match format.as_deref() {
        Some("full") => FULL_FORMAT,
        Some("medium") | None => MEDIUM_FORMAT,
        Some(other) => {
            return Err(minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("unknown datetime format: {}", other),
            ))
        }
    };
    Ok(parsed.format(pattern).to_string())
}

/// Template environment shared by all handlers
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, PageError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_filter("datetime", datetime_filter);
        env.add_global("genre_choices", Value::from_serialize(GENRES));
        env.add_global("state_choices", Value::from_serialize(STATES));
        Ok(Self { env })
    }

    /// Render `name` with `data` and the pending flash messages
    pub fn render<T: Serialize>(
        &self,
        name: &str,
        flash: Flash,
        data: &T,
    ) -> Result<Page, PageError> {
        debug!("Rendering {}", name);
        let context = PageContext {
            messages: flash.messages(),
            data,
        };
        let html = self.env.get_template(name)?.render(&context)?;
        Ok(Page {
            html,
            clear_flash: !flash.is_empty(),
        })
    }
}

#[derive(Serialize)]
struct PageContext<'a, T> {
    messages: &'a [String],
    #[serde(flatten)]
    data: &'a T,
}

/// A rendered page
#[derive(Debug)]
pub struct Page {
    pub html: String,
    /// Flash messages were shown, so the cookie must go
    pub clear_flash: bool,
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        let mut response = Html(self.html).into_response();
        if self.clear_flash {
            response
                .headers_mut()
                .append(SET_COOKIE, HeaderValue::from_static(CLEAR_FLASH));
        }
        response
    }
}
