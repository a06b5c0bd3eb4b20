//! HTML form parsing and validation
//!
//! Forms arrive as `application/x-www-form-urlencoded` pairs. The venue and
//! artist create forms are checked with `validator` before anything is
//! written; the edit forms reuse the same structs but skip validation.

use axum::extract::{FromRequest, Request};
use axum::Form;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::choices::{is_genre, is_state};
use crate::error::PageError;
use crate::models::{Artist, ArtistData, NewShow, Venue, VenueData};

/// `123-456-7890`, `123.456.7890`, `123 456 7890`, `(123) 4567890`, `1234567890`
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$").expect("phone pattern")
});

/// Start time format of the show form
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats accepted for a submitted start time
const START_TIME_INPUT_FORMATS: &[&str] = &[START_TIME_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

const REQUIRED: &str = "This field is required.";

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_state(state: &str) -> Result<(), ValidationError> {
    if state.is_empty() {
        return Err(invalid("required", REQUIRED));
    }
    if !is_state(state) {
        return Err(invalid("state", "Invalid state."));
    }
    Ok(())
}

fn validate_genres(genres: &[String]) -> Result<(), ValidationError> {
    if genres.is_empty() {
        return Err(invalid("required", REQUIRED));
    }
    if !genres.iter().all(|g| is_genre(g)) {
        return Err(invalid("genres", "Invalid genres."));
    }
    Ok(())
}

fn validate_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(invalid("required", REQUIRED));
    }
    if id.trim().parse::<i64>().is_err() {
        return Err(invalid("integer", "Not a valid integer value."));
    }
    Ok(())
}

fn validate_start_time(start_time: &str) -> Result<(), ValidationError> {
    if start_time.trim().is_empty() {
        return Err(invalid("required", REQUIRED));
    }
    if parse_start_time(start_time).is_none() {
        return Err(invalid("datetime", "Not a valid datetime value."));
    }
    Ok(())
}

/// Parse a submitted start time in any accepted format
pub fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    START_TIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Raw submitted form pairs; repeated keys (multi-selects) are kept
#[derive(Debug, Clone, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value of a field, `""` when absent
    pub fn text(&self, name: &str) -> String {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    /// Every value of a field, in submission order
    pub fn all(&self, name: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Checkbox state; unchecked boxes are not submitted at all
    pub fn checkbox(&self, name: &str) -> bool {
        matches!(self.text(name).as_str(), "y" | "on" | "true")
    }
}

#[axum::async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| PageError::BadRequest(e.body_text()))?;
        Ok(Self(pairs))
    }
}

/// Field errors keyed by field name, for re-rendering a form
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Flatten validation errors into per-field messages
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Flash text listing every field error, fields in name order
pub fn error_summary(errors: &FieldErrors) -> String {
    let parts: Vec<String> = errors
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{}: {}", field, m)))
        .collect();
    format!("Please fix the following errors: {}", parts.join(", "))
}

/// Venue create/edit form
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct VenueForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub city: String,
    #[validate(custom(function = "validate_state"))]
    pub state: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub address: String,
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone."))]
    pub phone: String,
    pub image_link: String,
    #[validate(custom(function = "validate_genres"))]
    pub genres: Vec<String>,
    #[validate(url(message = "Invalid URL."))]
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name").trim().to_string(),
            city: fields.text("city").trim().to_string(),
            state: fields.text("state"),
            address: fields.text("address").trim().to_string(),
            phone: fields.text("phone").trim().to_string(),
            image_link: fields.text("image_link"),
            genres: fields.all("genres"),
            facebook_link: fields.text("facebook_link"),
            website_link: fields.text("website_link"),
            seeking_talent: fields.checkbox("seeking_talent"),
            seeking_description: fields.text("seeking_description"),
        }
    }

    /// Form pre-filled from a stored venue
    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            image_link: venue.image_link.clone(),
            genres: venue.genres.clone(),
            facebook_link: venue.facebook_link.clone(),
            website_link: venue.website_link.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
        }
    }

    pub fn into_data(self) -> VenueData {
        VenueData {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            genres: self.genres,
            image_link: self.image_link,
            website_link: self.website_link,
            facebook_link: self.facebook_link,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

/// Artist create/edit form
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ArtistForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub city: String,
    #[validate(custom(function = "validate_state"))]
    pub state: String,
    #[validate(
        length(min = 1, message = "This field is required."),
        regex(path = *PHONE_RE, message = "Invalid phone.")
    )]
    pub phone: String,
    pub image_link: String,
    #[validate(custom(function = "validate_genres"))]
    pub genres: Vec<String>,
    #[validate(url(message = "Invalid URL."))]
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name").trim().to_string(),
            city: fields.text("city").trim().to_string(),
            state: fields.text("state"),
            phone: fields.text("phone").trim().to_string(),
            image_link: fields.text("image_link"),
            genres: fields.all("genres"),
            facebook_link: fields.text("facebook_link"),
            website_link: fields.text("website_link"),
            seeking_venue: fields.checkbox("seeking_venue"),
            seeking_description: fields.text("seeking_description"),
        }
    }

    /// Form pre-filled from a stored artist
    pub fn from_artist(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            image_link: artist.image_link.clone(),
            genres: artist.genres.clone(),
            facebook_link: artist.facebook_link.clone(),
            website_link: artist.website_link.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
        }
    }

    pub fn into_data(self) -> ArtistData {
        ArtistData {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            genres: self.genres,
            image_link: self.image_link,
            website_link: self.website_link,
            facebook_link: self.facebook_link,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

/// Show create form
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ShowForm {
    #[validate(custom(function = "validate_id"))]
    pub artist_id: String,
    #[validate(custom(function = "validate_id"))]
    pub venue_id: String,
    #[validate(custom(function = "validate_start_time"))]
    pub start_time: String,
}

impl ShowForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            artist_id: fields.text("artist_id"),
            venue_id: fields.text("venue_id"),
            start_time: fields.text("start_time"),
        }
    }

    /// Empty form whose start time defaults to `now`
    pub fn starting_at(now: NaiveDateTime) -> Self {
        Self {
            start_time: now.format(START_TIME_FORMAT).to_string(),
            ..Self::default()
        }
    }

    /// Validate and convert into an insertable show
    pub fn into_new_show(self) -> Result<NewShow, ValidationErrors> {
        self.validate()?;

        match (
            self.artist_id.trim().parse(),
            self.venue_id.trim().parse(),
            parse_start_time(&self.start_time),
        ) {
            (Ok(artist_id), Ok(venue_id), Some(start_time)) => Ok(NewShow {
                artist_id,
                venue_id,
                start_time,
            }),
            // validate() already rejected every other combination
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("start_time", invalid("datetime", "Not a valid datetime value."));
                Err(errors)
            }
        }
    }
}
