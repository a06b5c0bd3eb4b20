//! Venue pages

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};
use validator::Validate;

use crate::api::pages::home;
use crate::api::{FormPage, SearchPage};
use crate::db;
use crate::error::{json_error, PageError};
use crate::flash::{redirect_with, Flash};
use crate::forms::{error_summary, field_errors, FormFields, VenueForm};
use crate::listing::{group_by_area, split_shows, Area, ShowSplit};
use crate::models::{Venue, VenueShow};
use crate::templates::Page;
use crate::AppState;

#[derive(Debug, Serialize)]
struct VenuesPage {
    areas: Vec<Area>,
}

#[derive(Debug, Serialize)]
struct VenuePage {
    venue: VenueDetail,
}

/// A venue with its shows split around now
#[derive(Debug, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: ShowSplit<VenueShow>,
}

/// GET /venues
///
/// Venues grouped by city and state, each with its upcoming show count.
pub async fn list_venues(
    State(state): State<AppState>,
    flash: Flash,
) -> Result<Page, PageError> {
    let rows = db::venues::list_area_rows(&state.db).await?;
    let areas = group_by_area(rows, state.now());

    state
        .templates
        .render("pages/venues.html", flash, &VenuesPage { areas })
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    flash: Flash,
    fields: FormFields,
) -> Result<Page, PageError> {
    let term = fields.text("search_term");
    let venues = db::venues::search_venues(&state.db, term.trim()).await?;

    state.templates.render(
        "pages/search_venues.html",
        flash,
        &SearchPage::new(term, venues),
    )
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    flash: Flash,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Page, PageError> {
    let Path(venue_id) = path?;
    let venue = db::venues::get_venue(&state.db, venue_id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("venue {}", venue_id)))?;

    let shows = db::venues::venue_shows(&state.db, venue_id).await?;
    let venue = VenueDetail {
        venue,
        shows: split_shows(shows, state.now()),
    };

    state
        .templates
        .render("pages/show_venue.html", flash, &VenuePage { venue })
}

/// GET /venues/create
pub async fn create_venue_form(
    State(state): State<AppState>,
    flash: Flash,
) -> Result<Page, PageError> {
    state.templates.render(
        "forms/new_venue.html",
        flash,
        &FormPage::blank(VenueForm::default()),
    )
}

/// POST /venues/create
///
/// Invalid input re-renders the form with the submitted values; database
/// failures land on the home page with an error flash.
pub async fn create_venue_submission(
    State(state): State<AppState>,
    mut flash: Flash,
    fields: FormFields,
) -> Result<Page, PageError> {
    let form = VenueForm::from_fields(&fields);

    if let Err(errors) = form.validate() {
        let errors = field_errors(&errors);
        flash.push(error_summary(&errors));
        return state.templates.render(
            "forms/new_venue.html",
            flash,
            &FormPage::invalid(form, errors),
        );
    }

    let data = form.into_data();
    match db::venues::insert_venue(&state.db, &data).await {
        Ok(id) => {
            info!("Listed venue {} ({})", id, data.name);
            flash.push(format!("Venue {} was successfully listed!", data.name));
        }
        Err(e) => {
            error!("Failed to list venue {}: {}", data.name, e);
            flash.push(format!(
                "An error occurred. Venue {} could not be listed.",
                data.name
            ));
        }
    }

    home(&state, flash)
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    flash: Flash,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Page, PageError> {
    let Path(venue_id) = path?;
    let venue = db::venues::get_venue(&state.db, venue_id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("venue {}", venue_id)))?;

    state.templates.render(
        "forms/edit_venue.html",
        flash,
        &FormPage::editing(venue_id, VenueForm::from_venue(&venue)),
    )
}

/// POST /venues/:id/edit
///
/// Applies the submitted values as-is and returns to the venue page.
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    fields: FormFields,
) -> Result<Response, PageError> {
    let Path(venue_id) = path?;
    let data = VenueForm::from_fields(&fields).into_data();
    let mut flash = Flash::default();

    match db::venues::update_venue(&state.db, venue_id, &data).await {
        Ok(true) => {
            info!("Edited venue {}", venue_id);
            flash.push(format!("{} was successfully edited!", data.name));
        }
        Ok(false) => return Err(PageError::NotFound(format!("venue {}", venue_id))),
        Err(e) => {
            error!("Failed to edit venue {}: {}", venue_id, e);
            flash.push(format!(
                "An error occurred. Venue {} could not be edited.",
                data.name
            ));
        }
    }

    Ok(redirect_with(&format!("/venues/{}", venue_id), &flash))
}

/// DELETE /venues/:id
///
/// Called from the venue page script, so it answers in JSON. The venue's
/// shows go with it.
pub async fn delete_venue(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let Ok(Path(venue_id)) = path else {
        return json_error(StatusCode::NOT_FOUND);
    };

    match db::venues::delete_venue(&state.db, venue_id).await {
        Ok(true) => {
            info!("Deleted venue {}", venue_id);
            Json(json!({ "success": true, "deleted": venue_id })).into_response()
        }
        Ok(false) => json_error(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to delete venue {}: {}", venue_id, e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
