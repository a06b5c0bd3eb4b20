//! Show pages

use axum::extract::State;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::api::pages::home;
use crate::api::FormPage;
use crate::db;
use crate::error::PageError;
use crate::flash::Flash;
use crate::forms::{error_summary, field_errors, FormFields, ShowForm};
use crate::models::ShowListing;
use crate::templates::Page;
use crate::AppState;

#[derive(Debug, Serialize)]
struct ShowsPage {
    shows: Vec<ShowListing>,
}

/// GET /shows
pub async fn list_shows(State(state): State<AppState>, flash: Flash) -> Result<Page, PageError> {
    let shows = db::shows::list_shows(&state.db).await?;

    state
        .templates
        .render("pages/shows.html", flash, &ShowsPage { shows })
}

/// GET /shows/create
pub async fn create_show_form(
    State(state): State<AppState>,
    flash: Flash,
) -> Result<Page, PageError> {
    state.templates.render(
        "forms/new_show.html",
        flash,
        &FormPage::blank(ShowForm::starting_at(state.now())),
    )
}

/// POST /shows/create
///
/// A show naming an unknown artist or venue is rejected by the database and
/// reported like any other failed listing.
pub async fn create_show_submission(
    State(state): State<AppState>,
    mut flash: Flash,
    fields: FormFields,
) -> Result<Page, PageError> {
    let form = ShowForm::from_fields(&fields);

    let show = match form.clone().into_new_show() {
        Ok(show) => show,
        Err(errors) => {
            let errors = field_errors(&errors);
            flash.push(error_summary(&errors));
            return state.templates.render(
                "forms/new_show.html",
                flash,
                &FormPage::invalid(form, errors),
            );
        }
    };

    match db::shows::insert_show(&state.db, &show).await {
        Ok(id) => {
            info!(
                "Listed show {} (artist {} at venue {})",
                id, show.artist_id, show.venue_id
            );
            flash.push("Show was successfully listed!");
        }
        Err(e) => {
            if e.is_constraint_violation() {
                warn!(
                    "Rejected show for artist {} at venue {}: {}",
                    show.artist_id, show.venue_id, e
                );
            } else {
                error!("Failed to list show: {}", e);
            }
            flash.push("An error occurred. Show could not be listed.");
        }
    }

    home(&state, flash)
}
