//! Artist pages

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Response,
};
use serde::Serialize;
use tracing::{error, info};
use validator::Validate;

use crate::api::pages::home;
use crate::api::{FormPage, SearchPage};
use crate::db;
use crate::error::PageError;
use crate::flash::{redirect_with, Flash};
use crate::forms::{error_summary, field_errors, ArtistForm, FormFields};
use crate::listing::{split_shows, ShowSplit};
use crate::models::{Artist, ArtistShow, EntityRef};
use crate::templates::Page;
use crate::AppState;

#[derive(Debug, Serialize)]
struct ArtistsPage {
    artists: Vec<EntityRef>,
}

#[derive(Debug, Serialize)]
struct ArtistPage {
    artist: ArtistDetail,
}

/// An artist with their shows split around now
#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub shows: ShowSplit<ArtistShow>,
}

/// GET /artists
pub async fn list_artists(
    State(state): State<AppState>,
    flash: Flash,
) -> Result<Page, PageError> {
    let artists = db::artists::list_artists(&state.db).await?;

    state
        .templates
        .render("pages/artists.html", flash, &ArtistsPage { artists })
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    flash: Flash,
    fields: FormFields,
) -> Result<Page, PageError> {
    let term = fields.text("search_term");
    let artists = db::artists::search_artists(&state.db, term.trim()).await?;

    state.templates.render(
        "pages/search_artists.html",
        flash,
        &SearchPage::new(term, artists),
    )
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    flash: Flash,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Page, PageError> {
    let Path(artist_id) = path?;
    let artist = db::artists::get_artist(&state.db, artist_id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("artist {}", artist_id)))?;

    let shows = db::artists::artist_shows(&state.db, artist_id).await?;
    let artist = ArtistDetail {
        artist,
        shows: split_shows(shows, state.now()),
    };

    state
        .templates
        .render("pages/show_artist.html", flash, &ArtistPage { artist })
}

/// GET /artists/create
pub async fn create_artist_form(
    State(state): State<AppState>,
    flash: Flash,
) -> Result<Page, PageError> {
    state.templates.render(
        "forms/new_artist.html",
        flash,
        &FormPage::blank(ArtistForm::default()),
    )
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    mut flash: Flash,
    fields: FormFields,
) -> Result<Page, PageError> {
    let form = ArtistForm::from_fields(&fields);

    if let Err(errors) = form.validate() {
        let errors = field_errors(&errors);
        flash.push(error_summary(&errors));
        return state.templates.render(
            "forms/new_artist.html",
            flash,
            &FormPage::invalid(form, errors),
        );
    }

    let data = form.into_data();
    match db::artists::insert_artist(&state.db, &data).await {
        Ok(id) => {
            info!("Listed artist {} ({})", id, data.name);
            flash.push(format!("Artist {} was successfully listed!", data.name));
        }
        Err(e) => {
            error!("Failed to list artist {}: {}", data.name, e);
            flash.push(format!(
                "An error occurred. Artist {} could not be listed.",
                data.name
            ));
        }
    }

    home(&state, flash)
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    flash: Flash,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Page, PageError> {
    let Path(artist_id) = path?;
    let artist = db::artists::get_artist(&state.db, artist_id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("artist {}", artist_id)))?;

    state.templates.render(
        "forms/edit_artist.html",
        flash,
        &FormPage::editing(artist_id, ArtistForm::from_artist(&artist)),
    )
}

/// POST /artists/:id/edit
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    fields: FormFields,
) -> Result<Response, PageError> {
    let Path(artist_id) = path?;
    let data = ArtistForm::from_fields(&fields).into_data();
    let mut flash = Flash::default();

    match db::artists::update_artist(&state.db, artist_id, &data).await {
        Ok(true) => {
            info!("Edited artist {}", artist_id);
            flash.push(format!("{} was successfully edited!", data.name));
        }
        Ok(false) => return Err(PageError::NotFound(format!("artist {}", artist_id))),
        Err(e) => {
            error!("Failed to edit artist {}: {}", artist_id, e);
            flash.push(format!(
                "An error occurred. Artist {} could not be edited.",
                data.name
            ));
        }
    }

    Ok(redirect_with(&format!("/artists/{}", artist_id), &flash))
}
