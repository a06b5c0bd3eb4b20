//! Page handlers for the Fyyur site

pub mod artists;
pub mod pages;
pub mod shows;
pub mod venues;

use serde::Serialize;

use crate::forms::FieldErrors;

/// Context of a create or edit form page
#[derive(Debug, Serialize)]
pub struct FormPage<F> {
    pub form: F,
    pub errors: FieldErrors,
    /// Entity being edited; absent on create forms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl<F> FormPage<F> {
    pub fn blank(form: F) -> Self {
        Self {
            form,
            errors: FieldErrors::new(),
            id: None,
        }
    }

    pub fn invalid(form: F, errors: FieldErrors) -> Self {
        Self {
            form,
            errors,
            id: None,
        }
    }

    pub fn editing(id: i64, form: F) -> Self {
        Self {
            form,
            errors: FieldErrors::new(),
            id: Some(id),
        }
    }
}

/// Search results page context
#[derive(Debug, Serialize)]
pub struct SearchPage<T> {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> SearchPage<T> {
    pub fn new(search_term: String, data: Vec<T>) -> Self {
        Self {
            search_term,
            count: data.len(),
            data,
        }
    }
}
