//! HTTP handlers for `/api/books`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use bookhouse_http::error::AppError;

use super::{models::Book, service::BookService, validation::ValidatedBook};

pub const NO_BOOKS_AVAILABLE: &str = "No books available";
pub const ALL_FIELDS_REQUIRED: &str = "All the fields are required";
pub const BOOK_ID_REQUIRED: &str = "Book ID is required";
pub const ADD_FAILED: &str = "An error has occured while adding the books";
pub const UPDATE_FAILED: &str = "An error has occured while updating the books";
pub const DELETE_FAILED: &str = "An error has occured while deleting the book";

pub fn routes(service: Arc<BookService>) -> Router {
    Router::new()
        .route("/all", get(list_books))
        .route("/new", post(create_book))
        .route("/update/{bookid}", put(update_book))
        .route("/delete", delete(delete_without_id))
        .route("/delete/", delete(delete_without_id))
        .route("/delete/{bookid}", delete(delete_book))
        .with_state(service)
}

/// An empty catalog is still a 200, with a message instead of an array.
async fn list_books(State(service): State<Arc<BookService>>) -> Result<Response, AppError> {
    let books = service
        .list_all()
        .await
        .map_err(|err| AppError::Internal(err.into()))?;

    if books.is_empty() {
        return Ok((StatusCode::OK, Json(NO_BOOKS_AVAILABLE)).into_response());
    }

    Ok((StatusCode::OK, Json(books.as_slice())).into_response())
}

async fn create_book(
    State(service): State<Arc<BookService>>,
    ValidatedBook(fields): ValidatedBook,
) -> Result<(StatusCode, Json<Book>), AppError> {
    if !fields.is_complete() {
        return Err(AppError::bad_request(ALL_FIELDS_REQUIRED));
    }

    match service.create(fields).await {
        Ok(book) => Ok((StatusCode::CREATED, Json(book))),
        Err(err) => {
            tracing::debug!(error = %err, "book not created");
            Err(AppError::bad_request(ADD_FAILED))
        }
    }
}

async fn update_book(
    State(service): State<Arc<BookService>>,
    Path(bookid): Path<String>,
    ValidatedBook(fields): ValidatedBook,
) -> Result<Json<Book>, AppError> {
    if bookid.trim().is_empty() || !fields.is_complete() {
        return Err(AppError::bad_request(ALL_FIELDS_REQUIRED));
    }

    match service.update(&bookid, fields).await {
        Ok(Some(book)) => Ok(Json(book)),
        Ok(None) => {
            tracing::debug!(%bookid, "book to update not found");
            Err(AppError::bad_request(UPDATE_FAILED))
        }
        Err(err) => {
            tracing::debug!(%bookid, error = %err, "book not updated");
            Err(AppError::bad_request(UPDATE_FAILED))
        }
    }
}

async fn delete_book(
    State(service): State<Arc<BookService>>,
    Path(bookid): Path<String>,
) -> Result<StatusCode, AppError> {
    if bookid.trim().is_empty() {
        return Err(AppError::bad_request(BOOK_ID_REQUIRED));
    }

    match service.delete(&bookid).await {
        Ok(Some(_)) => Ok(StatusCode::NO_CONTENT),
        Ok(None) => {
            tracing::debug!(%bookid, "book to delete not found");
            Err(AppError::bad_request(DELETE_FAILED))
        }
        Err(err) => {
            tracing::debug!(%bookid, error = %err, "book not deleted");
            Err(AppError::bad_request(DELETE_FAILED))
        }
    }
}

async fn delete_without_id() -> AppError {
    AppError::bad_request(BOOK_ID_REQUIRED)
}
