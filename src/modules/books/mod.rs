pub mod accessor;
pub mod cache;
pub mod controller;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use bookhouse_db::Store;
use bookhouse_kernel::{
    settings::{CacheSettings, Settings},
    InitCtx, Module,
};
use serde_json::json;

use accessor::BookAccessor;
use cache::CatalogCache;
use models::BookDocument;
use repository::BookRepository;
use service::BookService;

/// Catalog module: `/api/books/{all,new,update,delete}`
pub struct BooksModule {
    service: Arc<BookService>,
    invalidate_on_write: bool,
}

impl BooksModule {
    /// Wire the pipeline over `store` with a fresh, empty catalog cache.
    pub fn new(store: Arc<dyn Store<BookDocument>>, cache: &CacheSettings) -> Self {
        let repository = BookRepository::new(
            BookAccessor::new(store),
            Arc::new(CatalogCache::new()),
            cache.invalidate_on_write,
        );

        Self {
            service: Arc::new(BookService::new(repository)),
            invalidate_on_write: cache.invalidate_on_write,
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            invalidate_on_write = self.invalidate_on_write,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        controller::routes(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Connect the book store and create the module
pub fn create_module(settings: &Settings) -> anyhow::Result<Arc<dyn Module>> {
    let store = bookhouse_db::connect::<BookDocument>(&settings.database)
        .context("failed to open book store")?;
    Ok(Arc::new(BooksModule::new(store, &settings.cache)))
}

fn book_request_body() -> serde_json::Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookRequest" }
            }
        }
    })
}

fn message_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": { "type": "string" } }
        }
    })
}

fn validation_response() -> serde_json::Value {
    json!({
        "description": "Book validation failed",
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ValidationFailure" }
            }
        }
    })
}

fn book_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        }
    })
}

fn internal_error_response() -> serde_json::Value {
    json!({
        "description": "Internal server error",
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn bookid_parameter() -> serde_json::Value {
    json!({
        "name": "bookid",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    })
}

fn openapi_fragment() -> serde_json::Value {
    json!({
        "paths": {
            "/all": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "Every book, or the string \"No books available\"",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "oneOf": [
                                            {
                                                "type": "array",
                                                "items": { "$ref": "#/components/schemas/Book" }
                                            },
                                            { "type": "string" }
                                        ]
                                    }
                                }
                            }
                        },
                        "500": internal_error_response()
                    }
                }
            },
            "/new": {
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": book_request_body(),
                    "responses": {
                        "201": book_response("Created book"),
                        "400": message_response("Book could not be added"),
                        "412": validation_response(),
                        "500": internal_error_response()
                    }
                }
            },
            "/update/{bookid}": {
                "put": {
                    "summary": "Update a book",
                    "tags": ["Books"],
                    "parameters": [bookid_parameter()],
                    "requestBody": book_request_body(),
                    "responses": {
                        "200": book_response("Updated book"),
                        "400": message_response("Book could not be updated"),
                        "412": validation_response(),
                        "500": internal_error_response()
                    }
                }
            },
            "/delete/{bookid}": {
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [bookid_parameter()],
                    "responses": {
                        "204": { "description": "Book deleted" },
                        "400": message_response("Book could not be deleted"),
                        "500": internal_error_response()
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "BookFields": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "author": { "type": "string" },
                        "publication": {
                            "type": "integer",
                            "description": "Publication year"
                        }
                    },
                    "required": ["name", "description", "author", "publication"]
                },
                "BookRequest": {
                    "type": "object",
                    "properties": {
                        "book": { "$ref": "#/components/schemas/BookFields" }
                    },
                    "required": ["book"]
                },
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "author": { "type": "string" },
                        "publication": { "type": "integer" },
                        "createdAt": { "type": "string", "format": "date-time" }
                    },
                    "required": ["id", "name", "description", "author", "publication", "createdAt"]
                }
            }
        }
    })
}
