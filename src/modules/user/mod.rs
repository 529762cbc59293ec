pub mod controller;
pub mod models;
pub mod repository;
pub mod service;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use bookhouse_db::Store;
use bookhouse_kernel::{settings::Settings, InitCtx, Module};
use serde_json::json;

use models::UserDocument;
use repository::UserRepository;
use service::UserService;

/// Registration module: `/api/user/auth/register`
pub struct UserModule {
    service: Arc<UserService>,
}

impl UserModule {
    pub fn new(store: Arc<dyn Store<UserDocument>>) -> Self {
        Self {
            service: Arc::new(UserService::new(UserRepository::new(store))),
        }
    }
}

#[async_trait]
impl Module for UserModule {
    fn name(&self) -> &'static str {
        "user"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "user module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        controller::routes(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/auth/register": {
                    "post": {
                        "summary": "Register a user",
                        "tags": ["Users"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/UserRegistration" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "User registered",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Message" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Registration rejected",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Message" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "UserRegistration": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "email": { "type": "string" },
                            "password": { "type": "string" },
                            "confirm_password": { "type": "string" }
                        },
                        "required": ["name", "email", "password", "confirm_password"]
                    },
                    "Message": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" }
                        },
                        "required": ["message"]
                    }
                }
            }
        }))
    }
}

/// Connect the user store and create the module
pub fn create_module(settings: &Settings) -> anyhow::Result<Arc<dyn Module>> {
    let store = bookhouse_db::connect::<UserDocument>(&settings.database)
        .context("failed to open user store")?;
    Ok(Arc::new(UserModule::new(store)))
}
