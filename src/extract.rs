// src/extract.rs
//! `Json` and `Query` extractors whose rejections render as [`AppError`].

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query};

use crate::error::AppError;

/// Request body as JSON. Bad syntax, a wrong content type or a missing field
/// comes back in the usual `{error, status_code}` envelope.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
