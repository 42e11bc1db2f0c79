//! `Path` and `Query` extractors whose rejections render as [`ApiError`].

use axum::extract::FromRequestParts;

use crate::error::ApiError;

/// Like [`axum::extract::Path`], but a bad segment becomes a JSON 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// Like [`axum::extract::Query`], but a bad query string becomes a JSON 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);
