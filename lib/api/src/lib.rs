//! # peermatch API
//!
//! REST surface for the recommendation engine. One endpoint:
//!
//! - `POST /recommendations` with `{"user": {...}, "nums": 5}` returns
//!   `{"result": [{"id": ..., "similarity": ...}, ...]}` or a single
//!   `{"error": ...}` object.

pub mod rest;

pub use rest::RestApi;
