//! # peermatch Store
//!
//! User record store adapter: fetches raw user documents from a backing
//! document store and projects them into the typed record schema. The
//! fetch is read-only; staleness is bounded by request latency since the
//! engine refits from a fresh snapshot on every call.

pub mod projection;
pub mod store;

pub use projection::project_user;
pub use store::{HttpUserStore, MemoryUserStore, UserStore};
