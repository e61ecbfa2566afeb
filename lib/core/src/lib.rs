//! # peermatch Core
//!
//! Core library for the peermatch recommendation engine.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`UserRecord`] / [`UserProfile`] - Typed user attribute schema with
//!   required-field validation
//! - [`Vector`] - Dense vector representation with cosine/L2 numerics
//! - [`KMeans`] / [`PartitionModel`] - K-means partitioning with seeded
//!   multi-restart fitting and nearest-centroid prediction
//! - [`Error`] - The error taxonomy shared across the workspace
//!
//! ## Example
//!
//! ```rust
//! use peermatch_core::{KMeans, Vector};
//!
//! let population = vec![
//!     Vector::new(vec![0.0, 0.0]),
//!     Vector::new(vec![0.1, 0.0]),
//!     Vector::new(vec![9.9, 10.0]),
//!     Vector::new(vec![10.0, 10.0]),
//! ];
//!
//! let model = KMeans::new(2).with_seed(42).fit(&population).unwrap();
//! let group = model.predict(&Vector::new(vec![0.05, 0.0]));
//! assert!(group < 2);
//! ```

pub mod error;
pub mod kmeans;
pub mod record;
pub mod vector;

pub use error::{Error, Result};
pub use kmeans::{KMeans, PartitionModel};
pub use record::{UserProfile, UserRecord};
pub use vector::Vector;
