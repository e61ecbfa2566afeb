//! # peermatch
//!
//! A peer recommendation engine: clusters a user population on mixed
//! categorical, multi-valued, and numeric attributes, then ranks
//! same-cluster members by cosine similarity.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install peermatch
//! peermatch --store-url http://localhost:8081 --http-port 4444
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use peermatch::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let member = UserProfile {
//!     education_level: Some("Bachelors".to_string()),
//!     skills_can_teach: vec!["Math".to_string()],
//!     badges: vec![],
//!     points: Some(50.0),
//!     sessions_completed: Some(3.0),
//!     questions_answered: Some(10.0),
//!     rating: Some(4.2),
//! };
//! let population: Vec<UserRecord> = (0..4)
//!     .map(|i| UserRecord::new(format!("u{i}"), member.clone()))
//!     .collect();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let result = Recommender::new()
//!     .recommend(&population, &member, 5, &mut rng)
//!     .unwrap();
//! assert!(!result.is_empty());
//! ```
//!
//! ## Crate Structure
//!
//! peermatch is composed of several crates:
//!
//! - `peermatch-core` - Record schema, vector numerics, k-means partitioning
//! - `peermatch-engine` - Feature encoding, cluster assignment, similarity ranking
//! - `peermatch-store` - Store adapter for the user document store
//! - `peermatch-api` - REST API
//!
//! ## Pipeline
//!
//! Every request runs the full pipeline against a fresh population
//! snapshot: fetch, validate, fit encoder, encode, fit k-means, predict
//! the query's cluster, rank within it, sample the top matches. Nothing
//! is cached across requests.

// Re-export core types
pub use peermatch_core::{
    Error, KMeans, PartitionModel, Result, UserProfile, UserRecord, Vector,
};

// Re-export the engine
pub use peermatch_engine::{
    FeatureEncoder, Recommendation, Recommender, SimilarityRanker,
};

// Re-export the store adapter
pub use peermatch_store::{HttpUserStore, MemoryUserStore, UserStore};

// Re-export the API
pub use peermatch_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Error, FeatureEncoder, HttpUserStore, KMeans, MemoryUserStore, PartitionModel,
        Recommendation, Recommender, RestApi, Result, SimilarityRanker, UserProfile, UserRecord,
        UserStore, Vector,
    };
}
