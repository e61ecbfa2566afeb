//! # peermatch Engine
//!
//! The recommendation engine for peermatch: feature encoding, cluster
//! assignment, and similarity ranking over a user population.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────┐     ┌─────────────┐     ┌──────────────┐
//! │ Population │────>│   Encoder   │────>│  Partition   │
//! │ (records)  │     │ (fit+align) │     │  (k-means)   │
//! └────────────┘     └─────────────┘     └──────────────┘
//!                                               │
//!                    ┌─────────────┐     ┌──────────────┐
//!                    │   Sampled   │<────│   Ranker     │
//!                    │   result    │     │ (in-cluster) │
//!                    └─────────────┘     └──────────────┘
//! ```
//!
//! Everything is request-scoped: [`Recommender::recommend`] refits the
//! encoder and the partition model on each call and discards them with
//! the result.
//!
//! ## Example
//!
//! ```rust
//! use peermatch_core::{UserProfile, UserRecord};
//! use peermatch_engine::Recommender;
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

pub mod encoder;
pub mod ranker;
pub mod recommend;

pub use encoder::FeatureEncoder;
pub use ranker::{Recommendation, SimilarityRanker, DEFAULT_POOL_SIZE};
pub use recommend::{Recommender, DEFAULT_CLUSTERS, DEFAULT_SEED};
