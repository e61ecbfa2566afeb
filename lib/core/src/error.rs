use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no user data provided")]
    EmptyQuery,

    #[error("query user missing required fields: {}", .fields.join(", "))]
    InvalidQuery { fields: Vec<String> },

    #[error("user {id} missing required fields: {}", .fields.join(", "))]
    IncompleteRecord { id: String, fields: Vec<String> },

    #[error("store error: {0}")]
    Store(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
