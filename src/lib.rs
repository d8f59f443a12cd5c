pub mod config;
pub mod db;
pub mod error;
pub mod review;
pub mod service;

pub use db::models::{NewUser, UserRecord};
pub use db::sqlite::UserStorage;
pub use error::StoreError;
pub use service::repository::UserRepository;
pub use service::worker::ProcessingPool;
