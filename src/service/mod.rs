pub mod loader;
pub mod repository;
pub mod worker;

pub use repository::{NoSession, SessionProvider, StaticSession, UserRepository};
pub use worker::{JobTicket, ProcessingPool};
