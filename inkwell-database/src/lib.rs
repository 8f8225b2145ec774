pub mod database;
pub mod impls;
pub mod model;
pub mod queue;
pub mod schema;
pub mod store;

pub use database::Database;
pub use queue::JobQueue;
pub use store::DocumentStore;
