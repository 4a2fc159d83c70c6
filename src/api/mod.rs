pub mod cbbd_client;
pub mod handlers;
pub mod models;
pub mod routes;

pub use cbbd_client::CbbdClient;
