pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
/// Value types exchanged with the recommendation service
pub mod models;
pub mod services;
/// Loads recommendations and the catalog, and reports watches back so the
/// next refresh reflects them
pub mod session;
pub mod view;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::{HttpGateway, RecommendationGateway};
pub use session::SessionController;
