pub mod gateway;

pub use gateway::{HttpGateway, RecommendationGateway};
