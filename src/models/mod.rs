mod recommendation;
mod video;
mod watch;

pub use recommendation::{
    Recommendation, RecommendationResponse, SimilarVideo, SimilarVideosResponse,
};
pub use video::Video;
pub use watch::{WatchAck, WatchRequest};
