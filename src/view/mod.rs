pub mod card;
pub mod page;
pub mod sidebar;

pub use card::{match_percent, Thumbnail, VideoCard};
pub use page::{Renderer, SelectedVideoPanel, SessionView};
pub use sidebar::{top_recommendations, RankedEntry, RecommendationPanel, TOP_N};
