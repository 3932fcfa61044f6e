use minijinja::{context, Environment};
use serde::Serialize;

use crate::{error::AppResult, models::Video, session::SessionState};

use super::{card::VideoCard, sidebar::RecommendationPanel};

const INDEX_TEMPLATE: &str = "index.html";
const LOADING_TEMPLATE: &str = "loading.html";

/// The pinned video shown above the catalog
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectedVideoPanel {
    pub card: VideoCard,
    pub description: Option<String>,
}

impl SelectedVideoPanel {
    fn new(video: &Video) -> Self {
        Self {
            card: VideoCard::new(video, None, None),
            description: video.description.clone(),
        }
    }
}

/// Everything one render of the page needs, derived from `SessionState`
///
/// Never stored; build a fresh one per render.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionView {
    pub loading: bool,
    pub user_id: i64,
    pub selected: Option<SelectedVideoPanel>,
    pub heading: &'static str,
    pub grid: Vec<VideoCard>,
    pub sidebar: RecommendationPanel,
}

impl SessionView {
    pub fn from_state(state: &SessionState) -> Self {
        let selected = state.selected_video();

        // Pinned video: browse the catalog below it. Otherwise: the recommendations.
        let (heading, grid_videos): (_, Vec<&Video>) = match selected {
            Some(_) => ("More Videos", state.videos().iter().collect()),
            None => (
                "Recommended for You",
                state.recommendations().iter().map(|r| &r.video).collect(),
            ),
        };

        let grid = grid_videos
            .into_iter()
            .map(|video| {
                let rec = state.recommendation_for(video.id);
                VideoCard::new(
                    video,
                    rec.map(|r| r.similarity_score),
                    rec.map(|r| r.reason.as_str()),
                )
            })
            .collect();

        Self {
            loading: state.is_loading(),
            user_id: state.user_id(),
            selected: selected.map(SelectedVideoPanel::new),
            heading,
            grid,
            sidebar: RecommendationPanel::new(state.recommendations()),
        }
    }
}

/// HTML renderer for `SessionView`
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
        env.add_template(LOADING_TEMPLATE, include_str!("../../templates/loading.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, view: &SessionView) -> AppResult<String> {
        let name = if view.loading {
            LOADING_TEMPLATE
        } else {
            INDEX_TEMPLATE
        };
        let html = self.env.get_template(name)?.render(context! { view => view })?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::RecommendationResponse,
        session::{
            state::tests::{rec, video},
            SessionEvent,
        },
    };

    fn loaded(
        recommendations: Vec<crate::models::Recommendation>,
        videos: Vec<Video>,
    ) -> SessionState {
        let mut state = SessionState::new(1);
        state.update(SessionEvent::LoadSettled {
            recommendations: Ok(RecommendationResponse {
                user_id: 1,
                total: recommendations.len() as i64,
                recommendations,
            }),
            videos: Ok(videos),
        });
        state
    }

    #[test]
    fn test_browsing_grid_shows_recommendations() {
        let state = loaded(
            vec![rec(3, 0.4, "Popular"), rec(4, 0.9, "Trending")],
            vec![video(1)],
        );
        let view = SessionView::from_state(&state);
        assert_eq!(view.heading, "Recommended for You");
        assert!(view.selected.is_none());
        // Grid keeps service order; only the sidebar is ranked.
        assert_eq!(view.grid.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(view.sidebar.entries[0].card.id, 4);
    }

    #[test]
    fn test_viewing_grid_shows_catalog() {
        let mut state = loaded(vec![rec(2, 0.8, "similar genre")], vec![video(1), video(2)]);
        state.update(SessionEvent::VideoSelected(video(1)));
        let view = SessionView::from_state(&state);
        assert_eq!(view.heading, "More Videos");
        assert_eq!(view.selected.as_ref().unwrap().card.id, 1);
        assert_eq!(
            view.selected.as_ref().unwrap().description.as_deref(),
            Some("Description 1")
        );
        assert_eq!(view.grid.len(), 2);
    }

    #[test]
    fn test_grid_annotations_are_looked_up_by_id() {
        let mut state = loaded(vec![rec(2, 0.8, "similar genre")], vec![video(1), video(2)]);
        state.update(SessionEvent::VideoSelected(video(1)));
        let view = SessionView::from_state(&state);

        let x = &view.grid[0];
        let y = &view.grid[1];
        assert_eq!(x.id, 1);
        assert_eq!(x.match_percent, None);
        assert_eq!(x.reason, None);
        assert_eq!(y.id, 2);
        assert_eq!(y.match_percent, Some(80));
        assert_eq!(y.reason.as_deref(), Some("similar genre"));
    }

    #[test]
    fn test_render_loading_page() {
        let renderer = Renderer::new().unwrap();
        let view = SessionView::from_state(&SessionState::new(1));
        let html = renderer.render(&view).unwrap();
        assert!(html.contains("Loading..."));
    }

    #[test]
    fn test_render_escapes_titles() {
        let mut evil = rec(5, 0.5, "Popular");
        evil.video.title = "<script>alert(1)</script>".to_string();
        let state = loaded(vec![evil], vec![]);

        let html = Renderer::new()
            .unwrap()
            .render(&SessionView::from_state(&state))
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("50% match"));
        assert!(html.contains("Top Recommendations"));
    }

    #[test]
    fn test_render_empty_state() {
        let state = loaded(vec![], vec![]);
        let html = Renderer::new()
            .unwrap()
            .render(&SessionView::from_state(&state))
            .unwrap();
        assert!(html.contains("Recommended for You"));
        assert!(!html.contains("based on your viewing history"));
    }
}
