use std::cmp::Ordering;

use serde::Serialize;

use crate::models::Recommendation;

use super::card::VideoCard;

/// Number of entries in the "Top Recommendations" panel
pub const TOP_N: usize = 5;

/// One ranked row of the panel
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedEntry {
    /// 1-based; doubles as the placeholder glyph when there is no thumbnail
    pub rank: usize,
    pub card: VideoCard,
}

/// The top-N recommendations, best first
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationPanel {
    pub entries: Vec<RankedEntry>,
    /// "Based on your viewing history" note, only when there is anything to explain
    pub show_footnote: bool,
}

impl RecommendationPanel {
    pub fn new(recommendations: &[Recommendation]) -> Self {
        let entries = top_recommendations(recommendations, TOP_N)
            .into_iter()
            .enumerate()
            .map(|(i, rec)| RankedEntry {
                rank: i + 1,
                // The sidebar shows the match only; the reason lives in the grid.
                card: VideoCard::new(&rec.video, Some(rec.similarity_score), None),
            })
            .collect();

        Self {
            entries,
            show_footnote: !recommendations.is_empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Highest `similarity_score` first, at most `n` entries
///
/// The sort is stable, so equal scores keep their input order. NaN scores
/// rank last. The input slice is left untouched.
pub fn top_recommendations(recommendations: &[Recommendation], n: usize) -> Vec<&Recommendation> {
    let mut ranked: Vec<&Recommendation> = recommendations.iter().collect();
    ranked.sort_by(|a, b| {
        rank_key(b.similarity_score)
            .partial_cmp(&rank_key(a.similarity_score))
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Video;

    fn rec(id: i64, score: f64) -> Recommendation {
        Recommendation {
            video: Video {
                id,
                video_id: format!("v{}", id),
                title: format!("Video {}", id),
                description: None,
                tags: None,
                category: None,
                duration: None,
                thumbnail_url: None,
                views: 0,
                likes: 0,
                created_at: String::new(),
            },
            similarity_score: score,
            reason: "Similar content".to_string(),
        }
    }

    fn ids(ranked: &[&Recommendation]) -> Vec<i64> {
        ranked.iter().map(|r| r.video.id).collect()
    }

    #[test]
    fn test_ranking_is_stable_descending() {
        // A=1, B=2, C=3, D=4
        let input = vec![rec(1, 0.5), rec(2, 0.9), rec(3, 0.9), rec(4, 0.1)];
        assert_eq!(ids(&top_recommendations(&input, TOP_N)), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_ranking_truncates_to_top_n() {
        let input: Vec<_> = (1..=8).map(|i| rec(i, i as f64 / 10.0)).collect();
        let ranked = top_recommendations(&input, TOP_N);
        assert_eq!(ids(&ranked), vec![8, 7, 6, 5, 4]);
    }

    #[test]
    fn test_ranking_keeps_order_among_many_ties() {
        let input = vec![rec(5, 0.3), rec(1, 0.3), rec(9, 0.7), rec(2, 0.3), rec(7, 0.3)];
        assert_eq!(ids(&top_recommendations(&input, TOP_N)), vec![9, 5, 1, 2, 7]);
    }

    #[test]
    fn test_ranking_does_not_mutate_input() {
        let input = vec![rec(1, 0.1), rec(2, 0.9)];
        let _ = top_recommendations(&input, TOP_N);
        assert_eq!(input[0].video.id, 1);
        assert_eq!(input[1].video.id, 2);
    }

    #[test]
    fn test_nan_scores_rank_last() {
        let input = vec![rec(1, f64::NAN), rec(2, 0.2), rec(3, -1.0)];
        assert_eq!(ids(&top_recommendations(&input, TOP_N)), vec![2, 3, 1]);
    }

    #[test]
    fn test_empty_panel() {
        let panel = RecommendationPanel::new(&[]);
        assert!(panel.is_empty());
        assert!(!panel.show_footnote);
    }

    #[test]
    fn test_panel_entries_carry_rank_and_percent() {
        let input = vec![rec(1, 0.42), rec(2, 0.995)];
        let panel = RecommendationPanel::new(&input);
        assert!(panel.show_footnote);
        assert_eq!(panel.entries[0].rank, 1);
        assert_eq!(panel.entries[0].card.id, 2);
        assert_eq!(panel.entries[0].card.match_percent, Some(100));
        assert_eq!(panel.entries[1].rank, 2);
        assert_eq!(panel.entries[1].card.match_percent, Some(42));
        assert_eq!(panel.entries[1].card.reason, None);
    }

    #[test]
    fn test_panel_entry_click_selects_video() {
        let input = vec![rec(3, 0.6)];
        let panel = RecommendationPanel::new(&input);
        match panel.entries[0].card.activate() {
            crate::session::SessionEvent::VideoSelected(v) => assert_eq!(v.id, 3),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
