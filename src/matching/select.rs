use crate::catalog::{CandidateTrack, TrackDescriptor};
use crate::matching::similarity::title_artist_score;

pub const DEFAULT_MIN_SCORE: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub candidate: &'a CandidateTrack,
    pub score: f64,
}

/// Picks the highest [`title_artist_score`] strictly above `min_score`.
///
/// Equal scores keep the earlier candidate.
pub fn select_best<'a>(
    target: &TrackDescriptor,
    candidates: &'a [CandidateTrack],
    min_score: f64,
) -> Option<MatchResult<'a>> {
    select_best_by(candidates, min_score, |candidate| {
        title_artist_score(target, candidate)
    })
}

fn select_best_by<'a>(
    candidates: &'a [CandidateTrack],
    min_score: f64,
    mut score: impl FnMut(&CandidateTrack) -> f64,
) -> Option<MatchResult<'a>> {
    let mut best: Option<MatchResult<'a>> = None;
    for candidate in candidates {
        let candidate_score = score(candidate);
        if candidate_score <= min_score {
            continue;
        }
        if best
            .as_ref()
            .is_none_or(|current| candidate_score > current.score)
        {
            best = Some(MatchResult {
                candidate,
                score: candidate_score,
            });
        }
    }
    best
}
