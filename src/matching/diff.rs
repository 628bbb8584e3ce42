use crate::catalog::TrackDescriptor;
use crate::matching::similarity::track_similarity;

/// Source tracks with no destination track passing [`track_similarity`], in source order
pub fn find_missing(
    source: &[TrackDescriptor],
    destination: &[TrackDescriptor],
    threshold: f64,
) -> Vec<TrackDescriptor> {
    source
        .iter()
        .filter(|source_track| {
            !destination
                .iter()
                .any(|destination_track| track_similarity(source_track, destination_track, threshold))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::similarity::DEFAULT_PRESENCE_THRESHOLD;

    fn library() -> Vec<TrackDescriptor> {
        vec![
            TrackDescriptor::new("Bohemian Rhapsody", "Queen"),
            TrackDescriptor::new("Song 2", "Blur"),
            TrackDescriptor::new("Группа крови", "КИНО"),
        ]
    }

    #[test]
    fn test_find_missing_self_is_empty() {
        let tracks = library();
        assert_eq!(find_missing(&tracks, &tracks, DEFAULT_PRESENCE_THRESHOLD), vec![]);
    }

    #[test]
    fn test_find_missing_empty_destination() {
        let tracks = library();
        assert_eq!(find_missing(&tracks, &[], DEFAULT_PRESENCE_THRESHOLD), tracks);
    }

    #[test]
    fn test_find_missing_empty_source() {
        assert_eq!(find_missing(&[], &library(), DEFAULT_PRESENCE_THRESHOLD), vec![]);
    }

    #[test]
    fn test_find_missing_preserves_source_order() {
        let source = library();
        let destination = vec![TrackDescriptor::new("Song 2!", "blur")];
        let missing = find_missing(&source, &destination, DEFAULT_PRESENCE_THRESHOLD);
        assert_eq!(missing, vec![source[0].clone(), source[2].clone()]);
    }

    #[test]
    fn test_find_missing_tolerates_punctuation_and_case() {
        let source = vec![TrackDescriptor::new("Don't Stop Me Now", "Queen")];
        let destination = vec![
            TrackDescriptor::new("Killer Queen", "Queen"),
            TrackDescriptor::new("Dont Stop Me Now", "QUEEN"),
        ];
        assert_eq!(
            find_missing(&source, &destination, DEFAULT_PRESENCE_THRESHOLD),
            vec![],
        );
    }

    #[test]
    fn test_find_missing_idempotent() {
        let source = library();
        let destination = vec![TrackDescriptor::new("Bohemian Rhapsody", "Queen")];
        let first = find_missing(&source, &destination, DEFAULT_PRESENCE_THRESHOLD);
        let second = find_missing(&source, &destination, DEFAULT_PRESENCE_THRESHOLD);
        assert_eq!(first, second);
        assert_eq!(source, library());
    }
}
