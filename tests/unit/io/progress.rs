//! Tests for search progress display

#[cfg(test)]
mod tests {
    use venation::io::progress::SearchProgress;
    use venation::search::executor::Rejection;

    // Tests observed rejections accumulate in the tally
    // Verified by recording only the latest rejection
    #[test]
    fn test_observe_accumulates() {
        let mut progress = SearchProgress::new(10);

        progress.observe(1, Some(Rejection::Collision));
        progress.observe(2, Some(Rejection::OutOfBounds));
        progress.observe(3, Some(Rejection::Collision));
        progress.observe(4, None);

        assert_eq!(progress.tally().collision, 2);
        assert_eq!(progress.tally().out_of_bounds, 1);
        assert_eq!(progress.tally().total(), 3);
        progress.finish(true);
    }

    // Tests finishing without an accepted candidate does not panic
    // Verified by unwrapping the accepted candidate on finish
    #[test]
    fn test_finish_without_acceptance() {
        let progress = SearchProgress::new(0);
        progress.finish(false);
        assert_eq!(progress.tally().total(), 0);
    }
}
