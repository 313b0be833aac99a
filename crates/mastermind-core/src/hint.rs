use crate::{score, session::History, Code, Palette};
use rand::{seq::SliceRandom, Rng};
use smallvec::SmallVec;

/// How many random candidates are drawn at most for a single hint
pub const SAMPLE_BUDGET: usize = 100;

/// Sampling stops once this many consistent candidates are found
pub const CANDIDATE_CAP: usize = 10;

/// Suggest a code to play next
///
/// Without any history, this is a random code.
/// Otherwise, up to [`SAMPLE_BUDGET`] random codes are drawn and every code that would have
/// produced the same feedback for all previous guesses is kept, up to [`CANDIDATE_CAP`] of them.
/// The hint is picked uniformly from those candidates.
///
/// The search is not exhaustive. If no candidate is found, the hint is just a random code
/// and may contradict the history.
pub fn suggest_hint<R: Rng + ?Sized>(
    history: &History,
    palette: &Palette,
    code_length: usize,
    rng: &mut R,
) -> Code {
    if history.is_empty() {
        return palette.random_code(code_length, rng);
    }

    let (samples, candidates) = sample_candidates(history, palette, code_length, rng);

    tracing::debug!(
        samples,
        consistent = candidates.len(),
        "sampled hint candidates"
    );

    match candidates.choose(rng) {
        Some(hint) => hint.clone(),
        None => {
            tracing::debug!("no consistent candidate found, falling back to a random code");
            palette.random_code(code_length, rng)
        }
    }
}

type Candidates = SmallVec<[Code; CANDIDATE_CAP]>;

/// Draw random codes until the budget is spent or enough consistent ones are found
///
/// Returns the number of codes drawn and the consistent ones among them.
pub(crate) fn sample_candidates<R: Rng + ?Sized>(
    history: &History,
    palette: &Palette,
    code_length: usize,
    rng: &mut R,
) -> (usize, Candidates) {
    let mut candidates = Candidates::new();
    let mut samples = 0;

    while samples < SAMPLE_BUDGET && candidates.len() < CANDIDATE_CAP {
        samples += 1;
        let candidate = palette.random_code(code_length, rng);
        // the candidate takes the role of the secret
        let consistent = history
            .iter()
            .all(|entry| score(&entry.guess, &candidate) == entry.feedback);
        if consistent {
            candidates.push(candidate);
        }
    }

    (samples, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Feedback, HistoryEntry};
    use rand::{rngs::StdRng, SeedableRng};

    fn entry(guess: Code, secret: &Code) -> HistoryEntry {
        let feedback = score(&guess, secret);
        HistoryEntry { guess, feedback }
    }

    #[test]
    fn test_hint_without_history() {
        let palette = Palette::default();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let hint = suggest_hint(&History::default(), &palette, 4, &mut rng);
            assert_eq!(hint.len(), 4);
            assert!(hint.iter().all(|&c| palette.contains(c)));
        }
    }

    #[test]
    fn test_hint_is_consistent_in_small_space() {
        // 2 colors and 2 positions: 4 codes, 100 samples will find a consistent one
        let palette = Palette::new(["a", "b"]).unwrap();
        let secret = Code::from([Color::new(1), Color::new(0)]);
        let mut history = History::default();
        history.push(entry(Code::from([Color::new(0), Color::new(0)]), &secret));
        history.push(entry(Code::from([Color::new(0), Color::new(1)]), &secret));

        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            let hint = suggest_hint(&history, &palette, 2, &mut rng);
            assert_eq!(hint, secret);
        }
    }

    #[test]
    fn test_hint_matches_all_feedback() {
        let palette = Palette::new(["a", "b", "c"]).unwrap();
        let secret = Code::from([Color::new(2), Color::new(0), Color::new(2)]);
        let mut history = History::default();
        history.push(entry(Code::from([Color::new(0); 3]), &secret));

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let hint = suggest_hint(&history, &palette, 3, &mut rng);
            for entry in &history {
                assert_eq!(score(&entry.guess, &hint), entry.feedback);
            }
        }
    }

    #[test]
    fn test_sampling_stops_at_candidate_cap() {
        // with a single color every code is the same and always consistent
        let palette = Palette::new(["a"]).unwrap();
        let history = [Code::from([Color::new(0); 2])]
            .into_iter()
            .map(|guess| entry(guess, &Code::from([Color::new(0); 2])))
            .collect::<History>();

        let mut rng = StdRng::seed_from_u64(5);
        let (samples, candidates) = sample_candidates(&history, &palette, 2, &mut rng);
        assert_eq!(samples, CANDIDATE_CAP);
        assert_eq!(candidates.len(), CANDIDATE_CAP);
    }

    #[test]
    fn test_sampling_spends_whole_budget() {
        let palette = Palette::default();
        let history = std::iter::once(HistoryEntry {
            guess: Code::from([Color::new(0); 4]),
            feedback: Feedback::new(0, 4),
        })
        .collect::<History>();

        let mut rng = StdRng::seed_from_u64(6);
        let (samples, candidates) = sample_candidates(&history, &palette, 4, &mut rng);
        assert_eq!(samples, SAMPLE_BUDGET);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_sampling_stops_early_with_some_consistent() {
        // 2 of 4 codes are consistent, about 20 samples are needed for 10 candidates
        let palette = Palette::new(["a", "b"]).unwrap();
        let secret = Code::from([Color::new(0), Color::new(1)]);
        let history = std::iter::once(entry(Code::from([Color::new(0); 2]), &secret))
            .collect::<History>();

        let mut rng = StdRng::seed_from_u64(7);
        let (samples, candidates) = sample_candidates(&history, &palette, 2, &mut rng);
        assert_eq!(candidates.len(), CANDIDATE_CAP);
        assert!((CANDIDATE_CAP..SAMPLE_BUDGET).contains(&samples));
        assert!(candidates
            .iter()
            .all(|c| score(&Code::from([Color::new(0); 2]), c) == Feedback::new(1, 0)));
    }

    #[test]
    fn test_hint_falls_back_to_random() {
        let palette = Palette::default();
        let mut history = History::default();
        // no code can ever produce this feedback
        history.push(HistoryEntry {
            guess: Code::from([Color::new(0); 4]),
            feedback: Feedback::new(0, 4),
        });

        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            let hint = suggest_hint(&history, &palette, 4, &mut rng);
            assert_eq!(hint.len(), 4);
            assert!(hint.iter().all(|&c| palette.contains(c)));
        }
    }

    #[test]
    fn test_hint_from_collected_history() {
        let palette = Palette::new(["a", "b"]).unwrap();
        let secret = Code::from([Color::new(1), Color::new(1)]);
        let history = [
            Code::from([Color::new(0), Color::new(1)]),
            Code::from([Color::new(0), Color::new(0)]),
        ]
        .into_iter()
        .map(|guess| entry(guess, &secret))
        .collect::<History>();
        assert_eq!(history.len(), 2);

        // [a, a] also explains the first guess, but not the second
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(suggest_hint(&history, &palette, 2, &mut rng), secret);
    }
}
