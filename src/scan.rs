//! Positional n-tuple scanning.
//!
//! Line `i` of one document is compared with line `i` of the other, word `k`
//! with word `k`. A run of equivalent positions only starts counting as
//! duplicated once it is `window_size` long; every further match in the run
//! then adds one to `matched`.

use thiserror::Error;
use tracing::debug;

use crate::models::{ScanParams, ScanState, TupleCounts, MAX_WINDOW_SIZE};
use crate::synonyms::SynonymIndex;
use crate::tokenize::TokenLine;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Window size must be between 1 and {}, got {0}", MAX_WINDOW_SIZE)]
    InvalidWindowSize(usize),
    #[error("No comparable content (compared tuple count is {compared})")]
    DegenerateInput { compared: i64 },
}

/// Advance the scan over one line pair.
///
/// A blank line on either side ends the current run and compares nothing.
/// Otherwise words are compared up to the shorter line, and the compared
/// count is then reduced by `window_size - 1` for the line.
pub fn scan_line_pair(
    mut state: ScanState,
    line_a: &TokenLine<'_>,
    line_b: &TokenLine<'_>,
    synonyms: &SynonymIndex,
    params: &ScanParams,
) -> ScanState {
    if line_a.is_blank() || line_b.is_blank() {
        state.run_length = 1;
        return state;
    }

    let window_size = params.window_size;

    for (word_a, word_b) in line_a.words().iter().zip(line_b.words()) {
        state.compared += 1;

        if synonyms.are_equivalent(word_a, word_b) {
            if state.is_counting(window_size) {
                state.matched += 1;
            } else {
                state.run_length += 1;
            }
        } else {
            state.run_length = 1;
        }
    }

    let adjustment = i64::try_from(window_size.saturating_sub(1)).unwrap_or(i64::MAX);
    state.compared = state.compared.saturating_sub(adjustment);
    state
}

/// Scan two tokenized documents and return the tuple counts.
///
/// Stops at the end of the shorter document. The window size is validated
/// before any line is looked at.
pub fn scan(
    lines_a: &[TokenLine<'_>],
    lines_b: &[TokenLine<'_>],
    synonyms: &SynonymIndex,
    params: &ScanParams,
) -> Result<TupleCounts, ScanError> {
    params.validate()?;

    let mut state = ScanState::default();

    for (line_no, (line_a, line_b)) in lines_a.iter().zip(lines_b).enumerate() {
        state = scan_line_pair(state, line_a, line_b, synonyms, params);

        if params.trace {
            debug!(
                line = line_no + 1,
                run_length = state.run_length,
                matched = state.matched,
                compared = state.compared,
                "scanned line pair"
            );
        }
    }

    if params.trace {
        let skipped = lines_a.len().abs_diff(lines_b.len());
        if skipped > 0 {
            debug!(skipped, "ignored trailing lines of the longer document");
        }
    }

    Ok(state.counts())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&'static str]) -> Vec<TokenLine<'static>> {
        text.iter().map(|&l| TokenLine::from_line(l)).collect()
    }

    fn run(a: &[&'static str], b: &[&'static str], window_size: usize) -> TupleCounts {
        scan(
            &lines(a),
            &lines(b),
            &SynonymIndex::default(),
            &ScanParams::with_window_size(window_size),
        )
        .unwrap()
    }

    #[test]
    fn test_first_full_tuple_counts_once() {
        // a and b build the run, c completes the first tuple, x breaks it
        let counts = run(&["a b c a"], &["a b c x"], 3);
        assert_eq!(counts, TupleCounts { matched: 1, compared: 2 });
        assert!((counts.percentage().unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_shorter_than_window_counts_nothing() {
        let counts = run(&["a b x y"], &["a b c d"], 3);
        assert_eq!(counts, TupleCounts { matched: 0, compared: 2 });
    }

    #[test]
    fn test_window_of_one_counts_every_match() {
        let counts = run(&["a b c d e"], &["a b c d e"], 1);
        assert_eq!(counts, TupleCounts { matched: 5, compared: 5 });
        assert!((counts.percentage().unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_matches_counted_after_window_filled() {
        // run_length reaches 3 after two matches, the remaining three count
        let counts = run(&["a b c d e"], &["a b c d e"], 3);
        assert_eq!(counts, TupleCounts { matched: 3, compared: 3 });
    }

    #[test]
    fn test_mismatch_resets_run() {
        let counts = run(&["a b x c d e"], &["a b y c d e"], 2);
        // a(1->2) b(count) x/y(reset) c(1->2) d(count) e(count)
        assert_eq!(counts, TupleCounts { matched: 3, compared: 5 });
    }

    #[test]
    fn test_blank_line_resets_and_counts_nothing() {
        let with_break = run(&["a b", "", "c d"], &["a b", "", "c d"], 2);
        // each line: first word builds, second counts
        assert_eq!(with_break, TupleCounts { matched: 2, compared: 2 });

        let without_break = run(&["a b", "c d"], &["a b", "c d"], 2);
        // run carries across lines so c and d both count, while the
        // denominator is still reduced once per line
        assert_eq!(without_break, TupleCounts { matched: 3, compared: 2 });
    }

    #[test]
    fn test_blank_line_on_one_side_skips_pair() {
        let counts = run(&["a b", "x y", "c d"], &["a b", "", "c d"], 2);
        assert_eq!(counts, TupleCounts { matched: 2, compared: 2 });
    }

    #[test]
    fn test_unequal_line_counts_ignore_tail() {
        let counts = run(&["a b c"], &["a b c", "d e f", "g h i"], 1);
        assert_eq!(counts, TupleCounts { matched: 3, compared: 3 });
    }

    #[test]
    fn test_unequal_line_lengths_stop_at_shorter() {
        let counts = run(&["a b c d"], &["a b"], 1);
        assert_eq!(counts, TupleCounts { matched: 2, compared: 2 });
    }

    #[test]
    fn test_adjustment_applied_per_line() {
        let counts = run(&["a b c", "d e f"], &["x y z", "u v w"], 3);
        // 3 - 2 + 3 - 2
        assert_eq!(counts, TupleCounts { matched: 0, compared: 2 });
    }

    #[test]
    fn test_short_lines_drive_compared_negative() {
        let counts = run(&["a"], &["a"], 3);
        assert_eq!(counts, TupleCounts { matched: 0, compared: -1 });
        assert!(matches!(
            counts.percentage(),
            Err(ScanError::DegenerateInput { compared: -1 })
        ));
    }

    #[test]
    fn test_space_only_line_is_not_a_paragraph_break() {
        // "   " has no tokens but still carries the run and the adjustment
        let counts = run(&["a b", "   ", "c"], &["a b", "   ", "c"], 2);
        assert_eq!(counts, TupleCounts { matched: 2, compared: 0 });
    }

    #[test]
    fn test_empty_tokens_compare_like_words() {
        let counts = run(&["a  b"], &["a  b"], 1);
        assert_eq!(counts, TupleCounts { matched: 3, compared: 3 });

        let shifted = run(&["a  b"], &["a b"], 1);
        // "" vs "b" mismatch, "b" has no partner
        assert_eq!(shifted, TupleCounts { matched: 1, compared: 2 });
    }

    #[test]
    fn test_synonyms_extend_runs() {
        let synonyms = SynonymIndex::build(["run jog sprint"]);
        let counts = scan(
            &lines(&["we run to the park"]),
            &lines(&["we jog to the park"]),
            &synonyms,
            &ScanParams::with_window_size(3),
        )
        .unwrap();
        assert_eq!(counts, TupleCounts { matched: 3, compared: 3 });
    }

    #[test]
    fn test_window_longer_than_line_counts_nothing() {
        let exact = run(&["a b c"], &["a b c"], 3);
        assert_eq!(exact, TupleCounts { matched: 1, compared: 1 });

        let wider = run(&["a b c"], &["a b c"], 4);
        assert_eq!(wider, TupleCounts { matched: 0, compared: 0 });

        let widest = run(&["a b c"], &["a b c"], 5);
        assert_eq!(widest.matched, 0);
    }

    #[test]
    fn test_oversized_window_rejected() {
        let too_large = MAX_WINDOW_SIZE + 1;
        for window_size in [too_large, usize::MAX] {
            let result = scan(
                &lines(&["a"]),
                &lines(&["a"]),
                &SynonymIndex::default(),
                &ScanParams::with_window_size(window_size),
            );
            assert!(
                matches!(result, Err(ScanError::InvalidWindowSize(w)) if w == window_size),
                "window {}",
                window_size
            );
        }
    }

    #[test]
    fn test_step_saturates_on_huge_window() {
        let params = ScanParams::with_window_size(usize::MAX);
        let line = TokenLine::from_line("a");

        let state = scan_line_pair(
            ScanState::default(),
            &line,
            &line,
            &SynonymIndex::default(),
            &params,
        );
        assert_eq!(state.matched, 0);
        assert!(state.compared < 0);

        let again = scan_line_pair(state, &line, &line, &SynonymIndex::default(), &params);
        assert_eq!(again.compared, i64::MIN);
        assert!(again.counts().percentage().is_err());
    }

    #[test]
    fn test_largest_window_accepted() {
        let counts = run(&["a b"], &["a b"], MAX_WINDOW_SIZE);
        assert_eq!(counts.matched, 0);
        assert!(counts.percentage().is_err());
    }

    #[test]
    fn test_invalid_window_rejected() {
        let result = scan(
            &lines(&["a"]),
            &lines(&["a"]),
            &SynonymIndex::default(),
            &ScanParams::with_window_size(0),
        );
        assert!(matches!(result, Err(ScanError::InvalidWindowSize(0))));
    }

    #[test]
    fn test_empty_documents() {
        let counts = run(&[], &[], 3);
        assert_eq!(counts, TupleCounts { matched: 0, compared: 0 });
        assert!(counts.percentage().is_err());
    }

    #[test]
    fn test_scan_is_idempotent() {
        let a = ["the cat sat on the mat", "", "it was warm"];
        let b = ["the cat sat on a mat", "", "it was warm"];
        assert_eq!(run(&a, &b, 2), run(&a, &b, 2));
    }

    #[test]
    fn test_step_function_on_isolated_pair() {
        let params = ScanParams::with_window_size(2);
        let synonyms = SynonymIndex::default();
        let line = TokenLine::from_line("a b c");

        let state = scan_line_pair(ScanState::default(), &line, &line, &synonyms, &params);
        assert_eq!(state.run_length, 2);
        assert_eq!(state.matched, 2);
        assert_eq!(state.compared, 2);

        let after_break = scan_line_pair(state, &TokenLine::Blank, &line, &synonyms, &params);
        assert_eq!(after_break.run_length, 1);
        assert_eq!(after_break.counts(), state.counts());
    }

    #[test]
    fn test_trace_does_not_change_counts() {
        let a = lines(&["one two three four", "five six"]);
        let b = lines(&["one two three four", "five seven"]);
        let synonyms = SynonymIndex::default();

        let quiet = scan(&a, &b, &synonyms, &ScanParams::default()).unwrap();
        let traced = scan(
            &a,
            &b,
            &synonyms,
            &ScanParams {
                trace: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(quiet, traced);
    }
}
