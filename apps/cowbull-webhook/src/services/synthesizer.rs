//! Turns an engine guess analysis into the sentence read back to the player.

use std::fmt::Write;

use crate::domain::{GameState, GuessAnalysis};

/// Reply text for a guess.
///
/// Once the game is won or lost the engine's own message is returned as-is.
/// Otherwise every digit gets a phrase, in guess order, followed by the
/// number of goes left.
pub fn synthesize(analysis: &GuessAnalysis, state: &GameState) -> String {
    if state.status.is_over() {
        return analysis.message.clone();
    }

    let mut text = format!(
        "You have {} cows and {} bulls. ",
        analysis.cow_count, analysis.bull_count
    );

    for d in &analysis.digits {
        let verdict = if d.is_bull {
            "bull"
        } else if d.is_cow {
            "cow"
        } else {
            "miss"
        };
        // Writing into a String cannot fail.
        let _ = write!(text, "{} is a {verdict}", d.digit);
        text.push_str(if d.occurs_multiple {
            " and occurs more than once. "
        } else {
            ". "
        });
    }

    let _ = write!(text, "You have {} goes remaining!", state.guesses_remaining);
    text
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::domain::{DigitResult, GameKey, GameStatus};

    fn state(status: GameStatus, guesses_remaining: u32) -> GameState {
        GameState {
            key: GameKey::new("k"),
            digits_required: 2,
            guesses_remaining,
            status,
            served_by: None,
        }
    }

    fn digit(digit: i64, is_bull: bool, is_cow: bool, occurs_multiple: bool) -> DigitResult {
        DigitResult {
            digit,
            is_bull,
            is_cow,
            occurs_multiple,
        }
    }

    #[test]
    fn bull_wins_over_cow_and_multiples_are_called_out() {
        let analysis = GuessAnalysis {
            digits: vec![digit(5, true, true, false), digit(3, false, true, true)],
            cow_count: 1,
            bull_count: 1,
            message: String::new(),
        };
        assert_eq!(
            synthesize(&analysis, &state(GameStatus::InProgress, 7)),
            "You have 1 cows and 1 bulls. 5 is a bull. 3 is a cow and occurs more than once. \
             You have 7 goes remaining!"
        );
    }

    #[test]
    fn misses_are_named() {
        let analysis = GuessAnalysis {
            digits: vec![digit(0, false, false, false)],
            cow_count: 0,
            bull_count: 0,
            message: String::new(),
        };
        assert_eq!(
            synthesize(&analysis, &state(GameStatus::InProgress, 1)),
            "You have 0 cows and 0 bulls. 0 is a miss. You have 1 goes remaining!"
        );
    }

    #[test]
    fn empty_analysis_still_reports_counts() {
        let analysis = GuessAnalysis {
            digits: vec![],
            cow_count: 0,
            bull_count: 0,
            message: "ignored".to_string(),
        };
        assert_eq!(
            synthesize(&analysis, &state(GameStatus::InProgress, 3)),
            "You have 0 cows and 0 bulls. You have 3 goes remaining!"
        );
    }

    fn arb_digit() -> impl Strategy<Value = DigitResult> {
        (0i64..10, any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(d, bull, cow, multi)| digit(d, bull, cow, multi))
    }

    proptest! {
        /// Terminal games always speak the engine's message, whatever the digits say.
        #[test]
        fn prop_terminal_status_returns_engine_message(
            digits in prop::collection::vec(arb_digit(), 0..8),
            message in ".*",
            won in any::<bool>(),
            remaining in 0u32..20,
        ) {
            let analysis = GuessAnalysis {
                digits,
                cow_count: 1,
                bull_count: 2,
                message: message.clone(),
            };
            let status = if won { GameStatus::Won } else { GameStatus::Lost };
            prop_assert_eq!(synthesize(&analysis, &state(status, remaining)), message);
        }

        /// In-progress replies carry one phrase per digit and the remaining count.
        #[test]
        fn prop_in_progress_mentions_every_digit(
            digits in prop::collection::vec(arb_digit(), 0..8),
            remaining in 0u32..20,
        ) {
            let analysis = GuessAnalysis {
                digits: digits.clone(),
                cow_count: 0,
                bull_count: 0,
                message: String::new(),
            };
            let text = synthesize(&analysis, &state(GameStatus::InProgress, remaining));
            prop_assert!(text.starts_with("You have 0 cows and 0 bulls. "));
            let expected_suffix = format!("You have {remaining} goes remaining!");
            prop_assert!(text.ends_with(&expected_suffix));
            prop_assert_eq!(text.matches(" is a ").count(), digits.len());
        }
    }
}
