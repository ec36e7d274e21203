const MS_PER_MINUTE: f64 = 60_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect,
    Pending,
}

/// Whitespace-delimited word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Percentage of matching characters over the overlapping prefix of `typed` and `reference`.
///
/// Typed characters past the end of the reference are never compared.
pub fn accuracy(typed: &str, reference: &str) -> u32 {
    let (compared, matches) = typed
        .chars()
        .zip(reference.chars())
        .fold((0usize, 0usize), |(compared, matches), (t, r)| {
            (compared + 1, matches + usize::from(t == r))
        });

    match compared {
        0 => 100,
        n => ((matches as f64 / n as f64) * 100.0).round() as u32,
    }
}

/// Words per minute, or 0 when no time has elapsed.
pub fn wpm(word_count: usize, elapsed_ms: u64) -> u32 {
    if elapsed_ms == 0 {
        return 0;
    }

    let minutes = elapsed_ms as f64 / MS_PER_MINUTE;
    (word_count as f64 / minutes).round() as u32
}

/// Status of every reference character against what has been typed so far
pub fn char_statuses(typed: &str, reference: &str) -> Vec<CharStatus> {
    let mut typed = typed.chars();

    reference
        .chars()
        .map(|expected| match typed.next() {
            Some(c) if c == expected => CharStatus::Correct,
            Some(_) => CharStatus::Incorrect,
            None => CharStatus::Pending,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(FOX), 9);
        assert_eq!(word_count("Sphinx of black quartz, judge my vow"), 7);
        assert_eq!(word_count("  spaced   out  "), 2);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_accuracy_empty_typed() {
        assert_eq!(accuracy("", FOX), 100);
        assert_eq!(accuracy("", ""), 100);
    }

    #[test]
    fn test_accuracy_exact_match() {
        assert_eq!(accuracy(FOX, FOX), 100);
        assert_eq!(accuracy("x", "x"), 100);
    }

    #[test]
    fn test_accuracy_prefix_only_compares_typed_length() {
        assert_eq!(accuracy("The", FOX), 100);
        assert_eq!(accuracy("Thx", FOX), 67);
        assert_eq!(accuracy("Txx", FOX), 33);
    }

    #[test]
    fn test_accuracy_ignores_overflow() {
        assert_eq!(accuracy("abcXYZ", "abc"), 100);
        assert_eq!(accuracy("abXdef", "abc"), 67);
    }

    #[test]
    fn test_accuracy_is_case_sensitive() {
        assert_eq!(accuracy("the", "The"), 67);
    }

    #[test]
    fn test_accuracy_rounds_half_up() {
        // 1 of 8 wrong => 87.5
        assert_eq!(accuracy("abcdefgX", "abcdefgh"), 88);
    }

    #[test]
    fn test_accuracy_counts_chars_not_bytes() {
        assert_eq!(accuracy("héllo", "héllo"), 100);
        assert_eq!(accuracy("hello", "héllo"), 80);
    }

    #[test]
    fn test_wpm() {
        assert_eq!(wpm(9, 3000), 180);
        assert_eq!(wpm(9, 60_000), 9);
        assert_eq!(wpm(7, 4_500), 93);
    }

    #[test]
    fn test_wpm_zero_elapsed() {
        assert_eq!(wpm(9, 0), 0);
    }

    #[test]
    fn test_char_statuses() {
        use CharStatus::*;
        assert_eq!(
            char_statuses("aXc", "abcd"),
            vec![Correct, Incorrect, Correct, Pending]
        );
        assert_eq!(char_statuses("", "ab"), vec![Pending, Pending]);
        assert_eq!(char_statuses("abcdef", "ab"), vec![Correct, Correct]);
    }
}
