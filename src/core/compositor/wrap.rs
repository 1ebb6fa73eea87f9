/// Width budget for a caption line.
pub fn line_width_budget(max_characters_per_line: u32, font_size: f32) -> f32 {
    max_characters_per_line as f32 * (font_size / 2.0)
}

/// Greedy word wrap driven by a width measure.
///
/// Words are separated by single spaces. Each word is tried against the
/// current line (with its trailing space, as it will be laid out); once the
/// measured width exceeds the budget the current line is closed and the word
/// starts the next one. A word wider than the budget is still placed on a line
/// of its own and overflows.
pub fn wrap_caption<F>(text: &str, max_characters_per_line: u32, font_size: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let budget = line_width_budget(max_characters_per_line, font_size);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = format!("{}{} ", current, word);
        if measure(&candidate) > budget && !current.trim().is_empty() {
            lines.push(current.trim().to_string());
            current = format!("{} ", word);
        } else {
            current = candidate;
        }
    }

    lines.push(current.trim().to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character counts as half an em, matching the budget heuristic.
    fn half_em(font_size: f32) -> impl Fn(&str) -> f32 {
        move |text: &str| text.chars().count() as f32 * font_size / 2.0
    }

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn test_short_caption_is_one_line() {
        let lines = wrap_caption("Hello world", 40, 30.0, half_em(30.0));
        assert_eq!(lines, vec!["Hello world".to_string()]);
    }

    #[test]
    fn test_wraps_at_budget() {
        // Budget is 10 chars at half an em each.
        let lines = wrap_caption("aaaa bbbb cccc dddd", 10, 20.0, half_em(20.0));
        assert_eq!(lines, vec!["aaaa bbbb", "cccc dddd"]);
    }

    #[test]
    fn test_never_drops_or_reorders_words() {
        let captions = [
            "Spacious two bedroom apartments with a rooftop garden and a view over the old harbour",
            "one",
            "",
            "a  double  spaced   caption with    gaps",
            "supercalifragilisticexpialidocious tiny words after a very long one",
        ];
        for caption in captions {
            for max_chars in [1, 5, 12, 40] {
                let lines = wrap_caption(caption, max_chars, 30.0, half_em(30.0));
                let rejoined = lines.join(" ");
                assert_eq!(words(&rejoined), words(caption), "caption {caption:?} at {max_chars}");
            }
        }
    }

    #[test]
    fn test_overlong_word_sits_alone() {
        let lines = wrap_caption("hi extraordinarily ok", 5, 10.0, half_em(10.0));
        assert_eq!(lines, vec!["hi", "extraordinarily", "ok"]);
    }

    #[test]
    fn test_overlong_first_word_has_no_blank_line() {
        let lines = wrap_caption("extraordinarily ok", 5, 10.0, half_em(10.0));
        assert_eq!(lines, vec!["extraordinarily", "ok"]);
    }
}
