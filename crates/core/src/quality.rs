//! Heuristic content quality score for generated decks.
//!
//! Scores are in `0.0..=1.0`. Used for logging and for comparing replies;
//! nothing is rejected based on the score.

use crate::types::{Deck, Slide};
use regex::Regex;
use std::sync::LazyLock;

static ACTION_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(how|why|what|create|build|improve|optimize)\b").unwrap()
});

const TITLE_WEIGHT: f64 = 0.3;
const CONTENT_WEIGHT: f64 = 0.4;
const STRUCTURE_WEIGHT: f64 = 0.2;
const BALANCE_WEIGHT: f64 = 0.1;

/// Average slide score for a deck; `0.0` for an empty deck.
pub fn score_deck(deck: &Deck) -> f64 {
    if deck.is_empty() {
        return 0.0;
    }
    let total: f64 = deck.iter().map(score_slide).sum();
    total / deck.len() as f64
}

/// Weighted score of a single slide.
pub fn score_slide(slide: &Slide) -> f64 {
    TITLE_WEIGHT * score_title(&slide.title)
        + CONTENT_WEIGHT * score_content(&slide.content)
        + STRUCTURE_WEIGHT * score_structure(slide)
        + BALANCE_WEIGHT * score_length_balance(slide)
}

fn score_title(title: &str) -> f64 {
    if title.is_empty() {
        return 0.0;
    }

    let length = title.chars().count();
    let mut score = 0.5;

    if (5..=50).contains(&length) {
        score += 0.3;
    } else if length > 50 {
        score -= 0.2;
    }
    if title.chars().any(|c| c.is_ascii_digit()) {
        score += 0.1;
    }
    if ACTION_WORD_REGEX.is_match(title) {
        score += 0.1;
    }

    f64::min(score, 1.0)
}

fn score_content(content: &str) -> f64 {
    if content.is_empty() {
        return 0.0;
    }

    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    let mut score = 0.5;

    if (3..=6).contains(&lines.len()) {
        score += 0.3;
    } else if lines.len() > 6 {
        score -= 0.1;
    }

    if !lines.is_empty() {
        let total: usize = lines.iter().map(|l| l.chars().count()).sum();
        let average = total as f64 / lines.len() as f64;
        if (20.0..=100.0).contains(&average) {
            score += 0.2;
        }
    }

    f64::min(score, 1.0)
}

fn score_structure(slide: &Slide) -> f64 {
    match (slide.title.is_empty(), slide.content.is_empty()) {
        (false, false) => 1.0,
        (true, true) => 0.0,
        _ => 0.5,
    }
}

/// Titles should make up roughly 10-30% of a slide's text.
fn score_length_balance(slide: &Slide) -> f64 {
    let title = slide.title.chars().count() as f64;
    let content = slide.content.chars().count() as f64;
    let total = title + content;
    if total == 0.0 {
        return 0.0;
    }

    let ratio = title / total;
    if (0.1..=0.3).contains(&ratio) {
        1.0
    } else {
        f64::max(0.0, 1.0 - (ratio - 0.2).abs() * 5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_deck_and_slide() {
        assert_eq!(score_deck(&Deck::default()), 0.0);
        assert_eq!(score_slide(&Slide::default()), 0.0);
    }

    #[test]
    fn test_title_scoring() {
        assert!(approx(score_title("Hi"), 0.5));
        assert!(approx(score_title("How to build 3 habits"), 1.0));
        assert!(approx(score_title(&"가".repeat(60)), 0.3));
    }

    #[test]
    fn test_content_scoring() {
        let good = "첫 번째 핵심 포인트를 충분히 길게 작성합니다\n두 번째 핵심 포인트를 충분히 길게 작성합니다\n세 번째 핵심 포인트를 충분히 길게 작성합니다";
        assert!(approx(score_content(good), 1.0));
        assert!(approx(score_content("짧음"), 0.5));
        let many = (0..8).map(|i| format!("항목 {}", i)).collect::<Vec<_>>().join("\n");
        assert!(approx(score_content(&many), 0.4));
    }

    #[test]
    fn test_length_balance() {
        let balanced = Slide::new("12345", "a".repeat(20));
        assert!(approx(score_length_balance(&balanced), 1.0));
        let title_only = Slide::new("제목만", "");
        assert!(approx(score_length_balance(&title_only), 0.0));
    }

    #[test]
    fn test_well_formed_deck_scores_higher_than_placeholders() {
        let rich = Deck::new(vec![Slide::new(
            "2025 성장 전략",
            "신규 시장 세 곳에 진출하여 매출을 확대합니다\n고객 유지율을 90% 이상으로 끌어올립니다\n운영 비용을 15% 절감하는 자동화를 도입합니다",
        )]);
        let padded = Deck::with_exact_len(Vec::new(), 3);
        assert!(score_deck(&rich) > score_deck(&padded));
    }
}
