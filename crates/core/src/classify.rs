//! Keyword-based topic classification.
//!
//! Maps a free-text topic to a design template, a color scheme and a
//! category label. The first category whose keyword list matches wins.

use crate::theme::{ColorScheme, DesignTemplate};
use serde::{Deserialize, Serialize};

/// Topic category detected from keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Marketing,
    Tech,
    Education,
    Business,
    General,
}

impl Category {
    /// Korean display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Marketing => "마케팅",
            Self::Tech => "기술",
            Self::Education => "교육",
            Self::Business => "비즈니스",
            Self::General => "일반",
        }
    }
}

/// Result of classifying a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicProfile {
    pub template: DesignTemplate,
    pub color_scheme: ColorScheme,
    pub category: Category,
}

impl Default for TopicProfile {
    fn default() -> Self {
        Self {
            template: DesignTemplate::Modern,
            color_scheme: ColorScheme::BluePurple,
            category: Category::General,
        }
    }
}

/// Keyword rules, checked in order.
const RULES: &[(&[&str], TopicProfile)] = &[
    (
        &["마케팅", "판매", "브랜딩", "광고", "홍보"],
        TopicProfile {
            template: DesignTemplate::Modern,
            color_scheme: ColorScheme::OrangeRed,
            category: Category::Marketing,
        },
    ),
    (
        &["기술", "개발", "ai", "인공지능", "it", "프로그래밍"],
        TopicProfile {
            template: DesignTemplate::Dark,
            color_scheme: ColorScheme::BluePurple,
            category: Category::Tech,
        },
    ),
    (
        &["교육", "학습", "강의", "연수", "교수법"],
        TopicProfile {
            template: DesignTemplate::Minimal,
            color_scheme: ColorScheme::GreenBlue,
            category: Category::Education,
        },
    ),
    (
        &["회사", "기업", "비즈니스", "전략", "경영"],
        TopicProfile {
            template: DesignTemplate::Corporate,
            color_scheme: ColorScheme::BluePurple,
            category: Category::Business,
        },
    ),
];

/// Classify a topic by substring keyword matching on its lowercase form.
pub fn classify_topic(topic: &str) -> TopicProfile {
    let topic = topic.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| topic.contains(k)))
        .map(|(_, profile)| *profile)
        .unwrap_or_default()
}
