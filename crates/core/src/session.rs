//! Caller-owned editing session.
//!
//! Holds the deck being edited together with the user's style choices.
//! The generation and rendering functions never keep state of their own;
//! callers pass the session (or values read from it) into each call.

use crate::classify::TopicProfile;
use crate::error::Result;
use crate::oracle::Oracle;
use crate::requestor::{Generation, SlideRequestor};
use crate::theme::{ColorScheme, DesignTemplate};
use crate::types::{Deck, FontSizes, GenerationRequest, Slide};
use serde::{Deserialize, Serialize};

/// State of one user's deck editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSession {
    /// The current deck, present only after a successful generation or load.
    pub deck: Option<Deck>,
    pub template: DesignTemplate,
    pub color_scheme: ColorScheme,
    pub fonts: FontSizes,
    pub use_bullets: bool,
    /// Keep a template chosen explicitly instead of the classifier's pick.
    pub template_locked: bool,
}

impl Default for DeckSession {
    fn default() -> Self {
        Self {
            deck: None,
            template: DesignTemplate::Modern,
            color_scheme: ColorScheme::BluePurple,
            fonts: FontSizes::default(),
            use_bullets: true,
            template_locked: false,
        }
    }
}

impl DeckSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the template so generation does not replace it.
    pub fn with_template(mut self, template: DesignTemplate) -> Self {
        self.template = template;
        self.template_locked = true;
        self
    }

    pub fn with_fonts(mut self, fonts: FontSizes) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_bullets(mut self, use_bullets: bool) -> Self {
        self.use_bullets = use_bullets;
        self
    }

    /// Adopt the classifier's template and colors unless the template is pinned.
    pub fn apply_profile(&mut self, profile: &TopicProfile) {
        if !self.template_locked {
            self.template = profile.template;
        }
        self.color_scheme = profile.color_scheme;
    }

    /// Generate a new deck into this session.
    ///
    /// On failure the previous deck is dropped so a stale or partial deck is
    /// never offered for download.
    pub fn generate<O: Oracle>(
        &mut self,
        requestor: &SlideRequestor<O>,
        request: &GenerationRequest,
    ) -> Result<Generation> {
        match requestor.generate(request) {
            Ok(generation) => {
                self.apply_profile(&generation.profile);
                self.deck = Some(generation.deck.clone());
                Ok(generation)
            }
            Err(e) => {
                self.deck = None;
                Err(e)
            }
        }
    }

    /// Replace the current deck, e.g. from a backup.
    pub fn load(&mut self, deck: Deck) {
        self.deck = Some(deck);
    }

    /// Edit one slide in place. Returns `false` if there is no such slide.
    pub fn edit_slide(&mut self, index: usize, title: &str, content: &str) -> bool {
        match self.deck.as_mut().and_then(|d| d.slide_mut(index)) {
            Some(slide) => {
                slide.set_title(title);
                slide.set_content(content);
                true
            }
            None => false,
        }
    }

    /// Borrow a slide of the current deck.
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.deck.as_ref().and_then(|d| d.slides.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use crate::error::Error;
    use crate::requestor::tests::CannedOracle;
    use crate::types::SlideCount;

    #[test]
    fn test_generate_stores_deck_and_profile() {
        let oracle = CannedOracle::replying(r#"[{"title":"A","content":"a"}]"#);
        let requestor = SlideRequestor::new(&oracle);
        let request = GenerationRequest::new("AI 기반 교육 전략", SlideCount::new(5).unwrap());

        let mut session = DeckSession::new();
        let generation = session.generate(&requestor, &request).unwrap();

        assert_eq!(generation.profile.category, Category::Tech);
        assert_eq!(session.template, DesignTemplate::Dark);
        assert_eq!(session.deck.as_ref().map(Deck::len), Some(5));
    }

    #[test]
    fn test_pinned_template_survives_generation() {
        let oracle = CannedOracle::replying("[]");
        let requestor = SlideRequestor::new(&oracle);
        let request = GenerationRequest::new("AI 기술", SlideCount::new(5).unwrap());

        let mut session = DeckSession::new().with_template(DesignTemplate::Minimal);
        session.generate(&requestor, &request).unwrap();
        assert_eq!(session.template, DesignTemplate::Minimal);
        assert_eq!(session.color_scheme, ColorScheme::BluePurple);
    }

    #[test]
    fn test_failed_generation_caches_nothing() {
        let mut session = DeckSession::new();
        session.load(Deck::new(vec![Slide::new("old", "")]));

        let oracle = CannedOracle::failing("timeout");
        let requestor = SlideRequestor::new(&oracle);
        let request = GenerationRequest::new("주제", SlideCount::default());

        let result = session.generate(&requestor, &request);
        assert!(matches!(result, Err(Error::OracleCallFailed(_))));
        assert!(session.deck.is_none());
    }

    #[test]
    fn test_edit_slide() {
        let mut session = DeckSession::new();
        assert!(!session.edit_slide(0, "x", "y"));

        session.load(Deck::new(vec![Slide::new("A", "a")]));
        assert!(session.edit_slide(0, "B", "• b1\n• b2"));
        assert_eq!(session.slide(0), Some(&Slide::new("B", "b1\nb2")));
        assert!(!session.edit_slide(1, "C", "c"));
    }
}
