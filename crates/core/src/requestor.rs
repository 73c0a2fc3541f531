//! Slide content requests: prompt, oracle call, parse, pad.

use crate::classify::{classify_topic, TopicProfile};
use crate::error::Result;
use crate::oracle::{Oracle, OracleRequest};
use crate::parse::{parse_reply, ParseMode};
use crate::prompt::{build_prompt, MAX_OUTPUT_TOKENS, SYSTEM_ROLE, TEMPERATURE};
use crate::types::{Deck, GenerationRequest};

/// Outcome of a successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// Exactly `slide_count` slides.
    pub deck: Deck,
    /// Classification used for the prompt.
    pub profile: TopicProfile,
    /// Which parser produced the slides.
    pub parse_mode: ParseMode,
    /// How many slides came from the reply before padding or truncation.
    pub parsed_slides: usize,
}

impl Generation {
    /// Number of placeholder slides appended.
    pub fn padded_slides(&self) -> usize {
        self.deck.len().saturating_sub(self.parsed_slides)
    }
}

/// Requests slide content from an oracle.
///
/// Holds no state besides the oracle; every call is independent.
pub struct SlideRequestor<O> {
    oracle: O,
}

impl<O: Oracle> SlideRequestor<O> {
    /// Create a requestor backed by `oracle`.
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Build the oracle request for a generation request.
    pub fn build_request(&self, request: &GenerationRequest, profile: &TopicProfile) -> OracleRequest {
        OracleRequest {
            system: SYSTEM_ROLE.to_string(),
            prompt: build_prompt(request, profile),
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    /// Generate a deck of exactly `request.slide_count` slides.
    ///
    /// An oracle failure is returned as is; no deck is produced and the call
    /// is not retried.
    pub fn generate(&self, request: &GenerationRequest) -> Result<Generation> {
        let wanted = request.slide_count.get();
        let profile = classify_topic(&request.topic);
        log::debug!(
            "Topic classified as {} (template {}, colors {})",
            profile.category.label(),
            profile.template,
            profile.color_scheme
        );

        let oracle_request = self.build_request(request, &profile);
        let reply = self.oracle.complete(&oracle_request).map_err(|e| {
            log::error!("Oracle '{}' failed: {}", self.oracle.name(), e);
            e
        })?;
        log::debug!("Oracle '{}' replied with {} bytes", self.oracle.name(), reply.len());

        let (slides, parse_mode) = parse_reply(&reply, wanted);
        let parsed_slides = slides.len();
        if parsed_slides != wanted {
            log::info!(
                "Oracle returned {} slides, adjusting to {}",
                parsed_slides,
                wanted
            );
        }

        Ok(Generation {
            deck: Deck::with_exact_len(slides, wanted),
            profile,
            parse_mode,
            parsed_slides,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{Slide, SlideCount};
    use std::cell::{Cell, RefCell};

    /// Oracle returning a canned reply and recording what it was asked.
    pub(crate) struct CannedOracle {
        pub reply: std::result::Result<String, String>,
        pub calls: Cell<usize>,
        pub last_request: RefCell<Option<OracleRequest>>,
    }

    impl CannedOracle {
        pub fn replying(text: impl Into<String>) -> Self {
            Self {
                reply: Ok(text.into()),
                calls: Cell::new(0),
                last_request: RefCell::new(None),
            }
        }

        pub fn failing(message: impl Into<String>) -> Self {
            Self {
                reply: Err(message.into()),
                calls: Cell::new(0),
                last_request: RefCell::new(None),
            }
        }
    }

    impl Oracle for CannedOracle {
        fn name(&self) -> &str {
            "canned"
        }

        fn complete(&self, request: &OracleRequest) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            *self.last_request.borrow_mut() = Some(request.clone());
            self.reply.clone().map_err(Error::OracleCallFailed)
        }
    }

    fn json_reply(n: usize) -> String {
        let items: Vec<String> = (1..=n)
            .map(|i| format!(r#"{{"title": "제목 {i}", "content": "포인트 {i}-1\n포인트 {i}-2"}}"#))
            .collect();
        format!("[{}]", items.join(","))
    }

    #[test]
    fn test_well_formed_reply_no_padding() {
        let oracle = CannedOracle::replying(json_reply(5));
        let requestor = SlideRequestor::new(&oracle);
        let request = GenerationRequest::new("마케팅 전략", SlideCount::new(5).unwrap());

        let generation = requestor.generate(&request).unwrap();
        assert_eq!(generation.deck.len(), 5);
        assert_eq!(generation.parse_mode, ParseMode::Structured);
        assert_eq!(generation.padded_slides(), 0);
        assert_eq!(generation.deck.slides[4].title, "제목 5");
    }

    #[test]
    fn test_malformed_reply_pads_with_placeholders() {
        let reply = "1. 소개\n배경\n2. 현황\n데이터\n3. 제안\n실행 계획";
        let oracle = CannedOracle::replying(reply);
        let requestor = SlideRequestor::new(&oracle);
        let request = GenerationRequest::new("신규 사업", SlideCount::new(10).unwrap());

        let generation = requestor.generate(&request).unwrap();
        assert_eq!(generation.parse_mode, ParseMode::Heuristic);
        assert_eq!(generation.parsed_slides, 3);
        assert_eq!(generation.deck.len(), 10);
        assert_eq!(generation.deck.slides[2], Slide::new("제안", "실행 계획"));

        let padded: Vec<&str> = generation.deck.slides[3..]
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(
            padded,
            vec![
                "슬라이드 4",
                "슬라이드 5",
                "슬라이드 6",
                "슬라이드 7",
                "슬라이드 8",
                "슬라이드 9",
                "슬라이드 10"
            ]
        );
    }

    #[test]
    fn test_exact_count_for_every_supported_size() {
        for n in SlideCount::SUPPORTED {
            for returned in [0, 3, n, n + 4] {
                let oracle = CannedOracle::replying(json_reply(returned));
                let requestor = SlideRequestor::new(&oracle);
                let request = GenerationRequest::new("주제", SlideCount::new(n).unwrap());
                let generation = requestor.generate(&request).unwrap();
                assert_eq!(generation.deck.len(), n, "requested {n}, oracle gave {returned}");
            }
        }
    }

    #[test]
    fn test_oracle_failure_returns_no_deck_and_no_retry() {
        let oracle = CannedOracle::failing("connection refused");
        let requestor = SlideRequestor::new(&oracle);
        let request = GenerationRequest::new("주제", SlideCount::default());

        let result = requestor.generate(&request);
        assert!(matches!(result, Err(Error::OracleCallFailed(_))));
        assert_eq!(oracle.calls.get(), 1);
    }

    #[test]
    fn test_request_uses_fixed_role_and_temperature() {
        let oracle = CannedOracle::replying(json_reply(8));
        let requestor = SlideRequestor::new(&oracle);
        let request = GenerationRequest::new("AI 강의", SlideCount::new(8).unwrap());
        requestor.generate(&request).unwrap();

        let sent = oracle.last_request.borrow().clone().unwrap();
        assert_eq!(sent.system, SYSTEM_ROLE);
        assert_eq!(sent.temperature, TEMPERATURE);
        assert_eq!(sent.max_tokens, MAX_OUTPUT_TOKENS);
        assert!(sent.prompt.contains("8개"));
    }
}
