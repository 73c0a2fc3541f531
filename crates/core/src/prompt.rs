//! Prompt construction for slide content requests.

use crate::classify::TopicProfile;
use crate::types::GenerationRequest;

/// System role sent with every slide request.
pub const SYSTEM_ROLE: &str = "당신은 전문적인 프레젠테이션 콘텐츠 작성자입니다. \
주어진 주제에 대해 체계적이고 논리적인 PPT 슬라이드를 생성합니다.";

/// Sampling temperature for slide requests.
pub const TEMPERATURE: f32 = 0.7;

/// Output token cap for slide requests.
pub const MAX_OUTPUT_TOKENS: u32 = 4000;

/// Build the user prompt for a generation request.
///
/// The prompt embeds the requested slide count twice, forbids bullet glyphs
/// and asks for a JSON array of `{title, content}` objects with one point
/// per line in `content`.
pub fn build_prompt(request: &GenerationRequest, profile: &TopicProfile) -> String {
    let n = request.slide_count.get();
    let topic = request.topic.trim();

    format!(
        r#"당신은 전문 프레젠테이션 디자이너입니다. 아래 정보로 프레젠테이션을 구성해 주세요.

[프로젝트 정보]
- 주제: {topic}
- 대상: {audience}
- 발표 시간: {talk_length}
- 슬라이드 수: {n}개
- 스타일: {style}
- 추천 템플릿: {template} ({category} 특화)

[구성 가이드]
- 1번 슬라이드: 제목과 부제목
- 2번 슬라이드: 목차 또는 개요
- 중간 슬라이드: 핵심 내용을 논리적 순서로
- 마지막 슬라이드: 결론 또는 행동 촉구

[작성 원칙]
1. 슬라이드마다 하나의 핵심 메시지
2. 제목은 짧고 명확하게
3. 내용은 3-5개 핵심 포인트
4. 숫자, 통계, 구체적 예시 활용

[필수 규칙]
- bullet 기호(•, -, *, ○ 등)를 절대 사용하지 마세요
- 각 포인트는 줄바꿈(\n)으로만 구분하세요
- {style} 스타일의 톤을 유지하세요

[출력 형식] 아래 JSON 배열만 반환하세요:
[
    {{"title": "슬라이드 제목", "content": "첫 번째 포인트\n두 번째 포인트\n세 번째 포인트"}}
]

주제 '{topic}'에 대해 정확히 {n}개의 슬라이드를 생성해 주세요."#,
        topic = topic,
        audience = request.audience.label(),
        talk_length = request.talk_length.label(),
        n = n,
        style = request.style,
        template = profile.template,
        category = profile.category.label(),
    )
}
