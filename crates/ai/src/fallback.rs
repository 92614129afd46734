//! Deterministic responses used when no model output is available.

use storydesk_core::article::{paragraph_count, word_count};
use storydesk_core::email::{PURPOSE_FACT_CHECK, PURPOSE_FOLLOW_UP, PURPOSE_THANK_YOU};

use crate::types::{
    EmailBrief, EmailDraft, InterviewQuestion, QuestionBrief, Review, ReviewBrief,
    ReviewSuggestion,
};

/// Below this many words a draft is flagged as thin.
const SHORT_ARTICLE_WORDS: i32 = 300;
/// Above this many words a draft is flagged as long.
const LONG_ARTICLE_WORDS: i32 = 2000;
/// Paragraphs averaging more words than this are flagged as dense.
const DENSE_PARAGRAPH_WORDS: i32 = 120;
const BASE_SCORE: i32 = 7;

/// (category, question template, rationale). `{story}` is replaced with the story title.
const GENERAL_QUESTIONS: &[(&str, &str, &str)] = &[
    (
        "background",
        "How did you first become involved with {story}?",
        "Establishes the source's connection and credibility.",
    ),
    (
        "factual",
        "What are the key facts about {story} that the public should understand?",
        "Gets the essentials on the record in the source's own words.",
    ),
    (
        "factual",
        "Can you walk me through the timeline of events as you saw them?",
        "Builds a chronology you can check against documents.",
    ),
    (
        "accountability",
        "Who do you believe is responsible, and what evidence supports that?",
        "Separates claims from evidence.",
    ),
    (
        "opinion",
        "What do you think is most misunderstood about {story}?",
        "Surfaces angles other coverage has missed.",
    ),
    (
        "factual",
        "What documents or data could confirm what you have told me?",
        "Identifies material for independent verification.",
    ),
    (
        "background",
        "Who else should I speak with about this?",
        "Expands the source list.",
    ),
    (
        "opinion",
        "What would you like to see happen next?",
        "Captures stakes and possible outcomes.",
    ),
    (
        "follow_up",
        "Is there anything I have not asked that I should have?",
        "Leaves room for information you did not anticipate.",
    ),
    (
        "follow_up",
        "May I contact you again if I have follow-up questions?",
        "Keeps the channel open for fact-checking.",
    ),
];

/// General journalistic questions personalised with the story title.
pub fn questions(brief: &QuestionBrief) -> Vec<InterviewQuestion> {
    let story = format!("\"{}\"", brief.story.title);
    GENERAL_QUESTIONS
        .iter()
        .cycle()
        .take(brief.count.max(1))
        .map(|(category, template, rationale)| InterviewQuestion {
            question: template.replace("{story}", &story),
            category: (*category).to_string(),
            rationale: (*rationale).to_string(),
        })
        .collect()
}

/// A per-purpose template filled with the contact and story names.
pub fn email(brief: &EmailBrief) -> EmailDraft {
    let contact = &brief.contact.name;
    let sender = &brief.sender_name;
    let topic = brief
        .story
        .as_ref()
        .map(|s| s.title.as_str())
        .unwrap_or("a story I am working on");

    let (subject, middle) = match brief.purpose.as_str() {
        PURPOSE_FOLLOW_UP => (
            format!("Following up: {topic}"),
            format!(
                "Thank you again for speaking with me about {topic}. I have a few follow-up \
                 questions and would be grateful for a few more minutes of your time."
            ),
        ),
        PURPOSE_THANK_YOU => (
            format!("Thank you for your time: {topic}"),
            format!(
                "Thank you for taking the time to speak with me about {topic}. Your insight \
                 was extremely helpful, and I will let you know when the piece is published."
            ),
        ),
        PURPOSE_FACT_CHECK => (
            format!("Fact check request: {topic}"),
            format!(
                "As I finalise my reporting on {topic}, I would like to confirm a few details \
                 with you to make sure they are accurate. Could you review the points below \
                 and let me know of any corrections?"
            ),
        ),
        _ => (
            format!("Interview request: {topic}"),
            format!(
                "I am a journalist working on {topic}, and given your background I believe \
                 your perspective would be valuable. Would you be available for a short \
                 interview in the coming days, by phone, video or in person?"
            ),
        ),
    };

    let mut body = format!("Dear {contact},\n\n{middle}\n\n");
    if let Some(notes) = brief.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        body.push_str(notes.trim());
        body.push_str("\n\n");
    }
    body.push_str(&format!("Best regards,\n{sender}"));

    EmailDraft {
        subject,
        body,
        ai_generated: false,
    }
}

/// Heuristic review from word count, paragraph structure and quotes.
pub fn review(brief: &ReviewBrief) -> Review {
    let words = word_count(&brief.content);
    let paragraphs = i32::try_from(paragraph_count(&brief.content)).unwrap_or(i32::MAX);
    let has_quotes = brief.content.contains('"') || brief.content.contains('\u{201c}');

    let mut score = BASE_SCORE;
    let mut strengths = Vec::new();
    let mut suggestions = Vec::new();

    if words < SHORT_ARTICLE_WORDS {
        score -= 2;
        suggestions.push(ReviewSuggestion {
            category: "length".into(),
            issue: format!("The draft is short ({words} words)."),
            suggestion: "Add context, background and additional sourcing.".into(),
        });
    } else if words > LONG_ARTICLE_WORDS {
        score -= 1;
        suggestions.push(ReviewSuggestion {
            category: "length".into(),
            issue: format!("The draft is long ({words} words)."),
            suggestion: "Tighten the copy and cut repetition.".into(),
        });
    } else {
        strengths.push("Length is appropriate for a news feature.".to_string());
    }

    if paragraphs > 0 && words / paragraphs > DENSE_PARAGRAPH_WORDS {
        score -= 1;
        suggestions.push(ReviewSuggestion {
            category: "structure".into(),
            issue: "Paragraphs are dense.".into(),
            suggestion: "Break long paragraphs into shorter ones for readability.".into(),
        });
    } else if paragraphs >= 3 {
        strengths.push("Clear paragraph structure.".to_string());
    }

    if has_quotes {
        score += 1;
        strengths.push("Includes direct quotes.".to_string());
    } else {
        score -= 1;
        suggestions.push(ReviewSuggestion {
            category: "sourcing".into(),
            issue: "No direct quotes found.".into(),
            suggestion: "Attribute key claims to named sources with direct quotes.".into(),
        });
    }

    Review {
        overall_score: clamp_score(score),
        summary: format!(
            "Automated checks only: {words} words in {paragraphs} paragraphs. \
             An editor should still review accuracy and framing."
        ),
        strengths,
        suggestions,
        ai_generated: false,
    }
}

/// Clamp a score into 1..=10.
pub fn clamp_score(score: i32) -> u8 {
    u8::try_from(score.clamp(1, 10)).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContactContext, StoryContext};

    fn story() -> StoryContext {
        StoryContext {
            title: "Budget shortfall".into(),
            description: None,
        }
    }

    #[test]
    fn questions_are_personalised_and_sized() {
        let brief = QuestionBrief {
            story: story(),
            contact: None,
            focus: None,
            count: 3,
        };
        let qs = questions(&brief);
        assert_eq!(qs.len(), 3);
        assert_eq!(
            qs[0].question,
            "How did you first become involved with \"Budget shortfall\"?"
        );
        assert!(qs.iter().all(|q| !q.rationale.is_empty()));
    }

    #[test]
    fn questions_cycle_past_template_count() {
        let brief = QuestionBrief {
            story: story(),
            contact: None,
            focus: None,
            count: GENERAL_QUESTIONS.len() + 2,
        };
        assert_eq!(questions(&brief).len(), GENERAL_QUESTIONS.len() + 2);
    }

    #[test]
    fn email_templates_per_purpose() {
        let mut brief = EmailBrief {
            purpose: "interview_request".into(),
            tone: "professional".into(),
            contact: ContactContext {
                name: "Dr. Reed".into(),
                ..Default::default()
            },
            story: Some(story()),
            sender_name: "Sam".into(),
            notes: None,
        };
        let draft = email(&brief);
        assert_eq!(draft.subject, "Interview request: Budget shortfall");
        assert!(draft.body.starts_with("Dear Dr. Reed,"));
        assert!(draft.body.ends_with("Best regards,\nSam"));
        assert!(!draft.ai_generated);

        brief.purpose = "fact_check".into();
        assert_eq!(email(&brief).subject, "Fact check request: Budget shortfall");

        brief.purpose = "thank_you".into();
        brief.story = None;
        assert_eq!(
            email(&brief).subject,
            "Thank you for your time: a story I am working on"
        );
    }

    #[test]
    fn email_includes_notes() {
        let brief = EmailBrief {
            purpose: "follow_up".into(),
            tone: "friendly".into(),
            contact: ContactContext {
                name: "Ana".into(),
                ..Default::default()
            },
            story: None,
            sender_name: "Sam".into(),
            notes: Some("Deadline is Friday.".into()),
        };
        assert!(email(&brief).body.contains("Deadline is Friday.\n\nBest regards"));
    }

    #[test]
    fn short_unquoted_draft_scores_low() {
        let r = review(&ReviewBrief {
            title: None,
            content: "The council met on Tuesday.".into(),
        });
        assert_eq!(r.overall_score, 4);
        assert!(!r.ai_generated);
        let categories: Vec<&str> = r.suggestions.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["length", "sourcing"]);
    }

    #[test]
    fn well_formed_draft_scores_high() {
        let paragraph = format!("{} \"quoted\"", "word ".repeat(100));
        let content = vec![paragraph; 4].join("\n\n");
        let r = review(&ReviewBrief {
            title: Some("T".into()),
            content,
        });
        assert_eq!(r.overall_score, 8);
        assert!(r.suggestions.is_empty());
        assert_eq!(r.strengths.len(), 3);
    }

    #[test]
    fn score_is_clamped() {
        assert_eq!(clamp_score(-5), 1);
        assert_eq!(clamp_score(42), 10);
        assert_eq!(clamp_score(6), 6);
    }
}
