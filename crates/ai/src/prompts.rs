//! Prompt templates.

use std::fmt::Write;

use crate::types::{ContactContext, EmailBrief, QuestionBrief, ReviewBrief, StoryContext};

fn describe_story(out: &mut String, story: &StoryContext) {
    let _ = writeln!(out, "Story: {}", story.title);
    if let Some(description) = story.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "Story summary: {description}");
    }
}

fn describe_contact(out: &mut String, contact: &ContactContext) {
    let _ = write!(out, "Contact: {}", contact.name);
    if let Some(role) = &contact.role {
        let _ = write!(out, ", {role}");
    }
    if let Some(org) = &contact.organization {
        let _ = write!(out, " at {org}");
    }
    out.push('\n');
    if let Some(expertise) = &contact.expertise {
        let _ = writeln!(out, "Expertise: {expertise}");
    }
}

pub fn search(query: &str, story: Option<&StoryContext>) -> String {
    let mut out = String::new();
    if let Some(story) = story {
        describe_story(&mut out, story);
        out.push('\n');
    }
    let _ = write!(
        out,
        "Research the following question for a news story and summarise the key facts, \
         figures, and viewpoints. Note where sources disagree.\n\nQuestion: {query}"
    );
    out
}

pub fn interview_questions(brief: &QuestionBrief) -> String {
    let mut out = String::from(
        "You are an experienced investigative editor preparing a reporter for an interview.\n\n",
    );
    describe_story(&mut out, &brief.story);
    if let Some(contact) = &brief.contact {
        describe_contact(&mut out, contact);
    }
    if let Some(focus) = &brief.focus {
        let _ = writeln!(out, "Focus: {focus}");
    }
    let _ = write!(
        out,
        "\nWrite {} interview questions. Respond with only a JSON array of objects with the \
         keys \"question\", \"category\" (one of background, factual, opinion, follow_up, \
         accountability) and \"rationale\".",
        brief.count
    );
    out
}

pub fn email(brief: &EmailBrief) -> String {
    let mut out = String::from("Draft an email from a journalist to a source.\n\n");
    let _ = writeln!(out, "Purpose: {}", brief.purpose.replace('_', " "));
    let _ = writeln!(out, "Tone: {}", brief.tone);
    let _ = writeln!(out, "Sender: {}", brief.sender_name);
    describe_contact(&mut out, &brief.contact);
    if let Some(story) = &brief.story {
        describe_story(&mut out, story);
    }
    if let Some(notes) = &brief.notes {
        let _ = writeln!(out, "Additional notes: {notes}");
    }
    out.push_str(
        "\nRespond with only a JSON object with the keys \"subject\" and \"body\". \
         The body is plain text.",
    );
    out
}

pub fn review(brief: &ReviewBrief) -> String {
    let mut out = String::from(
        "You are a senior news editor. Review the article below for accuracy risks, \
         structure, clarity, sourcing and style.\n\n",
    );
    if let Some(title) = &brief.title {
        let _ = writeln!(out, "Headline: {title}");
    }
    let _ = write!(
        out,
        "Article:\n\"\"\"\n{}\n\"\"\"\n\nRespond with only a JSON object with the keys \
         \"overallScore\" (integer 1-10), \"summary\", \"strengths\" (array of strings) and \
         \"suggestions\" (array of objects with \"category\", \"issue\", \"suggestion\").",
        brief.content
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_prompt_mentions_context() {
        let brief = QuestionBrief {
            story: StoryContext {
                title: "River contamination".into(),
                description: Some("Runoff from the plant".into()),
            },
            contact: Some(ContactContext {
                name: "Dana Ortiz".into(),
                organization: Some("EPA".into()),
                role: Some("Inspector".into()),
                expertise: None,
            }),
            focus: Some("timeline".into()),
            count: 5,
        };
        let prompt = interview_questions(&brief);
        assert!(prompt.contains("Story: River contamination"));
        assert!(prompt.contains("Contact: Dana Ortiz, Inspector at EPA"));
        assert!(prompt.contains("Focus: timeline"));
        assert!(prompt.contains("Write 5 interview questions"));
    }

    #[test]
    fn blank_description_is_skipped() {
        let story = StoryContext {
            title: "T".into(),
            description: Some("  ".into()),
        };
        assert!(!search("q", Some(&story)).contains("Story summary"));
    }
}
