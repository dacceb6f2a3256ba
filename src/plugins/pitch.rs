//! Outreach pitch drafting for a single contact

use tracing::error;

use super::TextGenerator;
use crate::models::Contact;

/// Returned when the model answers with nothing
pub const EMPTY_PITCH: &str = "Не удалось сгенерировать питч.";

/// Returned when the call itself fails
pub const FAILED_PITCH: &str = "Ошибка генерации питча.";

pub fn pitch_prompt(contact: &Contact, context: &str) -> String {
    format!(
        "Generate a professional and engaging PR pitch in RUSSIAN for the following contact:
Name: {name}
Platform: {platform} ({handle})
Category: {category}
Notes: {notes}
Tags: {tags}

Context for the pitch: {context}

Rules:
- Language: RUSSIAN.
- Style: Business professional but music-industry friendly.
- Length: Short (1-2 paragraphs).
- Output ONLY the message text.",
        name = contact.name,
        platform = contact.platform,
        handle = contact.handle,
        category = contact.category,
        notes = contact.notes,
        tags = contact.tags.join(", "),
        context = context.trim(),
    )
}

/// Draft a pitch. Never fails: errors become a fixed message.
pub async fn generate_pitch(ai: &dyn TextGenerator, contact: &Contact, context: &str) -> String {
    match ai.generate_text(&pitch_prompt(contact, context)).await {
        Ok(text) if text.trim().is_empty() => EMPTY_PITCH.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            error!(provider = ai.name(), contact = %contact.id, "Pitch generation failed: {}", e);
            FAILED_PITCH.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::testing::CannedGenerator;
    use crate::stores::sample_data;

    fn luna() -> Contact {
        sample_data().contacts[1].clone()
    }

    #[test]
    fn test_prompt_carries_contact_details() {
        let prompt = pitch_prompt(&luna(), "  новый сингл Neon Nights ");
        assert!(prompt.contains("Name: Луна Рэй"));
        assert!(prompt.contains("Platform: Telegram (lunaray_official)"));
        assert!(prompt.contains("Category: Artist"));
        assert!(prompt.contains("Tags: Музыка, Инди"));
        assert!(prompt.contains("Context for the pitch: новый сингл Neon Nights\n"));
    }

    #[tokio::test]
    async fn test_pitch_reply_is_returned() {
        let ai = CannedGenerator::replying("  Привет, Луна!\n");
        let text = generate_pitch(&ai, &luna(), "").await;
        assert_eq!(text, "Привет, Луна!");
        assert_eq!(ai.prompts.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_pitch_fallbacks() {
        let empty = CannedGenerator::replying("   ");
        assert_eq!(generate_pitch(&empty, &luna(), "").await, EMPTY_PITCH);

        let failing = CannedGenerator::failing();
        assert_eq!(generate_pitch(&failing, &luna(), "").await, FAILED_PITCH);
    }
}
