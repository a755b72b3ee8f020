use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::api_connection::{ImageData, TextGenerator};
use crate::chat::responder;
use crate::i18n::Language;
use crate::nutrition::NutritionRecord;
use crate::profile::Profile;
use crate::prompts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageData>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: Role, text: String, image: Option<ImageData>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text,
            image,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ChatError {
    #[error("question is empty")]
    EmptyQuestion,
}

/// How an assistant reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Model,
    /// Canned advice; no model was configured.
    Offline,
    /// Canned advice after the model call failed.
    Fallback,
}

/// One conversation. Messages are only ever appended.
#[derive(Debug)]
pub struct ChatSession {
    profile: Profile,
    analysis: Option<NutritionRecord>,
    language: Language,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(profile: Profile, analysis: Option<NutritionRecord>, language: Language) -> Self {
        Self {
            profile,
            analysis,
            language,
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Records the question, asks the model and records its reply. A failed
    /// model call is answered with a notice plus canned advice instead of an
    /// error.
    pub async fn ask(
        &mut self,
        generator: &dyn TextGenerator,
        question: &str,
        image: Option<ImageData>,
    ) -> Result<(&ChatMessage, ReplySource), ChatError> {
        let question = self.record_question(question, image.clone())?;
        let prompt = prompts::advisor_prompt(
            &question,
            &self.profile,
            self.analysis.as_ref(),
            image.is_some(),
            self.language,
        );

        let (text, source) = match generator.generate(&prompt, image.as_ref()).await {
            Ok(reply) => (reply, ReplySource::Model),
            Err(e) => {
                tracing::error!(error = %e, "chat model call failed, answering locally");
                let credential_problem = e.is_credential_problem();
                let text = format!(
                    "{}\n\n{}\n\n{}",
                    prompts::failure_notice(credential_problem, &question, self.language),
                    responder::respond(&question, &self.profile, self.analysis.as_ref()),
                    prompts::retry_hint(credential_problem, self.language)
                );
                (text, ReplySource::Fallback)
            }
        };
        Ok((self.record_reply(text), source))
    }

    /// Same as [`ChatSession::ask`] but answered by the canned responder only.
    pub fn ask_offline(
        &mut self,
        question: &str,
        image: Option<ImageData>,
    ) -> Result<(&ChatMessage, ReplySource), ChatError> {
        let has_image = image.is_some();
        let question = self.record_question(question, image)?;
        let text = self.offline_reply(&question, has_image);
        Ok((self.record_reply(text), ReplySource::Offline))
    }

    fn record_question(&mut self, question: &str, image: Option<ImageData>) -> Result<String, ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }
        self.messages
            .push(ChatMessage::new(Role::User, question.to_string(), image));
        Ok(question.to_string())
    }

    fn record_reply(&mut self, text: String) -> &ChatMessage {
        self.messages.push(ChatMessage::new(Role::Assistant, text, None));
        &self.messages[self.messages.len() - 1]
    }

    fn offline_reply(&self, question: &str, has_image: bool) -> String {
        let mut text = responder::respond(question, &self.profile, self.analysis.as_ref());
        if has_image {
            text.push_str(
                " I can see the image you uploaded - this helps provide more specific guidance.",
            );
        }
        text
    }
}
