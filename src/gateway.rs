//! AI evaluation gateway: a minimal OpenAI-compatible chat client for our
//! three intents (quiz pick, free-form code, practice commentary).
//!
//! We only call chat.completions and always request a strict JSON object.
//! Calls are instrumented and log model names, latencies, and response sizes
//! (not contents). Any transport, HTTP, or parse failure is absorbed here:
//! the public methods always resolve with a best-effort result and never
//! propagate an error to the caller.
//!
//! NOTE: We never log the API key.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::Prompts;
use crate::domain::{AiVerdict, Language};
use crate::practice::fallback_commentary;
use crate::util::fill_template;

#[derive(Clone)]
pub struct AiGateway {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub fast_model: String,
  pub strong_model: String,
}

/// The canned verdict substituted for every gateway failure.
pub fn fallback_verdict() -> AiVerdict {
  AiVerdict {
    is_correct: false,
    feedback: "Hệ thống AI đang bận, bạn vui lòng thử lại sau.".into(),
    hint: "Hãy suy nghĩ kỹ lại một chút nhé!".into(),
    suggestions: None,
  }
}

/// User message for the quiz intent: the model judges the picked option's
/// text against the correct option's text.
pub fn build_quiz_eval_user(
  prompts: &Prompts,
  question: &str,
  options: &[String],
  correct_option: usize,
  picked_text: &str,
) -> String {
  let correct_text = options
    .get(correct_option)
    .or_else(|| options.first())
    .map(String::as_str)
    .unwrap_or("");
  fill_template(
    &prompts.quiz_eval_user_template,
    &[
      ("question", question),
      ("options", &options.join(", ")),
      ("correct_text", correct_text),
      ("picked_text", picked_text),
    ],
  )
}

/// User message for the code intent.
pub fn build_code_eval_user(prompts: &Prompts, language: Language, task: &str, code: &str) -> String {
  fill_template(
    &prompts.code_eval_user_template,
    &[("language", language.label()), ("task", task), ("code", code)],
  )
}

/// User message for the practice closing commentary.
pub fn build_practice_summary_user(
  prompts: &Prompts,
  language: Language,
  level: u8,
  score: u32,
) -> String {
  fill_template(
    &prompts.practice_summary_user_template,
    &[
      ("language", language.label()),
      ("level", &level.to_string()),
      ("score", &score.to_string()),
    ],
  )
}

impl AiGateway {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let fast_model =
      std::env::var("OPENAI_FAST_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
    let strong_model =
      std::env::var("OPENAI_STRONG_MODEL").unwrap_or_else(|_| "gpt-4o".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, fast_model, strong_model })
  }

  /// JSON-object chat completion. Generic over the target type T.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_json<T: for<'a> Deserialize<'a>>(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<T, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: model.to_string(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      response_format: Some(ResponseFormat { r#type: "json_object".into() }),
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "nexuscoder-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_api_error(&body).unwrap_or(body);
      return Err(format!("AI endpoint HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "AI usage");
    }
    let text = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default();

    serde_json::from_str::<T>(&text).map_err(|e| format!("JSON parse error: {}", e))
  }

  // --- High-level intents (all infallible) ---

  /// Judge a multiple-choice pick. The strong model sees the picked text and
  /// the correct option's text and explains, in a pedagogical register, why
  /// the pick is right or wrong.
  #[instrument(level = "info", skip_all, fields(model = %self.strong_model, question_len = question.len()))]
  pub async fn evaluate_quiz(
    &self,
    prompts: &Prompts,
    question: &str,
    options: &[String],
    correct_option: usize,
    picked_text: &str,
  ) -> AiVerdict {
    let user = build_quiz_eval_user(prompts, question, options, correct_option, picked_text);
    let start = std::time::Instant::now();
    let result = self
      .chat_json::<AiVerdict>(&self.strong_model, &prompts.quiz_eval_system, &user, 0.2)
      .await;
    match result {
      Ok(v) => {
        info!(elapsed = ?start.elapsed(), is_correct = v.is_correct, "Quiz evaluation received");
        v
      }
      Err(e) => {
        error!(elapsed = ?start.elapsed(), error = %e, "Quiz evaluation failed; using fallback verdict");
        fallback_verdict()
      }
    }
  }

  /// Judge a free-form code submission against its mission task.
  #[instrument(level = "info", skip_all, fields(model = %self.strong_model, %language, code_len = code.len()))]
  pub async fn evaluate_code(
    &self,
    prompts: &Prompts,
    language: Language,
    task: &str,
    code: &str,
  ) -> AiVerdict {
    let user = build_code_eval_user(prompts, language, task, code);
    let start = std::time::Instant::now();
    let result = self
      .chat_json::<AiVerdict>(&self.strong_model, &prompts.code_eval_system, &user, 0.2)
      .await;
    match result {
      Ok(v) => {
        info!(elapsed = ?start.elapsed(), is_correct = v.is_correct, "Code evaluation received");
        v
      }
      Err(e) => {
        error!(elapsed = ?start.elapsed(), error = %e, "Code evaluation failed; using fallback verdict");
        fallback_verdict()
      }
    }
  }

  /// One-shot closing commentary for a finished practice run. Falls back to
  /// the canned encouragement keyed on the score tier.
  #[instrument(level = "info", skip_all, fields(model = %self.fast_model, %language, level, score))]
  pub async fn practice_summary(
    &self,
    prompts: &Prompts,
    language: Language,
    level: u8,
    score: u32,
  ) -> String {
    #[derive(Deserialize)]
    struct Summary {
      feedback: String,
    }

    let user = build_practice_summary_user(prompts, language, level, score);
    match self
      .chat_json::<Summary>(&self.fast_model, &prompts.practice_summary_system, &user, 0.6)
      .await
    {
      Ok(s) if !s.feedback.trim().is_empty() => s.feedback,
      Ok(_) => fallback_commentary(score).to_string(),
      Err(e) => {
        error!(error = %e, "Practice commentary failed; using canned string");
        fallback_commentary(score).to_string()
      }
    }
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }
#[derive(Serialize)]
struct ResponseFormat { #[serde(rename = "type")] r#type: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from an API error body.
fn extract_api_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn opts(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn quiz_prompt_references_the_picked_and_correct_texts() {
    let prompts = Prompts::default();
    let user = build_quiz_eval_user(&prompts, "Pick one", &opts(&["A", "B", "C"]), 1, "B");
    assert!(user.contains("Correct Option: B"));
    assert!(user.contains("User picked: B"));
    assert!(user.contains("Options: A, B, C"));
  }

  #[test]
  fn quiz_prompt_survives_an_out_of_range_correct_index() {
    let prompts = Prompts::default();
    let user = build_quiz_eval_user(&prompts, "Pick one", &opts(&["A", "B"]), 7, "A");
    assert!(user.contains("Correct Option: A"));
  }

  #[test]
  fn code_prompt_carries_language_task_and_code() {
    let prompts = Prompts::default();
    let user = build_code_eval_user(&prompts, Language::Python, "In ra Xin chào", "print('Xin chào')");
    assert!(user.contains("Language: Python"));
    assert!(user.contains("Mission Task: In ra Xin chào"));
    assert!(user.contains("print('Xin chào')"));
  }

  #[test]
  fn practice_summary_prompt_carries_score_and_level() {
    let prompts = Prompts::default();
    let user = build_practice_summary_user(&prompts, Language::Html, 3, 85);
    assert!(user.contains("HTML"));
    assert!(user.contains("cấp độ 3"));
    assert!(user.contains("85/100"));
  }

  #[test]
  fn the_fallback_verdict_is_negative_with_fixed_strings() {
    let v = fallback_verdict();
    assert!(!v.is_correct);
    assert_eq!(v.feedback, "Hệ thống AI đang bận, bạn vui lòng thử lại sau.");
    assert_eq!(v.hint, "Hãy suy nghĩ kỹ lại một chút nhé!");
    assert!(v.suggestions.is_none());
  }

  #[test]
  fn api_error_bodies_are_unwrapped_when_possible() {
    let body = r#"{"error": {"message": "invalid api key"}}"#;
    assert_eq!(extract_api_error(body).as_deref(), Some("invalid api key"));
    assert!(extract_api_error("not json").is_none());
  }
}
