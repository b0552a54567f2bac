//! Loading agent configuration (prompts + optional content banks) from TOML.
//!
//! See `AgentConfig` and `Prompts` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Difficulty, Language, MissionKind};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AgentConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub missions: Vec<MissionCfg>,
  #[serde(default)]
  pub practice_questions: Vec<PracticeQuestionCfg>,
}

/// Mission entry accepted in TOML configuration. When any `[[missions]]`
/// entries name a track, they replace that track's built-in ladder in file
/// order. Quiz entries must carry options + correct_option.
#[derive(Clone, Debug, Deserialize)]
pub struct MissionCfg {
  #[serde(default)] pub id: Option<String>,
  pub track: Language,
  pub title: String,
  #[serde(default)] pub description: String,
  pub task: String,
  #[serde(default)] pub kind: Option<MissionKind>,
  pub difficulty: Difficulty,
  pub xp_reward: u32,
  #[serde(default)] pub options: Option<Vec<String>>,
  #[serde(default)] pub correct_option: Option<usize>,
}

/// Extra practice-bank entry; appended to the built-in (track, level) pool.
#[derive(Clone, Debug, Deserialize)]
pub struct PracticeQuestionCfg {
  #[serde(default)] pub id: Option<String>,
  pub track: Language,
  pub level: u8,
  pub question: String,
  pub options: Vec<String>,
  pub correct_option: usize,
}

/// Prompts used by the AI gateway. Defaults are sensible for the built-in
/// missions; override them in TOML to tune tone/structure.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  // Mission evaluation
  pub quiz_eval_system: String,
  pub quiz_eval_user_template: String,
  pub code_eval_system: String,
  pub code_eval_user_template: String,
  // Practice closing commentary
  pub practice_summary_system: String,
  pub practice_summary_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      quiz_eval_system: "You are Nexus AI, a supportive EdTech tutor for school students. Respond ONLY with strict JSON: {\"isCorrect\": boolean, \"feedback\": string, \"hint\": string, \"suggestions\": [string]}. Write feedback and hint in Vietnamese.".into(),
      quiz_eval_user_template: "Analyze the user's choice in a multiple-choice coding logic quiz.\nQuestion: {question}\nOptions: {options}\nCorrect Option: {correct_text}\nUser picked: {picked_text}\n\nProvide a pedagogical explanation of why their choice is correct or incorrect.\nIf incorrect, guide them toward the correct logic without just giving the letter.".into(),
      code_eval_system: "You are Nexus AI, a supportive EdTech tutor for school students. Respond ONLY with strict JSON: {\"isCorrect\": boolean, \"feedback\": string, \"hint\": string, \"suggestions\": [string]}. Write feedback and hint in Vietnamese.".into(),
      code_eval_user_template: "Analyze this user code for a coding mission.\nLanguage: {language}\nMission Task: {task}\nUser Code:\n```\n{code}\n```\n\nRules:\n- Check if the code logically fulfills the mission.\n- Be a supportive EdTech tutor.\n- Don't give the final solution immediately if wrong.\n- If correct, praise and explain why.".into(),
      practice_summary_system: "You are Nexus AI, a supportive EdTech tutor. Respond ONLY with strict JSON: {\"feedback\": string}.".into(),
      practice_summary_user_template: "Học sinh vừa hoàn thành bài luyện tập trắc nghiệm chuyên sâu {language} cấp độ {level}.\nKết quả cuối cùng: {score}/100.\nHãy đưa ra một lời nhận xét mang tính sư phạm, khích lệ và chỉ ra hướng phát triển tiếp theo dựa trên điểm số này (tiếng Việt).".into(),
    }
  }
}

/// Attempt to load `AgentConfig` from NEXUS_CONFIG_PATH. On any parsing/IO
/// error, returns None.
pub fn load_agent_config_from_env() -> Option<AgentConfig> {
  let path = std::env::var("NEXUS_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AgentConfig>(&s) {
      Ok(cfg) => {
        info!(target: "nexuscoder_backend", %path, "Loaded agent config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "nexuscoder_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "nexuscoder_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
