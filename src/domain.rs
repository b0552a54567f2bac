//! Domain models used by the backend: language tracks, screens, missions,
//! badges, the learner profile, and AI verdicts.

use serde::{Deserialize, Serialize};

/// Subject language track. Each track carries its own ordered mission ladder.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Language {
  #[serde(rename = "Python")]
  Python,
  #[serde(rename = "HTML")]
  Html,
}

impl Language {
  pub fn label(&self) -> &'static str {
    match self {
      Language::Python => "Python",
      Language::Html => "HTML",
    }
  }
}

impl std::fmt::Display for Language {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

/// Every screen the controller can sit on. Transitions are intent-driven;
/// there is no back-stack, "back" is a forward transition to a named screen.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
  Login,
  Home,
  Selection,
  Map,
  Mission,
  Leaderboard,
  Result,
  QuizPracticeSelect,
  QuizPracticeLevels,
  QuizPracticePlay,
  QuizPracticeResult,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
  Quiz,
  Code,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
  Gold,
  Silver,
  Bronze,
  #[default]
  None,
}

/// A unit of progression: a multiple-choice quiz or a free-form code task.
/// `unlocked` and `completed` are the only mutable fields; `order` is the
/// 1-based position within the track and exactly order 1 starts unlocked.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
  pub id: String,
  pub title: String,
  pub description: String,
  pub task: String,
  pub kind: MissionKind,
  pub difficulty: Difficulty,
  pub xp_reward: u32,
  pub unlocked: bool,
  pub completed: bool,
  pub order: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub correct_option: Option<usize>,
}

/// Immutable achievement marker. The profile holds copies of catalog entries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Badge {
  pub id: String,
  pub name: String,
  pub icon: String,
  pub description: String,
  #[serde(default)]
  pub tier: BadgeTier,
}

/// The learner. Level is always derived from xp (1000 xp per level) and is
/// never stored independently of it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub name: String,
  pub class_name: String,
  pub level: u32,
  pub xp: u32,
  pub badges: Vec<Badge>,
  pub completed_missions: Vec<String>,
}

impl UserProfile {
  pub fn fresh() -> Self {
    Self {
      name: String::new(),
      class_name: String::new(),
      level: 1,
      xp: 0,
      badges: Vec::new(),
      completed_missions: Vec::new(),
    }
  }
}

/// Normalized reply of one AI evaluation call. Transient, never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiVerdict {
  pub is_correct: bool,
  pub feedback: String,
  pub hint: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub suggestions: Option<Vec<String>>,
}

/// One practice-bank entry. Practice runs keep a running score only.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeQuestion {
  pub id: String,
  pub question: String,
  pub options: Vec<String>,
  pub correct_option: usize,
}

/// Static showcase row for the leaderboard screen. The avatar seed feeds the
/// client-side avatar generator; the backend never fetches images.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
  pub name: String,
  pub level: u32,
  pub xp: u32,
  pub avatar_seed: String,
}
