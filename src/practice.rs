//! Practice-quiz subsystem: a self-contained scoring loop, fully independent
//! of the learner profile and the mission ladder.
//!
//! Phases: pick-language → pick-level → play → result. Answering locks the
//! current question; the orchestration layer applies the auto-advance after
//! the fixed reveal delay. Nothing here ever writes to `UserProfile`.

use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{Language, PracticeQuestion};

pub const SESSION_LEN: usize = 20;
pub const POINTS_PER_CORRECT: u32 = 5;

/// Reveal delays before auto-advancing, in milliseconds.
pub const ADVANCE_DELAY_CORRECT_MS: u64 = 300;
pub const ADVANCE_DELAY_WRONG_MS: u64 = 800;

pub const HIGH_SCORE_THRESHOLD: u32 = 80;
pub const MID_SCORE_THRESHOLD: u32 = 50;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PracticePhase {
  PickLanguage,
  PickLevel,
  Play,
  Result,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
  High,
  Mid,
  Low,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PracticeError {
  #[error("intent does not apply to the current practice phase")]
  WrongPhase,
  #[error("level must be between 1 and 5")]
  UnknownLevel,
  #[error("no practice questions available for this selection")]
  EmptyPool,
  #[error("answer already locked for this question")]
  AnswerLocked,
  #[error("option index out of range")]
  OptionOutOfRange,
}

/// Outcome of answering the current question.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PracticeAnswer {
  pub correct: bool,
  pub correct_option: usize,
  pub score: u32,
  pub advance_in_ms: u64,
  pub last_question: bool,
}

/// One practice run. Holds a running score only; no per-question history.
#[derive(Clone, Debug)]
pub struct PracticeSession {
  pub phase: PracticePhase,
  pub language: Option<Language>,
  pub level: Option<u8>,
  pub questions: Vec<PracticeQuestion>,
  pub current: usize,
  pub score: u32,
  pub locked: bool,
  pub evaluating: bool,
  pub commentary: Option<String>,
  /// Bumped on every (re)start and back transition so scheduled advances
  /// and late commentary replies for an abandoned run are discarded.
  pub generation: u64,
}

impl PracticeSession {
  pub fn new() -> Self {
    Self {
      phase: PracticePhase::PickLanguage,
      language: None,
      level: None,
      questions: Vec::new(),
      current: 0,
      score: 0,
      locked: false,
      evaluating: false,
      commentary: None,
      generation: 0,
    }
  }

  pub fn pick_language(&mut self, language: Language) -> Result<(), PracticeError> {
    if self.phase != PracticePhase::PickLanguage {
      return Err(PracticeError::WrongPhase);
    }
    self.language = Some(language);
    self.phase = PracticePhase::PickLevel;
    Ok(())
  }

  /// Start playing with a drawn question set. The caller draws from the bank
  /// (see `draw_questions`) so this stays deterministic under test.
  pub fn pick_level(&mut self, level: u8, questions: Vec<PracticeQuestion>) -> Result<(), PracticeError> {
    if self.phase != PracticePhase::PickLevel {
      return Err(PracticeError::WrongPhase);
    }
    if !(1..=5).contains(&level) {
      return Err(PracticeError::UnknownLevel);
    }
    if questions.is_empty() {
      return Err(PracticeError::EmptyPool);
    }
    self.level = Some(level);
    self.questions = questions;
    self.current = 0;
    self.score = 0;
    self.locked = false;
    self.evaluating = false;
    self.commentary = None;
    self.generation += 1;
    self.phase = PracticePhase::Play;
    Ok(())
  }

  /// Answer the current question. Locks further input until the scheduled
  /// advance runs; a correct pick earns the fixed 5 points.
  pub fn answer(&mut self, option: usize) -> Result<PracticeAnswer, PracticeError> {
    if self.phase != PracticePhase::Play {
      return Err(PracticeError::WrongPhase);
    }
    if self.locked {
      return Err(PracticeError::AnswerLocked);
    }
    let question = &self.questions[self.current];
    if option >= question.options.len() {
      return Err(PracticeError::OptionOutOfRange);
    }

    self.locked = true;
    let correct = option == question.correct_option;
    if correct {
      self.score += POINTS_PER_CORRECT;
    }

    Ok(PracticeAnswer {
      correct,
      correct_option: question.correct_option,
      score: self.score,
      advance_in_ms: if correct { ADVANCE_DELAY_CORRECT_MS } else { ADVANCE_DELAY_WRONG_MS },
      last_question: self.current + 1 == self.questions.len(),
    })
  }

  /// Move past the locked question. Returns true when the run just finished
  /// (phase flipped to Result).
  pub fn advance(&mut self) -> bool {
    if self.phase != PracticePhase::Play || !self.locked {
      return false;
    }
    self.locked = false;
    if self.current + 1 < self.questions.len() {
      self.current += 1;
      false
    } else {
      self.phase = PracticePhase::Result;
      true
    }
  }

  pub fn tier(&self) -> ScoreTier {
    if self.score >= HIGH_SCORE_THRESHOLD {
      ScoreTier::High
    } else if self.score >= MID_SCORE_THRESHOLD {
      ScoreTier::Mid
    } else {
      ScoreTier::Low
    }
  }

  /// "Back" is a forward transition: level → language, play → level
  /// (abandoning the run), result → language.
  pub fn back(&mut self) {
    self.generation += 1;
    match self.phase {
      PracticePhase::PickLanguage => {}
      PracticePhase::PickLevel => {
        self.language = None;
        self.phase = PracticePhase::PickLanguage;
      }
      PracticePhase::Play => {
        self.questions.clear();
        self.current = 0;
        self.score = 0;
        self.locked = false;
        self.phase = PracticePhase::PickLevel;
      }
      PracticePhase::Result => {
        *self = Self { generation: self.generation, ..Self::new() };
      }
    }
  }
}

impl Default for PracticeSession {
  fn default() -> Self {
    Self::new()
  }
}

/// Draw a session's worth of questions from a pool, shuffled. Pools larger
/// than one session are sampled; a pool of exactly 20 is used whole.
pub fn draw_questions(pool: &[PracticeQuestion]) -> Vec<PracticeQuestion> {
  let mut rng = rand::thread_rng();
  pool
    .choose_multiple(&mut rng, SESSION_LEN)
    .cloned()
    .collect()
}

/// Canned commentary when the AI call fails, keyed on the high-score
/// threshold.
pub fn fallback_commentary(score: u32) -> &'static str {
  if score >= HIGH_SCORE_THRESHOLD {
    "Chúc mừng bạn đã hoàn thành xuất sắc bài luyện tập trắc nghiệm!"
  } else {
    "Kết quả rất ấn tượng! Hãy tiếp tục duy trì phong độ này."
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::practice_bank;

  fn started() -> PracticeSession {
    let pool = practice_bank().remove(&(Language::Python, 1)).expect("pool");
    let mut s = PracticeSession::new();
    s.pick_language(Language::Python).expect("language");
    s.pick_level(1, pool).expect("level");
    s
  }

  #[test]
  fn full_run_with_all_correct_answers_scores_one_hundred() {
    let mut s = started();
    for _ in 0..SESSION_LEN {
      let correct = s.questions[s.current].correct_option;
      let out = s.answer(correct).expect("answer");
      assert!(out.correct);
      s.advance();
    }
    assert_eq!(s.phase, PracticePhase::Result);
    assert_eq!(s.score, 100);
    assert_eq!(s.tier(), ScoreTier::High);
  }

  #[test]
  fn score_moves_in_steps_of_five() {
    let mut s = started();
    let correct = s.questions[0].correct_option;
    let out = s.answer(correct).expect("answer");
    assert_eq!(out.score, 5);
    assert_eq!(out.advance_in_ms, ADVANCE_DELAY_CORRECT_MS);
    s.advance();

    let wrong = (s.questions[s.current].correct_option + 1) % 4;
    let out = s.answer(wrong).expect("answer");
    assert!(!out.correct);
    assert_eq!(out.score, 5);
    assert_eq!(out.advance_in_ms, ADVANCE_DELAY_WRONG_MS);
  }

  #[test]
  fn answering_twice_without_advancing_is_rejected() {
    let mut s = started();
    s.answer(0).expect("first answer");
    assert_eq!(s.answer(1), Err(PracticeError::AnswerLocked));
  }

  #[test]
  fn tier_boundaries_sit_at_eighty_and_fifty() {
    let mut s = started();
    s.score = 80;
    assert_eq!(s.tier(), ScoreTier::High);
    s.score = 79;
    assert_eq!(s.tier(), ScoreTier::Mid);
    s.score = 50;
    assert_eq!(s.tier(), ScoreTier::Mid);
    s.score = 49;
    assert_eq!(s.tier(), ScoreTier::Low);
    s.score = 0;
    assert_eq!(s.tier(), ScoreTier::Low);
  }

  #[test]
  fn back_walks_one_phase_at_a_time_and_bumps_the_generation() {
    let mut s = started();
    let generation = s.generation;
    s.back();
    assert_eq!(s.phase, PracticePhase::PickLevel);
    assert!(s.generation > generation);
    s.back();
    assert_eq!(s.phase, PracticePhase::PickLanguage);
    assert!(s.language.is_none());
  }

  #[test]
  fn intents_outside_their_phase_are_rejected() {
    let mut s = PracticeSession::new();
    assert_eq!(s.answer(0), Err(PracticeError::WrongPhase));
    assert_eq!(s.pick_level(1, Vec::new()), Err(PracticeError::WrongPhase));
    s.pick_language(Language::Html).expect("language");
    assert_eq!(s.pick_level(9, Vec::new()), Err(PracticeError::UnknownLevel));
    assert_eq!(s.pick_level(2, Vec::new()), Err(PracticeError::EmptyPool));
  }

  #[test]
  fn fallback_commentary_is_keyed_on_the_high_threshold() {
    assert!(fallback_commentary(80).contains("xuất sắc"));
    assert!(fallback_commentary(79).contains("ấn tượng"));
  }

  #[test]
  fn draw_caps_at_one_session() {
    let pool = practice_bank().remove(&(Language::Html, 3)).expect("pool");
    let drawn = draw_questions(&pool);
    assert_eq!(drawn.len(), SESSION_LEN);
  }
}
