//! The single in-memory session: learner profile, per-track mission ladders,
//! the current screen, and the practice sub-session.
//!
//! Screens form a finite state machine driven only by explicit intents; the
//! one timer-driven transition (mission → result after finishing a track's
//! last mission) is applied through `redirect_to_result` with a generation
//! check so a stale timer can never fire into a different screen.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::{Language, Mission, Screen, UserProfile};
use crate::practice::{PracticeAnswer, PracticeError, PracticeSession};
use crate::progress::{self, CompletionOutcome};

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("Vui lòng nhập đầy đủ thông tin để bắt đầu hành trình!")]
  MissingLoginField,
  #[error("Bạn chưa nhập code để kiểm tra!")]
  EmptySubmission,
  #[error("intent does not apply to the current screen")]
  WrongScreen,
  #[error("screen is not reachable by direct navigation")]
  UnreachableScreen,
  #[error("no language track selected")]
  NoTrackSelected,
  #[error("unknown mission id: {0}")]
  UnknownMission(String),
  #[error("mission is still locked")]
  MissionLocked,
  #[error("no active mission")]
  NoActiveMission,
  #[error("an evaluation is already in flight")]
  EvaluationInFlight,
  #[error("submission does not match the mission kind")]
  WrongMissionKind,
  #[error("option index out of range")]
  OptionOutOfRange,
  #[error(transparent)]
  Practice(#[from] PracticeError),
}

pub struct Session {
  pub profile: UserProfile,
  pub screen: Screen,
  pub selected_track: Option<Language>,
  pub missions: HashMap<Language, Vec<Mission>>,
  pub active_mission: Option<String>,
  /// Busy flag: one evaluation at a time per session.
  pub evaluating: bool,
  /// Bumped per evaluation so a reply that outlives its screen is discarded.
  pub eval_seq: u64,
  pub practice: PracticeSession,
}

impl Session {
  pub fn new(missions: HashMap<Language, Vec<Mission>>) -> Self {
    Self {
      profile: UserProfile::fresh(),
      screen: Screen::Login,
      selected_track: None,
      missions,
      active_mission: None,
      evaluating: false,
      eval_seq: 0,
      practice: PracticeSession::new(),
    }
  }

  /// Login validates both fields locally; nothing is mutated on failure.
  pub fn login(&mut self, name: &str, class_name: &str) -> Result<(), SessionError> {
    if self.screen != Screen::Login {
      return Err(SessionError::WrongScreen);
    }
    let name = name.trim();
    let class_name = class_name.trim();
    if name.is_empty() || class_name.is_empty() {
      return Err(SessionError::MissingLoginField);
    }
    self.profile.name = name.to_string();
    self.profile.class_name = class_name.to_string();
    self.screen = Screen::Home;
    Ok(())
  }

  /// Forward navigation to a named screen. Mission, result and the inner
  /// practice screens are only reachable through their own intents.
  pub fn navigate(&mut self, target: Screen) -> Result<(), SessionError> {
    if self.screen == Screen::Login {
      return Err(SessionError::WrongScreen);
    }
    match target {
      Screen::Home | Screen::Selection | Screen::Leaderboard => {
        self.screen = target;
        Ok(())
      }
      Screen::Map => {
        if self.selected_track.is_none() {
          return Err(SessionError::NoTrackSelected);
        }
        self.screen = Screen::Map;
        Ok(())
      }
      Screen::QuizPracticeSelect => {
        self.practice = PracticeSession {
          generation: self.practice.generation + 1,
          ..PracticeSession::new()
        };
        self.screen = Screen::QuizPracticeSelect;
        Ok(())
      }
      _ => Err(SessionError::UnreachableScreen),
    }
  }

  pub fn select_track(&mut self, language: Language) -> Result<(), SessionError> {
    if self.screen == Screen::Login {
      return Err(SessionError::WrongScreen);
    }
    self.selected_track = Some(language);
    self.screen = Screen::Map;
    Ok(())
  }

  pub fn track_missions(&self) -> Result<&[Mission], SessionError> {
    let track = self.selected_track.ok_or(SessionError::NoTrackSelected)?;
    Ok(self.missions.get(&track).map(Vec::as_slice).unwrap_or(&[]))
  }

  pub fn start_mission(&mut self, mission_id: &str) -> Result<Mission, SessionError> {
    if self.screen != Screen::Map {
      return Err(SessionError::WrongScreen);
    }
    let track = self.selected_track.ok_or(SessionError::NoTrackSelected)?;
    let missions = self
      .missions
      .get(&track)
      .ok_or_else(|| SessionError::UnknownMission(mission_id.to_string()))?;
    let mission = missions
      .iter()
      .find(|m| m.id == mission_id)
      .ok_or_else(|| SessionError::UnknownMission(mission_id.to_string()))?;
    if !mission.unlocked {
      return Err(SessionError::MissionLocked);
    }
    let mission = mission.clone();
    self.active_mission = Some(mission.id.clone());
    // Entering the editor is a fresh surface. Bumping the generation here
    // invalidates any reply still in flight from a previous visit, so it can
    // never complete the mission we are about to show.
    self.eval_seq += 1;
    self.evaluating = false;
    self.screen = Screen::Mission;
    Ok(mission)
  }

  pub fn active_mission(&self) -> Result<Mission, SessionError> {
    let track = self.selected_track.ok_or(SessionError::NoTrackSelected)?;
    let id = self.active_mission.as_deref().ok_or(SessionError::NoActiveMission)?;
    self
      .missions
      .get(&track)
      .and_then(|ms| ms.iter().find(|m| m.id == id))
      .cloned()
      .ok_or_else(|| SessionError::UnknownMission(id.to_string()))
  }

  /// Claim the evaluation slot. Returns the generation the eventual reply
  /// must present to be applied.
  pub fn begin_evaluation(&mut self) -> Result<u64, SessionError> {
    if self.screen != Screen::Mission {
      return Err(SessionError::WrongScreen);
    }
    if self.evaluating {
      return Err(SessionError::EvaluationInFlight);
    }
    self.evaluating = true;
    self.eval_seq += 1;
    Ok(self.eval_seq)
  }

  /// Release the evaluation slot. Returns true when the reply is still
  /// current (same generation, still on the mission screen) and may be
  /// applied; a stale reply only clears its own busy flag.
  pub fn end_evaluation(&mut self, seq: u64) -> bool {
    if seq == self.eval_seq {
      self.evaluating = false;
      self.screen == Screen::Mission
    } else {
      false
    }
  }

  /// Apply a correct evaluation to the progression state. Non-last missions
  /// route straight back to the map; the track's last mission keeps the
  /// mission screen until the result redirect fires.
  pub fn complete_active_mission(&mut self) -> Result<CompletionOutcome, SessionError> {
    let track = self.selected_track.ok_or(SessionError::NoTrackSelected)?;
    let id = self.active_mission.clone().ok_or(SessionError::NoActiveMission)?;
    let missions = self
      .missions
      .get_mut(&track)
      .ok_or_else(|| SessionError::UnknownMission(id.clone()))?;
    let xp = missions
      .iter()
      .find(|m| m.id == id)
      .map(|m| m.xp_reward)
      .ok_or_else(|| SessionError::UnknownMission(id.clone()))?;

    let outcome = progress::record_completion(&mut self.profile, missions, &id, xp);
    if !outcome.track_finished {
      self.active_mission = None;
      self.screen = Screen::Map;
    }
    Ok(outcome)
  }

  /// Timer-driven transition after finishing a track: only fires if the
  /// session still sits on the same evaluation generation and screen.
  pub fn redirect_to_result(&mut self, seq: u64) -> bool {
    if self.eval_seq == seq && self.screen == Screen::Mission {
      self.active_mission = None;
      self.screen = Screen::Result;
      true
    } else {
      false
    }
  }

  /// Restart the journey: fresh profile, pristine ladders, back to selection.
  pub fn restart(&mut self, pristine: HashMap<Language, Vec<Mission>>) {
    progress::reset_profile(&mut self.profile);
    self.missions = pristine;
    self.active_mission = None;
    self.evaluating = false;
    self.screen = Screen::Selection;
  }

  // --- Practice wrappers: keep the screen in sync with the inner phase ---

  pub fn practice_pick_language(&mut self, language: Language) -> Result<(), SessionError> {
    if self.screen != Screen::QuizPracticeSelect {
      return Err(SessionError::WrongScreen);
    }
    self.practice.pick_language(language)?;
    self.screen = Screen::QuizPracticeLevels;
    Ok(())
  }

  pub fn practice_pick_level(
    &mut self,
    level: u8,
    questions: Vec<crate::domain::PracticeQuestion>,
  ) -> Result<(), SessionError> {
    if self.screen != Screen::QuizPracticeLevels {
      return Err(SessionError::WrongScreen);
    }
    self.practice.pick_level(level, questions)?;
    self.screen = Screen::QuizPracticePlay;
    Ok(())
  }

  pub fn practice_answer(&mut self, option: usize) -> Result<PracticeAnswer, SessionError> {
    if self.screen != Screen::QuizPracticePlay {
      return Err(SessionError::WrongScreen);
    }
    Ok(self.practice.answer(option)?)
  }

  /// Scheduled advance; ignored when the run it belongs to is gone.
  pub fn practice_advance(&mut self, generation: u64) -> Option<bool> {
    if self.practice.generation != generation || self.screen != Screen::QuizPracticePlay {
      return None;
    }
    let finished = self.practice.advance();
    if finished {
      self.screen = Screen::QuizPracticeResult;
    }
    Some(finished)
  }

  pub fn practice_back(&mut self) -> Result<(), SessionError> {
    match self.screen {
      Screen::QuizPracticeSelect => {}
      Screen::QuizPracticeLevels | Screen::QuizPracticePlay | Screen::QuizPracticeResult => {
        self.practice.back();
      }
      _ => return Err(SessionError::WrongScreen),
    }
    self.screen = match self.practice.phase {
      crate::practice::PracticePhase::PickLanguage => Screen::QuizPracticeSelect,
      crate::practice::PracticePhase::PickLevel => Screen::QuizPracticeLevels,
      crate::practice::PracticePhase::Play => Screen::QuizPracticePlay,
      crate::practice::PracticePhase::Result => Screen::QuizPracticeResult,
    };
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{mission_catalog, practice_bank};

  fn logged_in() -> Session {
    let mut s = Session::new(mission_catalog());
    s.login("Nguyễn Văn A", "6A1").expect("login");
    s
  }

  #[test]
  fn login_requires_both_fields_and_moves_home() {
    let mut s = Session::new(mission_catalog());
    assert!(matches!(s.login("  ", "6A1"), Err(SessionError::MissingLoginField)));
    assert_eq!(s.screen, Screen::Login);
    assert!(matches!(s.login("An", "   "), Err(SessionError::MissingLoginField)));

    s.login(" An ", " 6A1 ").expect("login");
    assert_eq!(s.screen, Screen::Home);
    assert_eq!(s.profile.name, "An");
    assert_eq!(s.profile.class_name, "6A1");
  }

  #[test]
  fn map_navigation_needs_a_selected_track() {
    let mut s = logged_in();
    assert!(matches!(s.navigate(Screen::Map), Err(SessionError::NoTrackSelected)));
    s.select_track(Language::Python).expect("track");
    assert_eq!(s.screen, Screen::Map);
    s.navigate(Screen::Leaderboard).expect("leaderboard");
    s.navigate(Screen::Map).expect("back to map");
  }

  #[test]
  fn mission_and_result_screens_are_not_directly_navigable() {
    let mut s = logged_in();
    assert!(matches!(s.navigate(Screen::Mission), Err(SessionError::UnreachableScreen)));
    assert!(matches!(s.navigate(Screen::Result), Err(SessionError::UnreachableScreen)));
  }

  #[test]
  fn missions_start_only_from_the_map_screen() {
    let mut s = logged_in();
    s.select_track(Language::Python).expect("track");
    s.navigate(Screen::Home).expect("home");
    assert!(matches!(s.start_mission("py_m1"), Err(SessionError::WrongScreen)));
  }

  #[test]
  fn locked_missions_cannot_be_started() {
    let mut s = logged_in();
    s.select_track(Language::Python).expect("track");
    let locked = s.missions[&Language::Python][1].id.clone();
    assert!(matches!(s.start_mission(&locked), Err(SessionError::MissionLocked)));

    let first = s.missions[&Language::Python][0].id.clone();
    let mission = s.start_mission(&first).expect("start");
    assert_eq!(mission.order, 1);
    assert_eq!(s.screen, Screen::Mission);
  }

  #[test]
  fn the_busy_flag_blocks_concurrent_evaluations() {
    let mut s = logged_in();
    s.select_track(Language::Python).expect("track");
    let first = s.missions[&Language::Python][0].id.clone();
    s.start_mission(&first).expect("start");

    let seq = s.begin_evaluation().expect("begin");
    assert!(matches!(s.begin_evaluation(), Err(SessionError::EvaluationInFlight)));
    assert!(s.end_evaluation(seq));
    assert!(!s.evaluating);
  }

  #[test]
  fn a_reply_for_an_abandoned_screen_is_stale() {
    let mut s = logged_in();
    s.select_track(Language::Python).expect("track");
    let first = s.missions[&Language::Python][0].id.clone();
    s.start_mission(&first).expect("start");
    let seq = s.begin_evaluation().expect("begin");

    s.navigate(Screen::Map).expect("leave mid-flight");
    assert!(!s.end_evaluation(seq), "reply must not apply off the mission screen");
    assert!(!s.evaluating, "slot is released even for stale replies");
  }

  #[test]
  fn a_reply_from_a_previous_visit_is_discarded() {
    let mut s = logged_in();
    s.select_track(Language::Python).expect("track");
    let first = s.missions[&Language::Python][0].id.clone();
    s.start_mission(&first).expect("start");
    let old_seq = s.begin_evaluation().expect("begin");

    s.navigate(Screen::Map).expect("leave");
    s.start_mission(&first).expect("re-enter");
    let new_seq = s.begin_evaluation().expect("begin again");

    assert!(!s.end_evaluation(old_seq));
    assert!(s.evaluating, "stale reply must not release the new slot");
    assert!(s.end_evaluation(new_seq));
  }

  #[test]
  fn completing_a_middle_mission_routes_back_to_the_map() {
    let mut s = logged_in();
    s.select_track(Language::Python).expect("track");
    let first = s.missions[&Language::Python][0].id.clone();
    s.start_mission(&first).expect("start");

    let out = s.complete_active_mission().expect("complete");
    assert!(!out.track_finished);
    assert_eq!(s.screen, Screen::Map);
    assert!(s.active_mission.is_none());
  }

  #[test]
  fn finishing_the_track_waits_for_the_result_redirect() {
    let mut s = logged_in();
    s.select_track(Language::Html).expect("track");
    for m in s.missions.get_mut(&Language::Html).expect("track").iter_mut() {
      m.unlocked = true;
    }
    let last = s.missions[&Language::Html].last().expect("missions").id.clone();
    s.start_mission(&last).expect("start");
    let seq = s.begin_evaluation().expect("begin");
    assert!(s.end_evaluation(seq));

    let out = s.complete_active_mission().expect("complete");
    assert!(out.track_finished);
    assert_eq!(s.screen, Screen::Mission, "stays until the redirect fires");

    assert!(s.redirect_to_result(seq));
    assert_eq!(s.screen, Screen::Result);
    assert!(!s.redirect_to_result(seq), "redirect is one-shot");
  }

  #[test]
  fn restart_restores_profile_and_ladders() {
    let mut s = logged_in();
    s.select_track(Language::Python).expect("track");
    let first = s.missions[&Language::Python][0].id.clone();
    s.start_mission(&first).expect("start");
    s.complete_active_mission().expect("complete");
    assert!(s.profile.xp > 0);

    s.restart(mission_catalog());
    assert_eq!(s.profile.xp, 0);
    assert_eq!(s.profile.level, 1);
    assert!(s.profile.completed_missions.is_empty());
    assert_eq!(s.screen, Screen::Selection);
    for missions in s.missions.values() {
      assert!(missions[0].unlocked);
      assert!(missions[1..].iter().all(|m| !m.unlocked && !m.completed));
    }
  }

  #[test]
  fn practice_flow_tracks_the_screen() {
    let mut s = logged_in();
    s.navigate(Screen::QuizPracticeSelect).expect("open practice");
    s.practice_pick_language(Language::Python).expect("language");
    assert_eq!(s.screen, Screen::QuizPracticeLevels);

    let pool = practice_bank().remove(&(Language::Python, 1)).expect("pool");
    s.practice_pick_level(1, pool).expect("level");
    assert_eq!(s.screen, Screen::QuizPracticePlay);

    let generation = s.practice.generation;
    s.practice_answer(0).expect("answer");
    assert_eq!(s.practice_advance(generation), Some(false));
    assert_eq!(s.practice_advance(generation + 1), None, "stale advance ignored");

    s.practice_back().expect("back");
    assert_eq!(s.screen, Screen::QuizPracticeLevels);
  }
}
