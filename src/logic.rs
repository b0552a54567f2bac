//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - session intents (login, navigation, track/mission selection, restart)
//!   - mission submissions: local validation, gateway call, staleness check,
//!     progression update, and the one-shot result redirect
//!   - the practice loop: scheduled auto-advance and closing commentary
//!
//! Handlers stay thin; every rule lives here or below.

use std::sync::Arc;

use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, instrument};

use crate::domain::{AiVerdict, Language, LeaderboardEntry, MissionKind, Screen};
use crate::gateway::fallback_verdict;
use crate::particles::{ParticleBurst, MISSION_BURST};
use crate::practice::{draw_questions, fallback_commentary, PracticeAnswer, PracticeError, PracticePhase};
use crate::protocol::{state_out, CompletionView, EvaluationOut, StateOut};
use crate::session::SessionError;
use crate::state::AppState;
use crate::util::trunc_for_log;

/// Delay before the controller flips from the finished track's mission
/// screen to the result screen.
pub const RESULT_REDIRECT_MS: u64 = 1000;

pub async fn get_state(state: &AppState) -> StateOut {
  state_out(&*state.session.read().await)
}

#[instrument(level = "info", skip(state, name, class_name), fields(name_len = name.len()))]
pub async fn do_login(state: &AppState, name: &str, class_name: &str) -> Result<StateOut, SessionError> {
  let mut session = state.session.write().await;
  session.login(name, class_name)?;
  info!(target: "nexuscoder_backend", name = %session.profile.name, class = %session.profile.class_name, "Learner logged in");
  Ok(state_out(&session))
}

#[instrument(level = "info", skip(state))]
pub async fn do_navigate(state: &AppState, screen: Screen) -> Result<StateOut, SessionError> {
  let mut session = state.session.write().await;
  session.navigate(screen)?;
  Ok(state_out(&session))
}

#[instrument(level = "info", skip(state))]
pub async fn do_select_track(state: &AppState, language: Language) -> Result<StateOut, SessionError> {
  let mut session = state.session.write().await;
  session.select_track(language)?;
  info!(target: "mission", %language, "Track selected");
  Ok(state_out(&session))
}

#[instrument(level = "info", skip(state, mission_id), fields(%mission_id))]
pub async fn do_start_mission(state: &AppState, mission_id: &str) -> Result<StateOut, SessionError> {
  let mut session = state.session.write().await;
  let mission = session.start_mission(mission_id)?;
  info!(target: "mission", id = %mission.id, order = mission.order, kind = ?mission.kind, "Mission started");
  Ok(state_out(&session))
}

#[instrument(level = "info", skip(state))]
pub async fn do_restart(state: &AppState) -> StateOut {
  let mut session = state.session.write().await;
  session.restart(state.catalog.missions.clone());
  info!(target: "mission", "Journey restarted; ladders restored to pristine state");
  state_out(&session)
}

pub async fn get_leaderboard(state: &AppState) -> Vec<LeaderboardEntry> {
  state.catalog.leaderboard.clone()
}

/// Submit free-form code for the active code mission. Empty submissions are
/// rejected locally, before any network call.
#[instrument(level = "info", skip(state, code), fields(code_len = code.len()))]
pub async fn do_submit_code(state: &Arc<AppState>, code: &str) -> Result<EvaluationOut, SessionError> {
  let (mission, track, seq) = {
    let mut session = state.session.write().await;
    let mission = session.active_mission()?;
    if mission.kind != MissionKind::Code {
      return Err(SessionError::WrongMissionKind);
    }
    if code.trim().is_empty() {
      return Err(SessionError::EmptySubmission);
    }
    let track = mission_track(&session)?;
    let seq = session.begin_evaluation()?;
    (mission, track, seq)
  };

  debug!(target: "mission", id = %mission.id, code = %trunc_for_log(code, 200), "Evaluating code submission");
  let verdict = match &state.ai {
    Some(gw) => gw.evaluate_code(&state.prompts, track, &mission.task, code).await,
    None => fallback_verdict(),
  };

  finish_evaluation(state, seq, verdict).await
}

/// Submit a quiz pick for the active quiz mission. The gateway judges the
/// picked option's text against the correct option's text.
#[instrument(level = "info", skip(state))]
pub async fn do_submit_quiz_choice(
  state: &Arc<AppState>,
  option: usize,
) -> Result<EvaluationOut, SessionError> {
  let (mission, seq, picked) = {
    let mut session = state.session.write().await;
    let mission = session.active_mission()?;
    if mission.kind != MissionKind::Quiz {
      return Err(SessionError::WrongMissionKind);
    }
    let options = mission.options.clone().unwrap_or_default();
    let picked = options.get(option).cloned().ok_or(SessionError::OptionOutOfRange)?;
    let seq = session.begin_evaluation()?;
    (mission, seq, picked)
  };

  let verdict = match &state.ai {
    Some(gw) => {
      let options = mission.options.clone().unwrap_or_default();
      gw.evaluate_quiz(
        &state.prompts,
        &mission.task,
        &options,
        mission.correct_option.unwrap_or(0),
        &picked,
      )
      .await
    }
    None => fallback_verdict(),
  };

  finish_evaluation(state, seq, verdict).await
}

fn mission_track(session: &crate::session::Session) -> Result<Language, SessionError> {
  session.selected_track.ok_or(SessionError::NoTrackSelected)
}

/// Apply a gateway verdict to the session. A reply whose generation no
/// longer matches is returned unapplied; a correct, current verdict records
/// the completion and, on the track's last mission, schedules the result
/// redirect.
pub(crate) async fn finish_evaluation(
  state: &Arc<AppState>,
  seq: u64,
  verdict: AiVerdict,
) -> Result<EvaluationOut, SessionError> {
  let mut session = state.session.write().await;

  if !session.end_evaluation(seq) {
    info!(target: "mission", seq, "Late evaluation reply for an inactive screen; ignored");
    return Ok(EvaluationOut {
      verdict,
      applied: false,
      outcome: None,
      celebration: None,
      redirect_in_ms: None,
    });
  }

  if !verdict.is_correct {
    return Ok(EvaluationOut {
      verdict,
      applied: true,
      outcome: None,
      celebration: None,
      redirect_in_ms: None,
    });
  }

  let outcome = session.complete_active_mission()?;
  let view = CompletionView::from_outcome(&outcome, &session.profile);

  let redirect_in_ms = if outcome.track_finished {
    let st = Arc::clone(state);
    tokio::spawn(async move {
      sleep(Duration::from_millis(RESULT_REDIRECT_MS)).await;
      let mut session = st.session.write().await;
      if session.redirect_to_result(seq) {
        info!(target: "mission", "Track finished; moved to the result screen");
      }
    });
    Some(RESULT_REDIRECT_MS)
  } else {
    None
  };

  Ok(EvaluationOut {
    verdict,
    applied: true,
    outcome: Some(view),
    celebration: Some(ParticleBurst::seeded(MISSION_BURST)),
    redirect_in_ms,
  })
}

#[instrument(level = "info", skip(state))]
pub async fn do_practice_pick_language(
  state: &AppState,
  language: Language,
) -> Result<StateOut, SessionError> {
  let mut session = state.session.write().await;
  session.practice_pick_language(language)?;
  Ok(state_out(&session))
}

#[instrument(level = "info", skip(state))]
pub async fn do_practice_pick_level(state: &AppState, level: u8) -> Result<StateOut, SessionError> {
  let mut session = state.session.write().await;
  let language = session
    .practice
    .language
    .ok_or(SessionError::Practice(PracticeError::WrongPhase))?;
  let pool = state
    .catalog
    .practice
    .get(&(language, level))
    .cloned()
    .unwrap_or_default();
  let questions = draw_questions(&pool);
  session.practice_pick_level(level, questions)?;
  info!(target: "practice", %language, level, "Practice run started");
  Ok(state_out(&session))
}

/// Answer the current practice question; the reveal delay is applied
/// server-side before the run advances.
#[instrument(level = "info", skip(state))]
pub async fn do_practice_answer(
  state: &Arc<AppState>,
  option: usize,
) -> Result<PracticeAnswer, SessionError> {
  let (answer, generation) = {
    let mut session = state.session.write().await;
    let answer = session.practice_answer(option)?;
    (answer, session.practice.generation)
  };

  let st = Arc::clone(state);
  let delay = answer.advance_in_ms;
  tokio::spawn(async move {
    sleep(Duration::from_millis(delay)).await;
    advance_practice(&st, generation).await;
  });

  Ok(answer)
}

/// Scheduled advance past a locked question. Finishing the run flips the
/// screen to the practice result and kicks off the one-shot commentary call.
pub(crate) async fn advance_practice(state: &Arc<AppState>, generation: u64) {
  let finished = {
    let mut session = state.session.write().await;
    match session.practice_advance(generation) {
      Some(true) => {
        session.practice.evaluating = true;
        Some((session.practice.language, session.practice.level, session.practice.score))
      }
      Some(false) => None,
      None => {
        debug!(target: "practice", generation, "Stale practice advance ignored");
        None
      }
    }
  };

  let Some((Some(language), Some(level), score)) = finished else { return };
  info!(target: "practice", %language, level, score, "Practice run finished; requesting commentary");

  let commentary = match &state.ai {
    Some(gw) => gw.practice_summary(&state.prompts, language, level, score).await,
    None => {
      error!(target: "practice", "AI gateway unavailable; using canned commentary");
      fallback_commentary(score).to_string()
    }
  };

  let mut session = state.session.write().await;
  if session.practice.generation == generation && session.practice.phase == PracticePhase::Result {
    session.practice.commentary = Some(commentary);
    session.practice.evaluating = false;
  } else {
    debug!(target: "practice", generation, "Commentary arrived for an abandoned run; ignored");
  }
}

#[instrument(level = "info", skip(state))]
pub async fn do_practice_back(state: &AppState) -> Result<StateOut, SessionError> {
  let mut session = state.session.write().await;
  session.practice_back()?;
  Ok(state_out(&session))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{mission_catalog, practice_bank};
  use crate::state::{AppState, Catalog};
  use tokio::sync::RwLock;

  fn test_state() -> Arc<AppState> {
    Arc::new(AppState {
      session: RwLock::new(crate::session::Session::new(mission_catalog())),
      catalog: Catalog {
        missions: mission_catalog(),
        practice: practice_bank(),
        leaderboard: crate::catalog::leaderboard_seed(),
      },
      prompts: crate::config::Prompts::default(),
      ai: None,
    })
  }

  async fn login_and_pick(state: &Arc<AppState>, language: Language) {
    do_login(state, "An", "6A1").await.expect("login");
    do_select_track(state, language).await.expect("track");
  }

  #[tokio::test]
  async fn empty_code_is_rejected_before_any_gateway_work() {
    let state = test_state();
    login_and_pick(&state, Language::Python).await;
    // py_m6 starts locked; unlock the ladder directly for the test.
    {
      let mut session = state.session.write().await;
      session
        .missions
        .get_mut(&Language::Python)
        .expect("track")
        .iter_mut()
        .for_each(|m| m.unlocked = true);
      session.start_mission("py_m6").expect("start");
    }

    let err = do_submit_code(&state, "   \n").await.expect_err("must reject");
    assert!(matches!(err, SessionError::EmptySubmission));
    let session = state.session.read().await;
    assert!(!session.evaluating, "busy flag untouched by local rejection");
    assert!(session.profile.completed_missions.is_empty());
  }

  #[tokio::test]
  async fn without_a_gateway_submissions_resolve_to_the_fallback_verdict() {
    let state = test_state();
    login_and_pick(&state, Language::Python).await;
    {
      let mut session = state.session.write().await;
      session.start_mission("py_m1").expect("start");
    }

    let out = do_submit_quiz_choice(&state, 0).await.expect("evaluation");
    assert!(out.applied);
    assert!(!out.verdict.is_correct);
    assert_eq!(out.verdict.feedback, "Hệ thống AI đang bận, bạn vui lòng thử lại sau.");
    assert!(out.outcome.is_none());

    let session = state.session.read().await;
    assert!(!session.evaluating);
    assert_eq!(session.screen, Screen::Mission);
  }

  #[tokio::test]
  async fn quiz_picks_outside_the_option_list_are_rejected() {
    let state = test_state();
    login_and_pick(&state, Language::Html).await;
    {
      let mut session = state.session.write().await;
      session.start_mission("ht_m1").expect("start");
    }
    let err = do_submit_quiz_choice(&state, 9).await.expect_err("must reject");
    assert!(matches!(err, SessionError::OptionOutOfRange));
  }

  #[tokio::test(start_paused = true)]
  async fn a_correct_last_mission_verdict_schedules_the_result_redirect() {
    let state = test_state();
    login_and_pick(&state, Language::Python).await;
    let seq = {
      let mut session = state.session.write().await;
      session
        .missions
        .get_mut(&Language::Python)
        .expect("track")
        .iter_mut()
        .for_each(|m| m.unlocked = true);
      session.start_mission("py_m10").expect("start");
      session.begin_evaluation().expect("begin")
    };

    let verdict = AiVerdict {
      is_correct: true,
      feedback: "Tuyệt vời!".into(),
      hint: String::new(),
      suggestions: None,
    };
    let out = finish_evaluation(&state, seq, verdict).await.expect("finish");
    assert!(out.applied);
    assert_eq!(out.redirect_in_ms, Some(RESULT_REDIRECT_MS));
    let outcome = out.outcome.expect("outcome");
    assert!(outcome.track_finished);
    assert!(out.celebration.is_some());

    {
      let session = state.session.read().await;
      assert_eq!(session.screen, Screen::Mission, "redirect has not fired yet");
    }

    sleep(Duration::from_millis(RESULT_REDIRECT_MS + 100)).await;
    let session = state.session.read().await;
    assert_eq!(session.screen, Screen::Result);
  }

  #[tokio::test]
  async fn finishing_a_practice_run_without_a_gateway_uses_canned_commentary() {
    let state = test_state();
    do_login(&state, "An", "6A1").await.expect("login");
    do_navigate(&state, Screen::QuizPracticeSelect).await.expect("open");
    do_practice_pick_language(&state, Language::Python).await.expect("language");
    do_practice_pick_level(&state, 1).await.expect("level");

    let generation = state.session.read().await.practice.generation;
    for _ in 0..crate::practice::SESSION_LEN {
      {
        let mut session = state.session.write().await;
        let correct = session.practice.questions[session.practice.current].correct_option;
        session.practice_answer(correct).expect("answer");
      }
      advance_practice(&state, generation).await;
    }

    let session = state.session.read().await;
    assert_eq!(session.screen, Screen::QuizPracticeResult);
    assert_eq!(session.practice.score, 100);
    assert!(!session.practice.evaluating);
    assert_eq!(
      session.practice.commentary.as_deref(),
      Some("Chúc mừng bạn đã hoàn thành xuất sắc bài luyện tập trắc nghiệm!")
    );
  }
}
