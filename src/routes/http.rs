//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; domain errors map to 4xx JSON bodies.

use std::sync::Arc;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::logic::*;
use crate::protocol::*;
use crate::session::SessionError;
use crate::state::AppState;

impl IntoResponse for SessionError {
  fn into_response(self) -> axum::response::Response {
    let status = match &self {
      SessionError::UnknownMission(_) => StatusCode::NOT_FOUND,
      SessionError::EvaluationInFlight => StatusCode::CONFLICT,
      _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorOut { message: self.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(get_state(&state).await)
}

#[instrument(level = "info", skip(state, body), fields(name_len = body.name.len()))]
pub async fn http_post_login(
  State(state): State<Arc<AppState>>,
  Json(body): Json<LoginIn>,
) -> Result<Json<StateOut>, SessionError> {
  Ok(Json(do_login(&state, &body.name, &body.class_name).await?))
}

#[instrument(level = "info", skip(state, body), fields(screen = ?body.screen))]
pub async fn http_post_navigate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NavigateIn>,
) -> Result<Json<StateOut>, SessionError> {
  Ok(Json(do_navigate(&state, body.screen).await?))
}

#[instrument(level = "info", skip(state, body), fields(language = %body.language))]
pub async fn http_post_track(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TrackIn>,
) -> Result<Json<StateOut>, SessionError> {
  Ok(Json(do_select_track(&state, body.language).await?))
}

#[instrument(level = "info", skip(state, body), fields(%body.mission_id))]
pub async fn http_post_mission_start(
  State(state): State<Arc<AppState>>,
  Json(body): Json<StartMissionIn>,
) -> Result<Json<StateOut>, SessionError> {
  Ok(Json(do_start_mission(&state, &body.mission_id).await?))
}

#[instrument(level = "info", skip(state, body), fields(code_len = body.code.len()))]
pub async fn http_post_mission_code(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SubmitCodeIn>,
) -> Result<Json<EvaluationOut>, SessionError> {
  let evaluation = do_submit_code(&state, &body.code).await?;
  info!(target: "mission", applied = evaluation.applied, correct = evaluation.verdict.is_correct, "HTTP code submission evaluated");
  Ok(Json(evaluation))
}

#[instrument(level = "info", skip(state, body), fields(option = body.option))]
pub async fn http_post_mission_choice(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SubmitChoiceIn>,
) -> Result<Json<EvaluationOut>, SessionError> {
  let evaluation = do_submit_quiz_choice(&state, body.option).await?;
  info!(target: "mission", applied = evaluation.applied, correct = evaluation.verdict.is_correct, "HTTP quiz pick evaluated");
  Ok(Json(evaluation))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_restart(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(do_restart(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_leaderboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(LeaderboardOut { players: get_leaderboard(&state).await })
}

#[instrument(level = "info", skip(state, body), fields(language = %body.language))]
pub async fn http_post_practice_language(
  State(state): State<Arc<AppState>>,
  Json(body): Json<PracticeLanguageIn>,
) -> Result<Json<StateOut>, SessionError> {
  Ok(Json(do_practice_pick_language(&state, body.language).await?))
}

#[instrument(level = "info", skip(state, body), fields(level = body.level))]
pub async fn http_post_practice_level(
  State(state): State<Arc<AppState>>,
  Json(body): Json<PracticeLevelIn>,
) -> Result<Json<StateOut>, SessionError> {
  Ok(Json(do_practice_pick_level(&state, body.level).await?))
}

#[instrument(level = "info", skip(state, body), fields(option = body.option))]
pub async fn http_post_practice_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<PracticeAnswerIn>,
) -> Result<Json<crate::practice::PracticeAnswer>, SessionError> {
  Ok(Json(do_practice_answer(&state, body.option).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_practice_back(
  State(state): State<Arc<AppState>>,
) -> Result<Json<StateOut>, SessionError> {
  Ok(Json(do_practice_back(&state).await?))
}
