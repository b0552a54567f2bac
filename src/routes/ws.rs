//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "nexuscoder_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "nexuscoder_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "nexuscoder_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "nexuscoder_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "nexuscoder_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(msg, state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &Arc<AppState>) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::GetState => ServerWsMessage::State { state: get_state(state).await },

    ClientWsMessage::Login { name, class_name } => {
      match do_login(state, &name, &class_name).await {
        Ok(out) => ServerWsMessage::State { state: out },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::Navigate { screen } => match do_navigate(state, screen).await {
      Ok(out) => ServerWsMessage::State { state: out },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::SelectTrack { language } => match do_select_track(state, language).await {
      Ok(out) => ServerWsMessage::State { state: out },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::StartMission { mission_id } => {
      match do_start_mission(state, &mission_id).await {
        Ok(out) => ServerWsMessage::State { state: out },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::SubmitCode { code } => match do_submit_code(state, &code).await {
      Ok(evaluation) => {
        tracing::info!(target: "mission", applied = evaluation.applied, correct = evaluation.verdict.is_correct, "WS code submission evaluated");
        ServerWsMessage::Evaluation { evaluation }
      }
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::SubmitQuizChoice { option } => {
      match do_submit_quiz_choice(state, option).await {
        Ok(evaluation) => {
          tracing::info!(target: "mission", applied = evaluation.applied, correct = evaluation.verdict.is_correct, "WS quiz pick evaluated");
          ServerWsMessage::Evaluation { evaluation }
        }
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::Restart => ServerWsMessage::State { state: do_restart(state).await },

    ClientWsMessage::Leaderboard => ServerWsMessage::Leaderboard {
      players: get_leaderboard(state).await,
    },

    ClientWsMessage::PracticePickLanguage { language } => {
      match do_practice_pick_language(state, language).await {
        Ok(out) => ServerWsMessage::State { state: out },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::PracticePickLevel { level } => {
      match do_practice_pick_level(state, level).await {
        Ok(out) => ServerWsMessage::State { state: out },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::PracticeAnswer { option } => match do_practice_answer(state, option).await {
      Ok(result) => ServerWsMessage::PracticeAnswerResult { result },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::PracticeBack => match do_practice_back(state).await {
      Ok(out) => ServerWsMessage::State { state: out },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },
  }
}
