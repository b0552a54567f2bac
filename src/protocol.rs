//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{AiVerdict, Badge, Language, LeaderboardEntry, Mission, Screen, UserProfile};
use crate::catalog::first_step_badge;
use crate::particles::{ParticleBurst, PRACTICE_BURST};
use crate::practice::{PracticeAnswer, PracticePhase, ScoreTier};
use crate::progress::{journey_rank, CompletionOutcome, JourneyStatus};
use crate::session::Session;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    GetState,
    Login {
        name: String,
        #[serde(rename = "className")]
        class_name: String,
    },
    Navigate {
        screen: Screen,
    },
    SelectTrack {
        language: Language,
    },
    StartMission {
        #[serde(rename = "missionId")]
        mission_id: String,
    },
    SubmitCode {
        code: String,
    },
    SubmitQuizChoice {
        option: usize,
    },
    Restart,
    Leaderboard,
    PracticePickLanguage {
        language: Language,
    },
    PracticePickLevel {
        level: u8,
    },
    PracticeAnswer {
        option: usize,
    },
    PracticeBack,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    State {
        state: StateOut,
    },
    Evaluation {
        evaluation: EvaluationOut,
    },
    PracticeAnswerResult {
        result: PracticeAnswer,
    },
    Leaderboard {
        players: Vec<LeaderboardEntry>,
    },
    Error {
        message: String,
    },
}

/// Full session snapshot. Clients poll this after timed transitions (the
/// result redirect, practice auto-advance) rather than holding local truth.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateOut {
    pub screen: Screen,
    pub profile: UserProfile,
    pub selected_track: Option<Language>,
    pub missions: Vec<Mission>,
    pub active_mission: Option<Mission>,
    pub evaluating: bool,
    pub practice: PracticeOut,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JourneyResultOut>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeOut {
    pub phase: PracticePhase,
    pub language: Option<Language>,
    pub level: Option<u8>,
    pub question_index: usize,
    pub question_count: usize,
    pub question: Option<crate::domain::PracticeQuestion>,
    pub score: u32,
    pub locked: bool,
    pub evaluating: bool,
    pub tier: ScoreTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebration: Option<ParticleBurst>,
}

/// Rank block shown on the result screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyResultOut {
    pub status: JourneyStatus,
    pub badge: Option<Badge>,
    pub xp: u32,
    pub level: u32,
}

/// Reply to a mission submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOut {
    pub verdict: AiVerdict,
    /// False when the reply arrived for a screen that is no longer active;
    /// such verdicts were not applied to the session.
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CompletionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebration: Option<ParticleBurst>,
    /// Set when the track's last mission was just completed: the server
    /// flips to the result screen after this many milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_in_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionView {
    pub xp_awarded: u32,
    pub leveled_up: bool,
    pub badge_awarded: Option<Badge>,
    pub track_finished: bool,
    pub xp: u32,
    pub level: u32,
}

impl CompletionView {
    pub fn from_outcome(outcome: &CompletionOutcome, profile: &UserProfile) -> Self {
        Self {
            xp_awarded: outcome.xp_awarded,
            leveled_up: outcome.leveled_up,
            badge_awarded: outcome.badge_awarded.then(first_step_badge),
            track_finished: outcome.track_finished,
            xp: profile.xp,
            level: profile.level,
        }
    }
}

/// Convert the live session into the public snapshot.
pub fn state_out(session: &Session) -> StateOut {
    let missions = session
        .track_missions()
        .map(<[Mission]>::to_vec)
        .unwrap_or_default();
    let active_mission = session.active_mission().ok();

    let result = (session.screen == Screen::Result).then(|| {
        let (status, badge) = journey_rank(session.profile.xp);
        JourneyResultOut {
            status,
            badge,
            xp: session.profile.xp,
            level: session.profile.level,
        }
    });

    StateOut {
        screen: session.screen,
        profile: session.profile.clone(),
        selected_track: session.selected_track,
        missions,
        active_mission,
        evaluating: session.evaluating,
        practice: practice_out(session),
        result,
    }
}

fn practice_out(session: &Session) -> PracticeOut {
    let p = &session.practice;
    let question = (p.phase == PracticePhase::Play).then(|| p.questions[p.current].clone());
    let celebration = (p.phase == PracticePhase::Result && p.tier() == ScoreTier::High)
        .then(|| ParticleBurst::seeded(PRACTICE_BURST));

    PracticeOut {
        phase: p.phase,
        language: p.language,
        level: p.level,
        question_index: p.current,
        question_count: p.questions.len(),
        question,
        score: p.score,
        locked: p.locked,
        evaluating: p.evaluating,
        tier: p.tier(),
        commentary: p.commentary.clone(),
        celebration,
    }
}

//
// HTTP request/response DTOs
//

#[derive(Deserialize)]
pub struct LoginIn {
    pub name: String,
    #[serde(rename = "className")]
    pub class_name: String,
}

#[derive(Deserialize)]
pub struct NavigateIn {
    pub screen: Screen,
}

#[derive(Deserialize)]
pub struct TrackIn {
    pub language: Language,
}

#[derive(Deserialize)]
pub struct StartMissionIn {
    #[serde(rename = "missionId")]
    pub mission_id: String,
}

#[derive(Deserialize)]
pub struct SubmitCodeIn {
    pub code: String,
}

#[derive(Deserialize)]
pub struct SubmitChoiceIn {
    pub option: usize,
}

#[derive(Deserialize)]
pub struct PracticeLanguageIn {
    pub language: Language,
}

#[derive(Deserialize)]
pub struct PracticeLevelIn {
    pub level: u8,
}

#[derive(Deserialize)]
pub struct PracticeAnswerIn {
    pub option: usize,
}

#[derive(Serialize)]
pub struct LeaderboardOut {
    pub players: Vec<LeaderboardEntry>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}
