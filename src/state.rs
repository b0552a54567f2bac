//! Application state: the content catalog, prompts, AI gateway, and the one
//! in-memory session.
//!
//! This module owns:
//!   - the pristine mission ladders (used for session start and restart)
//!   - the practice question pools and leaderboard showcase rows
//!   - the prompts struct (from TOML or defaults)
//!   - the optional AI gateway
//!
//! Config-bank entries can replace a track's ladder or extend practice
//! pools; invalid entries are skipped with an error log, never a crash.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::catalog::{leaderboard_seed, mission_catalog, practice_bank};
use crate::config::{load_agent_config_from_env, MissionCfg, Prompts};
use crate::domain::{Language, LeaderboardEntry, Mission, MissionKind, PracticeQuestion};
use crate::gateway::AiGateway;
use crate::session::Session;

/// Immutable content shared by every operation.
pub struct Catalog {
    pub missions: HashMap<Language, Vec<Mission>>,
    pub practice: HashMap<(Language, u8), Vec<PracticeQuestion>>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

pub struct AppState {
    pub session: RwLock<Session>,
    pub catalog: Catalog,
    pub prompts: Prompts,
    pub ai: Option<AiGateway>,
}

impl AppState {
    /// Build state from env: load config, assemble the catalog, init the
    /// gateway, seed the session.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg_opt = load_agent_config_from_env();
        let prompts = cfg_opt
            .as_ref()
            .map(|c| c.prompts.clone())
            .unwrap_or_default();

        // Mission ladders: built-in per track, replaced wholesale when the
        // config supplies entries for that track.
        let mut missions = mission_catalog();
        if let Some(cfg) = &cfg_opt {
            let mut by_track: HashMap<Language, Vec<&MissionCfg>> = HashMap::new();
            for mc in &cfg.missions {
                by_track.entry(mc.track).or_default().push(mc);
            }
            for (track, entries) in by_track {
                let ladder = ladder_from_cfg(track, &entries);
                if ladder.is_empty() {
                    error!(target: "mission", %track, "Config ladder had no valid entries; keeping built-in missions");
                } else {
                    info!(target: "mission", %track, count = ladder.len(), "Mission ladder replaced from config");
                    missions.insert(track, ladder);
                }
            }
        }

        // Practice pools: built-in plus config extras.
        let mut practice = practice_bank();
        if let Some(cfg) = &cfg_opt {
            for qc in &cfg.practice_questions {
                if !(1..=5).contains(&qc.level) || qc.correct_option >= qc.options.len() {
                    let id = qc.id.clone().unwrap_or_default();
                    error!(target: "practice", %id, level = qc.level, "Skipping bank item: bad level or option index");
                    continue;
                }
                let question = PracticeQuestion {
                    id: qc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string()),
                    question: qc.question.clone(),
                    options: qc.options.clone(),
                    correct_option: qc.correct_option,
                };
                practice.entry((qc.track, qc.level)).or_default().push(question);
            }
        }

        // Startup inventory by track and pool.
        for (track, ladder) in &missions {
            let quizzes = ladder.iter().filter(|m| m.kind == MissionKind::Quiz).count();
            info!(target: "mission", %track, total = ladder.len(), quizzes, code = ladder.len() - quizzes, "Startup mission inventory");
        }
        for (&(track, level), pool) in &practice {
            info!(target: "practice", %track, level, pool = pool.len(), "Startup practice pool");
        }

        let ai = AiGateway::from_env();
        if let Some(gw) = &ai {
            info!(target: "nexuscoder_backend", base_url = %gw.base_url, fast_model = %gw.fast_model, strong_model = %gw.strong_model, "AI gateway enabled.");
        } else {
            info!(target: "nexuscoder_backend", "AI gateway disabled (no OPENAI_API_KEY). Every evaluation resolves to the canned fallback.");
        }

        let session = Session::new(missions.clone());

        Self {
            session: RwLock::new(session),
            catalog: Catalog { missions, practice, leaderboard: leaderboard_seed() },
            prompts,
            ai,
        }
    }
}

/// Build a ladder from config entries, in file order. Entries that cannot
/// form a valid mission are skipped; orders are assigned by position.
fn ladder_from_cfg(track: Language, entries: &[&MissionCfg]) -> Vec<Mission> {
    let mut ladder = Vec::new();
    for mc in entries {
        let id = mc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
        let kind = mc.kind.unwrap_or(match &mc.options {
            Some(_) => MissionKind::Quiz,
            None => MissionKind::Code,
        });
        if kind == MissionKind::Quiz {
            let valid = matches!((&mc.options, mc.correct_option),
                (Some(opts), Some(correct)) if correct < opts.len() && !opts.is_empty());
            if !valid {
                error!(target: "mission", %id, %track, "Skipping bank item: quiz without valid options/correct_option");
                continue;
            }
        }
        let order = ladder.len() as u32 + 1;
        ladder.push(Mission {
            id,
            title: mc.title.clone(),
            description: mc.description.clone(),
            task: mc.task.clone(),
            kind,
            difficulty: mc.difficulty,
            xp_reward: mc.xp_reward,
            unlocked: order == 1,
            completed: false,
            order,
            options: if kind == MissionKind::Quiz { mc.options.clone() } else { None },
            correct_option: if kind == MissionKind::Quiz { mc.correct_option } else { None },
        });
    }
    ladder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;

    fn cfg(track: Language, title: &str, options: Option<Vec<String>>, correct: Option<usize>) -> MissionCfg {
        MissionCfg {
            id: None,
            track,
            title: title.into(),
            description: String::new(),
            task: "task".into(),
            kind: None,
            difficulty: Difficulty::Easy,
            xp_reward: 100,
            options,
            correct_option: correct,
        }
    }

    #[test]
    fn config_ladders_get_contiguous_orders_and_inferred_kinds() {
        let a = cfg(Language::Python, "quiz", Some(vec!["x".into(), "y".into()]), Some(1));
        let b = cfg(Language::Python, "code", None, None);
        let ladder = ladder_from_cfg(Language::Python, &[&a, &b]);

        assert_eq!(ladder.len(), 2);
        assert_eq!(ladder[0].kind, MissionKind::Quiz);
        assert_eq!(ladder[1].kind, MissionKind::Code);
        assert_eq!(ladder[0].order, 1);
        assert_eq!(ladder[1].order, 2);
        assert!(ladder[0].unlocked && !ladder[1].unlocked);
    }

    #[test]
    fn invalid_quiz_entries_are_skipped() {
        let bad = cfg(Language::Html, "quiz", Some(vec!["only".into()]), Some(5));
        let good = cfg(Language::Html, "code", None, None);
        let ladder = ladder_from_cfg(Language::Html, &[&bad, &good]);

        assert_eq!(ladder.len(), 1);
        assert_eq!(ladder[0].title, "code");
        assert_eq!(ladder[0].order, 1);
    }
}
