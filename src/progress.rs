//! Progression state machine: XP, level, badges, and the per-track mission
//! unlock ladder.
//!
//! Everything here is pure and synchronous so the rules can be tested without
//! a running server. `record_completion` is the single mutating operation;
//! the session layer decides when to call it and how to route afterwards.

use serde::Serialize;
use tracing::{info, instrument};

use crate::catalog::{first_step_badge, gold_rank_badge, silver_rank_badge};
use crate::domain::{Badge, Mission, UserProfile};

/// XP needed per level. Level is derived, never stored on its own.
pub const XP_PER_LEVEL: u32 = 1000;

/// Result-screen rank thresholds.
pub const GOLD_XP_THRESHOLD: u32 = 5000;
pub const SILVER_XP_THRESHOLD: u32 = 3000;

pub fn level_for_xp(xp: u32) -> u32 {
  xp / XP_PER_LEVEL + 1
}

/// How the journey ended, as presented on the result screen.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStatus {
  Won,
  Passed,
  Failed,
}

/// Rank the finished journey: 5000+ XP earns gold, 3000+ silver, anything
/// below gets no badge.
pub fn journey_rank(xp: u32) -> (JourneyStatus, Option<Badge>) {
  if xp >= GOLD_XP_THRESHOLD {
    (JourneyStatus::Won, Some(gold_rank_badge()))
  } else if xp >= SILVER_XP_THRESHOLD {
    (JourneyStatus::Passed, Some(silver_rank_badge()))
  } else {
    (JourneyStatus::Failed, None)
  }
}

/// What a single completion did to the profile and the ladder.
#[derive(Clone, Debug, Default)]
pub struct CompletionOutcome {
  pub xp_awarded: u32,
  pub leveled_up: bool,
  pub badge_awarded: bool,
  pub track_finished: bool,
  pub already_completed: bool,
}

/// Record a mission completion against the profile and its track's ladder.
///
/// A mission id already present in the completed set is a full no-op
/// (`already_completed` set, zero xp). Otherwise: award xp, recompute the
/// level, set-insert the id, grant `first_step` on the first-ever completion,
/// mark the mission completed, and unlock the next one in order. The last
/// mission of the track sets `track_finished` instead of unlocking anything.
#[instrument(level = "info", skip(profile, missions), fields(%mission_id, xp_reward))]
pub fn record_completion(
  profile: &mut UserProfile,
  missions: &mut [Mission],
  mission_id: &str,
  xp_reward: u32,
) -> CompletionOutcome {
  if profile.completed_missions.iter().any(|id| id == mission_id) {
    info!(target: "mission", %mission_id, "Completion replayed for an already-completed mission; ignoring");
    return CompletionOutcome { already_completed: true, ..Default::default() };
  }

  let mut out = CompletionOutcome { xp_awarded: xp_reward, ..Default::default() };

  let old_level = profile.level;
  profile.xp += xp_reward;
  profile.level = level_for_xp(profile.xp);
  out.leveled_up = profile.level > old_level;

  profile.completed_missions.push(mission_id.to_string());

  if profile.completed_missions.len() == 1 {
    let badge = first_step_badge();
    if !profile.badges.iter().any(|b| b.id == badge.id) {
      profile.badges.push(badge);
      out.badge_awarded = true;
    }
  }

  if let Some(idx) = missions.iter().position(|m| m.id == mission_id) {
    missions[idx].completed = true;
    if idx + 1 == missions.len() {
      out.track_finished = true;
    } else {
      missions[idx + 1].unlocked = true;
    }
  }

  info!(
    target: "mission",
    %mission_id,
    xp = profile.xp,
    level = profile.level,
    leveled_up = out.leveled_up,
    track_finished = out.track_finished,
    "Mission completion recorded"
  );

  out
}

/// Restore a fresh profile: xp 0, level 1, no badges, no completed missions.
/// Name and class survive; restarting is not a logout.
pub fn reset_profile(profile: &mut UserProfile) {
  profile.xp = 0;
  profile.level = 1;
  profile.badges.clear();
  profile.completed_missions.clear();
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::mission_catalog;
  use crate::domain::Language;

  fn track() -> Vec<Mission> {
    mission_catalog().remove(&Language::Python).expect("python track")
  }

  #[test]
  fn level_is_floor_of_xp_over_thousand_plus_one() {
    assert_eq!(level_for_xp(0), 1);
    assert_eq!(level_for_xp(999), 1);
    assert_eq!(level_for_xp(1000), 2);
    assert_eq!(level_for_xp(2999), 3);
    assert_eq!(level_for_xp(5400), 6);
  }

  #[test]
  fn completing_a_middle_mission_unlocks_only_the_next_one() {
    let mut profile = UserProfile::fresh();
    let mut missions = track();
    let id = missions[0].id.clone();

    let out = record_completion(&mut profile, &mut missions, &id, 300);
    assert!(!out.track_finished);
    assert_eq!(out.xp_awarded, 300);
    assert!(missions[0].completed);
    assert!(missions[1].unlocked);
    for m in &missions[2..] {
      assert!(!m.unlocked, "{} should still be locked", m.id);
      assert!(!m.completed);
    }
  }

  #[test]
  fn completing_the_last_mission_signals_track_finished() {
    let mut profile = UserProfile::fresh();
    let mut missions = track();
    for m in missions.iter_mut() {
      m.unlocked = true;
    }
    let last = missions.last().expect("missions").id.clone();

    let out = record_completion(&mut profile, &mut missions, &last, 850);
    assert!(out.track_finished);
    assert!(missions.last().expect("missions").completed);
  }

  #[test]
  fn first_step_badge_is_awarded_exactly_once() {
    let mut profile = UserProfile::fresh();
    let mut missions = track();
    let first = missions[0].id.clone();
    let second = missions[1].id.clone();

    let out = record_completion(&mut profile, &mut missions, &first, 300);
    assert!(out.badge_awarded);
    assert_eq!(profile.badges.len(), 1);
    assert_eq!(profile.badges[0].id, "first_step");

    let out = record_completion(&mut profile, &mut missions, &second, 350);
    assert!(!out.badge_awarded);
    assert_eq!(profile.badges.len(), 1);
  }

  // Pins the duplicate-completion decision: replaying a completed id must
  // not double-award xp or touch the ladder.
  #[test]
  fn replaying_a_completed_mission_awards_nothing() {
    let mut profile = UserProfile::fresh();
    let mut missions = track();
    let id = missions[0].id.clone();

    record_completion(&mut profile, &mut missions, &id, 300);
    let xp_before = profile.xp;
    let out = record_completion(&mut profile, &mut missions, &id, 300);

    assert!(out.already_completed);
    assert_eq!(out.xp_awarded, 0);
    assert_eq!(profile.xp, xp_before);
    assert_eq!(profile.completed_missions.len(), 1);
  }

  #[test]
  fn level_up_is_flagged_when_crossing_a_threshold() {
    let mut profile = UserProfile::fresh();
    let mut missions = track();
    profile.xp = 900;
    profile.level = level_for_xp(profile.xp);
    let id = missions[0].id.clone();

    let out = record_completion(&mut profile, &mut missions, &id, 300);
    assert!(out.leveled_up);
    assert_eq!(profile.level, 2);
  }

  #[test]
  fn journey_rank_follows_the_xp_thresholds() {
    let (status, badge) = journey_rank(5000);
    assert_eq!(status, JourneyStatus::Won);
    assert_eq!(badge.expect("gold badge").id, "rank_gold");

    let (status, badge) = journey_rank(4999);
    assert_eq!(status, JourneyStatus::Passed);
    assert_eq!(badge.expect("silver badge").id, "rank_silver");

    let (status, badge) = journey_rank(3000);
    assert_eq!(status, JourneyStatus::Passed);
    assert!(badge.is_some());

    let (status, badge) = journey_rank(2999);
    assert_eq!(status, JourneyStatus::Failed);
    assert!(badge.is_none());
  }

  #[test]
  fn reset_restores_a_pristine_profile() {
    let mut profile = UserProfile::fresh();
    let mut missions = track();
    let id = missions[0].id.clone();
    record_completion(&mut profile, &mut missions, &id, 300);

    reset_profile(&mut profile);
    assert_eq!(profile.xp, 0);
    assert_eq!(profile.level, 1);
    assert!(profile.badges.is_empty());
    assert!(profile.completed_missions.is_empty());
  }
}
