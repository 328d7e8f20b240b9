//! HUD collaborator
//!
//! The simulation never touches the HUD directly. The host drains
//! `GameEvent`s after stepping and hands them to `apply_events`.

use crate::sim::{GameEvent, SimState};

pub const MADE_MESSAGE: &str = "SHOT MADE!";
pub const MISSED_MESSAGE: &str = "MISSED SHOT";

/// Anything that can display the score, power and shooting stats
pub trait Hud {
    fn set_score(&mut self, home: u32, away: u32);
    fn set_power(&mut self, percent: u8);
    fn set_statistics(&mut self, attempts: u32, made: u32, percentage: f32);
    fn show_feedback(&mut self, message: &str, success: bool);
}

/// Push every value once, e.g. after (re)creating the HUD
pub fn refresh(hud: &mut impl Hud, state: &SimState) {
    hud.set_score(state.score.home, state.score.away);
    hud.set_power(state.power.percent());
    push_statistics(hud, state);
}

fn push_statistics(hud: &mut impl Hud, state: &SimState) {
    hud.set_statistics(
        state.stats.attempts,
        state.stats.made,
        state.stats.percentage(),
    );
}

/// Map drained events onto HUD updates
///
/// Values come from `state` as it stands after the step, so several events
/// of the same kind in one frame show the final numbers.
pub fn apply_events(hud: &mut impl Hud, events: &[GameEvent], state: &SimState) {
    for event in events {
        match event {
            GameEvent::ShotTaken { .. } => push_statistics(hud, state),
            GameEvent::Scored { .. } => {
                hud.set_score(state.score.home, state.score.away);
                push_statistics(hud, state);
                hud.show_feedback(MADE_MESSAGE, true);
            }
            GameEvent::Missed => hud.show_feedback(MISSED_MESSAGE, false),
            GameEvent::PowerChanged { percent } => hud.set_power(*percent),
            GameEvent::StatsCleared => {
                hud.set_score(state.score.home, state.score.away);
                push_statistics(hud, state);
            }
            GameEvent::BackboardHit { .. }
            | GameEvent::RimHit { .. }
            | GameEvent::FloorBounce { .. }
            | GameEvent::BallReset { .. }
            | GameEvent::PreviewToggled { .. }
            | GameEvent::PreviewCleared
            | GameEvent::CameraToggled { .. } => {}
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sim::{HoopSide, ShotPower, Team};

    /// Records every HUD call in order
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHud {
        pub calls: Vec<String>,
    }

    impl Hud for RecordingHud {
        fn set_score(&mut self, home: u32, away: u32) {
            self.calls.push(format!("score {home}-{away}"));
        }

        fn set_power(&mut self, percent: u8) {
            self.calls.push(format!("power {percent}"));
        }

        fn set_statistics(&mut self, attempts: u32, made: u32, percentage: f32) {
            self.calls.push(format!("stats {made}/{attempts} {percentage:.0}%"));
        }

        fn show_feedback(&mut self, message: &str, success: bool) {
            self.calls.push(format!("feedback {message} {success}"));
        }
    }

    #[test]
    fn test_score_updates_everything() {
        let mut state = SimState::new(1);
        state.score.home = 2;
        state.stats.attempts = 1;
        state.stats.made = 1;

        let mut hud = RecordingHud::default();
        let events = [GameEvent::Scored {
            side: HoopSide::Right,
            team: Team::Home,
        }];
        apply_events(&mut hud, &events, &state);
        assert_eq!(
            hud.calls,
            vec!["score 2-0", "stats 1/1 100%", "feedback SHOT MADE! true"]
        );
    }

    #[test]
    fn test_miss_and_power() {
        let state = SimState::new(1);
        let mut hud = RecordingHud::default();
        let events = [GameEvent::Missed, GameEvent::PowerChanged { percent: 55 }];
        apply_events(&mut hud, &events, &state);
        assert_eq!(hud.calls, vec!["feedback MISSED SHOT false", "power 55"]);
    }

    #[test]
    fn test_contacts_are_silent() {
        let state = SimState::new(1);
        let mut hud = RecordingHud::default();
        let events = [
            GameEvent::RimHit {
                side: HoopSide::Left,
            },
            GameEvent::FloorBounce { speed: 4.0 },
            GameEvent::PreviewCleared,
        ];
        apply_events(&mut hud, &events, &state);
        assert!(hud.calls.is_empty());
    }

    #[test]
    fn test_refresh_pushes_current_values() {
        let mut state = SimState::new(1);
        state.power = ShotPower::new(70);
        state.score.away = 4;
        let mut hud = RecordingHud::default();
        refresh(&mut hud, &state);
        assert_eq!(hud.calls, vec!["score 0-4", "power 70", "stats 0/0 0%"]);
    }
}
