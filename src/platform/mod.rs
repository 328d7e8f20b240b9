//! Host driver and platform seams
//!
//! `FrameDriver` turns variable frame deltas into fixed simulation ticks and
//! pushes the results out to a `Hud` and a `SceneSink` after stepping:
//! - Time: accumulator with a substep cap
//! - Input: held movement plus one-shot commands
//! - Output: HUD events, ball transform, preview arc, camera mode

#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::{Quat, Vec3};
use serde::Serialize;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, SimState, TickInput, TrajectoryPreview, tick};
use crate::ui::{self, Hud};

/// Scene collaborator, owns meshes and camera
pub trait SceneSink {
    fn sync_ball(&mut self, position: Vec3, rotation: Quat);
    fn show_preview(&mut self, preview: &TrajectoryPreview);
    /// Dispose preview visuals
    fn clear_preview(&mut self);
    fn set_orbit_enabled(&mut self, enabled: bool);
}

/// Fixed-timestep driver around a `SimState`
#[derive(Debug)]
pub struct FrameDriver {
    pub state: SimState,
    /// Latched input for the next tick
    pub input: TickInput,
    accumulator: f32,
    last_time_ms: Option<f64>,
    /// Last camera mode pushed to the scene
    orbit_synced: Option<bool>,
}

impl FrameDriver {
    pub fn new(state: SimState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
            last_time_ms: None,
            orbit_synced: None,
        }
    }

    /// Run as many fixed ticks as `frame_dt` covers
    ///
    /// Returns the number of ticks run. One-shot commands are cleared once a
    /// tick has consumed them; held movement stays latched.
    pub fn step(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_commands();
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= SIM_DT;
        }
        substeps
    }

    /// Step, then update the HUD and scene
    pub fn frame(
        &mut self,
        frame_dt: f32,
        hud: &mut impl Hud,
        scene: &mut impl SceneSink,
    ) -> u32 {
        let substeps = self.step(frame_dt);
        let events = self.state.drain_events();
        ui::apply_events(hud, &events, &self.state);
        self.sync_scene(&events, scene);
        substeps
    }

    /// `frame` driven by an absolute timestamp (ms), as animation callbacks get
    pub fn frame_at(
        &mut self,
        time_ms: f64,
        hud: &mut impl Hud,
        scene: &mut impl SceneSink,
    ) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time_ms = Some(time_ms);
        self.frame(dt, hud, scene)
    }

    fn sync_scene(&mut self, events: &[GameEvent], scene: &mut impl SceneSink) {
        scene.sync_ball(self.state.ball.pos, self.state.ball.rotation);

        if events.contains(&GameEvent::PreviewCleared) {
            scene.clear_preview();
        }
        if let Some(preview) = &self.state.preview {
            scene.show_preview(preview);
        }

        if self.orbit_synced != Some(self.state.orbit_camera) {
            scene.set_orbit_enabled(self.state.orbit_camera);
            self.orbit_synced = Some(self.state.orbit_camera);
        }
    }
}

/// `Hud` that writes through the logger
#[derive(Debug, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn set_score(&mut self, home: u32, away: u32) {
        log::info!("Score: home {home} - away {away}");
    }

    fn set_power(&mut self, percent: u8) {
        log::info!("Power: {percent}%");
    }

    fn set_statistics(&mut self, attempts: u32, made: u32, percentage: f32) {
        log::info!("Shots: {made}/{attempts} ({percentage:.1}%)");
    }

    fn show_feedback(&mut self, message: &str, success: bool) {
        if success {
            log::info!("{message}");
        } else {
            log::info!("{message} (miss)");
        }
    }
}

/// Latest scene state, serializable for an external renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub ball_position: Vec3,
    pub ball_rotation: Quat,
    pub preview: Option<TrajectoryPreview>,
    pub orbit_enabled: bool,
}

impl SceneSink for SceneSnapshot {
    fn sync_ball(&mut self, position: Vec3, rotation: Quat) {
        self.ball_position = position;
        self.ball_rotation = rotation;
    }

    fn show_preview(&mut self, preview: &TrajectoryPreview) {
        self.preview = Some(preview.clone());
    }

    fn clear_preview(&mut self) {
        self.preview = None;
    }

    fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit_enabled = enabled;
    }
}
