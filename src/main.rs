//! Hoop Shot - native entry point
//!
//! The browser build is driven from JS through `platform::web::WebCourt`.
//! Natively there is no renderer, so this runs a scripted headless session:
//! walk toward each hoop, adjust power, shoot, and log what happens.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use hoop_shot::platform::{FrameDriver, LogHud, SceneSnapshot};
    use hoop_shot::sim::{SimState, TickInput};
    use hoop_shot::ui;
    use hoop_shot::{Settings, Tuning};

    /// Simulated display refresh
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up waiting for a flight after this many frames
    const MAX_FLIGHT_FRAMES: u32 = 60 * 30;

    /// One scripted action
    enum Step {
        /// Hold movement for a number of frames
        Walk { input: TickInput, frames: u32 },
        Power(i32),
        TogglePreview,
        Shoot,
        Reset,
    }

    fn walk(frames: u32, f: impl FnOnce(&mut TickInput)) -> Step {
        let mut input = TickInput::default();
        f(&mut input);
        Step::Walk { input, frames }
    }

    fn script() -> Vec<Step> {
        vec![
            Step::TogglePreview,
            walk(60 + 40, |i| i.move_right = true),
            Step::Power(10),
            Step::Shoot,
            walk(30, |i| i.move_up = true),
            Step::Shoot,
            Step::Reset,
            walk(60 + 45, |i| i.move_left = true),
            Step::Power(-20),
            Step::Shoot,
            Step::Power(30),
            Step::Shoot,
        ]
    }

    pub fn run(tuning_path: Option<&str>) {
        let tuning = match tuning_path {
            Some(path) => match Tuning::from_file(path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("{e}; falling back to default tuning");
                    Tuning::default()
                }
            },
            None => Tuning::default(),
        };

        let settings = Settings::load();
        let mut state = SimState::with_tuning(0x5EED, tuning);
        settings.apply(&mut state);

        let mut driver = FrameDriver::new(state);
        let mut hud = LogHud;
        let mut scene = SceneSnapshot::default();
        ui::refresh(&mut hud, &driver.state);

        for step in script() {
            match step {
                Step::Walk { input, frames } => {
                    driver.input = input;
                    for _ in 0..frames {
                        driver.frame(FRAME_DT, &mut hud, &mut scene);
                    }
                    driver.input = TickInput::default();
                    log::info!("Ball at {:.2}", scene.ball_position);
                }
                Step::Power(delta) => {
                    driver.input.power_delta = delta;
                    driver.frame(FRAME_DT, &mut hud, &mut scene);
                }
                Step::TogglePreview => {
                    driver.input.toggle_preview = true;
                    driver.frame(FRAME_DT, &mut hud, &mut scene);
                }
                Step::Reset => {
                    driver.input.reset = true;
                    driver.frame(FRAME_DT, &mut hud, &mut scene);
                }
                Step::Shoot => {
                    if let Some(preview) = &scene.preview {
                        log::info!(
                            "Preview: {} points toward {:?}, ends at {:.2}",
                            preview.points.len(),
                            preview.target,
                            preview.arrow_tip
                        );
                    }
                    driver.input.shoot = true;
                    driver.frame(FRAME_DT, &mut hud, &mut scene);

                    let mut frames = 0;
                    while driver.state.ball.in_flight() && frames < MAX_FLIGHT_FRAMES {
                        driver.frame(FRAME_DT, &mut hud, &mut scene);
                        frames += 1;
                    }
                    if driver.state.ball.in_flight() {
                        log::warn!("Flight still running after {frames} frames");
                    }
                }
            }
        }

        let stats = driver.state.stats;
        let score = driver.state.score;
        log::info!(
            "Session over: {}/{} made ({:.1}%), home {} - away {}",
            stats.made,
            stats.attempts,
            stats.percentage(),
            score.home,
            score.away
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hoop Shot (native) starting...");

    let tuning_path = std::env::args().nth(1);
    headless::run(tuning_path.as_deref());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
