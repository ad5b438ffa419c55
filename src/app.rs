//! Application state machine
//!
//! [`Application`] is the single owner of the game's top-level state. Each
//! frame it decides whether the wave runs, and every state change goes
//! through [`Application::transition`].
//!
//! ```text
//! Inactive --start--> Loading --(1 frame)--> Active --pause--> Paused
//!                                              |                 |
//!                                             end             continue
//!                                              v                 v
//!                                           Complete   Continue --(1 frame)--> Active
//! ```

use crate::input::{InputSource, Key};
use crate::level::{LevelData, LevelError};
use crate::render::{Label, LabelSlot, RenderSink};
use crate::settings::Settings;
use crate::sim::Wave;
use crate::tuning::Tuning;

/// Top-level application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Title screen, waiting for the start key
    Inactive,
    /// Building a new wave (one frame)
    Loading,
    /// Normal gameplay
    Active,
    /// Ship lost, waiting for the continue key
    Paused,
    /// Ship respawned, resuming next frame
    Continue,
    /// Wave won or lost; stays here until `restart`
    Complete,
}

impl AppState {
    /// Allowed edges of the state graph. `Inactive` is reachable from
    /// anywhere through `restart`.
    pub fn can_transition_to(self, next: AppState) -> bool {
        use AppState::*;
        matches!(
            (self, next),
            (Inactive, Loading)
                | (Loading, Active)
                | (Active, Paused)
                | (Active, Complete)
                | (Paused, Continue)
                | (Continue, Active)
                | (_, Inactive)
        )
    }
}

/// Display handles refreshed by the application
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    pub title: Option<String>,
    pub message: Option<String>,
    pub score: String,
    pub lives: String,
}

/// Owns the state machine, the level data and the running wave
#[derive(Debug)]
pub struct Application {
    state: AppState,
    level: LevelData,
    tuning: Tuning,
    wave: Option<Wave>,
    hud: Hud,
    show_hud: bool,
    /// Key name shown in prompts
    start_key: String,
}

impl Application {
    pub const TITLE: &'static str = "Planetoids";
    pub const WIN_MESSAGE: &'static str = "You Won!";
    pub const LOSS_MESSAGE: &'static str = "You lost!";

    /// Create the application on its title screen. The level is checked now so
    /// that loading can never produce a broken wave.
    pub fn new(level: LevelData, tuning: Tuning) -> Result<Self, LevelError> {
        level.validate()?;
        let mut app = Self {
            state: AppState::Inactive,
            level,
            tuning,
            wave: None,
            hud: Hud::default(),
            show_hud: true,
            start_key: "s".to_string(),
        };
        app.enter(AppState::Inactive);
        Ok(app)
    }

    /// Apply player preferences
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.show_hud = settings.show_hud;
        self.start_key = settings.bindings.start.clone();
        self.refresh_prompt();
        self
    }

    /// Run one frame
    pub fn update(&mut self, input: &impl InputSource) {
        match self.state {
            AppState::Inactive => {
                if input.is_key_down(Key::Start) {
                    self.transition(AppState::Loading);
                }
            }
            AppState::Loading => match Wave::new(self.level.clone(), self.tuning.clone()) {
                Ok(wave) => {
                    self.wave = Some(wave);
                    self.refresh_counters();
                    self.transition(AppState::Active);
                }
                Err(e) => {
                    log::error!("Failed to build wave: {}", e);
                    self.transition(AppState::Inactive);
                }
            },
            AppState::Active => {
                let Some(wave) = self.wave.as_mut() else {
                    return;
                };
                let status = wave.update(input);
                self.refresh_counters();
                // A frame that ends the wave and loses the ship counts as the end
                if status.ended {
                    self.transition(AppState::Complete);
                } else if status.paused {
                    self.transition(AppState::Paused);
                }
            }
            AppState::Paused => {
                if input.is_key_down(Key::Start) {
                    self.transition(AppState::Continue);
                }
            }
            AppState::Continue => {
                self.transition(AppState::Active);
            }
            AppState::Complete => {}
        }
    }

    /// Move to `next`, running its entry actions. Edges outside the state
    /// graph are refused.
    fn transition(&mut self, next: AppState) -> bool {
        if !self.state.can_transition_to(next) {
            log::warn!("Refused transition {:?} -> {:?}", self.state, next);
            return false;
        }
        log::info!("State {:?} -> {:?}", self.state, next);
        self.state = next;
        self.enter(next);
        true
    }

    /// Entry actions for a state
    fn enter(&mut self, state: AppState) {
        match state {
            AppState::Inactive => {
                self.hud.title = Some(Self::TITLE.to_string());
                self.refresh_prompt();
                self.refresh_counters();
            }
            AppState::Loading | AppState::Active => {
                self.hud.title = None;
                self.hud.message = None;
            }
            AppState::Paused => {
                self.refresh_prompt();
            }
            AppState::Continue => {
                self.hud.message = None;
                // Only a lost ship is rebuilt
                if let Some(wave) = self.wave.as_mut().filter(|w| w.ship().is_none()) {
                    wave.reset_ship();
                }
            }
            AppState::Complete => {
                let lost = self.wave.as_ref().is_some_and(|w| w.lives() == 0);
                let text = if lost { Self::LOSS_MESSAGE } else { Self::WIN_MESSAGE };
                self.hud.message = Some(text.to_string());
            }
        }
    }

    /// Rewrite the start/continue prompt for states that show one
    fn refresh_prompt(&mut self) {
        let key = self.start_key.to_uppercase();
        match self.state {
            AppState::Inactive => {
                self.hud.message = Some(format!("Press '{}' to Start", key));
            }
            AppState::Paused => {
                self.hud.message = Some(format!("Press '{}' to Continue", key));
            }
            _ => {}
        }
    }

    fn refresh_counters(&mut self) {
        self.hud.score = format!("Score: {}", self.score());
        self.hud.lives = format!("Lives: {}", self.lives());
    }

    /// Leave the current game and return to the title screen
    pub fn restart(&mut self) {
        self.wave = None;
        self.transition(AppState::Inactive);
    }

    /// Replace the level used by the next game
    pub fn set_level(&mut self, level: LevelData) -> Result<(), LevelError> {
        level.validate()?;
        self.level = level;
        Ok(())
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn score(&self) -> u64 {
        self.wave.as_ref().map_or(0, |w| w.score())
    }

    pub fn lives(&self) -> u8 {
        self.wave.as_ref().map_or(self.tuning.ship_lives, |w| w.lives())
    }

    /// True once the wave is complete with lives to spare
    pub fn has_won(&self) -> bool {
        self.state == AppState::Complete && self.wave.as_ref().is_some_and(|w| w.has_won())
    }

    /// Hand this frame's entities and labels to the sink
    pub fn draw(&self, sink: &mut dyn RenderSink) {
        match self.state {
            AppState::Inactive => {
                self.draw_text(sink);
            }
            AppState::Loading => {}
            AppState::Active | AppState::Continue => {
                if let Some(wave) = &self.wave {
                    wave.draw(sink);
                }
                if self.show_hud {
                    sink.label(&Label::new(LabelSlot::Score, self.hud.score.as_str()));
                    sink.label(&Label::new(LabelSlot::Lives, self.hud.lives.as_str()));
                }
            }
            AppState::Paused => {
                if let Some(wave) = &self.wave {
                    wave.draw(sink);
                }
                self.draw_text(sink);
            }
            AppState::Complete => self.draw_text(sink),
        }
    }

    fn draw_text(&self, sink: &mut dyn RenderSink) {
        if let Some(title) = &self.hud.title {
            sink.label(&Label::new(LabelSlot::Title, title.as_str()));
        }
        if let Some(message) = &self.hud.message {
            sink.label(&Label::new(LabelSlot::Message, message.as_str()));
        }
    }
}
