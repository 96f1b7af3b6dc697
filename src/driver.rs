//! Game loop driver
//!
//! Bridges a presentation layer to the deterministic core. Commands from any
//! thread land in a channel and are applied in arrival order at the start of
//! each frame; frame time is fed to the core in fixed substeps.

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::sim::{Game, GameEvent, GameSummary, HudSnapshot, WordSource};

/// Discrete player commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text submitted from the input box
    Submit(String),
    PauseToggle,
    Stop,
}

/// Receives everything the player should see
pub trait Presenter {
    /// Called once per frame with the current HUD
    fn present(&mut self, hud: &HudSnapshot);

    /// Called for each event, in order, before `present`
    fn on_event(&mut self, _event: &GameEvent) {}

    /// Called exactly once when the run ends
    fn game_over(&mut self, summary: &GameSummary);
}

/// Owns a game and feeds it frames and commands
pub struct GameLoop<W: WordSource, P: Presenter> {
    game: Game<W>,
    presenter: P,
    inbox: Receiver<Command>,
    accumulator_ms: f64,
    reported: bool,
}

impl<W: WordSource, P: Presenter> GameLoop<W, P> {
    /// Wrap a game; the returned sender posts commands to it
    pub fn new(game: Game<W>, presenter: P) -> (Self, Sender<Command>) {
        let (tx, rx) = unbounded();
        let this = Self {
            game,
            presenter,
            inbox: rx,
            accumulator_ms: 0.0,
            reported: false,
        };
        (this, tx)
    }

    pub fn game(&self) -> &Game<W> {
        &self.game
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }

    /// Apply one command immediately
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Submit(text) => {
                self.game.submit_text(&text);
            }
            Command::PauseToggle => self.game.toggle_pause(),
            Command::Stop => self.game.stop(),
        }
    }

    /// Run one frame of `elapsed_ms` wall time. Returns false once the game
    /// has ended and the summary has been delivered.
    pub fn frame(&mut self, elapsed_ms: f64) -> bool {
        self.drain_inbox();

        let step = self.game.settings().sim_step_ms;
        let max_substeps = self.game.settings().max_substeps;
        self.accumulator_ms += elapsed_ms.max(0.0);

        let mut substeps = 0;
        while self.accumulator_ms >= step as f64 && substeps < max_substeps {
            self.game.tick(step);
            self.accumulator_ms -= step as f64;
            substeps += 1;
        }
        if substeps == max_substeps && self.accumulator_ms >= step as f64 {
            log::debug!("Dropping {:.1} ms of frame time", self.accumulator_ms);
            self.accumulator_ms = 0.0;
        }

        self.publish();
        !self.reported
    }

    fn drain_inbox(&mut self) {
        // try_recv never blocks; a dropped sender just means no more input
        while let Ok(command) = self.inbox.try_recv() {
            self.apply(command);
        }
    }

    /// Push pending events and the HUD to the presenter
    pub fn publish(&mut self) {
        for event in self.game.take_events() {
            self.presenter.on_event(&event);
        }
        self.presenter.present(&self.game.snapshot());

        if !self.reported {
            if let Some(summary) = self.game.summary() {
                self.presenter.game_over(&summary);
                self.reported = true;
            }
        }
    }
}
