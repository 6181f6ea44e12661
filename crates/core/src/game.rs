//! Game session - one board plus the controller that drives it.

use std::sync::Arc;
use std::time::Duration;

use crate::board::Board;
use crate::catalog::Catalog;
use crate::controller::{Controller, HandlingConfig};
use crate::snapshot::BoardSnapshot;
use crate::types::ActionEvent;

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    controller: Controller,
}

impl Game {
    pub fn new(seed: u32) -> Self {
        Self::with_config(Arc::new(Catalog::standard()), seed, HandlingConfig::default())
    }

    pub fn with_config(catalog: Arc<Catalog>, seed: u32, handling: HandlingConfig) -> Self {
        Self {
            board: Board::new(catalog, seed),
            controller: Controller::new(handling),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Apply one input edge, including whatever board change it causes.
    pub fn handle_event(&mut self, event: ActionEvent) {
        self.controller.handle_event(event, &mut self.board);
    }

    /// Apply a frame's worth of edges in arrival order.
    pub fn handle_events<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = ActionEvent>,
    {
        for event in events {
            self.handle_event(event);
        }
    }

    /// Advance time: gravity and feedback aging first, then held-key repeats.
    pub fn update(&mut self, dt: Duration) {
        self.board.update(dt);
        self.controller.update(dt, &mut self.board);
    }

    /// One host frame: the frame's edges, then one time step.
    pub fn tick<I>(&mut self, events: I, dt: Duration)
    where
        I: IntoIterator<Item = ActionEvent>,
    {
        self.handle_events(events);
        self.update(dt);
    }

    /// Drop every held key, e.g. when the host loses focus.
    pub fn release_all(&mut self) {
        self.controller.release_all(&mut self.board);
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        self.board.snapshot_into(out);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}
