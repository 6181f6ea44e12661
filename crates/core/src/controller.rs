//! Controller - turns press/release edges and elapsed time into board calls.
//!
//! Every action fires once per press edge; repeats of a press that was never
//! released are ignored. Movement and soft drop additionally keep stepping
//! while held, paced by their timers in [`Controller::update`].

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::timer::{DasArrTimer, Timer};
use crate::types::{
    Action, ActionEvent, KeyState, DEFAULT_ARR, DEFAULT_DAS, PRIMARY_SOFT_DROP_ARR,
    SECONDARY_SOFT_DROP_ARR,
};

/// Delay before auto-repeat and the repeat interval after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handling {
    pub das: Duration,
    pub arr: Duration,
}

/// Tuning for the repeat behavior of held keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlingConfig {
    pub movement: Handling,
    /// Interval between soft-drop steps while the primary key is held.
    pub primary_soft_drop_arr: Duration,
    /// Interval between soft-drop steps while the secondary key is held.
    pub secondary_soft_drop_arr: Duration,
    /// Restart the auto-shift delay when the active direction flips while
    /// the other direction is still held.
    pub cancel_das_on_direction_change: bool,
}

impl Default for HandlingConfig {
    fn default() -> Self {
        Self {
            movement: Handling {
                das: DEFAULT_DAS,
                arr: DEFAULT_ARR,
            },
            primary_soft_drop_arr: PRIMARY_SOFT_DROP_ARR,
            secondary_soft_drop_arr: SECONDARY_SOFT_DROP_ARR,
            cancel_das_on_direction_change: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Controller {
    handling: HandlingConfig,
    held: [bool; Action::COUNT],
    /// Held movement keys, most recent last.
    move_keys: ArrayVec<Action, 2>,
    /// Held soft-drop keys, most recent last.
    soft_drop_keys: ArrayVec<Action, 2>,
    movement_timer: DasArrTimer,
    soft_drop_timer: Timer,
}

impl Controller {
    pub fn new(handling: HandlingConfig) -> Self {
        Self {
            handling,
            held: [false; Action::COUNT],
            move_keys: ArrayVec::new(),
            soft_drop_keys: ArrayVec::new(),
            movement_timer: DasArrTimer::new(handling.movement.das, handling.movement.arr),
            soft_drop_timer: Timer::new(handling.primary_soft_drop_arr),
        }
    }

    pub fn handling(&self) -> &HandlingConfig {
        &self.handling
    }

    /// Replace the handling. Held keys keep their state.
    pub fn set_handling(&mut self, handling: HandlingConfig) {
        self.handling = handling;
        self.movement_timer
            .set_handling(handling.movement.das, handling.movement.arr);
        if let Some(&key) = self.soft_drop_keys.last() {
            self.soft_drop_timer.set_period(self.soft_drop_period(key));
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// -1 for left, 1 for right, 0 when no movement key is held.
    pub fn direction(&self) -> i32 {
        match self.move_keys.last() {
            Some(Action::MoveLeft) => -1,
            Some(Action::MoveRight) => 1,
            _ => 0,
        }
    }

    pub fn is_soft_dropping(&self) -> bool {
        !self.soft_drop_keys.is_empty()
    }

    /// Apply one press or release edge.
    pub fn handle_event(&mut self, event: ActionEvent, board: &mut Board) {
        match event.state {
            KeyState::Pressed => self.press(event.action, board),
            KeyState::Released => self.release(event.action, board),
        }
    }

    fn press(&mut self, action: Action, board: &mut Board) {
        let slot = &mut self.held[action.index()];
        if *slot {
            return;
        }
        *slot = true;

        match action {
            Action::MoveLeft | Action::MoveRight => {
                let was_idle = self.move_keys.is_empty();
                let _ = self.move_keys.try_push(action);
                if was_idle || self.handling.cancel_das_on_direction_change {
                    self.prime_movement();
                }
            }
            Action::SoftDropPrimary | Action::SoftDropSecondary => {
                let period = self.soft_drop_period(action);
                if self.soft_drop_keys.is_empty() {
                    self.soft_drop_timer.reload(period);
                    board.set_gravity_enabled(false);
                } else {
                    self.soft_drop_timer.set_period(period);
                }
                let _ = self.soft_drop_keys.try_push(action);
            }
            Action::RotateCw | Action::RotateCcw | Action::Rotate180Cw | Action::Rotate180Ccw => {
                if let Some(direction) = action.rotate_direction() {
                    board.rotate_piece(direction);
                }
            }
            Action::HardDrop => {
                board.hard_drop_piece();
            }
            Action::Hold => board.hold_piece(),
            Action::Restart => board.reset(),
        }
    }

    fn release(&mut self, action: Action, board: &mut Board) {
        let slot = &mut self.held[action.index()];
        if !*slot {
            return;
        }
        *slot = false;

        match action {
            Action::MoveLeft | Action::MoveRight => {
                self.move_keys.retain(|key| *key != action);
                if self.move_keys.is_empty() {
                    self.movement_timer.reset();
                } else if self.handling.cancel_das_on_direction_change {
                    self.prime_movement();
                }
            }
            Action::SoftDropPrimary | Action::SoftDropSecondary => {
                self.soft_drop_keys.retain(|key| *key != action);
                match self.soft_drop_keys.last() {
                    Some(&key) => {
                        let period = self.soft_drop_period(key);
                        self.soft_drop_timer.set_period(period);
                    }
                    None => board.set_gravity_enabled(true),
                }
            }
            _ => {}
        }
    }

    /// Advance the repeat timers and apply the steps they produce.
    pub fn update(&mut self, dt: Duration, board: &mut Board) {
        if self.is_soft_dropping() {
            let steps = self.soft_drop_timer.update(dt);
            if steps > 0 {
                board.soft_drop_piece(steps);
            }
        }

        let direction = self.direction();
        if direction != 0 {
            let steps = self.movement_timer.update(dt);
            if steps > 0 {
                let steps = i32::try_from(steps).unwrap_or(i32::MAX);
                board.move_piece(steps * direction);
            }
        }
    }

    /// Forget every held key and restore gravity.
    pub fn release_all(&mut self, board: &mut Board) {
        self.held = [false; Action::COUNT];
        self.move_keys.clear();
        self.soft_drop_keys.clear();
        self.movement_timer.reset();
        board.set_gravity_enabled(true);
    }

    /// The first step of a fresh press lands on the next update; the rest
    /// wait out the delay.
    fn prime_movement(&mut self) {
        self.movement_timer.reset();
        self.movement_timer.set_to_max();
    }

    fn soft_drop_period(&self, action: Action) -> Duration {
        if action == Action::SoftDropSecondary {
            self.handling.secondary_soft_drop_arr
        } else {
            self.handling.primary_soft_drop_arr
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(HandlingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::types::Orientation;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Board with gravity off so only the controller moves the piece.
    fn still_board() -> Board {
        let mut board = Board::with_seed(21);
        board.set_gravity_enabled(false);
        board
    }

    fn column(board: &Board) -> i32 {
        board.active_minos().iter().map(|p| p.x).min().unwrap_or(0)
    }

    #[test]
    fn press_moves_once_then_waits_for_das() {
        let mut board = still_board();
        let mut controller = Controller::default();
        let start = column(&board);

        controller.handle_event(ActionEvent::press(Action::MoveLeft), &mut board);
        controller.update(ms(1), &mut board);
        assert_eq!(column(&board), start - 1);

        controller.update(ms(100), &mut board);
        assert_eq!(column(&board), start - 1);

        // 1 + 100 + 49 = 150ms of DAS
        controller.update(ms(49), &mut board);
        assert_eq!(column(&board), start - 2);

        // now repeating at ARR; the wall stops it
        controller.update(ms(1000), &mut board);
        assert_eq!(column(&board), 0);
    }

    #[test]
    fn repeated_press_is_ignored() {
        let mut board = still_board();
        let mut controller = Controller::default();
        let before = *board.active();

        controller.handle_event(ActionEvent::press(Action::RotateCw), &mut board);
        assert_eq!(board.orientation(), Orientation::East);
        controller.handle_event(ActionEvent::press(Action::RotateCw), &mut board);
        assert_eq!(board.orientation(), Orientation::East);

        controller.handle_event(ActionEvent::release(Action::RotateCw), &mut board);
        controller.handle_event(ActionEvent::press(Action::RotateCcw), &mut board);
        assert_eq!(board.orientation(), Orientation::North);
        assert_eq!(board.active_kind(), before.kind);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut board = still_board();
        let mut controller = Controller::default();
        controller.handle_event(ActionEvent::release(Action::SoftDropPrimary), &mut board);
        assert!(!board.gravity_enabled());
        assert!(!controller.is_held(Action::SoftDropPrimary));
    }

    #[test]
    fn most_recent_direction_wins() {
        let mut board = still_board();
        let mut controller = Controller::default();

        controller.handle_event(ActionEvent::press(Action::MoveLeft), &mut board);
        controller.handle_event(ActionEvent::press(Action::MoveRight), &mut board);
        assert_eq!(controller.direction(), 1);
        controller.handle_event(ActionEvent::release(Action::MoveRight), &mut board);
        assert_eq!(controller.direction(), -1);
        controller.handle_event(ActionEvent::release(Action::MoveLeft), &mut board);
        assert_eq!(controller.direction(), 0);

        let start = column(&board);
        controller.update(ms(500), &mut board);
        assert_eq!(column(&board), start);
    }

    #[test]
    fn direction_change_keeps_das_unless_configured() {
        let mut board = still_board();
        let mut controller = Controller::default();
        let start = column(&board);

        controller.handle_event(ActionEvent::press(Action::MoveLeft), &mut board);
        controller.update(ms(1), &mut board);
        controller.update(ms(149), &mut board);
        assert_eq!(column(&board), start - 2);
        assert!(controller.movement_timer.is_repeating());

        controller.handle_event(ActionEvent::press(Action::MoveRight), &mut board);
        assert!(controller.movement_timer.is_repeating());

        let mut handling = HandlingConfig::default();
        handling.cancel_das_on_direction_change = true;
        let mut board = still_board();
        let mut controller = Controller::new(handling);
        controller.handle_event(ActionEvent::press(Action::MoveLeft), &mut board);
        controller.update(ms(1), &mut board);
        controller.update(ms(149), &mut board);
        assert!(controller.movement_timer.is_repeating());
        controller.handle_event(ActionEvent::press(Action::MoveRight), &mut board);
        assert!(!controller.movement_timer.is_repeating());
    }

    #[test]
    fn soft_drop_suspends_gravity_and_steps() {
        let mut board = Board::with_seed(21);
        let mut controller = Controller::default();
        let spawn = *board.active_minos();

        controller.handle_event(ActionEvent::press(Action::SoftDropSecondary), &mut board);
        assert!(!board.gravity_enabled());

        // first step right away, then one per 200ms
        controller.update(ms(1), &mut board);
        assert_eq!(board.active_minos().offset_from(&spawn), Vec2::new(0, -1));
        controller.update(ms(198), &mut board);
        assert_eq!(board.active_minos().offset_from(&spawn), Vec2::new(0, -1));
        controller.update(ms(1), &mut board);
        assert_eq!(board.active_minos().offset_from(&spawn), Vec2::new(0, -2));
        assert_eq!(board.score(), 2);

        controller.handle_event(ActionEvent::release(Action::SoftDropSecondary), &mut board);
        assert!(board.gravity_enabled());
    }

    #[test]
    fn switching_soft_drop_keys_swaps_period() {
        let mut board = still_board();
        let mut controller = Controller::default();

        controller.handle_event(ActionEvent::press(Action::SoftDropSecondary), &mut board);
        controller.update(ms(1), &mut board);
        controller.update(ms(10), &mut board);
        assert_eq!(board.score(), 1);

        // 11ms already carried; 12.5ms period fires after 1.5ms more
        controller.handle_event(ActionEvent::press(Action::SoftDropPrimary), &mut board);
        assert_eq!(controller.soft_drop_timer.period(), PRIMARY_SOFT_DROP_ARR);
        controller.update(ms(2), &mut board);
        assert_eq!(board.score(), 2);

        controller.handle_event(ActionEvent::release(Action::SoftDropPrimary), &mut board);
        assert_eq!(controller.soft_drop_timer.period(), SECONDARY_SOFT_DROP_ARR);
        assert!(!board.gravity_enabled());
        controller.handle_event(ActionEvent::release(Action::SoftDropSecondary), &mut board);
        assert!(board.gravity_enabled());
    }

    #[test]
    fn single_fire_actions() {
        let mut board = still_board();
        let mut controller = Controller::default();
        let first = board.active_kind();

        controller.handle_event(ActionEvent::press(Action::Hold), &mut board);
        assert_eq!(board.hold(), Some(first));

        controller.handle_event(ActionEvent::press(Action::HardDrop), &mut board);
        assert!(!board.matrix().is_empty());
        controller.handle_event(ActionEvent::press(Action::HardDrop), &mut board);
        assert_eq!(
            board.matrix().cells().iter().filter(|c| c.is_some()).count(),
            4
        );

        controller.handle_event(ActionEvent::press(Action::Restart), &mut board);
        assert!(board.matrix().is_empty());
        assert_eq!(board.hold(), None);
    }

    #[test]
    fn release_all_restores_gravity() {
        let mut board = still_board();
        let mut controller = Controller::default();
        controller.handle_event(ActionEvent::press(Action::SoftDropPrimary), &mut board);
        controller.handle_event(ActionEvent::press(Action::MoveRight), &mut board);
        controller.release_all(&mut board);
        assert!(board.gravity_enabled());
        assert_eq!(controller.direction(), 0);
        assert!(!controller.is_held(Action::MoveRight));
    }
}
