//! Press/release tracking for terminal key events.
//!
//! Terminals with keyboard enhancement report releases directly. Plain
//! terminals only send presses (plus OS auto-repeat while a key is down), so a
//! key counts as held until no press for it has arrived within the release
//! timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::KeyBindings;
use crate::types::{Action, ActionEvent};

/// Synthetic releases produced by one call.
pub type Releases = ArrayVec<ActionEvent, { Action::COUNT }>;

// Long enough to bridge the gap between OS auto-repeat presses, short enough
// that a tap does not turn into a sustained hold.
const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
pub struct TerminalInput {
    bindings: KeyBindings,
    /// Held actions and when a press for each was last seen.
    held: ArrayVec<(Action, Instant), { Action::COUNT }>,
    release_events_supported: bool,
    release_timeout: Duration,
}

impl TerminalInput {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: ArrayVec::new(),
            release_events_supported: false,
            release_timeout: DEFAULT_RELEASE_TIMEOUT,
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    /// Declare up front that the terminal reports releases (keyboard
    /// enhancement enabled). Seeing a release event also turns this on.
    pub fn with_release_events(mut self, supported: bool) -> Self {
        self.release_events_supported = supported;
        self
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    pub fn release_events_supported(&self) -> bool {
        self.release_events_supported
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.iter().any(|(held, _)| *held == action)
    }

    /// Translate one key event. Returns an edge only when the held state of
    /// the bound action changes.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<ActionEvent> {
        let action = self.bindings.action_for(key.code)?;

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if let Some(entry) = self.held.iter_mut().find(|(held, _)| *held == action) {
                    entry.1 = now;
                    return None;
                }
                let _ = self.held.try_push((action, now));
                Some(ActionEvent::press(action))
            }
            KeyEventKind::Release => {
                self.release_events_supported = true;
                let index = self.held.iter().position(|(held, _)| *held == action)?;
                self.held.remove(index);
                Some(ActionEvent::release(action))
            }
        }
    }

    /// Release every held action whose last press is older than the timeout.
    /// Does nothing when the terminal reports real releases.
    pub fn expire(&mut self, now: Instant) -> Releases {
        let mut releases = Releases::new();
        if self.release_events_supported {
            return releases;
        }

        let timeout = self.release_timeout;
        self.held.retain(|(action, last)| {
            let stale = now.saturating_duration_since(*last) >= timeout;
            if stale {
                releases.push(ActionEvent::release(*action));
            }
            !stale
        });
        releases
    }

    /// Release everything, e.g. on focus loss.
    pub fn release_all(&mut self) -> Releases {
        self.held
            .drain(..)
            .map(|(action, _)| ActionEvent::release(action))
            .collect()
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}
