//! # Input Module
//!
//! Input handling for the exploration session.
//!
//! The frontend records which keys are held and which were released into an
//! [`InputState`]. Once per tick the session resolves that snapshot through
//! the player's [`KeyBindings`] into a [`FrameInput`]: a motion vector and a
//! count of interact presses.

pub mod bindings;

pub use bindings::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The five actions the player can bind keys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputAction {
    Top,
    Bottom,
    Left,
    Right,
    Interact,
}

impl InputAction {
    /// Every action, in binding order.
    pub const ALL: [InputAction; 5] = [
        InputAction::Top,
        InputAction::Left,
        InputAction::Bottom,
        InputAction::Right,
        InputAction::Interact,
    ];
}

/// Raw key state shared between the frontend and the session.
///
/// Keys are identified by lowercase names such as `"w"` or `"space"`.
///
/// # Examples
///
/// ```
/// use world_explorer::InputState;
///
/// let mut input = InputState::new();
/// input.press("d");
/// assert!(input.is_pressed("d"));
///
/// input.release("d");
/// assert!(!input.is_pressed("d"));
/// assert_eq!(input.take_released(), vec!["d".to_string()]);
/// assert!(input.take_released().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pressed: BTreeSet<String>,
    released: Vec<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as held down.
    pub fn press(&mut self, key: impl Into<String>) {
        self.pressed.insert(key.into());
    }

    /// Records a key release.
    pub fn release(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.pressed.remove(&key);
        self.released.push(key);
    }

    /// Replaces the set of held keys.
    pub fn set_pressed<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pressed = keys.into_iter().map(Into::into).collect();
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }

    /// Drains the releases recorded since the last call.
    pub fn take_released(&mut self) -> Vec<String> {
        std::mem::take(&mut self.released)
    }

    /// Forgets held keys and pending releases.
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }
}

/// What the player asked for during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Horizontal motion in `[-1, 1]`, right positive
    pub x_move: f64,
    /// Vertical motion in `[-1, 1]`, up positive
    pub y_move: f64,
    /// Interact key releases this tick
    pub interactions: usize,
}

impl FrameInput {
    /// Holds the given movement actions, no interaction.
    pub fn moving(actions: &[InputAction]) -> Self {
        let mut frame = Self::default();
        for action in actions {
            frame.apply(*action);
        }
        frame
    }

    /// Adds one interact press.
    pub fn interacting(mut self) -> Self {
        self.interactions += 1;
        self
    }

    fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::Top => self.y_move += 1.0,
            InputAction::Bottom => self.y_move -= 1.0,
            InputAction::Right => self.x_move += 1.0,
            InputAction::Left => self.x_move -= 1.0,
            InputAction::Interact => {}
        }
    }

    /// Resolves held keys and drains releases through the bindings.
    ///
    /// Opposite keys held together cancel out.
    pub fn resolve(input: &mut InputState, bindings: &KeyBindings) -> Self {
        let mut frame = Self::default();
        for action in [
            InputAction::Top,
            InputAction::Bottom,
            InputAction::Left,
            InputAction::Right,
        ] {
            if input.is_pressed(bindings.key_for(action)) {
                frame.apply(action);
            }
        }
        frame.interactions = input
            .take_released()
            .iter()
            .filter(|key| bindings.action_for(key) == Some(InputAction::Interact))
            .count();
        frame
    }

    /// Whether the frame asks for any motion.
    pub fn is_moving(&self) -> bool {
        self.x_move != 0.0 || self.y_move != 0.0
    }
}
