//! Key bindings stored in the player's profile.

use super::InputAction;
use serde::{Deserialize, Serialize};

/// Maps each [`InputAction`] to a lowercase key name.
///
/// # Examples
///
/// ```
/// use world_explorer::{InputAction, KeyBindings};
///
/// let mut keys = KeyBindings::default();
/// assert_eq!(keys.action_for("a"), Some(InputAction::Left));
///
/// keys.set(InputAction::Left, "Left");
/// assert_eq!(keys.key_for(InputAction::Left), "left");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub top: String,
    pub left: String,
    pub bottom: String,
    pub right: String,
    pub interact: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            top: "w".to_string(),
            left: "a".to_string(),
            bottom: "s".to_string(),
            right: "d".to_string(),
            interact: "space".to_string(),
        }
    }
}

impl KeyBindings {
    /// The key bound to an action.
    pub fn key_for(&self, action: InputAction) -> &str {
        match action {
            InputAction::Top => &self.top,
            InputAction::Left => &self.left,
            InputAction::Bottom => &self.bottom,
            InputAction::Right => &self.right,
            InputAction::Interact => &self.interact,
        }
    }

    /// The action a key triggers, if any.
    pub fn action_for(&self, key: &str) -> Option<InputAction> {
        InputAction::ALL
            .iter()
            .copied()
            .find(|&action| self.key_for(action) == key)
    }

    /// Binds an action to a key. Key names are stored lowercase.
    pub fn set(&mut self, action: InputAction, key: impl Into<String>) {
        let key = key.into().to_lowercase();
        let slot = match action {
            InputAction::Top => &mut self.top,
            InputAction::Left => &mut self.left,
            InputAction::Bottom => &mut self.bottom,
            InputAction::Right => &mut self.right,
            InputAction::Interact => &mut self.interact,
        };
        *slot = key;
    }
}
