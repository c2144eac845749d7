use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{de::Deserializer, Deserialize, Serialize};
use strum::Display;

/// User-facing actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Action {
    Quit,
    NavigateUp,
    SelectNext,
    SelectPrevious,
    OpenMessages,
    WatchLivestream,
    GoLive,
    ToggleRewards,
}

/// Flat key -> action mapping
#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct KeyBindings(pub HashMap<KeyEvent, Action>);

impl KeyBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        let normalized = KeyEvent::new(key.code, key.modifiers);
        self.0.get(&normalized).copied()
    }
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed_map = HashMap::<String, Action>::deserialize(deserializer)?;
        let mut keybindings = HashMap::new();
        for (key_str, action) in parsed_map {
            let key = parse_key(&key_str).map_err(serde::de::Error::custom)?;
            keybindings.insert(key, action);
        }
        Ok(KeyBindings(keybindings))
    }
}

/// Parses `<ctrl-c>`, `<enter>`, `<j>` style key descriptions.
pub fn parse_key(raw: &str) -> Result<KeyEvent, String> {
    let inner = raw
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .ok_or_else(|| format!("Unable to parse `{raw}`: expected `<key>`"))?;

    let mut modifiers = KeyModifiers::empty();
    let mut rest = inner;
    loop {
        let lower = rest.to_ascii_lowercase();
        let stripped = if lower.starts_with("ctrl-") {
            modifiers.insert(KeyModifiers::CONTROL);
            5
        } else if lower.starts_with("alt-") {
            modifiers.insert(KeyModifiers::ALT);
            4
        } else if lower.starts_with("shift-") {
            modifiers.insert(KeyModifiers::SHIFT);
            6
        } else {
            break;
        };
        rest = &rest[stripped..];
    }

    let code = match rest.to_ascii_lowercase().as_str() {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "hyphen" | "minus" => KeyCode::Char('-'),
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        KeyCode::Char(c.to_ascii_uppercase())
                    } else {
                        KeyCode::Char(c)
                    }
                }
                _ => return Err(format!("Unable to parse `{raw}`: unknown key `{rest}`")),
            }
        }
    };

    Ok(KeyEvent::new(code, modifiers))
}
