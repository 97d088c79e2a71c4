//! Parsing configured key chords and matching them against input events.

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::infra::config::Keybindings;

/// A modifier set plus one key, parsed from strings like `ctrl+shift+f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyChord {
    /// Parse a `+`-separated chord. Modifier tokens are `ctrl`, `alt`, and
    /// `shift`; the final token names the key (`space`, `enter`, `esc`,
    /// `tab`, `f1`..`f12`, or a single character).
    pub fn parse(input: &str) -> Result<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut code = None;

        for part in input.split('+') {
            let token = part.trim().to_ascii_lowercase();
            match token.as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "space" => code = Some(KeyCode::Char(' ')),
                "enter" | "return" => code = Some(KeyCode::Enter),
                "esc" | "escape" => code = Some(KeyCode::Esc),
                "tab" => code = Some(KeyCode::Tab),
                _ => {
                    let mut chars = token.chars();
                    match (chars.next(), chars.next()) {
                        (Some(ch), None) => code = Some(KeyCode::Char(ch)),
                        (Some('f'), Some(_)) if token[1..].chars().all(|c| c.is_ascii_digit()) => {
                            let number: u8 = token[1..]
                                .parse()
                                .map_err(|_| anyhow!("bad function key in chord '{input}'"))?;
                            code = Some(KeyCode::F(number));
                        }
                        _ => bail!("unknown key '{part}' in chord '{input}'"),
                    }
                }
            }
        }

        let code = code.ok_or_else(|| anyhow!("chord '{input}' names no key"))?;
        Ok(Self { modifiers, code })
    }

    /// Whether an incoming key event triggers this chord.
    ///
    /// Character comparison is case-insensitive, and shift is only required
    /// when the chord asks for it — terminals disagree on whether shifted
    /// characters carry the modifier.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let code_matches = match (self.code, key.code) {
            (KeyCode::Char(expected), KeyCode::Char(actual)) => {
                expected.to_ascii_lowercase() == actual.to_ascii_lowercase()
            }
            (expected, actual) => expected == actual,
        };
        if !code_matches {
            return false;
        }

        let mut actual =
            key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
        if matches!(self.code, KeyCode::Char(_)) && !self.modifiers.contains(KeyModifiers::SHIFT) {
            actual.remove(KeyModifiers::SHIFT);
        }
        actual == self.modifiers
    }
}

/// All chords the shell listens for, resolved from config at startup.
#[derive(Debug, Clone, Copy)]
pub struct KeyMap {
    pub up: KeyChord,
    pub down: KeyChord,
    pub toggle: KeyChord,
    pub select_by_name: KeyChord,
    pub palette: KeyChord,
    pub quit: KeyChord,
}

impl KeyMap {
    pub fn from_config(bindings: &Keybindings) -> Result<Self> {
        Ok(Self {
            up: parse_binding("up", &bindings.up)?,
            down: parse_binding("down", &bindings.down)?,
            toggle: parse_binding("toggle", &bindings.toggle)?,
            select_by_name: parse_binding("select_by_name", &bindings.select_by_name)?,
            palette: parse_binding("palette", &bindings.palette)?,
            quit: parse_binding("quit", &bindings.quit)?,
        })
    }
}

fn parse_binding(name: &str, chord: &str) -> Result<KeyChord> {
    KeyChord::parse(chord).with_context(|| format!("invalid `{name}` keybinding"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_modifier_chords() {
        let chord = KeyChord::parse("ctrl+shift+f").unwrap();
        assert_eq!(chord.modifiers, KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(chord.code, KeyCode::Char('f'));
    }

    #[test]
    fn parses_named_and_function_keys() {
        assert_eq!(KeyChord::parse("space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(KeyChord::parse("enter").unwrap().code, KeyCode::Enter);
        assert_eq!(KeyChord::parse("f2").unwrap().code, KeyCode::F(2));
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert!(KeyChord::parse("hyper+x").is_err());
        assert!(KeyChord::parse("ctrl+").is_err());
        assert!(KeyChord::parse("ctrl").is_err());
    }

    #[test]
    fn matches_shifted_characters_reported_either_way() {
        let chord = KeyChord::parse("ctrl+shift+f").unwrap();
        assert!(chord.matches(&event(
            KeyCode::Char('f'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        )));
        assert!(chord.matches(&event(
            KeyCode::Char('F'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        )));
        assert!(!chord.matches(&event(KeyCode::Char('f'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn plain_character_chords_tolerate_stray_shift() {
        let chord = KeyChord::parse(":").unwrap();
        assert!(chord.matches(&event(KeyCode::Char(':'), KeyModifiers::SHIFT)));
        assert!(chord.matches(&event(KeyCode::Char(':'), KeyModifiers::NONE)));
        assert!(!chord.matches(&event(KeyCode::Char(':'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn keymap_resolves_default_config() {
        let map = KeyMap::from_config(&Keybindings::default()).unwrap();
        assert_eq!(map.toggle.code, KeyCode::Char(' '));
        assert_eq!(map.quit.code, KeyCode::Char('q'));
    }
}
