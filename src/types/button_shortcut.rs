//! Button action encoding
//!
//! Canonical strings follow the xsetwacom grammar: `0` (disabled),
//! `button N`, `key <modifiers> <keys>`. Parsing additionally accepts the
//! press/release notation xsetwacom prints on `get`
//! (`key +Control_L +a -a -Control_L`) and Qt style sequences (`Ctrl+Shift+A`).
//! Key names are X keysyms and keep their case.

use std::fmt;
use std::str::FromStr;

use super::ValueError;

/// Keyboard modifier, ordered the way canonical strings list them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Super,
}

impl Modifier {
    /// Matches modifier names case-insensitively, including the left/right
    /// keysyms xsetwacom reports (`Control_L`, `Super_R`, ...)
    fn from_token(token: &str) -> Option<Modifier> {
        let lowered = token.to_ascii_lowercase();
        let name = lowered
            .strip_suffix("_l")
            .or_else(|| lowered.strip_suffix("_r"))
            .unwrap_or(&lowered);
        match name {
            "ctrl" | "control" => Some(Modifier::Ctrl),
            "alt" => Some(Modifier::Alt),
            "shift" => Some(Modifier::Shift),
            "super" | "meta" | "win" => Some(Modifier::Super),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Modifier::Ctrl => "ctrl",
            Modifier::Alt => "alt",
            Modifier::Shift => "shift",
            Modifier::Super => "super",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ButtonShortcut {
    #[default]
    Disabled,
    /// Mouse button click
    Button(u32),
    /// Key press with optional modifiers
    Keystroke {
        modifiers: Vec<Modifier>,
        keys: Vec<String>,
    },
    /// Modifiers held without another key
    Modifier(Vec<Modifier>),
}

impl ButtonShortcut {
    fn button(number: u32) -> Self {
        if number == 0 {
            ButtonShortcut::Disabled
        } else {
            ButtonShortcut::Button(number)
        }
    }

    /// `fold_letters` lowercases single-letter keys, for Qt sequences that
    /// report letters in upper case
    fn from_key_tokens<'a>(
        source: &str,
        tokens: impl Iterator<Item = &'a str>,
        fold_letters: bool,
    ) -> Result<Self, ValueError> {
        let mut modifiers = Vec::new();
        let mut keys = Vec::new();

        // "-x" marks a release event in xsetwacom output
        for token in tokens.filter(|t| !t.starts_with('-')) {
            let token = token.trim_start_matches('+');
            if token.is_empty() {
                continue;
            }
            match Modifier::from_token(token) {
                Some(modifier) => modifiers.push(modifier),
                None if fold_letters && token.chars().count() == 1 => keys.push(token.to_lowercase()),
                None => keys.push(token.to_string()),
            }
        }

        modifiers.sort();
        modifiers.dedup();
        keys.dedup();

        match (modifiers.is_empty(), keys.is_empty()) {
            (true, true) => Err(ValueError::InvalidShortcut(source.to_string())),
            (false, true) => Ok(ButtonShortcut::Modifier(modifiers)),
            _ => Ok(ButtonShortcut::Keystroke { modifiers, keys }),
        }
    }

    fn parse_button_number(source: &str, token: &str) -> Result<Self, ValueError> {
        token
            .trim_start_matches('+')
            .parse::<u32>()
            .map(Self::button)
            .map_err(|_| ValueError::InvalidShortcut(source.to_string()))
    }
}

impl FromStr for ButtonShortcut {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source = s.trim();
        if source.is_empty() {
            return Ok(ButtonShortcut::Disabled);
        }

        let mut tokens = source.split_whitespace();
        let first = tokens.next().unwrap_or_default();

        match first.to_ascii_lowercase().as_str() {
            "button" => {
                let number = tokens
                    .find(|t| !t.starts_with('-'))
                    .ok_or_else(|| ValueError::InvalidShortcut(source.to_string()))?;
                Self::parse_button_number(source, number)
            }
            "key" => Self::from_key_tokens(source, tokens, false),
            _ if source.split_whitespace().count() == 1
                && first.trim_start_matches('+').chars().all(|c| c.is_ascii_digit()) =>
            {
                Self::parse_button_number(source, first)
            }
            _ => Self::from_key_tokens(
                source,
                source.split(|c: char| c == '+' || c.is_whitespace()),
                true,
            ),
        }
    }
}

impl fmt::Display for ButtonShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonShortcut::Disabled => f.write_str("0"),
            ButtonShortcut::Button(number) => write!(f, "button {number}"),
            ButtonShortcut::Keystroke { modifiers, keys } => {
                let tokens: Vec<&str> = modifiers
                    .iter()
                    .map(|m| m.key())
                    .chain(keys.iter().map(String::as_str))
                    .collect();
                write!(f, "key {}", tokens.join(" "))
            }
            ButtonShortcut::Modifier(modifiers) => {
                let tokens: Vec<&str> = modifiers.iter().map(|m| m.key()).collect();
                write!(f, "key {}", tokens.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(input: &str) -> String {
        input.parse::<ButtonShortcut>().unwrap().to_string()
    }

    #[test]
    fn test_button_forms() {
        assert_eq!(canonical("button 3"), "button 3");
        assert_eq!(canonical("3"), "button 3");
        assert_eq!(canonical("button +1 "), "button 1");
        assert_eq!(canonical("Button +2 -2"), "button 2");
    }

    #[test]
    fn test_disabled_forms() {
        assert_eq!("".parse::<ButtonShortcut>(), Ok(ButtonShortcut::Disabled));
        assert_eq!("0".parse::<ButtonShortcut>(), Ok(ButtonShortcut::Disabled));
        assert_eq!(canonical("button 0"), "0");
    }

    #[test]
    fn test_xsetwacom_key_output() {
        assert_eq!(canonical("key +ctrl +z -z -ctrl "), "key ctrl z");
        assert_eq!(canonical("key +shift +ctrl "), "key ctrl shift");
        assert_eq!(
            canonical("key +Control_L +Shift_L +z -z -Shift_L -Control_L "),
            "key ctrl shift z"
        );
        assert_eq!(canonical("key +Super_R +Alt_L +Tab -Tab -Alt_L -Super_R"), "key alt super Tab");
        assert_eq!(canonical("key +Meta_L +F5 -F5 -Meta_L"), "key super F5");
    }

    #[test]
    fn test_qt_sequence() {
        assert_eq!(
            "Ctrl+Shift+A".parse::<ButtonShortcut>(),
            Ok(ButtonShortcut::Keystroke {
                modifiers: vec![Modifier::Ctrl, Modifier::Shift],
                keys: vec!["a".to_string()],
            })
        );
        assert_eq!(canonical("Meta+Alt"), "key alt super");
    }

    #[test]
    fn test_canonical_is_idempotent() {
        for input in [
            "key ctrl alt delete",
            "button 12",
            "key super",
            "0",
            "key f1",
            "key ctrl Return",
            "key F5",
            "key shift Page_Up",
        ] {
            let once = canonical(input);
            assert_eq!(once, input);
            assert_eq!(canonical(&once), once);
        }
    }

    #[test]
    fn test_invalid_shortcuts() {
        assert!("button".parse::<ButtonShortcut>().is_err());
        assert!("button x".parse::<ButtonShortcut>().is_err());
        assert!("key".parse::<ButtonShortcut>().is_err());
        assert!("key -a".parse::<ButtonShortcut>().is_err());
    }
}
