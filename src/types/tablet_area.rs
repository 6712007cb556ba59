//! Tablet area selection
//!
//! String form is `"x y w h"`. The empty area means "use the whole tablet" and
//! is written as the sentinel `"-1 -1 -1 -1"`.

use std::fmt;
use std::str::FromStr;

use super::{parse_integers, Rect, ValueError};

const EMPTY_SENTINEL: &str = "-1 -1 -1 -1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabletArea {
    rect: Option<Rect>,
}

impl TabletArea {
    /// Full-area marker
    pub fn empty() -> Self {
        Self { rect: None }
    }

    /// Area with the given geometry; non-positive sizes yield the empty area
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        let rect = Rect::new(x, y, width, height);
        if rect.is_empty() {
            Self::empty()
        } else {
            Self { rect: Some(rect) }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rect.is_none()
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }
}

impl FromStr for TabletArea {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::empty());
        }

        let values = parse_integers(s, 4)?;
        let mut coords = [0i32; 4];
        for (slot, (value, token)) in coords
            .iter_mut()
            .zip(values.iter().zip(s.split_whitespace()))
        {
            *slot = i32::try_from(*value).map_err(|_| ValueError::NotAnInteger(token.to_string()))?;
        }

        Ok(Self::new(coords[0], coords[1], coords[2], coords[3]))
    }
}

impl fmt::Display for TabletArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rect {
            Some(rect) => write!(f, "{} {} {} {}", rect.x, rect.y, rect.width, rect.height),
            None => f.write_str(EMPTY_SENTINEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_area() {
        let area: TabletArea = "100 200 3000 1500".parse().unwrap();
        assert_eq!(area.rect(), Some(Rect::new(100, 200, 3000, 1500)));
        assert!(!area.is_empty());
    }

    #[test]
    fn test_round_trip() {
        for area in [
            TabletArea::new(0, 0, 15200, 9500),
            TabletArea::new(-10, 5, 1, 1),
            TabletArea::new(7, 8, 640, 480),
            TabletArea::empty(),
        ] {
            assert_eq!(area.to_string().parse::<TabletArea>(), Ok(area));
        }
    }

    #[test]
    fn test_empty_forms() {
        assert!("".parse::<TabletArea>().unwrap().is_empty());
        assert!("   ".parse::<TabletArea>().unwrap().is_empty());
        assert!("-1 -1 -1 -1".parse::<TabletArea>().unwrap().is_empty());
        assert!("0 0 0 0".parse::<TabletArea>().unwrap().is_empty());
        assert_eq!(TabletArea::empty().to_string(), "-1 -1 -1 -1");
    }

    #[test]
    fn test_wrong_token_count_fails() {
        assert_eq!(
            "1 2 3".parse::<TabletArea>(),
            Err(ValueError::TokenCount { expected: 4, found: 3 })
        );
        assert_eq!(
            "1 2 3 4 5".parse::<TabletArea>(),
            Err(ValueError::TokenCount { expected: 4, found: 5 })
        );
    }

    #[test]
    fn test_non_integer_fails() {
        assert_eq!(
            "1 2 3.5 4".parse::<TabletArea>(),
            Err(ValueError::NotAnInteger("3.5".to_string()))
        );
        assert_eq!(
            "1 2 3 99999999999".parse::<TabletArea>(),
            Err(ValueError::NotAnInteger("99999999999".to_string()))
        );
    }
}
