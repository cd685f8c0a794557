use std::fmt;
use std::str::FromStr;

/// Visual preset applied server-side when the card is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardStyle {
    /// Dark text on a white background.
    #[default]
    White,
    /// White text on the brand-green background.
    Wechat,
}

impl CardStyle {
    pub const ALL: [CardStyle; 2] = [CardStyle::White, CardStyle::Wechat];

    /// Identifier used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            CardStyle::White => "white",
            CardStyle::Wechat => "wechat",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CardStyle::White => "Minimal white",
            CardStyle::Wechat => "WeChat green",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CardStyle::White => "Dark text on a clean white background",
            CardStyle::Wechat => "White text on #07C160 green",
        }
    }
}

impl fmt::Display for CardStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown style '{}' (expected white or wechat)", self.0)
    }
}

impl std::error::Error for UnknownStyle {}

impl FromStr for CardStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CardStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStyle(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::CardStyle;

    #[test]
    fn parses_wire_names() {
        assert_eq!("white".parse::<CardStyle>(), Ok(CardStyle::White));
        assert_eq!(" WeChat ".parse::<CardStyle>(), Ok(CardStyle::Wechat));
        assert!("green".parse::<CardStyle>().is_err());
    }
}
