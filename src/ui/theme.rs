use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Terminal styles, one per role in the tracker's output
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub label: Style,
    pub accent: Style,
    pub muted: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    /// Counts that went up since the previous sample
    pub rising: Style,
    /// Counts that went down
    pub falling: Style,
}

impl Theme {
    /// Pick colors from the environment.
    ///
    /// `console` covers `CLICOLOR`/`CLICOLOR_FORCE` and the stdout tty check;
    /// `NO_COLOR` always wins.
    pub fn detect() -> Self {
        let wants_color = console::colors_enabled() && std::env::var_os("NO_COLOR").is_none();
        if wants_color { Self::colored() } else { Self::plain() }
    }

    pub fn colored() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().white().dimmed(),
            accent: Style::new().magenta(),
            muted: Style::new().bright_black(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            rising: Style::new().green(),
            falling: Style::new().red(),
        }
    }

    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            title: none,
            label: none,
            accent: none,
            muted: none,
            success: none,
            error: none,
            warn: none,
            rising: none,
            falling: none,
        }
    }

    /// Style for a signed change in a count
    pub fn delta(&self, value: i64) -> Style {
        match value.signum() {
            1 => self.rising,
            -1 => self.falling,
            _ => self.label,
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_plain_theme_adds_no_escapes() {
        let plain = Theme::plain();
        assert_eq!("+50".style(plain.delta(50)).to_string(), "+50");
        assert_eq!("title".style(plain.title).to_string(), "title");
    }

    #[test]
    fn test_delta_style_follows_sign() {
        let colored = Theme::colored();
        let up = "+1".style(colored.delta(1)).to_string();
        let down = "-1".style(colored.delta(-1)).to_string();
        assert_ne!(up, down);
        assert_eq!(up, "+1".style(colored.rising).to_string());
    }
}
