//! Console color theme
//!
//! The theme is a plain value owned by the console and passed down to every
//! function that prints. There is no global theme state.

use colored::Color;

/// Color palette for console output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Switch to the other palette
    pub fn toggle(&mut self) {
        *self = match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Headings, banner chrome, status lines
    pub fn accent(&self) -> Color {
        match self {
            Theme::Dark => Color::BrightCyan,
            Theme::Light => Color::Blue,
        }
    }

    /// Prompt label
    pub fn prompt(&self) -> Color {
        match self {
            Theme::Dark => Color::BrightGreen,
            Theme::Light => Color::Green,
        }
    }

    /// Alert lines
    pub fn error(&self) -> Color {
        match self {
            Theme::Dark => Color::BrightRed,
            Theme::Light => Color::Red,
        }
    }

    /// Completion messages
    pub fn success(&self) -> Color {
        match self {
            Theme::Dark => Color::BrightGreen,
            Theme::Light => Color::Green,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_the_two_palettes() {
        let mut theme = Theme::default();
        assert_eq!(theme, Theme::Dark);

        theme.toggle();
        assert_eq!(theme, Theme::Light);
        assert_eq!(theme.name(), "light");

        theme.toggle();
        assert_eq!(theme, Theme::Dark);
    }

    #[test]
    fn palettes_differ_where_it_matters() {
        assert_ne!(Theme::Dark.accent(), Theme::Light.accent());
        assert_ne!(Theme::Dark.prompt(), Theme::Light.prompt());
    }
}
