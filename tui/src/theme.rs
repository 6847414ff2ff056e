//! Color theme and glyphs for the Taskpane TUI.
//!
//! Uses Kanagawa Wave palette by default with an optional high-contrast override.

use ratatui::style::Color;

use taskpane_engine::UiOptions;

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
    pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 42, 55); // sumiInk4
    pub const BG_BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

    pub const ACCENT: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const SUCCESS: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const WARNING: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const ERROR: Color = Color::Rgb(255, 93, 98); // peachRed
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            accent: colors::ACCENT,
            success: colors::SUCCESS,
            warning: colors::WARNING,
            error: colors::ERROR,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// Glyph set for icons and the spinner, with an ASCII fallback.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub pointer: &'static str,
    pub bullet: &'static str,
    pub spinner: &'static [&'static str],
}

impl Glyphs {
    #[must_use]
    pub fn unicode() -> Self {
        Self {
            pointer: "▸",
            bullet: "·",
            spinner: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
        }
    }

    #[must_use]
    pub fn ascii() -> Self {
        Self {
            pointer: ">",
            bullet: "-",
            spinner: &["|", "/", "-", "\\"],
        }
    }
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs::ascii()
    } else {
        Glyphs::unicode()
    }
}

/// Spinner glyph for the given frame count.
#[must_use]
pub fn spinner_frame(glyphs: &Glyphs, frame: u64) -> &'static str {
    let len = glyphs.spinner.len() as u64;
    // Advance every few frames so the spinner is legible at 120 FPS.
    glyphs.spinner[((frame / 8) % len) as usize]
}
