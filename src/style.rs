use iced::Color;

/// Colours for every view, passed down from the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    // Background colors
    pub bg_dark: Color,
    pub bg_card: Color,
    pub overlay: Color,

    // Stroke/border colors
    pub stroke_dim: Color,

    // Accent colors
    pub accent_blue: Color,
    pub accent_green: Color,
    pub accent_orange: Color,
    pub accent_red: Color,

    // Text colors
    pub text_bright: Color,
    pub text_muted: Color,

    // Availability gradient
    pub avail_low: Color,
    pub avail_mid: Color,
    pub avail_high: Color,
    pub avail_unknown: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        bg_dark: Color::from_rgb(0.04, 0.04, 0.06),
        bg_card: Color::from_rgb(0.09, 0.11, 0.15),
        overlay: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
        stroke_dim: Color::from_rgb(0.2, 0.22, 0.28),
        accent_blue: Color::from_rgb(0.17, 0.17, 0.91),
        accent_green: Color::from_rgb(0.2, 0.85, 0.5),
        accent_orange: Color::from_rgb(1.0, 0.6, 0.2),
        accent_red: Color::from_rgb(1.0, 0.35, 0.35),
        text_bright: Color::from_rgb(0.96, 0.97, 0.99),
        text_muted: Color::from_rgb(0.6, 0.63, 0.7),
        avail_low: Color::from_rgb(1.0, 70.0 / 255.0, 70.0 / 255.0),
        avail_mid: Color::from_rgb(1.0, 200.0 / 255.0, 60.0 / 255.0),
        avail_high: Color::from_rgb(60.0 / 255.0, 190.0 / 255.0, 90.0 / 255.0),
        avail_unknown: Color::from_rgb(0.93, 0.93, 0.93),
    };
}

impl Default for Palette {
    fn default() -> Self {
        Palette::DARK
    }
}
