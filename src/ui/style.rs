/// Colors and container styles shared by the dashboard widgets

use iced::widget::container;
use iced::{Background, Border, Color, Theme};

pub const ACCENT: Color = Color::from_rgb(0.22, 0.74, 0.97);
pub const MUTED: Color = Color::from_rgb(0.58, 0.64, 0.72);
pub const ERROR: Color = Color::from_rgb(0.94, 0.27, 0.27);

/// Scale a color's alpha by `opacity`
pub fn faded(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity.clamp(0.0, 1.0),
        ..color
    }
}

/// Card surface, faded by the entrance animation
pub fn card(theme: &Theme, opacity: f32) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(faded(palette.background.weak.color, opacity))),
        border: Border {
            radius: 12.0.into(),
            width: 1.0,
            color: faded(palette.background.strong.color, opacity),
        },
        ..container::Style::default()
    }
}

/// Dark box behind "Loading..." / "Camera Offline"
pub fn placeholder(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgb(0.08, 0.09, 0.11))),
        text_color: Some(MUTED),
        ..container::Style::default()
    }
}

/// Full-window dimmed backdrop behind the viewer
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: 0.85,
            ..Color::BLACK
        })),
        ..container::Style::default()
    }
}

/// Viewer panel
pub fn modal(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        border: Border {
            radius: 16.0.into(),
            width: 1.0,
            color: palette.background.strong.color,
        },
        ..container::Style::default()
    }
}
