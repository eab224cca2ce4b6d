use iced::widget::{button, container, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

// Zen Theme Colors
pub const ZEN_BG: Color = Color::from_rgb(0.992, 0.988, 0.973); // #FDFCF8
pub const ZEN_SURFACE: Color = Color::from_rgb(0.949, 0.937, 0.914); // #F2EFE9
pub const ZEN_TEXT: Color = Color::from_rgb(0.29, 0.29, 0.29); // #4A4A4A
pub const ZEN_SUBTEXT: Color = Color::from_rgb(0.55, 0.55, 0.55); // #8C8C8C
pub const ZEN_ACCENT: Color = Color::from_rgb(0.545, 0.616, 0.467); // #8B9D77 (Sage)
pub const ZEN_ACCENT_HOVER: Color = Color::from_rgb(0.49, 0.56, 0.41);
pub const ZEN_ACCENT_TINT: Color = Color::from_rgba(0.545, 0.616, 0.467, 0.15);
pub const ZEN_DESTRUCTIVE: Color = Color::from_rgb(0.831, 0.647, 0.647); // #D4A5A5

const SOFT_BORDER: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.05);

fn rounded(radius: f32) -> Border {
    Border {
        radius: radius.into(),
        ..Default::default()
    }
}

/// Parses `#RRGGBB` category colors. Anything else yields `None`.
pub fn hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
}

/// Button looks used across the console.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonStyle {
    Nav { active: bool },
    Primary,
    Secondary,
    Destructive,
}

impl button::StyleSheet for ButtonStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        match self {
            ButtonStyle::Nav { active: true } => button::Appearance {
                background: Some(Background::Color(Color::WHITE)),
                text_color: ZEN_ACCENT,
                border: rounded(6.0),
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
                    offset: Vector::new(0.0, 1.0),
                    blur_radius: 2.0,
                },
                ..Default::default()
            },
            ButtonStyle::Nav { active: false } => button::Appearance {
                background: None,
                text_color: ZEN_SUBTEXT,
                ..Default::default()
            },
            ButtonStyle::Primary => button::Appearance {
                background: Some(Background::Color(ZEN_ACCENT)),
                text_color: Color::WHITE,
                border: rounded(6.0),
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.1),
                    offset: Vector::new(0.0, 2.0),
                    blur_radius: 4.0,
                },
                ..Default::default()
            },
            ButtonStyle::Secondary => button::Appearance {
                background: Some(Background::Color(Color::WHITE)),
                text_color: ZEN_TEXT,
                border: Border {
                    radius: 6.0.into(),
                    width: 1.0,
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.1),
                },
                ..Default::default()
            },
            ButtonStyle::Destructive => button::Appearance {
                background: None,
                text_color: ZEN_DESTRUCTIVE,
                border: Border {
                    radius: 6.0.into(),
                    width: 1.0,
                    color: ZEN_DESTRUCTIVE,
                },
                ..Default::default()
            },
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let base = self.active(style);
        match self {
            ButtonStyle::Nav { active: false } => button::Appearance {
                background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.03))),
                text_color: ZEN_TEXT,
                border: rounded(6.0),
                ..base
            },
            ButtonStyle::Primary => button::Appearance {
                background: Some(Background::Color(ZEN_ACCENT_HOVER)),
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.15),
                    offset: Vector::new(0.0, 3.0),
                    blur_radius: 5.0,
                },
                ..base
            },
            ButtonStyle::Secondary => button::Appearance {
                background: Some(Background::Color(ZEN_SURFACE)),
                ..base
            },
            ButtonStyle::Destructive => button::Appearance {
                background: Some(Background::Color(ZEN_DESTRUCTIVE)),
                text_color: Color::WHITE,
                ..base
            },
            ButtonStyle::Nav { active: true } => base,
        }
    }

    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        match self {
            ButtonStyle::Primary | ButtonStyle::Secondary => button::Appearance {
                background: Some(Background::Color(Color::from_rgb(0.8, 0.8, 0.8))),
                text_color: Color::from_rgb(0.5, 0.5, 0.5),
                border: rounded(6.0),
                ..Default::default()
            },
            _ => self.active(style),
        }
    }
}

/// Container looks: page chrome, cards, and schedule grid cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelStyle {
    Background,
    Sidebar,
    Card,
    /// Card of a selected session
    SelectedCard,
    /// Modal-like batch edit panel
    Dialog,
    /// Start cell of a placed session, tinted with its category color
    GridCell(Color),
    /// Grid position taken by a session that starts in an earlier row
    GridCovered,
    GridEmpty,
    Badge(Color),
}

impl container::StyleSheet for PanelStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        match *self {
            PanelStyle::Background => container::Appearance {
                background: Some(Background::Color(ZEN_BG)),
                ..Default::default()
            },
            PanelStyle::Sidebar => container::Appearance {
                background: Some(Background::Color(ZEN_SURFACE)),
                border: Border {
                    width: 1.0,
                    color: SOFT_BORDER,
                    ..Default::default()
                },
                ..Default::default()
            },
            PanelStyle::Card | PanelStyle::SelectedCard | PanelStyle::Dialog => {
                let border_color = match self {
                    PanelStyle::SelectedCard | PanelStyle::Dialog => ZEN_ACCENT,
                    _ => Color::from_rgba(0.0, 0.0, 0.0, 0.03),
                };
                container::Appearance {
                    background: Some(Background::Color(Color::WHITE)),
                    border: Border {
                        radius: 8.0.into(),
                        width: 1.0,
                        color: border_color,
                    },
                    shadow: Shadow {
                        color: Color::from_rgba(0.0, 0.0, 0.0, 0.02),
                        offset: Vector::new(0.0, 2.0),
                        blur_radius: 4.0,
                    },
                    ..Default::default()
                }
            }
            PanelStyle::GridCell(color) => container::Appearance {
                background: Some(Background::Color(Color { a: 0.18, ..color })),
                text_color: Some(ZEN_TEXT),
                border: Border {
                    radius: 4.0.into(),
                    width: 1.0,
                    color,
                },
                ..Default::default()
            },
            PanelStyle::GridCovered => container::Appearance {
                background: Some(Background::Color(ZEN_ACCENT_TINT)),
                border: rounded(4.0),
                ..Default::default()
            },
            PanelStyle::GridEmpty => container::Appearance {
                border: Border {
                    radius: 4.0.into(),
                    width: 1.0,
                    color: SOFT_BORDER,
                },
                ..Default::default()
            },
            PanelStyle::Badge(color) => container::Appearance {
                background: Some(Background::Color(Color { a: 0.2, ..color })),
                text_color: Some(color),
                border: rounded(10.0),
                ..Default::default()
            },
        }
    }
}

pub struct InputStyle;
impl text_input::StyleSheet for InputStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(Color::WHITE),
            border: Border {
                radius: 6.0.into(),
                width: 1.0,
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.1),
            },
            icon_color: ZEN_SUBTEXT,
        }
    }
    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            border: Border {
                radius: 6.0.into(),
                width: 1.0,
                color: ZEN_ACCENT,
            },
            icon_color: ZEN_ACCENT,
            ..self.active(style)
        }
    }
    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.0, 0.0, 0.0, 0.3)
    }
    fn value_color(&self, _style: &Self::Style) -> Color {
        ZEN_TEXT
    }
    fn disabled_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.0, 0.0, 0.0, 0.3)
    }
    fn selection_color(&self, _style: &Self::Style) -> Color {
        ZEN_ACCENT_TINT
    }
    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        self.active(style)
    }
}

// Shorthands for the `style(..)` call sites.

pub fn button_style(style: ButtonStyle) -> iced::theme::Button {
    iced::theme::Button::Custom(Box::new(style))
}

pub fn panel(style: PanelStyle) -> iced::theme::Container {
    iced::theme::Container::Custom(Box::new(style))
}

pub fn input() -> iced::theme::TextInput {
    iced::theme::TextInput::Custom(Box::new(InputStyle))
}
