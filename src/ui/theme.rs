use ratatui::style::Color;

use crate::calendar::Category;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub today: Color,
    pub weekday_header: Color,
    pub muted: Color,
    pub status_bar: Color,
    pub help_section: Color,
    pub error: Color,
    pub success: Color,
    pub work: Color,
    pub personal: Color,
    pub other: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            today: Color::Green,
            weekday_header: Color::Yellow,
            muted: Color::DarkGray,
            status_bar: Color::White,
            help_section: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            work: Color::Rgb(0x4C, 0xAF, 0x50),
            personal: Color::Rgb(0xFF, 0x98, 0x00),
            other: Color::Rgb(0x21, 0x96, 0xF3),
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(235, 219, 178),
            today: Color::Rgb(184, 187, 38),
            weekday_header: Color::Rgb(254, 128, 25),
            muted: Color::Rgb(146, 131, 116),
            status_bar: Color::Rgb(235, 219, 178),
            help_section: Color::Rgb(254, 128, 25),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
            work: Color::Rgb(142, 192, 124),
            personal: Color::Rgb(250, 189, 47),
            other: Color::Rgb(131, 165, 152),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            selected_bg: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(236, 239, 244),
            today: Color::Rgb(163, 190, 140),
            weekday_header: Color::Rgb(235, 203, 139),
            muted: Color::Rgb(76, 86, 106),
            status_bar: Color::Rgb(216, 222, 233),
            help_section: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
            work: Color::Rgb(163, 190, 140),
            personal: Color::Rgb(208, 135, 112),
            other: Color::Rgb(129, 161, 193),
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            title: Color::Rgb(139, 233, 253),
            selected_bg: Color::Rgb(68, 71, 90),
            selected_fg: Color::Rgb(248, 248, 242),
            today: Color::Rgb(80, 250, 123),
            weekday_header: Color::Rgb(241, 250, 140),
            muted: Color::Rgb(98, 114, 164),
            status_bar: Color::Rgb(248, 248, 242),
            help_section: Color::Rgb(241, 250, 140),
            error: Color::Rgb(255, 85, 85),
            success: Color::Rgb(80, 250, 123),
            work: Color::Rgb(80, 250, 123),
            personal: Color::Rgb(255, 184, 108),
            other: Color::Rgb(189, 147, 249),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            "dracula" => Self::dracula(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord", "dracula"]
    }

    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Work => self.work,
            Category::Personal => self.personal,
            Category::Other => self.other,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
