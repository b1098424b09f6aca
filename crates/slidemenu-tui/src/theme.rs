use ratatui::style::Color;

/// Runtime theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Action surface
    pub read_button: Color,
    pub top_button: Color,
    pub delete_button: Color,
    pub button_fg: Color,

    // Semantic colors
    pub selection: Color,
    pub unread: Color,
    pub pinned: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            read_button: Color::Rgb(0x7c, 0x6f, 0x64),
            top_button: Color::Rgb(0xe7, 0x8a, 0x4e),
            delete_button: Color::Rgb(0xea, 0x69, 0x62),
            button_fg: Color::Rgb(0x28, 0x28, 0x28),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
            unread: Color::Rgb(0xd8, 0xa6, 0x57),
            pinned: Color::Rgb(0x89, 0xb4, 0x82),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }
}

impl Theme {
    /// Background of an action button
    pub fn action_color(&self, kind: slidemenu_core::ActionKind) -> Color {
        match kind {
            slidemenu_core::ActionKind::Read => self.read_button,
            slidemenu_core::ActionKind::Top => self.top_button,
            slidemenu_core::ActionKind::Delete => self.delete_button,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidemenu_core::ActionKind;

    #[test]
    fn test_action_buttons_have_distinct_colors() {
        let theme = Theme::default();
        let colors: Vec<Color> = ActionKind::ALL.iter().map(|&kind| theme.action_color(kind)).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
        assert!(colors.iter().all(|&color| color != theme.button_fg));
    }
}
