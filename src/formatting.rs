use crate::theme::{Palette, Theme};
use yansi::Paint;

/// Formatting context passed through the rendering pipeline.
pub struct FormatContext {
    pub use_color: bool,
    pub palette: &'static Palette,
}

impl FormatContext {
    pub fn new(use_color: bool, theme: Theme) -> Self {
        Self { use_color, palette: theme.palette() }
    }

    fn rgb(&self, key: &str) -> (u8, u8, u8) {
        self.palette.rgb(key).unwrap_or((0, 0, 0))
    }

    fn card_bg(&self, pressed: bool) -> (u8, u8, u8) {
        self.rgb(if pressed { "card_pressed" } else { "card" })
    }

    pub fn format_header(&self, text: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let (r, g, b) = self.rgb("text");
        let (br, bg, bb) = self.rgb("header");
        Paint::rgb(text, r, g, b).on_rgb(br, bg, bb).bold().to_string()
    }

    pub fn format_title(&self, text: &str, pressed: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let (r, g, b) = self.rgb("text");
        let (br, bg, bb) = self.card_bg(pressed);
        Paint::rgb(text, r, g, b).on_rgb(br, bg, bb).bold().to_string()
    }

    pub fn format_body(&self, text: &str, pressed: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let (r, g, b) = self.rgb("text");
        let (br, bg, bb) = self.card_bg(pressed);
        Paint::rgb(text, r, g, b).on_rgb(br, bg, bb).to_string()
    }

    /// Secondary card text such as the date footer.
    pub fn format_muted(&self, text: &str, pressed: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let (r, g, b) = self.rgb("text");
        let (br, bg, bb) = self.card_bg(pressed);
        Paint::rgb(text, r, g, b).on_rgb(br, bg, bb).dim().to_string()
    }

    pub fn format_border(&self, text: &str, selected: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let (r, g, b) = self.rgb(if selected { "primary" } else { "border" });
        Paint::rgb(text, r, g, b).to_string()
    }

    pub fn format_check(&self, text: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let (r, g, b) = self.rgb("secondary");
        let (br, bg, bb) = self.card_bg(true);
        Paint::rgb(text, r, g, b).on_rgb(br, bg, bb).bold().to_string()
    }

    pub fn format_action(&self, text: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let (r, g, b) = self.rgb("primary");
        Paint::rgb(text, r, g, b).bold().to_string()
    }

    /// Show a hex value next to a swatch of its color.
    pub fn format_swatch(&self, hex: &str) -> String {
        if !self.use_color {
            return hex.to_string();
        }
        match crate::theme::hex_to_rgb(hex) {
            Some((r, g, b)) => format!("{} {hex}", Paint::on_rgb("  ", r, g, b)),
            None => hex.to_string(),
        }
    }

    pub fn format_warning(&self, text: &str) -> String {
        if self.use_color {
            Paint::yellow(text).bold().to_string()
        } else {
            text.to_string()
        }
    }
}
