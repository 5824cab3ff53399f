use crate::config::PopoutSettings;

/// Pixels per terminal column when mapping window geometry onto cells.
pub const PX_PER_COL: u32 = 10;
/// Pixels per terminal row.
pub const PX_PER_ROW: u32 = 25;

/// What the opener asks for: a named target with fixed size, anchored to the
/// bottom-right of the screen, with no chrome besides resizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub target: String,
    pub width: u32,
    pub height: u32,
    /// Gap kept between the window and the bottom edge of the screen.
    pub bottom_margin: u32,
}

impl Default for OpenRequest {
    fn default() -> Self {
        Self {
            target: "MusicPlayerPopout".to_string(),
            width: 400,
            height: 500,
            bottom_margin: 100,
        }
    }
}

impl OpenRequest {
    pub fn from_settings(settings: &PopoutSettings) -> Self {
        Self {
            target: settings.target.clone(),
            width: settings.width,
            height: settings.height,
            bottom_margin: settings.bottom_margin,
        }
    }

    /// `(left, top)` for a screen of the given size, never negative.
    pub fn placement(&self, screen_width: u32, screen_height: u32) -> (u32, u32) {
        let left = screen_width.saturating_sub(self.width);
        let top = screen_height
            .saturating_sub(self.height)
            .saturating_sub(self.bottom_margin);
        (left, top)
    }

    /// Window features in `window.open` form.
    pub fn features(&self, screen_width: u32, screen_height: u32) -> String {
        let (left, top) = self.placement(screen_width, screen_height);
        format!(
            "width={},height={},left={},top={},resizable=yes,scrollbars=no,status=no,location=no,menubar=no,toolbar=no",
            self.width, self.height, left, top
        )
    }

    /// Requested size in terminal cells `(columns, rows)`.
    pub fn cells(&self) -> (u16, u16) {
        let cols = (self.width / PX_PER_COL).min(u32::from(u16::MAX));
        let rows = (self.height / PX_PER_ROW).min(u32::from(u16::MAX));
        (cols as u16, rows as u16)
    }
}
