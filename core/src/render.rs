use alloc::string::String;
use alloc::vec::Vec;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::GameKind;

bitflags! {
    /// Presentation hints for a single cell; the web layer maps each flag to a CSS class.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CellStyle: u16 {
        const ENABLED   = 1;
        const PLAYER    = 1 << 1;
        const OPPONENT  = 1 << 2;
        const FLIPPED   = 1 << 3;
        const MATCHED   = 1 << 4;
        const HIGHLIGHT = 1 << 5;
        const LIVE      = 1 << 6;
        const WAITING   = 1 << 7;
        const SWATCH    = 1 << 8;
    }
}

impl CellStyle {
    pub fn class_names(self) -> impl Iterator<Item = &'static str> {
        self.iter_names().map(|(name, _)| match name {
            "ENABLED" => "enabled",
            "PLAYER" => "player",
            "OPPONENT" => "opponent",
            "FLIPPED" => "flipped",
            "MATCHED" => "matched",
            "HIGHLIGHT" => "highlight",
            "LIVE" => "live",
            "WAITING" => "waiting",
            "SWATCH" => "swatch",
            _ => "",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellFrame {
    pub label: String,
    /// CSS colour for swatch cells.
    pub swatch: Option<&'static str>,
    pub style: CellStyle,
}

impl CellFrame {
    pub fn new(label: impl Into<String>, style: CellStyle) -> Self {
        Self {
            label: label.into(),
            swatch: None,
            style,
        }
    }

    pub fn with_swatch(mut self, swatch: &'static str) -> Self {
        self.swatch = Some(swatch);
        self.style |= CellStyle::SWATCH;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.style.contains(CellStyle::ENABLED)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Action {
    pub label: &'static str,
    pub enabled: bool,
}

/// Everything the presentation layer needs to draw one game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub kind: GameKind,
    pub headline: String,
    pub detail: Option<String>,
    pub columns: u8,
    pub cells: Vec<CellFrame>,
    /// Placeholder text of the text-entry slot, if the game takes typed input right now.
    pub text_entry: Option<&'static str>,
    pub primary: Option<Action>,
}

impl Frame {
    pub fn new(kind: GameKind, headline: impl Into<String>) -> Self {
        Self {
            kind,
            headline: headline.into(),
            detail: None,
            columns: 0,
            cells: Vec::new(),
            text_entry: None,
            primary: None,
        }
    }

    pub const fn mount_id(&self) -> &'static str {
        self.kind.container_id()
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_grid(mut self, columns: u8, cells: Vec<CellFrame>) -> Self {
        self.columns = columns;
        self.cells = cells;
        self
    }

    pub fn with_text_entry(mut self, placeholder: &'static str) -> Self {
        self.text_entry = Some(placeholder);
        self
    }

    pub fn with_primary(mut self, label: &'static str, enabled: bool) -> Self {
        self.primary = Some(Action { label, enabled });
        self
    }

    /// Cells grouped into display rows.
    pub fn rows(&self) -> impl Iterator<Item = &[CellFrame]> {
        self.cells.chunks(usize::from(self.columns.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn class_names_follow_flags() {
        let style = CellStyle::ENABLED | CellStyle::HIGHLIGHT;
        let names: Vec<_> = style.class_names().collect();
        assert_eq!(names, vec!["enabled", "highlight"]);
    }

    #[test]
    fn rows_chunk_by_columns() {
        let cells = (0..6)
            .map(|_| CellFrame::new("", CellStyle::empty()))
            .collect();
        let frame = Frame::new(GameKind::Memory, "").with_grid(3, cells);
        assert_eq!(frame.rows().count(), 2);
        assert_eq!(frame.mount_id(), "memory-game");
    }

    #[test]
    fn swatch_sets_style_flag() {
        let cell = CellFrame::new("Red", CellStyle::ENABLED).with_swatch("#e74c3c");
        assert!(cell.style.contains(CellStyle::SWATCH));
        assert!(cell.is_enabled());
    }
}
