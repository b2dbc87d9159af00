//! Static keyboard layout and key geometry.
//!
//! Four rows of labels plus the constants that place them on the
//! display surface.  Geometry is a pure function of the constants;
//! nothing here is stateful.

// ── Key rows ───────────────────────────────────────────────

/// The key labels, row-major.  Row 3 holds only BACKSPACE and the wide
/// SPACE bar.
pub const KEY_ROWS: [&[&str]; 4] = [
    &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L", ";"],
    &["Z", "X", "C", "V", "B", "N", "M", ",", ".", "/"],
    &["BACKSPACE", "SPACE"],
];

/// Label of the backspace key.
pub const BACKSPACE: &str = "BACKSPACE";
/// Label of the space bar.
pub const SPACE: &str = "SPACE";

// ── Definitions ────────────────────────────────────────────

/// Width class of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWidth {
    Normal,
    /// The space bar, several key widths across.
    Wide,
}

/// One key of the layout, before geometry is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyDef {
    pub label: &'static str,
    pub row: usize,
    pub column: usize,
    pub width: KeyWidth,
}

/// Layout constants, in display pixels.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    /// Side length of a normal key.
    pub key_size: f32,
    /// Distance between key origins, both axes.
    pub pitch: f32,
    /// Top-left corner of the keyboard on the display.
    pub origin_x: f32,
    pub origin_y: f32,
    /// Wide-key width as a multiple of `key_size`.
    pub wide_factor: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            key_size: 50.0,
            pitch: 60.0,
            origin_x: 200.0,
            origin_y: 100.0,
            wide_factor: 4.0,
        }
    }
}

// ── Derived geometry ───────────────────────────────────────

/// A key with its bounding box resolved to display pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeySlot {
    pub def: KeyDef,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl KeySlot {
    /// Center of the key face.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether a display point falls inside the bounding box
    /// (edges inclusive).
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Compute the slot geometry for every key, row-major.
pub fn key_slots(params: &LayoutParams) -> Vec<KeySlot> {
    let mut slots = Vec::new();
    for (row, labels) in KEY_ROWS.iter().enumerate() {
        for (column, &label) in labels.iter().enumerate() {
            let width_class = if label == SPACE {
                KeyWidth::Wide
            } else {
                KeyWidth::Normal
            };
            let width = match width_class {
                KeyWidth::Normal => params.key_size,
                KeyWidth::Wide => params.key_size * params.wide_factor,
            };
            slots.push(KeySlot {
                def: KeyDef {
                    label,
                    row,
                    column,
                    width: width_class,
                },
                x: params.origin_x + column as f32 * params.pitch,
                y: params.origin_y + row as f32 * params.pitch,
                width,
                height: params.key_size,
            });
        }
    }
    slots
}

// ── Tests ──────────────────────────────────────────────────
