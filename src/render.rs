//! Software renderer -- keyboard, hand overlay, and text bar.
//!
//! Paints one frame into an ARGB buffer from a [`RenderInstruction`]:
//! the hand skeleton first, then the keyboard on top (the active key
//! in its pressed shade), the text bar, and a status line.  Flat fills
//! only; the window backend hands the finished buffer to minifb.

use crate::engine::{HandOverlay, KeySlot, RenderInstruction, Viewport, BACKSPACE, HAND_CONNECTIONS};

/// Background color (Catppuccin Mocha base: #1e1e2e).
const BG_COLOR: u32 = 0xFF1E1E2E;
/// Key face, resting.
const KEY_FACE: u32 = 0xFFD2D7DC;
/// Key face while its cooldown window is open.
const KEY_PRESSED: u32 = 0xFFA0A5AA;
const KEY_EDGE: u32 = 0xFF45475A;
const KEY_LABEL: u32 = 0xFF1E1E2E;
/// Skeleton segments between landmarks.
const BONE_COLOR: u32 = 0xFF00FFFF;
/// Landmark dots.
const JOINT_COLOR: u32 = 0xFFFFFF29;
/// Thumb-to-index line while pinching / while apart.
const PINCH_COLOR: u32 = 0xFFFF0000;
const APART_COLOR: u32 = 0xFF00FF00;
const TEXT_BAR_BG: u32 = 0xFF00008B;
const TEXT_COLOR: u32 = 0xFFF5F5F5;
const STATUS_COLOR: u32 = 0xFF9399B2;

const TEXT_BAR_HEIGHT: usize = 50;
const TEXT_SCALE: usize = 3;
const KEY_LABEL_SCALE: usize = 3;
const STATUS_SCALE: usize = 2;

/// Frame painter over a plain pixel buffer.
pub struct Painter {
    width: usize,
    height: usize,
    buf: Vec<u32>,
}

impl Painter {
    pub fn new(viewport: Viewport) -> Self {
        let width = viewport.width as usize;
        let height = viewport.height as usize;
        Self {
            width,
            height,
            buf: vec![BG_COLOR; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Finished frame, row-major ARGB.
    pub fn buffer(&self) -> &[u32] {
        &self.buf
    }

    /// Paint one frame.
    ///
    /// Layers, back to front: background, hand skeleton and fingertip
    /// markers, keyboard, text bar, status line.  The keyboard sits on
    /// top of the hand so the keys stay legible while typing.
    pub fn draw_scene(&mut self, slots: &[KeySlot], instruction: &RenderInstruction, status: &str) {
        self.buf.fill(BG_COLOR);

        if let Some(hand) = &instruction.hand {
            self.draw_hand(hand);
        }
        self.draw_keyboard(slots, instruction.active_key);
        self.draw_text_bar(&instruction.text);
        let status_y = self.height.saturating_sub(25);
        self.draw_text(status, 10, status_y, STATUS_SCALE, STATUS_COLOR);
    }

    // ── Layers ─────────────────────────────────────────────

    fn draw_hand(&mut self, hand: &HandOverlay) {
        for (a, b) in HAND_CONNECTIONS {
            let (a, b) = (a.index(), b.index());
            if let (Some(from), Some(to)) = (hand.points.get(a), hand.points.get(b)) {
                self.draw_line(from.x, from.y, to.x, to.y, BONE_COLOR);
            }
        }
        for point in &hand.points {
            self.fill_circle(point.x, point.y, 3, JOINT_COLOR);
        }
        if let Some(tips) = &hand.tips {
            let color = if tips.pinching { PINCH_COLOR } else { APART_COLOR };
            self.draw_line(tips.index.x, tips.index.y, tips.thumb.x, tips.thumb.y, color);
            self.fill_circle(tips.index.x, tips.index.y, 5, color);
            self.fill_circle(tips.thumb.x, tips.thumb.y, 5, color);
        }
    }

    fn draw_keyboard(&mut self, slots: &[KeySlot], active_key: Option<&str>) {
        for slot in slots {
            let face = if active_key == Some(slot.def.label) {
                KEY_PRESSED
            } else {
                KEY_FACE
            };
            let (x, y) = (slot.x as usize, slot.y as usize);
            let (w, h) = (slot.width as usize, slot.height as usize);
            self.fill_rect(x, y, w, h, face);
            self.draw_border(x, y, w, h, KEY_EDGE);

            let label = key_face(slot.def.label);
            let tw = text_width(label, KEY_LABEL_SCALE);
            let lx = x + w.saturating_sub(tw) / 2;
            let ly = y + h.saturating_sub(5 * KEY_LABEL_SCALE) / 2;
            self.draw_text(label, lx, ly, KEY_LABEL_SCALE, KEY_LABEL);
        }
    }

    fn draw_text_bar(&mut self, text: &str) {
        let x = 200;
        let w = 590;
        // Anchored above the bottom edge; pinned to the top on surfaces
        // shorter than the anchor offset
        let y = self.height.saturating_sub(100);
        self.fill_rect(x, y, w, TEXT_BAR_HEIGHT, TEXT_BAR_BG);
        self.draw_border(x, y, w, TEXT_BAR_HEIGHT, KEY_EDGE);

        // Show the tail when the text outgrows the bar
        let pad = 12;
        let max_chars = (w - 2 * pad) / (4 * TEXT_SCALE);
        let count = text.chars().count();
        let tail: String = text.chars().skip(count.saturating_sub(max_chars)).collect();
        let ty = y + (TEXT_BAR_HEIGHT - 5 * TEXT_SCALE) / 2;
        self.draw_text(&tail, x + pad, ty, TEXT_SCALE, TEXT_COLOR);
    }

    // ── Primitives ─────────────────────────────────────────

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 {
            return;
        }
        for col in x..(x + w).min(self.width) {
            if y < self.height {
                self.buf[y * self.width + col] = color;
            }
            if y + h - 1 < self.height {
                self.buf[(y + h - 1) * self.width + col] = color;
            }
        }
        for row in y..(y + h).min(self.height) {
            if x < self.width {
                self.buf[row * self.width + x] = color;
            }
            if x + w - 1 < self.width {
                self.buf[row * self.width + x + w - 1] = color;
            }
        }
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: u32) {
        let (mut x0, mut y0) = (x0.round() as isize, y0.round() as isize);
        let (x1, y1) = (x1.round() as isize, y1.round() as isize);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: isize, color: u32) {
        let (cx, cy) = (cx.round() as isize, cy.round() as isize);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bitmap text, 3×5 glyphs scaled up by `scale`.
    fn draw_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx >= self.width {
                break;
            }
        }
    }
}

/// What gets printed on a key cap.  BACKSPACE is abbreviated to fit a
/// normal-width key.
pub fn key_face(label: &'static str) -> &'static str {
    if label == BACKSPACE {
        "BS"
    } else {
        label
    }
}

fn text_width(text: &str, scale: usize) -> usize {
    let count = text.chars().count();
    if count == 0 {
        0
    } else {
        count * 4 * scale - scale
    }
}

// ── 3×5 bitmap font ────────────────────────────────────────

const GLYPH_FALLBACK: [u8; 5] = [0b000, 0b000, 0b010, 0b000, 0b000];

/// 3×5 glyphs, one row per byte, high bit left.  Covers every label
/// on the layout plus what the status line needs.
fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        ';' => [0b000, 0b010, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '|' => [0b010, 0b010, 0b010, 0b010, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => GLYPH_FALLBACK,
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        key_slots, DisplayPoint, HandOverlay, LayoutParams, TipPair, KEY_ROWS, SPACE,
    };

    fn make_instruction(active_key: Option<&'static str>, text: &str) -> RenderInstruction {
        RenderInstruction {
            active_key,
            text: text.to_string(),
            hand: None,
        }
    }

    #[test]
    fn test_every_layout_label_has_glyphs() {
        for label in KEY_ROWS.iter().flat_map(|row| row.iter()) {
            for ch in key_face(label).chars() {
                assert_ne!(
                    char_glyph(ch),
                    GLYPH_FALLBACK,
                    "no glyph for {:?} on key {}",
                    ch,
                    label
                );
            }
        }
    }

    #[test]
    fn test_key_face_abbreviations() {
        assert_eq!(key_face(BACKSPACE), "BS");
        assert_eq!(key_face(SPACE), "SPACE");
        assert_eq!(key_face("A"), "A");
    }

    #[test]
    fn test_scene_paints_full_buffer() {
        let mut painter = Painter::new(Viewport::default());
        let slots = key_slots(&LayoutParams::default());
        painter.draw_scene(&slots, &make_instruction(None, "HI"), "status");
        assert_eq!(painter.buffer().len(), 960 * 540);
    }

    #[test]
    fn test_scene_paints_at_small_viewports() {
        let slots = key_slots(&LayoutParams::default());
        // A surface shorter than the bottom-anchored bar and status
        // offsets, and one that clips the keyboard mid-key
        for (w, h) in [(300.0, 80.0), (640.0, 360.0)] {
            let mut painter = Painter::new(Viewport::new(w, h));
            painter.draw_scene(&slots, &make_instruction(Some("Q"), "HI"), "status");
            assert_eq!(
                painter.buffer().len(),
                (w as usize) * (h as usize),
                "buffer size at {}x{}",
                w,
                h
            );
        }
    }

    #[test]
    fn test_active_key_changes_its_face() {
        let slots = key_slots(&LayoutParams::default());
        let q = slots.iter().find(|s| s.def.label == "Q").unwrap();
        let (cx, cy) = q.center();
        // Off-center so the label glyphs cannot cover the probe
        let probe = (cy as usize + 20) * 960 + cx as usize;

        let mut resting = Painter::new(Viewport::default());
        resting.draw_scene(&slots, &make_instruction(None, ""), "");
        assert_eq!(resting.buffer()[probe], KEY_FACE);

        let mut pressed = Painter::new(Viewport::default());
        pressed.draw_scene(&slots, &make_instruction(Some("Q"), ""), "");
        assert_eq!(pressed.buffer()[probe], KEY_PRESSED);
    }

    #[test]
    fn test_text_reaches_the_bar() {
        let slots = key_slots(&LayoutParams::default());
        let mut painter = Painter::new(Viewport::default());
        painter.draw_scene(&slots, &make_instruction(None, "HI"), "");
        let hit = painter
            .buffer()
            .iter()
            .any(|&pixel| pixel == TEXT_COLOR);
        assert!(hit, "no text pixels in the frame");
    }

    #[test]
    fn test_out_of_bounds_overlay_is_safe() {
        let slots = key_slots(&LayoutParams::default());
        let mut painter = Painter::new(Viewport::default());

        // Overlay with points far outside the buffer, as a tracker
        // glitch could produce
        let points = vec![
            DisplayPoint::new(-500.0, -500.0),
            DisplayPoint::new(5000.0, 5000.0),
            DisplayPoint::new(100.0, 100.0),
        ];
        let hand = HandOverlay {
            points,
            tips: Some(TipPair {
                index: DisplayPoint::new(-50.0, 700.0),
                thumb: DisplayPoint::new(1200.0, -10.0),
                pinching: true,
            }),
        };
        let instruction = RenderInstruction {
            active_key: None,
            text: String::new(),
            hand: Some(hand),
        };
        painter.draw_scene(&slots, &instruction, "status");
    }

    #[test]
    fn test_long_text_shows_the_tail() {
        let slots = key_slots(&LayoutParams::default());
        let long: String = std::iter::repeat('W').take(200).collect();
        let mut painter = Painter::new(Viewport::default());
        // Must not paint outside the bar no matter the length
        painter.draw_scene(&slots, &make_instruction(None, &long), "");
    }
}
