//! Hand landmark data model.
//!
//! A tracked hand arrives as 21 normalized points per frame, indexed by
//! the MediaPipe Hands convention (0 = wrist .. 20 = pinky tip).  The
//! engine only reads two of them (thumb tip and index tip), but the full
//! set plus the skeleton connection table is kept for the renderer.

// ── Landmark indices ───────────────────────────────────────

/// Number of landmarks per tracked hand.
pub const LANDMARK_COUNT: usize = 21;

/// Named landmark indices, following the MediaPipe Hands model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkId {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    /// Tip of the thumb (index 4) — one half of the pinch pair.
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    /// Tip of the index finger (index 8) — the pointer and the other
    /// half of the pinch pair.
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl LandmarkId {
    /// Index of this landmark in a hand frame.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse a frame index back to a landmark id.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Wrist),
            1 => Some(Self::ThumbCmc),
            2 => Some(Self::ThumbMcp),
            3 => Some(Self::ThumbIp),
            4 => Some(Self::ThumbTip),
            5 => Some(Self::IndexMcp),
            6 => Some(Self::IndexPip),
            7 => Some(Self::IndexDip),
            8 => Some(Self::IndexTip),
            9 => Some(Self::MiddleMcp),
            10 => Some(Self::MiddlePip),
            11 => Some(Self::MiddleDip),
            12 => Some(Self::MiddleTip),
            13 => Some(Self::RingMcp),
            14 => Some(Self::RingPip),
            15 => Some(Self::RingDip),
            16 => Some(Self::RingTip),
            17 => Some(Self::PinkyMcp),
            18 => Some(Self::PinkyPip),
            19 => Some(Self::PinkyDip),
            20 => Some(Self::PinkyTip),
            _ => None,
        }
    }

    /// String name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbCmc => "thumb-cmc",
            Self::ThumbMcp => "thumb-mcp",
            Self::ThumbIp => "thumb-ip",
            Self::ThumbTip => "thumb-tip",
            Self::IndexMcp => "index-mcp",
            Self::IndexPip => "index-pip",
            Self::IndexDip => "index-dip",
            Self::IndexTip => "index-tip",
            Self::MiddleMcp => "middle-mcp",
            Self::MiddlePip => "middle-pip",
            Self::MiddleDip => "middle-dip",
            Self::MiddleTip => "middle-tip",
            Self::RingMcp => "ring-mcp",
            Self::RingPip => "ring-pip",
            Self::RingDip => "ring-dip",
            Self::RingTip => "ring-tip",
            Self::PinkyMcp => "pinky-mcp",
            Self::PinkyPip => "pinky-pip",
            Self::PinkyDip => "pinky-dip",
            Self::PinkyTip => "pinky-tip",
        }
    }
}

/// Skeleton connection topology (MediaPipe Hands), used by the renderer
/// to draw the hand as line segments.
pub const HAND_CONNECTIONS: [(LandmarkId, LandmarkId); 21] = [
    (LandmarkId::Wrist, LandmarkId::ThumbCmc),
    (LandmarkId::ThumbCmc, LandmarkId::ThumbMcp),
    (LandmarkId::ThumbMcp, LandmarkId::ThumbIp),
    (LandmarkId::ThumbIp, LandmarkId::ThumbTip),
    (LandmarkId::Wrist, LandmarkId::IndexMcp),
    (LandmarkId::IndexMcp, LandmarkId::IndexPip),
    (LandmarkId::IndexPip, LandmarkId::IndexDip),
    (LandmarkId::IndexDip, LandmarkId::IndexTip),
    (LandmarkId::IndexMcp, LandmarkId::MiddleMcp),
    (LandmarkId::MiddleMcp, LandmarkId::MiddlePip),
    (LandmarkId::MiddlePip, LandmarkId::MiddleDip),
    (LandmarkId::MiddleDip, LandmarkId::MiddleTip),
    (LandmarkId::MiddleMcp, LandmarkId::RingMcp),
    (LandmarkId::RingMcp, LandmarkId::RingPip),
    (LandmarkId::RingPip, LandmarkId::RingDip),
    (LandmarkId::RingDip, LandmarkId::RingTip),
    (LandmarkId::RingMcp, LandmarkId::PinkyMcp),
    (LandmarkId::Wrist, LandmarkId::PinkyMcp),
    (LandmarkId::PinkyMcp, LandmarkId::PinkyPip),
    (LandmarkId::PinkyPip, LandmarkId::PinkyDip),
    (LandmarkId::PinkyDip, LandmarkId::PinkyTip),
];

// ── Frame data ─────────────────────────────────────────────

/// One tracked point in normalized camera space.
///
/// x and y are in [0, 1] with the origin at the top-left and x growing
/// rightward in camera space.  The depth component is carried through
/// from the tracker but unused.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Ordered landmark set for one detected hand.
///
/// A well-formed frame has [`LANDMARK_COUNT`] points; the tracker may
/// deliver fewer when it failed to resolve some joints, which is why
/// [`HandFrame::landmark`] returns an `Option`.
#[derive(Debug, Clone, Default)]
pub struct HandFrame {
    points: Vec<LandmarkPoint>,
}

impl HandFrame {
    pub fn new(points: Vec<LandmarkPoint>) -> Self {
        Self { points }
    }

    /// Look up a landmark by id.  `None` when the tracker did not
    /// resolve that joint this frame.
    pub fn landmark(&self, id: LandmarkId) -> Option<&LandmarkPoint> {
        self.points.get(id.index())
    }

    /// All points delivered this frame, in index order.
    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }

    /// Whether every landmark of the model was resolved.
    pub fn is_complete(&self) -> bool {
        self.points.len() == LANDMARK_COUNT
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Everything a tracker delivers for one camera frame: zero or more
/// detected hands.  The engine only ever processes the first.
#[derive(Debug, Clone, Default)]
pub struct TrackerFrame {
    pub hands: Vec<HandFrame>,
}

impl TrackerFrame {
    pub fn new(hands: Vec<HandFrame>) -> Self {
        Self { hands }
    }

    /// The hand the engine will process, if any was detected.
    pub fn first_hand(&self) -> Option<&HandFrame> {
        self.hands.first()
    }

    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }
}

// ── Tests ──────────────────────────────────────────────────
