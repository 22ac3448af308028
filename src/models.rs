/// Axis-aligned box in floating-point pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// A single detected object, ready for display.
///
/// `percentage` is the top category's score rounded to a whole percent.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub bounding_box: RectF,
    pub label: String,
    pub percentage: u8,
}

/// Observable result of a detection request.
///
/// Owned by the detection adapter; the UI side only ever reads snapshots.
/// Per request the state moves Loading -> Ok or Loading -> Error; dispatching
/// a new request resets it to Loading first. Consumers are expected to match
/// all three variants rather than peeking at flags.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Loading,
    Ok {
        items: Vec<DetectionResult>,
        remote: bool,
    },
    Error {
        message: String,
        fallback: Option<Vec<DetectionResult>>,
    },
}

impl PipelineState {
    /// True once a request has produced a terminal state (Ok or Error).
    pub fn is_settled(&self) -> bool {
        !matches!(self, PipelineState::Loading)
    }
}
