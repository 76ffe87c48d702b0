use std::fmt;

/// Stage of a touch sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// A positional touch event in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchEvent {
    /// Identifies one finger for the duration of a sequence.
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub phase: TouchPhase,
}

impl TouchEvent {
    pub fn new(id: u64, x: f32, y: f32, phase: TouchPhase) -> Self {
        Self { id, x, y, phase }
    }
}

impl fmt::Display for TouchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Began => "began",
            Self::Moved => "moved",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl fmt::Display for TouchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} at ({:.1}, {:.1})", self.id, self.phase, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_compact() {
        let ev = TouchEvent::new(3, 10.0, 20.3, TouchPhase::Moved);
        assert_eq!(ev.to_string(), "#3 moved at (10.0, 20.3)");
    }
}
