use {
    serde::{Deserialize, Serialize},
    std::{error::Error, fmt},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Fewer rows.
    In,
    /// More rows.
    Out,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    Empty { start: usize, end: usize },
    OutOfBounds { end: usize, len: usize },
    TooSmall { size: usize, min_size: usize },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WindowError::Empty { start, end } => {
                write!(f, "window [{}, {}) is empty", start, end)
            }
            WindowError::OutOfBounds { end, len } => {
                write!(f, "window end {} exceeds {} rows", end, len)
            }
            WindowError::TooSmall { size, min_size } => {
                write!(f, "window of {} rows is below the minimum of {}", size, min_size)
            }
        }
    }
}

impl Error for WindowError {}

/// Half-open row range `[start, end)` over an aligned row sequence.
///
/// Holds `start < end <= len` and `end - start >= min_size`, except that a
/// sequence shorter than `min_size` can only be viewed whole.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: usize,
    end: usize,
}

impl Window {
    pub fn new(start: usize, end: usize, len: usize, min_size: usize) -> Result<Self, WindowError> {
        if start >= end {
            return Err(WindowError::Empty { start, end });
        }
        if end > len {
            return Err(WindowError::OutOfBounds { end, len });
        }
        let size = end - start;
        let floor = min_size.min(len);
        if size < floor {
            return Err(WindowError::TooSmall { size, min_size: floor });
        }
        Ok(Self { start, end })
    }

    /// Default viewport: the most recent `preferred` rows.
    pub fn trailing(len: usize, preferred: usize, min_size: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        let size = preferred.max(min_size).min(len);
        Some(Self {
            start: len - size,
            end: len,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn size(&self) -> usize {
        self.end - self.start
    }

    /// Visible part of `rows`. Never panics, even if `rows` shrank since the window was made.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let end = self.end.min(rows.len());
        let start = self.start.min(end);
        &rows[start..end]
    }

    /// Grows or shrinks by `step` rows around the current midpoint, staying inside `[0, len)`.
    pub fn zoom(self, direction: ZoomDirection, len: usize, step: usize, min_size: usize) -> Self {
        if len == 0 {
            return self;
        }
        let size = self.size();
        let wanted = match direction {
            ZoomDirection::In => size.saturating_sub(step),
            ZoomDirection::Out => size + step,
        };
        let new_size = wanted.min(len).max(min_size.min(len));

        let mid = (self.start + self.end) / 2;
        let mut start = mid.saturating_sub(new_size / 2);
        let end = (start + new_size).min(len);
        if end - start < new_size {
            start = end.saturating_sub(new_size);
        }
        Self { start, end }
    }

    /// Shifts by `delta` rows (positive = later). A shift that would clip the
    /// window at either edge is refused and the window stays put.
    pub fn pan(self, delta: isize, len: usize) -> Self {
        let size = self.size() as isize;
        let start = (self.start as isize + delta).max(0);
        let end = (self.end as isize + delta).min(len as isize);
        if end - start == size {
            Self {
                start: start as usize,
                end: end as usize,
            }
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_enforces_bounds_and_minimum() {
        assert!(Window::new(0, 6, 10, 6).is_ok());
        assert_eq!(
            Window::new(4, 4, 10, 6),
            Err(WindowError::Empty { start: 4, end: 4 })
        );
        assert_eq!(
            Window::new(0, 11, 10, 6),
            Err(WindowError::OutOfBounds { end: 11, len: 10 })
        );
        assert_eq!(
            Window::new(0, 5, 10, 6),
            Err(WindowError::TooSmall { size: 5, min_size: 6 })
        );
        // Short data can only be shown whole.
        assert!(Window::new(0, 4, 4, 6).is_ok());
    }

    #[test]
    fn trailing_anchors_at_latest_rows() {
        let w = Window::trailing(100, 36, 6).unwrap();
        assert_eq!((w.start(), w.end()), (64, 100));

        let short = Window::trailing(4, 36, 6).unwrap();
        assert_eq!((short.start(), short.end()), (0, 4));

        assert!(Window::trailing(0, 36, 6).is_none());
    }

    #[test]
    fn zoom_in_stops_at_minimum() {
        let mut w = Window::new(40, 52, 100, 6).unwrap();
        w = w.zoom(ZoomDirection::In, 100, 6, 6);
        assert_eq!(w.size(), 6);
        assert_eq!((w.start(), w.end()), (43, 49));
        w = w.zoom(ZoomDirection::In, 100, 6, 6);
        assert_eq!(w.size(), 6);
    }

    #[test]
    fn zoom_out_is_clamped_to_data_and_shifted_inside() {
        let w = Window::new(90, 100, 100, 6).unwrap();
        let zoomed = w.zoom(ZoomDirection::Out, 100, 6, 6);
        assert_eq!(zoomed.size(), 16);
        assert_eq!(zoomed.end(), 100);
        assert_eq!(zoomed.start(), 84);

        let whole = Window::new(0, 8, 10, 6).unwrap().zoom(ZoomDirection::Out, 10, 6, 6);
        assert_eq!((whole.start(), whole.end()), (0, 10));
    }

    #[test]
    fn pan_refuses_to_clip() {
        let w = Window::new(10, 20, 30, 6).unwrap();
        let later = w.pan(5, 30);
        assert_eq!((later.start(), later.end()), (15, 25));
        assert_eq!(later.pan(10, 30), later);
        assert_eq!(w.pan(-11, 30), w);
        assert_eq!(w.pan(-10, 30).start(), 0);
    }

    #[test]
    fn slice_tolerates_shorter_rows() {
        let w = Window::new(2, 8, 10, 6).unwrap();
        let rows: Vec<u32> = (0..10).collect();
        assert_eq!(w.slice(&rows), &[2, 3, 4, 5, 6, 7]);
        assert_eq!(w.slice(&rows[..5]), &[2, 3, 4]);
        assert!(w.slice(&rows[..1]).is_empty());
    }
}
