//! Touch Frames
//!
//! One frame is a snapshot of every active contact at a point in time, with
//! coordinates normalized to [0, 1] and a millisecond timestamp. Frames are
//! immutable once produced.

use crate::signal::Vec2;

/// A snapshot of active touch contacts.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchFrame {
    /// Active contacts in normalized [0,1] coordinates, y already in screen
    /// orientation (0 = top). At most the first two are interpreted.
    pub contacts: Vec<Vec2>,
    /// Milliseconds since an arbitrary session epoch
    pub timestamp_ms: u64,
}

impl TouchFrame {
    /// Create a frame, clamping every contact into the unit square.
    pub fn new(contacts: Vec<Vec2>, timestamp_ms: u64) -> Self {
        let contacts = contacts
            .into_iter()
            .map(|c| Vec2::new(c.x.clamp(0.0, 1.0), c.y.clamp(0.0, 1.0)))
            .collect();
        Self {
            contacts,
            timestamp_ms,
        }
    }

    /// Frame with no contacts (release / session loss).
    pub fn empty(timestamp_ms: u64) -> Self {
        Self {
            contacts: Vec::new(),
            timestamp_ms,
        }
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len().min(2)
    }

    /// Midpoint of the first two contacts.
    pub fn centroid(&self) -> Option<Vec2> {
        match self.contact_count() {
            0 => None,
            1 => Some(self.contacts[0]),
            _ => {
                let a = self.contacts[0];
                let b = self.contacts[1];
                Some(Vec2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0))
            }
        }
    }

    /// Distance between the first two contacts.
    pub fn span(&self) -> Option<f64> {
        if self.contact_count() < 2 {
            return None;
        }
        Some((self.contacts[1] - self.contacts[0]).magnitude())
    }

    /// Angle of the line from the first to the second contact, radians.
    pub fn bearing(&self) -> Option<f64> {
        if self.contact_count() < 2 {
            return None;
        }
        let d = self.contacts[1] - self.contacts[0];
        Some(d.y.atan2(d.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_clamping() {
        let frame = TouchFrame::new(vec![Vec2::new(-0.5, 1.5)], 0);
        assert_eq!(frame.contacts[0], Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_centroid() {
        let frame = TouchFrame::new(vec![Vec2::new(0.2, 0.2), Vec2::new(0.4, 0.6)], 0);
        assert_eq!(frame.centroid(), Some(Vec2::new(0.3, 0.4)));

        let single = TouchFrame::new(vec![Vec2::new(0.5, 0.5)], 0);
        assert_eq!(single.centroid(), Some(Vec2::new(0.5, 0.5)));

        assert_eq!(TouchFrame::empty(0).centroid(), None);
    }

    #[test]
    fn test_span() {
        let frame = TouchFrame::new(vec![Vec2::new(0.0, 0.0), Vec2::new(0.3, 0.4)], 0);
        assert!((frame.span().unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(TouchFrame::new(vec![Vec2::new(0.1, 0.1)], 0).span(), None);
    }

    #[test]
    fn test_bearing() {
        let frame = TouchFrame::new(vec![Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.5)], 0);
        assert!((frame.bearing().unwrap() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_extra_contacts_ignored() {
        let frame = TouchFrame::new(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.5, 0.5),
            ],
            0,
        );
        assert_eq!(frame.contact_count(), 2);
    }
}
