//! Collision detection between the character and obstacles
//!
//! Both bodies are axis-aligned squares. Hitboxes are inset from the drawn
//! bodies so grazing contact does not count. An overlap is then classified
//! by approach: a character whose feet are in the obstacle's top band is
//! landing on it (safe), anything else is a side hit.

use serde::{Deserialize, Serialize};

use crate::tuning::CollisionTuning;

/// Axis-aligned rectangle, origin at the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Shrink by `margin` on every side
    #[inline]
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            x: self.x + margin,
            y: self.y + margin,
            w: self.w - margin * 2.0,
            h: self.h - margin * 2.0,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap; rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }
}

/// How the character meets an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Hitboxes do not overlap
    Clear,
    /// Overlap with the character's feet in the obstacle's top band
    FromAbove,
    /// Any other overlap
    Side,
}

impl Contact {
    /// Whether this contact costs a life
    pub fn is_hit(self) -> bool {
        self == Contact::Side
    }
}

/// Classify the contact between the character body and an obstacle rect.
///
/// Both rects are the nominal (un-inset) bodies; the margins in `tuning`
/// produce the hitboxes. The from-above test uses the character's nominal y.
pub fn classify(character: &Rect, obstacle: &Rect, tuning: &CollisionTuning) -> Contact {
    let character_box = character.inset(tuning.character_margin);
    let obstacle_box = obstacle.inset(tuning.obstacle_margin);
    if !character_box.overlaps(&obstacle_box) {
        return Contact::Clear;
    }
    if character.y > obstacle.y + obstacle.h * tuning.from_above_band {
        Contact::FromAbove
    } else {
        Contact::Side
    }
}

/// A side hit only counts while the character is not already crashed
#[inline]
pub fn is_actionable(contact: Contact, crashed: bool) -> bool {
    contact.is_hit() && !crashed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f32, y: f32) -> Rect {
        Rect::new(x, y, 64.0, 64.0)
    }

    #[test]
    fn test_rect_inset() {
        let r = body(80.0, 100.0).inset(8.0);
        assert_eq!(r, Rect::new(88.0, 108.0, 48.0, 48.0));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(9.9, 9.9, 10.0, 10.0)));
    }

    #[test]
    fn test_side_hit() {
        let tuning = CollisionTuning::default();
        let contact = classify(&body(80.0, 100.0), &body(100.0, 96.0), &tuning);
        assert_eq!(contact, Contact::Side);
        assert!(contact.is_hit());
    }

    #[test]
    fn test_margins_forgive_grazing() {
        let tuning = CollisionTuning::default();
        // Bodies overlap by 10 units horizontally, hitboxes (8 + 4 inset) do not
        let contact = classify(&body(0.0, 100.0), &body(54.0, 96.0), &tuning);
        assert_eq!(contact, Contact::Clear);
    }

    #[test]
    fn test_landing_on_top_is_safe() {
        let tuning = CollisionTuning::default();
        // Obstacle band starts at 96 + 64 * 0.7 = 140.8
        let contact = classify(&body(90.0, 141.0), &body(100.0, 96.0), &tuning);
        assert_eq!(contact, Contact::FromAbove);
        assert!(!contact.is_hit());

        let contact = classify(&body(90.0, 140.0), &body(100.0, 96.0), &tuning);
        assert_eq!(contact, Contact::Side);
    }

    #[test]
    fn test_crashed_character_is_not_hit_again() {
        assert!(is_actionable(Contact::Side, false));
        assert!(!is_actionable(Contact::Side, true));
        assert!(!is_actionable(Contact::FromAbove, false));
        assert!(!is_actionable(Contact::Clear, false));
    }
}
