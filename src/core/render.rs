//=========================================================================
// Render Boundary
//=========================================================================
//
// What crosses from the simulation to the (external) renderer.
//
// The logic thread builds one `FrameSnapshot` per tick and sends it to
// the platform thread, which hands the latest one to a `Presenter`.
// Drawing itself is not part of this crate.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::geometry::Rect;

//=== Types ===============================================================

/// RGB color, 0-255 per channel.
pub type Color = [u8; 3];

/// What a sprite represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Player,
    Platform,
    Ground,
    /// Full-screen tint drawn over paused gameplay.
    Overlay,
}

/// A colored rectangle to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub rect: Rect,
    pub color: Color,
    pub kind: SpriteKind,
}

/// Immutable picture of one simulation tick, back to front.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub background: Color,
    pub sprites: Vec<Sprite>,
}

impl FrameSnapshot {
    /// Resets the snapshot for a new tick, keeping the allocation.
    pub(crate) fn begin(&mut self, tick: u64) {
        self.tick = tick;
        self.background = [0, 0, 0];
        self.sprites.clear();
    }

    pub fn push(&mut self, rect: Rect, color: Color, kind: SpriteKind) {
        self.sprites.push(Sprite { rect, color, kind });
    }

    /// First sprite of the given kind.
    pub fn find(&self, kind: SpriteKind) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.kind == kind)
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}

//=== Presenter ===========================================================

/// Receives snapshots on the platform (main) thread.
///
/// Implement this to plug a real renderer in. Called at most once per
/// redraw with the newest snapshot available.
pub trait Presenter {
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Default presenter: logs the player's position at trace level.
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &FrameSnapshot) {
        if let Some(player) = frame.find(SpriteKind::Player) {
            trace!(
                target: "platform::present",
                "tick {}: player at ({:.1}, {:.1}), {} sprites",
                frame.tick,
                player.rect.x,
                player.rect.y,
                frame.sprites.len()
            );
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_resets_sprites_and_tick() {
        let mut frame = FrameSnapshot::default();
        frame.push(Rect::new(0.0, 0.0, 1.0, 1.0), [1, 2, 3], SpriteKind::Player);
        frame.begin(7);

        assert_eq!(frame.tick, 7);
        assert!(frame.sprites.is_empty());
    }

    #[test]
    fn find_and_count_by_kind() {
        let mut frame = FrameSnapshot::default();
        frame.push(Rect::new(0.0, 0.0, 10.0, 10.0), [0, 0, 0], SpriteKind::Platform);
        frame.push(Rect::new(20.0, 0.0, 10.0, 10.0), [0, 0, 0], SpriteKind::Platform);
        frame.push(Rect::new(5.0, 5.0, 2.0, 2.0), [255, 0, 0], SpriteKind::Player);

        assert_eq!(frame.count(SpriteKind::Platform), 2);
        assert_eq!(frame.find(SpriteKind::Player).map(|s| s.color), Some([255, 0, 0]));
        assert!(frame.find(SpriteKind::Ground).is_none());
    }
}
