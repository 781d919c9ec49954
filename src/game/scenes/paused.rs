//=========================================================================
// Paused Scene
//=========================================================================
//
// Opaque overlay on top of gameplay. Gameplay stops updating but is
// still drawn underneath.
//
//=========================================================================

use log::{debug, info};

use crate::core::geometry::Rect;
use crate::core::input::InputContext;
use crate::core::render::{Color, FrameSnapshot, SpriteKind};
use crate::core::scene::{Scene, SceneTransition};
use crate::core::GlobalContext;
use crate::game::{GameAction, GameScene};

const OVERLAY_COLOR: Color = [0, 0, 0];

pub struct PausedScene {
    area: Rect,
}

impl PausedScene {
    /// `area` is the region the overlay covers, normally the window.
    pub fn new(area: Rect) -> Self {
        Self { area }
    }
}

impl Scene<GameScene, GameAction> for PausedScene {
    fn on_enter(&mut self, _context: &mut GlobalContext<GameScene, GameAction>) {
        debug!("Paused");
    }

    fn update(&mut self, context: &mut GlobalContext<GameScene, GameAction>) {
        if context.actions.is_pressed(GameAction::Quit) {
            info!("Quit requested");
            context.request_exit();
        } else if context.actions.is_pressed(GameAction::Resume) {
            context.transition(SceneTransition::Remove(GameScene::Paused));
            context.request_input_context(InputContext::Primary);
        }
    }

    fn render(&self, frame: &mut FrameSnapshot) {
        frame.push(self.area, OVERLAY_COLOR, SpriteKind::Overlay);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
