//=========================================================================
// Physics Step
//=========================================================================
//
// One fixed step of player motion against static solids.
//
// Pipeline:
//   controls → vx
//   vy += g·dt, jump impulse (grounded before the step only)
//   integrate, clamp x to the play area
//   swept landing on ground/platform tops
//   residual overlap: head bump or horizontal push-out
//   drop grounded if a push-out moved the player off its support
//   ground clamp
//
// Screen space: y grows downwards, so gravity is positive and a jump
// sets a negative vy.
//
// After every step the player rests on, or is clear of, every solid.
// If resolution cannot find a free spot the step's movement is undone.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::config::GameConfig;
use super::world::{Player, World};
use crate::core::geometry::Rect;

/// Overlap below this depth counts as contact, not penetration.
/// Absorbs float error from snapping `y = top - h`.
const CONTACT_EPSILON: f32 = 1e-3;

//=== Inputs ==============================================================

/// Player intent for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub left: bool,
    pub right: bool,
    /// Edge-triggered: true only on the step the jump key went down.
    pub jump: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    /// px/s², downwards.
    pub gravity: f32,
    /// px/s.
    pub move_speed: f32,
    /// Upward speed set by a jump, px/s.
    pub jump_impulse: f32,
}

impl PhysicsParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            gravity: config.physics.gravity,
            move_speed: config.player.move_speed,
            jump_impulse: config.player.jump_strength,
        }
    }
}

//=== Step ================================================================

/// Advances `world` by `dt` seconds.
///
/// A non-positive or non-finite `dt` leaves the world untouched.
pub fn step(world: &mut World, controls: ControlState, params: &PhysicsParams, dt: f32) {
    if !(dt.is_finite() && dt > 0.0) {
        return;
    }

    let before = world.player;
    let player = &mut world.player;

    //--- Velocity ---------------------------------------------------------
    player.vx = match (controls.left, controls.right) {
        (true, false) => -params.move_speed,
        (false, true) => params.move_speed,
        _ => 0.0,
    };

    player.vy += params.gravity * dt;
    if controls.jump && before.grounded {
        player.vy = -params.jump_impulse;
    }
    player.grounded = false;

    //--- Integration ------------------------------------------------------
    player.x += player.vx * dt;
    player.y += player.vy * dt;
    player.x = player.x.clamp(0.0, (world.bounds.w - player.w).max(0.0));

    //--- Collision --------------------------------------------------------
    land(world, &before);
    resolve_overlaps(world, &before);
    if world.player.grounded && !is_supported(world) {
        world.player.grounded = false;
    }
    clamp_to_ground(world);

    if overlaps_any_solid(world) {
        let player = &mut world.player;
        player.x = before.x;
        player.y = before.y;
        player.vx = 0.0;
        player.vy = 0.0;
        player.grounded = before.grounded;
    }
}

//--- Landing -------------------------------------------------------------
//
// A solid is a landing candidate if the player moves down (vy >= 0),
// overlaps it horizontally, and its bottom edge is at/below the solid's
// top after integration. The bottom must have been at/above that top
// before the step, or the player must have come down from above inside
// the solid's horizontal extent. The highest top is the first one crossed.
//
fn land(world: &mut World, before: &Player) {
    let player = world.player;
    if player.vy < 0.0 {
        return;
    }

    let rect = player.rect();
    let surface = world
        .solids()
        .filter(|solid| rect.overlaps_x(solid))
        .filter(|solid| player.bottom() >= solid.top())
        .filter(|solid| {
            before.bottom() <= solid.top() + CONTACT_EPSILON
                || (before.rect().overlaps_x(solid) && before.top() < solid.top())
        })
        .map(|solid| solid.top())
        .fold(None, |highest: Option<f32>, top| Some(highest.map_or(top, |h| h.min(top))));

    if let Some(top) = surface {
        let player = &mut world.player;
        player.y = top - player.h;
        player.vy = 0.0;
        player.grounded = true;
    }
}

//--- Residual Overlap ----------------------------------------------------
//
// Entered from below while rising: head bump.
// Entered from a side: pushed back out horizontally, within bounds.
//
fn resolve_overlaps(world: &mut World, before: &Player) {
    let max_x = world.bounds.w - world.player.w;

    for index in 0..world.platforms.len() {
        let solid = world.platforms[index].rect;
        let player = &mut world.player;
        if !penetrates(&player.rect(), &solid) {
            continue;
        }

        if player.vy < 0.0 && before.top() >= solid.bottom() - CONTACT_EPSILON {
            player.y = solid.bottom();
            player.vy = 0.0;
            continue;
        }

        let to_left = solid.left() - player.w;
        let to_right = solid.right();
        let go_left = if player.vx > 0.0 {
            true
        } else if player.vx < 0.0 {
            false
        } else {
            player.x + player.w - solid.left() <= solid.right() - player.x
        };

        let x = match (go_left, to_left >= 0.0, to_right <= max_x) {
            (true, true, _) | (false, true, false) => to_left,
            _ => to_right,
        };
        player.x = x.clamp(0.0, max_x.max(0.0));
    }
}

/// Bottom edge rests on some solid's top within contact tolerance.
fn is_supported(world: &World) -> bool {
    let rect = world.player.rect();
    world
        .solids()
        .any(|solid| {
            rect.overlaps_x(solid) && (rect.bottom() - solid.top()).abs() <= CONTACT_EPSILON
        })
}

fn clamp_to_ground(world: &mut World) {
    let ground_top = world.ground.top();
    let player = &mut world.player;
    if player.bottom() > ground_top {
        player.y = ground_top - player.h;
        player.vy = 0.0;
        player.grounded = true;
    }
}

//--- Overlap Tests -------------------------------------------------------

/// Interiors intersect by more than contact tolerance on both axes.
fn penetrates(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() - CONTACT_EPSILON
        && a.right() > b.left() + CONTACT_EPSILON
        && a.top() < b.bottom() - CONTACT_EPSILON
        && a.bottom() > b.top() + CONTACT_EPSILON
}

fn overlaps_any_solid(world: &World) -> bool {
    let rect = world.player.rect();
    world.solids().any(|solid| penetrates(&rect, solid))
}

//=========================================================================
// Unit Tests
//=========================================================================
