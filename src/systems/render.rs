//! Rendering.
//!
//! [`render_system`] is an exclusive system: it takes the raylib handle out
//! of the world for the duration of the frame and draws the current screen.
//! It reads the registry and never mutates simulation state. Textures that
//! failed to load are drawn as flat rectangles.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::body::{Body, PLAYER_SIZE, TILE};
use crate::components::kind::EntityKind;
use crate::components::player::MAX_JUMP_BOOST;
use crate::components::tags::CapabilityTag;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::registry::EntityRegistry;
use crate::resources::runsettings::RunSettings;
use crate::resources::texturestore::TextureStore;

const SPRITE_FRAME: f32 = 48.0;
const BAR_WIDTH: f32 = 400.0;
const BAR_HEIGHT: f32 = 25.0;

const HOW_TO_PLAY: [&str; 5] = [
    "Keep jumping until you get the gold trophy!",
    "A/D to walk, Space to jump.",
    "White cups add jump boost time. Green cups move your respawn point.",
    "If the boost bar runs out and you hit the dead zone, the run ends.",
    "Press 1, 2 or 3 to climb an Easy, Medium or Hard tower. Esc quits.",
];

/// Tileset source rectangle for tile (`col`, `row`) of a platform that is
/// `tiles` wide and `rows` tall.
pub fn tile_source(tiles: u32, rows: u32, col: u32, row: u32) -> Rectangle {
    let (sx, sy) = match (tiles, rows) {
        (1, 1) => (8, 1),
        (_, 1) if col == 0 => (8, 3),
        (_, 1) if col + 1 == tiles => (10, 3),
        (_, 1) => (9, 3),
        _ => (1 + col, 2 + row),
    };
    Rectangle::new(sx as f32 * TILE, sy as f32 * TILE, TILE, TILE)
}

fn centered_text(d: &mut RaylibDrawHandle, text: &str, y: i32, size: i32, color: Color) {
    let x = (d.get_screen_width() - measure_text(text, size)) / 2;
    d.draw_text(text, x, y, size, color);
}

fn draw_platform<D: RaylibDraw>(d: &mut D, body: &Body, textures: Option<&TextureStore>) {
    let rect = body.bounding_box();
    let tiles = (rect.width / TILE).round().max(1.0) as u32;
    let rows = (rect.height / TILE).round().max(1.0) as u32;
    let tileset = body.texture.zip(textures).and_then(|(id, store)| store.get(id));
    let Some(tileset) = tileset else {
        d.draw_rectangle_rec(rect, Color::DARKGREEN);
        return;
    };
    for row in 0..rows {
        for col in 0..tiles {
            let at = Vector2::new(
                body.position.x + col as f32 * TILE,
                body.position.y + row as f32 * TILE,
            );
            d.draw_texture_rec(tileset, tile_source(tiles, rows, col, row), at, Color::WHITE);
        }
    }
}

fn draw_sprite<D: RaylibDraw>(d: &mut D, body: &Body, tint: Color, textures: Option<&TextureStore>) {
    match body.texture.zip(textures).and_then(|(id, store)| store.get(id)) {
        Some(texture) => d.draw_texture_v(texture, body.position, tint),
        None => d.draw_rectangle_rec(body.bounding_box(), tint),
    }
}

fn draw_player<D: RaylibDraw>(d: &mut D, body: &Body, textures: Option<&TextureStore>) {
    let Some(data) = body.player_data() else {
        return;
    };
    let animation = data.animation();
    // The sprite is twice the hitbox height and anchored at the feet.
    let dest = Rectangle::new(
        body.position.x,
        body.position.y - PLAYER_SIZE.y,
        SPRITE_FRAME / 2.0,
        SPRITE_FRAME,
    );
    match textures.and_then(|store| store.get(animation.texture)) {
        Some(texture) => {
            let width = if body.facing_left {
                -SPRITE_FRAME / 2.0
            } else {
                SPRITE_FRAME / 2.0
            };
            let src = Rectangle::new(
                animation.current_frame as f32 * SPRITE_FRAME,
                0.0,
                width,
                SPRITE_FRAME,
            );
            d.draw_texture_pro(texture, src, dest, Vector2::zero(), 0.0, Color::WHITE);
        }
        None => d.draw_rectangle_rec(body.bounding_box(), Color::ORANGE),
    }
}

fn draw_world<D: RaylibDraw>(
    d: &mut D,
    registry: &EntityRegistry,
    textures: Option<&TextureStore>,
    top: f32,
    screen_w: i32,
    debug: bool,
) {
    d.draw_rectangle_gradient_v(
        -screen_w,
        top as i32,
        screen_w * 2,
        top.abs() as i32 + 2000,
        Color::BLACK,
        Color::BLUE,
    );

    for (handle, body) in registry.iter_valid() {
        match body.kind {
            EntityKind::Player => continue,
            EntityKind::Platform | EntityKind::MovingPlatform => draw_platform(d, body, textures),
            EntityKind::JumpBoost | EntityKind::Goal => draw_sprite(d, body, Color::WHITE, textures),
            EntityKind::Checkpoint => draw_sprite(d, body, Color::GREEN, textures),
            EntityKind::DeadZone => d.draw_rectangle_rec(body.bounding_box(), Color::RED),
        }
        if debug && body.has_tag(CapabilityTag::Collidable) {
            d.draw_rectangle_lines_ex(body.bounding_box(), 1.0, Color::RED);
        }
        if debug && registry.player().is_some_and(|p| {
            registry.get(p).and_then(|b| b.last_collided) == Some(handle)
        }) {
            d.draw_rectangle_lines_ex(body.bounding_box(), 2.0, Color::YELLOW);
        }
    }

    if let Some(player) = registry.player().and_then(|p| registry.get_valid(p)) {
        draw_player(d, player, textures);
        if debug {
            d.draw_rectangle_lines_ex(player.bounding_box(), 1.0, Color::GREEN);
        }
    }
}

fn draw_boost_bar(d: &mut RaylibDrawHandle, boost: f32) {
    let x = (d.get_screen_width() as f32 - BAR_WIDTH) * 0.5;
    let y = d.get_screen_height() as f32 - 100.0;
    let fill = BAR_WIDTH * (boost / MAX_JUMP_BOOST).clamp(0.0, 1.0);
    d.draw_rectangle_v(Vector2::new(x, y), Vector2::new(BAR_WIDTH, BAR_HEIGHT), Color::BROWN);
    d.draw_rectangle_v(Vector2::new(x, y), Vector2::new(fill, BAR_HEIGHT), Color::DARKBROWN);
    d.draw_rectangle_lines_ex(Rectangle::new(x, y, BAR_WIDTH, BAR_HEIGHT), 2.0, Color::DARKBROWN);
    centered_text(d, "Jump Boost", y as i32 - 20, 20, Color::WHITE);
}

fn draw_menu(d: &mut RaylibDrawHandle) {
    d.clear_background(Color::BLACK);
    let mid = d.get_screen_height() / 2;
    centered_text(d, "BLACK COFFEE", mid - 120, 40, Color::RAYWHITE);
    for (i, line) in HOW_TO_PLAY.iter().enumerate() {
        centered_text(d, line, mid - 40 + i as i32 * 24, 20, Color::GRAY);
    }
}

fn draw_debug_ui(d: &mut RaylibDrawHandle, registry: &EntityRegistry, camera: &Camera2D) {
    let fps = d.get_fps();
    d.draw_text(
        &format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps),
        10,
        10,
        10,
        Color::WHITE,
    );
    d.draw_text(
        &format!("Bodies: {} valid / {} spawned", registry.count_valid(), registry.len()),
        10,
        30,
        10,
        Color::WHITE,
    );
    if let Some(player) = registry.player().and_then(|p| registry.get_valid(p)) {
        d.draw_text(
            &format!(
                "Player pos: ({:.1}, {:.1}) vel: ({:.2}, {:.2}) grounded: {}",
                player.position.x,
                player.position.y,
                player.velocity.x,
                player.velocity.y,
                player.grounded
            ),
            10,
            50,
            10,
            Color::WHITE,
        );
    }
    let cam_text = format!(
        "Camera pos: ({:.1}, {:.1}) Zoom: {:.2}",
        camera.target.x, camera.target.y, camera.zoom
    );
    let y = d.get_screen_height() - 30;
    d.draw_text(&cam_text, 10, y, 10, Color::WHITE);
}

/// Draw the current screen.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };

    {
        let state = world
            .get_resource::<GameState>()
            .map(|s| s.get().clone())
            .unwrap_or_default();
        let debug = world.contains_resource::<DebugMode>();
        let mut d = rl.begin_drawing(&thread);

        match (&state, world.get_resource::<EntityRegistry>()) {
            (GameStates::Playing | GameStates::Lost | GameStates::Won, Some(registry)) => {
                let camera = world
                    .get_resource::<Camera2DRes>()
                    .map(|c| c.0)
                    .unwrap_or(Camera2D {
                        offset: Vector2::zero(),
                        target: Vector2::zero(),
                        rotation: 0.0,
                        zoom: 1.0,
                    });
                let top = world
                    .get_resource::<RunSettings>()
                    .map_or(0, |s| s.difficulty.top()) as f32;
                let textures = world.get_non_send_resource::<TextureStore>();
                let screen_w = d.get_screen_width();

                d.clear_background(Color::BLACK);
                {
                    let mut d2 = d.begin_mode2D(camera);
                    draw_world(&mut d2, registry, textures, top, screen_w, debug);
                }

                let boost = registry
                    .player()
                    .and_then(|p| registry.get(p))
                    .and_then(|b| b.player_data())
                    .map_or(0.0, |data| data.jump_boost_time);
                draw_boost_bar(&mut d, boost);

                let mid = d.get_screen_height() / 2;
                match state {
                    GameStates::Lost => {
                        centered_text(&mut d, "You lost!", mid - 30, 40, Color::RED);
                        centered_text(&mut d, "Press Esc to return to the menu", mid + 20, 20, Color::RAYWHITE);
                    }
                    GameStates::Won => {
                        centered_text(&mut d, "You won!", mid - 30, 40, Color::GOLD);
                        centered_text(&mut d, "Press Esc to return to the menu", mid + 20, 20, Color::RAYWHITE);
                    }
                    _ => {}
                }

                if debug {
                    draw_debug_ui(&mut d, registry, &camera);
                }
            }
            _ => draw_menu(&mut d),
        }
    }

    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(rl);
}
