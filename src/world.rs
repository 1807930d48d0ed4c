use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use tracing::info;

use seeker_kinematics::Pose;
use seeker_navigation::GoalPoint;

use crate::config::WorldConfig;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

const PATH_DOT_RADIUS: i32 = 2;
const MARKER_RADIUS: i32 = 8;

/// White canvas with a red goal disc and a blue start marker.
pub fn synthesize(cfg: &WorldConfig, start: (f64, f64)) -> RgbImage {
    let mut world = RgbImage::from_pixel(cfg.width, cfg.height, WHITE);
    draw_filled_circle_mut(&mut world, (cfg.goal_x, cfg.goal_y), cfg.goal_radius, RED);
    draw_filled_circle_mut(&mut world, (start.0 as i32, start.1 as i32), cfg.start_marker_radius, BLUE);
    world
}

/// Reads an image file as 8-bit RGB.
pub fn load(path: &Path) -> anyhow::Result<RgbImage> {
    let image = image::open(path).with_context(|| format!("Could not load image from {}", path.display()))?;
    Ok(image.to_rgb8())
}

/// Loads `cfg.image_path` if set, otherwise synthesizes the default world.
pub fn load_or_synthesize(cfg: &WorldConfig, start: (f64, f64)) -> anyhow::Result<RgbImage> {
    match &cfg.image_path {
        Some(path) => {
            info!(path = %path.display(), "Loading world image");
            load(path)
        }
        None => {
            info!(width = cfg.width, height = cfg.height, "Synthesizing world image");
            Ok(synthesize(cfg, start))
        }
    }
}

/// Copy of `world` with the trajectory drawn on top.
///
/// Blue dots for every pose, green start, red goal and a red final pose.
pub fn draw_path(world: &RgbImage, history: &[Pose], goal: GoalPoint) -> RgbImage {
    let mut canvas = world.clone();
    for pose in history {
        draw_filled_circle_mut(&mut canvas, (pose.x as i32, pose.y as i32), PATH_DOT_RADIUS, BLUE);
    }
    if let Some(last) = history.last() {
        draw_filled_circle_mut(&mut canvas, (last.x as i32, last.y as i32), MARKER_RADIUS, RED);
    }
    if let Some(first) = history.first() {
        draw_filled_circle_mut(&mut canvas, (first.x as i32, first.y as i32), MARKER_RADIUS, GREEN);
    }
    draw_filled_circle_mut(&mut canvas, (goal.x, goal.y), MARKER_RADIUS, RED);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_clip_at_the_border() {
        let cfg = WorldConfig {
            width: 30,
            height: 30,
            goal_x: 29,
            goal_y: 29,
            goal_radius: 5,
            ..WorldConfig::default()
        };
        let world = synthesize(&cfg, (0.0, 0.0));
        assert_eq!(world.dimensions(), (30, 30));
        assert_eq!(*world.get_pixel(29, 29), RED);
        assert_eq!(*world.get_pixel(0, 0), BLUE);
        assert_eq!(*world.get_pixel(15, 15), WHITE);
    }

    #[test]
    fn test_synthesized_world() {
        let world = synthesize(&WorldConfig::default(), (50.0, 250.0));
        assert_eq!(world.dimensions(), (500, 500));
        assert_eq!(*world.get_pixel(400, 400), RED);
        assert_eq!(*world.get_pixel(420, 400), RED);
        assert_eq!(*world.get_pixel(421, 400), WHITE);
        assert_eq!(*world.get_pixel(50, 250), BLUE);
        assert_eq!(*world.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn test_draw_path_leaves_source_untouched() {
        let world = RgbImage::from_pixel(100, 100, WHITE);
        let history = [Pose::new(10.0, 10.0, 0.0), Pose::new(40.0, 50.0, 0.0), Pose::new(70.0, 50.0, 0.0)];
        let canvas = draw_path(&world, &history, GoalPoint::new(90, 90));

        assert!(world.pixels().all(|p| *p == WHITE));
        assert_eq!(*canvas.get_pixel(10, 10), GREEN);
        assert_eq!(*canvas.get_pixel(40, 50), BLUE);
        assert_eq!(*canvas.get_pixel(70, 50), RED);
        assert_eq!(*canvas.get_pixel(90, 90), RED);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(load(Path::new("does/not/exist.png")).is_err());
    }
}
