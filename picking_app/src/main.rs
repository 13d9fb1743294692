//! Scene picking demo
//!
//! Loads a scene file and reports which object sits under a pixel.
//!
//! ```text
//! pick_scene <scene.toml|scene.ron> [x y] [--all]
//! ```
//!
//! Without pixel coordinates the viewport center is used. `--all` lists every
//! object along the ray, nearest first.

mod scene;

use pick_engine::config::{Config, ConfigError};
use pick_engine::foundation::logging;
use pick_engine::physics::CollisionError;
use pick_engine::picking::{pick_all, PickHit, PickingSystem};
use scene::SceneDescription;

/// Application errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Wrong command line
    #[error("usage: pick_scene <scene.toml|scene.ron> [x y] [--all]")]
    Usage,

    /// Pixel coordinate that is not a number
    #[error("invalid pixel coordinate '{0}'")]
    InvalidCoordinate(String),

    /// Scene file could not be loaded
    #[error("scene error: {0}")]
    Scene(#[from] ConfigError),

    /// Camera could not produce a ray
    #[error("picking error: {0}")]
    Picking(#[from] CollisionError),
}

/// Parsed command line
struct Args {
    scene_path: String,
    pixel: Option<(f64, f64)>,
    list_all: bool,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, AppError> {
        let (flags, positional): (Vec<String>, Vec<String>) = args.partition(|arg| arg.starts_with("--"));
        let list_all = match flags.as_slice() {
            [] => false,
            [flag] if flag == "--all" => true,
            _ => return Err(AppError::Usage),
        };

        match positional.as_slice() {
            [path] => Ok(Self { scene_path: path.clone(), pixel: None, list_all }),
            [path, x, y] => Ok(Self {
                scene_path: path.clone(),
                pixel: Some((parse_coordinate(x)?, parse_coordinate(y)?)),
                list_all,
            }),
            _ => Err(AppError::Usage),
        }
    }
}

fn parse_coordinate(text: &str) -> Result<f64, AppError> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::InvalidCoordinate(text.to_string()))
}

fn describe(scene: &SceneDescription, hit: &PickHit) -> String {
    format!(
        "{} (entity {}) at distance {:.3}, point [{:.3}, {:.3}, {:.3}], normal [{:.3}, {:.3}, {:.3}]",
        scene.object_name(hit.entity).unwrap_or("<unknown>"),
        hit.entity.id(),
        hit.distance,
        hit.point.x,
        hit.point.y,
        hit.point.z,
        hit.normal.x,
        hit.normal.y,
        hit.normal.z,
    )
}

fn run(args: Args) -> Result<(), AppError> {
    let scene = SceneDescription::load_from_file(&args.scene_path)?;
    log::info!("Loaded scene '{}' with {} objects", args.scene_path, scene.objects.len());

    let camera = scene.camera();
    let candidates = scene.candidates();
    let (x, y) = args.pixel.unwrap_or((
        f64::from(scene.viewport.width) / 2.0,
        f64::from(scene.viewport.height) / 2.0,
    ));

    let mut picking = PickingSystem::new(scene.viewport.width, scene.viewport.height, scene.picking);
    picking.update_mouse(x, y, true);
    log::info!("Picking at pixel ({:.1}, {:.1})", x, y);

    if args.list_all {
        let ndc = picking.mouse_state().screen_to_ndc();
        let ray = camera.screen_to_world_ray(ndc)?;
        let hits = pick_all(&ray, &candidates, picking.config());
        if hits.is_empty() {
            println!("Nothing under the cursor");
        }
        for (rank, hit) in hits.iter().enumerate() {
            println!("{}. {}", rank + 1, describe(&scene, hit));
        }
        return Ok(());
    }

    match picking.pick_at_cursor(&camera, &candidates)? {
        Some(hit) => println!("Selected {}", describe(&scene, &hit)),
        None => println!("Nothing under the cursor"),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default_filter("info");

    let result = Args::parse(std::env::args().skip(1)).and_then(run);
    if let Err(e) = &result {
        log::error!("{}", e);
    }
    result.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, AppError> {
        Args::parse(list.iter().map(|s| (*s).to_string()))
    }

    #[test]
    fn test_scene_only_picks_center() {
        let parsed = args(&["scene.toml"]).unwrap();
        assert_eq!(parsed.scene_path, "scene.toml");
        assert!(parsed.pixel.is_none());
        assert!(!parsed.list_all);
    }

    #[test]
    fn test_pixel_and_flag() {
        let parsed = args(&["--all", "scene.ron", "10", "20.5"]).unwrap();
        assert_eq!(parsed.pixel, Some((10.0, 20.5)));
        assert!(parsed.list_all);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(args(&[]), Err(AppError::Usage)));
        assert!(matches!(args(&["scene.toml", "1"]), Err(AppError::Usage)));
        assert!(matches!(args(&["scene.toml", "--verbose"]), Err(AppError::Usage)));
        assert!(matches!(args(&["scene.toml", "x", "1"]), Err(AppError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_bundled_scene_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/editor_scene.toml");
        let scene = SceneDescription::load_from_file(path).unwrap();
        assert!(!scene.objects.is_empty());
    }

    #[test]
    fn test_missing_scene_is_io_error() {
        let result = run(Args {
            scene_path: "does_not_exist.toml".to_string(),
            pixel: None,
            list_all: false,
        });
        assert!(matches!(result, Err(AppError::Scene(ConfigError::Io(_)))));
    }
}
