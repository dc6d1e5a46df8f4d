//! Runtime settings for the terminal viewer.

use std::fmt;
use std::path::PathBuf;

use crate::math::vec3::Vec3;
use crate::render::framebuffer::DepthMode;
use crate::timing::DEFAULT_FPS;

/// Which mesh the viewer spins.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshSource {
    Cube,
    Quad,
    Obj(PathBuf),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera: Vec3,
    pub depth_mode: DepthMode,
    pub fps: u32,
    /// Stop after this many frames; `None` runs until quit.
    pub frames: Option<u64>,
    /// Euler rotation in degrees applied to the mesh every frame.
    pub spin: Vec3,
    pub mesh_scale: Vec3,
    pub mesh: MeshSource,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            fov_degrees: 45.0,
            near: 0.01,
            far: 1000.0,
            camera: Vec3::new(0.0, 0.0, 5.0),
            depth_mode: DepthMode::DrawOrder,
            fps: DEFAULT_FPS,
            frames: None,
            spin: Vec3::new(0.15, 0.25, 0.35),
            mesh_scale: Vec3::new(1.0, 0.8, 0.6),
            mesh: MeshSource::Cube,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingValue(String),
    InvalidValue { flag: String, value: String },
    UnknownArgument(String),
    /// Values parsed but do not describe a usable setup.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue(flag) => write!(f, "missing value for {}", flag),
            ConfigError::InvalidValue { flag, value } => {
                write!(f, "invalid {} value: {}", flag, value)
            }
            ConfigError::UnknownArgument(arg) => write!(f, "unknown argument: {}", arg),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Largest accepted grid side, in cells.
pub const MAX_GRID_SIDE: u32 = 4096;

impl RenderConfig {
    pub const USAGE: &'static str = "usage: glyphraster [--width N] [--height N] [--fov DEG] \
[--near F] [--far F] [--camera X,Y,Z] [--depth-test] [--fps N] [--frames N] [--obj PATH | --quad]";

    /// Parses command-line arguments, program name excluded.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--width" => config.width = parse(flag, value(args, &mut i)?)?,
                "--height" => config.height = parse(flag, value(args, &mut i)?)?,
                "--fov" => config.fov_degrees = parse(flag, value(args, &mut i)?)?,
                "--near" => config.near = parse(flag, value(args, &mut i)?)?,
                "--far" => config.far = parse(flag, value(args, &mut i)?)?,
                "--camera" => config.camera = parse_vec3(flag, value(args, &mut i)?)?,
                "--fps" => config.fps = parse(flag, value(args, &mut i)?)?,
                "--frames" => config.frames = Some(parse(flag, value(args, &mut i)?)?),
                "--obj" => config.mesh = MeshSource::Obj(PathBuf::from(value(args, &mut i)?)),
                "--quad" => config.mesh = MeshSource::Quad,
                "--depth-test" => config.depth_mode = DepthMode::Nearest,
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
            i += 1;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_GRID_SIDE || self.height > MAX_GRID_SIDE {
            return Err(ConfigError::Invalid(format!(
                "grid sides are limited to {} cells, got {}x{}",
                MAX_GRID_SIDE, self.width, self.height
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov must be between 0 and 180 degrees, got {}",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ConfigError::Invalid(format!(
                "need 0 < near < far, got near {} far {}",
                self.near, self.far
            )));
        }
        Ok(())
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, ConfigError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingValue(flag.clone()))
}

fn parse<T: std::str::FromStr>(flag: &str, v: &str) -> Result<T, ConfigError> {
    v.parse::<T>().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: v.to_string(),
    })
}

fn parse_vec3(flag: &str, v: &str) -> Result<Vec3, ConfigError> {
    let parts: Vec<&str> = v.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(parse(flag, x)?, parse(flag, y)?, parse(flag, z)?)),
        _ => Err(ConfigError::InvalidValue {
            flag: flag.to_string(),
            value: v.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_gives_defaults() {
        assert_eq!(RenderConfig::from_args(&[]).unwrap(), RenderConfig::default());
    }

    #[test]
    fn parses_every_flag() {
        let cfg = RenderConfig::from_args(&args(&[
            "--width", "80", "--height", "40", "--fov", "60", "--near", "0.5", "--far", "50",
            "--camera", "1, 2,3", "--depth-test", "--fps", "12", "--frames", "100", "--quad",
        ]))
        .unwrap();
        assert_eq!((cfg.width, cfg.height), (80, 40));
        assert_eq!(cfg.fov_degrees, 60.0);
        assert_eq!((cfg.near, cfg.far), (0.5, 50.0));
        assert_eq!(cfg.camera, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cfg.depth_mode, DepthMode::Nearest);
        assert_eq!(cfg.fps, 12);
        assert_eq!(cfg.frames, Some(100));
        assert_eq!(cfg.mesh, MeshSource::Quad);
    }

    #[test]
    fn obj_path_is_kept() {
        let cfg = RenderConfig::from_args(&args(&["--obj", "models/teapot.obj"])).unwrap();
        assert_eq!(cfg.mesh, MeshSource::Obj(PathBuf::from("models/teapot.obj")));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            RenderConfig::from_args(&args(&["--width"])),
            Err(ConfigError::MissingValue("--width".into()))
        );
        assert_eq!(
            RenderConfig::from_args(&args(&["--fps", "fast"])),
            Err(ConfigError::InvalidValue {
                flag: "--fps".into(),
                value: "fast".into()
            })
        );
        assert!(matches!(
            RenderConfig::from_args(&args(&["--camera", "1,2"])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(
            RenderConfig::from_args(&args(&["--wireframe"])),
            Err(ConfigError::UnknownArgument("--wireframe".into()))
        );
    }

    #[test]
    fn rejects_unusable_projection() {
        assert!(matches!(
            RenderConfig::from_args(&args(&["--near", "10", "--far", "1"])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            RenderConfig::from_args(&args(&["--width", "0"])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            RenderConfig::from_args(&args(&["--width", "65536", "--height", "65536"])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(RenderConfig::from_args(&args(&["--width", "4096", "--height", "1"])).is_ok());
    }

    #[test]
    fn error_messages_name_the_flag() {
        let err = ConfigError::InvalidValue {
            flag: "--fov".into(),
            value: "wide".into(),
        };
        assert_eq!(err.to_string(), "invalid --fov value: wide");
    }
}
