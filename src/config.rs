use crate::consts;
use crate::error::SnakeError;
use crate::game::Position;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// Preferences for new sessions
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Return the default configuration file path
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snakecore").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// The values are not validated here; that happens when a session is
    /// initialized with them.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                log::debug!("No configuration file at {}; using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

/// Gameplay preferences for a session
#[derive(Clone, Copy, Deserialize, Debug, Eq, Hash, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionConfig {
    /// Width of the field in cells, 1 through 127
    pub width: u32,

    /// Height of the field in cells, 1 through 127
    pub height: u32,

    /// Speed of the snake in cells per second
    pub speed: u32,

    /// Whether the snake passes through the walls and re-enters on the
    /// opposite side
    pub wrap_walls: bool,

    /// Length of the snake at the start of a game
    pub initial_snake_size: u32,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            width: consts::DEFAULT_FIELD_WIDTH,
            height: consts::DEFAULT_FIELD_HEIGHT,
            speed: consts::DEFAULT_SNAKE_SPEED,
            wrap_walls: consts::DEFAULT_WRAP_WALLS,
            initial_snake_size: consts::DEFAULT_INITIAL_SNAKE_SIZE,
        }
    }
}

impl SessionConfig {
    /// Check everything that starting a game with these preferences would
    /// check, without touching any session.
    ///
    /// # Errors
    ///
    /// Returns the error that [`Session::initialize()`][crate::Session::initialize]
    /// would fail with when starting a game.  [`SnakeError::Memory`] is never
    /// returned.
    pub fn validate(&self) -> Result<(), SnakeError> {
        let (width, height) = self.dimensions()?;
        self.check_speed()?;
        self.snake_head()?;
        if usize::from(width) * usize::from(height) <= self.snake_len() {
            return Err(SnakeError::NoSpaceForFood);
        }
        Ok(())
    }

    /// Time between two moves of the snake, or `None` if the speed is zero
    pub fn tick_period(&self) -> Option<Duration> {
        consts::MILLIS_PER_SECOND
            .checked_div(u64::from(self.speed))
            .map(Duration::from_millis)
    }

    /// Return the validated field dimensions
    pub(crate) fn dimensions(&self) -> Result<(u8, u8), SnakeError> {
        let range = 1..=consts::MAX_FIELD_DIMENSION;
        if !range.contains(&self.width) || !range.contains(&self.height) {
            return Err(SnakeError::BadFieldSize);
        }
        let width = u8::try_from(self.width).map_err(|_| SnakeError::BadFieldSize)?;
        let height = u8::try_from(self.height).map_err(|_| SnakeError::BadFieldSize)?;
        Ok((width, height))
    }

    pub(crate) fn check_speed(&self) -> Result<(), SnakeError> {
        if self.speed == 0 {
            Err(SnakeError::BadSnakeSpeed)
        } else {
            Ok(())
        }
    }

    /// Compute where the snake's head starts.  The head sits a third of the
    /// way into the space not taken up by the snake, in the middle row, and
    /// the body trails off behind it.
    ///
    /// The field dimensions must already have been validated.
    pub(crate) fn snake_head(&self) -> Result<Position, SnakeError> {
        if self.initial_snake_size == 0 {
            return Err(SnakeError::BadSnakeSize);
        }
        let size = i64::from(self.initial_snake_size);
        let x = size + (i64::from(self.width) - size) / 3 - 1;
        let y = (i64::from(self.height) - 1) / 2;
        let head = Position::new(
            i16::try_from(x).map_err(|_| SnakeError::BadInitialPosition)?,
            i16::try_from(y).map_err(|_| SnakeError::BadInitialPosition)?,
        );
        let tail = head.offset(
            consts::INITIAL_DIRECTION.reverse(),
            self.initial_snake_size - 1,
        );
        if self.contains(head) && self.contains(tail) {
            Ok(head)
        } else {
            Err(SnakeError::BadInitialPosition)
        }
    }

    fn snake_len(&self) -> usize {
        usize::try_from(self.initial_snake_size).unwrap_or(usize::MAX)
    }

    fn contains(&self, pos: Position) -> bool {
        (0..i64::from(self.width)).contains(&i64::from(pos.x))
            && (0..i64::from(self.height)).contains(&i64::from(pos.y))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn session(width: u32, height: u32, speed: u32, initial_snake_size: u32) -> SessionConfig {
        SessionConfig {
            width,
            height,
            speed,
            wrap_walls: false,
            initial_snake_size,
        }
    }

    #[test]
    fn default_session() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.width, 21);
        assert_eq!(cfg.height, 15);
        assert_eq!(cfg.speed, 15);
        assert!(!cfg.wrap_walls);
        assert_eq!(cfg.initial_snake_size, 5);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[rstest]
    #[case(session(21, 15, 15, 5), Ok(()))]
    #[case(session(0, 15, 15, 5), Err(SnakeError::BadFieldSize))]
    #[case(session(21, 0, 15, 5), Err(SnakeError::BadFieldSize))]
    #[case(session(128, 15, 15, 5), Err(SnakeError::BadFieldSize))]
    #[case(session(21, 128, 15, 5), Err(SnakeError::BadFieldSize))]
    #[case(session(127, 127, 15, 5), Ok(()))]
    #[case(session(21, 15, 0, 5), Err(SnakeError::BadSnakeSpeed))]
    #[case(session(21, 15, 15, 0), Err(SnakeError::BadSnakeSize))]
    #[case(session(4, 15, 15, 5), Err(SnakeError::BadInitialPosition))]
    #[case(session(3, 15, 15, 5), Err(SnakeError::BadInitialPosition))]
    #[case(session(21, 15, 15, u32::MAX), Err(SnakeError::BadInitialPosition))]
    #[case(session(5, 1, 15, 5), Err(SnakeError::NoSpaceForFood))]
    #[case(session(6, 1, 15, 5), Ok(()))]
    #[case(session(1, 2, 1, 1), Ok(()))]
    #[case(session(1, 1, 1, 1), Err(SnakeError::NoSpaceForFood))]
    fn test_validate(#[case] cfg: SessionConfig, #[case] r: Result<(), SnakeError>) {
        assert_eq!(cfg.validate(), r);
    }

    #[rstest]
    #[case(session(21, 15, 15, 5), Position::new(9, 7))]
    #[case(session(5, 1, 15, 5), Position::new(4, 0))]
    #[case(session(127, 127, 15, 5), Position::new(44, 63))]
    #[case(session(10, 10, 15, 1), Position::new(3, 4))]
    fn test_snake_head(#[case] cfg: SessionConfig, #[case] head: Position) {
        assert_eq!(cfg.snake_head(), Ok(head));
    }

    #[rstest]
    #[case(15, Some(Duration::from_millis(66)))]
    #[case(1, Some(Duration::from_secs(1)))]
    #[case(2000, Some(Duration::ZERO))]
    #[case(0, None)]
    fn test_tick_period(#[case] speed: u32, #[case] period: Option<Duration>) {
        let cfg = SessionConfig {
            speed,
            ..SessionConfig::default()
        };
        assert_eq!(cfg.tick_period(), period);
    }

    #[test]
    fn load_full() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(
            tmpfile,
            concat!(
                "[session]\n",
                "width = 30\n",
                "height = 20\n",
                "speed = 8\n",
                "wrap-walls = true\n",
                "initial-snake-size = 3\n",
            )
        )
        .unwrap();
        tmpfile.flush().unwrap();
        let cfg = Config::load(tmpfile.path(), false).unwrap();
        assert_eq!(
            cfg,
            Config {
                session: SessionConfig {
                    width: 30,
                    height: 20,
                    speed: 8,
                    wrap_walls: true,
                    initial_snake_size: 3,
                }
            }
        );
    }

    #[test]
    fn load_partial() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "[session]\nwrap-walls = true").unwrap();
        tmpfile.flush().unwrap();
        let cfg = Config::load(tmpfile.path(), false).unwrap();
        assert_eq!(
            cfg.session,
            SessionConfig {
                wrap_walls: true,
                ..SessionConfig::default()
            }
        );
    }

    #[test]
    fn load_empty() {
        let tmpfile = NamedTempFile::new().unwrap();
        let cfg = Config::load(tmpfile.path(), false).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_invalid_values_unvalidated() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "[session]\nwidth = 500\nspeed = 0").unwrap();
        tmpfile.flush().unwrap();
        let cfg = Config::load(tmpfile.path(), false).unwrap();
        assert_eq!(cfg.session.width, 500);
        assert_eq!(cfg.session.validate(), Err(SnakeError::BadFieldSize));
    }

    #[test]
    fn load_missing_allowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&tmpdir.path().join("config.toml"), true).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_missing_disallowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let r = Config::load(&tmpdir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_bad_type() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "[session]\nwidth = \"wide\"").unwrap();
        tmpfile.flush().unwrap();
        let r = Config::load(tmpfile.path(), false);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_negative_size() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "[session]\ninitial-snake-size = -1").unwrap();
        tmpfile.flush().unwrap();
        let r = Config::load(tmpfile.path(), false);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }
}
