use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::pattern::PatternError;
use crate::pattern::Preset;

/// Side length of the grid when none is given.
pub const DEFAULT_SIZE: usize = 200;

/// Target number of generations per second.
pub const DEFAULT_FPS: u32 = 20;

/// Probability that a randomly seeded cell starts alive.
pub const DEFAULT_DENSITY: f64 = 0.5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Grid dimensions must be positive, got {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },

    #[error("Frame rate must be at least 1")]
    ZeroFps,

    #[error("Seed probability must lie in [0, 1], got {probability}")]
    InvalidProbability { probability: f64 },

    #[error("Pattern does not fit: {0}")]
    PatternTooLarge(#[from] PatternError),
}

/// How the first generation is populated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedMode {
    /// Every cell is independently alive with `probability`.
    Random { probability: f64 },

    /// A preset, centered in the grid.
    Pattern(Preset),
}

/// Command line arguments, before validation.
#[derive(Debug, Parser)]
#[command(name = "life", about = "Conway's Game of Life in the terminal")]
pub struct Args {
    /// Side length of a square grid
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Number of rows, overriding --size
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of columns, overriding --size
    #[arg(long)]
    pub cols: Option<usize>,

    /// Target generations per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Probability that a cell starts alive when seeding randomly
    #[arg(long, default_value_t = DEFAULT_DENSITY, conflicts_with = "pattern")]
    pub density: f64,

    /// Seed for the random number generator. A fresh one is drawn when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start from a known pattern instead of random cells
    #[arg(long, value_enum)]
    pub pattern: Option<Preset>,

    /// Stop after this many generations
    #[arg(long)]
    pub generations: Option<u64>,

    /// Run without drawing and print the last generation
    #[arg(long)]
    pub headless: bool,
}

/// Validated start-up configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub fps: u32,
    pub seed_mode: SeedMode,
    pub rng_seed: Option<u64>,
    pub generations: Option<u64>,
    pub headless: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_SIZE,
            cols: DEFAULT_SIZE,
            fps: DEFAULT_FPS,
            seed_mode: SeedMode::Random {
                probability: DEFAULT_DENSITY,
            },
            rng_seed: None,
            generations: None,
            headless: false,
        }
    }
}

impl Config {
    /// Check `args` and turn them into a [`Config`].
    pub fn validate(args: Args) -> Result<Self, ConfigError> {
        let rows = args.rows.unwrap_or(args.size);
        let cols = args.cols.unwrap_or(args.size);

        if rows == 0 || cols == 0 {
            return Err(ConfigError::ZeroDimension { rows, cols });
        }

        if args.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }

        let seed_mode = match args.pattern {
            Some(preset) => {
                let pattern = preset.pattern();
                let origin = pattern.centered_in(rows, cols).unwrap_or((0, 0));
                pattern.check_fits(origin, rows, cols)?;

                SeedMode::Pattern(preset)
            }
            None => SeedMode::Random {
                probability: check_probability(args.density)?,
            },
        };

        Ok(Self {
            rows,
            cols,
            fps: args.fps,
            seed_mode,
            rng_seed: args.seed,
            generations: args.generations,
            headless: args.headless,
        })
    }

    /// Time budget of a single tick.
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

/// Reject probabilities outside `[0, 1]`, including NaN. Values are never clamped.
pub fn check_probability(probability: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(ConfigError::InvalidProbability { probability })
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use clap::Parser;

    use super::Args;
    use super::Config;
    use super::ConfigError;
    use super::SeedMode;
    use crate::pattern::Preset;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let args = Args::try_parse_from(std::iter::once("life").chain(args.iter().copied()))
            .expect("arguments should parse");

        Config::validate(args)
    }

    #[test]
    fn defaults() {
        assert_eq!(parse(&[]), Ok(Config::default()));
        assert_eq!(Config::default().frame_time(), Duration::from_millis(50));
    }

    #[test]
    fn rectangular() {
        let config = parse(&["--size", "10", "--cols", "30"]).unwrap();

        assert_eq!((config.rows, config.cols), (10, 30));
    }

    #[test]
    fn zero_dimension() {
        assert_eq!(
            parse(&["--rows", "0"]),
            Err(ConfigError::ZeroDimension { rows: 0, cols: 200 })
        );
    }

    #[test]
    fn zero_fps() {
        assert_eq!(parse(&["--fps", "0"]), Err(ConfigError::ZeroFps));
    }

    #[test]
    fn probability_is_not_clamped() {
        assert_eq!(
            parse(&["--density", "1.5"]),
            Err(ConfigError::InvalidProbability { probability: 1.5 })
        );
        assert!(matches!(
            parse(&["--density=-0.1"]),
            Err(ConfigError::InvalidProbability { .. })
        ));
        assert!(super::check_probability(f64::NAN).is_err());
        assert_eq!(super::check_probability(0.0), Ok(0.0));
        assert_eq!(super::check_probability(1.0), Ok(1.0));
    }

    #[test]
    fn pattern() {
        let config = parse(&["--pattern", "r-pentomino", "--seed", "7"]).unwrap();

        assert_eq!(config.seed_mode, SeedMode::Pattern(Preset::RPentomino));
        assert_eq!(config.rng_seed, Some(7));
    }

    #[test]
    fn pattern_too_large() {
        assert!(matches!(
            parse(&["--pattern", "beacon", "--size", "3"]),
            Err(ConfigError::PatternTooLarge(_))
        ));
    }

    #[test]
    fn pattern_conflicts_with_density() {
        let res = Args::try_parse_from(["life", "--pattern", "glider", "--density", "0.2"]);

        assert!(res.is_err());
    }
}
