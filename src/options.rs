use std::{str::FromStr, time::Duration};

use lifecanvas::{CellSize, Driver, driver};
use thiserror::Error;

/// Grid size used in headless mode when no size is given
const HEADLESS_GRID: (usize, usize) = (64, 64);
/// Generations run in headless mode when no count is given
const HEADLESS_GENERATIONS: u64 = 100;
/// Terminal rows reserved below the grid for the footer
const FOOTER_ROWS: u16 = 1;

#[derive(Debug, Error)]
pub enum ArgsError {
    #[error(transparent)]
    Parse(#[from] getopts::Fail),

    #[error("invalid value {value:?} for --{name}")]
    InvalidValue { name: &'static str, value: String },

    #[error("--{name} must be {expected}")]
    OutOfRange {
        name: &'static str,
        expected: &'static str,
    },

    #[error("terminal is too small for the requested cell size")]
    TerminalTooSmall,
}

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>, ArgsError> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("", "headless", "run without a terminal UI");
        opts.optopt("w", "width", "set grid width in cells", "COLS");
        opts.optopt("h", "height", "set grid height in cells", "ROWS");
        opts.optopt(
            "i",
            "interval",
            "the amount of time between generations",
            "MILLIS",
        );
        opts.optopt(
            "p",
            "probability",
            "chance of a cell being alive when randomizing",
            "P",
        );
        opts.optopt("", "seed", "seed for the random number generator", "N");
        opts.optopt("f", "fill", "initial fill (random, empty)", "TYPE");
        opts.optopt("g", "gens", "generations to run in headless mode", "COUNT");
        opts.optopt("", "cell-width", "terminal columns per cell", "N");
        opts.optopt("", "cell-height", "terminal rows per cell", "N");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifecanvas [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>, ArgsError> {
        let env = std::env::args().skip(1).collect::<Vec<_>>();
        Self::new(&env)
    }

    fn parsed<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, ArgsError> {
        match self.matches.opt_str(name) {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| ArgsError::InvalidValue { name, value }),
        }
    }
    fn positive(&self, name: &'static str) -> Result<Option<usize>, ArgsError> {
        match self.parsed::<usize>(name)? {
            Some(0) => Err(ArgsError::OutOfRange {
                name,
                expected: "at least 1",
            }),
            other => Ok(other),
        }
    }

    pub fn headless(&self) -> bool {
        self.matches.opt_present("headless")
    }

    pub fn generations(&self) -> Result<u64, ArgsError> {
        Ok(self.parsed("gens")?.unwrap_or(HEADLESS_GENERATIONS))
    }
    pub fn interval(&self) -> Result<Option<Duration>, ArgsError> {
        Ok(match self.parsed::<u64>("interval")? {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if !self.headless() => Some(driver::DEFAULT_INTERVAL),
            None => None,
        })
    }
    pub fn live_probability(&self) -> Result<f64, ArgsError> {
        match self.parsed::<f64>("probability")? {
            None => Ok(driver::DEFAULT_LIVE_PROBABILITY),
            Some(p) if (0.0..=1.0).contains(&p) => Ok(p),
            Some(_) => Err(ArgsError::OutOfRange {
                name: "probability",
                expected: "between 0 and 1",
            }),
        }
    }
    pub fn seed(&self) -> Result<Option<u64>, ArgsError> {
        self.parsed("seed")
    }

    pub fn cell_size(&self) -> Result<CellSize, ArgsError> {
        let default = CellSize::default();
        let width = self.positive("cell-width")?.map_or(default.width, clamp_i32);
        let height = self.positive("cell-height")?.map_or(default.height, clamp_i32);
        CellSize::new(width, height).ok_or(ArgsError::OutOfRange {
            name: "cell-width",
            expected: "positive",
        })
    }

    /// Grid size as `(rows, cols)`
    ///
    /// Without an explicit size, the grid fills `terminal` (columns, rows)
    /// minus the footer, or falls back to the headless default.
    pub fn grid_size(&self, terminal: Option<(u16, u16)>) -> Result<(usize, usize), ArgsError> {
        let default = match terminal {
            Some((cols, rows)) if !self.headless() => {
                let cell = self.cell_size()?;
                let rows = rows.saturating_sub(FOOTER_ROWS) as usize / cell.height as usize;
                let cols = cols as usize / cell.width as usize;
                if rows == 0 || cols == 0 {
                    return Err(ArgsError::TerminalTooSmall);
                }
                (rows, cols)
            }
            _ => HEADLESS_GRID,
        };

        Ok((
            self.positive("height")?.unwrap_or(default.0),
            self.positive("width")?.unwrap_or(default.1),
        ))
    }

    pub fn fill_mode(&self) -> Result<FillMode, ArgsError> {
        match self.matches.opt_str("fill") {
            None if self.headless() => Ok(FillMode::Random),
            None => Ok(FillMode::Empty),
            Some(value) => FillMode::new(&value).ok_or(ArgsError::InvalidValue {
                name: "fill",
                value,
            }),
        }
    }
}

fn clamp_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Random,
    Empty,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    pub fn apply<R: rand::Rng + ?Sized>(self, driver: &mut Driver, rng: &mut R) {
        match self {
            Self::Random => driver.randomize(rng),
            Self::Empty => driver.clear(),
        }
    }
}
