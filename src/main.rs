use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod console;
mod options;

use console::{ConsoleCommand, ConsoleRender};
use lifecanvas::{
    Driver, DriverConfig, GenerationStats, Grid, PointerEditor, driver::DEFAULT_INTERVAL,
};

/// Longest wait for input while nothing is scheduled
const IDLE_POLL: Duration = Duration::from_millis(50);

fn init_tracing(headless: bool) {
    // the interactive UI owns the terminal, so stay quiet unless asked
    let default = if headless { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let Some(args) = options::Args::from_env().context("invalid arguments")? else {
        return Ok(());
    };
    init_tracing(args.headless());

    let terminal = if args.headless() {
        None
    } else {
        Some(crossterm::terminal::size().context("query terminal size")?)
    };
    let (rows, cols) = args.grid_size(terminal)?;
    let grid = Grid::new(rows, cols)?;
    let config = DriverConfig {
        interval: args.interval()?.unwrap_or(DEFAULT_INTERVAL),
        live_probability: args.live_probability()?,
    };
    let mut rng = match args.seed()? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut driver = Driver::new(grid, config);
    args.fill_mode()?.apply(&mut driver, &mut rng);
    info!(rows, cols, alive = driver.population(), "grid ready");

    if args.headless() {
        run_headless(&args, driver)
    } else {
        run_console(&args, driver, &mut rng)
    }
}

fn run_headless(args: &options::Args, mut driver: Driver) -> anyhow::Result<()> {
    let sleep = args.interval()?;
    let mut stats = GenerationStats::new(driver.population());
    for _ in 0..args.generations()? {
        // report metrics every 500ms
        if stats.has_report() {
            println!("{}", stats.report(driver.generation()));
        }

        driver.step_once();
        stats.record(driver.population());
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }

    println!("{}", stats.report(driver.generation()));
    info!(
        generation = driver.generation(),
        alive = driver.population(),
        "finished"
    );
    Ok(())
}

fn run_console(args: &options::Args, mut driver: Driver, rng: &mut StdRng) -> anyhow::Result<()> {
    let cell_size = args.cell_size()?;
    let mut console = ConsoleRender::new(cell_size).context("enter terminal ui")?;
    let mut editor = PointerEditor::new(cell_size);
    let mut stats = GenerationStats::new(driver.population());
    let mut dirty = true;

    loop {
        if driver.tick(Instant::now()) {
            stats.record(driver.population());
            dirty = true;
        }
        if driver.is_running() && stats.has_report() {
            console.set_rate(stats.rate());
            dirty = true;
        }
        if dirty {
            console.render(&driver, editor.preview())?;
            dirty = false;
        }

        let timeout = driver
            .time_until_next(Instant::now())
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL));
        let Some(cmd) = console.poll_events(timeout)? else {
            continue;
        };
        dirty = true;
        match cmd {
            ConsoleCommand::Exit => break,
            ConsoleCommand::Start => driver.start(Instant::now()),
            ConsoleCommand::Pause => driver.pause(),
            ConsoleCommand::TogglePause if driver.is_running() => driver.pause(),
            ConsoleCommand::TogglePause => driver.start(Instant::now()),
            ConsoleCommand::Step => {
                driver.step_once();
                stats.record(driver.population());
            }
            ConsoleCommand::Clear => {
                driver.clear();
                stats.reset(driver.population());
            }
            ConsoleCommand::Randomize => {
                driver.randomize(rng);
                stats.reset(driver.population());
            }
            ConsoleCommand::Press { x, y } => {
                editor.press(x, y, driver.grid_mut());
                stats.observe(driver.population());
            }
            ConsoleCommand::Drag { x, y } => {
                editor.drag(x, y, driver.grid_mut());
                stats.observe(driver.population());
            }
            ConsoleCommand::Release => editor.release(),
            ConsoleCommand::Hover { x, y } => editor.hover(x, y, driver.grid()),
            ConsoleCommand::Leave => editor.leave(),
            ConsoleCommand::Redraw => {}
            ConsoleCommand::Handled => dirty = false,
        }
    }
    std::mem::drop(console);

    info!(
        generation = driver.generation(),
        alive = driver.population(),
        "exited"
    );
    Ok(())
}
