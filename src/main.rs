use std::io;
use std::io::Write;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use life::camera::Camera;
use life::config::Args;
use life::config::Config;
use life::config::SeedMode;
use life::events;
use life::events::Event;
use life::world::World;

const ALIVE_COLOR: style::Color = style::Color::Rgb {
    r: 83,
    g: 195,
    b: 70,
};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the frame on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::validate(Args::parse()).context("Invalid configuration")?;

    let mut rng = match config.rng_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut world = World::new(config.rows, config.cols);
    seed(&mut world, &config, &mut rng)?;

    if config.headless {
        run_headless(&mut world, &config)
    } else {
        run_terminal(&mut world, &config, &mut rng)
    }
}

fn seed(world: &mut World, config: &Config, rng: &mut ChaCha8Rng) -> anyhow::Result<()> {
    match config.seed_mode {
        SeedMode::Random { probability } => world.seed_random(probability, rng)?,
        SeedMode::Pattern(preset) => {
            let pattern = preset.pattern();
            let origin = pattern
                .centered_in(world.rows(), world.cols())
                .unwrap_or((0, 0));

            world.seed_pattern(&pattern, origin)?
        }
    }

    Ok(())
}

/// Step as fast as possible, then print the last generation.
fn run_headless(world: &mut World, config: &Config) -> anyhow::Result<()> {
    let generations = config.generations.unwrap_or(0);
    info!(generations, "Running headless");

    world.advance(generations);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", world.current())?;
    writeln!(
        stdout,
        "generation {} population {}",
        world.generation(),
        world.population()
    )?;

    Ok(())
}

fn run_terminal(world: &mut World, config: &Config, rng: &mut ChaCha8Rng) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)
        .context("Failed to prepare the terminal")?;

    let res = tick_loop(&mut stdout, world, config, rng);

    // The terminal is restored even when the loop failed
    let restored = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)
        .and_then(|()| terminal::disable_raw_mode());

    res?;
    restored.context("Failed to restore the terminal")?;

    Ok(())
}

fn tick_loop(
    stdout: &mut io::Stdout,
    world: &mut World,
    config: &Config,
    rng: &mut ChaCha8Rng,
) -> anyhow::Result<()> {
    let frame_time = config.frame_time();
    let mut cam = Camera::fit(world.current());
    let mut paused = false;

    let (term_cols, term_rows) = terminal::size().context("Failed to read the terminal size")?;
    let viewport = Viewport::new(term_cols, term_rows);
    let (frame_cols, frame_lines) = cam.frame_size();
    if !viewport.fits(frame_cols, frame_lines) {
        warn!(
            frame_cols,
            frame_lines,
            term_cols,
            term_rows,
            "Frame is larger than the terminal and will be clipped"
        );
    }

    info!(
        rows = world.rows(),
        cols = world.cols(),
        fps = config.fps,
        "Starting simulation"
    );

    let reason = loop {
        let t = Instant::now();

        if config.generations.is_some_and(|n| world.generation() >= n) {
            break "generation limit reached";
        }

        let mut exit = false;
        let mut single_step = false;

        while event::poll(Duration::ZERO)? {
            match events::convert_event(event::read()?) {
                Some(Event::Exit) => exit = true,
                Some(Event::TogglePause) => paused = !paused,
                Some(Event::Step) => single_step = true,
                Some(Event::Reseed) => seed(world, config, rng)?,
                None => {}
            }
        }

        if exit {
            break "exit requested";
        }

        if !paused || single_step {
            world.step();
        }

        draw(stdout, &mut cam, world, paused, viewport).context("Failed to draw frame")?;

        thread::sleep(frame_time.saturating_sub(t.elapsed()));
    };

    info!(
        generation = world.generation(),
        population = world.population(),
        reason,
        "Stopped simulation"
    );

    Ok(())
}

/// Part of the terminal the frame may use. The last line is kept for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Viewport {
    cols: usize,
    lines: usize,
}

impl Viewport {
    fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            cols: term_cols as usize,
            lines: (term_rows as usize).saturating_sub(1),
        }
    }

    fn fits(&self, frame_cols: usize, frame_lines: usize) -> bool {
        frame_cols <= self.cols && frame_lines <= self.lines
    }

    /// The visible part of `frame`, line by line.
    fn clip<'a>(&self, frame: &'a str) -> impl Iterator<Item = &'a str> {
        let cols = self.cols;

        frame.lines().take(self.lines).map(move |line| match line.char_indices().nth(cols) {
            Some((i, _)) => &line[..i],
            None => line,
        })
    }
}

fn draw(
    out: &mut impl Write,
    cam: &mut Camera,
    world: &World,
    paused: bool,
    viewport: Viewport,
) -> io::Result<()> {
    cam.reset();
    cam.draw(world.current());
    let frame = cam.render();

    queue!(
        out,
        cursor::MoveTo(0, 0),
        style::SetForegroundColor(ALIVE_COLOR)
    )?;

    for line in viewport.clip(frame) {
        queue!(out, style::Print(line), cursor::MoveToNextLine(1))?;
    }

    let status = format!(
        "generation {} population {}{}",
        world.generation(),
        world.population(),
        if paused { " (paused)" } else { "" }
    );

    queue!(
        out,
        style::ResetColor,
        style::Print(status),
        terminal::Clear(terminal::ClearType::UntilNewLine)
    )?;

    out.flush()
}
