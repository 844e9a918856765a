//! Tilt Maze entry point
//!
//! Headless runner: replays a scripted input sequence through the frame
//! driver at a fixed frame rate and reports where the ball ended up.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use glam::Vec2;

use tilt_maze::sim::StepOutcome;
use tilt_maze::view::render_text;
use tilt_maze::{Key, Settings};

/// Tilt Maze
#[derive(Parser)]
#[command(version, about = "Roll a ball through a tilt maze from a scripted input run")]
struct Cli {
    /// JSON settings file (physics, input scaling, custom layout)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Space-separated commands: right|left|up|down|wait|tilt:X,Y, each
    /// optionally followed by *FRAMES (default 1). Keys release after
    /// their run.
    #[arg(long, default_value = "")]
    script: String,

    /// Synthetic frame rate used to space timestamps
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Print the maze with the final ball position
    #[arg(long)]
    draw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Key(Key),
    Wait,
    Tilt(Vec2),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    command: Command,
    frames: u32,
}

fn parse_segment(token: &str) -> Result<Segment> {
    let (name, frames) = match token.split_once('*') {
        Some((name, count)) => {
            let frames = count
                .parse::<u32>()
                .with_context(|| format!("bad frame count in `{token}`"))?;
            (name, frames)
        }
        None => (token, 1),
    };

    let command = match name {
        "right" => Command::Key(Key::Right),
        "left" => Command::Key(Key::Left),
        "up" => Command::Key(Key::Up),
        "down" => Command::Key(Key::Down),
        "wait" => Command::Wait,
        _ => {
            let Some(args) = name.strip_prefix("tilt:") else {
                bail!("unknown script command `{name}`");
            };
            let Some((x, y)) = args.split_once(',') else {
                bail!("tilt needs X,Y in `{token}`");
            };
            let x: f32 = x.parse().with_context(|| format!("bad tilt x in `{token}`"))?;
            let y: f32 = y.parse().with_context(|| format!("bad tilt y in `{token}`"))?;
            if !x.is_finite() || !y.is_finite() {
                bail!("tilt must be finite in `{token}`");
            }
            Command::Tilt(Vec2::new(x, y))
        }
    };

    Ok(Segment { command, frames })
}

fn parse_script(script: &str) -> Result<Vec<Segment>> {
    script.split_whitespace().map(parse_segment).collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.fps == 0 {
        bail!("--fps must be at least 1");
    }

    let settings = match &cli.settings {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let segments = parse_script(&cli.script)?;
    let mut driver = settings.build_driver().context("building the game")?;

    log::info!("Tilt Maze starting, {} script segments", segments.len());

    let frame_secs = 1.0 / cli.fps as f64;
    let mut frame: u64 = 0;
    let mut won_at = None;
    driver.frame(0.0)?;

    for segment in &segments {
        match segment.command {
            Command::Key(key) => driver.input.key_down(key),
            Command::Wait => driver.input.clear(),
            Command::Tilt(v) => driver.input.set_vector(v),
        }
        for _ in 0..segment.frames {
            frame += 1;
            let report = driver.frame(frame as f64 * frame_secs)?;
            if report.outcome == StepOutcome::JustWon {
                won_at = Some(frame);
            }
        }
        if let Command::Key(_) = segment.command {
            driver.input.key_up();
        }
    }

    let snapshot = driver.snapshot();
    println!("frames:  {frame}");
    println!(
        "ball:    ({:.3}, {:.3}) v=({:.3}, {:.3})",
        snapshot.ball.x,
        snapshot.ball.y,
        driver.engine().ball().vel.x,
        driver.engine().ball().vel.y
    );
    match won_at {
        Some(f) => println!("goal:    reached at frame {f}"),
        None => println!("goal:    not reached"),
    }
    println!("status:  {}", driver.status().text());

    if cli.draw {
        print!("{}", render_text(driver.engine().maze(), &snapshot));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let segments = parse_script("right*40 wait tilt:0.5,-1*3").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment {
                    command: Command::Key(Key::Right),
                    frames: 40
                },
                Segment {
                    command: Command::Wait,
                    frames: 1
                },
                Segment {
                    command: Command::Tilt(Vec2::new(0.5, -1.0)),
                    frames: 3
                },
            ]
        );
    }

    #[test]
    fn test_parse_script_errors() {
        assert!(parse_script("jump").is_err());
        assert!(parse_script("right*x").is_err());
        assert!(parse_script("tilt:1").is_err());
        assert!(parse_script("tilt:NaN,0").is_err());
        assert!(parse_script("tilt:0,inf").is_err());
        assert!(parse_script("").unwrap().is_empty());
    }
}
