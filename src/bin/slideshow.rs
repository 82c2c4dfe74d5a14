use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use slideshow::{
    Evaluator, HeadlessRenderer, LocalClock, LoggedCue, ParseOptions, Phase, SlideshowSession,
};

#[derive(Parser, Debug)]
#[command(name = "slideshow", version)]
struct Cli {
    /// Slideshow configuration file.
    #[arg(default_value = "slideshow.txt")]
    config: PathBuf,

    /// Require a newline after every `key = value` assignment.
    #[arg(long)]
    strict_newlines: bool,

    /// Print the evaluated frame at this loop time (seconds) as JSON and exit.
    #[arg(long, value_name = "SECONDS")]
    at: Option<f64>,

    /// Headless playback rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Number of full loops to play before exiting.
    #[arg(long, default_value_t = 1)]
    loops: u32,

    /// Decode each image header while loading and fail on unreadable files.
    #[arg(long)]
    verify_images: bool,

    /// Song announced at every loop start.
    #[arg(long)]
    song: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = if cli.strict_newlines {
        ParseOptions::strict_newlines()
    } else {
        ParseOptions::default()
    };
    let show = slideshow::parse_file(&cli.config, opts)?;

    match cli.at {
        Some(at) => cmd_at(&show, at),
        None => cmd_play(show, &cli),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_at(show: &slideshow::Slideshow, at: f64) -> anyhow::Result<()> {
    let frame_time = slideshow::wrap_frame_time(at, show.total_duration());
    let frame = Evaluator::eval_frame(show, frame_time);
    let json = serde_json::to_string_pretty(&frame).context("serialize frame")?;
    println!("{json}");
    Ok(())
}

fn cmd_play(show: slideshow::Slideshow, cli: &Cli) -> anyhow::Result<()> {
    if cli.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }
    let renderer = if cli.verify_images {
        HeadlessRenderer::verifying_images()
    } else {
        HeadlessRenderer::new()
    };
    let mut session = SlideshowSession::new(show, renderer, LocalClock::standalone())
        .context("load slideshow elements")?
        .with_cue(LoggedCue::new(cli.song.clone()));
    session.begin();

    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(cli.fps));
    let mut loops_started = 0u32;
    loop {
        let report = session.tick()?;
        if report.tick.phase == Phase::Running && report.tick.loop_restarted {
            loops_started += 1;
            if loops_started > cli.loops {
                break;
            }
            tracing::info!(loop_index = loops_started, "loop started");
        }
        std::thread::sleep(frame_interval);
    }

    let r = session.renderer();
    tracing::info!(
        frames = r.frames_rendered,
        draws = r.draws_submitted,
        "playback finished"
    );
    Ok(())
}
