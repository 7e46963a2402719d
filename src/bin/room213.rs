use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use room213::{
    AmbientEngine, Clock as _, EspeakSpeech, ExperienceConfig, F32leFileSink, ManualClock, Millis,
    Projection, SceneRenderer as _, Session, SvgSceneRenderer, SystemClock, Timeline,
};

#[derive(Parser, Debug)]
#[command(name = "room213", version)]
struct Cli {
    /// Experience config JSON (defaults to the built-in Room 213).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log lifecycle events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the narrative script.
    Script,
    /// Render the scene visible at a given time as a PNG.
    Frame(FrameArgs),
    /// Render one ambient session (fade-in, hold, fade-out) to raw f32le PCM.
    Ambient(AmbientArgs),
    /// Play the experience in the terminal on the system clock.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Elapsed time in seconds.
    #[arg(long)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AmbientArgs {
    /// Seconds to play before the fade-out starts.
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    /// Output `.f32le` path (interleaved stereo).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Display refresh rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Also write the ambient soundscape to this `.f32le` file.
    #[arg(long)]
    ambient_out: Option<PathBuf>,

    /// Skip spoken narration even when `espeak-ng` is available.
    #[arg(long)]
    mute: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Script => cmd_script(&config),
        Command::Frame(args) => cmd_frame(&config, args),
        Command::Ambient(args) => cmd_ambient(&config, args),
        Command::Play(args) => cmd_play(config, args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "room213=debug" } else { "room213=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ExperienceConfig> {
    let Some(path) = path else {
        return Ok(ExperienceConfig::default());
    };
    ExperienceConfig::from_json_file(path)
        .with_context(|| format!("load config '{}'", path.display()))
}

fn cmd_script(config: &ExperienceConfig) -> anyhow::Result<()> {
    let timeline = Timeline::build(&config.scenes);
    let mut out = std::io::stdout().lock();
    for cue in timeline.cues() {
        writeln!(
            out,
            "[{}] {}",
            room213::foundation::math::format_timestamp(cue.start),
            cue.scene.title
        )?;
        writeln!(out, "    {}", cue.scene.voice_line)?;
        writeln!(out, "    ({})", cue.scene.sensation)?;
    }
    writeln!(
        out,
        "total {}",
        room213::foundation::math::format_timestamp(timeline.total_secs())
    )?;
    Ok(())
}

fn cmd_frame(config: &ExperienceConfig, args: FrameArgs) -> anyhow::Result<()> {
    let timeline = Timeline::build(&config.scenes);
    let projection = Projection::at(&timeline, args.at * 1000.0);
    let cue = projection
        .active_cue(&timeline)
        .context("the scene catalog is empty")?;

    let mut renderer = SvgSceneRenderer::new(config.canvas)?;
    let frame = renderer.render(cue.scene.key, projection.scene_progress)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} at {:.2})",
        args.out.display(),
        cue.scene.title,
        projection.scene_progress
    );
    Ok(())
}

fn cmd_ambient(config: &ExperienceConfig, args: AmbientArgs) -> anyhow::Result<()> {
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        anyhow::bail!("--seconds must be a non-negative number");
    }
    let clock = ManualClock::new(Millis(0.0));
    let mut engine = AmbientEngine::new(
        config.ambient.clone(),
        Some(F32leFileSink::new(&args.out)),
    );

    engine.start(clock.now());
    clock.advance_ms(args.seconds * 1000.0);
    engine.fade_out(clock.now());
    clock.advance_ms((config.ambient.teardown_delay_secs + 1.0) * 1000.0);
    engine.pump(clock.now());
    if engine.live_sessions() != 0 {
        engine.stop();
    }

    let written = std::fs::metadata(&args.out)
        .with_context(|| format!("stat '{}'", args.out.display()))?
        .len();
    eprintln!(
        "wrote {} ({} Hz stereo f32le, {:.2} s)",
        args.out.display(),
        config.ambient.sample_rate,
        written as f64 / 8.0 / f64::from(config.ambient.sample_rate)
    );
    Ok(())
}

fn cmd_play(config: ExperienceConfig, args: PlayArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }
    let speech = if args.mute {
        None
    } else {
        EspeakSpeech::detect()
    };
    let audio = args.ambient_out.as_ref().map(F32leFileSink::new);
    let mut session = Session::new(config, audio, speech)?;

    let clock = SystemClock::new();
    let frame = Duration::from_secs_f64(1.0 / f64::from(args.fps));
    let mut out = std::io::stdout().lock();
    let mut shown_title = String::new();
    let mut shown_subtitle = String::new();

    session.begin(clock.now());
    loop {
        let more = session.advance(clock.now());
        let display = session.display();

        if display.title != shown_title {
            writeln!(out)?;
            writeln!(out, "== {} [{}] ==", display.title, display.timestamp)?;
            writeln!(out, "   {}", display.sensation)?;
            shown_title.clone_from(&display.title);
            shown_subtitle.clear();
        }
        if display.typed_subtitle != shown_subtitle {
            write!(out, "\r   {}", display.typed_subtitle)?;
            out.flush()?;
            shown_subtitle.clone_from(&display.typed_subtitle);
        }

        let audio_done = session.ambient().live_sessions() == 0;
        let narration = session.narration();
        let speech_done = narration.pending() == 0
            && !narration.is_awaiting_voices()
            && narration
                .backend()
                .is_none_or(|b| !b.is_speaking() && b.queued() == 0);
        if !more && audio_done && speech_done {
            break;
        }
        std::thread::sleep(frame);
    }

    writeln!(out)?;
    writeln!(out, "Room 213 keeps you.")?;
    session.shutdown();
    if let Some(path) = &args.ambient_out {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
