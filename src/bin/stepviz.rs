use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stepviz", version)]
struct Cli {
    /// Log at debug level unless STEPVIZ_LOG says otherwise.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an engine on an input and print one frame of the resulting history.
    Run(RunArgs),
    /// Print one frame of a recorded history.
    Show(ShowArgs),
    /// Play a recorded history in real time.
    Play(PlayArgs),
    /// Validate every object of a recorded history against the type registry.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Engine executable. Reads the input on stdin, writes the frame array on stdout.
    #[arg(long)]
    engine: PathBuf,

    /// Extra argument passed to the engine (repeatable).
    #[arg(long = "arg")]
    args: Vec<String>,

    /// Input text.
    #[arg(long, conflicts_with = "input_file")]
    input: Option<String>,

    /// Read the input text from a file.
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Frame index (0-based, clamped to the history).
    #[arg(long, default_value_t = 0)]
    frame: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Text)]
    format: FormatChoice,
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Recorded history JSON.
    #[arg(long)]
    history: PathBuf,

    /// Frame index (0-based, clamped to the history).
    #[arg(long, default_value_t = 0)]
    frame: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Text)]
    format: FormatChoice,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Recorded history JSON.
    #[arg(long)]
    history: PathBuf,

    /// Frame to start from.
    #[arg(long, default_value_t = 0)]
    from: usize,

    /// Delay between frames.
    #[arg(long, default_value_t = 400)]
    interval_ms: u64,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Recorded history JSON.
    #[arg(long)]
    history: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Text,
    Json,
}

impl From<FormatChoice> for stepviz::OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Text => Self::Text,
            FormatChoice::Json => Self::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Show(args) => cmd_show(args),
        Command::Play(args) => cmd_play(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("STEPVIZ_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_history(path: &Path) -> anyhow::Result<stepviz::History> {
    stepviz::History::from_path(path)
        .with_context(|| format!("load history '{}'", path.display()))
}

fn print_frame(
    player: &stepviz::PlaybackController,
    renderer: &dyn stepviz::FrameRenderer,
) -> anyhow::Result<()> {
    let (Some(index), Some(frame)) = (player.index(), player.current_frame()) else {
        println!("(no frames)");
        return Ok(());
    };
    let out = stepviz::render_frame(frame, renderer)
        .with_context(|| format!("render frame {index}"))?;
    println!("--- frame {}/{} ---", index + 1, player.len());
    print!("{out}");
    if !out.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let raw_input = match (&args.input, &args.input_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("read input '{}'", path.display()))?,
        (None, None) => String::new(),
    };

    let mut opts = stepviz::CommandEngineOpts::new(&args.engine);
    opts.args = args.args;
    let engine = stepviz::EngineHandle::init(stepviz::CommandEngine::new(opts));

    let mut boundary = stepviz::InvocationBoundary::new(engine);
    let mut player = stepviz::PlaybackController::default();
    let mut reporter = stepviz::LogReporter;

    match boundary.invoke(raw_input, &mut player, &mut reporter) {
        stepviz::InvokeOutcome::Applied { .. } => {}
        stepviz::InvokeOutcome::Empty => anyhow::bail!("engine returned no output"),
        stepviz::InvokeOutcome::Failed(err) => return Err(err.into()),
        stepviz::InvokeOutcome::Stale => anyhow::bail!("invocation superseded (bug)"),
    }

    player.scrub_to(args.frame, stepviz::Millis::ZERO);
    let renderer = stepviz::create_renderer(args.format.into());
    print_frame(&player, renderer.as_ref())
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<()> {
    let history = read_history(&args.history)?;
    let mut player = stepviz::PlaybackController::default();
    player.load(history);
    player.scrub_to(args.frame, stepviz::Millis::ZERO);

    let renderer = stepviz::create_renderer(args.format.into());
    print_frame(&player, renderer.as_ref())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let history = read_history(&args.history)?;
    let opts = stepviz::PlaybackOpts::new(stepviz::Millis(args.interval_ms))?;
    let mut player = stepviz::PlaybackController::new(opts);
    player.load(history);

    let start = Instant::now();
    let now = || stepviz::Millis::from_duration(start.elapsed());
    let renderer = stepviz::TextRenderer::new();

    player.scrub_to(args.from, now());
    print_frame(&player, &renderer)?;
    if !player.play(now()) {
        return Ok(());
    }

    while let Some(deadline) = player.next_deadline() {
        let wait = deadline.saturating_sub(now());
        std::thread::sleep(wait.as_duration());
        if player.advance(now()) > 0 {
            print_frame(&player, &renderer)?;
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let history = read_history(&args.history)?;
    let report = stepviz::check_history(&history);

    for skip in &report.skipped {
        eprintln!(
            "skipped: frame {} object '{}' has unrecognized type '{}'",
            skip.frame, skip.name, skip.type_name
        );
    }

    let report = report
        .into_result()
        .map_err(stepviz::VizError::from)
        .with_context(|| format!("history '{}' has schema violations", args.history.display()))?;
    println!("ok: {} frames, {} objects", report.frames, report.objects);
    Ok(())
}
