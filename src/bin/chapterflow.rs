use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chapterflow::{
    ChapterDeck, ChapterView, Direction, Fps, RawInput, SequencerConfig, TextSplit,
    build_transition,
};

#[derive(Parser, Debug)]
#[command(name = "chapterflow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a chapter deck.
    Validate(DeckArgs),
    /// Print the resolved transition timeline between two chapters as JSON.
    Plan(PlanArgs),
    /// Mount a view, replay an input script and print the state after each event.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct DeckArgs {
    /// Chapter deck JSON (defaults to the built-in heritage deck).
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Sequencer config JSON; unset fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    deck: DeckArgs,

    /// Outgoing chapter; omit for the first activation.
    #[arg(long)]
    from: Option<usize>,

    /// Incoming chapter (wrapped into range).
    #[arg(long, allow_hyphen_values = true)]
    to: isize,

    /// Build the backward variant.
    #[arg(long)]
    backward: bool,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    deck: DeckArgs,

    /// Comma-separated events: `fwd`, `back`, `click:N`, `wait:SECS`.
    #[arg(long)]
    script: String,

    /// Frame rate of the simulated clock.
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ScriptEvent {
    Forward,
    Backward,
    Click(usize),
    Wait(f64),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn load_deck(path: Option<&Path>) -> anyhow::Result<ChapterDeck> {
    match path {
        Some(path) => ChapterDeck::from_path(path)
            .with_context(|| format!("load deck '{}'", path.display())),
        None => ChapterDeck::heritage().context("load built-in heritage deck"),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SequencerConfig> {
    match path {
        Some(path) => SequencerConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(SequencerConfig::default()),
    }
}

fn cmd_validate(args: DeckArgs) -> anyhow::Result<()> {
    let deck = load_deck(args.deck.as_deref())?;
    load_config(args.config.as_deref())?;

    println!("ok: {} chapters", deck.len());
    for chapter in deck.iter() {
        println!(
            "  [{}] {} {} ({} media, {})",
            chapter.index,
            chapter.year,
            chapter.title,
            chapter.media.len(),
            if chapter.has_dark_background() {
                "dark"
            } else {
                "light"
            }
        );
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let deck = load_deck(args.deck.deck.as_deref())?;
    let config = load_config(args.deck.config.as_deref())?;

    let chapter = deck.wrapped(args.to);
    let from = args.from.map(|i| chapterflow::wrap_index(i as isize, deck.len()));
    let direction = if args.backward {
        Direction::Backward
    } else {
        Direction::Forward
    };
    let title = TextSplit::new(&chapter.title);
    let resolved = build_transition(chapter, &title, from, direction, &config)
        .resolve(config.seed)
        .context("resolve transition timeline")?;

    let out = serde_json::json!({
        "from": from,
        "to": chapter.index,
        "direction": direction,
        "timeline": resolved,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn parse_script(script: &str) -> anyhow::Result<Vec<ScriptEvent>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|token| -> anyhow::Result<ScriptEvent> {
            let event = match token.split_once(':') {
                None if token == "fwd" || token == "forward" => ScriptEvent::Forward,
                None if token == "back" || token == "backward" => ScriptEvent::Backward,
                Some(("click", n)) => ScriptEvent::Click(
                    n.parse()
                        .with_context(|| format!("invalid chapter index in '{token}'"))?,
                ),
                Some(("wait", secs)) => {
                    let secs: f64 = secs
                        .parse()
                        .with_context(|| format!("invalid duration in '{token}'"))?;
                    anyhow::ensure!(
                        secs.is_finite() && secs >= 0.0,
                        "wait must be >= 0 (got '{token}')"
                    );
                    ScriptEvent::Wait(secs)
                }
                _ => anyhow::bail!("unknown script event '{token}'"),
            };
            Ok(event)
        })
        .collect()
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let events = parse_script(&args.script)?;
    let deck = load_deck(args.deck.deck.as_deref())?;
    let config = load_config(args.deck.config.as_deref())?;
    let fps = Fps::new(args.fps, 1)?;
    // One wheel notch, well past the gesture tolerance.
    let notch = (config.gesture_tolerance * 4.0).max(100.0);

    let mut view = ChapterView::mount_deck(deck, config)?;
    print_state(&view, "mount", None)?;

    for event in events {
        let (label, outcome) = match event {
            ScriptEvent::Forward => (
                "fwd".to_owned(),
                view.handle_input(RawInput::Wheel { delta_y: notch }),
            ),
            ScriptEvent::Backward => (
                "back".to_owned(),
                view.handle_input(RawInput::Wheel { delta_y: -notch }),
            ),
            ScriptEvent::Click(index) => (format!("click:{index}"), Some(view.click_tick(index))),
            ScriptEvent::Wait(secs) => {
                let dt = fps.frame_duration_secs();
                for _ in 0..fps.frames_for_secs(secs) {
                    view.advance(dt);
                }
                (format!("wait:{secs}"), None)
            }
        };
        print_state(&view, &label, outcome)?;
    }

    view.teardown();
    Ok(())
}

fn print_state(
    view: &ChapterView,
    event: &str,
    outcome: Option<chapterflow::GotoOutcome>,
) -> anyhow::Result<()> {
    let snapshot = view.snapshot();
    let indicator = view.indicator();
    let line = serde_json::json!({
        "event": event,
        "outcome": outcome,
        "active_index": snapshot.active_index,
        "is_transitioning": snapshot.is_transitioning,
        "visible_sections": view.stage().visible_sections(),
        "position_percent": indicator.position_percent,
        "label": indicator.label,
    });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}
