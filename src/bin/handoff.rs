use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use handoff::{
    CompletionNotifier, EngineUnavailable, HandoffConfig, LoadRequest, Millis, OverlayHost,
    OverlayScene, Rect, SequencePhase, SequencerEngine, SettleOutcome, StaticLayout,
    TransitionSequencer, Viewport, WordAnchor,
};

#[derive(Parser, Debug)]
#[command(name = "handoff", version)]
struct Cli {
    /// Log sequencer internals to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a handoff configuration file.
    Validate(ValidateArgs),
    /// Simulate a handoff against a fixed layout and print its timing as JSON.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Handoff configuration JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Handoff configuration JSON (defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in CSS pixels.
    #[arg(long, default_value_t = 1440.0)]
    width: f64,

    /// Viewport height in CSS pixels.
    #[arg(long, default_value_t = 900.0)]
    height: f64,

    /// Destination region as `x,y,w,h`.
    #[arg(long, value_parser = parse_region)]
    region: Option<Rect>,

    /// Word anchor as `x,y,w,h,font`; repeat once per word, in order.
    #[arg(long = "anchor", value_parser = parse_anchor)]
    anchors: Vec<WordAnchor>,

    /// When fonts report ready.
    #[arg(long, default_value_t = 100)]
    fonts_ms: u64,

    /// When every image finishes loading; omit to simulate images that never settle.
    #[arg(long)]
    assets_ms: Option<u64>,

    /// Simulated frame interval.
    #[arg(long, default_value_t = 100)]
    step_ms: u64,

    /// Simulate an animation engine that fails to load.
    #[arg(long)]
    engine_unavailable: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn read_config(path: &Path) -> anyhow::Result<HandoffConfig> {
    HandoffConfig::from_path(path)
        .with_context(|| format!("load handoff config '{}'", path.display()))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let cfg = read_config(&args.config)?;
    eprintln!(
        "ok: {} images, {} words",
        cfg.asset_manifest.len(),
        cfg.word_sequence.len()
    );
    Ok(())
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    parts
        .try_into()
        .map_err(|v: Vec<f64>| format!("expected {N} comma-separated numbers, got {}", v.len()))
}

fn parse_region(s: &str) -> Result<Rect, String> {
    let [x, y, w, h] = parse_numbers::<4>(s)?;
    Ok(Rect::new(x, y, x + w, y + h))
}

fn parse_anchor(s: &str) -> Result<WordAnchor, String> {
    let [x, y, w, h, font_size] = parse_numbers::<5>(s)?;
    Ok(WordAnchor {
        rect: Rect::new(x, y, x + w, y + h),
        font_size,
    })
}

/// Host that paints synchronously and keeps the latest scene.
#[derive(Debug, Default)]
struct PlanHost {
    loads: Vec<LoadRequest>,
    paint_requested: bool,
    scene: Option<OverlayScene>,
    dismissed: bool,
}

impl OverlayHost for PlanHost {
    fn load_assets(&mut self, requests: &[LoadRequest]) {
        self.loads = requests.to_vec();
    }

    fn request_stable_paint(&mut self) {
        self.paint_requested = true;
    }

    fn remove_legacy_indicator(&mut self, _selector: &str) {}

    fn render(&mut self, scene: &OverlayScene) {
        self.scene = Some(scene.clone());
    }

    fn dismiss_overlay(&mut self) {
        self.dismissed = true;
    }

    fn phase_changed(&mut self, phase: SequencePhase) {
        tracing::info!(?phase, "phase");
    }
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step_ms > 0, "--step-ms must be > 0");
    let cfg = match &args.config {
        Some(path) => read_config(path)?,
        None => HandoffConfig::default(),
    };

    let viewport = Viewport::new(args.width, args.height, 1.0)?;
    let mut layout = StaticLayout::new(viewport);
    layout.region = args.region;
    layout.anchors = args.anchors.iter().copied().map(Some).collect();

    let engine_unavailable = args.engine_unavailable;
    let loader = move || -> Result<SequencerEngine, EngineUnavailable> {
        if engine_unavailable {
            Err(EngineUnavailable::new("disabled by --engine-unavailable"))
        } else {
            Ok(SequencerEngine::new())
        }
    };
    let mut seq = TransitionSequencer::with_engine_loader(
        cfg,
        PlanHost::default(),
        loader,
        CompletionNotifier::none(),
    )?;

    // Generous bound: every phase plus the safety timeout, twice over.
    let t = &seq.config().timings;
    let limit = [
        t.safety_timeout,
        t.reveal_delay,
        t.reveal_duration,
        t.hold,
        t.morph_duration,
        t.slide_out_duration,
        t.desaturate_delay,
        t.desaturate_duration,
        t.fade_duration,
        Millis(t.reveal_stagger.0.saturating_mul(seq.config().word_sequence.len() as u64)),
        Millis(args.fonts_ms),
        Millis(args.assets_ms.unwrap_or(0)),
    ]
    .iter()
    .fold(Millis::ZERO, |acc, m| acc.plus(*m))
    .scaled(2.0);

    let mut frames = Vec::new();
    let mut fonts_sent = false;
    let mut assets_sent = false;
    let mut now = Millis::ZERO;
    seq.mount(now, &layout);

    loop {
        if !fonts_sent && now.0 >= args.fonts_ms {
            seq.on_fonts_ready(now);
            fonts_sent = true;
        }
        if !assets_sent && args.assets_ms.is_some_and(|at| now.0 >= at) {
            for req in seq.host().loads.clone() {
                seq.on_asset_settled(req.index, SettleOutcome::Loaded, now);
            }
            assets_sent = true;
        }
        seq.tick(now, &layout);
        if std::mem::take(&mut seq.host_mut().paint_requested) {
            seq.on_stable_paint(now, &layout);
        }
        if let Some(scene) = seq.host_mut().scene.take() {
            frames.push(serde_json::json!({
                "t": now,
                "phase": seq.phase(),
                "scene": scene,
            }));
        }

        if seq.phase() == SequencePhase::Complete {
            break;
        }
        anyhow::ensure!(
            now < limit,
            "handoff did not complete within {} ms (stuck in {:?})",
            limit.0,
            seq.phase()
        );
        now = now.plus(Millis(args.step_ms));
    }

    let history: Vec<_> = seq
        .phase_history()
        .iter()
        .map(|(phase, at)| serde_json::json!({ "phase": phase, "at": at }))
        .collect();
    let plan = serde_json::json!({
        "phases": history,
        "schedule": seq.schedule(),
        "destination": seq.destination(),
        "dismissed": seq.host().dismissed,
        "frames": frames,
    });

    let out = serde_json::to_string_pretty(&plan).context("serialize plan")?;
    println!("{out}");
    Ok(())
}
