use std::{
    cell::RefCell,
    collections::BTreeMap,
    ops::ControlFlow,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cdg", version, about = "Decode and render CD+Graphics streams")]
struct Cli {
    /// Log decoder and playback events to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every packet with its decoded instruction.
    Inspect(InspectArgs),
    /// Play up to a point in time and write the picture as a PNG.
    Frame(FrameArgs),
    /// Play at a fixed frame rate, writing one PNG per rendered frame.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input .cdg file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Player settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Print a JSON report instead of a listing.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Playback position in milliseconds.
    #[arg(long)]
    at_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output directory; files are named frame_000000.png and up.
    #[arg(long)]
    out_dir: PathBuf,

    /// Host refresh rate driving the ticks.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Stop once playback reaches this position.
    #[arg(long)]
    until_ms: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "cdg=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(input: &InputArgs) -> anyhow::Result<(Vec<u8>, cdg::PlayerSettings)> {
    let bytes = std::fs::read(&input.in_path)
        .with_context(|| format!("read cdg '{}'", input.in_path.display()))?;
    let settings = match &input.settings {
        Some(path) => cdg::PlayerSettings::from_path(path)
            .with_context(|| format!("load settings '{}'", path.display()))?,
        None => cdg::PlayerSettings::default(),
    };
    Ok((bytes, settings))
}

#[derive(serde::Serialize)]
struct InspectRow<'a> {
    index: usize,
    hex: String,
    instruction: &'a cdg::Instruction,
}

#[derive(serde::Serialize)]
struct InspectReport<'a> {
    packets: usize,
    trailing_bytes: usize,
    opcodes: BTreeMap<&'static str, usize>,
    instructions: Vec<InspectRow<'a>>,
    diagnostics: Vec<cdg::Diagnostic>,
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (bytes, settings) = read_input(&args.input)?;
    let decoder = cdg::Decoder::new(cdg::OpcodeTable::from_settings(&settings));

    let mut diag = cdg::CollectingSink::new();
    let instructions = decoder.decode_stream(&bytes, &mut diag);

    let mut opcodes = BTreeMap::new();
    for instruction in &instructions {
        *opcodes.entry(instruction.name()).or_insert(0usize) += 1;
    }

    let report = InspectReport {
        packets: instructions.len(),
        trailing_bytes: cdg::trailing_bytes(bytes.len()),
        opcodes,
        instructions: cdg::packets(&bytes)
            .zip(&instructions)
            .enumerate()
            .map(|(index, (packet, instruction))| InspectRow {
                index,
                hex: packet.hex(),
                instruction,
            })
            .collect(),
        diagnostics: diag.take(),
    };

    if args.json {
        let text = serde_json::to_string_pretty(&report).context("serialize inspect report")?;
        println!("{text}");
        return Ok(());
    }

    for row in &report.instructions {
        println!("{:>7}  {}  {}", row.index, row.hex, row.instruction);
    }
    println!();
    println!(
        "{} packets ({:.2} s), {} trailing bytes",
        report.packets,
        cdg::PacketRate::CD.packets_to_ms(report.packets as u64) / 1000.0,
        report.trailing_bytes
    );
    for (name, count) in &report.opcodes {
        println!("  {name:<18} {count}");
    }
    if !report.diagnostics.is_empty() {
        println!("{} diagnostics:", report.diagnostics.len());
        for d in &report.diagnostics {
            println!("  {d}");
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (bytes, settings) = read_input(&args.input)?;
    anyhow::ensure!(args.at_ms.is_finite(), "--at-ms must be finite");

    let time = cdg::ManualTime::new(0.0);
    let mut clock = cdg::PlaybackClock::new(time.clone()).with_settings(&settings);
    clock.load(&bytes).play();
    time.set(args.at_ms);
    let executed = clock.tick(args.at_ms);
    tracing::debug!(executed, pointer = ?clock.pointer(), "positioned");

    let frame = clock.raster().compose_frame();
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (bytes, settings) = read_input(&args.input)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let written = Rc::new(RefCell::new(0usize));
    let failure: Rc<RefCell<Option<anyhow::Error>>> = Rc::default();
    let sink = {
        let out_dir = args.out_dir.clone();
        let written = Rc::clone(&written);
        let failure = Rc::clone(&failure);
        move |frame: &cdg::FrameRGBA| {
            let mut n = written.borrow_mut();
            let path = out_dir.join(format!("frame_{:06}.png", *n));
            match write_png(&path, frame) {
                Ok(()) => {
                    *n += 1;
                    ControlFlow::Continue(())
                }
                Err(e) => {
                    *failure.borrow_mut() = Some(e);
                    ControlFlow::Break(())
                }
            }
        }
    };

    let time = cdg::ManualTime::new(0.0);
    let mut clock = cdg::PlaybackClock::new(time.clone())
        .with_settings(&settings)
        .with_frame_sink(sink);
    clock.load(&bytes).play();

    let period_ms = 1000.0 / f64::from(args.fps);
    let mut tick = 1u64;
    while clock.is_running() {
        let now = tick as f64 * period_ms;
        if args.until_ms.is_some_and(|until| now > until) {
            break;
        }
        time.set(now);
        clock.tick(now);
        tick += 1;
    }

    if let Some(e) = failure.borrow_mut().take() {
        return Err(e);
    }
    eprintln!(
        "wrote {} frames to {}",
        written.borrow(),
        args.out_dir.display()
    );
    Ok(())
}

fn write_png(path: &Path, frame: &cdg::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
