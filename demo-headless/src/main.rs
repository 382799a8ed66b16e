use clap::Parser;
use fire_viz_core::api::SimulationResponse;
use fire_viz_core::playback::BASE_INTERVAL_MS;
use fire_viz_core::render::GridRenderer;
use fire_viz_core::{FrameSink, FrameStats, PlaybackController, PlaybackState, SimulationFrame};
use std::cell::RefCell;
use std::error::Error;
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::rc::Rc;

/// Headless replay of a fire-spread simulation payload
#[derive(Parser, Debug)]
#[command(name = "fire-viz-demo")]
#[command(about = "Replays a simulation JSON payload without a display", long_about = None)]
struct Args {
    /// Path to a simulation response JSON file
    input: PathBuf,

    /// Playback speed multiplier
    #[arg(short, long, default_value_t = 1.0)]
    speed: f32,

    /// Canvas edge in pixels for the 2D render
    #[arg(short, long, default_value_t = 400)]
    canvas_size: usize,

    /// Report progress every N frames
    #[arg(short, long, default_value_t = 10)]
    report_interval: usize,

    /// Write the final rendered frame as a PPM snapshot
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Prints frame statistics every `interval` presented frames.
struct ProgressReporter {
    frames_seen: usize,
    interval: usize,
}

impl FrameSink for ProgressReporter {
    fn present(&mut self, _frame: &SimulationFrame, stats: &FrameStats) {
        if self.frames_seen % self.interval == 0 {
            println!(
                "step {:>4}: {:>5} burning ({:>5.1}%), {:>5} burned ({:>5.1}%)",
                self.frames_seen,
                stats.burning,
                stats.burning_pct,
                stats.burned,
                stats.burned_pct
            );
        }
        self.frames_seen += 1;
    }
}

/// Lets the canvas stay readable after the controller takes the sink.
struct SharedCanvas(Rc<RefCell<GridRenderer>>);

impl FrameSink for SharedCanvas {
    fn present(&mut self, frame: &SimulationFrame, stats: &FrameStats) {
        self.0.borrow_mut().present(frame, stats);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Fire Spread Replay ===\n");

    let payload = fs::read_to_string(&args.input)?;
    let response: SimulationResponse = serde_json::from_str(&payload)?;
    let params = response.simulation.params.clone();
    let run = response.simulation.into_run()?;
    println!(
        "Loaded {} frames ({}x{} grid, wind {:.1} m/s at {:.0} deg)",
        run.len(),
        params.grid_size,
        params.grid_size,
        params.wind_speed,
        params.wind_direction
    );
    println!(
        "Conditions: {:.1} C, {:.0}% humidity\n",
        params.temperature, params.humidity
    );

    let canvas = Rc::new(RefCell::new(GridRenderer::new(args.canvas_size)));

    let mut controller = PlaybackController::new();
    controller.attach(Box::new(ProgressReporter {
        frames_seen: 0,
        interval: args.report_interval.max(1),
    }));
    controller.attach(Box::new(SharedCanvas(Rc::clone(&canvas))));
    controller.load(run);
    controller.set_speed(args.speed);
    controller.play();

    // Each pass injects one base interval; at speed s that fires ~s ticks.
    while controller.state() == PlaybackState::Playing {
        controller.advance(BASE_INTERVAL_MS);
    }

    let agg = controller.aggregate();
    println!("\n=== Replay Complete ===");
    println!("frames presented:  {}", controller.current_index() + 1);
    println!("peak burning:      {:.1}%", agg.peak_burning_pct);
    println!("total burned:      {:.1}%", agg.total_burned_pct);
    if let Some(rate) = agg.spread_rate_pct_per_step {
        println!("spread rate:       {rate:.2}%/step");
    }

    if let Some(path) = &args.output {
        let mut out = BufWriter::new(File::create(path)?);
        canvas.borrow().canvas().write_ppm(&mut out)?;
        println!("\nWrote final frame to {}", path.display());
    }

    Ok(())
}
