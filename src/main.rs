use anyhow::{bail, Context};
use stitchkit::{init_logging, replay_project, Config, BUILD_DATE, VERSION};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!(version = VERSION, build_date = BUILD_DATE, "starting stitchkit");

    let mut args = std::env::args().skip(1);
    let Some(project) = args.next() else {
        bail!("usage: stitchkit <project.json> [speed]");
    };
    let speed = args
        .next()
        .map(|s| s.parse::<usize>())
        .transpose()
        .context("Speed must be a whole number of stitches per tick")?;

    let config = Config::load_or_default().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        Config::default()
    });

    let summary = replay_project(&project, speed, &config)?;
    info!(
        layers = summary.layers,
        stitches = summary.stitches,
        travel = %summary.travel_label(config.display.measurement_system),
        thread = %summary.thread_label(),
        sew_time_s = format!("{:.0}", summary.sew_time),
        "stitch-out finished"
    );
    Ok(())
}
