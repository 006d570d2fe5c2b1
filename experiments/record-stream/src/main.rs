use {
    base::{init_stderr_logger, init_stderr_logger_with_level},
    clap::Parser,
    depthcam::*,
    std::{
        error::Error,
        path::PathBuf,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::{Duration, Instant},
    },
};

const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "record-stream")]
#[command(about = "Record depth and color streams to a file")]
#[command(version)]
struct Cli {
    /// Recording target (.bag for RealSense hardware, JSON lines for the simulator)
    output: PathBuf,

    /// Recording duration in seconds
    #[arg(short, long, default_value_t = 20)]
    duration: u64,

    /// JSON capture config (default: depth and color 640x480 at 30 fps)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the simulated camera
    #[arg(long)]
    simulate: bool,

    /// Serial number of the camera to open
    #[arg(long, conflicts_with = "simulate")]
    serial: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn build_config(cli: &Cli) -> Result<CaptureConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => CaptureConfig::load(path)?,
        None => CaptureConfig::recording_preset().with_device(DeviceSelector::detect()),
    };
    if cli.simulate {
        config.device = DeviceSelector::Simulated;
    } else if let Some(serial) = &cli.serial {
        config.device = DeviceSelector::Realsense {
            serial: Some(serial.clone()),
        };
    }
    Ok(config.with_record_to(&cli.output))
}

fn open_device(selector: &DeviceSelector) -> Result<Box<dyn CaptureDevice>, DeviceError> {
    match selector {
        // pace the simulator so the recording spans real time
        DeviceSelector::Simulated => Ok(Box::new(SimulatedDevice::new().paced())),
        other => create_device(other),
    }
}

/// Open the session, pull frame sets until `duration` elapses or `cancel` is
/// set, then close. Returns the number of frame sets pulled.
///
/// Runs on one thread from open to close, which librealsense2 requires.
fn record(
    config: &CaptureConfig,
    device: Box<dyn CaptureDevice>,
    duration: Duration,
    cancel: &AtomicBool,
) -> Result<u64, Box<dyn Error + Send + Sync>> {
    let mut configurator = StreamConfigurator::from_config(config, device)?;
    if let Some(path) = &config.record_to {
        configurator.record_to(path)?;
    }
    let mut session = configurator.open()?;
    log::info!(
        "recording {} stream(s) for {:?}",
        session.streams().len(),
        duration
    );

    let started = Instant::now();
    let mut frame_sets = 0u64;
    while started.elapsed() < duration {
        if cancel.load(Ordering::SeqCst) {
            log::info!("recording cancelled after {:?}", started.elapsed());
            break;
        }
        session.wait_for_frames(FRAME_TIMEOUT)?;
        frame_sets += 1;
    }
    session.close();
    Ok(frame_sets)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    if cli.verbose {
        init_stderr_logger_with_level(log::LevelFilter::Debug);
    } else {
        init_stderr_logger();
    }

    let config = build_config(&cli)?;
    let device = open_device(&config.device)?;
    let duration = Duration::from_secs(cli.duration);
    let cancel = Arc::new(AtomicBool::new(false));

    let watcher = {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("interrupted, stopping at the next frame");
                cancel.store(true, Ordering::SeqCst);
            }
        })
    };

    let worker = {
        let cancel = Arc::clone(&cancel);
        tokio::task::spawn_blocking(move || record(&config, device, duration, &cancel))
    };
    let result = worker.await?;
    watcher.abort();

    let frame_sets = result?;
    log::info!(
        "captured {} frame set(s) into {}",
        frame_sets,
        cli.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["record-stream", "--simulate", "out.bag"]).unwrap();
        assert_eq!(cli.duration, 20);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.device, DeviceSelector::Simulated);
        assert_eq!(config.record_to, Some(PathBuf::from("out.bag")));
        assert_eq!(config.requests(), CaptureConfig::recording_preset().requests());
    }

    #[test]
    fn test_output_is_required() {
        assert!(Cli::try_parse_from(["record-stream"]).is_err());
    }

    #[test]
    fn test_record_for_duration() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("capture.jsonl");
        let config = CaptureConfig::recording_preset().with_record_to(&output);
        let device = SimulatedDevice::new().paced();
        let stats = device.stats();

        let cancel = AtomicBool::new(false);
        let frame_sets =
            record(&config, Box::new(device), Duration::from_millis(200), &cancel).unwrap();

        assert!(frame_sets >= 1);
        assert_eq!(stats.frame_sets(), frame_sets);
        assert_eq!(stats.stops(), 1);
        let lines = std::fs::read_to_string(&output).unwrap().lines().count();
        assert_eq!(lines as u64, frame_sets);
    }

    #[test]
    fn test_cancel_stops_before_first_frame() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            CaptureConfig::recording_preset().with_record_to(dir.path().join("cancel.jsonl"));
        let device = SimulatedDevice::new();
        let stats = device.stats();

        let cancel = AtomicBool::new(true);
        let frame_sets =
            record(&config, Box::new(device), Duration::from_secs(20), &cancel).unwrap();

        assert_eq!(frame_sets, 0);
        assert_eq!(stats.stops(), 1);
    }

    #[test]
    fn test_unwritable_target_fails_before_open() {
        let dir = tempfile::tempdir().unwrap();
        let config = CaptureConfig::recording_preset().with_record_to(dir.path());
        let device = SimulatedDevice::new();
        let stats = device.stats();

        let cancel = AtomicBool::new(false);
        assert!(record(&config, Box::new(device), Duration::from_secs(1), &cancel).is_err());
        assert_eq!(stats.starts(), 0);
    }

    #[tokio::test]
    async fn test_record_on_blocking_pool() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            CaptureConfig::recording_preset().with_record_to(dir.path().join("pool.jsonl"));
        let cancel = Arc::new(AtomicBool::new(false));
        let worker = {
            let cancel = Arc::clone(&cancel);
            tokio::task::spawn_blocking(move || {
                record(
                    &config,
                    Box::new(SimulatedDevice::new().paced()),
                    Duration::from_millis(100),
                    &cancel,
                )
            })
        };
        let frame_sets = worker.await.unwrap().unwrap();
        assert!(frame_sets >= 1);
    }
}
