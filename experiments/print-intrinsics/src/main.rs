use {
    base::{Vec2, init_stderr_logger, init_stderr_logger_with_level},
    clap::{Parser, ValueEnum},
    depthcam::*,
    std::path::PathBuf,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FovChoice {
    Pinhole,
    PrincipalPoint,
    Both,
}

impl FovChoice {
    fn conventions(&self) -> Vec<FovConvention> {
        match self {
            FovChoice::Pinhole => vec![FovConvention::Pinhole],
            FovChoice::PrincipalPoint => vec![FovConvention::PrincipalPoint],
            FovChoice::Both => vec![FovConvention::Pinhole, FovConvention::PrincipalPoint],
        }
    }
}

#[derive(Parser)]
#[command(name = "print-intrinsics")]
#[command(about = "Open a depth camera and print the intrinsics of its streams")]
#[command(version)]
struct Cli {
    /// JSON capture config (default: color 848x480 and depth 640x360)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Color resolution, e.g. 1280x720
    #[arg(long, value_parser = parse_resolution)]
    color: Option<Vec2<u32>>,

    /// Pixel format of the color stream
    #[arg(long, default_value = "bgr8")]
    color_format: PixelFormat,

    /// Depth resolution, e.g. 640x480
    #[arg(long, value_parser = parse_resolution)]
    depth: Option<Vec2<u32>>,

    /// Frame rate of the streams set with --color or --depth
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Field of view convention
    #[arg(long, value_enum, default_value_t = FovChoice::PrincipalPoint)]
    convention: FovChoice,

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
        None => CaptureConfig::intrinsics_preset().with_device(DeviceSelector::detect()),
    };
    if let Some(size) = cli.color {
        config = config.with_stream(StreamRequest::color(
            size.x,
            size.y,
            cli.color_format,
            cli.fps,
        ));
    }
    if let Some(size) = cli.depth {
        config = config.with_stream(StreamRequest::depth(size.x, size.y, cli.fps));
    }
    if cli.simulate {
        config.device = DeviceSelector::Simulated;
    } else if let Some(serial) = &cli.serial {
        config.device = DeviceSelector::Realsense {
            serial: Some(serial.clone()),
        };
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.verbose {
        init_stderr_logger_with_level(log::LevelFilter::Debug);
    } else {
        init_stderr_logger();
    }

    let config = build_config(&cli)?;
    log::debug!("device: {:?}", config.device);
    let device = create_device(&config.device)?;
    let mut configurator = StreamConfigurator::from_config(&config, device)?;

    let mut session = configurator.open()?;
    println!();
    print!(
        "{}",
        report::format_session(&session, &cli.convention.conventions())
    );
    session.close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("print-intrinsics").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults_use_preset() {
        let cli = parse(&["--simulate"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.device, DeviceSelector::Simulated);
        assert_eq!(config.requests(), CaptureConfig::intrinsics_preset().requests());
        assert_eq!(cli.convention.conventions(), vec![FovConvention::PrincipalPoint]);
    }

    #[test]
    fn test_flags_override_streams() {
        let cli = parse(&[
            "--simulate",
            "--color",
            "1280x720",
            "--color-format",
            "rgb8",
            "--depth",
            "640x480",
            "--fps",
            "15",
            "--convention",
            "both",
        ]);
        let config = build_config(&cli).unwrap();
        let requests = config.requests();
        assert!(requests.contains(&StreamRequest::color(1280, 720, PixelFormat::Rgb8, 15)));
        assert!(requests.contains(&StreamRequest::depth(640, 480, 15)));
        assert_eq!(requests.len(), 2);
        assert_eq!(cli.convention.conventions().len(), 2);
    }

    #[test]
    fn test_serial_selects_hardware() {
        let cli = parse(&["--serial", "012345678901"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(
            config.device,
            DeviceSelector::Realsense {
                serial: Some("012345678901".to_string())
            }
        );
    }

    #[test]
    fn test_bad_resolution_is_rejected() {
        assert!(Cli::try_parse_from(["print-intrinsics", "--color", "wide"]).is_err());
        assert!(Cli::try_parse_from(["print-intrinsics", "--simulate", "--serial", "1"]).is_err());
    }

    #[test]
    fn test_simulated_report() {
        let cli = parse(&["--simulate"]);
        let config = build_config(&cli).unwrap();
        let mut configurator =
            StreamConfigurator::from_config(&config, create_device(&config.device).unwrap())
                .unwrap();
        let session = configurator.open().unwrap();
        let text = report::format_session(&session, &cli.convention.conventions());
        assert!(text.contains("Resolution:  848 x 480"));
        assert!(text.contains("Resolution:  640 x 360"));
        assert!(text.contains("Depth scale: 0.001000"));
    }
}
