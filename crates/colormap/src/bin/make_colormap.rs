use {
    base::{init_stderr_logger, init_stderr_logger_with_level},
    clap::Parser,
    colormap::*,
    std::{io::Write, path::PathBuf},
};

#[derive(Parser)]
#[command(name = "make_colormap")]
#[command(about = "Generate a 256-entry jet colormap as a source literal")]
#[command(version)]
struct Cli {
    /// Output language: c or rust
    #[arg(short, long, default_value = "c")]
    lang: Language,

    /// Channel order of each entry: bgr (OpenCV) or rgb
    #[arg(long, default_value = "bgr")]
    order: ChannelOrder,

    /// Array identifier (default: colormap for C, COLORMAP for Rust)
    #[arg(short, long)]
    name: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.verbose {
        init_stderr_logger_with_level(log::LevelFilter::Debug);
    } else {
        init_stderr_logger();
    }

    let mut options = RenderOptions::new(cli.lang, cli.order);
    if let Some(name) = cli.name {
        options = options.with_name(name);
    }
    let text = render(&Colormap::jet(), &options)?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &text).map_err(|e| {
                ColormapError::Io(format!("cannot write {}: {}", path.display(), e))
            })?;
            log::info!("wrote {} {} colormap to {}", cli.lang, cli.order, path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
