use clap::Parser;

/// Kiosk, a single-site desktop shell with a native bridge.
#[derive(Parser, Debug)]
#[command(name = "kiosk", version, about)]
pub struct Args {
    /// Home URL override (takes precedence over the config file).
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
