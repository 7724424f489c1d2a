use clap::Parser;

// CLI argument structure
//
// The CDN allow-list, size ceiling, filename pattern and probe URLs are
// fixed constants in `validate`, `proxy` and `health`, not flags.
#[derive(Parser, Debug, Clone)]
#[command(name = "asset-gateway")]
#[command(about = "Download proxy for SlateAI brand assets")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 10)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Outbound CDN fetch timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub fetch_timeout: u64,

    // CDN health probe cache TTL in seconds
    #[arg(long, default_value_t = 300)]
    pub health_cache: u64,

    // Interval between rate limit key eviction sweeps, in seconds
    #[arg(long, default_value_t = 120)]
    pub sweep_interval: u64,
}
