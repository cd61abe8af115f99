use clap::Parser;
use legion::core::config;
use legion::core::view::View;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "legion", version, about = "Electronic Legion component library hub")]
struct Args {
    /// View to open on start
    #[arg(short, long, default_value_t, value_enum)]
    view: View,

    /// Gemini model id (overrides LEGION_MODEL and the config file)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to legion.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("legion.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Config not loaded, using defaults: {e}");
            eprintln!("legion: {e}; using defaults");
            config::LegionConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.model.as_deref());

    log::info!(
        "Legion starting up (view={:?}, model={})",
        args.view,
        resolved.model_name
    );

    legion::tui::run(resolved, args.view)
}
