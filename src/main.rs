use std::sync::Arc;

use sessiongate::config::{load_config, print_schema};
use sessiongate::startup;
use sessiongate::utils::logger::init_logging;

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--schema") {
        print_schema();
        return;
    }

    let config = load_config();
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = startup::run(Arc::new(config)).await {
        tracing::error!("Startup failed: {}", e);
        std::process::exit(1);
    }
}
