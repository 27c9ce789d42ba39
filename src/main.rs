use tracing::{error, info};

use jarstore::{Config, WebServer};

#[tokio::main]
async fn main() {
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = jarstore::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        jarstore::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    let server = match WebServer::new(&config) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    info!("jarstore listening on {}", server.addr());

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
