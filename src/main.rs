#[macro_use]
extern crate rocket;

use blog_posts::config::Config;
use blog_posts::{create_rocket, db, logging};

#[launch]
fn rocket() -> _ {
    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });
    logging::init(&config);

    let conn = db::open(&config.database_path).unwrap_or_else(|e| {
        tracing::error!(path = %config.database_path, error = %e, "failed to open database");
        std::process::exit(1);
    });
    tracing::info!(path = %config.database_path, "starting blog post service");

    create_rocket(conn)
}
