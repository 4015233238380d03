#[macro_use]
extern crate rocket;

pub mod config;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod routes;
pub mod seeder;

pub type DbPool = std::sync::Mutex<rusqlite::Connection>;

/// Extension trait for DbPool to recover from mutex poison
pub trait DbPoolExt {
    fn conn(&self) -> std::sync::MutexGuard<'_, rusqlite::Connection>;
}

impl DbPoolExt for DbPool {
    fn conn(&self) -> std::sync::MutexGuard<'_, rusqlite::Connection> {
        self.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub fn create_rocket(conn: rusqlite::Connection) -> rocket::Rocket<rocket::Build> {
    rocket::build()
        .manage(std::sync::Mutex::new(conn))
        .mount("/", routes![
            routes::health,
            routes::list_posts,
            routes::get_post,
            routes::create_post,
            routes::update_post,
            routes::delete_post,
        ])
        .register("/", catchers![
            routes::bad_request_catcher,
            routes::not_found_catcher,
            routes::unprocessable,
            routes::internal_error,
        ])
}
