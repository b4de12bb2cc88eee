use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod models;
mod store;

use config::Config;
use store::{CombatItemCatalog, TrainerStore};

pub struct AppState {
    pub config: Config,
    pub store: Arc<TrainerStore>,
    pub catalog: Arc<CombatItemCatalog>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    log::info!("Loading trainer table from {}", config.trainers_file().display());
    let store = Arc::new(TrainerStore::open(config.trainers_file()));
    let catalog = Arc::new(CombatItemCatalog::open(&config.combat_items_file()));

    log::info!("Starting grumpi-backend on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                config: config.clone(),
                store: Arc::clone(&store),
                catalog: Arc::clone(&catalog),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::trainers::config)
            .configure(controllers::catalog::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
