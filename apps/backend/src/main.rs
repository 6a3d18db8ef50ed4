use actix_web::{web, App, HttpServer};
use parlor_backend::routes;
use parlor_backend::{cors_middleware, AppConfig, AppState, RequestTrace};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting Parlor Backend on http://{}:{}",
        config.host, config.port
    );

    let app_state = AppState::in_memory();

    // Seed default packs and impostor words on an empty catalog.
    if let Err(e) = app_state.catalog.seed_defaults().await {
        eprintln!("❌ Failed to seed default catalog content: {e}");
        std::process::exit(1);
    }

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
