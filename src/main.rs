use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = garage_backend::run().await {
        error!("garage-backend stopped: {}", e);
        std::process::exit(1);
    }
}
