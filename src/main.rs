//! RandGen Worker Service Entry Point
//!
//! Loads `.env` if present, then hands off to [`randgen_worker::run`].

use randgen_worker::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    run().await
}
