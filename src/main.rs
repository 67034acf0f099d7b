/*
 * Responsibility
 * - Start the tokio runtime
 * - Call app::run() (no logic here)
 */
use anyhow::Result;

mod app;
mod config;
mod error;
mod forms;
mod middleware;
mod repos;
mod services;
mod session;
mod state;
mod web;


#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
