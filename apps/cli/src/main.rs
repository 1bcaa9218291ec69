//! # Pandesal POS Entry Point
//!
//! The setup lives in lib.rs so commands can be tested in-process.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    pandesal_cli::run().await
}
