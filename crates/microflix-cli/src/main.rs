//! Thin binary entrypoint for the Microflix CLI.

#[tokio::main]
async fn main() {
    let exit_code = microflix_cli::run().await;
    std::process::exit(exit_code);
}
