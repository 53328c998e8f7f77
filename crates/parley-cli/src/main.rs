//! Thin entrypoint for the `parley` binary.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = parley_cli::run().await;
    if exit_code != 0 {
        process::exit(exit_code);
    }
}
