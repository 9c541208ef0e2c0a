use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    jaegerin::app::run().await
}
