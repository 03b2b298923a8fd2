use recipes_server::config::Config;
use recipes_server::error::ServerError;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=server_exit module=server status=error error={err}");
            eprintln!("recipes-server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn start() -> Result<(), ServerError> {
    let config = Config::load()?;
    recipes_server::run(config).await
}
