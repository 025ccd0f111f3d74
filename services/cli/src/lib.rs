mod cli;
mod demo;
mod infra;
mod render;

use riskwise::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
