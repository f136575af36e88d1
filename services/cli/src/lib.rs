mod cli;
mod demo;

use campus_housing::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
