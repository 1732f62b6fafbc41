use std::process::ExitCode;

use clap::Parser;
use taste2file::config::Args;

mod logging;

#[tokio::main]
async fn main() -> ExitCode {
    logging::setup_logging();

    match taste2file::run(Args::parse()).await {
        Ok(report) => {
            log::info!(
                "Exported {} ratings to {:?}",
                report.ratings,
                report.files
            );
            println!("Done!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            println!("Not done!");
            ExitCode::FAILURE
        }
    }
}
