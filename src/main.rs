// src/main.rs

use scholarship_daily::config::load_for_process;
use scholarship_daily::fs::RealFileSystem;
use scholarship_daily::{logging, run_daily_tasks};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("run-daily-tasks error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let fs = RealFileSystem;
    let cfg = load_for_process(&fs)?;
    logging::init_logging(&cfg.log)?;
    run_daily_tasks(&fs, &cfg).await?;
    Ok(())
}
