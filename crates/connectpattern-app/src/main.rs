//! Demo host entry point.
//!
//! Usage: `connectpattern [script.json]`. Without a script the built-in demo
//! session is replayed. The report is printed to stdout as JSON.

use connectpattern_app::{Script, ScriptResult, Session};

fn run() -> ScriptResult<()> {
    let script = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading script {}", path);
            Script::load(path)?
        }
        None => Script::demo(),
    };

    let report = Session::run(&script)?;
    log::info!(
        "Replayed {} steps: {} events, {} frames",
        script.steps.len(),
        report.events.len(),
        report.frames_rendered
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting connect-pattern demo host");

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
