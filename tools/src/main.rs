//! scenario-runner: headless scenario simulation for RiskDesk.
//!
//! Usage:
//!   scenario-runner --interest 2 --volatility 0.5 --growth 1.2
//!   scenario-runner --synthetic 25 --seed 7 --three-factor --interest 1.5
//!   scenario-runner --directory clients.json --config engine.json --save "Hausse"
//!   scenario-runner --ipc-mode

use anyhow::Result;
use riskdesk_core::{
    clock::SystemClock,
    command::SessionCommand,
    config::EngineConfig,
    directory::ClientDirectory,
    risk_model::{RiskLevel, RiskModel},
    runner::impact_points,
    session::Session,
    shock::ShockParameters,
    store::ScenarioStore,
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let synthetic = parse_arg(&args, "--synthetic", 0usize);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let three_factor = args.iter().any(|a| a == "--three-factor");
    let directory_path = string_arg(&args, "--directory");
    let config_path = string_arg(&args, "--config");
    let save_name = string_arg(&args, "--save");

    let mut config = match config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if three_factor {
        config.model = RiskModel::three_factor();
    }

    let directory = match directory_path {
        Some(path) => ClientDirectory::load(path)?,
        None if synthetic > 0 => ClientDirectory::synthetic(seed, synthetic),
        None => ClientDirectory::reference(),
    };

    let store = ScenarioStore::with_reference_scenarios(Box::new(SystemClock));
    let mut session = Session::new(config, directory, store);

    if ipc_mode {
        return run_ipc_loop(&mut session);
    }

    let shocks = ShockParameters::new(
        parse_arg(&args, "--interest", 0.0),
        parse_arg(&args, "--loan", 0.0),
        parse_arg(&args, "--deposit", 0.0),
        parse_arg(&args, "--volatility", 0.5),
        parse_arg(&args, "--growth", 1.5),
    );

    println!("RiskDesk scenario-runner");
    println!("  model:     {}", session.config().model.name());
    println!("  clients:   {}", session.directory().len());
    println!("  shocks:    {}", serde_json::to_string(&shocks)?);
    println!();

    let all_clients = session.directory().ids();
    session.select_clients(&all_clients)?;
    session.run_simulation(shocks)?;
    print_summary(&session)?;

    if let Some(name) = save_name {
        let description = string_arg(&args, "--description").unwrap_or_default();
        let scenario = session.save_scenario(name, &description)?;
        println!();
        println!("Saved scenario {} '{}' on {}", scenario.id, scenario.name, scenario.timestamp);
        println!("{}", session.store().export_json()?);
    }

    Ok(())
}

/// One JSON command per stdin line, one JSON reply per stdout line.
/// Errors are reported inline; the loop keeps going.
fn run_ipc_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        let line = buffer.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }

        let command: SessionCommand = match serde_json::from_str(line) {
            Ok(c) => c,
            Err(e) => {
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        let out = match session.execute(command) {
            Ok(reply) => serde_json::json!({
                "ok": reply,
                "notices": session.drain_notices(),
            }),
            Err(e) => {
                log::warn!("Command failed: {e}");
                serde_json::json!({
                    "error": e.to_string(),
                    "notices": session.drain_notices(),
                })
            }
        };
        writeln!(stdout, "{out}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(session: &Session) -> Result<()> {
    let Some(run) = session.current_run() else {
        println!("  (No simulation run)");
        return Ok(());
    };
    let thresholds = &session.config().risk_levels;

    println!("=== SIMULATION RESULTS ===");
    for point in impact_points(&run.results) {
        println!("  {:<32} {:>+7.1}%  {}", point.client_name, point.impact, point.status.as_str());
    }
    println!();
    for r in &run.results {
        println!(
            "  {:<32} {:.2} -> {:.2}  [{} -> {}]{}",
            r.client_name,
            r.risk_before,
            r.risk_after,
            RiskLevel::classify(r.risk_before, thresholds).as_str(),
            RiskLevel::classify(r.risk_after, thresholds).as_str(),
            if r.non_computable { "  (impact n/a: zero baseline)" } else { "" },
        );
    }

    if let Some(summary) = session.summary() {
        println!();
        println!("=== RUN SUMMARY ===");
        println!("  clients:        {}", summary.clients);
        println!("  worsened:       {}", summary.worsened);
        println!("  improved:       {}", summary.improved);
        println!("  unchanged:      {}", summary.unchanged);
        println!("  avg impact:     {:+.1}%", summary.average_impact);
    }

    for notice in session.notices() {
        log::debug!("notice: {}", serde_json::to_string(notice)?);
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
