/*!
 * mlfq-sim - Main Entry Point
 *
 * Headless demo driver: loads a workload (the built-in seven-process demo or
 * a seeded random set), runs it to completion and prints the dispatch trace
 * plus completion statistics.
 */

use log::info;
use miette::IntoDiagnostic;

use mlfq_sim::sched::DEFAULT_BANDS;
use mlfq_sim::{ProcessSet, SimulationController};

struct Options {
    random: Option<(usize, u64)>,
    json: bool,
}

fn parse_args() -> miette::Result<Options> {
    let mut options = Options {
        random: None,
        json: false,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--random" => {
                let count = args
                    .next()
                    .ok_or_else(|| miette::miette!("--random needs a process count"))?
                    .parse()
                    .into_diagnostic()?;
                let seed = match args.next() {
                    Some(s) => s.parse().into_diagnostic()?,
                    None => 0,
                };
                options.random = Some((count, seed));
            }
            "--json" => options.json = true,
            other => return Err(miette::miette!("unknown argument: {}", other)),
        }
    }
    Ok(options)
}

fn main() -> miette::Result<()> {
    env_logger::init();
    let options = parse_args()?;

    let set = match options.random {
        Some((count, seed)) => {
            info!("generating {} random processes (seed {})", count, seed);
            ProcessSet::randomize(count, DEFAULT_BANDS, seed)
        }
        None => ProcessSet::demo(),
    };

    let mut controller = SimulationController::new();
    controller.load(set)?;

    info!(
        "running {} processes to completion",
        controller.process_set().len()
    );
    let metrics = controller.run_to_completion()?;

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&metrics).into_diagnostic()?
        );
        return Ok(());
    }

    println!("Dispatch trace:");
    for segment in controller.trace() {
        let end = segment
            .end
            .map(|e| e.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  [{:>3}..{:>3}) band {} {}",
            segment.start, end, segment.band, segment.name
        );
    }

    println!();
    println!(
        "{:<6} {:>10} {:>11} {:>9} {:>11}",
        "name", "waiting", "turnaround", "response", "completion"
    );
    for m in &metrics.per_process {
        println!(
            "{:<6} {:>10} {:>11} {:>9} {:>11}",
            m.name, m.waiting, m.turnaround, m.response, m.completion
        );
    }
    println!(
        "Avg Waiting Time: {:.2} | Avg Turnaround Time: {:.2} | Avg Response Time: {:.2}",
        metrics.avg_waiting, metrics.avg_turnaround, metrics.avg_response
    );

    Ok(())
}
