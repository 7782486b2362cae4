// src/lib.rs

pub mod bind;
pub mod cli;
pub mod config;
pub mod errors;
pub mod kill;
pub mod launch;
pub mod logging;
pub mod registry;
pub mod remote;

use anyhow::{Result, anyhow};
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::{load_fleet_config, load_job_spec};
use crate::config::model::{FleetConfig, JobSpec};
use crate::kill::{KillReport, Terminator};
use crate::launch::{LaunchReport, Launcher};
use crate::registry::JobRegistry;
use crate::remote::scan::ProcessScanner;
use crate::remote::transport::{SshTransport, Transport};

/// High-level entry point used by `main.rs`.
///
/// One invocation performs exactly one of:
/// - distribute (`--conf`, optionally `--dry-run`)
/// - kill (`--kill`, filtered by `--script`/`--host`)
/// - status (`--script` and/or `--host`)
pub async fn run(args: CliArgs) -> Result<()> {
    let config = load_fleet_config(&args.config)?;
    let transport = SshTransport::new(config.fleet.clone());

    if let Some(conf) = &args.conf {
        let spec = load_job_spec(conf, &config)?;
        let registry = JobRegistry::new(&config.fleet.jobs_dir);
        let launcher = Launcher::new(&transport, &config, registry);

        if args.dry_run {
            print_dry_run(&launcher, &config, &spec)?;
            return Ok(());
        }

        let report = launcher.distribute(&spec).await?;
        print_launch_report(&report);
        return Ok(());
    }

    if args.kill {
        let terminator = Terminator::new(&transport, &config.fleet);
        let report = terminator
            .kill(args.script.as_deref(), args.host.as_deref())
            .await?;
        print_kill_report(args.script.as_deref(), &report);
        return Ok(());
    }

    if args.script.is_some() || args.host.is_some() {
        return status(&transport, &config, args.script.as_deref(), args.host.as_deref()).await;
    }

    Err(anyhow!(
        "nothing to do: pass --conf to launch, --script/--host for status, or --kill"
    ))
}

/// Report on matching jobs, for one host or the whole fleet.
async fn status<T: Transport + ?Sized>(
    transport: &T,
    config: &FleetConfig,
    script_filter: Option<&str>,
    host: Option<&str>,
) -> Result<()> {
    let hosts: Vec<&str> = match host {
        Some(h) => vec![h],
        None => config.fleet.hosts.iter().map(|h| h.as_str()).collect(),
    };

    let scanner = ProcessScanner::new(transport, &config.fleet);
    for host in hosts {
        let jobs = match scanner.scan(host, script_filter).await {
            Ok(jobs) => jobs,
            Err(err) => {
                println!("could not scan {host}: {err}");
                continue;
            }
        };
        if jobs.is_empty() {
            match script_filter {
                Some(script) => println!("{script} is currently not running on {host}"),
                None => println!("nothing is currently running on {host}"),
            }
            continue;
        }

        println!("\nFound {} job(s) on {host}:", jobs.len());
        for job in jobs {
            println!("{}\t{}", job.pid, job.command);
        }
    }
    Ok(())
}

/// Dry-run output: the per-host commands a distribute would launch.
fn print_dry_run(
    launcher: &Launcher<'_, SshTransport>,
    config: &FleetConfig,
    spec: &JobSpec,
) -> Result<()> {
    let plan = launcher.plan(spec)?;

    println!("playmaker dry-run");
    println!("  script: {}", spec.script);
    println!("  log dir: {}", spec.effective_log_dir(&config.fleet));
    println!("  notify: {}", spec.notify);
    println!();
    println!("planned launches ({}):", plan.len());
    for (host, command) in plan {
        println!("  {host}: {command}");
    }

    info!("dry-run complete (no execution)");
    Ok(())
}

fn print_launch_report(report: &LaunchReport) {
    for launch in &report.launched {
        println!(
            "\nLaunched: {} on {}\t{}",
            launch.command, launch.host, launch.local_pid
        );
    }
    for failure in &report.failed {
        println!("\nFAILED: {} on {}: {}", failure.command, failure.host, failure.error);
    }
    println!(
        "\nDone launching jobs: {} launched, {} failed.",
        report.launched.len(),
        report.failed.len()
    );
}

fn print_kill_report(script_filter: Option<&str>, report: &KillReport) {
    let label = script_filter.unwrap_or("any job");
    for host in &report.hosts {
        if let Some(err) = &host.scan_error {
            println!("could not scan {}: {}", host.host, err);
            continue;
        }
        if host.no_matches() {
            println!("there are no jobs to kill on {} matching {label}", host.host);
            continue;
        }
        for pid in &host.killed {
            println!("killed {pid} on {}", host.host);
        }
        for failure in &host.failures {
            println!(
                "failed to kill {} on {}: {}",
                failure.pid, host.host, failure.error
            );
        }
    }
}
