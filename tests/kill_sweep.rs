mod common;

use std::error::Error;
use std::io::Write;

use common::{Call, FakeTransport};
use playmaker::config::load_fleet_config;
use playmaker::kill::Terminator;
use tempfile::NamedTempFile;

type TestResult = Result<(), Box<dyn Error>>;

fn fleet() -> Result<playmaker::config::FleetConfig, Box<dyn Error>> {
    let mut file = NamedTempFile::new()?;
    file.write_all(common::test_fleet_toml().as_bytes())?;
    Ok(load_fleet_config(file.path())?)
}

#[tokio::test]
async fn kill_without_filters_sweeps_the_whole_fleet() -> TestResult {
    let config = fleet()?;
    let transport = FakeTransport::new();
    // No listings configured anywhere: every host scans empty.

    let terminator = Terminator::new(&transport, &config.fleet);
    let report = terminator.kill(None, None).await?;

    assert_eq!(report.hosts.len(), 3);
    for (outcome, host) in report.hosts.iter().zip(["epiphyte", "enterprise", "serenity"]) {
        assert_eq!(outcome.host, host);
        assert!(outcome.no_matches());
        assert!(outcome.killed.is_empty());
        assert!(outcome.failures.is_empty());
    }

    // One scan per host, in fleet order, and no kill sends.
    let calls = transport.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| matches!(c, Call::Capture { .. })));
    Ok(())
}

#[tokio::test]
async fn kill_targets_only_the_given_host() -> TestResult {
    let config = fleet()?;
    let transport = FakeTransport::new();
    transport.set_listing("serenity", " 4812 ? S 0:10 python fetch.py\n");

    let terminator = Terminator::new(&transport, &config.fleet);
    let report = terminator.kill(Some("fetch.py"), Some("serenity")).await?;

    assert_eq!(report.hosts.len(), 1);
    assert_eq!(report.hosts[0].host, "serenity");
    assert_eq!(report.hosts[0].matched, vec![4812]);
    assert_eq!(report.hosts[0].killed, vec![4812]);

    // The signal goes out on a fresh connection as `kill <pid>`.
    assert!(transport.calls().contains(&Call::Run {
        host: "serenity".to_string(),
        command: "kill 4812".to_string(),
    }));
    Ok(())
}

#[tokio::test]
async fn one_failed_signal_does_not_block_the_rest() -> TestResult {
    let config = fleet()?;
    let transport = FakeTransport::new();
    transport.set_listing(
        "serenity",
        " 100 ? S 0:01 python fetch.py\n 200 ? S 0:02 python fetch.py\n 300 ? S 0:03 python fetch.py\n",
    );
    transport.fail_kill_of(200);

    let terminator = Terminator::new(&transport, &config.fleet);
    let report = terminator.kill(Some("fetch.py"), Some("serenity")).await?;

    let outcome = &report.hosts[0];
    assert_eq!(outcome.matched, vec![100, 200, 300]);
    assert_eq!(outcome.killed, vec![100, 300]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].pid, 200);
    Ok(())
}

#[tokio::test]
async fn zero_matches_is_reported_distinctly_from_failures() -> TestResult {
    let config = fleet()?;
    let transport = FakeTransport::new();
    transport.set_listing("epiphyte", " 100 ? S 0:01 python fetch.py\n");
    transport.fail_kill_of(100);

    let terminator = Terminator::new(&transport, &config.fleet);
    let report = terminator.kill(Some("fetch.py"), None).await?;

    let by_host: Vec<(&str, bool, usize)> = report
        .hosts
        .iter()
        .map(|o| (o.host.as_str(), o.no_matches(), o.failures.len()))
        .collect();

    assert_eq!(
        by_host,
        vec![
            ("epiphyte", false, 1),
            ("enterprise", true, 0),
            ("serenity", true, 0),
        ]
    );
    Ok(())
}
