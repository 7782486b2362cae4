use std::collections::BTreeMap;
use std::error::Error;

use playmaker::bind::{BindingMode, bind};
use playmaker::errors::PlaymakerError;

type TestResult = Result<(), Box<dyn Error>>;

fn table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(key, vals)| {
            (
                key.to_string(),
                vals.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}

#[test]
fn named_table_binds_one_command_per_host_in_key_order() -> TestResult {
    let params = table(&[
        ("--in", &["a.csv", "b.csv"]),
        ("--mode", &["^fast", "^slow"]),
    ]);

    let commands = bind("fetch.py", &params, "proj")?;

    assert_eq!(
        commands,
        vec![
            "fetch.py --in proj/a.csv --mode fast".to_string(),
            "fetch.py --in proj/b.csv --mode slow".to_string(),
        ]
    );
    Ok(())
}

#[test]
fn named_commands_carry_one_token_pair_per_key() -> TestResult {
    let params = table(&[
        ("--a", &["1", "2", "3"]),
        ("--b", &["4", "5", "6"]),
        ("--c", &["7", "8", "9"]),
    ]);

    let commands = bind("job.py", &params, "data")?;

    assert_eq!(commands.len(), 3);
    for command in &commands {
        // script + 3 keys + 3 values
        assert_eq!(command.split_whitespace().count(), 7);
        assert!(command.starts_with("job.py "));
    }
    Ok(())
}

#[test]
fn positional_table_emits_values_only() -> TestResult {
    let params = table(&[("1", &["in.csv"]), ("2", &["out.csv"])]);

    let commands = bind("convert.py", &params, "proj")?;

    assert_eq!(commands, vec!["convert.py proj/in.csv proj/out.csv".to_string()]);
    Ok(())
}

#[test]
fn positional_order_is_numeric_not_lexicographic() -> TestResult {
    // Ten keys: lexicographically "10" sorts before "2", numerically it
    // comes last.
    let entries: Vec<(String, Vec<String>)> = (1..=10)
        .map(|i| (i.to_string(), vec![format!("^v{i}")]))
        .collect();
    let params: BTreeMap<String, Vec<String>> = entries.into_iter().collect();

    let commands = bind("job.py", &params, "data")?;

    assert_eq!(
        commands,
        vec!["job.py v1 v2 v3 v4 v5 v6 v7 v8 v9 v10".to_string()]
    );
    Ok(())
}

#[test]
fn caret_values_are_literal_and_unprefixed() -> TestResult {
    let params = table(&[("--n", &["^42"]), ("--file", &["x.csv"])]);

    let commands = bind("job.py", &params, "root")?;

    assert_eq!(commands, vec!["job.py --file root/x.csv --n 42".to_string()]);
    Ok(())
}

#[test]
fn mixed_key_modes_fail_with_config_error() {
    let params = table(&[("--in", &["a"]), ("2", &["b"])]);

    let err = bind("job.py", &params, "data").unwrap_err();
    assert!(matches!(err, PlaymakerError::Config(_)), "got {err:?}");
}

#[test]
fn mismatched_value_lengths_fail_with_config_error() {
    let params = table(&[("--a", &["1", "2"]), ("--b", &["3"])]);

    let err = bind("job.py", &params, "data").unwrap_err();
    assert!(matches!(err, PlaymakerError::Config(_)), "got {err:?}");
}

#[test]
fn positional_gap_fails_with_config_error() {
    let params = table(&[("1", &["a"]), ("3", &["b"])]);

    let err = bind("job.py", &params, "data").unwrap_err();
    assert!(matches!(err, PlaymakerError::Config(_)), "got {err:?}");
}

#[test]
fn binding_mode_detection() -> TestResult {
    let positional = table(&[("1", &["a"]), ("2", &["b"])]);
    let named = table(&[("--x", &["a"]), ("--y", &["b"])]);

    assert_eq!(
        BindingMode::detect(positional.keys().map(|k| k.as_str()))?,
        BindingMode::Positional
    );
    assert_eq!(
        BindingMode::detect(named.keys().map(|k| k.as_str()))?,
        BindingMode::Named
    );
    Ok(())
}
