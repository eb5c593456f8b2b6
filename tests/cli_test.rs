use std::process::{Command, Output};

fn rand_bench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rand_bench"))
        .args(args)
        .env_remove("SNN_BENCH_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_cli_report() {
    let output = rand_bench(&["2", "2", "10", "3", "100", "42"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Seed: 42 | Inputs: 2 Outputs: 2 | Neurons: 14 Synapses: "));
    assert_eq!(stdout.lines().filter(|line| line.starts_with("Simulate ")).count(), 3);
    assert_eq!(stdout.lines().count(), 11);
}

#[test]
fn test_cli_no_trials() {
    let output = rand_bench(&["2", "2", "10", "0", "100", "42"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: No trials to aggregate"), "{}", stderr);
    assert!(!stderr.contains("NoTrials"));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Seed: 42 "));
    assert!(!stdout.contains("Average Simulate"));
}

#[test]
fn test_cli_overflowing_counts() {
    let max = usize::MAX.to_string();
    let output = rand_bench(&[max.as_str(), "1", "0", "1", "100", "42"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: Invalid parameters: "), "{}", stderr);
}

#[test]
fn test_cli_rejects_malformed_arguments() {
    assert!(!rand_bench(&["2", "2", "10", "-1", "100", "42"]).status.success());
    assert!(!rand_bench(&["2", "2", "10", "3", "100"]).status.success());
    assert!(!rand_bench(&["two", "2", "10", "3", "100", "42"]).status.success());
}
