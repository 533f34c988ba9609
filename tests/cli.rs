use std::process::{Command, Output};

fn parallel_pi(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_parallel-pi"))
        .args(args)
        .output()
        .expect("failed to launch parallel-pi")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn prints_single_estimate() {
    let out = parallel_pi(&["4", "200000"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1, "unexpected stdout: {text:?}");
    assert!(text.ends_with('\n'));

    let pi: f64 = lines[0].parse().unwrap();
    assert!((pi - std::f64::consts::PI).abs() < 0.05, "estimate {pi}");
}

#[test]
fn seeded_runs_repeat() {
    let a = parallel_pi(&["3", "50000", "--seed", "11"]);
    let b = parallel_pi(&["3", "50000", "--seed", "11", "--reduction", "atomic"]);
    assert!(a.status.success() && b.status.success());
    assert_eq!(stdout(&a), stdout(&b));
}

#[test]
fn report_follows_estimate() {
    let out = parallel_pi(&["2", "1000", "--seed", "1", "--report"]);
    assert!(out.status.success());

    let text = stdout(&out);
    let mut lines = text.lines();
    assert!(lines.next().unwrap().parse::<f64>().is_ok());
    assert_eq!(lines.next(), Some("Monte Carlo Pi Estimation"));
    assert!(text.contains("Total samples: 1000"));
}

#[test]
fn wrong_argument_count_exits_one() {
    for args in [&[][..], &["4"][..], &["4", "100", "9"][..]] {
        let out = parallel_pi(args);
        assert_eq!(out.status.code(), Some(1), "args {args:?}");
        assert!(stdout(&out).is_empty());
        assert!(stderr(&out).contains("Usage"), "stderr: {}", stderr(&out));
    }
}

#[test]
fn non_positive_values_exit_one() {
    for args in [["0", "100"], ["4", "0"], ["-2", "100"], ["4", "-100"]] {
        let out = parallel_pi(&args);
        assert_eq!(out.status.code(), Some(1), "args {args:?}");
        assert!(stdout(&out).is_empty());
        assert_eq!(
            stderr(&out).matches("must be a positive integer").count(),
            1,
            "error should be reported once: {}",
            stderr(&out)
        );
    }
}

#[test]
fn more_threads_than_points_succeeds() {
    let out = parallel_pi(&["64", "3", "--seed", "5", "--report"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("Threads: 3"));
}

#[test]
fn non_integer_values_exit_one() {
    for args in [["four", "100"], ["4", "1e6"], ["4", "3.5"]] {
        let out = parallel_pi(&args);
        assert_eq!(out.status.code(), Some(1), "args {args:?}");
        assert!(stdout(&out).is_empty());
    }
}

#[test]
fn help_exits_zero() {
    let out = parallel_pi(&["--help"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("<NUM_THREADS>"));
}
