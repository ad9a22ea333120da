mod helpers;

use helpers::{clear_ofc_env, run_in_process};
use serial_test::serial;

const BOARD_A: &str = "As 9h 4c / Ks Kh 8c 5d 2s / Qs Qh Jc Jd 2h";
const BOARD_B: &str = "Kd 9d 3c / Ah Ad 7c 7d 3s / 6s 7h 8d 9s Ts";

#[test]
fn unknown_command_prints_usage_and_exits_2() {
    let res = run_in_process(&["shuffle"], "");
    assert_eq!(res.exit_code, ofc_cli::exit_code::ERROR);
    assert!(res.stderr.contains("Usage: ofc <command>"));
    for name in ["play", "sim", "stats", "score", "deal", "bench", "cfg"] {
        assert!(res.stderr.contains(&format!("  {}\n", name)), "{}", name);
    }
}

#[test]
fn help_goes_to_stdout() {
    let res = run_in_process(&["--help"], "");
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("Pineapple Open-Face Chinese Poker"));
    assert!(res.stderr.is_empty());
}

#[test]
fn score_is_zero_sum() {
    let res = run_in_process(&["score", "--a", BOARD_A, "--b", BOARD_B], "");
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    let line = res
        .stdout
        .lines()
        .find(|l| l.starts_with("lines:"))
        .expect("score line");
    let totals = line.rsplit("points ").next().unwrap();
    let (a, b) = totals.split_once(" / ").unwrap();
    let a: i32 = a.trim().parse().unwrap();
    let b: i32 = b.trim().parse().unwrap();
    assert_eq!(a, -b);
}

#[test]
fn score_swapping_boards_negates_points() {
    let ab = run_in_process(&["score", "--a", BOARD_A, "--b", BOARD_B], "");
    let ba = run_in_process(&["score", "--a", BOARD_B, "--b", BOARD_A], "");
    let points = |out: &str| -> String {
        out.lines()
            .find(|l| l.starts_with("lines:"))
            .and_then(|l| l.rsplit("points ").next())
            .unwrap()
            .to_string()
    };
    let (a1, b1) = points(&ab.stdout)
        .split_once(" / ")
        .map(|(x, y)| (x.to_string(), y.to_string()))
        .unwrap();
    let (a2, b2) = points(&ba.stdout)
        .split_once(" / ")
        .map(|(x, y)| (x.to_string(), y.to_string()))
        .unwrap();
    assert_eq!(a1, b2);
    assert_eq!(b1, a2);
}

#[test]
fn score_rejects_malformed_board() {
    let res = run_in_process(&["score", "--a", "As Ks / 2c", "--b", BOARD_B], "");
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("board A"));
}

#[test]
fn deal_is_reproducible() {
    let a = run_in_process(&["deal", "--seed", "2024"], "");
    let b = run_in_process(&["deal", "--seed", "2024"], "");
    assert_eq!(a.exit_code, 0);
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn bench_reports_throughput() {
    let res = run_in_process(&["bench", "--iterations", "50"], "");
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("50 boards (150 rows)"));
}

#[test]
#[serial]
fn play_quits_cleanly_on_eof() {
    clear_ofc_env();
    let res = run_in_process(&["play", "--seed", "5", "--hands", "2"], "");
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("Hand 1 (seed 5)"));
    assert!(res.stdout.contains("Hands played: 0/2"));
}

#[test]
#[serial]
fn play_reports_rejected_moves_on_stderr() {
    clear_ofc_env();
    let res = run_in_process(
        &["play", "--seed", "5", "--discard", "explicit"],
        "discard 2c\nplace\nq\n",
    );
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("discard=explicit"));
    assert!(res.stderr.contains("Usage: place"));
    // Street 1 allows no discards, whether or not 2c was dealt.
    assert!(res.stderr.contains("Error: "));
}

#[test]
#[serial]
fn cfg_reflects_env() {
    clear_ofc_env();
    unsafe {
        std::env::set_var("OFC_AI", "random");
        std::env::set_var("OFC_FANTASYLAND", "off");
    }
    let res = run_in_process(&["cfg"], "");
    clear_ofc_env();
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    let json: serde_json::Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["ai"]["value"], "random");
    assert_eq!(json["ai"]["source"], "env");
    assert_eq!(json["fantasyland"]["value"], false);
    assert_eq!(json["seed"]["source"], "default");
}

#[test]
#[serial]
fn invalid_config_file_fails_cfg() {
    clear_ofc_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ofc.toml");
    std::fs::write(&path, "seed = \"many\"\n").unwrap();
    unsafe {
        std::env::set_var("OFC_CONFIG", &path);
    }
    let res = run_in_process(&["cfg"], "");
    clear_ofc_env();
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid configuration"));
}
