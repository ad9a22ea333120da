//! Shared helpers for the CLI integration tests.
//!
//! - [`CliRunner`] spawns the built `ofc` binary with a scrubbed `OFC_*`
//!   environment and captures stdout, stderr and the exit code.
//! - [`run_in_process`] calls [`ofc_cli::run_with_input`] directly.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

const OFC_VARS: [&str; 7] = [
    "OFC_CONFIG",
    "OFC_SEED",
    "OFC_DISCARD_POLICY",
    "OFC_AI",
    "OFC_FANTASYLAND",
    "OFC_LOG",
    "OFC_SIM_BREAK_AFTER",
];

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug)]
pub struct CliRunner {
    binary_path: PathBuf,
}

impl CliRunner {
    pub fn new() -> Self {
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_ofc")),
        }
    }

    pub fn run(&self, args: &[&str]) -> CliResult {
        self.run_full(args, &[], None)
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> CliResult {
        self.run_full(args, env, None)
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> CliResult {
        self.run_full(args, &[], Some(stdin))
    }

    fn run_full(&self, args: &[&str], env: &[(&str, &str)], stdin: Option<&str>) -> CliResult {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for key in OFC_VARS {
            cmd.env_remove(key);
        }
        for (k, v) in env {
            cmd.env(k, v);
        }
        let mut child = cmd.spawn().expect("spawn ofc binary");
        if let Some(mut pipe) = child.stdin.take() {
            if let Some(input) = stdin {
                pipe.write_all(input.as_bytes()).expect("write stdin");
            }
        }
        let output = child.wait_with_output().expect("wait for ofc binary");
        CliResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs the CLI in-process with `stdin` as the play input.
pub fn run_in_process(args: &[&str], stdin: &str) -> CliResult {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut argv = vec!["ofc"];
    argv.extend_from_slice(args);
    let exit_code = ofc_cli::run_with_input(argv, &mut out, &mut err, &mut input);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// Clears every `OFC_*` variable of this test process.
pub fn clear_ofc_env() {
    for key in OFC_VARS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}
