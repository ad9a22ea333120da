//! Statistics aggregation over JSONL hand histories.
//!
//! Every record is re-scored from its two boards; a record whose stored
//! points disagree with the rescoring (or whose boards cannot be scored) is
//! reported and fails the command.

use crate::error::{BatchValidationError, CliError};
use crate::io_utils::read_text_auto;
use crate::ui;
use ofc_engine::logger::HandRecord;
use ofc_engine::scoring::score_hand;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize)]
struct PerSide {
    player: i64,
    opponent: i64,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    hands: u64,
    points: PerSide,
    fouls: PerSide,
    royalties: PerSide,
    fantasyland_hands: u64,
    fantasyland_earned: u64,
}

#[derive(Default)]
struct StatsState {
    summary: Summary,
    skipped: u64,
    corrupted: u64,
    violations: Vec<BatchValidationError<String>>,
}

impl StatsState {
    fn consume(&mut self, content: &str) {
        let has_trailing_nl = content.ends_with('\n');
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        for (i, line) in lines.iter().enumerate() {
            let rec: HandRecord = match serde_json::from_str(line) {
                Ok(r) => r,
                Err(_) => {
                    if i == lines.len() - 1 && !has_trailing_nl {
                        self.skipped += 1;
                    } else {
                        self.corrupted += 1;
                    }
                    continue;
                }
            };
            self.add(&rec);
        }
    }

    fn add(&mut self, rec: &HandRecord) {
        match score_hand(&rec.player.board, &rec.opponent.board) {
            Ok(score) if score.points_a == rec.points => {}
            Ok(score) => self.violations.push(BatchValidationError {
                item_context: rec.hand_id.clone(),
                message: format!(
                    "recorded {} points but the boards score {}",
                    rec.points, score.points_a
                ),
            }),
            Err(e) => {
                self.violations.push(BatchValidationError {
                    item_context: rec.hand_id.clone(),
                    message: e.to_string(),
                });
                return;
            }
        }

        let s = &mut self.summary;
        s.hands += 1;
        s.points.player += i64::from(rec.points);
        s.points.opponent -= i64::from(rec.points);
        s.fouls.player += i64::from(rec.player.fouled);
        s.fouls.opponent += i64::from(rec.opponent.fouled);
        s.royalties.player += i64::from(rec.player.royalties);
        s.royalties.opponent += i64::from(rec.opponent.royalties);
        s.fantasyland_hands += u64::from(rec.fantasyland);
        s.fantasyland_earned += u64::from(rec.next_fantasyland.is_some());
    }
}

/// Aggregates hand histories from a file or a directory tree.
///
/// Files ending in `.jsonl` or `.jsonl.zst` are read; the summary is printed
/// as pretty JSON.
///
/// # Errors
///
/// - `CliError::Config` if `input` cannot be read
/// - `CliError::InvalidInput` if a single file held no valid record, or any
///   record fails rescoring
pub fn handle_stats_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(input);
    let mut state = StatsState::default();

    if path.is_dir() {
        for file in history_files(path) {
            match read_text_auto(&file) {
                Ok(content) => state.consume(&content),
                Err(_) => state.corrupted += 1,
            }
        }
    } else {
        match read_text_auto(path) {
            Ok(s) => state.consume(&s),
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::Config(format!("Failed to read {}: {}", input, e)));
            }
        }
    }

    if state.corrupted > 0 {
        ui::write_error(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::display_warning(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    for v in &state.violations {
        ui::write_error(err, &v.to_string())?;
    }
    if !path.is_dir() && state.summary.hands == 0 && (state.corrupted > 0 || state.skipped > 0) {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let json_output = serde_json::to_string_pretty(&state.summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;

    if state.violations.is_empty() {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!(
            "{} record(s) failed rescoring",
            state.violations.len()
        )))
    }
}

fn history_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(d) = stack.pop() {
        let Ok(rd) = std::fs::read_dir(&d) else {
            continue;
        };
        for e in rd.filter_map(Result::ok) {
            let p = e.path();
            if p.is_dir() {
                stack.push(p);
            } else if let Some(fname) = p.file_name().and_then(|f| f.to_str())
                && (fname.ends_with(".jsonl") || fname.ends_with(".jsonl.zst"))
            {
                files.push(p);
            }
        }
    }
    files.sort();
    files
}
