//! Terminal output helpers shared by the commands.

use std::io::Write;

use ofc_engine::game::{Status, StatusKind};

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Echoes an engine status line; errors go to `err`, everything else to `out`.
pub fn write_status(
    out: &mut dyn Write,
    err: &mut dyn Write,
    status: &Status,
) -> std::io::Result<()> {
    match status.kind {
        StatusKind::Error => write_error(err, &status.message),
        StatusKind::Success => writeln!(out, "ok: {}", status.message),
        StatusKind::Info => writeln!(out, "{}", status.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_routes_by_kind() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let failed = Status {
            kind: StatusKind::Error,
            message: "Top row is full".into(),
        };
        let placed = Status {
            kind: StatusKind::Success,
            message: "Placed A♠ on Top".into(),
        };
        write_status(&mut out, &mut err, &failed).unwrap();
        write_status(&mut out, &mut err, &placed).unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "Error: Top row is full\n");
        assert_eq!(String::from_utf8(out).unwrap(), "ok: Placed A♠ on Top\n");
    }
}
