//! File and stdin helpers shared by the commands.
//!
//! Hand histories may be plain JSONL or Zstandard-compressed (`.zst`); the
//! compression is picked from the file extension.

use std::io::BufRead;
use std::path::Path;

/// Upper bound for a decompressed history file.
const MAX_DECOMPRESSED: usize = 64 * 1024 * 1024;

/// Reads one trimmed line; `None` on EOF or a read error.
///
/// ```rust
/// use std::io::Cursor;
/// # use ofc_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new("  place As top \n");
/// assert_eq!(read_stdin_line(&mut input).as_deref(), Some("place As top"));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a text file, decompressing `.zst` files and dropping a UTF-8 BOM.
pub fn read_text_auto(path: &Path) -> Result<String, String> {
    let is_zst = path.extension().is_some_and(|ext| ext == "zst");
    let mut content = if is_zst {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::bulk::decompress(&comp, MAX_DECOMPRESSED).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Writes `text`, compressing it when `path` ends in `.zst`.
pub fn write_text_auto(path: &Path, text: &str) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let is_zst = path.extension().is_some_and(|ext| ext == "zst");
    let bytes = if is_zst {
        zstd::bulk::compress(text.as_bytes(), 0).map_err(|e| e.to_string())?
    } else {
        text.as_bytes().to_vec()
    };
    std::fs::write(path, bytes).map_err(|e| e.to_string())
}

/// Creates the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
