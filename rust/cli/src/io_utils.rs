//! I/O helpers shared by the interactive and batch commands.

use std::io::BufRead;
use std::path::Path;

/// Read one line from `stdin`, trimmed. Returns `None` on EOF or read error.
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut buf = String::new();
    match stdin.read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Ensure the parent directory of `path` exists, creating it if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_stdin_line_trims() {
        let mut cursor = Cursor::new(&b"  hit  \n"[..]);
        assert_eq!(read_stdin_line(&mut cursor), Some("hit".to_string()));
    }

    #[test]
    fn test_read_stdin_line_blank_is_empty_not_eof() {
        let mut cursor = Cursor::new(&b"   \nstand\n"[..]);
        assert_eq!(read_stdin_line(&mut cursor), Some(String::new()));
        assert_eq!(read_stdin_line(&mut cursor), Some("stand".to_string()));
        assert_eq!(read_stdin_line(&mut cursor), None);
    }

    #[test]
    fn test_ensure_parent_dir_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("runs").join("games.jsonl");
        assert!(ensure_parent_dir(&nested_path).is_ok());
        assert!(temp_dir.path().join("runs").is_dir());
    }

    #[test]
    fn test_ensure_parent_dir_no_parent() {
        assert!(ensure_parent_dir(Path::new("games.jsonl")).is_ok());
    }
}
