// In app/src/env_file.rs

use std::io::ErrorKind;
use std::path::Path;

/// Sets `key=value` in the dotenv file at `path`, creating the file if needed.
pub fn write_var(path: impl AsRef<Path>, key: &str, value: &str) -> std::io::Result<()> {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };
    std::fs::write(path, upsert_var(&content, key, value))
}

/// Replaces the line assigning `key`, or appends one. Other lines are kept verbatim.
pub fn upsert_var(content: &str, key: &str, value: &str) -> String {
    let prefix = format!("{key}=");
    let assignment = format!("{key}={value}");

    let mut replaced = false;
    let mut lines: Vec<String> = content
        .lines()
        .map(|line| {
            if !replaced && line.trim_start().starts_with(&prefix) {
                replaced = true;
                assignment.clone()
            } else {
                line.to_string()
            }
        })
        .collect();
    if !replaced {
        lines.push(assignment);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_an_existing_assignment() {
        let content = "APP_KITE__API_KEY=key\nAPP_KITE__ACCESS_TOKEN=old\n# note\n";
        assert_eq!(
            upsert_var(content, "APP_KITE__ACCESS_TOKEN", "new"),
            "APP_KITE__API_KEY=key\nAPP_KITE__ACCESS_TOKEN=new\n# note\n"
        );
    }

    #[test]
    fn appends_when_missing() {
        assert_eq!(
            upsert_var("APP_KITE__API_KEY=key", "APP_KITE__ACCESS_TOKEN", "tok"),
            "APP_KITE__API_KEY=key\nAPP_KITE__ACCESS_TOKEN=tok\n"
        );
        assert_eq!(upsert_var("", "A", "1"), "A=1\n");
    }

    #[test]
    fn does_not_touch_keys_sharing_a_prefix() {
        let content = "APP_KITE__ACCESS_TOKEN_OLD=x\n";
        assert_eq!(
            upsert_var(content, "APP_KITE__ACCESS_TOKEN", "y"),
            "APP_KITE__ACCESS_TOKEN_OLD=x\nAPP_KITE__ACCESS_TOKEN=y\n"
        );
    }
}
