//! Secret reference resolver.
//!
//! The config password may reference a secret stored outside the file:
//!
//! - `pass::path/in/store` — runs `pass show path/in/store`, first line
//! - `env::VAR_NAME` — reads `$VAR_NAME` from the environment
//! - anything else — returned as-is (plain text)

/// Resolves a value that may carry a secret reference prefix.
pub fn resolve(value: &str) -> Result<String, String> {
    match value.split_once("::") {
        Some(("pass", path)) => pass_show(path),
        Some(("env", var)) => {
            std::env::var(var).map_err(|_| format!("environment variable `{}` is not set", var))
        }
        _ => Ok(value.to_string()),
    }
}

/// Runs `pass show <path>` and returns the first line of stdout.
fn pass_show(path: &str) -> Result<String, String> {
    let output = std::process::Command::new("pass")
        .args(["show", path])
        .output()
        .map_err(|e| format!("failed to run `pass show {}`: {}", path, e))?;

    if !output.status.success() {
        return Err(format!(
            "`pass show {}` failed (exit {}): {}",
            path,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| format!("`pass show {}` produced no output", path))
}
