//! Host metadata shared with the API
//!
//! When `meta = true` in the config, a small description of the host (OS,
//! release name, shell) is sent with each question so answers can use the
//! right package manager and shell syntax. Users can switch this off.

use std::path::Path;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub os: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

impl Metadata {
    /// Collects metadata for the current host
    pub fn collect() -> Self {
        let os = match std::env::consts::OS {
            "macos" => "macOS".to_string(),
            "windows" => "Windows".to_string(),
            "linux" => "Linux".to_string(),
            other => other.to_string(),
        };

        let version = if cfg!(target_os = "linux") {
            os_release_pretty_name()
        } else {
            None
        };

        let shell = std::env::var("SHELL").ok();

        Self { os, version, shell }
    }
}

/// Reads PRETTY_NAME from the os-release file, trying the usual locations
fn os_release_pretty_name() -> Option<String> {
    for path in ["/etc/os-release", "/usr/lib/os-release"] {
        if Path::new(path).exists() {
            let content = std::fs::read_to_string(path).ok()?;
            return parse_pretty_name(&content);
        }
    }
    None
}

fn parse_pretty_name(os_release: &str) -> Option<String> {
    for line in os_release.lines() {
        let line = line.trim();
        if line.to_uppercase().starts_with("PRETTY_NAME") {
            let value = line.split_once('=')?.1;
            return Some(value.trim_matches(|c| c == '"' || c == '\'').to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pretty_name_from_os_release() {
        let content = "NAME=\"Debian GNU/Linux\"\nPRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\nID=debian\n";
        assert_eq!(
            parse_pretty_name(content),
            Some("Debian GNU/Linux 12 (bookworm)".to_string())
        );
    }

    #[test]
    fn parse_pretty_name_single_quotes() {
        let content = "PRETTY_NAME='Alpine Linux v3.19'";
        assert_eq!(
            parse_pretty_name(content),
            Some("Alpine Linux v3.19".to_string())
        );
    }

    #[test]
    fn parse_pretty_name_missing() {
        assert_eq!(parse_pretty_name("NAME=Linux\nID=generic"), None);
    }

    #[test]
    fn collect_names_a_known_os() {
        let metadata = Metadata::collect();
        assert!(!metadata.os.is_empty());
    }
}
