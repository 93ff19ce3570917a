//! Path resolution
//!
//! Several paths (config file, source directory, MCP declarations) are
//! found by trying candidates in order. [`resolve`] walks a candidate list
//! and yields an explicit [`Resolution`] instead of failing, so each caller
//! decides what "nothing found" means.

use std::path::{Path, PathBuf};

/// One place a path may come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// Chosen whenever it is set, whether or not it exists yet
    Explicit {
        origin: &'static str,
        path: Option<PathBuf>,
    },
    /// Chosen only if something exists at the path
    IfExists {
        origin: &'static str,
        path: Option<PathBuf>,
    },
}

impl Candidate {
    pub fn explicit(origin: &'static str, path: Option<PathBuf>) -> Self {
        Candidate::Explicit { origin, path }
    }

    pub fn if_exists(origin: &'static str, path: Option<PathBuf>) -> Self {
        Candidate::IfExists { origin, path }
    }
}

/// Outcome of walking a candidate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found { path: PathBuf, origin: &'static str },
    NotFound,
}

impl Resolution {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Resolution::Found { path, .. } => Some(path),
            Resolution::NotFound => None,
        }
    }
}

/// First matching candidate, in order
pub fn resolve(candidates: impl IntoIterator<Item = Candidate>) -> Resolution {
    for candidate in candidates {
        match candidate {
            Candidate::Explicit {
                origin,
                path: Some(path),
            } => return Resolution::Found { path, origin },
            Candidate::IfExists {
                origin,
                path: Some(path),
            } if path.exists() => return Resolution::Found { path, origin },
            _ => {}
        }
    }
    Resolution::NotFound
}

/// Expand a leading `~` or `~/` using `home`
pub fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (raw, Some(home)) if raw.starts_with("~/") => home.join(&raw[2..]),
        (raw, _) => PathBuf::from(raw),
    }
}

/// Expand `~` and anchor relative paths at `cwd`
pub fn absolutize(raw: &str, home: Option<&Path>, cwd: &Path) -> PathBuf {
    let expanded = expand_home(raw, home);
    if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/u");
        assert_eq!(expand_home("~", Some(home)), PathBuf::from("/home/u"));
        assert_eq!(
            expand_home("~/.pi/agent", Some(home)),
            PathBuf::from("/home/u/.pi/agent")
        );
        assert_eq!(expand_home("~other/x", Some(home)), PathBuf::from("~other/x"));
        assert_eq!(expand_home("~/x", None), PathBuf::from("~/x"));
        assert_eq!(expand_home("/abs", Some(home)), PathBuf::from("/abs"));
    }

    #[test]
    fn test_absolutize_relative() {
        let cwd = Path::new("/work");
        assert_eq!(absolutize("out", None, cwd), PathBuf::from("/work/out"));
        assert_eq!(absolutize("/tmp/out", None, cwd), PathBuf::from("/tmp/out"));
        assert_eq!(
            absolutize("~/out", Some(Path::new("/home/u")), cwd),
            PathBuf::from("/home/u/out")
        );
    }

    #[test]
    fn test_resolve_explicit_wins() {
        let resolution = resolve([
            Candidate::explicit("flag", None),
            Candidate::explicit("env", Some(PathBuf::from("/does/not/exist"))),
            Candidate::explicit("default", Some(PathBuf::from("/other"))),
        ]);
        assert_eq!(
            resolution,
            Resolution::Found {
                path: PathBuf::from("/does/not/exist"),
                origin: "env"
            }
        );
    }

    #[test]
    fn test_resolve_if_exists_skips_missing() {
        let temp = TempDir::new().unwrap();
        let settings = temp.path().join("settings.json");
        std::fs::write(&settings, "{}").unwrap();

        let resolution = resolve([
            Candidate::if_exists(".mcp.json", Some(temp.path().join(".mcp.json"))),
            Candidate::if_exists("settings.json", Some(settings.clone())),
        ]);
        assert_eq!(resolution.path(), Some(settings.as_path()));
    }

    #[test]
    fn test_resolve_not_found() {
        let resolution = resolve([
            Candidate::explicit("flag", None),
            Candidate::if_exists("default", Some(PathBuf::from("/does/not/exist"))),
        ]);
        assert_eq!(resolution, Resolution::NotFound);
        assert_eq!(resolution.path(), None);
    }
}
