//! Shared utilities for command implementations.
//!
//! - Path resolution against the project root
//! - Build option loading with `--config` and `--mode` overrides
//! - Output file handling

use crate::cli::ModeArg;
use crate::error::{CliError, Result, ResultExt};
use rigging_config::{BuildOptions, ConfigDiscovery, PathsConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a path relative to a working directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })
}

/// Project root from `--root`, relative to the current directory.
pub fn project_root(root: Option<&Path>) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    let root = match root {
        Some(root) => resolve_path(root, &cwd),
        None => cwd,
    };
    if !root.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Project root is not a directory: {}",
            root.display()
        )));
    }
    Ok(root)
}

/// Load build options for a project.
///
/// An explicit `config` file wins over discovery. An explicit `mode` wins over
/// `NODE_ENV`. Filesystem paths are anchored at `root`.
pub fn load_options(
    root: &Path,
    config: Option<&Path>,
    mode: Option<ModeArg>,
) -> Result<BuildOptions> {
    let discovery = ConfigDiscovery::new(root);
    let mut options = match config {
        Some(path) => discovery
            .load_from(path)
            .with_hint("Check the --config path")?,
        None => discovery.load()?,
    };

    if let Some(mode) = mode {
        options.set_mode(mode.into());
    }
    anchor_paths(&mut options.paths, root);

    tracing::debug!(root = %root.display(), "loaded build options");
    Ok(options)
}

/// Make relative filesystem paths absolute under `root`.
///
/// `public_path` is a URL prefix and is left alone.
pub fn anchor_paths(paths: &mut PathsConfig, root: &Path) {
    for path in [
        &mut paths.entry_point,
        &mut paths.output_path,
        &mut paths.app_html,
        &mut paths.app_src,
    ]
    .into_iter()
    .flatten()
    {
        *path = resolve_path(path, root);
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    if path.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Output path is a directory: {}",
            path.display()
        )));
    }
    fs::write(path, content).with_path(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigging_config::BuildMode;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path_absolute() {
        let cwd = Path::new("/home/user/project");
        let abs_path = Path::new("/absolute/path.js");
        assert_eq!(resolve_path(abs_path, cwd), abs_path);
    }

    #[test]
    fn test_resolve_path_relative() {
        let cwd = Path::new("/home/user/project");
        let rel_path = Path::new("src/index.js");
        assert_eq!(
            resolve_path(rel_path, cwd),
            PathBuf::from("/home/user/project/src/index.js")
        );
    }

    #[test]
    fn test_project_root_rejects_missing_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(matches!(
            project_root(Some(&missing)),
            Err(CliError::InvalidArgument(_))
        ));
        assert_eq!(project_root(Some(temp.path())).unwrap(), temp.path());
    }

    #[test]
    fn test_anchor_paths_skips_public_path() {
        let mut paths = PathsConfig {
            entry_point: Some("src/index.js".into()),
            output_path: Some("/abs/build".into()),
            public_path: Some("/static/".into()),
            app_html: None,
            app_src: Some("src".into()),
        };
        anchor_paths(&mut paths, Path::new("/project"));

        assert_eq!(paths.entry_point, Some(PathBuf::from("/project/src/index.js")));
        assert_eq!(paths.output_path, Some(PathBuf::from("/abs/build")));
        assert_eq!(paths.public_path.as_deref(), Some("/static/"));
        assert_eq!(paths.app_html, None);
        assert_eq!(paths.app_src, Some(PathBuf::from("/project/src")));
    }

    #[test]
    fn test_load_options_mode_override() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("rigging.toml"),
            "[client_env]\nNODE_ENV = \"development\"\n",
        )
        .unwrap();

        let options = load_options(temp.path(), None, Some(ModeArg::Production)).unwrap();
        assert_eq!(options.mode().unwrap(), BuildMode::Production);
    }

    #[test]
    fn test_load_options_missing_config_file() {
        let temp = TempDir::new().unwrap();
        let err = load_options(temp.path(), Some(Path::new("missing.toml")), None).unwrap_err();
        assert!(err.to_string().contains("Check the --config path"));
    }

    #[test]
    fn test_write_output_creates_parents() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("nested/dir/webpack.json");
        write_output(&out, "{}").unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "{}");
    }

    #[test]
    fn test_write_output_rejects_directory() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            write_output(temp.path(), "{}"),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
