//! # App Path Resolver

use std::{
    env,
    path::{Path, PathBuf},
};

use directories_next::ProjectDirs;

/// Extend a base path with key dirs and a file name.
///
/// Does not touch the filesystem.
pub fn extend_path<P, S, F>(
    base: P,
    key: &[S],
    file: F,
) -> PathBuf
where
    P: AsRef<Path>,
    S: AsRef<Path>,
    F: AsRef<Path>,
{
    let mut path = base.as_ref().to_path_buf();
    path.extend(key.iter().map(|s| s.as_ref()));
    path.push(file.as_ref());
    path
}

/// Static configuration for cache/data directory resolution.
pub struct PathResolver {
    /// The qualifier for [`ProjectDirs`].
    pub qualifier: &'static str,

    /// The organization for [`ProjectDirs`].
    pub organization: &'static str,

    /// The application for [`ProjectDirs`].
    pub application: &'static str,

    /// Cache directory override variables, highest priority first.
    pub cache_env_vars: &'static [&'static str],

    /// Data directory override variables, highest priority first.
    pub data_env_vars: &'static [&'static str],
}

impl PathResolver {
    /// Get the [`ProjectDirs`] for this config.
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(self.qualifier, self.organization, self.application)
    }

    fn resolve<P: AsRef<Path>>(
        path: Option<P>,
        env_vars: &[&str],
        fallback: impl FnOnce() -> Option<PathBuf>,
    ) -> Option<PathBuf> {
        if let Some(path) = path {
            return Some(path.as_ref().to_path_buf());
        }

        env_vars
            .iter()
            .find_map(|var| env::var_os(var).filter(|v| !v.is_empty()))
            .map(PathBuf::from)
            .or_else(fallback)
    }

    /// Resolve the cache directory.
    ///
    /// Resolution Order:
    /// 1. `path`, if present.
    /// 2. ``env[$VAR]`` for each of `self.cache_env_vars`; skipping empty values.
    /// 3. `self.project_dirs().cache_dir()`, if present.
    /// 4. `None`
    ///
    /// On Linux this is `$XDG_CACHE_HOME/gptbpe` or `$HOME/.cache/gptbpe`.
    pub fn resolve_cache_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        Self::resolve(path, self.cache_env_vars, || {
            self.project_dirs().map(|pds| pds.cache_dir().to_path_buf())
        })
    }

    /// Resolve the data directory.
    ///
    /// Same order as [`resolve_cache_dir`](Self::resolve_cache_dir), over
    /// `self.data_env_vars` and `self.project_dirs().data_dir()`.
    ///
    /// On Linux this is `$XDG_DATA_HOME/gptbpe` or `$HOME/.local/share/gptbpe`.
    pub fn resolve_data_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        Self::resolve(path, self.data_env_vars, || {
            self.project_dirs().map(|pds| pds.data_dir().to_path_buf())
        })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const CACHE_ENV1: &str = "_GPTBPE_TEST_CACHE_ENV1";
    const CACHE_ENV2: &str = "_GPTBPE_TEST_CACHE_ENV2";
    const DATA_ENV: &str = "_GPTBPE_TEST_DATA_ENV";

    const TEST_CONFIG: PathResolver = PathResolver {
        qualifier: "io",
        organization: "crates",
        application: "gptbpe-test",
        cache_env_vars: &[CACHE_ENV1, CACHE_ENV2],
        data_env_vars: &[DATA_ENV],
    };

    #[test]
    fn test_extend_path() {
        let path = extend_path("/tmp/gptbpe", &["openai", "gpt2"], "vocab.bpe");
        assert_eq!(path, PathBuf::from("/tmp/gptbpe/openai/gpt2/vocab.bpe"));

        let no_key: &[&str] = &[];
        assert_eq!(
            extend_path("/tmp/gptbpe", no_key, "x"),
            PathBuf::from("/tmp/gptbpe/x")
        );
    }

    #[test]
    #[serial]
    fn test_resolve_dirs() {
        let pds = TEST_CONFIG
            .project_dirs()
            .expect("failed to get project dirs");
        let no_path: Option<PathBuf> = None;
        let user_dir = PathBuf::from("/tmp/gptbpe_test/user");

        unsafe {
            env::remove_var(CACHE_ENV1);
            env::remove_var(CACHE_ENV2);
            env::remove_var(DATA_ENV);
        }

        // Project dirs.
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            Some(pds.cache_dir().to_path_buf())
        );
        assert_eq!(
            TEST_CONFIG.resolve_data_dir(no_path.clone()),
            Some(pds.data_dir().to_path_buf())
        );

        // Lower priority var; empty values are skipped.
        unsafe {
            env::set_var(CACHE_ENV1, "");
            env::set_var(CACHE_ENV2, "/tmp/gptbpe_test/env2");
            env::set_var(DATA_ENV, "/tmp/gptbpe_test/data");
        }
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            Some(PathBuf::from("/tmp/gptbpe_test/env2"))
        );
        assert_eq!(
            TEST_CONFIG.resolve_data_dir(no_path.clone()),
            Some(PathBuf::from("/tmp/gptbpe_test/data"))
        );

        // Higher priority var.
        unsafe {
            env::set_var(CACHE_ENV1, "/tmp/gptbpe_test/env1");
        }
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            Some(PathBuf::from("/tmp/gptbpe_test/env1"))
        );

        // User overrides always win.
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(Some(&user_dir)),
            Some(user_dir.clone())
        );
        assert_eq!(
            TEST_CONFIG.resolve_data_dir(Some(&user_dir)),
            Some(user_dir.clone())
        );

        unsafe {
            env::remove_var(CACHE_ENV1);
            env::remove_var(CACHE_ENV2);
            env::remove_var(DATA_ENV);
        }
    }
}
