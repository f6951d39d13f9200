//! Path utilities: expand `~` in user supplied paths.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return home;
    }
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde("/tmp/x.sqlite"), PathBuf::from("/tmp/x.sqlite"));
        assert_eq!(expand_tilde("rel/x.sqlite"), PathBuf::from("rel/x.sqlite"));
    }

    #[test]
    fn tilde_prefix_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/a.sqlite"), home.join("a.sqlite"));
        }
    }
}
