use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BIND: &str = "127.0.0.1:8501";
pub const DEFAULT_TITLE: &str = "Analyse MovieLens";
pub const DEFAULT_IO_TIMEOUT_MS: u64 = 5_000;

/// Page layout requested at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Wide,
    Centered,
}

impl Layout {
    pub fn from_env() -> Self {
        match std::env::var("DASH_LAYOUT").as_deref() {
            Ok("centered") => Layout::Centered,
            _ => Layout::Wide,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Layout::Wide => "layout-wide",
            Layout::Centered => "layout-centered",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub output_dir: PathBuf,
    pub bind: String,
    pub title: String,
    pub layout: Layout,
    /// Applies to both reading the request and writing the response.
    pub io_timeout: Duration,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self {
            output_dir: std::env::var("DASH_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_output_dir()),
            bind: std::env::var("DASH_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            title: std::env::var("DASH_TITLE").unwrap_or_else(|_| DEFAULT_TITLE.to_string()),
            layout: Layout::from_env(),
            io_timeout: Duration::from_millis(
                std::env::var("DASH_IO_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_IO_TIMEOUT_MS),
            ),
        }
    }

    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            bind: DEFAULT_BIND.to_string(),
            title: DEFAULT_TITLE.to_string(),
            layout: Layout::Wide,
            io_timeout: Duration::from_millis(DEFAULT_IO_TIMEOUT_MS),
        }
    }
}

/// `output/` next to the directory holding the executable; when that does not
/// exist (e.g. running from `target/`), `output/` next to the source checkout.
pub fn default_output_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    resolve_output_dir(
        exe_dir.as_deref(),
        Path::new(env!("CARGO_MANIFEST_DIR")),
        |p| p.is_dir(),
    )
}

pub fn resolve_output_dir(
    exe_dir: Option<&Path>,
    dev_dir: &Path,
    is_dir: impl Fn(&Path) -> bool,
) -> PathBuf {
    if let Some(candidate) = exe_dir.map(output_dir_beside) {
        if is_dir(&candidate) {
            return candidate;
        }
    }
    output_dir_beside(dev_dir)
}

pub fn output_dir_beside(app_dir: &Path) -> PathBuf {
    app_dir
        .parent()
        .unwrap_or(app_dir)
        .join("output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_is_sibling_of_app_dir() {
        let dir = output_dir_beside(Path::new("/srv/movielens/dashboard"));
        assert_eq!(dir, PathBuf::from("/srv/movielens/output"));
    }

    #[test]
    fn explicit_output_dir_keeps_defaults() {
        let cfg = DashboardConfig::with_output_dir("/tmp/charts");
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/charts"));
        assert_eq!(cfg.bind, DEFAULT_BIND);
        assert_eq!(cfg.title, DEFAULT_TITLE);
        assert_eq!(cfg.layout, Layout::Wide);
        assert_eq!(cfg.io_timeout, Duration::from_millis(DEFAULT_IO_TIMEOUT_MS));
    }

    #[test]
    fn deployed_binary_prefers_output_beside_its_own_dir() {
        let exe = Path::new("/opt/movielens/bin");
        let dev = Path::new("/home/dev/movielens/dashboard");
        let found = resolve_output_dir(Some(exe), dev, |p| p == Path::new("/opt/movielens/output"));
        assert_eq!(found, PathBuf::from("/opt/movielens/output"));

        let fallback = resolve_output_dir(Some(exe), dev, |_| false);
        assert_eq!(fallback, PathBuf::from("/home/dev/movielens/output"));
        assert_eq!(resolve_output_dir(None, dev, |_| true), fallback);
    }

    #[test]
    fn layout_css_classes() {
        assert_eq!(Layout::Wide.css_class(), "layout-wide");
        assert_eq!(Layout::Centered.css_class(), "layout-centered");
    }
}
