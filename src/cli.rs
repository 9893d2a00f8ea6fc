// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "matrix-scene")]
#[command(about = "Matrix-shaded 3D scene with a debug panel", long_about = None)]
pub struct Cli {
    /// Disable the debug panel and the performance counter
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON scene configuration; missing fields use built-in defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory model locators are resolved against
    #[arg(long, default_value = ".")]
    pub models: PathBuf,

    /// Skip the completion-chaining demo
    #[arg(long = "no-demo", default_value = "false")]
    pub no_demo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["matrix-scene"]);
        assert!(!cli.no_ui);
        assert!(cli.config.is_none());
        assert_eq!(cli.models, PathBuf::from("."));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "matrix-scene",
            "--no-ui",
            "--config",
            "scene.json",
            "--models",
            "assets",
        ]);
        assert!(cli.no_ui);
        assert_eq!(cli.config, Some(PathBuf::from("scene.json")));
        assert_eq!(cli.models, PathBuf::from("assets"));
    }
}
