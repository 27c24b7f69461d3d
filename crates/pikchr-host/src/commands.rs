//! CLI commands

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use pikchr_host::PluginHost;
use pikchr_plugin_core::RenderOptions;
use tracing::info;

/// Arguments of the `render` command.
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Path to the compiled plugin (.wasm)
    #[arg(short, long)]
    pub plugin: PathBuf,

    /// Markup file to render; reads stdin when omitted or `-`
    pub input: Option<PathBuf>,

    /// Where to write the SVG; writes stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Class attribute of the generated <svg> element
    #[arg(long)]
    pub class: Option<String>,

    /// Render colors for a dark background
    #[arg(long)]
    pub dark: bool,

    /// Report markup errors as plain text
    #[arg(long)]
    pub plaintext_errors: bool,

    /// Enable info-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Options document for the plugin, or `None` for the plain export.
    pub fn options(&self) -> Option<RenderOptions> {
        if self.class.is_none() && !self.dark && !self.plaintext_errors {
            return None;
        }
        let mut options = RenderOptions::default();
        if let Some(class) = &self.class {
            options.class = class.clone();
        }
        options.dark_mode = self.dark;
        options.plaintext_errors = self.plaintext_errors;
        Some(options)
    }

    pub fn execute(&self) -> Result<()> {
        let host = PluginHost::from_file(&self.plugin)?;
        let markup = read_markup(self.input.as_deref())?;
        info!(plugin = %self.plugin.display(), bytes = markup.len(), "rendering");

        let svg = match self.options() {
            Some(options) => host.render_with_options(&markup, &options)?,
            None => host.render(&markup)?,
        };

        write_output(self.output.as_deref(), &svg)?;
        info!(bytes = svg.len(), "rendered");
        Ok(())
    }
}

fn read_markup(input: Option<&Path>) -> Result<Vec<u8>> {
    match input {
        Some(path) if path != Path::new("-") => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut markup = Vec::new();
            std::io::stdin()
                .read_to_end(&mut markup)
                .context("Failed to read stdin")?;
            Ok(markup)
        }
    }
}

fn write_output(output: Option<&Path>, svg: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(svg)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RenderArgs {
        RenderArgs {
            plugin: PathBuf::from("pikchr_plugin.wasm"),
            input: None,
            output: None,
            class: None,
            dark: false,
            plaintext_errors: false,
            verbose: false,
        }
    }

    #[test]
    fn plain_flags_use_plain_export() {
        assert!(args().options().is_none());
    }

    #[test]
    fn dark_flag_builds_options() {
        let options = RenderArgs { dark: true, ..args() }.options().unwrap();
        assert!(options.dark_mode);
        assert_eq!(options.class, "pikchr");
    }

    #[test]
    fn class_flag_overrides_default() {
        let options = RenderArgs {
            class: Some("figure".into()),
            ..args()
        }
        .options()
        .unwrap();
        assert_eq!(options.class, "figure");
        assert!(!options.dark_mode);
    }

    #[test]
    fn markup_and_output_go_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("diagram.pikchr");
        let output = dir.path().join("diagram.svg");
        std::fs::write(&input, b"box").unwrap();

        assert_eq!(read_markup(Some(&input)).unwrap(), b"box");
        write_output(Some(&output), b"<svg/>").unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"<svg/>");
    }

    #[test]
    fn missing_input_names_the_file() {
        let err = read_markup(Some(Path::new("/nonexistent/diagram.pikchr"))).unwrap_err();
        assert!(err.to_string().contains("diagram.pikchr"));
    }
}
