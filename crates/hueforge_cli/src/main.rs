//! Hueforge CLI
//!
//! Compile symbolic themes into report-theme JSON and inspect the token and
//! palette catalogs.

mod config;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use config::{HueforgeConfig, PalettesConfig};
use hueforge_theme::{
    detect_quick_customizations, resolve_token_or_fallback, ColorMode, ColorPalette, ColorToken,
    NeutralPalette, QuickCustomization, Theme, ThemeEditor, TokenContext,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hueforge")]
#[command(author, version, about = "Semantic theme compiler for report themes", long_about = None)]
struct Cli {
    /// Path to hueforge.toml (defaults to ./hueforge.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a theme file into a concrete theme document
    Compile {
        /// Theme JSON file
        theme: PathBuf,

        /// Write output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the theme's light/dark mode
        #[arg(long)]
        mode: Option<ColorMode>,

        /// Extra palette records (JSON: {"color": [...], "neutral": [...]})
        #[arg(long)]
        palettes: Option<PathBuf>,

        /// Apply a quick customization before compiling (e.g. borderStyle=subtle)
        #[arg(long = "quick", value_name = "CATEGORY=VALUE")]
        quick: Vec<QuickCustomization>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print which quick customizations a theme currently matches
    Detect {
        /// Theme JSON file
        theme: PathBuf,
    },

    /// List the token table resolved against the default neutral palette
    Tokens {
        #[arg(long)]
        mode: Option<ColorMode>,
    },

    /// List available palettes
    Palettes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = HueforgeConfig::load(cli.config.as_deref())?;

    init_tracing(cli.verbose, config.log.level.as_deref());

    match cli.command {
        Commands::Compile {
            theme,
            output,
            mode,
            palettes,
            quick,
            compact,
        } => cmd_compile(
            &config,
            &theme,
            CompileOptions {
                output: output.as_deref(),
                mode,
                palettes: palettes.as_deref(),
                quick: &quick,
                compact,
            },
        ),
        Commands::Detect { theme } => cmd_detect(&theme),
        Commands::Tokens { mode } => {
            cmd_tokens(mode.or(config.defaults.mode).unwrap_or_default());
            Ok(())
        }
        Commands::Palettes => {
            cmd_palettes(&config);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8, config_level: Option<&str>) {
    let level = match verbose {
        0 => config_level.unwrap_or("warn"),
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A theme file and whether it declared its own mode.
fn load_theme(path: &Path) -> Result<(Theme, bool)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let has_mode = raw.get("mode").is_some();
    let theme: Theme = serde_json::from_value(raw)
        .with_context(|| format!("{} is not a valid theme", path.display()))?;
    Ok((theme, has_mode))
}

struct CompileOptions<'a> {
    output: Option<&'a Path>,
    mode: Option<ColorMode>,
    palettes: Option<&'a Path>,
    quick: &'a [QuickCustomization],
    compact: bool,
}

fn cmd_compile(config: &HueforgeConfig, theme_path: &Path, opts: CompileOptions<'_>) -> Result<()> {
    let (theme, has_mode) = load_theme(theme_path)?;

    let mut store = config.palette_store();
    if let Some(path) = opts.palettes {
        PalettesConfig::load_json(path)?.merge_into(&mut store);
    }

    let mut editor = ThemeEditor::new(theme, Arc::new(store));
    let mode = opts
        .mode
        .or(if has_mode { None } else { config.defaults.mode });
    if let Some(mode) = mode {
        editor.set_mode(mode);
    }
    for choice in opts.quick {
        editor.apply_quick_customization(*choice);
    }

    let pretty = config.output.pretty && !opts.compact;
    let resolved = editor.export();
    if !resolved.diagnostics.is_empty() {
        tracing::info!(
            count = resolved.diagnostics.len(),
            "some tokens could not be resolved and used fallbacks"
        );
    }
    let json = editor
        .export_json(pretty)
        .context("Failed to serialize compiled theme")?;

    match opts.output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_detect(theme_path: &Path) -> Result<()> {
    let (theme, _) = load_theme(theme_path)?;
    let detected = detect_quick_customizations(&theme.visual_styles);
    let json =
        serde_json::to_string_pretty(&detected).context("Failed to serialize detection result")?;
    println!("{json}");
    Ok(())
}

fn cmd_tokens(mode: ColorMode) {
    let neutral = NeutralPalette::builtin_default();
    let color = ColorPalette::builtin_default();
    let ctx = TokenContext::new(&neutral.colors, &color.colors);

    println!("{:<24} {:<12} {:<10} VALUE ({mode})", "TOKEN", "CATEGORY", "SLOT");
    for token in ColorToken::all() {
        let (hex, _) = resolve_token_or_fallback(token.name(), mode, &ctx);
        println!(
            "{:<24} {:<12} {:<10} {}",
            token.name(),
            token.category().id(),
            token.rule(mode).to_string(),
            hex
        );
    }
}

fn cmd_palettes(config: &HueforgeConfig) {
    let store = config.palette_store();

    println!("Color palettes:");
    for palette in store.color_palettes() {
        println!(
            "  {:<16} {:<16} {:>2} colors{}",
            palette.id,
            palette.name,
            palette.colors.len(),
            if palette.is_built_in { "" } else { "  (custom)" }
        );
    }

    println!("Neutral palettes:");
    for palette in store.neutral_palettes() {
        println!(
            "  {:<16} {:<16} {:>2} shades{}",
            palette.id,
            palette.name,
            palette.colors.len(),
            if palette.is_built_in { "" } else { "  (custom)" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compile_flags() {
        let cli = Cli::try_parse_from([
            "hueforge",
            "-vv",
            "compile",
            "theme.json",
            "--mode",
            "dark",
            "-o",
            "out.json",
            "--compact",
            "--quick",
            "borderStyle=none",
            "--quick",
            "paddingStyle=compact",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Compile {
                theme,
                output,
                mode,
                palettes,
                quick,
                compact,
            } => {
                assert_eq!(theme, PathBuf::from("theme.json"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert_eq!(mode, Some(ColorMode::Dark));
                assert_eq!(palettes, None);
                assert!(compact);
                assert_eq!(quick.len(), 2);
                assert_eq!(quick[0].to_string(), "borderStyle=none");
            }
            _ => panic!("expected compile"),
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["hueforge", "tokens", "--mode", "sepia"]).is_err());
    }

    #[test]
    fn config_flag_is_global() {
        let cli =
            Cli::try_parse_from(["hueforge", "palettes", "--config", "custom.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Palettes));
    }
}
