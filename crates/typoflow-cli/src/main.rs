use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};
use typoflow_core::{
    COLOR_THEMES, DEFAULT_FONT_FAMILY, FONT_OPTIONS, FontLang, GeminiClient, StyleSettings,
    SuggestConfig, fonts_for_lang, preset_by_name, presets, render_document_html, suggest_styles,
    theme_by_name,
};

#[derive(Parser)]
#[command(version, about = "TypoFlow - typographic styling for plain text", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available fonts
    Fonts {
        /// Only fonts suited to this language (en, zh, both)
        #[arg(long)]
        lang: Option<String>,
    },
    /// List presets with their settings
    Presets,
    /// List color themes
    Themes,
    /// Render a text file as a styled HTML fragment
    Render {
        /// Text file to render, or `-` for stdin
        file: PathBuf,

        /// Preset to start from
        #[arg(long)]
        preset: Option<String>,

        /// Color theme applied on top of the preset
        #[arg(long)]
        theme: Option<String>,

        /// Write the fragment here instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Ask the suggestion service for settings matching a text file
    Suggest {
        /// Text file to analyze, or `-` for stdin
        file: PathBuf,

        /// Print the default settings with the suggestion merged in
        #[arg(long)]
        apply: bool,

        /// Model name
        #[arg(long, env = "TYPOFLOW_MODEL")]
        model: Option<String>,

        /// API base URL
        #[arg(long, env = "TYPOFLOW_ENDPOINT")]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_miette();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fonts { lang } => list_fonts(lang.as_deref())?,
        Commands::Presets => list_presets()?,
        Commands::Themes => list_themes(),
        Commands::Render {
            file,
            preset,
            theme,
            out,
        } => render_file(&file, preset.as_deref(), theme.as_deref(), out.as_deref())?,
        Commands::Suggest {
            file,
            apply,
            model,
            endpoint,
        } => suggest_file(&file, apply, model, endpoint).await?,
    }

    Ok(())
}

fn list_fonts(lang: Option<&str>) -> Result<()> {
    let fonts: Vec<_> = match lang {
        Some(tag) => {
            let lang = FontLang::parse(tag)
                .ok_or_else(|| miette::miette!("Unknown language {tag:?}. Use en, zh or both"))?;
            fonts_for_lang(lang).collect()
        }
        None => FONT_OPTIONS.iter().collect(),
    };

    for font in fonts {
        println!("{:<28} {:?}/{:?}  {}", font.name, font.category, font.lang, font.value);
    }
    Ok(())
}

fn list_presets() -> Result<()> {
    for preset in presets() {
        let settings = serde_json::to_string(&preset.settings).into_diagnostic()?;
        println!("{:<14} {}", preset.name, settings);
    }
    Ok(())
}

fn list_themes() {
    for theme in &COLOR_THEMES {
        println!(
            "{:<8} {} on {}",
            theme.name, theme.color, theme.background_color
        );
    }
}

fn render_file(
    file: &Path,
    preset: Option<&str>,
    theme: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let text = read_text(file)?;

    let mut settings = match preset {
        Some(name) => {
            preset_by_name(name)
                .ok_or_else(|| miette::miette!("Unknown preset: {name}"))?
                .settings
        }
        None => StyleSettings::default(),
    };
    if let Some(name) = theme {
        let theme = theme_by_name(name).ok_or_else(|| miette::miette!("Unknown theme: {name}"))?;
        settings.apply(&theme.to_patch());
    }

    let html = render_document_html(&text, &settings);
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).into_diagnostic()?;
                }
            }
            std::fs::write(path, html)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✓ Output: {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

async fn suggest_file(
    file: &Path,
    apply: bool,
    model: Option<String>,
    endpoint: Option<String>,
) -> Result<()> {
    let text = read_text(file)?;

    let mut config = SuggestConfig::from_env()?;
    if let Some(model) = model {
        config.model = model;
    }
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    tracing::debug!(?config, "suggestion config");
    let sample_chars = config.sample_chars;
    let client = GeminiClient::new(config);

    eprintln!("→ Requesting suggestion...");
    let start = std::time::Instant::now();
    let patch = suggest_styles(
        &client,
        &text,
        &FONT_OPTIONS,
        DEFAULT_FONT_FAMILY,
        sample_chars,
    )
    .await?;
    eprintln!("✓ Received in {:.2}s", start.elapsed().as_secs_f64());

    let json = if apply {
        serde_json::to_string_pretty(&StyleSettings::default().merged(&patch))
    } else {
        serde_json::to_string_pretty(&patch)
    }
    .into_diagnostic()?;
    println!("{json}");
    Ok(())
}

fn read_text(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .into_diagnostic()
            .wrap_err("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", file.display()))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn init_miette() {
    let _ = miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }));
    miette::set_panic_hook();
}
