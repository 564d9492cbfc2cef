mod cli;

use tp_core::config::SelectorConfig;
use tp_core::{SelectionReason, TrackType};
use tp_mapping::{map_tracks, MappedTrackInfo, RendererSupport};
use tp_select::{
    DefaultTrackSelector, ParametersBuilder, RendererConfiguration, TrackSelectorResult,
};
use trackpilot::Scenario;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "trackpilot=trace,tp_select=trace,tp_mapping=trace,tp_core=debug".to_string()
        } else {
            "trackpilot=info,tp_select=warn,tp_mapping=warn,tp_core=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Select { scenario, json } => {
            select_scenario(&scenario, cli.config.as_deref(), json)
        }
        Commands::Inspect { scenario } => inspect_scenario(&scenario),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("trackpilot {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    if !path.exists() {
        anyhow::bail!("Scenario file does not exist: {:?}", path);
    }
    Ok(Scenario::load(path)?)
}

fn select_scenario(path: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let scenario = load_scenario(path)?;
    let config = SelectorConfig::load_or_default(config_path);
    for warning in config.validate() {
        tracing::warn!("config: {}", warning);
    }

    let selector = DefaultTrackSelector::default().with_system_languages(&config.system_languages);
    selector.set_parameters_builder(ParametersBuilder::from_config(&config))?;

    let groups = scenario.track_groups()?;
    let result = selector.select_tracks(&scenario.renderers(), &groups)?;
    selector.on_selection_activated(&result);

    if json {
        let report = SelectionReport::new(&result);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let info = result.mapped_track_info();
    for renderer in 0..result.length() {
        let state = if result.is_renderer_enabled(renderer) {
            "enabled"
        } else {
            "disabled"
        };
        println!(
            "Renderer {} ({}, {}): {}",
            renderer,
            info.renderer_name(renderer),
            info.renderer_type(renderer),
            state
        );
        if let Some(session_id) = result
            .configuration(renderer)
            .and_then(|c| c.tunneling_audio_session_id)
        {
            println!("  Tunneling: session {}", session_id);
        }
        match result.definition(renderer) {
            Some(definition) => {
                let kind = if definition.is_adaptive() {
                    "adaptive"
                } else {
                    "fixed"
                };
                println!(
                    "  Group {} ({}, reason {})",
                    definition.group_index, kind, definition.reason
                );
                for &track in &definition.tracks {
                    println!("    [{}] {}", track, definition.group.format(track));
                }
            }
            None => println!("  No selection"),
        }
    }

    Ok(())
}

fn inspect_scenario(path: &Path) -> Result<()> {
    let scenario = load_scenario(path)?;
    let groups = scenario.track_groups()?;
    let info = map_tracks(&scenario.renderers(), &groups)?;
    print_mapped_track_info(&info);
    Ok(())
}

fn print_mapped_track_info(info: &MappedTrackInfo) {
    println!("Renderers: {}", info.renderer_count());
    for renderer in 0..info.renderer_count() {
        println!(
            "\n[{}] {} ({}): {}",
            renderer,
            info.renderer_name(renderer),
            info.renderer_type(renderer),
            info.renderer_support(renderer)
        );
        println!(
            "  Mixed MIME adaptation: {}",
            info.mixed_mime_type_adaptive_support(renderer)
        );
        for (group_index, group) in info.track_groups(renderer).iter().enumerate() {
            println!(
                "  Group {}: {} track(s), adaptive {}",
                group_index,
                group.len(),
                info.adaptive_support(renderer, group_index, false)
            );
            for (track, format) in group.formats().iter().enumerate() {
                println!(
                    "    [{}] {} -> {}",
                    track,
                    format,
                    info.track_support(renderer, group_index, track)
                );
            }
        }
    }

    let unmapped = info.unmapped_track_groups();
    println!("\nUnmapped groups: {}", unmapped.len());
    for group in unmapped.iter() {
        for format in group.formats() {
            println!("  {}", format);
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            SelectorConfig::load(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            SelectorConfig::default()
        }
    };

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("✓ Configuration is valid");
    } else {
        println!("Configuration has {} warning(s):", warnings.len());
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    let params = ParametersBuilder::from_config(&config).build();
    params.validate()?;
    println!("  System languages: {}", config.system_languages.len());
    println!(
        "  Disabled renderers: {}",
        params.disabled_renderers().count()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON report
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SelectionReport<'a> {
    renderers: Vec<RendererReport<'a>>,
    unmapped_groups: usize,
}

#[derive(Serialize)]
struct RendererReport<'a> {
    index: usize,
    name: &'a str,
    track_type: TrackType,
    support: RendererSupport,
    enabled: bool,
    configuration: Option<RendererConfiguration>,
    selection: Option<SelectionEntry>,
}

#[derive(Serialize)]
struct SelectionEntry {
    group_index: usize,
    tracks: Vec<usize>,
    adaptive: bool,
    reason: SelectionReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl<'a> SelectionReport<'a> {
    fn new(result: &'a TrackSelectorResult) -> Self {
        let info = result.mapped_track_info();
        let renderers = (0..result.length())
            .map(|renderer| RendererReport {
                index: renderer,
                name: info.renderer_name(renderer),
                track_type: info.renderer_type(renderer),
                support: info.renderer_support(renderer),
                enabled: result.is_renderer_enabled(renderer),
                configuration: result.configuration(renderer).copied(),
                selection: result.definition(renderer).map(|d| SelectionEntry {
                    group_index: d.group_index,
                    tracks: d.tracks.clone(),
                    adaptive: d.is_adaptive(),
                    reason: d.reason,
                    data: d.data.clone(),
                }),
            })
            .collect();
        Self {
            renderers,
            unmapped_groups: info.unmapped_track_groups().len(),
        }
    }
}
