use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use diagz::api::GalleryApi;
use diagz::commands::GalleryPaths;
use diagz::config::GalleryConfig;
use diagz::error::{GalleryError, Result};
use diagz::http::ReqwestClient;
use diagz::launcher::open_in_viewer;
use diagz::store::fs::FileStore;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands};

type Api = GalleryApi<FileStore, ReqwestClient>;

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if e.is_retryable() {
            eprintln!("{}", "Could not load diagrams. Run the command again to retry.".dimmed());
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let api = init_api(&cli)?;

    match cli.command {
        Some(Commands::List { search, json }) => handle_list(&api, search.as_deref(), json),
        Some(Commands::Search { term }) => handle_list(&api, Some(&term), false),
        Some(Commands::View { id }) => handle_view(&api, &id),
        Some(Commands::Describe { id, text }) => handle_describe(&api, &id, &text.join(" ")),
        Some(Commands::Download {
            id,
            version,
            output,
        }) => handle_download(&api, &id, version.as_deref(), output.as_deref()),
        Some(Commands::Open { id, version }) => handle_open(&api, &id, version.as_deref()),
        Some(Commands::Source) => handle_source(&api),
        None => handle_list(&api, None, false),
    }
}

fn resolve_paths() -> Result<GalleryPaths> {
    if let Some(home) = std::env::var_os("DIAGZ_HOME") {
        let home = PathBuf::from(home);
        return Ok(GalleryPaths {
            data_dir: home.clone(),
            config_dir: home,
        });
    }

    let proj_dirs = ProjectDirs::from("com", "diagz", "diagz")
        .ok_or_else(|| GalleryError::Config("Could not determine config dir".to_string()))?;
    Ok(GalleryPaths {
        data_dir: proj_dirs.data_dir().to_path_buf(),
        config_dir: proj_dirs.config_dir().to_path_buf(),
    })
}

fn init_api(cli: &Cli) -> Result<Api> {
    let paths = resolve_paths()?;
    let mut config = GalleryConfig::load(&paths.config_dir)?;
    if let Some(root) = &cli.root {
        config.registry.root = root.clone();
    }

    let store = FileStore::new(paths.data_dir.clone());
    Ok(GalleryApi::new(config, store, ReqwestClient::new(), paths))
}

fn handle_list(api: &Api, search: Option<&str>, json: bool) -> Result<()> {
    let result = api.list_diagrams(search)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result.listed_diagrams)?);
        return Ok(());
    }

    print::print_header(result.total, result.listed_diagrams.len(), api.source_kind());
    print::print_groups(&result.groups);
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_view(api: &Api, id: &str) -> Result<()> {
    let result = api.view_diagram(id)?;
    if let Some(detail) = &result.detail {
        print::print_detail(detail);
    }
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_describe(api: &Api, id: &str, text: &str) -> Result<()> {
    let result = api.describe_diagram(id, text)?;
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_download(
    api: &Api,
    id: &str,
    version: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let result = api.download_diagram(id, version, output)?;
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_open(api: &Api, id: &str, version: Option<&str>) -> Result<()> {
    let result = api.open_target(id, version)?;
    for target in &result.targets {
        open_in_viewer(target)?;
        println!("Opened {}", target.dimmed());
    }
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_source(api: &Api) -> Result<()> {
    let result = api.source_info();
    if let Some(info) = &result.source {
        print::print_source(info);
    }
    print::print_messages(&result.messages);
    Ok(())
}
