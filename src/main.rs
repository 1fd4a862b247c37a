use ascii_render::{Palette, RenderConfig, Weighting};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use asciify::api;
use asciify::assets::AssetLoader;
use asciify::models::AppConfig;
use asciify::server;

#[derive(Parser)]
#[command(name = "asciify")]
#[command(about = "Asciify - turn images into ASCII art")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render an image file to ASCII art without the server
    Render {
        /// Image file to convert
        #[arg(short, long)]
        input: PathBuf,

        /// Output text file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output width in columns (default from config, clamped to the image)
        #[arg(short, long)]
        width: Option<u32>,

        /// Palette index (0-6) or name
        #[arg(short, long)]
        palette: Option<String>,

        /// Brightness weighting: "simple" or "perceptual"
        #[arg(long)]
        weighting: Option<String>,
    },
    /// List the available palettes
    Palettes,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asciify API",
        description = "Asciify - turn uploaded images into ASCII art",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_upload,
        api::handle_get_image,
        api::handle_clear_image,
        api::handle_render,
        api::handle_render_text,
        api::handle_palettes,
    ),
    components(schemas(api::ImageInfo, api::RenderResponse, api::PaletteInfo,)),
    tags(
        (name = "Image", description = "Per-session image upload and storage"),
        (name = "Render", description = "ASCII art rendering")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            width,
            palette,
            weighting,
        }) => run_render_command(&input, output.as_deref(), width, palette, weighting),
        Some(Commands::Palettes) => {
            run_palettes_command();
            Ok(())
        }
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Render an image file to text (no server needed)
fn run_render_command(
    input: &Path,
    output: Option<&Path>,
    width: Option<u32>,
    palette: Option<String>,
    weighting: Option<String>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asciify=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load_from_assets(&AssetLoader::from_env());
    let settings = resolve_cli_settings(config.default_render_config(), width, palette, weighting)?;

    let bytes = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let image = ascii_render::decode(&bytes)
        .map_err(|e| anyhow::anyhow!("{} is not an image: {e}", input.display()))?;

    let settings = settings.clamp_to(image.width());
    let art = ascii_render::render(Some(&image), &settings);

    match output {
        Some(path) => {
            std::fs::write(path, &art)?;
            println!(
                "Rendered {} ({} columns, palette {})",
                path.display(),
                settings.width,
                settings.palette
            );
        }
        None => std::io::stdout().write_all(art.as_bytes())?,
    }

    Ok(())
}

fn resolve_cli_settings(
    defaults: RenderConfig,
    width: Option<u32>,
    palette: Option<String>,
    weighting: Option<String>,
) -> anyhow::Result<RenderConfig> {
    let mut settings = defaults;
    if let Some(width) = width {
        settings = settings.width(width.max(1));
    }
    if let Some(name) = palette {
        let palette = name
            .parse::<Palette>()
            .map_err(|e| anyhow::anyhow!("{e} (run 'asciify palettes' to list them)"))?;
        settings = settings.palette(palette);
    }
    if let Some(name) = weighting {
        settings = settings.weighting(name.parse::<Weighting>()?);
    }
    Ok(settings)
}

fn run_palettes_command() {
    println!("Palettes (darkest glyph first):\n");
    for palette in Palette::ALL {
        let glyphs: String = palette.glyphs().iter().collect();
        println!("  {}  {:<18} \"{glyphs}\"", palette.index(), palette.name());
    }
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let static_dir = std::env::var("STATIC_DIR").ok();
    let session_dir = std::env::var("SESSION_DIR").ok();

    // Header
    println!("Asciify v{VERSION}");
    println!("Turn images into ASCII art in the browser\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  STATIC_DIR  = {}",
        static_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  SESSION_DIR = {}",
        session_dir.as_deref().unwrap_or("(not set)")
    );

    // Asset sources section
    println!("\nAsset Sources:");

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config: {config_source}");

    let embedded = AssetLoader::list_embedded_static();
    match static_dir {
        Some(ref path) if Path::new(path).exists() => {
            println!("  Page:   {path} ({} embedded fallbacks)", embedded.len())
        }
        _ => println!("  Page:   embedded ({})", embedded.join(", ")),
    }

    // Commands section
    println!("\nCommands:");
    println!("  asciify serve     Start the HTTP server");
    println!("  asciify render    Render an image file to ASCII art");
    println!("  asciify palettes  List the available palettes");
    println!("\nRun 'asciify --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asciify=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    // Log asset sources
    tracing::info!(
        page = %asset_loader.static_dir().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        config = %asset_loader.config_file().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        "Asset sources configured"
    );

    // Seed the config file if its path is configured but missing
    if let Err(e) = asset_loader.seed_config_if_configured() {
        tracing::warn!(%e, "Failed to seed config file");
    }

    // Create application state using shared server module
    let state = server::create_app_state(asset_loader)?;

    // Build router: start with shared routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Asciify server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
