use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "layerfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ffmpeg arguments for an edit project.
    Args(ArgsArgs),
    /// Render an edit project to MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ArgsArgs {
    /// Input edit project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Editor configuration JSON (catalogues, output name).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the arguments as a JSON array instead of one per line.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input edit project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Editor configuration JSON (catalogues, output name).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory relative asset sources resolve against. Defaults to the project's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// ffmpeg binary to run.
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// Keep the staging directory after the run.
    #[arg(long)]
    keep_workdir: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Args(args) => cmd_args(args),
        Command::Render(args) => cmd_render(args).await,
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<layerfx::EditorConfig> {
    match path {
        Some(p) => layerfx::EditorConfig::from_json_file(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(layerfx::EditorConfig::default()),
    }
}

fn cmd_args(args: ArgsArgs) -> anyhow::Result<()> {
    let project = layerfx::EditProject::from_json_file(&args.in_path)?;
    let config = load_config(args.config.as_deref())?;
    let registry = project.build_registry()?;

    let argv = layerfx::assemble_command(
        &project.staged_input_name()?,
        &registry,
        &config.catalog,
        &config.output_file,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&argv)?);
    } else {
        for a in &argv {
            println!("{a}");
        }
    }
    Ok(())
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let project = layerfx::EditProject::from_json_file(&args.in_path)?;
    let config = load_config(args.config.as_deref())?;
    let registry = project.build_registry()?;

    if args.ffmpeg.is_none() && !layerfx::is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg is required for rendering, but was not found on PATH");
    }

    let assets_root = match args.assets {
        Some(dir) => dir,
        None => args
            .in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };

    let fs = layerfx::DirFs::temp("layerfx")?;
    let workdir = fs.root().to_path_buf();
    let mut engine = layerfx::FfmpegEngine::new(fs);
    if let Some(bin) = args.ffmpeg {
        engine = engine.with_binary(bin);
    }

    let mut editor =
        layerfx::MediaEditor::new(config, engine, layerfx::FsFetcher::new(assets_root))
            .with_progress(|event| match event {
                layerfx::EditorEvent::EngineLog(line) => eprintln!("ffmpeg: {line}"),
                other => tracing::info!(event = ?other, "progress"),
            });

    let result = render_into(&mut editor, &project, registry, &args.out).await;

    if args.keep_workdir {
        eprintln!("staging directory kept at {}", workdir.display());
    } else {
        std::fs::remove_dir_all(&workdir).ok();
    }

    result?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

async fn render_into(
    editor: &mut layerfx::MediaEditor<layerfx::FfmpegEngine, layerfx::FsFetcher>,
    project: &layerfx::EditProject,
    registry: layerfx::LayerRegistry,
    out: &Path,
) -> anyhow::Result<()> {
    editor
        .init(&project.input, &project.staged_input_name()?)
        .await?;
    editor.set_registry(registry);
    editor.run().await?;

    let bytes = editor.output()?;
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, bytes).with_context(|| format!("write mp4 '{}'", out.display()))?;
    Ok(())
}
