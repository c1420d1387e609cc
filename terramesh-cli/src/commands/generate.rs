//! Single tile mesh generation.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use terramesh::mapper::TerrainTileIndex;

use super::common::{print_mesh_summary, MeshOverrides};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `terramesh generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Level of detail
    #[arg(long)]
    pub level: u32,

    /// Tile row (0 = northernmost)
    #[arg(long)]
    pub row: u32,

    /// Tile column (0 = westernmost)
    #[arg(long)]
    pub col: u32,

    /// Config file (default: ~/.terramesh/config.ini)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Echo log output to the terminal
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub mesh: MeshOverrides,
}

/// Run `terramesh generate`.
pub async fn run(args: GenerateArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.config.as_deref(), args.verbose)?;
    let provider = runner.create_provider(&args.mesh)?;
    let cancellation = runner.cancellation_on_ctrl_c();

    let tile = TerrainTileIndex::new(args.level, args.row, args.col);
    let start = Instant::now();
    let mesh = provider.query_tile_mesh(tile, &cancellation).await?;

    let ellipsoid = runner.effective_config(&args.mesh).ellipsoid();
    print_mesh_summary(&mesh, &ellipsoid);
    println!("  Time:      {:.1} ms", start.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}
