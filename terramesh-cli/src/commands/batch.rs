//! Concurrent generation of a block of tiles.

use std::ops::Range;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use terramesh::mapper::TerrainTileIndex;
use tracing::info;

use super::common::{parse_span, MeshOverrides};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `terramesh batch`.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Level of detail
    #[arg(long)]
    pub level: u32,

    /// Row span: `5`, `3..7` (exclusive) or `3..=7` (inclusive)
    #[arg(long, value_parser = parse_span)]
    pub rows: Range<u32>,

    /// Column span: `5`, `3..7` (exclusive) or `3..=7` (inclusive)
    #[arg(long, value_parser = parse_span)]
    pub cols: Range<u32>,

    /// Config file (default: ~/.terramesh/config.ini)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Echo log output to the terminal
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub mesh: MeshOverrides,
}

/// Run `terramesh batch`.
pub async fn run(args: BatchArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.config.as_deref(), args.verbose)?;
    let provider = runner.create_provider(&args.mesh)?;
    let cancellation = runner.cancellation_on_ctrl_c();

    let level = args.level;
    let cols = args.cols.clone();
    let tiles: Vec<_> = args
        .rows
        .clone()
        .flat_map(|row| {
            cols.clone()
                .map(move |col| TerrainTileIndex::new(level, row, col))
        })
        .collect();

    println!(
        "Generating {} tiles at level {} ({} concurrent)",
        tiles.len(),
        args.level,
        provider.pool().capacity()
    );

    let start = Instant::now();
    let results = provider.query_tile_meshes(&tiles, &cancellation).await;
    let elapsed = start.elapsed();

    let mut failed = 0;
    for (tile, result) in tiles.iter().zip(&results) {
        match result {
            Ok(mesh) => println!(
                "  {:<16} {:>6} vertices {:>6} triangles",
                tile.to_string(),
                mesh.vertex_count(),
                mesh.triangle_count()
            ),
            Err(e) => {
                failed += 1;
                println!("  {:<16} FAILED: {}", tile.to_string(), e);
            }
        }
    }

    let peak = provider.pool().peak_in_flight();
    println!();
    println!(
        "{} succeeded, {} failed in {:.1} ms (peak {} of {} sample buffers in use)",
        tiles.len() - failed,
        failed,
        elapsed.as_secs_f64() * 1000.0,
        peak,
        provider.pool().capacity()
    );
    info!(
        tiles = tiles.len(),
        failed,
        peak_in_flight = peak,
        duration_ms = elapsed.as_millis() as u64,
        "Batch complete"
    );

    if failed > 0 {
        return Err(CliError::BatchFailed {
            failed,
            total: tiles.len(),
        });
    }
    Ok(())
}
