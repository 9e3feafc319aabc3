//! Region-tile regeneration: generate into a scratch map, preview, then
//! merge into the live world or throw the result away.
//!
//! ```text
//! Idle --begin--> Previewing --regenerate/rotate--> Previewing
//!                     |--apply--> Idle   (scratch merged)
//!                     |--abort--> Idle   (classification restored)
//!                     `--marker--> Idle  (classification kept, cells untouched)
//! ```
mod merge;

use arrayvec::ArrayVec;
use thiserror::Error;
use world_core::{
    ChunkPos, ContentGenerator, ErrorSeverity, GenerationRequest, RegionPos, RegionTypeId,
    ScratchChunk, WorldAccess, WorldConfig, WorldError, compute_seed,
};

use crate::editor::EditorContext;

pub use merge::ApplyReport;

const TILE_CHUNKS: usize = (WorldConfig::REGION_CHUNKS * WorldConfig::REGION_CHUNKS) as usize;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no regeneration preview is active")]
    NotPreviewing,

    #[error("a preview of {tile} is already active")]
    AlreadyPreviewing { tile: RegionPos },

    #[error("{tile} is not fully inside the world")]
    TileOutOfBounds { tile: RegionPos },

    #[error("chunk {chunk} is missing from the world")]
    MissingChunk { chunk: ChunkPos },
}

impl WorldError for PipelineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotPreviewing | Self::AlreadyPreviewing { .. } => ErrorSeverity::Internal,
            Self::TileOutOfBounds { .. } => ErrorSeverity::Validation,
            Self::MissingChunk { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotPreviewing => "PIPELINE_NOT_PREVIEWING",
            Self::AlreadyPreviewing { .. } => "PIPELINE_ALREADY_PREVIEWING",
            Self::TileOutOfBounds { .. } => "PIPELINE_TILE_OUT_OF_BOUNDS",
            Self::MissingChunk { .. } => "PIPELINE_MISSING_CHUNK",
        }
    }
}

/// Classification change left behind by a marker-only commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerChange {
    pub tile: RegionPos,
    pub previous: Option<RegionTypeId>,
    pub current: Option<RegionTypeId>,
}

#[derive(Debug)]
struct Preview {
    tile: RegionPos,
    previous: Option<RegionTypeId>,
    region_type: Option<RegionTypeId>,
    scratch: ScratchChunk,
    attempt: u32,
    digests: ArrayVec<(ChunkPos, [u8; 32]), TILE_CHUNKS>,
}

#[derive(Debug, Default)]
enum PipelineState {
    #[default]
    Idle,
    Previewing(Box<Preview>),
}

/// Owner of the scratch map while a tile is being regenerated.
#[derive(Debug)]
pub struct RegenPipeline {
    world_seed: u64,
    state: PipelineState,
}

/// The four live chunks of a region tile, in scratch order.
pub fn tile_chunks(tile: RegionPos) -> impl Iterator<Item = ChunkPos> {
    let anchor = tile.anchor_chunk();
    (0..TILE_CHUNKS).map(move |index| {
        let (dx, dy) = ScratchChunk::chunk_offset(index);
        anchor.offset(dx, dy)
    })
}

fn generate<W, G>(
    ctx: &EditorContext<'_, W, G>,
    tile: RegionPos,
    region_type: Option<RegionTypeId>,
    world_seed: u64,
    attempt: u32,
) -> ScratchChunk
where
    W: WorldAccess + ?Sized,
    G: ContentGenerator + ?Sized,
{
    let request = GenerationRequest {
        region: tile,
        region_type,
        turn: ctx.world.current_turn(),
        seed: compute_seed(world_seed, tile, attempt),
    };
    ctx.generator.generate(ctx.catalog, &request)
}

impl RegenPipeline {
    pub fn new(world_seed: u64) -> Self {
        Self {
            world_seed,
            state: PipelineState::Idle,
        }
    }

    pub fn is_previewing(&self) -> bool {
        matches!(self.state, PipelineState::Previewing(_))
    }

    fn preview(&self) -> Option<&Preview> {
        match &self.state {
            PipelineState::Previewing(preview) => Some(preview),
            PipelineState::Idle => None,
        }
    }

    fn preview_mut(&mut self) -> Result<&mut Preview, PipelineError> {
        match &mut self.state {
            PipelineState::Previewing(preview) => Ok(preview),
            PipelineState::Idle => Err(PipelineError::NotPreviewing),
        }
    }

    fn take_preview(&mut self) -> Result<Box<Preview>, PipelineError> {
        match std::mem::take(&mut self.state) {
            PipelineState::Previewing(preview) => Ok(preview),
            PipelineState::Idle => Err(PipelineError::NotPreviewing),
        }
    }

    pub fn tile(&self) -> Option<RegionPos> {
        self.preview().map(|preview| preview.tile)
    }

    pub fn scratch(&self) -> Option<&ScratchChunk> {
        self.preview().map(|preview| &preview.scratch)
    }

    /// Classification the preview was generated as.
    pub fn region_type(&self) -> Option<Option<RegionTypeId>> {
        self.preview().map(|preview| preview.region_type)
    }

    /// Classification the tile had before the preview began.
    pub fn previous_type(&self) -> Option<RegionTypeId> {
        self.preview().and_then(|preview| preview.previous)
    }

    /// Classifies `tile` as `region_type` and generates a preview of it.
    pub fn begin<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        tile: RegionPos,
        region_type: Option<RegionTypeId>,
    ) -> Result<(), PipelineError>
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        if let Some(active) = self.tile() {
            return Err(PipelineError::AlreadyPreviewing { tile: active });
        }
        if !ctx.world.bounds().contains_region(tile) {
            return Err(PipelineError::TileOutOfBounds { tile });
        }
        let mut digests = ArrayVec::new();
        for pos in tile_chunks(tile) {
            let chunk = ctx
                .world
                .chunk(pos)
                .ok_or(PipelineError::MissingChunk { chunk: pos })?;
            digests.push((pos, chunk.layer_digest()));
        }

        let previous = ctx.world.region_type(tile);
        ctx.world.set_region_type(tile, region_type);
        let scratch = generate(ctx, tile, region_type, self.world_seed, 0);
        tracing::info!(
            %tile,
            previous = ?previous,
            region_type = ?region_type,
            vehicles = scratch.vehicle_count(),
            "began regeneration preview"
        );
        self.state = PipelineState::Previewing(Box::new(Preview {
            tile,
            previous,
            region_type,
            scratch,
            attempt: 0,
            digests,
        }));
        Ok(())
    }

    /// Clears the scratch map and generates the tile again, as `region_type`.
    pub fn regenerate<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
        region_type: Option<RegionTypeId>,
    ) -> Result<(), PipelineError>
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let world_seed = self.world_seed;
        let preview = self.preview_mut()?;
        if preview.region_type != region_type {
            ctx.world.set_region_type(preview.tile, region_type);
            preview.region_type = region_type;
        }

        let dropped = preview.scratch.clear(ctx.catalog.default_terrain());
        if dropped > 0 {
            tracing::warn!(tile = %preview.tile, dropped, "dropped scratch vehicles");
        }
        preview.attempt = preview.attempt.wrapping_add(1);
        preview.scratch = generate(ctx, preview.tile, region_type, world_seed, preview.attempt);
        tracing::debug!(
            tile = %preview.tile,
            attempt = preview.attempt,
            region_type = ?region_type,
            "regenerated preview"
        );
        Ok(())
    }

    /// Quarter-turns the scratch map clockwise `turns` times.
    pub fn rotate(&mut self, turns: u8) -> Result<(), PipelineError> {
        let preview = self.preview_mut()?;
        preview.scratch.rotate(turns);
        Ok(())
    }

    /// Merges the scratch map into the live chunks of the tile.
    pub fn apply<W, G>(
        &mut self,
        ctx: &mut EditorContext<'_, W, G>,
    ) -> Result<ApplyReport, PipelineError>
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let preview = self.take_preview()?;
        let region_type = preview.region_type;
        let report = merge::merge_scratch(ctx.world, preview.scratch)?;
        tracing::info!(
            tile = %report.tile,
            region_type = ?region_type,
            chunks = report.chunks,
            vehicles = report.vehicles_moved,
            spawns = report.spawns_added,
            "applied regenerated tile"
        );
        Ok(report)
    }

    /// Discards the scratch map and restores the tile's old classification.
    ///
    /// Returns whether the live chunks still match the digests taken when the
    /// preview began.
    pub fn abort<W, G>(&mut self, ctx: &mut EditorContext<'_, W, G>) -> Result<bool, PipelineError>
    where
        W: WorldAccess + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let preview = self.take_preview()?;
        ctx.world.set_region_type(preview.tile, preview.previous);

        let mut intact = true;
        for (pos, digest) in &preview.digests {
            let current = ctx.world.chunk(*pos).map(|chunk| chunk.layer_digest());
            if current.as_ref() != Some(digest) {
                tracing::warn!(chunk = %pos, "live chunk changed during preview");
                intact = false;
            }
        }
        tracing::info!(tile = %preview.tile, restored = ?preview.previous, "aborted regeneration");
        Ok(intact)
    }

    /// Keeps the new classification and discards the generated cells.
    pub fn change_marker_only(&mut self) -> Result<MarkerChange, PipelineError> {
        let preview = self.take_preview()?;
        let change = MarkerChange {
            tile: preview.tile,
            previous: preview.previous,
            current: preview.region_type,
        };
        tracing::info!(
            tile = %change.tile,
            previous = ?change.previous,
            current = ?change.current,
            "changed region type only"
        );
        Ok(change)
    }
}
