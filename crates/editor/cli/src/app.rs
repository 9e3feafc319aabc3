//! Wires the editor to the terminal: crossterm input, ratatui output and the
//! sandbox demo world.
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use crossterm::event::{self, Event};
use editor_core::editor::EditorFrame;
use editor_core::{
    Canvas, DriverError, EditorContext, EditorInput, InputContext, InputSource, MapEditor,
    run_editor,
};
use ratatui::layout::Rect;
use sandbox::{MemoryWorld, Scenario, StampGenerator};
use world_core::{Catalog, ChunkStore, EditorConfig, Point3, Size, WorldError};

use crate::config::CliConfig;
use crate::input::map_key;
use crate::presentation::terminal::{self, TerminalGuard, Tui};
use crate::presentation::ui;

/// Reads key events until one maps to an input or the timeout elapses.
struct TerminalInput;

#[async_trait(?Send)]
impl InputSource for TerminalInput {
    async fn next_input(
        &mut self,
        context: InputContext,
        timeout: Duration,
    ) -> Result<Option<EditorInput>, DriverError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(None);
            }
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(context, key) {
                    return Ok(Some(input));
                }
            }
        }
    }
}

struct TerminalCanvas {
    terminal: Tui,
    info_height: u16,
}

impl Canvas for TerminalCanvas {
    fn viewport(&self) -> Option<Size> {
        let size = self.terminal.size().ok()?;
        Some(ui::map_viewport(
            Rect::new(0, 0, size.width, size.height),
            self.info_height,
        ))
    }

    fn present(&mut self, frame: &EditorFrame) -> Result<(), DriverError> {
        let info_height = self.info_height;
        self.terminal.draw(|f| ui::draw(f, frame, info_height))?;
        Ok(())
    }
}

/// The terminal editor over a generated demo world.
pub struct EditorApp {
    config: CliConfig,
    catalog: Catalog,
    editor_config: EditorConfig,
    world: MemoryWorld,
}

impl EditorApp {
    pub fn load(config: CliConfig) -> Result<Self> {
        let catalog = config.load_catalog()?;
        let editor_config = config.load_editor_config()?;
        let world = Scenario::demo(&catalog, config.seed).context("building the demo world")?;
        tracing::info!(
            seed = config.seed,
            chunks = world.chunk_count(),
            terrain = catalog.terrain_count(),
            "demo world ready"
        );
        Ok(Self {
            config,
            catalog,
            editor_config,
            world,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let bounds = self.world.bounds();
        let start = Point3::new(bounds.width / 2, bounds.height / 2, 0);
        let mut editor = MapEditor::new(self.editor_config, &self.world, start, self.config.seed);

        let mut canvas = TerminalCanvas {
            terminal: terminal::init()?,
            info_height: self.config.info_height,
        };
        let _guard = TerminalGuard;

        let mut ctx = EditorContext::new(&mut self.world, &self.catalog, &StampGenerator);
        let summary = run_editor(&mut editor, &mut ctx, &mut TerminalInput, &mut canvas)
            .await
            .inspect_err(|err| {
                tracing::error!(
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    %err,
                    "editor session failed"
                );
            })?;

        tracing::info!(
            frames = summary.frames,
            inputs = summary.inputs,
            timeouts = summary.timeouts,
            "editor closed"
        );
        Ok(())
    }
}
