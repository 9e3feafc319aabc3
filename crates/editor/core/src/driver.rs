//! The await-next-input loop.
//!
//! Front ends provide an [`InputSource`] that waits for one input with a
//! timeout and a [`Canvas`] that draws [`EditorFrame`]s. [`run_editor`]
//! alternates the two until the editor asks to exit. A timeout is passed to
//! the editor as `None`, which advances the selection blink.
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use world_core::{ContentGenerator, ErrorSeverity, Size, WorldAccess, WorldError};

use crate::editor::{EditorContext, EditorFrame, Flow, MapEditor};
use crate::input::{EditorInput, InputContext};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("input source closed")]
    InputClosed,

    #[error("failed to draw frame: {0}")]
    Render(String),
}

impl WorldError for DriverError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io(_) | Self::Render(_) => ErrorSeverity::Fatal,
            Self::InputClosed => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "DRIVER_IO",
            Self::InputClosed => "DRIVER_INPUT_CLOSED",
            Self::Render(_) => "DRIVER_RENDER",
        }
    }
}

/// Something that yields editor inputs.
#[async_trait(?Send)]
pub trait InputSource {
    /// Waits up to `timeout` for an input meaningful in `context`.
    ///
    /// Returns `Ok(None)` when the timeout elapses first.
    async fn next_input(
        &mut self,
        context: InputContext,
        timeout: Duration,
    ) -> Result<Option<EditorInput>, DriverError>;
}

/// Something that shows editor frames.
pub trait Canvas {
    /// Cells available to the map, when the canvas knows its size.
    fn viewport(&self) -> Option<Size> {
        None
    }

    fn present(&mut self, frame: &EditorFrame) -> Result<(), DriverError>;
}

/// Input source fed from a channel, for front ends that read keys on another
/// task.
pub struct ChannelInput {
    rx: mpsc::Receiver<EditorInput>,
}

impl ChannelInput {
    pub fn new(rx: mpsc::Receiver<EditorInput>) -> Self {
        Self { rx }
    }
}

#[async_trait(?Send)]
impl InputSource for ChannelInput {
    async fn next_input(
        &mut self,
        _context: InputContext,
        timeout: Duration,
    ) -> Result<Option<EditorInput>, DriverError> {
        match tokio::time::timeout(timeout, self.rx.recv()).await {
            Ok(Some(input)) => Ok(Some(input)),
            Ok(None) => Err(DriverError::InputClosed),
            Err(_elapsed) => Ok(None),
        }
    }
}

/// Counters of one editor session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: usize,
    pub inputs: usize,
    pub timeouts: usize,
}

/// Runs the editor until it exits or a front-end call fails.
pub async fn run_editor<W, G, I, C>(
    editor: &mut MapEditor,
    ctx: &mut EditorContext<'_, W, G>,
    input: &mut I,
    canvas: &mut C,
) -> Result<SessionSummary, DriverError>
where
    W: WorldAccess + ?Sized,
    G: ContentGenerator + ?Sized,
    I: InputSource + ?Sized,
    C: Canvas + ?Sized,
{
    let mut summary = SessionSummary::default();
    loop {
        if let Some(viewport) = canvas.viewport() {
            if viewport != editor.viewport() {
                tracing::debug!(
                    width = viewport.width,
                    height = viewport.height,
                    "viewport resized"
                );
                editor.set_viewport(viewport);
            }
        }
        let frame = editor.render(ctx);
        canvas.present(&frame)?;
        summary.frames += 1;

        let next = input
            .next_input(editor.input_context(), editor.blink_interval())
            .await?;
        match next {
            Some(_) => summary.inputs += 1,
            None => summary.timeouts += 1,
        }
        if editor.handle(ctx, next) == Flow::Exit {
            break;
        }
    }
    tracing::info!(
        frames = summary.frames,
        inputs = summary.inputs,
        "editor session ended"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use sandbox::{MemoryWorld, StampGenerator};
    use world_content::builtin_catalog;
    use world_core::{CellAccess, Direction, EditorConfig, MapBounds, Point3};

    use crate::input::EditCategory;

    /// Replays a fixed list of poll results, recording the contexts asked for.
    struct Script {
        steps: VecDeque<Option<EditorInput>>,
        contexts: Vec<InputContext>,
    }

    impl Script {
        fn new(steps: impl IntoIterator<Item = Option<EditorInput>>) -> Self {
            Self {
                steps: steps.into_iter().collect(),
                contexts: Vec::new(),
            }
        }
    }

    #[async_trait(?Send)]
    impl InputSource for Script {
        async fn next_input(
            &mut self,
            context: InputContext,
            _timeout: Duration,
        ) -> Result<Option<EditorInput>, DriverError> {
            self.contexts.push(context);
            self.steps.pop_front().ok_or(DriverError::InputClosed)
        }
    }

    #[derive(Default)]
    struct Frames {
        titles: Vec<String>,
        size: Option<Size>,
    }

    impl Canvas for Frames {
        fn viewport(&self) -> Option<Size> {
            self.size
        }

        fn present(&mut self, frame: &EditorFrame) -> Result<(), DriverError> {
            self.titles.push(frame.title.clone());
            Ok(())
        }
    }

    fn setup() -> (MemoryWorld, world_core::Catalog) {
        let catalog = builtin_catalog().expect("builtin catalog is valid");
        let world = MemoryWorld::new(MapBounds::new(48, 48, 0, 0), catalog.default_terrain());
        (world, catalog)
    }

    #[tokio::test]
    async fn runs_until_quit() {
        let (mut world, catalog) = setup();
        let mut editor = MapEditor::new(EditorConfig::default(), &world, Point3::new(4, 4, 0), 5);
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);
        let mut script = Script::new([
            Some(EditorInput::Move(Direction::South)),
            None,
            Some(EditorInput::Edit(EditCategory::Traps)),
            Some(EditorInput::Quit),
            Some(EditorInput::Quit),
        ]);
        let mut canvas = Frames {
            size: Some(Size::new(30, 12)),
            ..Frames::default()
        };

        let summary = run_editor(&mut editor, &mut ctx, &mut script, &mut canvas)
            .await
            .expect("script ends with quit");

        assert_eq!(summary, SessionSummary { frames: 5, inputs: 4, timeouts: 1 });
        assert_eq!(editor.viewport(), Size::new(30, 12));
        assert_eq!(editor.target(), Point3::new(4, 5, 0));
        assert_eq!(
            script.contexts,
            [
                InputContext::Looking,
                InputContext::Looking,
                InputContext::Looking,
                InputContext::Menu,
                InputContext::Looking,
            ]
        );
        assert_eq!(canvas.titles.len(), 5);
    }

    #[tokio::test]
    async fn closed_input_is_reported() {
        let (mut world, catalog) = setup();
        let mut editor = MapEditor::new(EditorConfig::default(), &world, Point3::new(4, 4, 0), 5);
        let mut ctx = EditorContext::new(&mut world, &catalog, &StampGenerator);
        let mut script = Script::new([Some(EditorInput::Edit(EditCategory::Terrain))]);
        let mut canvas = Frames::default();

        let err = run_editor(&mut editor, &mut ctx, &mut script, &mut canvas)
            .await
            .expect_err("script runs dry");
        assert!(matches!(err, DriverError::InputClosed));
        assert_eq!(err.error_code(), "DRIVER_INPUT_CLOSED");
        assert_eq!(ctx.world.terrain_at(Point3::new(4, 4, 0)), Some(catalog.default_terrain()));
    }

    #[tokio::test(start_paused = true)]
    async fn channel_input_times_out_then_delivers() {
        let (tx, rx) = mpsc::channel(4);
        let mut source = ChannelInput::new(rx);

        let idle = source
            .next_input(InputContext::Looking, Duration::from_millis(300))
            .await
            .expect("channel open");
        assert_eq!(idle, None);

        tx.send(EditorInput::Confirm).await.expect("receiver alive");
        let next = source
            .next_input(InputContext::Looking, Duration::from_millis(300))
            .await
            .expect("channel open");
        assert_eq!(next, Some(EditorInput::Confirm));

        drop(tx);
        assert!(matches!(
            source.next_input(InputContext::Looking, Duration::from_millis(300)).await,
            Err(DriverError::InputClosed)
        ));
    }
}
