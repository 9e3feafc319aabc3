//! Frame layout: map on the left, cell info and the active dialog on the
//! right, key help along the bottom.
use editor_core::editor::{EditorFrame, Hint, InfoLine, MenuView, Panel, PaletteView};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use world_core::Size;

use super::theme;
use crate::input::key_label;

/// Width of the info / dialog column.
pub const PANEL_WIDTH: u16 = 38;
const HELP_HEIGHT: u16 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Areas {
    pub map: Rect,
    pub info: Rect,
    pub panel: Rect,
    pub help: Rect,
}

pub fn layout(area: Rect, info_height: u16) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(HELP_HEIGHT)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(PANEL_WIDTH)])
        .split(rows[0]);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(info_height), Constraint::Min(0)])
        .split(columns[1]);
    Areas {
        map: columns[0],
        info: side[0],
        panel: side[1],
        help: rows[1],
    }
}

/// Map cells available inside the bordered map area.
pub fn map_viewport(area: Rect, info_height: u16) -> Size {
    let map = layout(area, info_height).map;
    Size::new(
        i32::from(map.width.saturating_sub(2)).max(1),
        i32::from(map.height.saturating_sub(2)).max(1),
    )
}

pub fn draw(frame: &mut Frame, editor: &EditorFrame, info_height: u16) {
    let areas = layout(frame.area(), info_height);

    let rows: Vec<Line> = editor
        .surface
        .rows()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|glyph| Span::styled(glyph.symbol.to_string(), theme::glyph_style(*glyph)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    let map = Paragraph::new(rows).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", editor.title)),
    );
    frame.render_widget(map, areas.map);

    if let Some(cursor) = editor.cursor {
        if let (Ok(x), Ok(y)) = (u16::try_from(cursor.x), u16::try_from(cursor.y)) {
            frame.set_cursor_position(Position::new(areas.map.x + 1 + x, areas.map.y + 1 + y));
        }
    }

    let info = Paragraph::new(info_lines(&editor.info))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Cell "));
    frame.render_widget(info, areas.info);

    match &editor.panel {
        Some(Panel::Menu(menu)) => render_menu(frame, areas.panel, menu),
        Some(Panel::Palette(palette)) => render_palette(frame, areas.panel, palette),
        None => frame.render_widget(Block::default().borders(Borders::ALL), areas.panel),
    }

    frame.render_widget(help(&editor.hints, editor.message.as_deref()), areas.help);
}

fn info_lines(lines: &[InfoLine]) -> Vec<Line<'_>> {
    lines
        .iter()
        .map(|line| Line::styled(line.text.as_str(), theme::text_style(line.tint)))
        .collect()
}

fn render_menu(frame: &mut Frame, area: Rect, menu: &MenuView) {
    let visible = usize::from(area.height.saturating_sub(2))
        .saturating_sub(menu.footer.len())
        .max(1);
    let offset = menu.selected.saturating_sub(visible - 1);

    let mut lines: Vec<Line> = menu
        .entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, entry)| {
            let style = theme::text_style(entry.tint);
            let style = if index == menu.selected {
                theme::selected(style)
            } else {
                style
            };
            Line::styled(entry.label.as_str(), style)
        })
        .collect();
    lines.extend(info_lines(&menu.footer));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", menu.title));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_palette(frame: &mut Frame, area: Rect, palette: &PaletteView) {
    let columns = palette.columns.max(1);
    let mut lines: Vec<Line> = palette
        .glyphs
        .chunks(columns)
        .enumerate()
        .map(|(row, glyphs)| {
            Line::from(
                glyphs
                    .iter()
                    .enumerate()
                    .map(|(column, glyph)| {
                        let style = theme::glyph_style(*glyph);
                        let style = if row * columns + column == palette.cursor {
                            theme::selected(style)
                        } else {
                            style
                        };
                        Span::styled(glyph.symbol.to_string(), style)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    lines.push(Line::raw(""));
    lines.extend(palette.caption.iter().map(|text| Line::raw(text.as_str())));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", palette.title));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn help<'a>(hints: &[Hint], message: Option<&'a str>) -> Paragraph<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for hint in hints {
        spans.push(Span::styled(key_label(hint.input), theme::key_style()));
        spans.push(Span::raw(format!(" {}  ", hint.label)));
    }
    let mut lines = vec![Line::from(spans)];
    if let Some(message) = message {
        lines.push(Line::styled(message, Style::default()));
    }
    Paragraph::new(lines).block(Block::default().borders(Borders::TOP))
}

#[cfg(test)]
mod tests {
    use super::*;
    use editor_core::editor::MenuEntry;
    use editor_core::overlay::Surface;
    use editor_core::EditorInput;
    use ratatui::{Terminal, backend::TestBackend};
    use world_core::{Glyph, Point2, Tint};

    fn sample_frame() -> EditorFrame {
        let mut surface = Surface::new(Size::new(10, 5));
        surface.set(Point2::new(2, 1), Glyph::new('@', Tint::Yellow));
        EditorFrame {
            title: "Map editor".to_owned(),
            surface,
            cursor: Some(Point2::new(2, 1)),
            info: vec![InfoLine::plain("grass")],
            panel: Some(Panel::Menu(MenuView {
                title: "Traps".to_owned(),
                entries: vec![MenuEntry::new("-clear-"), MenuEntry::new("bear trap")],
                selected: 1,
                footer: Vec::new(),
            })),
            hints: vec![Hint::new(EditorInput::Quit, "quit")],
            message: Some("painted 3 cells".to_owned()),
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn viewport_leaves_room_for_panel_and_help() {
        let size = map_viewport(Rect::new(0, 0, 100, 40), 14);
        assert_eq!(size, Size::new(100 - i32::from(PANEL_WIDTH) - 2, 40 - 3 - 2));
    }

    #[test]
    fn draws_map_menu_and_help() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("test backend");
        let frame = sample_frame();
        terminal
            .draw(|f| draw(f, &frame, 8))
            .expect("draw succeeds");

        let text = buffer_text(&terminal);
        assert!(text.contains("Map editor"));
        assert!(text.contains('@'));
        assert!(text.contains("bear trap"));
        assert!(text.contains("esc quit"));
        assert!(text.contains("painted 3 cells"));
    }
}
