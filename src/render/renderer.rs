use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Board, CellColor};

/// Two board rows share one terminal line: the glyph's foreground is the
/// upper cell, its background the lower one.
const HALF_BLOCK: &str = "▀";

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, board: &Board, status: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_status(status), chunks[0]);

        let size = board.size() as u16;
        let grid_width = size + 2;
        let grid_height = size.div_ceil(2) + 2;

        if chunks[1].width < grid_width || chunks[1].height < grid_height {
            frame.render_widget(self.render_too_small(grid_width, grid_height), chunks[1]);
        } else {
            let area = centered(chunks[1], grid_width, grid_height);
            frame.render_widget(self.render_grid(board), area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, board: &Board) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for top in (0..board.size()).step_by(2) {
            let upper = board.row(top);
            let lower = (top + 1 < board.size()).then(|| board.row(top + 1));

            let spans: Vec<Span> = upper
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let below = lower.map_or(CellColor::Background, |row| row[col]);
                    Span::styled(
                        HALF_BLOCK,
                        Style::default().fg(cell_color(*cell)).bg(cell_color(below)),
                    )
                })
                .collect();

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
    }

    fn render_status<'a>(&self, status: &'a str) -> Paragraph<'a> {
        let text = vec![Line::from(Span::styled(
            status,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Snake "),
        )
    }

    fn render_too_small(&self, width: u16, height: u16) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("need {width}x{height} for the board")),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(" to boost | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    cell
}

pub fn cell_color(cell: CellColor) -> Color {
    match cell {
        CellColor::Background => Color::Black,
        CellColor::Snake => Color::Green,
        CellColor::Food => Color::Red,
        CellColor::Victory => Color::LightGreen,
        CellColor::Defeat => Color::LightRed,
        CellColor::Spark { hue } => {
            let (r, g, b) = hsb_to_rgb(hue, 0.9, 1.0);
            Color::Rgb(r, g, b)
        }
    }
}

/// Hue in degrees, saturation and brightness in `0.0..=1.0`
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0) / 60.0;
    let chroma = brightness * saturation;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = brightness - chroma;
    let to_byte = |v: f32| ((v + m) * 255.0).round() as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsb_primaries() {
        assert_eq!(hsb_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsb_to_rgb(120.0, 1.0, 1.0), (0, 255, 0));
        assert_eq!(hsb_to_rgb(240.0, 1.0, 1.0), (0, 0, 255));
        assert_eq!(hsb_to_rgb(60.0, 0.0, 1.0), (255, 255, 255));
    }

    #[test]
    fn test_spark_is_saturated() {
        match cell_color(CellColor::Spark { hue: 200.0 }) {
            Color::Rgb(r, g, b) => {
                assert_eq!(r.min(g).min(b), 26);
                assert_eq!(r.max(g).max(b), 255);
            }
            other => panic!("unexpected color {other:?}"),
        }
    }

    #[test]
    fn test_background_is_black() {
        assert_eq!(cell_color(CellColor::Background), Color::Black);
    }
}
