use anyhow::{Context, Result};
use ratatui::{backend::Backend, Terminal};

use super::Renderer;
use crate::game::Board;

/// Where the game shows itself: the board plus one line of status text
pub trait Surface {
    /// Make the current board and status visible before returning
    fn present(&mut self, board: &Board, status: &str) -> Result<()>;
}

/// Draws through a ratatui terminal
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    renderer: Renderer,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            renderer: Renderer::new(),
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn present(&mut self, board: &Board, status: &str) -> Result<()> {
        self.terminal
            .draw(|frame| self.renderer.render(frame, board, status))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Counts frames and keeps every distinct status it was shown
    #[derive(Default)]
    pub struct RecordingSurface {
        pub frames: usize,
        pub statuses: Vec<String>,
        /// Boards that were not all background, for effects checks
        pub painted_frames: usize,
    }

    impl RecordingSurface {
        pub fn saw_status(&self, status: &str) -> bool {
            self.statuses.iter().any(|s| s == status)
        }
    }

    impl Surface for RecordingSurface {
        fn present(&mut self, board: &Board, status: &str) -> Result<()> {
            self.frames += 1;
            if !board.is_all_background() {
                self.painted_frames += 1;
            }
            if self.statuses.last().map(String::as_str) != Some(status) {
                self.statuses.push(status.to_string());
            }
            Ok(())
        }
    }
}
