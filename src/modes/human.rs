use anyhow::{Context, Result};
use crossterm::{
    event::{
        Event, EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use futures::{future, Stream, StreamExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::Arc;

use crate::game::{Direction, GameConfig};
use crate::game_loop::GameLoop;
use crate::input::{pump, Controls, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::TerminalSurface;

type TerminalGame = GameLoop<TerminalSurface<CrosstermBackend<Stdout>>>;

/// Plays in the terminal until the player quits
pub struct HumanMode {
    config: GameConfig,
    /// Terminal reports key releases, so boost can be held
    enhanced_keyboard: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            enhanced_keyboard: false,
        }
    }

    /// Returns the session metrics once the terminal is restored
    pub async fn run(&mut self) -> Result<GameMetrics> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        self.enhanced_keyboard = supports_keyboard_enhancement().unwrap_or(false);
        if self.enhanced_keyboard {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("Failed to enable key release events")?;
        } else {
            log::info!("Terminal does not report key releases, Space toggles boost");
        }

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let difficulty = self.config.starting_difficulty();
        let controls = Arc::new(Controls::new(Direction::Up, difficulty.tick_interval()));
        let mut game = GameLoop::new(
            self.config.clone(),
            Arc::clone(&controls),
            TerminalSurface::new(terminal),
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut game, &controls).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut game)?;

        let mut metrics = std::mem::take(game.metrics_mut());
        metrics.update();
        result.map(|()| metrics)
    }

    async fn run_game_loop(&self, game: &mut TerminalGame, controls: &Controls) -> Result<()> {
        let handler = InputHandler::new(self.enhanced_keyboard);
        let game_input = key_actions(EventStream::new(), handler)
            .take_while(|action| future::ready(*action != KeyAction::Quit))
            .filter_map(|action| {
                future::ready(match action {
                    KeyAction::Game(event) => Some(event),
                    _ => None,
                })
            });

        tokio::select! {
            result = game.run() => result,

            // Input ends on a quit key
            _ = pump(game_input, controls) => Ok(()),

            // Handle Ctrl+C
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    }

    fn cleanup_terminal(&self, game: &mut TerminalGame) -> Result<()> {
        let terminal = game.surface_mut().terminal_mut();
        disable_raw_mode().context("Failed to disable raw mode")?;
        if self.enhanced_keyboard {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
                .context("Failed to restore keyboard mode")?;
        }
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Key presses translated by `handler`; other terminal events are dropped
fn key_actions<S>(events: S, handler: InputHandler) -> impl Stream<Item = KeyAction>
where
    S: Stream<Item = std::io::Result<Event>>,
{
    events.filter_map(move |event| {
        let action = match event {
            Ok(Event::Key(key)) => Some(handler.handle_key_event(key)),
            Ok(_) => None,
            Err(err) => {
                log::warn!("Failed to read terminal event: {err}");
                None
            }
        };
        future::ready(action)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::InputEvent;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> std::io::Result<Event> {
        Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[tokio::test]
    async fn test_key_actions_translate_and_skip() {
        let events = futures::stream::iter(vec![
            key(KeyCode::Left),
            Ok(Event::FocusGained),
            Err(std::io::Error::other("broken pipe")),
            key(KeyCode::Char(' ')),
            key(KeyCode::Char('q')),
        ]);

        let actions: Vec<_> = key_actions(events, InputHandler::default()).collect().await;

        assert_eq!(
            actions,
            vec![
                KeyAction::Game(InputEvent::DirectionChange(Direction::Left)),
                KeyAction::Game(InputEvent::BoostToggled),
                KeyAction::Quit,
            ]
        );
    }

    #[test]
    fn test_mode_initialization() {
        let mode = HumanMode::new(GameConfig::default());
        assert!(!mode.enhanced_keyboard);
        assert!(!mode.config.levels);
    }
}
