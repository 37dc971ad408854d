//! Win/lose animation: head-to-tail chase, tail fade, explosion.

use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;

use super::{GameLoop, LifeOutcome};
use crate::game::{
    effects::{
        chase_delay, explosion_clears, explosion_frame_delay, random_spark, square_outline,
        CHASE_WIDTH,
    },
    CellColor, Position,
};
use crate::render::Surface;

impl<S: Surface> GameLoop<S> {
    /// Runs to completion; the board is all background afterwards
    pub(super) async fn end_sequence(&mut self, outcome: LifeOutcome) -> Result<()> {
        if let Some(food) = self.state.food.take() {
            self.state.board.paint_clipped(&[food], CellColor::Background);
        }

        let win = outcome.is_win();
        let status = match (win, self.state.levels) {
            (true, true) => "Level up!",
            (true, false) => "You win!",
            (false, _) => "You lose!",
        };
        self.set_status(status.to_string())?;

        self.chase(if win { CellColor::Victory } else { CellColor::Defeat })
            .await?;
        self.fade_tail().await?;
        self.explode(self.state.snake.tail()).await
    }

    /// A short highlight runs from head to tail, fast at first
    async fn chase(&mut self, color: CellColor) -> Result<()> {
        let segments = self.state.snake.segments().to_vec();
        let len = segments.len();

        for (i, segment) in segments.iter().enumerate() {
            self.state.board.paint_clipped(&[*segment], color);
            if i >= CHASE_WIDTH {
                self.state
                    .board
                    .paint_clipped(&[segments[i - CHASE_WIDTH]], CellColor::Background);
            }
            self.present()?;
            sleep(chase_delay(self.config.chase_base_ms, i, len)).await;
        }
        Ok(())
    }

    async fn fade_tail(&mut self) -> Result<()> {
        let segments = self.state.snake.segments().to_vec();
        let delay = Duration::from_millis(self.config.tail_fade_ms);

        for segment in &segments[segments.len().saturating_sub(CHASE_WIDTH)..] {
            sleep(delay).await;
            self.state
                .board
                .paint_clipped(&[*segment], CellColor::Background);
            self.present()?;
        }
        Ok(())
    }

    /// Expanding squares around `center` until nothing is left on the board
    async fn explode(&mut self, center: Position) -> Result<()> {
        let delay = explosion_frame_delay(self.config.explosion_budget_ms, self.state.board_size());

        self.draw_square(center, 3);
        self.present()?;

        let mut side = 5;
        while !self.state.board.is_all_background() {
            if explosion_clears(side) {
                self.state.board.clear();
            }
            self.draw_square(center, side);
            self.present()?;
            sleep(delay).await;
            side += 2;
        }
        Ok(())
    }

    fn draw_square(&mut self, center: Position, side: usize) {
        for point in square_outline(center, side) {
            let spark = random_spark(&mut self.rng);
            self.state.board.paint_clipped(&[point], spark);
        }
    }
}
