use sandmerge_core as game;
use game::{
    GameConfig, GestureClassifier, InteractionEvent, InteractionOutcome, MergeSession,
    PointerPosition, Position,
};
use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::Args;
use crate::utils::*;

/// Game session handed to the JavaScript renderer.
///
/// Coordinates passed in are grid cells already computed by the page; the pointer `x`/`y` pair is only stored so
/// the renderer can draw the floating item.
#[wasm_bindgen]
pub struct MergeGame {
    session: MergeSession,
    gestures: GestureClassifier,
    epoch: Instant,
}

#[wasm_bindgen]
impl MergeGame {
    /// Builds a game from a JSON [`GameConfig`], or the beach layout when none is given.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<MergeGame, JsError> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json)?,
            None => GameConfig::reference(),
        };
        let args = Args::from_page();
        let seed = args.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        Ok(Self::from_parts(&config, seed, args.threshold_ms)?)
    }

    pub fn rows(&self) -> u8 {
        self.session.grid().rows()
    }

    pub fn cols(&self) -> u8 {
        self.session.grid().cols()
    }

    /// Tier name at a cell, `undefined` off the board.
    pub fn tier_at(&self, row: i32, col: i32) -> Option<String> {
        let pos = self.position(row, col)?;
        Some(self.session.tier_at(pos).name().to_string())
    }

    /// Every tier name in row-major order, for drawing a whole frame at once.
    pub fn tiers(&self) -> Vec<String> {
        self.session
            .grid()
            .iter()
            .map(|(_, tier)| tier.name().to_string())
            .collect()
    }

    pub fn cell_id(&self, row: i32, col: i32) -> Option<String> {
        self.position(row, col).map(|pos| pos.to_string())
    }

    /// Press on a cell, either starting a drag or, when it repeats a recent press, activating the cell.
    pub fn pointer_down(&mut self, row: i32, col: i32, x: f32, y: f32) -> String {
        let now_ms = u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.press_at(now_ms, row, col, PointerPosition::new(x, y))
            .name()
            .to_string()
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.apply(InteractionEvent::Move {
            pointer: PointerPosition::new(x, y),
        })
        .has_update()
    }

    /// Release; coordinates off the board return the carried item. Yields `"won"` exactly once per game.
    pub fn pointer_up(&mut self, row: i32, col: i32) -> String {
        let target = self.position(row, col);
        self.apply(InteractionEvent::End { target }).name().to_string()
    }

    /// For when the page loses the pointer mid-drag.
    pub fn cancel(&mut self) -> String {
        self.gestures.reset();
        self.apply(InteractionEvent::End { target: None })
            .name()
            .to_string()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.state().is_dragging()
    }

    pub fn dragged_tier(&self) -> Option<String> {
        self.session.drag().map(|drag| drag.tier.name().to_string())
    }

    pub fn drag_x(&self) -> Option<f32> {
        self.session.drag().map(|drag| drag.pointer.x)
    }

    pub fn drag_y(&self) -> Option<f32> {
        self.session.drag().map(|drag| drag.pointer.y)
    }

    pub fn has_won(&self) -> bool {
        self.session.has_won()
    }
}

impl MergeGame {
    fn from_parts(config: &GameConfig, seed: u64, threshold_ms: u64) -> game::Result<Self> {
        Ok(Self {
            session: MergeSession::new(config, seed)?,
            gestures: GestureClassifier::new(threshold_ms),
            epoch: Instant::now(),
        })
    }

    fn position(&self, row: i32, col: i32) -> Option<Position> {
        to_position(row, col, self.session.grid().size())
    }

    fn press_at(
        &mut self,
        now_ms: u64,
        row: i32,
        col: i32,
        pointer: PointerPosition,
    ) -> InteractionOutcome {
        let Some(pos) = self.position(row, col) else {
            return InteractionOutcome::NoChange;
        };
        let gesture = self.gestures.press(now_ms, pos);
        log::trace!("{} press {:?}", pos, gesture);
        self.apply(gesture.into_event(pos, pointer))
    }

    fn apply(&mut self, event: InteractionEvent) -> InteractionOutcome {
        self.session.handle(event).unwrap_or_else(|err| {
            log::error!("Rejected {:?}: {}", event, err);
            InteractionOutcome::NoChange
        })
    }
}
