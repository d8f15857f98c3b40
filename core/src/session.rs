use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionState {
    Idle,
    Dragging,
}

impl InteractionState {
    pub const fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging)
    }
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// An item that has been picked up and not yet dropped.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragTransaction {
    pub source: Position,
    pub tier: Tier,
    pub pointer: PointerPosition,
}

/// Input already translated to grid cells and classified by the input layer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InteractionEvent {
    Start {
        position: Position,
        pointer: PointerPosition,
    },
    Move {
        pointer: PointerPosition,
    },
    /// `target` is `None` when the pointer was released outside the grid.
    End {
        target: Option<Position>,
    },
    DoubleActivate {
        position: Position,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InteractionOutcome {
    NoChange,
    PickedUp,
    Moved,
    Returned,
    Merged,
    Converted(CellCount),
    /// Reported once per session, by the event that produced the first terminal tier.
    Won,
}

impl InteractionOutcome {
    pub const fn has_update(self) -> bool {
        use InteractionOutcome::*;
        match self {
            NoChange => false,
            PickedUp | Moved | Returned | Merged | Won => true,
            Converted(count) => count > 0,
        }
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }

    pub const fn name(self) -> &'static str {
        use InteractionOutcome::*;
        match self {
            NoChange => "no_change",
            PickedUp => "picked_up",
            Moved => "moved",
            Returned => "returned",
            Merged => "merged",
            Converted(_) => "converted",
            Won => "won",
        }
    }
}

/// One game: the grid, the drag in progress (if any) and the randomness used by the bucket.
#[derive(Clone, Debug)]
pub struct MergeSession {
    grid: Grid,
    drag: Option<DragTransaction>,
    rng: SmallRng,
}

impl MergeSession {
    pub fn new(config: &GameConfig, rng_seed: u64) -> Result<Self> {
        Ok(Self::with_grid(Grid::from_config(config)?, rng_seed))
    }

    pub fn with_grid(grid: Grid, rng_seed: u64) -> Self {
        Self {
            grid,
            drag: None,
            rng: SmallRng::seed_from_u64(rng_seed),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tier_at(&self, pos: Position) -> Tier {
        self.grid.tier_at(pos)
    }

    pub fn state(&self) -> InteractionState {
        if self.drag.is_some() {
            InteractionState::Dragging
        } else {
            InteractionState::Idle
        }
    }

    pub fn drag(&self) -> Option<&DragTransaction> {
        self.drag.as_ref()
    }

    pub fn has_won(&self) -> bool {
        self.grid.has_won()
    }

    pub fn handle(&mut self, event: InteractionEvent) -> Result<InteractionOutcome> {
        use InteractionEvent::*;
        match event {
            Start { position, pointer } => self.start_drag(position, pointer),
            Move { pointer } => Ok(self.move_pointer(pointer)),
            End { target } => self.end_drag(target),
            DoubleActivate { position } => self.double_activate(position),
        }
    }

    /// Picks up the item at `position`, leaving sand behind until the drop resolves.
    pub fn start_drag(
        &mut self,
        position: Position,
        pointer: PointerPosition,
    ) -> Result<InteractionOutcome> {
        let position = self.grid.validate_position(position)?;

        if self.drag.is_some() {
            return Ok(InteractionOutcome::NoChange);
        }

        let tier = self.grid.tier_at(position);
        if !tier.is_mergeable() {
            log::trace!("{} holds {}, not draggable", position, tier);
            return Ok(InteractionOutcome::NoChange);
        }

        self.grid.set_tier(position, Tier::Sand)?;
        self.drag = Some(DragTransaction {
            source: position,
            tier,
            pointer,
        });
        log::trace!("picked up {} from {}", tier, position);
        Ok(InteractionOutcome::PickedUp)
    }

    pub fn move_pointer(&mut self, pointer: PointerPosition) -> InteractionOutcome {
        match self.drag.as_mut() {
            Some(drag) => {
                drag.pointer = pointer;
                InteractionOutcome::Moved
            }
            None => InteractionOutcome::NoChange,
        }
    }

    /// Drops the carried item, merging into `target` when it holds the same tier, otherwise putting it back.
    pub fn end_drag(&mut self, target: Option<Position>) -> Result<InteractionOutcome> {
        if self.drag.is_none() {
            return Ok(InteractionOutcome::NoChange);
        }
        let target = target
            .map(|pos| self.grid.validate_position(pos))
            .transpose()?;
        let Some(drag) = self.drag.take() else {
            return Ok(InteractionOutcome::NoChange);
        };

        let merged = target
            .filter(|&pos| pos != drag.source && self.grid.tier_at(pos) == drag.tier)
            .and_then(|pos| drag.tier.successor().map(|next| (pos, next)));

        let Some((pos, next)) = merged else {
            self.grid.set_tier(drag.source, drag.tier)?;
            log::trace!("returned {} to {}", drag.tier, drag.source);
            return Ok(InteractionOutcome::Returned);
        };

        self.grid.set_tier(pos, next)?;
        self.grid.set_tier(drag.source, Tier::Sand)?;
        log::debug!("merged {} from {} into {} at {}", drag.tier, drag.source, next, pos);

        Ok(self.check_win(InteractionOutcome::Merged))
    }

    /// Returns the carried item to where it came from.
    pub fn cancel_drag(&mut self) -> Result<InteractionOutcome> {
        self.end_drag(None)
    }

    /// Activating the bucket turns up to [`CONVERSION_COUNT`] random sand cells into rocks.
    pub fn double_activate(&mut self, position: Position) -> Result<InteractionOutcome> {
        let position = self.grid.validate_position(position)?;

        if self.drag.is_some() {
            log::trace!("ignoring double activation at {} during drag", position);
            return Ok(InteractionOutcome::NoChange);
        }
        if self.grid.tier_at(position) != Tier::Bucket {
            return Ok(InteractionOutcome::NoChange);
        }

        let picked = self
            .grid
            .select_random_cells_of_tier(Tier::Sand, CONVERSION_COUNT, &mut self.rng);
        if picked.len() < CONVERSION_COUNT {
            log::warn!(
                "Bucket wanted {} sand cells but only {} available",
                CONVERSION_COUNT,
                picked.len()
            );
        }
        self.grid.convert_to_lowest_tier(&picked)?;
        log::debug!("bucket at {} converted {:?}", position, picked);

        let count = picked.len().try_into().unwrap_or(CellCount::MAX);
        Ok(self.check_win(InteractionOutcome::Converted(count)))
    }

    fn check_win(&mut self, outcome: InteractionOutcome) -> InteractionOutcome {
        if self.grid.latch_win() {
            log::debug!("game won");
            InteractionOutcome::Won
        } else {
            outcome
        }
    }
}
