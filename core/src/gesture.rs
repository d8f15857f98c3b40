use serde::{Deserialize, Serialize};

use crate::*;

/// Two presses on the same cell closer together than this count as a double activation.
pub const DOUBLE_ACTIVATION_MS: u64 = 300;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    Single,
    Double,
}

impl Gesture {
    pub const fn into_event(self, position: Position, pointer: PointerPosition) -> InteractionEvent {
        match self {
            Self::Single => InteractionEvent::Start { position, pointer },
            Self::Double => InteractionEvent::DoubleActivate { position },
        }
    }
}

/// Classifies raw presses into single presses and double activations using timestamps supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GestureClassifier {
    threshold_ms: u64,
    last_press: Option<(u64, Position)>,
}

impl GestureClassifier {
    pub const fn new(threshold_ms: u64) -> Self {
        Self {
            threshold_ms,
            last_press: None,
        }
    }

    pub const fn threshold_ms(&self) -> u64 {
        self.threshold_ms
    }

    pub fn press(&mut self, now_ms: u64, position: Position) -> Gesture {
        let quick_repeat = match self.last_press {
            Some((at, last_position)) => {
                last_position == position
                    && now_ms >= at
                    && now_ms - at < self.threshold_ms
            }
            None => false,
        };

        if quick_repeat {
            // a double consumes both presses
            self.last_press = None;
            Gesture::Double
        } else {
            self.last_press = Some((now_ms, position));
            Gesture::Single
        }
    }

    pub fn reset(&mut self) {
        self.last_press = None;
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(DOUBLE_ACTIVATION_MS)
    }
}
