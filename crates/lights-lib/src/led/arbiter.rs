//! Shared-LED arbitration — several logical lights compete for one physical
//! tri-color LED; the first lit slot in priority order drives it.

use crate::state::{FlashMode, LightKind, LightState};

/// Per-channel slots for the lights sharing one LED, in priority order.
#[derive(Debug, Clone)]
pub struct Arbiter {
    slots: Vec<(LightKind, LightState)>,
}

impl Arbiter {
    /// Create an arbiter with one off slot per channel. Earlier channels win.
    /// Duplicate channels keep their first position.
    pub fn new(order: &[LightKind]) -> Self {
        let mut slots: Vec<(LightKind, LightState)> = Vec::with_capacity(order.len());
        for &kind in order {
            if !slots.iter().any(|(k, _)| *k == kind) {
                slots.push((kind, LightState::OFF));
            }
        }
        Arbiter { slots }
    }

    /// Channels in priority order.
    pub fn order(&self) -> impl Iterator<Item = LightKind> + '_ {
        self.slots.iter().map(|(k, _)| *k)
    }

    /// Store a normalized state for `kind`. Returns `false` (and changes
    /// nothing) if `kind` has no slot.
    pub fn update(&mut self, kind: LightKind, state: LightState) -> bool {
        match self.slots.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, slot)) => {
                *slot = normalize(kind, state);
                true
            }
            None => false,
        }
    }

    /// Last stored state for `kind`.
    pub fn slot(&self, kind: LightKind) -> Option<LightState> {
        self.slots
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, s)| *s)
    }

    /// The state currently driving the LED: first lit slot, else the first
    /// slot, else off.
    pub fn select(&self) -> LightState {
        self.selected_slot()
            .map(|(_, s)| s)
            .unwrap_or(LightState::OFF)
    }

    /// Like [`select`](Self::select), also naming the winning channel.
    pub fn selected_slot(&self) -> Option<(LightKind, LightState)> {
        self.slots
            .iter()
            .find(|(_, s)| s.is_lit())
            .or_else(|| self.slots.first())
            .copied()
    }
}

/// Rewrite a request into the form stored for arbitration.
///
/// - A hardware flash with an on time but no off time is a solid light for
///   this LED: stored as [`FlashMode::None`].
/// - Attention set with [`FlashMode::None`] is how callers release it, so its
///   color is dropped and it can no longer win.
pub fn normalize(kind: LightKind, mut state: LightState) -> LightState {
    match state.flash_mode {
        FlashMode::Hardware if state.flash_on_ms > 0 && state.flash_off_ms == 0 => {
            state.flash_mode = FlashMode::None;
        }
        FlashMode::None if kind == LightKind::Attention => {
            state.color = 0;
        }
        _ => {}
    }
    state
}
