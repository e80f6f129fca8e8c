//! Test utilities and recording hosts for chip development.
//!
//! Provides [`RecordingHost`], a [`CircuitHost`] that keeps every
//! callback it receives, and a few standard circuit layouts in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use chip_core::{
    ActorId, CircuitHost, ComponentPos, ComponentState, SoundCategory, SoundEvent, UpdateFlags,
};

/// One `on_component_changed` callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerEvent {
    pub pos: ComponentPos,
    pub old: ComponentState,
    pub new: ComponentState,
    pub flags: UpdateFlags,
}

/// One `play_sound` callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundRecord {
    pub except: Option<ActorId>,
    pub sound: SoundEvent,
    pub category: SoundCategory,
    pub volume: f32,
    pub pitch: f32,
}

/// A host that records every callback in arrival order.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<ListenerEvent>,
    pub sounds: Vec<SoundRecord>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
        self.sounds.clear();
    }

    /// Listener events for `pos`, oldest first.
    pub fn events_at(&self, pos: ComponentPos) -> Vec<ListenerEvent> {
        self.events.iter().filter(|e| e.pos == pos).copied().collect()
    }

    /// The most recent state reported for `pos`.
    pub fn last_state_at(&self, pos: ComponentPos) -> Option<ComponentState> {
        self.events.iter().rev().find(|e| e.pos == pos).map(|e| e.new)
    }
}

impl CircuitHost for RecordingHost {
    fn on_component_changed(
        &mut self,
        pos: ComponentPos,
        old: ComponentState,
        new: ComponentState,
        flags: UpdateFlags,
    ) {
        self.events.push(ListenerEvent {
            pos,
            old,
            new,
            flags,
        });
    }

    fn play_sound(
        &mut self,
        except: Option<ActorId>,
        sound: SoundEvent,
        category: SoundCategory,
        volume: f32,
        pitch: f32,
    ) {
        self.sounds.push(SoundRecord {
            except,
            sound,
            category,
            volume,
            pitch,
        });
    }
}
