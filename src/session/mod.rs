// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Editing session.
//!
//! This module provides:
//! - A playback clock abstraction for the media player being charted
//! - Cursor handling (follow playback, wheel scroll, background drag, seek)
//! - Metronome polling once per frame
//! - Dispatch of view gestures and keyboard actions to the chart builder

pub mod clock;
pub mod intent;

pub use clock::{ManualClock, PlaybackClock};
pub use intent::{ControllerEvent, EventLaneEvent, PutMode, SequencerEvent};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::debug;

use crate::config::{EditorConfig, SongResource};
use crate::control::{ControlAction, KeyboardController};
use crate::editor::{Edit, EditError, ScoreBuilder};
use crate::export;
use crate::score::{NoteType, Score, StageType, Tick};
use crate::timing::Metronome;

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// A metronome beat should sound this frame
    pub beat: bool,
    /// Playback reached the end of the window and was paused
    pub reached_end: bool,
}

/// An open chart together with the player it is charted against
pub struct EditorSession<C: PlaybackClock> {
    builder: ScoreBuilder,
    clock: C,
    metronome: Metronome,
    keyboard: KeyboardController,
    /// Play a sound on each beat
    play_metronome: bool,
    /// Cursor position in seconds from the start of the window
    elapsed_sec: f64,
    /// Type given to newly added notes
    note_type: NoteType,
    /// Pending put gesture on the event lane
    put_mode: Option<PutMode>,
}

impl<C: PlaybackClock> EditorSession<C> {
    /// Open a session on a chart
    pub fn new(builder: ScoreBuilder, clock: C) -> Self {
        let metronome = Self::metronome_for(builder.score(), &clock);
        Self {
            builder,
            clock,
            metronome,
            keyboard: KeyboardController::with_defaults(),
            play_metronome: true,
            elapsed_sec: 0.0,
            note_type: NoteType::default(),
            put_mode: None,
        }
    }

    /// Open a session on an empty chart using the editor settings
    pub fn from_config(resource: &SongResource, config: &EditorConfig, clock: C) -> Self {
        let mut session = Self::new(ScoreBuilder::from_config(resource, config), clock);
        session.play_metronome = config.metronome;
        session
    }

    fn metronome_for(score: &Score, clock: &C) -> Metronome {
        let mut metronome = Metronome::new(score.info.bpm, score.info.start_at_ms);
        metronome.set_current(clock.current_time() * 1000.0);
        metronome
    }

    /// Get the chart builder
    pub fn builder(&self) -> &ScoreBuilder {
        &self.builder
    }

    /// Get the chart
    pub fn score(&self) -> &Score {
        self.builder.score()
    }

    /// Get the playback clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get the playback clock mutably
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Get the metronome
    pub fn metronome(&self) -> &Metronome {
        &self.metronome
    }

    /// Get the keyboard bindings
    pub fn keyboard(&self) -> &KeyboardController {
        &self.keyboard
    }

    /// Get the keyboard bindings mutably
    pub fn keyboard_mut(&mut self) -> &mut KeyboardController {
        &mut self.keyboard
    }

    /// Check if the metronome sound is on
    pub fn metronome_enabled(&self) -> bool {
        self.play_metronome
    }

    /// Turn the metronome sound on or off
    pub fn set_metronome_enabled(&mut self, enabled: bool) {
        self.play_metronome = enabled;
    }

    /// Type given to newly added notes
    pub fn note_type(&self) -> NoteType {
        self.note_type
    }

    /// Select the type for newly added notes
    pub fn select_note_type(&mut self, note_type: NoteType) {
        self.note_type = note_type;
    }

    /// Pending put gesture, if any
    pub fn put_mode(&self) -> Option<PutMode> {
        self.put_mode
    }

    // ---------------------------------------------------------------
    // Time
    // ---------------------------------------------------------------

    /// Check if the player is ready and running
    pub fn is_playing(&self) -> bool {
        self.clock.is_ready() && self.clock.is_playing()
    }

    /// Cursor position in seconds from the start of the window
    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed_sec
    }

    /// Length of the editable window in seconds
    pub fn duration_sec(&self) -> f64 {
        self.score().info.duration_sec()
    }

    /// Tick under the cursor, snapped down to the editing grid
    pub fn current_tick(&self) -> Tick {
        let converter = self.score().converter();
        let quantum = converter.length_quantum().max(1);
        let tick = converter.tick_by_duration(self.elapsed_sec).round() as Tick;
        tick - tick % quantum
    }

    fn start_sec(&self) -> f64 {
        self.score().info.start_at_ms / 1000.0
    }

    fn clock_elapsed_sec(&self) -> f64 {
        (self.clock.current_time() - self.start_sec()).max(0.0)
    }

    /// Per-frame update
    pub fn update(&mut self) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();

        // Playback wins over the manual cursor
        if self.is_playing() {
            self.elapsed_sec = self.clock_elapsed_sec();
        } else {
            return outcome;
        }

        let now_ms = self.clock.current_time() * 1000.0;
        if self.score().info.end_at_ms <= now_ms {
            self.clock.pause();
            self.elapsed_sec = self.clock_elapsed_sec();
            outcome.reached_end = true;
            debug!(now_ms, "reached end of window");
        }

        if self.metronome.tick(now_ms) && self.play_metronome {
            outcome.beat = true;
        }

        outcome
    }

    /// Move the cursor by whole beats. Positive steps move later.
    pub fn scroll(&mut self, steps: i32) {
        let converter = self.score().converter();
        let beat_sec = converter.duration_by_tick(converter.resolution() as f64);
        self.move_cursor(self.elapsed_sec + steps as f64 * beat_sec);
    }

    /// Drag the cursor by whole grid cells from where the drag started
    pub fn drag(&mut self, elapsed_at_drag_start: f64, cells: i32) {
        let converter = self.score().converter();
        let cell_sec = converter.duration_by_tick(converter.length_quantum() as f64);
        self.move_cursor(elapsed_at_drag_start + cells as f64 * cell_sec);
    }

    fn move_cursor(&mut self, elapsed_sec: f64) {
        self.elapsed_sec = elapsed_sec.clamp(0.0, self.duration_sec());

        // Keep the player in step while it is not driving the cursor
        if !self.is_playing() {
            let media_sec = self.start_sec() + self.elapsed_sec;
            self.clock.seek_to(media_sec);
            self.metronome.set_current(media_sec * 1000.0);
        }
    }

    /// Pause and jump to a position in the window
    pub fn seek(&mut self, elapsed_sec: f64) {
        self.clock.pause();
        self.move_cursor(elapsed_sec);
    }

    /// Start playback
    pub fn play(&mut self) {
        self.clock.play();
    }

    /// Pause playback, leaving the cursor where playback stopped
    pub fn pause(&mut self) {
        self.clock.pause();
        if self.clock.is_ready() {
            self.elapsed_sec = self.clock_elapsed_sec();
        }
    }

    /// Toggle play/pause
    pub fn toggle_play(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Pause and rewind to the start of the window
    pub fn stop(&mut self) {
        let start_at_ms = self.score().info.start_at_ms;
        self.clock.seek_to(start_at_ms / 1000.0);
        self.clock.pause();
        self.metronome.set_current(start_at_ms);
        self.elapsed_sec = 0.0;
    }

    // ---------------------------------------------------------------
    // Chart info
    // ---------------------------------------------------------------

    /// Switch to another song, keeping the chart's entries
    pub fn change_song(&mut self, resource: &SongResource) {
        self.builder.change_song(resource);
        self.put_mode = None;
        self.stop();
        self.metronome = Self::metronome_for(self.builder.score(), &self.clock);
    }

    /// Switch stage
    pub fn set_stage(&mut self, stage: StageType) {
        self.builder.set_stage(stage);
    }

    /// Set the difficulty level
    pub fn set_level(&mut self, level: u8) {
        self.builder.set_level(level);
    }

    // ---------------------------------------------------------------
    // Gestures
    // ---------------------------------------------------------------

    fn apply(&mut self, edit: Edit) -> Result<(), EditError> {
        let result = self.builder.apply(edit);
        if let Err(ref err) = result {
            debug!(?edit, error = %err, "edit rejected");
        }
        result
    }

    /// Handle a gesture on the note grid
    pub fn on_sequencer_event(
        &mut self,
        event: SequencerEvent,
        tick: Tick,
    ) -> Result<(), EditError> {
        self.apply(event.to_edit(tick, self.note_type))
    }

    /// Handle a gesture on the event lane
    pub fn on_event_lane_event(
        &mut self,
        event: EventLaneEvent,
        tick: Tick,
        value: Option<i64>,
    ) -> Result<(), EditError> {
        self.apply(event.to_edit(tick, value))
    }

    /// Handle a command from the control panel
    pub fn on_controller_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::PutSectionMode => self.put_mode = Some(PutMode::Section),
            ControllerEvent::PutAppealMode => self.put_mode = Some(PutMode::Appeal),
            ControllerEvent::PutFeverMode => self.put_mode = Some(PutMode::Fever),
            ControllerEvent::NormalizeNotes => {
                self.builder.normalize_notes();
            }
            ControllerEvent::ClearAllNotes => self.builder.clear_all_notes(),
        }
    }

    /// Place the pending put mode's event at `tick`.
    ///
    /// Returns false when no put mode is pending. A successful put ends the mode.
    pub fn put(&mut self, tick: Tick) -> Result<bool, EditError> {
        let Some(mode) = self.put_mode else {
            return Ok(false);
        };
        self.apply(mode.edit_at(tick))?;
        self.put_mode = None;
        Ok(true)
    }

    // ---------------------------------------------------------------
    // Keyboard
    // ---------------------------------------------------------------

    /// Carry out a control action
    pub fn handle_action(&mut self, action: &ControlAction) -> Result<()> {
        match action {
            ControlAction::TogglePlay => self.toggle_play(),
            ControlAction::Stop => self.stop(),
            ControlAction::ToggleMetronome => self.play_metronome = !self.play_metronome,
            ControlAction::ScrollBeats(steps) => self.scroll(*steps),
            ControlAction::SelectNote(note_type) => self.note_type = *note_type,
            ControlAction::SetPutMode(mode) => self.put_mode = Some(*mode),
            ControlAction::NormalizeNotes => {
                self.on_controller_event(ControllerEvent::NormalizeNotes)
            }
            ControlAction::ClearAllNotes => {
                self.on_controller_event(ControllerEvent::ClearAllNotes)
            }
            ControlAction::Dump => export::dump(self.score())?,
        }
        Ok(())
    }

    /// Handle a key press. Returns true if the key was bound.
    pub fn on_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
        match self.keyboard.get_action(code, modifiers) {
            Some(action) => {
                self.handle_action(&action)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Close the session and take the chart
    pub fn into_score(self) -> Score {
        self.builder.into_score()
    }
}
