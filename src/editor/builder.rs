// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chart builder.
//!
//! Every edit first works out the candidate entry, checks it against the
//! chart, and only then writes it. An entry being resized or moved is
//! excluded from the conflict scan instead of being taken out and put back.

use tracing::{debug, info};

use super::error::EditError;
use super::limits::Limits;
use super::validate::{validate, ValidationReport};
use super::{event_ranges, fixed_length};
use crate::config::{EditorConfig, SongResource};
use crate::score::{
    Appeal, EventKind, Fever, LaneType, Note, NoteType, Score, Section, StageType, Tick, TickRange,
};
use crate::timing::TickConverter;

/// Lowest and highest difficulty level
const LEVEL_RANGE: (u8, u8) = (1, 5);

/// Fixed-duration event kept in its own list
trait FixedEvent: Copy {
    const KIND: EventKind;

    fn at(tick: Tick) -> Self;
    fn tick(&self) -> Tick;
    fn set_tick(&mut self, tick: Tick);
    fn list(score: &Score) -> &Vec<Self>;
    fn list_mut(score: &mut Score) -> &mut Vec<Self>;
    fn max(limits: &Limits) -> usize;
    fn duration_sec(limits: &Limits) -> f64;
}

impl FixedEvent for Appeal {
    const KIND: EventKind = EventKind::Appeal;

    fn at(tick: Tick) -> Self {
        Appeal { tick }
    }
    fn tick(&self) -> Tick {
        self.tick
    }
    fn set_tick(&mut self, tick: Tick) {
        self.tick = tick;
    }
    fn list(score: &Score) -> &Vec<Self> {
        &score.appeals
    }
    fn list_mut(score: &mut Score) -> &mut Vec<Self> {
        &mut score.appeals
    }
    fn max(limits: &Limits) -> usize {
        limits.appeal_max
    }
    fn duration_sec(limits: &Limits) -> f64 {
        limits.appeal_duration_sec
    }
}

impl FixedEvent for Fever {
    const KIND: EventKind = EventKind::Fever;

    fn at(tick: Tick) -> Self {
        Fever { tick }
    }
    fn tick(&self) -> Tick {
        self.tick
    }
    fn set_tick(&mut self, tick: Tick) {
        self.tick = tick;
    }
    fn list(score: &Score) -> &Vec<Self> {
        &score.fevers
    }
    fn list_mut(score: &mut Score) -> &mut Vec<Self> {
        &mut score.fevers
    }
    fn max(limits: &Limits) -> usize {
        limits.fever_max
    }
    fn duration_sec(limits: &Limits) -> f64 {
        limits.fever_duration_sec
    }
}

/// Insert keeping the list ordered by tick
fn insert_sorted<T>(list: &mut Vec<T>, item: T, tick: impl Fn(&T) -> Tick) {
    let key = tick(&item);
    let pos = list
        .iter()
        .position(|existing| tick(existing) > key)
        .unwrap_or(list.len());

    list.insert(pos, item);
}

/// Range of `length` ticks from `tick`, rejected when the end passes `Tick::MAX`
fn span(tick: Tick, length: Tick) -> Result<TickRange, EditError> {
    tick.checked_add(length)
        .map(|to| TickRange::new(tick, to))
        .ok_or(EditError::OutOfBounds { from: tick as i64, to: tick as i64 + length as i64 })
}

/// Owns a chart and applies edits to it
#[derive(Debug, Clone)]
pub struct ScoreBuilder {
    score: Score,
    limits: Limits,
}

impl ScoreBuilder {
    /// Create a builder with an empty chart for a song
    pub fn new(resource: &SongResource) -> Self {
        Self::with_limits(Score::new(resource), Limits::default())
    }

    /// Create a builder for an empty chart using editor settings
    pub fn from_config(resource: &SongResource, config: &EditorConfig) -> Self {
        Self::with_limits(
            Score::with_resolution(resource, config.resolution),
            config.limits.clone(),
        )
    }

    /// Wrap an existing chart
    pub fn with_limits(score: Score, limits: Limits) -> Self {
        Self { score, limits }
    }

    /// Read-only view of the chart
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Limits in force
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Take the chart out of the builder
    pub fn into_score(self) -> Score {
        self.score
    }

    fn converter(&self) -> TickConverter {
        self.score.converter()
    }

    fn quantum(&self) -> Tick {
        self.converter().length_quantum()
    }

    /// Length of an appeal window in ticks
    pub fn appeal_length(&self) -> Tick {
        fixed_length(&self.score, self.limits.appeal_duration_sec)
    }

    /// Length of a fever window in ticks
    pub fn fever_length(&self) -> Tick {
        fixed_length(&self.score, self.limits.fever_duration_sec)
    }

    /// Length of a newly placed section in ticks
    pub fn default_section_length(&self) -> Tick {
        self.converter().ticks_per_bars(self.limits.default_section_bars)
    }

    fn min_section_length(&self) -> Tick {
        self.converter().ticks_per_bars(self.limits.min_section_bars)
    }

    // ---------------------------------------------------------------
    // Notes
    // ---------------------------------------------------------------

    /// Place a tap note
    pub fn add_note(&mut self, tick: Tick, note_type: NoteType) -> Result<(), EditError> {
        if self.score.note_at(tick).is_some() {
            return Err(EditError::NoteExists(tick));
        }
        if let Some(held) = self
            .score
            .notes
            .iter()
            .find(|note| note.tick < tick && tick <= note.tick.saturating_add(note.length))
        {
            debug!(tick, held = held.tick, "note inside a hold");
            return Err(EditError::NoteConflict { tick, other: held.tick });
        }
        self.check_duration(tick as i64, tick as i64)?;

        insert_sorted(&mut self.score.notes, Note::new(tick, note_type), |note| note.tick);
        Ok(())
    }

    /// Remove the note at `tick`. Returns whether one was there.
    pub fn remove_note(&mut self, tick: Tick) -> bool {
        let before = self.score.notes.len();
        self.score.notes.retain(|note| note.tick != tick);
        self.score.notes.len() != before
    }

    /// Cycle the note's direction
    pub fn toggle_note(&mut self, tick: Tick) -> Result<NoteType, EditError> {
        let note = self.note_mut(tick)?;
        note.note_type = note.note_type.cycle();
        Ok(note.note_type)
    }

    /// Extend a note by one sixteenth. Returns the new length.
    pub fn add_note_length(&mut self, tick: Tick) -> Result<Tick, EditError> {
        let quantum = self.quantum();
        let length = self.note_mut(tick)?.length;
        let to = tick.saturating_add(length).saturating_add(quantum);

        if let Some(next) = self
            .score
            .notes
            .iter()
            .find(|note| tick < note.tick && note.tick <= to)
        {
            debug!(tick, next = next.tick, "hold would reach the next note");
            return Err(EditError::NoteConflict { tick, other: next.tick });
        }
        self.check_duration(tick as i64, to as i64)?;

        let note = self.note_mut(tick)?;
        note.length += quantum;
        Ok(note.length)
    }

    /// Shorten a note by one sixteenth, down to a tap. Returns the new length.
    pub fn sub_note_length(&mut self, tick: Tick) -> Result<Tick, EditError> {
        let quantum = self.quantum();
        let note = self.note_mut(tick)?;
        note.length = note.length.saturating_sub(quantum);
        Ok(note.length)
    }

    /// Tidy the note list: order by tick, drop duplicates and notes outside
    /// the editable window, and cut holds short of the next note.
    /// Returns the number of notes dropped.
    pub fn normalize_notes(&mut self) -> usize {
        let quantum = self.quantum().max(1);
        let before = self.score.notes.len();

        let mut notes = std::mem::take(&mut self.score.notes);
        notes.sort_by_key(|note| note.tick);
        notes.dedup_by_key(|note| note.tick);
        notes.retain(|note| self.is_valid_duration(note.tick as i64, note.tick as i64));

        for note in notes.iter_mut() {
            while note.length > 0
                && !self.is_valid_duration(note.tick as i64, note.tick as i64 + note.length as i64)
            {
                note.length = note.length.saturating_sub(quantum);
            }
        }
        for i in 1..notes.len() {
            let next = notes[i].tick;
            let note = &mut notes[i - 1];
            if note.tick.saturating_add(note.length) >= next {
                let room = next - note.tick - 1;
                note.length = room / quantum * quantum;
            }
        }

        self.score.notes = notes;
        let dropped = before - self.score.notes.len();
        info!(dropped, "notes normalized");
        dropped
    }

    /// Remove every note
    pub fn clear_all_notes(&mut self) {
        info!(count = self.score.notes.len(), "clearing all notes");
        self.score.notes.clear();
    }

    fn note_mut(&mut self, tick: Tick) -> Result<&mut Note, EditError> {
        self.score
            .notes
            .iter_mut()
            .find(|note| note.tick == tick)
            .ok_or(EditError::NotFound(tick))
    }

    // ---------------------------------------------------------------
    // Sections
    // ---------------------------------------------------------------

    /// Place a section of the default length
    pub fn add_section(&mut self, tick: Tick) -> Result<(), EditError> {
        let max = self.limits.section_max;
        if self.score.sections.len() >= max {
            return Err(EditError::AtCapacity { kind: EventKind::Section, max });
        }
        let length = self.default_section_length();
        let range = span(tick, length)?;
        self.check_range_conflict(range, None)?;
        self.check_duration(range.from as i64, range.to as i64)?;

        let lane = LaneType::default_for(self.score.info.stage);
        insert_sorted(&mut self.score.sections, Section::new(tick, length, lane), |s| s.tick);
        Ok(())
    }

    /// Remove the section at `tick`. Returns whether one was there.
    pub fn remove_section(&mut self, tick: Tick) -> bool {
        let before = self.score.sections.len();
        self.score.sections.retain(|section| section.tick != tick);
        self.score.sections.len() != before
    }

    /// Extend a section by one sixteenth. Returns the new length.
    pub fn add_section_length(&mut self, tick: Tick) -> Result<Tick, EditError> {
        let quantum = self.quantum();
        let length = self.section_mut(tick)?.length_tick;
        let range = span(tick, length.saturating_add(quantum))?;
        self.check_range_conflict(range, Some((EventKind::Section, tick)))?;
        self.check_duration(range.from as i64, range.to as i64)?;

        let section = self.section_mut(tick)?;
        section.length_tick += quantum;
        Ok(section.length_tick)
    }

    /// Shorten a section by one sixteenth, never below the minimum bars.
    /// Returns the new length.
    pub fn sub_section_length(&mut self, tick: Tick) -> Result<Tick, EditError> {
        let quantum = self.quantum();
        let floor = self.min_section_length();
        let section = self.section_mut(tick)?;
        let shrunk = section.length_tick.saturating_sub(quantum).max(floor);
        section.length_tick = shrunk.min(section.length_tick);
        Ok(section.length_tick)
    }

    /// Move a section by `diff` ticks. Returns its new tick.
    pub fn move_section(&mut self, tick: Tick, diff: i64) -> Result<Tick, EditError> {
        let length = self.section_mut(tick)?.length_tick;
        let range = self.shifted(tick, diff, length)?;
        self.check_range_conflict(range, Some((EventKind::Section, tick)))?;

        let index = self
            .score
            .sections
            .iter()
            .position(|section| section.tick == tick)
            .ok_or(EditError::NotFound(tick))?;
        let mut section = self.score.sections.remove(index);
        section.tick = range.from;
        insert_sorted(&mut self.score.sections, section, |s| s.tick);
        Ok(range.from)
    }

    /// Cycle the section's lane within the chart's stage
    pub fn toggle_section_type(&mut self, tick: Tick) -> Result<LaneType, EditError> {
        let stage = self.score.info.stage;
        let section = self.section_mut(tick)?;
        section.lane = section.lane.remap(stage).cycle();
        debug!(tick, lane = ?section.lane, "section lane changed");
        Ok(section.lane)
    }

    fn section_mut(&mut self, tick: Tick) -> Result<&mut Section, EditError> {
        self.score
            .sections
            .iter_mut()
            .find(|section| section.tick == tick)
            .ok_or(EditError::NotFound(tick))
    }

    // ---------------------------------------------------------------
    // Appeals and fevers
    // ---------------------------------------------------------------

    /// Place an appeal window
    pub fn add_appeal(&mut self, tick: Tick) -> Result<(), EditError> {
        self.add_fixed::<Appeal>(tick)
    }

    /// Remove the appeal at `tick`. Returns whether one was there.
    pub fn remove_appeal(&mut self, tick: Tick) -> bool {
        self.remove_fixed::<Appeal>(tick)
    }

    /// Move an appeal by `diff` ticks. Returns its new tick.
    pub fn move_appeal(&mut self, tick: Tick, diff: i64) -> Result<Tick, EditError> {
        self.move_fixed::<Appeal>(tick, diff)
    }

    /// Place a fever window
    pub fn add_fever(&mut self, tick: Tick) -> Result<(), EditError> {
        self.add_fixed::<Fever>(tick)
    }

    /// Remove the fever at `tick`. Returns whether one was there.
    pub fn remove_fever(&mut self, tick: Tick) -> bool {
        self.remove_fixed::<Fever>(tick)
    }

    /// Move a fever by `diff` ticks. Returns its new tick.
    pub fn move_fever(&mut self, tick: Tick, diff: i64) -> Result<Tick, EditError> {
        self.move_fixed::<Fever>(tick, diff)
    }

    fn add_fixed<E: FixedEvent>(&mut self, tick: Tick) -> Result<(), EditError> {
        let max = E::max(&self.limits);
        if E::list(&self.score).len() >= max {
            return Err(EditError::AtCapacity { kind: E::KIND, max });
        }
        let length = fixed_length(&self.score, E::duration_sec(&self.limits));
        let range = span(tick, length)?;
        self.check_range_conflict(range, None)?;
        self.check_duration(range.from as i64, range.to as i64)?;

        insert_sorted(E::list_mut(&mut self.score), E::at(tick), |e| e.tick());
        Ok(())
    }

    fn remove_fixed<E: FixedEvent>(&mut self, tick: Tick) -> bool {
        let list = E::list_mut(&mut self.score);
        let before = list.len();
        list.retain(|event| event.tick() != tick);
        list.len() != before
    }

    fn move_fixed<E: FixedEvent>(&mut self, tick: Tick, diff: i64) -> Result<Tick, EditError> {
        let index = E::list(&self.score)
            .iter()
            .position(|event| event.tick() == tick)
            .ok_or(EditError::NotFound(tick))?;
        let length = fixed_length(&self.score, E::duration_sec(&self.limits));
        let range = self.shifted(tick, diff, length)?;
        self.check_range_conflict(range, Some((E::KIND, tick)))?;

        let list = E::list_mut(&mut self.score);
        let mut event = list.remove(index);
        event.set_tick(range.from);
        insert_sorted(list, event, |e| e.tick());
        Ok(range.from)
    }

    // ---------------------------------------------------------------
    // Chart info
    // ---------------------------------------------------------------

    /// Switch stage; sections keep their lane index on the new stage
    pub fn set_stage(&mut self, stage: StageType) {
        self.score.info.stage = stage;
        for section in self.score.sections.iter_mut() {
            section.lane = section.lane.remap(stage);
        }
        info!(?stage, "stage changed");
    }

    /// Set the difficulty level, clamped to 1-5
    pub fn set_level(&mut self, level: u8) {
        self.score.info.level = level.clamp(LEVEL_RANGE.0, LEVEL_RANGE.1);
    }

    /// Point the chart at another song. Existing entries are kept as they are.
    pub fn change_song(&mut self, resource: &SongResource) {
        let info = &mut self.score.info;
        info.title = resource.title.clone();
        info.mv_id = resource.mv_id.clone();
        info.bpm = resource.bpm;
        info.start_at_ms = resource.start_at_ms;
        info.end_at_ms = resource.end_at_ms;
        info!(title = %resource.title, bpm = resource.bpm, "song changed");
    }

    // ---------------------------------------------------------------
    // Checks
    // ---------------------------------------------------------------

    /// Check `range` against every section, appeal and fever, skipping the
    /// entry named by `ignore`
    pub fn check_range_conflict(
        &self,
        range: TickRange,
        ignore: Option<(EventKind, Tick)>,
    ) -> Result<(), EditError> {
        let conflict = event_ranges(&self.score, &self.limits)
            .into_iter()
            .filter(|(kind, tick, _)| ignore != Some((*kind, *tick)))
            .find(|(_, _, existing)| existing.overlaps(&range));

        match conflict {
            Some((kind, tick, existing)) => {
                debug!(
                    %kind,
                    tick,
                    existing_to = existing.to,
                    from = range.from,
                    to = range.to,
                    "range conflict"
                );
                Err(EditError::Conflict { kind, tick, from: range.from, to: range.to })
            }
            None => Ok(()),
        }
    }

    /// Check that both ends fall inside the song's editable window
    pub fn is_valid_duration(&self, from: i64, to: i64) -> bool {
        if from < 0 || to < 0 {
            return false;
        }
        let info = &self.score.info;
        let converter = self.converter();
        let from_ms = converter.tick_to_ms(info.start_at_ms, from as f64);
        let to_ms = converter.tick_to_ms(info.start_at_ms, to as f64);

        info.start_at_ms <= from_ms && to_ms <= info.end_at_ms
    }

    fn check_duration(&self, from: i64, to: i64) -> Result<TickRange, EditError> {
        let out_of_bounds = EditError::OutOfBounds { from, to };
        if !self.is_valid_duration(from, to) {
            debug!(from, to, "range outside the editable window");
            return Err(out_of_bounds);
        }
        match (Tick::try_from(from), Tick::try_from(to)) {
            (Ok(from), Ok(to)) => Ok(TickRange::new(from, to)),
            _ => Err(out_of_bounds),
        }
    }

    /// Range of `length` ticks starting `diff` ticks away from `tick`
    fn shifted(&self, tick: Tick, diff: i64, length: Tick) -> Result<TickRange, EditError> {
        let from = (tick as i64).saturating_add(diff);
        self.check_duration(from, from.saturating_add(length as i64))
    }

    /// Full diagnostic report for the chart
    pub fn validate(&self) -> ValidationReport {
        validate(&self.score, &self.limits)
    }

    /// Check if the chart is complete and consistent
    pub fn is_valid_score(&self) -> bool {
        self.validate().is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ValidationIssue;

    /// 120 BPM, 10 second window: 1 beat = 240 ticks = 0.5s, window = 4800 ticks
    fn builder() -> ScoreBuilder {
        ScoreBuilder::new(&SongResource::new("Test", "mv", 120.0, 0.0, 10000.0))
    }

    fn long_builder() -> ScoreBuilder {
        ScoreBuilder::new(&SongResource::new("Long", "mv", 120.0, 0.0, 120_000.0))
    }

    #[test]
    fn test_add_note() {
        let mut b = builder();
        assert!(b.add_note(480, NoteType::Up).is_ok());
        assert!(b.add_note(0, NoteType::Left).is_ok());
        assert_eq!(b.add_note(480, NoteType::Right), Err(EditError::NoteExists(480)));

        let ticks: Vec<Tick> = b.score().notes.iter().map(|n| n.tick).collect();
        assert_eq!(ticks, vec![0, 480]);
        assert_eq!(b.score().notes[1].note_type, NoteType::Up);
        assert_eq!(b.score().notes[1].length, 0);
    }

    #[test]
    fn test_add_note_outside_window() {
        let mut b = builder();
        assert!(b.add_note(4800, NoteType::Up).is_ok());
        assert!(matches!(b.add_note(4801, NoteType::Up), Err(EditError::OutOfBounds { .. })));
    }

    #[test]
    fn test_add_note_inside_hold() {
        let mut b = builder();
        b.add_note(0, NoteType::Up).unwrap();
        b.add_note_length(0).unwrap();
        assert_eq!(
            b.add_note(60, NoteType::Up),
            Err(EditError::NoteConflict { tick: 60, other: 0 })
        );
        assert!(b.add_note(61, NoteType::Up).is_ok());
    }

    #[test]
    fn test_remove_note() {
        let mut b = builder();
        b.add_note(240, NoteType::Up).unwrap();
        assert!(!b.remove_note(100));
        assert!(b.remove_note(240));
        assert!(b.score().notes.is_empty());
    }

    #[test]
    fn test_toggle_note() {
        let mut b = builder();
        b.add_note(100, NoteType::Up).unwrap();
        assert_eq!(b.toggle_note(100), Ok(NoteType::Left));
        assert_eq!(b.toggle_note(100), Ok(NoteType::Right));
        assert_eq!(b.toggle_note(100), Ok(NoteType::Up));
        assert_eq!(b.toggle_note(5), Err(EditError::NotFound(5)));
    }

    #[test]
    fn test_note_length() {
        let mut b = builder();
        b.add_note(0, NoteType::Up).unwrap();
        b.add_note(240, NoteType::Up).unwrap();

        assert_eq!(b.add_note_length(0), Ok(60));
        assert_eq!(b.add_note_length(0), Ok(120));
        assert_eq!(b.add_note_length(0), Ok(180));
        // 240 would touch the next note
        assert_eq!(b.add_note_length(0), Err(EditError::NoteConflict { tick: 0, other: 240 }));
        assert_eq!(b.score().notes[0].length, 180);

        assert_eq!(b.sub_note_length(0), Ok(120));
        assert_eq!(b.sub_note_length(240), Ok(0));
    }

    #[test]
    fn test_note_length_window_end() {
        let mut b = builder();
        b.add_note(4740, NoteType::Up).unwrap();
        assert_eq!(b.add_note_length(4740), Ok(60));
        assert!(matches!(b.add_note_length(4740), Err(EditError::OutOfBounds { .. })));
        assert_eq!(b.score().notes[0].length, 60);
    }

    #[test]
    fn test_add_section() {
        let mut b = builder();
        assert!(b.add_section(0).is_ok());
        let section = b.score().sections[0];
        assert_eq!(section.length_tick, 1920);
        assert_eq!(section.lane, LaneType::default_for(StageType::Live));

        // Same tick overlaps the first section
        assert!(matches!(
            b.add_section(0),
            Err(EditError::Conflict { kind: EventKind::Section, .. })
        ));
        // Touching endpoint still overlaps
        assert!(matches!(b.add_section(1920), Err(EditError::Conflict { .. })));
        assert!(b.add_section(1921).is_ok());
        // [3842, 5762] runs past the 4800 tick window
        assert!(matches!(b.add_section(3842), Err(EditError::OutOfBounds { .. })));
    }

    #[test]
    fn test_section_capacity() {
        let mut b = long_builder();
        let max = b.limits().section_max;
        let mut placed = 0;
        for i in 0..=max {
            if b.add_section(i as Tick * 2400).is_ok() {
                placed += 1;
            }
        }
        assert_eq!(placed, max);
        assert_eq!(
            b.add_section(100_000),
            Err(EditError::AtCapacity { kind: EventKind::Section, max })
        );
    }

    #[test]
    fn test_section_length() {
        let mut b = builder();
        b.add_section(0).unwrap();
        b.add_appeal(2100).unwrap();

        assert_eq!(b.add_section_length(0), Ok(1980));
        assert_eq!(b.add_section_length(0), Ok(2040));
        // [0, 2100] touches the appeal
        assert!(matches!(
            b.add_section_length(0),
            Err(EditError::Conflict { kind: EventKind::Appeal, .. })
        ));
        assert_eq!(b.score().sections[0].length_tick, 2040);

        for _ in 0..40 {
            b.sub_section_length(0).unwrap();
        }
        assert_eq!(b.score().sections[0].length_tick, 960);
        assert_eq!(b.add_section_length(7), Err(EditError::NotFound(7)));
    }

    #[test]
    fn test_section_length_window_end() {
        let mut b = builder();
        // [2880, 4800] ends exactly on the window end
        b.add_section(2880).unwrap();
        assert_eq!(
            b.add_section_length(2880),
            Err(EditError::OutOfBounds { from: 2880, to: 4860 })
        );
        assert_eq!(b.score().sections[0].length_tick, 1920);
        assert_eq!(b.sub_section_length(2880), Ok(1860));
        assert_eq!(b.add_section_length(2880), Ok(1920));
    }

    #[test]
    fn test_sub_section_length_never_grows() {
        let limits = Limits { default_section_bars: 1, min_section_bars: 4, ..Limits::default() };
        let score = Score::new(&SongResource::new("Test", "mv", 120.0, 0.0, 10000.0));
        let mut b = ScoreBuilder::with_limits(score, limits);
        b.add_section(0).unwrap();
        b.add_appeal(1000).unwrap();

        assert_eq!(b.score().sections[0].length_tick, 960);
        assert_eq!(b.sub_section_length(0), Ok(960));
        assert_eq!(b.score().sections[0].length_tick, 960);
        assert!(!b
            .validate()
            .issues()
            .iter()
            .any(|issue| matches!(issue, ValidationIssue::EventOverlap { .. })));
    }

    #[test]
    fn test_add_events_near_tick_max() {
        let mut b = builder();
        let tick = Tick::MAX - 10;
        assert!(matches!(b.add_section(tick), Err(EditError::OutOfBounds { .. })));
        assert!(matches!(b.add_appeal(tick), Err(EditError::OutOfBounds { .. })));
        assert!(matches!(b.add_fever(Tick::MAX), Err(EditError::OutOfBounds { .. })));
        assert!(matches!(b.add_note(Tick::MAX, NoteType::Up), Err(EditError::OutOfBounds { .. })));

        let score = b.score();
        assert!(score.notes.is_empty());
        assert!(score.sections.is_empty() && score.appeals.is_empty() && score.fevers.is_empty());
    }

    #[test]
    fn test_move_events_by_extreme_diff() {
        let mut b = long_builder();
        b.add_section(0).unwrap();
        b.add_appeal(2400).unwrap();
        b.add_fever(6000).unwrap();

        for diff in [i64::MAX, i64::MIN, i64::MAX - 100, -(Tick::MAX as i64)] {
            let out = |result: Result<Tick, EditError>| {
                matches!(result, Err(EditError::OutOfBounds { .. }))
            };
            assert!(out(b.move_section(0, diff)));
            assert!(out(b.move_appeal(2400, diff)));
            assert!(out(b.move_fever(6000, diff)));
        }
        assert_eq!(b.score().sections[0].tick, 0);
        assert_eq!(b.score().appeals[0].tick, 2400);
        assert_eq!(b.score().fevers[0].tick, 6000);
    }

    #[test]
    fn test_move_section() {
        let mut b = long_builder();
        b.add_section(0).unwrap();
        b.add_section(4000).unwrap();

        assert_eq!(b.move_section(0, 1000), Ok(1000));
        assert_eq!(b.score().sections[0].tick, 1000);
        // [2100, 4020] overlaps the section at 4000
        assert!(b.move_section(1000, 1100).is_err());
        assert_eq!(b.score().sections[0].tick, 1000);
        // Moving past the other section keeps the list ordered
        assert_eq!(b.move_section(1000, 5000), Ok(6000));
        let ticks: Vec<Tick> = b.score().sections.iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![4000, 6000]);
        // Negative destination
        assert!(matches!(b.move_section(4000, -4001), Err(EditError::OutOfBounds { .. })));
    }

    #[test]
    fn test_move_section_overlapping_itself() {
        let mut b = builder();
        b.add_section(0).unwrap();
        assert_eq!(b.move_section(0, 60), Ok(60));
        assert_eq!(b.move_section(60, -60), Ok(0));
    }

    #[test]
    fn test_toggle_section_type() {
        let mut b = builder();
        b.set_stage(StageType::Fashion);
        b.add_section(0).unwrap();
        assert_eq!(b.toggle_section_type(0), Ok(LaneType::for_stage(StageType::Fashion, 1)));
        assert_eq!(b.toggle_section_type(0), Ok(LaneType::for_stage(StageType::Fashion, 0)));
    }

    #[test]
    fn test_set_stage_remaps_sections() {
        let mut b = builder();
        b.add_section(0).unwrap();
        for _ in 0..3 {
            b.toggle_section_type(0).unwrap();
        }
        b.set_stage(StageType::Fashion);
        assert_eq!(b.score().sections[0].lane, LaneType::for_stage(StageType::Fashion, 1));
    }

    #[test]
    fn test_appeals_and_fevers() {
        let mut b = long_builder();
        // 5s at 120 BPM
        assert_eq!(b.appeal_length(), 2400);
        assert_eq!(b.fever_length(), 4800);

        b.add_appeal(0).unwrap();
        assert!(matches!(
            b.add_fever(2400),
            Err(EditError::Conflict { kind: EventKind::Appeal, .. })
        ));
        b.add_fever(2401).unwrap();
        assert!(matches!(
            b.add_fever(20000),
            Err(EditError::AtCapacity { kind: EventKind::Fever, .. })
        ));

        assert_eq!(b.move_fever(2401, 10000), Ok(12401));
        assert_eq!(b.move_appeal(0, 100), Ok(100));
        assert_eq!(b.move_appeal(55, 10), Err(EditError::NotFound(55)));

        assert!(b.remove_fever(12401));
        assert!(!b.remove_fever(12401));
        assert!(b.remove_appeal(100));
    }

    #[test]
    fn test_rejected_edit_leaves_score_unchanged() {
        let mut b = builder();
        b.add_section(0).unwrap();
        b.add_appeal(2000).unwrap();
        b.add_note(100, NoteType::Up).unwrap();
        let before = b.score().clone();

        assert!(b.add_section(100).is_err());
        assert!(b.move_appeal(2000, -100).is_err());
        assert!(b.move_section(0, 4000).is_err());
        assert!(b.add_fever(0).is_err());
        assert!(b.add_note(100, NoteType::Left).is_err());
        assert_eq!(b.score(), &before);
    }

    #[test]
    fn test_normalize_notes() {
        let mut b = builder();
        {
            let score = &mut b.score;
            score.notes.push(Note { note_type: NoteType::Up, tick: 480, length: 0 });
            score.notes.push(Note { note_type: NoteType::Up, tick: 0, length: 600 });
            score.notes.push(Note { note_type: NoteType::Left, tick: 480, length: 0 });
            score.notes.push(Note { note_type: NoteType::Right, tick: 9000, length: 0 });
            score.notes.push(Note { note_type: NoteType::Right, tick: 4700, length: 240 });
        }

        assert_eq!(b.normalize_notes(), 2);
        let notes = &b.score().notes;
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0].tick, 0);
        assert_eq!(notes[0].length, 420);
        assert_eq!(notes[1].note_type, NoteType::Up);
        assert_eq!(notes[2].length, 60);
    }

    #[test]
    fn test_info_edits() {
        let mut b = builder();
        b.set_level(9);
        assert_eq!(b.score().info.level, 5);
        b.set_level(0);
        assert_eq!(b.score().info.level, 1);

        b.change_song(&SongResource::new("Other", "xyz", 94.0, 5670.0, 128000.0));
        assert_eq!(b.score().info.title, "Other");
        assert_eq!(b.score().info.bpm, 94.0);
        assert_eq!(b.score().info.mv_id, "xyz");
    }

    #[test]
    fn test_window_offset() {
        let mut b = ScoreBuilder::new(&SongResource::new("Offset", "mv", 120.0, 5000.0, 15000.0));
        // The window is 10s long whatever its start
        assert!(b.is_valid_duration(0, 4800));
        assert!(!b.is_valid_duration(0, 4801));
        assert!(!b.is_valid_duration(-1, 10));
        assert!(b.add_section(2880).is_ok());
    }
}
