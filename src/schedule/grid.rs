// file: src/schedule/grid.rs
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::models::track::sort_tracks;
use crate::models::{Session, Track};

/// One session placed on the grid. Rows and columns are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub session_id: String,
    pub title: String,
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub col_span: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UnplacedReason {
    MissingStart,
    MissingTrack,
    UnknownTrack(String),
    /// Another session already holds part of the rectangle.
    Overlap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unplaced {
    pub session_id: String,
    pub reason: UnplacedReason,
}

/// What a grid position holds. Indexes point into [`ScheduleGrid::cells`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Start(usize),
    Covered(usize),
}

#[derive(Debug, Clone)]
pub struct ScheduleGrid {
    pub day: NaiveDate,
    pub timezone: Tz,
    /// Distinct start instants of the placed sessions, ascending.
    pub slots: Vec<DateTime<Utc>>,
    /// Grid columns, in order.
    pub tracks: Vec<Track>,
    pub cells: Vec<GridCell>,
    pub unplaced: Vec<Unplaced>,
    occupancy: Vec<Vec<Slot>>,
}

struct Candidate<'a> {
    session: &'a Session,
    start: DateTime<Utc>,
    column: usize,
}

impl ScheduleGrid {
    /// Lays out the sessions starting on `day` (in `timezone`).
    ///
    /// Sessions without a start, or whose track is missing or unknown, are
    /// listed in `unplaced` instead of failing the layout.
    pub fn build(sessions: &[Session], tracks: &[Track], day: NaiveDate, timezone: Tz) -> Self {
        let mut tracks = tracks.to_vec();
        sort_tracks(&mut tracks);
        let column_of: HashMap<&str, usize> = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        let mut unplaced = Vec::new();
        let mut candidates = Vec::new();

        for session in sessions {
            let start = match session.start {
                Some(start) => start,
                None => {
                    unplaced.push(Unplaced {
                        session_id: session.id.clone(),
                        reason: UnplacedReason::MissingStart,
                    });
                    continue;
                }
            };
            if start.with_timezone(&timezone).date_naive() != day {
                continue;
            }

            let column = match session.track_id.as_deref() {
                None => {
                    unplaced.push(Unplaced {
                        session_id: session.id.clone(),
                        reason: UnplacedReason::MissingTrack,
                    });
                    continue;
                }
                Some(track_id) => match column_of.get(track_id) {
                    Some(column) => *column,
                    None => {
                        unplaced.push(Unplaced {
                            session_id: session.id.clone(),
                            reason: UnplacedReason::UnknownTrack(track_id.to_string()),
                        });
                        continue;
                    }
                },
            };

            candidates.push(Candidate { session, start, column });
        }

        let mut slots: Vec<DateTime<Utc>> = candidates.iter().map(|c| c.start).collect();
        slots.sort();
        slots.dedup();

        candidates.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| a.column.cmp(&b.column))
                .then_with(|| a.session.id.cmp(&b.session.id))
        });

        let rows = slots.len();
        let columns = tracks.len();
        let mut occupancy = vec![vec![Slot::Empty; columns]; rows];
        let mut cells: Vec<GridCell> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            // slots holds every candidate start, so the search always hits
            let row = match slots.binary_search(&candidate.start) {
                Ok(row) => row,
                Err(_) => continue,
            };
            let column = candidate.column;
            let row_span = (candidate.session.row_span() as usize).min(rows - row).max(1);
            let col_span = (candidate.session.col_span() as usize).min(columns - column).max(1);

            let free = (row..row + row_span)
                .all(|r| (column..column + col_span).all(|c| occupancy[r][c] == Slot::Empty));
            if !free {
                log::debug!(
                    "Session {} overlaps another session at row {}, column {}",
                    candidate.session.id,
                    row,
                    column
                );
                unplaced.push(Unplaced {
                    session_id: candidate.session.id.clone(),
                    reason: UnplacedReason::Overlap,
                });
                continue;
            }

            let index = cells.len();
            for r in row..row + row_span {
                for c in column..column + col_span {
                    occupancy[r][c] = Slot::Covered(index);
                }
            }
            occupancy[row][column] = Slot::Start(index);

            cells.push(GridCell {
                session_id: candidate.session.id.clone(),
                title: candidate.session.title.clone(),
                row,
                column,
                row_span,
                col_span,
            });
        }

        Self { day, timezone, slots, tracks, cells, unplaced, occupancy }
    }

    pub fn row_count(&self) -> usize {
        self.slots.len()
    }

    pub fn column_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major view of the grid.
    pub fn occupancy(&self) -> &[Vec<Slot>] {
        &self.occupancy
    }

    pub fn cell_for(&self, session_id: &str) -> Option<&GridCell> {
        self.cells.iter().find(|c| c.session_id == session_id)
    }

    /// Local time label of a row, e.g. `09:30`.
    pub fn slot_label(&self, row: usize) -> String {
        self.slots
            .get(row)
            .map(|slot| slot.with_timezone(&self.timezone).format("%H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Local days that have at least one timed session, ascending.
pub fn days(sessions: &[Session], timezone: Tz) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = sessions
        .iter()
        .filter_map(|s| s.start)
        .map(|start| start.with_timezone(&timezone).date_naive())
        .collect();
    days.sort();
    days.dedup();
    days
}
