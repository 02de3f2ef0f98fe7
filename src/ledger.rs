use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    In,
    Out,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockEvent {
    pub kind: EventKind,
    pub timestamp: DateTime<Local>,
}

/// Append-only log of clock events. Entries are assumed to strictly
/// alternate starting with `In`; the ledger does not validate this, and a
/// malformed log is silently mis-paired during reconstruction (see sessions).
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<ClockEvent>,
}

#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub open: bool,
}

impl Session {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[ClockEvent] {
        &self.entries
    }

    /// Appends an event with the given kind and timestamp. Always succeeds;
    /// the caller picks the kind by reading `is_clocked_in` first.
    pub fn append(&mut self, kind: EventKind, at: DateTime<Local>) {
        self.entries.push(ClockEvent {
            kind,
            timestamp: at,
        });
    }

    pub fn is_clocked_in(&self) -> bool {
        matches!(
            self.entries.last(),
            Some(ClockEvent {
                kind: EventKind::In,
                ..
            })
        )
    }

    /// Reconstructs sessions by index parity: entries (0,1), (2,3), ... form
    /// closed sessions, an odd tail forms an open session ending at `now`.
    /// A pair whose even-index entry is not `In` is skipped.
    pub fn sessions(&self, now: DateTime<Local>) -> Vec<Session> {
        let mut sessions = Vec::new();

        for pair in self.entries.chunks(2) {
            let first = &pair[0];
            if first.kind != EventKind::In {
                continue;
            }

            match pair.get(1) {
                Some(second) => sessions.push(Session {
                    start: first.timestamp,
                    end: second.timestamp,
                    open: false,
                }),
                None => sessions.push(Session {
                    start: first.timestamp,
                    end: now,
                    open: true,
                }),
            }
        }

        sessions
    }

    pub fn worked_duration(&self, now: DateTime<Local>) -> Duration {
        self.sessions(now)
            .iter()
            .fold(Duration::zero(), |acc, session| acc + session.duration())
    }
}

pub fn format_worked_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}h {minutes:02}m {seconds:02}s")
}

pub fn format_clock_time(time: DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Local, TimeZone};

    use super::{EventKind, Ledger, format_worked_duration};

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 1, 5, hour, minute, second)
            .unwrap()
    }

    #[test]
    fn empty_ledger_is_clocked_out_with_zero_duration() {
        let ledger = Ledger::new();
        assert!(!ledger.is_clocked_in());
        assert_eq!(ledger.worked_duration(at(12, 0, 0)), Duration::zero());
        assert_eq!(
            format_worked_duration(ledger.worked_duration(at(12, 0, 0))),
            "00h 00m 00s"
        );
    }

    #[test]
    fn clocked_in_follows_last_entry_kind() {
        let mut ledger = Ledger::new();
        ledger.append(EventKind::In, at(9, 0, 0));
        assert!(ledger.is_clocked_in());
        ledger.append(EventKind::Out, at(10, 0, 0));
        assert!(!ledger.is_clocked_in());
    }

    #[test]
    fn closed_sessions_ignore_now() {
        let mut ledger = Ledger::new();
        ledger.append(EventKind::In, at(9, 0, 0));
        ledger.append(EventKind::Out, at(10, 30, 0));
        ledger.append(EventKind::In, at(11, 0, 0));
        ledger.append(EventKind::Out, at(11, 45, 0));

        let expected = Duration::minutes(90 + 45);
        assert_eq!(ledger.worked_duration(at(12, 0, 0)), expected);
        let far_future = Local.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(ledger.worked_duration(far_future), expected);
    }

    #[test]
    fn open_session_grows_with_now() {
        let mut ledger = Ledger::new();
        ledger.append(EventKind::In, at(9, 0, 0));
        ledger.append(EventKind::Out, at(9, 30, 0));
        ledger.append(EventKind::In, at(10, 0, 0));

        let earlier = ledger.worked_duration(at(10, 10, 0));
        let later = ledger.worked_duration(at(10, 20, 0));
        assert_eq!(earlier, Duration::minutes(40));
        assert_eq!(later, Duration::minutes(50));
        assert!(later > earlier);

        let sessions = ledger.sessions(at(10, 20, 0));
        assert_eq!(sessions.len(), 2);
        assert!(!sessions[0].open);
        assert!(sessions[1].open);
    }

    #[test]
    fn formats_hours_minutes_seconds_without_day_carry() {
        let mut ledger = Ledger::new();
        ledger.append(EventKind::In, at(9, 0, 0));

        let queried = ledger.worked_duration(at(9, 0, 0) + Duration::seconds(3661));
        assert_eq!(format_worked_duration(queried), "01h 01m 01s");

        ledger.append(EventKind::Out, at(9, 0, 0) + Duration::seconds(3661));
        let later = ledger.worked_duration(at(23, 0, 0));
        assert_eq!(format_worked_duration(later), "01h 01m 01s");

        assert_eq!(format_worked_duration(Duration::hours(30)), "30h 00m 00s");
        assert_eq!(format_worked_duration(Duration::seconds(-5)), "00h 00m 00s");
    }

    #[test]
    fn pair_not_starting_with_in_is_skipped() {
        let mut ledger = Ledger::new();
        ledger.append(EventKind::Out, at(9, 0, 0));
        ledger.append(EventKind::Out, at(10, 0, 0));
        ledger.append(EventKind::In, at(11, 0, 0));
        ledger.append(EventKind::Out, at(11, 30, 0));

        assert_eq!(ledger.worked_duration(at(12, 0, 0)), Duration::minutes(30));
    }
}
