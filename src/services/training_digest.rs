// ABOUTME: Renders a user's training sessions into a short textual digest for LLM context
// ABOUTME: Pure function over at most the first three sessions, one line per session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use pitchside_core::constants::digest::{MAX_SESSIONS, NO_TRAINING_DATA};
use pitchside_core::models::TrainingSession;

const fn yes_no(present: bool) -> &'static str {
    if present {
        "Yes"
    } else {
        "No"
    }
}

fn session_line(session: &TrainingSession) -> String {
    format!(
        "Session on {} (ended {}): Accel data: {}, Gyro data: {}, HR data: {}, GPS data: {}.",
        session.session_start.date_naive(),
        session.session_end.date_naive(),
        yes_no(session.has_accelerometer()),
        yes_no(session.has_gyroscope()),
        yes_no(session.has_heart_rate()),
        yes_no(session.has_gps()),
    )
}

/// Digest of the first three sessions, in the order given
///
/// No recency sort is applied. An empty input yields the no-data placeholder.
#[must_use]
pub fn digest(sessions: &[TrainingSession]) -> String {
    if sessions.is_empty() {
        return NO_TRAINING_DATA.to_owned();
    }
    sessions
        .iter()
        .take(MAX_SESSIONS)
        .map(session_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn session_on(day: u32) -> TrainingSession {
        let start = Utc.with_ymd_and_hms(2025, 3, day, 18, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, day, 19, 30, 0).unwrap();
        TrainingSession::new("u1", start, end)
    }

    #[test]
    fn test_empty_sessions_yield_placeholder() {
        assert_eq!(digest(&[]), "No recent training data available.");
    }

    #[test]
    fn test_line_format_and_channel_flags() {
        let session = session_on(4)
            .with_accelerometer_data("[0.1,0.2]")
            .with_heart_rate_data("[150]")
            .with_gps_data("");

        assert_eq!(
            digest(&[session]),
            "Session on 2025-03-04 (ended 2025-03-04): Accel data: Yes, Gyro data: No, HR data: Yes, GPS data: No."
        );
    }

    #[test]
    fn test_takes_first_three_in_input_order() {
        let sessions = [session_on(9), session_on(2), session_on(7), session_on(1)];
        let text = digest(&sessions);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Session on 2025-03-09"));
        assert!(lines[1].starts_with("Session on 2025-03-02"));
        assert!(lines[2].starts_with("Session on 2025-03-07"));
    }
}
