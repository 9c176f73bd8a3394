//! Progress statistics over logged workouts

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::models::Workout;

/// Aggregate progress summary for the progress screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub total_workouts: usize,
    pub total_duration_minutes: u32,
    pub calories_burned: u32,
    pub weekly: Vec<WeeklySummary>,
}

/// One Monday-start week of activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub workout_count: usize,
    pub total_duration_minutes: u32,
}

/// Compute the full progress summary, weekly buckets sorted ascending.
pub fn progress_stats(workouts: &[Workout]) -> ProgressStats {
    let mut weeks: BTreeMap<NaiveDate, (usize, u32)> = BTreeMap::new();
    let mut total_duration = 0;
    let mut calories = 0;

    for workout in workouts {
        total_duration += workout.duration;
        calories += calories_burned(workout.duration, workout.intensity);
        let bucket = weeks.entry(week_start(workout.date)).or_insert((0, 0));
        bucket.0 += 1;
        bucket.1 += workout.duration;
    }

    ProgressStats {
        total_workouts: workouts.len(),
        total_duration_minutes: total_duration,
        calories_burned: calories,
        weekly: weeks
            .into_iter()
            .map(|(week_start, (workout_count, total_duration_minutes))| WeeklySummary {
                week_start,
                workout_count,
                total_duration_minutes,
            })
            .collect(),
    }
}

/// Rough calorie estimate: 5 kcal per minute at moderate effort, scaled by
/// intensity on its 1-10 scale.
pub fn calories_burned(duration_minutes: u32, intensity: u32) -> u32 {
    let base_rate = 5.0;
    let intensity_factor = f64::from(intensity) / 5.0;
    (f64::from(duration_minutes) * base_rate * intensity_factor).round() as u32
}

/// The Monday that starts the week containing `date`.
pub fn week_start(date: DateTime<Utc>) -> NaiveDate {
    let date = date.date_naive();
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Render seconds as mm:ss for the timer display.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn workout_on(date: DateTime<Utc>, duration: u32, intensity: u32) -> Workout {
        Workout {
            id: 0,
            user_id: 1,
            exercise_type: "cardio".to_string(),
            exercise_name: "Running".to_string(),
            duration,
            intensity,
            notes: None,
            date,
        }
    }

    #[test]
    fn calorie_estimate_scales_with_intensity() {
        assert_eq!(calories_burned(30, 5), 150);
        assert_eq!(calories_burned(30, 10), 300);
        assert_eq!(calories_burned(45, 7), 315);
        assert_eq!(calories_burned(0, 8), 0);
    }

    #[test]
    fn weeks_start_on_monday() {
        let monday = Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
        let sunday = Utc.with_ymd_and_hms(2025, 1, 12, 22, 0, 0).unwrap();
        let next_monday = Utc.with_ymd_and_hms(2025, 1, 13, 6, 0, 0).unwrap();

        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(week_start(monday), start);
        assert_eq!(week_start(sunday), start);
        assert_eq!(
            week_start(next_monday),
            NaiveDate::from_ymd_opt(2025, 1, 13).unwrap()
        );
    }

    #[test]
    fn stats_bucket_workouts_by_week() {
        let workouts = vec![
            workout_on(Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(), 30, 5),
            workout_on(Utc.with_ymd_and_hms(2025, 1, 8, 18, 0, 0).unwrap(), 20, 10),
            workout_on(Utc.with_ymd_and_hms(2025, 1, 14, 7, 0, 0).unwrap(), 60, 5),
        ];

        let stats = progress_stats(&workouts);
        assert_eq!(stats.total_workouts, 3);
        assert_eq!(stats.total_duration_minutes, 110);
        assert_eq!(stats.calories_burned, 150 + 200 + 300);
        assert_eq!(
            stats.weekly,
            vec![
                WeeklySummary {
                    week_start: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
                    workout_count: 2,
                    total_duration_minutes: 50,
                },
                WeeklySummary {
                    week_start: NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
                    workout_count: 1,
                    total_duration_minutes: 60,
                },
            ]
        );
    }

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(120), "02:00");
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn empty_history_yields_zeroes() {
        let stats = progress_stats(&[]);
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.total_duration_minutes, 0);
        assert!(stats.weekly.is_empty());
    }
}
