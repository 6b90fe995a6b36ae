//! Story data shared by tests and the stories binary.
//!
//! Everything is anchored on [`story_now`] so summaries and timelines are stable.

use bloom_api_models::{
    Album, BMI_METRIC_TITLE, DiaperLog, DiaperType, DueDateLog, MetricRecord, Note, Photo,
    StoolColor, StoolConsistency,
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde_json::json;

/// Fixed "current" instant used by every fixture: 2025-03-10 18:00 UTC.
#[must_use]
pub fn story_now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_741_629_600, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// BMI metric with structured notes, created `created_at_secs` after the epoch.
#[must_use]
pub fn bmi_record(id: i64, value: &str, notes: &str, created_at_secs: i64) -> MetricRecord {
    MetricRecord {
        id: Some(id),
        title: BMI_METRIC_TITLE.to_string(),
        value: value.to_string(),
        unit: Some("kg/cm".to_string()),
        notes: Some(notes.to_string()),
        created_at: Utc.timestamp_opt(created_at_secs, 0).single(),
        updated_at: None,
    }
}

/// The saved entry shown by the "with saved metrics" story: 60 kg, 165 cm.
#[must_use]
pub fn sample_bmi_record() -> MetricRecord {
    let notes = json!({ "weight": 60, "height": 165, "weightUnit": "kg", "heightUnit": "cm" });
    bmi_record(1, "22.4", &notes.to_string(), story_now().timestamp())
}

/// Saved due date for a pregnancy `weeks` weeks along at `now`.
#[must_use]
pub fn due_date_log(now: DateTime<Utc>, weeks: u32) -> DueDateLog {
    DueDateLog {
        id: Some(1),
        lmp_date: now - TimeDelta::weeks(i64::from(weeks)),
        weeks_pregnant: weeks,
    }
}

/// Diaper change `hours_ago` hours before [`story_now`].
#[must_use]
pub fn diaper_log(id: i64, diaper_type: DiaperType, hours_ago: i64) -> DiaperLog {
    DiaperLog {
        id: Some(id),
        user_id: Some(1),
        diaper_type,
        occurred_at: story_now() - TimeDelta::hours(hours_ago),
        color: None,
        consistency: None,
        notes: None,
        created_at: Some(story_now()),
        updated_at: Some(story_now()),
    }
}

fn stool(
    mut log: DiaperLog,
    color: StoolColor,
    consistency: StoolConsistency,
    notes: &str,
) -> DiaperLog {
    log.color = Some(color);
    log.consistency = Some(consistency);
    log.notes = Some(notes.to_string());
    log
}

/// A day of changes plus one from the previous day.
#[must_use]
pub fn sample_diaper_logs() -> Vec<DiaperLog> {
    let mut first = diaper_log(1, DiaperType::Wet, 0);
    first.notes = Some("Normal wet diaper".to_string());
    vec![
        first,
        stool(
            diaper_log(2, DiaperType::Dirty, 2),
            StoolColor::Yellow,
            StoolConsistency::Seedy,
            "Normal breastfed stool",
        ),
        stool(
            diaper_log(3, DiaperType::Both, 4),
            StoolColor::Brown,
            StoolConsistency::Pasty,
            "Mixed feeding stool",
        ),
        diaper_log(4, DiaperType::Wet, 6),
        stool(
            diaper_log(5, DiaperType::Dirty, 8),
            StoolColor::Green,
            StoolConsistency::Watery,
            "Loose stool - monitor for dehydration",
        ),
        diaper_log(6, DiaperType::Wet, 24),
    ]
}

fn days_ago(days: i64) -> DateTime<Utc> {
    story_now() - TimeDelta::days(days)
}

fn photo(id: &str, name: &str, notes: &str, age_days: i64) -> Photo {
    Photo {
        id: id.to_string(),
        file: format!("https://cdn.bloom.test/photos/{id}.png"),
        name: name.to_string(),
        notes: Some(notes.to_string()),
        created_at: days_ago(age_days),
        uploaded_at: days_ago(age_days),
    }
}

/// Two albums with photos.
#[must_use]
pub fn sample_albums() -> Vec<Album> {
    vec![
        Album {
            id: "1".to_string(),
            title: "First Month Memories".to_string(),
            cover_photo: Some("https://cdn.bloom.test/covers/first-month.png".to_string()),
            description: Some("Baby's first month photos and moments".to_string()),
            photos: vec![
                photo("p1", "First Smile", "Such a precious moment!", 25),
                photo("p2", "Sleeping Beauty", "Peaceful sleep", 20),
            ],
            created_at: days_ago(30),
            last_updated: days_ago(20),
        },
        Album {
            id: "2".to_string(),
            title: "Family Moments".to_string(),
            cover_photo: Some("https://cdn.bloom.test/covers/family.png".to_string()),
            description: Some("Special family memories together".to_string()),
            photos: vec![photo("p3", "Family Portrait", "All together", 15)],
            created_at: days_ago(15),
            last_updated: days_ago(15),
        },
    ]
}

fn note(id: &str, title: &str, content: &str, tags: &[&str], mood: &str, age_days: i64) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        photo: None,
        tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
        mood: Some(mood.to_string()),
        created_at: days_ago(age_days),
        last_updated: days_ago(age_days),
    }
}

/// Four journal notes, three tagged as milestones.
#[must_use]
pub fn sample_notes() -> Vec<Note> {
    let mut sleepless = note(
        "n2",
        "Sleepless Night",
        "Up every 2 hours but seeing that little face makes it all worth it.",
        &["sleep", "tired", "newborn"],
        "tired",
        22,
    );
    sleepless.photo = Some("https://cdn.bloom.test/photos/night.png".to_string());
    vec![
        note(
            "n1",
            "First Day Home",
            "Bringing baby home was magical! The nursery looks perfect.",
            &["milestone", "home", "first"],
            "happy",
            28,
        ),
        sleepless,
        note(
            "n3",
            "First Pediatrician Visit",
            "Everything looks great! Baby is growing well and hitting all the early milestones.",
            &["doctor", "health", "milestone"],
            "relieved",
            18,
        ),
        note(
            "n4",
            "Tummy Time Success",
            "Baby held head up during tummy time today!",
            &["milestone", "development", "proud"],
            "proud",
            10,
        ),
    ]
}
