//! Named stories for each tool.
//!
//! # Design
//! - A story seeds in-memory services, drives one controller, and reports the
//!   resulting state.
//! - Against a live backend only the read path runs; nothing is written.

use std::sync::Arc;

use bloom_api_models::{DiaperType, StoolColor, StoolConsistency};
use bloom_test_support::fixtures::{
    diaper_log, due_date_log, sample_albums, sample_bmi_record, sample_diaper_logs,
    sample_notes, story_now,
};
use bloom_test_support::mocks::{
    InMemoryDiapers, InMemoryDueDate, InMemoryJournal, InMemoryMetrics, MockPlan,
};
use bloom_tools_core::{DiaperService, DueDateService, JournalService, MetricsService};
use bloom_ui::Clock;
use bloom_ui::features::bmi::BmiController;
use bloom_ui::features::bmi::actions::BmiAction;
use bloom_ui::features::diaper::actions::DiaperAction;
use bloom_ui::features::diaper::{DiaperController, needs_attention};
use bloom_ui::features::due_date::DueDateController;
use bloom_ui::features::journal::actions::JournalAction;
use bloom_ui::features::journal::{JournalController, JournalTab};
use bloom_ui::fixed_clock;
use clap::ValueEnum;
use tracing::info;

use crate::output::StoryReport;

/// Stories that can be played.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Scenario {
    BmiDefault,
    BmiSaved,
    BmiError,
    BmiOffline,
    DueDateEmpty,
    DueDateFirstTrimester,
    DueDateSecondTrimester,
    DueDateThirdTrimester,
    DueDateFullTerm,
    DiaperEmpty,
    DiaperDay,
    DiaperConcerning,
    JournalEmpty,
    JournalFull,
    JournalSearch,
}

impl Scenario {
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::BmiDefault => "bmi-default",
            Self::BmiSaved => "bmi-saved",
            Self::BmiError => "bmi-error",
            Self::BmiOffline => "bmi-offline",
            Self::DueDateEmpty => "due-date-empty",
            Self::DueDateFirstTrimester => "due-date-first-trimester",
            Self::DueDateSecondTrimester => "due-date-second-trimester",
            Self::DueDateThirdTrimester => "due-date-third-trimester",
            Self::DueDateFullTerm => "due-date-full-term",
            Self::DiaperEmpty => "diaper-empty",
            Self::DiaperDay => "diaper-day",
            Self::DiaperConcerning => "diaper-concerning",
            Self::JournalEmpty => "journal-empty",
            Self::JournalFull => "journal-full",
            Self::JournalSearch => "journal-search",
        }
    }

    pub(crate) const fn tool(self) -> &'static str {
        match self {
            Self::BmiDefault | Self::BmiSaved | Self::BmiError | Self::BmiOffline => "bmi",
            Self::DueDateEmpty
            | Self::DueDateFirstTrimester
            | Self::DueDateSecondTrimester
            | Self::DueDateThirdTrimester
            | Self::DueDateFullTerm => "due-date",
            Self::DiaperEmpty | Self::DiaperDay | Self::DiaperConcerning => "diaper",
            Self::JournalEmpty | Self::JournalFull | Self::JournalSearch => "journal",
        }
    }

    const fn pregnancy_weeks(self) -> Option<u32> {
        match self {
            Self::DueDateFirstTrimester => Some(8),
            Self::DueDateSecondTrimester => Some(20),
            Self::DueDateThirdTrimester => Some(32),
            Self::DueDateFullTerm => Some(38),
            _ => None,
        }
    }
}

/// Service set a story runs against.
#[derive(Clone)]
pub(crate) struct Stage {
    metrics: Arc<dyn MetricsService>,
    due_date: Arc<dyn DueDateService>,
    diapers: Arc<dyn DiaperService>,
    journal: Arc<dyn JournalService>,
    clock: Clock,
    live: bool,
}

impl Stage {
    /// In-memory services seeded for `scenario`, pinned to the story clock.
    pub(crate) fn seeded(scenario: Scenario) -> Self {
        let metrics = match scenario {
            Scenario::BmiSaved => InMemoryMetrics::with_records(vec![sample_bmi_record()]),
            Scenario::BmiError => InMemoryMetrics::new().with_plan(MockPlan::rejecting()),
            Scenario::BmiOffline => InMemoryMetrics::new().with_plan(MockPlan::offline()),
            _ => InMemoryMetrics::new(),
        };
        let due_date = scenario.pregnancy_weeks().map_or_else(InMemoryDueDate::new, |weeks| {
            InMemoryDueDate::with_log(due_date_log(story_now(), weeks))
        });
        let diapers = match scenario {
            Scenario::DiaperDay => InMemoryDiapers::with_entries(sample_diaper_logs()),
            Scenario::DiaperConcerning => InMemoryDiapers::with_entries(concerning_changes()),
            _ => InMemoryDiapers::new(),
        };
        let journal = match scenario {
            Scenario::JournalFull | Scenario::JournalSearch => {
                InMemoryJournal::with_content(sample_albums(), sample_notes())
            }
            _ => InMemoryJournal::new(),
        };
        Self {
            metrics: Arc::new(metrics),
            due_date: Arc::new(due_date),
            diapers: Arc::new(diapers),
            journal: Arc::new(journal),
            clock: fixed_clock(story_now()),
            live: false,
        }
    }

    /// Every service backed by one remote client.
    pub(crate) fn live<S>(service: Arc<S>, clock: Clock) -> Self
    where
        S: MetricsService + DueDateService + DiaperService + JournalService + 'static,
    {
        Self {
            metrics: service.clone(),
            due_date: service.clone(),
            diapers: service.clone(),
            journal: service,
            clock,
            live: true,
        }
    }
}

fn concerning_changes() -> Vec<bloom_api_models::DiaperLog> {
    let mut watery = diaper_log(1, DiaperType::Dirty, 1);
    watery.color = Some(StoolColor::Green);
    watery.consistency = Some(StoolConsistency::Watery);
    watery.notes = Some("Third watery stool today".to_string());
    let mut red = diaper_log(2, DiaperType::Both, 3);
    red.color = Some(StoolColor::Red);
    red.consistency = Some(StoolConsistency::Pasty);
    vec![watery, red, diaper_log(3, DiaperType::Wet, 5)]
}

const fn diaper_label(kind: DiaperType) -> &'static str {
    match kind {
        DiaperType::Wet => "wet",
        DiaperType::Dirty => "dirty",
        DiaperType::Both => "both",
    }
}

/// Play one story and report the resulting state.
pub(crate) async fn play(scenario: Scenario, stage: &Stage) -> StoryReport {
    info!(scenario = scenario.name(), live = stage.live, "playing story");
    let mut report = StoryReport::new(scenario.name(), scenario.tool());
    report.fact("backend", if stage.live { "live" } else { "mock" });
    match scenario {
        Scenario::BmiDefault
        | Scenario::BmiSaved
        | Scenario::BmiError
        | Scenario::BmiOffline => {
            play_bmi(stage, &mut report).await;
        }
        Scenario::DueDateEmpty
        | Scenario::DueDateFirstTrimester
        | Scenario::DueDateSecondTrimester
        | Scenario::DueDateThirdTrimester
        | Scenario::DueDateFullTerm => play_due_date(stage, &mut report).await,
        Scenario::DiaperEmpty | Scenario::DiaperDay | Scenario::DiaperConcerning => {
            play_diaper(stage, &mut report).await;
        }
        Scenario::JournalEmpty | Scenario::JournalFull | Scenario::JournalSearch => {
            play_journal(scenario, stage, &mut report).await;
        }
    }
    report
}

async fn play_bmi(stage: &Stage, report: &mut StoryReport) {
    let mut controller = BmiController::new(stage.metrics.clone());
    report
        .outcome("load", controller.load().await)
        .optional("load error", controller.state().error.as_deref());

    if !stage.live && controller.state().saved.is_empty() {
        controller.dispatch(BmiAction::SetWeight("60".into())).await;
        controller.dispatch(BmiAction::SetHeight("165".into())).await;
        report.outcome("calculate", controller.dispatch(BmiAction::Calculate).await);
    }

    let state = controller.state();
    let form = &state.form;
    report
        .fact("weight", format!("{} {}", form.weight, form.weight_unit.as_str()))
        .fact("height", format!("{} {}", form.height, form.height_unit.as_str()))
        .optional("bmi", state.bmi)
        .optional("category", state.category().map(|category| category.label()))
        .optional(
            "recommendation",
            state
                .category()
                .map(|category| category.pregnancy_recommendation()),
        )
        .fact("saved entries", state.saved.len())
        .optional("error", state.error.as_deref());
}

async fn play_due_date(stage: &Stage, report: &mut StoryReport) {
    let mut controller = DueDateController::new(stage.due_date.clone(), stage.clock.clone());
    report.outcome("load", controller.load().await);

    let state = controller.state();
    report.optional("lmp", (!state.lmp.is_empty()).then_some(state.lmp.as_str()));
    match &state.result {
        Some(pregnancy) => {
            report
                .fact("due date", pregnancy.due_date)
                .fact("gestation", format!("{}w {}d", pregnancy.weeks, pregnancy.days))
                .fact("trimester", pregnancy.trimester.label())
                .fact("days remaining", pregnancy.days_remaining)
                .fact("progress", format!("{:.0}%", pregnancy.progress_percent))
                .fact("full term", pregnancy.is_full_term());
        }
        None => {
            report.fact("result", "no saved calculation");
        }
    }
}

async fn play_diaper(stage: &Stage, report: &mut StoryReport) {
    let mut controller = DiaperController::new(stage.diapers.clone(), stage.clock.clone());
    report.outcome("load", controller.load().await);

    if !stage.live {
        controller
            .dispatch(DiaperAction::SetNotes("Logged from the stories runner".into()))
            .await;
        report.outcome("log change", controller.dispatch(DiaperAction::Submit).await);
    }

    let today = controller.today();
    let state = controller.state();
    let attention = state
        .entries
        .iter()
        .filter(|entry| needs_attention(entry))
        .count();
    report
        .fact("entries", state.entries.len())
        .fact("today", format!("{} total, {} wet, {} dirty", today.total, today.wet, today.dirty))
        .optional(
            "last change",
            state
                .last_change()
                .map(|entry| format!("{} at {}", diaper_label(entry.diaper_type), entry.occurred_at)),
        )
        .fact("needs attention", attention)
        .optional("error", state.error.as_deref());
}

async fn play_journal(scenario: Scenario, stage: &Stage, report: &mut StoryReport) {
    let mut controller = JournalController::new(stage.journal.clone());
    let load = controller.load().await;
    report
        .outcome("albums load", load.albums)
        .outcome("notes load", load.notes);

    if scenario == Scenario::JournalSearch {
        controller
            .dispatch(JournalAction::SetTab(JournalTab::Notes))
            .await;
        controller
            .dispatch(JournalAction::SetQuery("milestone".into()))
            .await;
    }

    let state = controller.state();
    let photos: usize = state.albums.iter().map(|album| album.photos.len()).sum();
    report
        .fact("tab", state.tab.label())
        .optional("query", (!state.query.is_empty()).then_some(state.query.as_str()))
        .fact("albums", state.albums.len())
        .fact("photos", photos)
        .fact("notes", state.notes.len())
        .fact("visible albums", state.visible_albums().len())
        .fact("visible notes", state.visible_notes().len());
}
