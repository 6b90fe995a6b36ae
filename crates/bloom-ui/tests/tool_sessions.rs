//! Full user sessions for each tool, driven through controller actions.

use std::sync::Arc;

use bloom_api_models::{DiaperType, NewPhoto, PhotoUpdate, StoolColor};
use bloom_test_support::fixtures::{sample_diaper_logs, story_now};
use bloom_test_support::mocks::{
    InMemoryDiapers, InMemoryDueDate, InMemoryJournal, InMemoryMetrics,
};
use bloom_ui::features::bmi::actions::BmiAction;
use bloom_ui::features::bmi::{BmiCategory, BmiController, HeightUnit, WeightUnit};
use bloom_ui::features::diaper::DiaperController;
use bloom_ui::features::diaper::actions::DiaperAction;
use bloom_ui::features::due_date::actions::DueDateAction;
use bloom_ui::features::due_date::{DueDateController, Trimester};
use bloom_ui::features::journal::JournalController;
use bloom_ui::features::journal::actions::JournalAction;
use bloom_ui::{SyncOutcome, fixed_clock};

#[tokio::test]
async fn bmi_session_in_imperial_units() {
    let metrics = Arc::new(InMemoryMetrics::new());
    let mut controller = BmiController::new(metrics.clone());
    assert_eq!(controller.load().await, SyncOutcome::Applied);
    assert!(controller.state().saved.is_empty());

    for action in [
        BmiAction::SetWeight("150".into()),
        BmiAction::SetWeightUnit(WeightUnit::Pounds),
        BmiAction::SetHeight("5.6".into()),
        BmiAction::SetHeightUnit(HeightUnit::Feet),
    ] {
        assert!(!action.is_remote());
        assert_eq!(controller.dispatch(action).await, SyncOutcome::Skipped);
    }
    assert_eq!(
        controller.dispatch(BmiAction::Calculate).await,
        SyncOutcome::Applied
    );
    assert_eq!(controller.state().bmi, Some(23.5));
    assert_eq!(controller.state().category(), Some(BmiCategory::HealthyWeight));

    let created = metrics.create_calls();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].unit, "lbs/ft");

    let id = controller.state().saved[0].id;
    assert_eq!(
        controller.dispatch(BmiAction::Delete(id)).await,
        SyncOutcome::Applied
    );
    assert!(controller.state().saved.is_empty());
    assert!(metrics.records().is_empty());
}

#[tokio::test]
async fn due_date_survives_a_reload() {
    let service = Arc::new(InMemoryDueDate::new());
    let clock = fixed_clock(story_now());

    let mut first = DueDateController::new(service.clone(), clock.clone());
    assert_eq!(first.load().await, SyncOutcome::Rejected);
    first
        .dispatch(DueDateAction::SetLmp("2025-01-01".into()))
        .await;
    assert_eq!(
        first.dispatch(DueDateAction::Calculate).await,
        SyncOutcome::Applied
    );
    let pregnancy = first.state().result.expect("timeline");
    assert_eq!((pregnancy.weeks, pregnancy.days), (9, 5));
    assert_eq!(pregnancy.trimester, Trimester::First);
    assert_eq!(service.saved().map(|log| log.weeks_pregnant), Some(9));

    let mut second = DueDateController::new(service, clock);
    assert_eq!(second.load().await, SyncOutcome::Applied);
    assert_eq!(second.state().lmp, "2025-01-01");
    assert_eq!(second.state().result, Some(pregnancy));
}

#[tokio::test]
async fn diaper_entry_can_be_corrected_then_removed() {
    let service = Arc::new(InMemoryDiapers::with_entries(sample_diaper_logs()));
    let mut controller = DiaperController::new(service.clone(), fixed_clock(story_now()));
    assert_eq!(controller.load().await, SyncOutcome::Applied);

    controller.dispatch(DiaperAction::Edit(4)).await;
    assert_eq!(controller.state().editing, Some(4));
    controller
        .dispatch(DiaperAction::SetType(DiaperType::Both))
        .await;
    controller
        .dispatch(DiaperAction::SetColor(Some(StoolColor::Yellow)))
        .await;
    assert_eq!(
        controller.dispatch(DiaperAction::Submit).await,
        SyncOutcome::Applied
    );
    assert!(controller.state().editing.is_none());
    let edited = service
        .entries()
        .into_iter()
        .find(|entry| entry.id == Some(4))
        .expect("entry kept");
    assert_eq!(edited.diaper_type, DiaperType::Both);
    assert_eq!(edited.color, Some(StoolColor::Yellow));
    assert_eq!(controller.today().dirty, 4);

    assert_eq!(
        controller.dispatch(DiaperAction::Delete(Some(4))).await,
        SyncOutcome::Applied
    );
    assert_eq!(controller.state().entries.len(), 5);
    assert_eq!(controller.today().total, 4);
}

#[tokio::test]
async fn journal_album_and_note_lifecycle() {
    let service = Arc::new(InMemoryJournal::new());
    let mut controller = JournalController::new(service.clone());
    controller.load().await;

    controller.album_form_mut().title = "Bath Time".into();
    assert_eq!(
        controller.dispatch(JournalAction::SubmitAlbum).await,
        SyncOutcome::Applied
    );
    let album_id = controller.state().albums[0].id.clone();

    let photos = vec![NewPhoto {
        file_url: "https://cdn.bloom.test/photos/bath.png".into(),
        name: "Splash".into(),
        notes: None,
    }];
    assert_eq!(
        controller
            .dispatch(JournalAction::AddPhotos {
                album_id: album_id.clone(),
                photos,
            })
            .await,
        SyncOutcome::Applied
    );
    let photo_id = controller.state().albums[0].photos[0].id.clone();

    let update = PhotoUpdate {
        name: Some("First Bath".into()),
        ..PhotoUpdate::default()
    };
    assert_eq!(
        controller
            .dispatch(JournalAction::UpdatePhoto {
                photo_id: photo_id.clone(),
                update,
            })
            .await,
        SyncOutcome::Applied
    );
    assert_eq!(controller.state().albums[0].photos[0].name, "First Bath");

    assert_eq!(
        controller.dispatch(JournalAction::DeletePhoto(photo_id)).await,
        SyncOutcome::Applied
    );
    assert!(controller.state().albums[0].photos.is_empty());

    let form = controller.note_form_mut();
    form.title = "Giggles".into();
    form.content = "First real laugh during bath time".into();
    form.tags = "milestone, bath".into();
    assert_eq!(
        controller.dispatch(JournalAction::SubmitNote).await,
        SyncOutcome::Applied
    );
    assert_eq!(service.notes().len(), 1);

    controller
        .dispatch(JournalAction::SetQuery("BATH".into()))
        .await;
    assert_eq!(controller.state().visible_albums().len(), 1);
    assert_eq!(controller.state().visible_notes().len(), 1);

    assert_eq!(
        controller.dispatch(JournalAction::DeleteAlbum(album_id)).await,
        SyncOutcome::Applied
    );
    assert!(service.albums().is_empty());
}
