//! The sheet's operation boundary.
//!
//! Every user action (save, load, import, cleanup, autosave) goes through
//! [`SheetController`]. Failures never reach the caller as errors: each one
//! is logged and shown to the user as an auto-dismissing notification.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use herosheet_domain::{CharacterDocument, CharacterId, CharacterSummary};

use super::{DocumentAssembler, RestoreReport, SheetError, SheetLoader};
use crate::infrastructure::debounce::Debouncer;
use crate::infrastructure::ports::{ClockPort, Notification, NotifierPort};
use crate::infrastructure::settings::SheetSettings;
use crate::stores::{CharacterStore, SaveAction, SaveOutcome, SheetSession};

pub struct SheetController {
    inner: Arc<SheetInner>,
    notes_debouncer: Debouncer,
}

/// State shared with background tasks (debounced and periodic saves).
struct SheetInner {
    session: Mutex<SheetSession>,
    store: Arc<CharacterStore>,
    assembler: DocumentAssembler,
    loader: SheetLoader,
    notifier: Arc<dyn NotifierPort>,
    settings: SheetSettings,
    dirty: AtomicBool,
}

impl SheetController {
    pub fn new(
        session: SheetSession,
        store: Arc<CharacterStore>,
        clock: Arc<dyn ClockPort>,
        notifier: Arc<dyn NotifierPort>,
        settings: SheetSettings,
    ) -> Self {
        let notes_debouncer = Debouncer::new(settings.notes_debounce());
        let inner = SheetInner {
            session: Mutex::new(session),
            store,
            assembler: DocumentAssembler::new(clock, settings.clone()),
            loader: SheetLoader::new(settings.clone()),
            notifier,
            settings,
            dirty: AtomicBool::new(false),
        };
        Self {
            inner: Arc::new(inner),
            notes_debouncer,
        }
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Apply a user edit to the sheet and mark it unsaved.
    pub async fn edit<R>(&self, f: impl FnOnce(&mut SheetSession) -> R) -> R {
        let mut session = self.inner.session.lock().await;
        let result = f(&mut session);
        self.inner.dirty.store(true, Ordering::SeqCst);
        result
    }

    /// Read the sheet without marking it unsaved.
    pub async fn read<R>(&self, f: impl FnOnce(&SheetSession) -> R) -> R {
        let session = self.inner.session.lock().await;
        f(&session)
    }

    /// A keystroke in the notes editor. Saves once typing pauses.
    pub async fn edit_notes(&self, text: impl Into<String>) {
        let accepted = self.inner.session.lock().await.notes.edit(text);
        if !accepted {
            return;
        }
        self.inner.dirty.store(true, Ordering::SeqCst);

        let inner = Arc::clone(&self.inner);
        self.notes_debouncer.schedule(async move {
            inner.autosave().await;
        });
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.inner.dirty.load(Ordering::SeqCst)
    }

    /// Empty the sheet.
    pub async fn clear_sheet(&self) {
        self.notes_debouncer.cancel();
        self.inner.session.lock().await.clear();
        self.inner.dirty.store(false, Ordering::SeqCst);
        tracing::info!("Sheet cleared");
        self.inner.notify(Notification::info(
            "Character sheet cleared",
            self.inner.settings.notification_dismiss(),
        ));
    }

    // =========================================================================
    // Saving
    // =========================================================================

    pub async fn save(&self) -> Option<SaveOutcome> {
        self.notes_debouncer.cancel();
        match self.inner.save().await {
            Ok(outcome) => {
                let verb = match outcome.action {
                    SaveAction::Created => "saved",
                    SaveAction::Updated => "updated",
                };
                self.inner.notify_success(format!(
                    "Character \"{}\" {} successfully!",
                    outcome.character_name, verb
                ));
                Some(outcome)
            }
            Err(e) => {
                self.inner.notify_failure(&e);
                None
            }
        }
    }

    /// Save quietly if anything changed since the last save.
    pub async fn autosave_tick(&self) -> Option<SaveOutcome> {
        self.inner.autosave().await
    }

    /// Run [`Self::autosave_tick`] on the configured interval until the
    /// returned handle is aborted.
    pub fn spawn_autosave(&self) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let period = inner.settings.autosave_interval();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                inner.autosave().await;
            }
        })
    }

    // =========================================================================
    // Loading
    // =========================================================================

    pub async fn list_characters(&self) -> Vec<CharacterSummary> {
        self.inner.store.list_all().await
    }

    pub async fn load_by_id(&self, id: &CharacterId) -> Option<RestoreReport> {
        let result = self
            .inner
            .store
            .load_by_id(id)
            .await
            .map_err(SheetError::from_read);
        self.finish_load(result).await
    }

    pub async fn load_by_name(&self, name: &str) -> Option<RestoreReport> {
        let result = self
            .inner
            .store
            .load_by_name(name)
            .await
            .map_err(SheetError::from_read);
        self.finish_load(result).await
    }

    /// Load a character from the text of an exported file.
    pub async fn import_json(&self, text: &str) -> Option<RestoreReport> {
        let result = serde_json::from_str::<CharacterDocument>(text)
            .map_err(|e| SheetError::MalformedInput(e.to_string()));
        self.finish_load(result).await
    }

    async fn finish_load(
        &self,
        document: Result<CharacterDocument, SheetError>,
    ) -> Option<RestoreReport> {
        let document = match document {
            Ok(document) => document,
            Err(e) => {
                self.inner.notify_failure(&e);
                return None;
            }
        };

        self.notes_debouncer.cancel();
        let report = {
            let mut session = self.inner.session.lock().await;
            self.inner.loader.restore(&mut session, &document)
        };
        self.inner.dirty.store(false, Ordering::SeqCst);

        let name = document
            .display_character_name()
            .unwrap_or_else(|| CharacterSummary::UNKNOWN_NAME.to_string());
        tracing::info!(
            character_id = ?document.character_id,
            character_name = %name,
            complete = report.is_complete(),
            "Character loaded"
        );

        if report.is_complete() {
            self.inner
                .notify_success(format!("Character \"{name}\" loaded successfully!"));
        } else {
            let sections: Vec<&str> = report.section_failures.iter().map(|f| f.section).collect();
            self.inner.notify(Notification::info(
                format!(
                    "Character \"{name}\" loaded, but some data could not be restored: {}",
                    sections.join(", ")
                ),
                self.inner.settings.notification_dismiss(),
            ));
        }
        Some(report)
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Remove older duplicates of every character name.
    pub async fn cleanup_duplicates(&self) -> Option<usize> {
        match self.inner.store.deduplicate().await {
            Ok(0) => Some(0),
            Ok(removed) => {
                self.inner
                    .notify_success(format!("Cleaned up {removed} duplicate characters"));
                Some(removed)
            }
            Err(e) => {
                self.inner.notify_failure(&SheetError::Storage(e));
                None
            }
        }
    }
}

impl SheetInner {
    async fn save(&self) -> Result<SaveOutcome, SheetError> {
        // Edits made while the write is in flight mark the sheet dirty again.
        self.dirty.store(false, Ordering::SeqCst);
        let document = {
            let mut session = self.session.lock().await;
            self.assembler.assemble(&mut session)
        };

        self.store.save(document).await.map_err(|e| {
            self.dirty.store(true, Ordering::SeqCst);
            SheetError::SaveFailed(e)
        })
    }

    async fn autosave(&self) -> Option<SaveOutcome> {
        if !self.dirty.load(Ordering::SeqCst) {
            return None;
        }
        match self.save().await {
            Ok(outcome) => {
                tracing::debug!(character_id = %outcome.character_id, "Autosaved character");
                Some(outcome)
            }
            Err(e) => {
                self.notify_failure(&e);
                None
            }
        }
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    fn notify_success(&self, message: String) {
        self.notify(Notification::success(
            message,
            self.settings.notification_dismiss(),
        ));
    }

    fn notify_failure(&self, error: &SheetError) {
        tracing::warn!(error = %error, "Sheet operation failed");
        self.notify(Notification::error(
            error.to_string(),
            self.settings.notification_dismiss(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{SequentialRandom, SteppingClock};
    use crate::infrastructure::memory_blob::InMemoryBlobStore;
    use crate::infrastructure::ports::{MockNotifierPort, NotificationLevel};
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    /// Keeps every notification for later inspection.
    #[derive(Default)]
    struct RecordingNotifier {
        seen: std::sync::Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<(NotificationLevel, String)> {
            self.seen
                .lock()
                .unwrap()
                .iter()
                .map(|n| (n.level, n.message.clone()))
                .collect()
        }
    }

    impl NotifierPort for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }

    fn controller_with(
        blob: Arc<InMemoryBlobStore>,
        notifier: Arc<dyn NotifierPort>,
    ) -> SheetController {
        let clock: Arc<dyn ClockPort> = Arc::new(SteppingClock::starting_at(
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        ));
        let store = Arc::new(CharacterStore::new(
            blob,
            clock.clone(),
            Arc::new(SequentialRandom::default()),
        ));
        SheetController::new(
            SheetSession::default(),
            store,
            clock,
            notifier,
            SheetSettings::default(),
        )
    }

    #[tokio::test]
    async fn save_then_load_by_name_restores_the_sheet() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = controller_with(blob, notifier.clone());

        controller
            .edit(|s| {
                s.fields.write("character-name", "Aria");
                s.fields.write("class", "Fury");
                s.skills.add_skill("Climb")
            })
            .await
            .unwrap();
        let first = controller.save().await.unwrap();
        let second = controller.save().await.unwrap();
        assert_eq!(first.character_id, second.character_id);

        controller.clear_sheet().await;
        let report = controller.load_by_name("Aria").await.unwrap();

        assert!(report.is_complete());
        let (class, has_climb) = controller
            .read(|s| (s.fields.read("class"), s.skills.contains("Climb")))
            .await;
        assert_eq!(class.unwrap().as_str(), Some("Fury"));
        assert!(has_climb);

        assert_eq!(
            notifier.messages(),
            vec![
                (NotificationLevel::Success, "Character \"Aria\" saved successfully!".into()),
                (NotificationLevel::Success, "Character \"Aria\" updated successfully!".into()),
                (NotificationLevel::Info, "Character sheet cleared".into()),
                (NotificationLevel::Success, "Character \"Aria\" loaded successfully!".into()),
            ]
        );
    }

    #[tokio::test]
    async fn missing_character_is_notified() {
        let mut notifier = MockNotifierPort::new();
        notifier
            .expect_notify()
            .withf(|n| {
                n.level == NotificationLevel::Error
                    && n.message == "Character \"Nobody\" not found!"
                    && n.dismiss_after == Duration::from_secs(5)
            })
            .times(1)
            .return_const(());
        let controller = controller_with(Arc::new(InMemoryBlobStore::new()), Arc::new(notifier));

        assert!(controller.load_by_name("Nobody").await.is_none());
    }

    #[tokio::test]
    async fn rejected_write_is_notified_and_sheet_stays_dirty() {
        let blob = Arc::new(InMemoryBlobStore::new());
        blob.set_fail_writes(true);
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = controller_with(blob, notifier.clone());

        controller.edit(|s| s.fields.write("character-name", "Aria")).await;
        assert!(controller.save().await.is_none());

        assert!(controller.has_unsaved_changes());
        assert_eq!(
            notifier.messages(),
            vec![(NotificationLevel::Error, "Failed to save character data!".into())]
        );
    }

    #[tokio::test]
    async fn malformed_import_is_notified() {
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = controller_with(Arc::new(InMemoryBlobStore::new()), notifier.clone());

        assert!(controller.import_json("{ not json").await.is_none());
        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, NotificationLevel::Error);
        assert!(messages[0].1.starts_with("Failed to load character data"));
    }

    #[tokio::test]
    async fn import_tolerates_extra_and_missing_keys() {
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = controller_with(Arc::new(InMemoryBlobStore::new()), notifier.clone());

        let report = controller
            .import_json(r#"{"character-name": "Borin", "victoryCount": 3, "somethingNew": [1, 2]}"#)
            .await
            .unwrap();

        assert_eq!(report.unknown_fields, vec!["somethingNew".to_string()]);
        let victories = controller.read(|s| s.fields.victory_count()).await;
        assert_eq!(victories, 3);
        assert_eq!(
            notifier.messages().last().unwrap().1,
            "Character \"Borin\" loaded successfully!"
        );
    }

    #[tokio::test]
    async fn autosave_only_runs_when_dirty() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let controller = controller_with(blob.clone(), Arc::new(RecordingNotifier::default()));

        assert!(controller.autosave_tick().await.is_none());
        assert_eq!(blob.contents().await, None);

        controller.edit(|s| s.fields.write("character-name", "Aria")).await;
        assert!(controller.autosave_tick().await.is_some());
        assert!(!controller.has_unsaved_changes());
        assert!(controller.autosave_tick().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn notes_typing_saves_once_after_pause() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let controller = controller_with(blob.clone(), Arc::new(RecordingNotifier::default()));
        controller
            .edit(|s| {
                s.fields.write("character-name", "Aria");
                s.notes.add_page("Journal")
            })
            .await
            .unwrap();
        controller.autosave_tick().await.unwrap();

        for text in ["D", "Da", "Day one"] {
            controller.edit_notes(text).await;
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        let before: serde_json::Value =
            serde_json::from_str(&blob.contents().await.unwrap()).unwrap();
        let entry = before["characters"].as_object().unwrap().values().next().unwrap().clone();
        assert_eq!(entry["notesPages"][0]["content"], "");

        tokio::time::sleep(Duration::from_millis(1000)).await;
        let after: serde_json::Value =
            serde_json::from_str(&blob.contents().await.unwrap()).unwrap();
        let entry = after["characters"].as_object().unwrap().values().next().unwrap().clone();
        assert_eq!(entry["notesPages"][0]["content"], "Day one");
    }

    #[tokio::test(start_paused = true)]
    async fn periodic_autosave_picks_up_edits() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let controller = controller_with(blob.clone(), Arc::new(RecordingNotifier::default()));
        let handle = controller.spawn_autosave();

        controller.edit(|s| s.fields.write("character-name", "Aria")).await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(blob.contents().await, None);

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert!(blob.contents().await.is_some());
        handle.abort();
    }

    #[tokio::test]
    async fn cleanup_reports_removed_duplicates() {
        let blob = Arc::new(InMemoryBlobStore::with_contents(
            r#"{"characters": {
                "character-a": {"characterName": "Aria", "savedAt": "2024-01-01T00:00:00.000Z"},
                "character-b": {"characterName": "Aria", "savedAt": "2024-02-01T00:00:00.000Z"}
            }}"#,
        ));
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = controller_with(blob, notifier.clone());

        assert_eq!(controller.cleanup_duplicates().await, Some(1));
        assert_eq!(controller.cleanup_duplicates().await, Some(0));
        assert_eq!(
            notifier.messages(),
            vec![(NotificationLevel::Success, "Cleaned up 1 duplicate characters".into())]
        );
        assert_eq!(controller.list_characters().await.len(), 1);
    }
}
