//! File operations driven through the editor
mod common;

use common::{ScriptedFrontend, editor_with_config};
use tokio::sync::mpsc;
use vertex_ideas::Action;
use vertex_ideas::document::{AUTOSAVE_INTERVAL, AutosaveTick, DocumentState, spawn_autosave_timer};
use vertex_ideas::ui::UnsavedChoice;

#[tokio::test]
async fn save_then_open_round_trips_exact_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let text = "first line\r\n\tsecond line ünïcode\n\nno trailing newline";

    let mut editor = editor_with_config(dir.path().join("config.toml"));
    let mut frontend = ScriptedFrontend::new().save_path(&path);
    editor
        .execute(
            Action::Insert {
                offset: 0,
                text: text.to_string(),
            },
            &mut frontend,
        )
        .await;
    editor.execute(Action::Save, &mut frontend).await;

    assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    assert_eq!(frontend.infos, vec!["File saved successfully!".to_string()]);
    assert_eq!(editor.document().state(), DocumentState::Open(path.clone()));
    assert_eq!(frontend.titles.last().unwrap(), "Vertex Ideas - notes.txt");

    let mut reopened = editor_with_config(dir.path().join("config.toml"));
    let mut frontend = ScriptedFrontend::new().open_path(&path);
    reopened.execute(Action::Open, &mut frontend).await;
    assert_eq!(reopened.document().text(), text);
    assert!(!reopened.document().is_modified());
}

#[tokio::test]
async fn save_as_adds_default_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_with_config(dir.path().join("config.toml"));
    let mut frontend = ScriptedFrontend::new().save_path(dir.path().join("draft"));

    editor
        .execute(Action::Type("draft text".to_string()), &mut frontend)
        .await;
    editor.execute(Action::SaveAs, &mut frontend).await;

    let saved = dir.path().join("draft.txt");
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "draft text");
    assert_eq!(editor.document().path(), Some(saved.as_path()));
}

#[tokio::test]
async fn cancelled_save_as_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_with_config(dir.path().join("config.toml"));
    let mut frontend = ScriptedFrontend::new();

    editor
        .execute(Action::Type("unsaved".to_string()), &mut frontend)
        .await;
    editor.execute(Action::SaveAs, &mut frontend).await;

    assert_eq!(editor.document().path(), None);
    assert!(editor.document().is_modified());
    assert!(frontend.infos.is_empty());
    assert!(frontend.errors.is_empty());
}

#[tokio::test]
async fn failed_open_reports_and_keeps_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_with_config(dir.path().join("config.toml"));
    let mut frontend = ScriptedFrontend::new().open_path(dir.path().join("missing.txt"));

    editor
        .execute(Action::Type("keep me".to_string()), &mut frontend)
        .await;
    editor.execute(Action::Open, &mut frontend).await;

    // The buffer was modified, so the guard asked first and got Cancel.
    assert_eq!(frontend.unsaved_prompts, 1);
    assert_eq!(editor.document().text(), "keep me");

    let mut frontend = ScriptedFrontend::new()
        .answer_unsaved(UnsavedChoice::Discard)
        .open_path(dir.path().join("missing.txt"));
    editor.execute(Action::Open, &mut frontend).await;

    assert_eq!(frontend.errors.len(), 1);
    assert!(frontend.errors[0].contains("missing.txt"));
    assert_eq!(editor.document().text(), "keep me");
    assert_eq!(editor.document().path(), None);
}

#[tokio::test]
async fn failed_save_keeps_previous_path() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.txt");
    let bad = dir.path().join("no-such-dir").join("bad.txt");

    let mut editor = editor_with_config(dir.path().join("config.toml"));
    let mut frontend = ScriptedFrontend::new().save_path(&good).save_path(&bad);
    editor
        .execute(Action::Type("text".to_string()), &mut frontend)
        .await;
    editor.execute(Action::SaveAs, &mut frontend).await;
    editor.execute(Action::SaveAs, &mut frontend).await;

    assert_eq!(frontend.errors.len(), 1);
    assert_eq!(editor.document().path(), Some(good.as_path()));
}

#[tokio::test]
async fn unsaved_guard_cancel_discard_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_with_config(dir.path().join("config.toml"));

    // Cancel: nothing happens.
    let mut frontend = ScriptedFrontend::new().answer_unsaved(UnsavedChoice::Cancel);
    editor
        .execute(Action::Type("draft".to_string()), &mut frontend)
        .await;
    editor.execute(Action::New, &mut frontend).await;
    assert_eq!(editor.document().text(), "draft");

    // Save, then continue with New.
    let saved = dir.path().join("draft.txt");
    let mut frontend = ScriptedFrontend::new()
        .answer_unsaved(UnsavedChoice::Save)
        .save_path(&saved);
    editor.execute(Action::New, &mut frontend).await;
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "draft");
    assert_eq!(editor.document().text(), "");
    assert_eq!(editor.document().state(), DocumentState::Untitled);

    // Save with a cancelled picker aborts the New.
    let mut frontend = ScriptedFrontend::new().answer_unsaved(UnsavedChoice::Save);
    editor
        .execute(Action::Type("second".to_string()), &mut frontend)
        .await;
    editor.execute(Action::New, &mut frontend).await;
    assert_eq!(editor.document().text(), "second");

    // Discard.
    let mut frontend = ScriptedFrontend::new().answer_unsaved(UnsavedChoice::Discard);
    editor.execute(Action::New, &mut frontend).await;
    assert_eq!(editor.document().text(), "");
}

#[tokio::test]
async fn clean_buffer_skips_the_guard() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_with_config(dir.path().join("config.toml"));
    let mut frontend = ScriptedFrontend::new();

    editor.execute(Action::New, &mut frontend).await;
    assert_eq!(frontend.unsaved_prompts, 0);
    assert_eq!(frontend.titles.last().unwrap(), "Vertex Ideas - New File");
}

#[tokio::test(start_paused = true)]
async fn autosave_writes_buffer_after_one_interval() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auto.txt");
    let mut editor = editor_with_config(dir.path().join("config.toml"));
    let mut frontend = ScriptedFrontend::new().save_path(&path);

    editor
        .execute(Action::Type("v1".to_string()), &mut frontend)
        .await;
    editor.execute(Action::Save, &mut frontend).await;
    editor
        .execute(Action::Type(" v2".to_string()), &mut frontend)
        .await;
    assert!(editor.document().is_modified());

    let (tx, mut ticks) = mpsc::unbounded_channel();
    let _timer = spawn_autosave_timer(AUTOSAVE_INTERVAL, tx);
    assert_eq!(ticks.recv().await, Some(AutosaveTick));

    assert!(editor.autosave_tick().await);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "v1 v2");
    assert!(!editor.document().is_modified());
}

#[tokio::test]
async fn autosave_skips_untitled_and_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_with_config(dir.path().join("config.toml"));
    let mut frontend = ScriptedFrontend::new();

    editor
        .execute(Action::Type("untitled".to_string()), &mut frontend)
        .await;
    assert!(!editor.autosave_tick().await);

    let path = dir.path().join("later.txt");
    let mut frontend = ScriptedFrontend::new()
        .save_path(&path)
        .edit_preferences_with(|dialog| {
            dialog.set_autosave(false);
            true
        });
    editor.execute(Action::Save, &mut frontend).await;
    editor.execute(Action::Preferences, &mut frontend).await;
    editor
        .execute(Action::Type(" more".to_string()), &mut frontend)
        .await;

    assert!(!editor.autosave_tick().await);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "untitled");
}
