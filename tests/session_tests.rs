//! Full terminal sessions over scripted input
mod common;

use common::editor_with_config;
use tokio::sync::mpsc;
use vertex_ideas::{TerminalFrontend, run_session};

async fn run(input: String, config: &std::path::Path) -> (vertex_ideas::Editor, String) {
    let mut editor = editor_with_config(config);
    let mut frontend = TerminalFrontend::new(input.as_bytes(), Vec::new());
    let (_tx, mut ticks) = mpsc::unbounded_channel();

    run_session(&mut editor, &mut frontend, &mut ticks)
        .await
        .unwrap();

    let output = String::from_utf8(frontend.into_output()).unwrap();
    (editor, output)
}

#[tokio::test]
async fn type_save_and_quit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.txt");
    let input = format!(
        "hello world\nthe the cat\n:saveas\n{}\n:quit\nnever read\n",
        path.display()
    );

    let (editor, output) = run(input, &dir.path().join("config.toml")).await;

    assert!(!editor.is_running());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "hello world\nthe the cat\n"
    );
    assert!(output.contains("File saved successfully!"));
    assert!(output.contains("Vertex Ideas - session.txt"));
}

#[tokio::test]
async fn preferences_form_clamps_and_applies() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let input = ":prefs\nfont 40\nspellcheck off\napply\n".to_string();

    let (editor, output) = run(input, &config).await;

    assert!(output.contains("using 32"));
    assert!(output.contains("| 32pt | spellcheck off |"));
    assert_eq!(editor.font_size(), 32);
    assert!(
        std::fs::read_to_string(&config)
            .unwrap()
            .contains(r#"spellcheck_enabled = "false""#)
    );
}

#[tokio::test]
async fn right_click_menu_from_the_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let input = "helo there\n:menu 1\n1\n".to_string();

    let (editor, output) = run(input, &dir.path().join("config.toml")).await;

    assert!(output.contains("Suggestions for 'helo':"));
    // Candidates are sorted, so the first one replaces the word.
    let first = editor.document().text().split(' ').next().unwrap().to_string();
    assert_ne!(first, "helo");
    assert!(editor.document().text().ends_with(" there\n"));
}

#[tokio::test]
async fn bad_command_is_reported_and_session_continues() {
    let dir = tempfile::tempdir().unwrap();
    let input = ":frobnicate\n:spans\nafter\n".to_string();

    let (editor, output) = run(input, &dir.path().join("config.toml")).await;

    assert!(output.contains("[Command] error: unknown command ':frobnicate'"));
    assert!(output.contains("[]"));
    assert_eq!(editor.document().text(), "after\n");
}
