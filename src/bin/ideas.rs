use std::sync::Arc;

use anyhow::Result;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use vertex_ideas::config::Config;
use vertex_ideas::document::spawn_autosave_timer;
use vertex_ideas::{Editor, TerminalFrontend, WordListDictionary, run_session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    log::info!("Starting Vertex Ideas");

    let mut dictionary = WordListDictionary::builtin();
    if let Some(path) = &config.dictionary {
        dictionary.load_file(path)?;
    }

    log::debug!("Settings file: {}", config.config_path.display());
    let mut editor = Editor::with_defaults(&config.config_path, Arc::new(dictionary));

    let (tx, mut ticks) = mpsc::unbounded_channel();
    let timer = spawn_autosave_timer(config.autosave_interval, tx);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut frontend = TerminalFrontend::new(stdin, std::io::stdout());

    if let Some(path) = &config.file {
        editor.open_initial(path, &mut frontend).await;
    }

    let result = run_session(&mut editor, &mut frontend, &mut ticks).await;
    timer.abort();
    result
}
