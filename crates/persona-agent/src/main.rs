//! A terminal chat host for the persona agent.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use persona_agent::SessionBuilder;
use persona_agent::config::AppConfig;
use persona_agent::docs::Materials;
use persona_agent::notify::{LogOnly, Notifier, Pushover};
use persona_agent_core::TurnError;
use persona_agent_openai_model::{OpenAIConfigBuilder, OpenAIProvider};
use tokio::io::{self, AsyncBufReadExt};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Some(config) = AppConfig::from_env() else {
        eprintln!("OPENAI_API_KEY environment variable is not set");
        return;
    };
    let AppConfig {
        api_key,
        model,
        base_url,
        persona,
        materials_dir,
        pushover,
    } = config;

    let provider_config = OpenAIConfigBuilder::with_api_key(api_key)
        .with_model(model)
        .with_base_url(base_url)
        .build();
    let model_provider = OpenAIProvider::new(provider_config);

    let notifier: Arc<dyn Notifier> = match pushover {
        Some(credentials) => {
            Arc::new(Pushover::new(credentials.user, credentials.token))
        }
        None => {
            info!("pushover is not configured, records will only be logged");
            Arc::new(LogOnly)
        }
    };

    let mut session = SessionBuilder::with_model_provider(model_provider)
        .with_persona(persona.as_str())
        .with_documents(Materials::new(materials_dir))
        .with_notifier(notifier)
        .build();

    println!(
        "{}",
        format!(
            "Chatting as {persona}. Ask about career, background, skills \
             and experience."
        )
        .bright_black()
    );

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(progress_style.clone());
        spinner.set_message("🤔 Thinking...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = session.chat(line).await;
        spinner.finish_and_clear();

        match result {
            Ok(reply) => {
                println!(
                    "{}🤖 {}",
                    BAR_CHAR.bright_cyan(),
                    reply.bright_white()
                );
            }
            Err(err @ TurnError::RoundLimitExceeded { .. }) => {
                warn!("turn aborted: {err}");
                println!(
                    "{}⚠️  {}",
                    BAR_CHAR.bright_yellow(),
                    "Sorry, I couldn't complete that request. Please try \
                     rephrasing."
                        .bright_white()
                );
            }
            Err(err) => {
                error!("turn failed: {err}");
                println!(
                    "{}⚠️  {}",
                    BAR_CHAR.bright_red(),
                    "Something went wrong while talking to the model. \
                     Please try again."
                        .bright_white()
                );
            }
        }
    }
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
