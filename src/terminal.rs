//! Interactive terminal driver for the chat surface.
//!
//! One rustyline loop per session: plain lines are chat turns, slash
//! commands handle the agent selector and quick actions. Agent output is
//! rendered through termimad; tool logs show as inline progress lines.

use std::io::Write as _;
use std::sync::Arc;

use crossterm::style::Stylize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use termimad::MadSkin;
use url::Url;
use uuid::Uuid;

use crate::agents::{self, AgentId};
use crate::prompts;
use crate::session::{LayoutStore, SPECIALIST_ROUTE, ToolLogEntry, ToolLogStatus};
use crate::surface::actions::LegalAnalysis;
use crate::surface::{QUICK_ACTIONS, SurfaceObserver};
use crate::wrapper::{Navigator, SessionWrapper};

struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, route: &str) {
        println!("{}", format!("→ {route}").dark_grey());
    }
}

struct TerminalObserver {
    skin: MadSkin,
    streamed: bool,
}

impl TerminalObserver {
    fn new() -> Self {
        Self {
            skin: MadSkin::default(),
            streamed: false,
        }
    }
}

impl SurfaceObserver for TerminalObserver {
    fn on_chunk(&mut self, content: &str) {
        self.streamed = true;
        print!("{content}");
        let _ = std::io::stdout().flush();
    }

    fn on_tool_logs(&mut self, logs: &[ToolLogEntry]) {
        if let Some(last) = logs.last() {
            let glyph = match last.status {
                ToolLogStatus::Processing => "⏳".to_string(),
                ToolLogStatus::Completed => "✓".green().to_string(),
            };
            println!("{} {}", glyph, last.message.as_str().dark_grey());
        }
    }

    fn on_analysis_card(&mut self, card: &str, _analysis: &LegalAnalysis) {
        println!();
        self.skin.print_text(card);
    }
}

fn print_agents(current: AgentId) {
    for descriptor in agents::CATALOG {
        let marker = if descriptor.id == current { "●" } else { " " };
        println!(
            "{marker} {}  {}",
            descriptor.id.as_str().bold(),
            descriptor.description.dark_grey()
        );
    }
}

fn print_help() {
    println!("/agents            list agents");
    println!("/switch <id>       switch the active agent");
    println!("/quick [n]         list quick actions, or run the n-th");
    println!("/quit              leave");
}

/// Run the terminal chat surface against a gateway.
pub async fn run_chat(gateway: Url, agent: Option<AgentId>) -> anyhow::Result<()> {
    let store = Arc::new(LayoutStore::new());
    let session = Uuid::new_v4().to_string();

    let mut wrapper = SessionWrapper::bind(store, session, SPECIALIST_ROUTE, gateway).await;
    let mut navigator = TerminalNavigator;
    if let Some(agent) = agent {
        wrapper.select_agent(agent, &mut navigator).await?;
    }

    let skin = MadSkin::default();
    skin.print_text(prompts::greeting_for(&wrapper.surface().agent()));
    println!();

    let mut editor = DefaultEditor::new()?;
    loop {
        let prompt = format!("{} > ", wrapper.surface().agent());
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(trimmed);

        match trimmed {
            "/quit" | "/exit" => break,
            "/help" => print_help(),
            "/agents" => print_agents(wrapper.surface().agent()),
            "/quick" => {
                for (index, action) in QUICK_ACTIONS.iter().enumerate() {
                    println!("{}. {}  {}", index + 1, action.label.bold(), action.prompt.dark_grey());
                }
            }
            _ if trimmed.starts_with("/switch ") => {
                let raw = trimmed.trim_start_matches("/switch ").trim();
                match AgentId::parse(raw) {
                    Ok(agent) => {
                        let switched = wrapper.select_agent(agent, &mut navigator).await?;
                        if switched {
                            println!("{}", format!("Agente ativo: {agent}").green());
                        }
                    }
                    Err(err) => println!("{}", err.to_string().red()),
                }
            }
            _ if trimmed.starts_with("/quick ") => {
                let raw = trimmed.trim_start_matches("/quick ").trim();
                let action = raw
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| QUICK_ACTIONS.get(i));
                match action {
                    Some(action) => run_turn_with_indicator(&mut wrapper, action.prompt).await,
                    None => println!("{}", "Ação rápida desconhecida".red()),
                }
            }
            _ if trimmed.starts_with('/') => {
                println!("{}", "Comando desconhecido; /help lista os comandos".red());
            }
            _ => run_turn_with_indicator(&mut wrapper, trimmed).await,
        }
    }

    Ok(())
}

/// Send one turn; the prompt itself is the disabled send control, since the
/// loop does not read input again until the turn finishes or errors.
async fn run_turn_with_indicator(wrapper: &mut SessionWrapper, text: &str) {
    println!("{}", "● Analisando".green());
    let mut observer = TerminalObserver::new();
    match wrapper.surface_mut().send(text, &mut observer).await {
        Ok(_) => {
            if observer.streamed {
                println!();
            }
        }
        Err(err) => println!("{}", err.to_string().red()),
    }
}
