use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{self, Write};

use clerk::catalog;
use clerk::dialogue::DialogueOrchestrator;
use clerk::intent::IntentClassifier;
use clerk::orders::MemoryOrderStore;
use clerk::respond::TemplateResponder;
use clerk::retrieval::Retriever;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Customer support assistant for online stores", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive support session
    Chat {
        /// Session identifier (isolates history and context)
        #[arg(long, default_value = "local")]
        session: String,
    },

    /// Ask a single question and print the reply
    Ask {
        question: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Chat { session } => chat(&session),
        Commands::Ask { question } => ask(&question),
    }
}

/// Wire the classifier, retriever, responder, and demo order store into
/// an orchestrator. All construction is explicit - no globals.
fn build_orchestrator() -> Result<DialogueOrchestrator> {
    let intents = catalog::intents()?;
    let responder = TemplateResponder::new(&intents);
    let classifier = IntentClassifier::new(intents);
    let retriever = Retriever::new(catalog::faqs()?);
    let orders = MemoryOrderStore::new(catalog::demo_orders()?);
    Ok(DialogueOrchestrator::new(
        classifier,
        retriever,
        Box::new(responder),
        Box::new(orders),
    ))
}

fn chat(session: &str) -> Result<()> {
    let mut orchestrator = build_orchestrator()?;

    println!("{}", "=".repeat(50));
    println!("Customer Support Assistant");
    println!("{}", "=".repeat(50));
    println!("Type 'quit' to exit\n");

    let stdin = io::stdin();
    loop {
        print!("{} ", "You:".cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "bye") {
            println!("{} Thank you for visiting. Goodbye!", "Bot:".green().bold());
            break;
        }

        let reply = orchestrator.process_input(session, input);
        println!("{} {}\n", "Bot:".green().bold(), reply);
    }

    Ok(())
}

fn ask(question: &str) -> Result<()> {
    let mut orchestrator = build_orchestrator()?;
    println!("{}", orchestrator.process_input("cli", question));
    Ok(())
}
