//! Simple smoke test for OpenAiBrain.
//!
//! Run with: cargo run -p openai-brain --example test_chat
//! Or with a custom prompt: cargo run -p openai-brain --example test_chat -- "Your text here"
//!
//! Make sure to set environment variables in .env:
//!   OPENAI_API_KEY - API key for authentication

use openai_brain::{Brain, CompletionRequest, OpenAiBrain};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Rust is a systems programming language focused on safety and speed.".to_string()
    };

    println!("Initializing OpenAiBrain...");
    let brain = OpenAiBrain::from_env()?;

    println!("Brain initialized: {}", brain.name());
    println!("API URL: {}", brain.config().api_url);
    println!("Model: {}", brain.config().model);
    println!();

    let request = CompletionRequest::new(
        "Create concise executive summaries.",
        format!("Provide a 2-3 paragraph executive summary:\n\n{}", text),
        0.5,
        300,
    );

    println!("Waiting for response...\n");
    let completion = brain.complete(request).await?;
    let cost = brain.config().prices.cost_of(&completion.usage);

    println!("=== Response ===");
    println!("{}", completion.text);
    println!("================");
    println!(
        "Tokens: {} prompt / {} completion | Cost: ${:.6}",
        completion.usage.prompt_tokens, completion.usage.completion_tokens, cost
    );

    Ok(())
}
