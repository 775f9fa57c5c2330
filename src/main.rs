use std::process::ExitCode;

use env_logger::Env;
use promptbet::{
    betting_pool::{search_and_create_run, BettingPoolIdea},
    AgentClient, Credentials,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Relies on PROMPTBET_BASE_URL and PROMPTBET_KEY, both optional.
    let credentials = Credentials::from_env();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let client = match AgentClient::new(credentials) {
        Ok(client) => client,
        Err(error) => {
            eprintln!("Error: {error}");
            return ExitCode::FAILURE;
        }
    };

    match search_and_create_run(&client).await {
        Ok(result) => {
            println!("Run created: {result:#}");

            if let Some(idea) = BettingPoolIdea::from_run_output(&result) {
                println!("Pool: {}", idea.betting_pool_idea);
                println!("Options: {}", idea.options.join(" / "));
            }

            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
