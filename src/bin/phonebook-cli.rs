use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "phonebook-cli")]
#[command(about = "Command line client for the phonebook service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all persons
    List,
    /// Add a person
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        number: String,
    },
    /// Show one person
    Get { id: String },
    /// Change a person's number
    Update {
        id: String,
        #[arg(long)]
        number: String,
    },
    /// Delete a person
    Delete { id: String },
    /// Show the info page
    Info,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let persons = format!("{}/api/persons", cli.url.trim_end_matches('/'));

    let res = match cli.command {
        Commands::List => client.get(&persons).send().await?,
        Commands::Add { name, number } => {
            client
                .post(&persons)
                .json(&json!({ "name": name, "number": number }))
                .send()
                .await?
        }
        Commands::Get { id } => client.get(format!("{persons}/{id}")).send().await?,
        Commands::Update { id, number } => {
            client
                .put(format!("{persons}/{id}"))
                .json(&json!({ "number": number }))
                .send()
                .await?
        }
        Commands::Delete { id } => client.delete(format!("{persons}/{id}")).send().await?,
        Commands::Info => client.get(format!("{}/info", cli.url.trim_end_matches('/'))).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: phonebook returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
