//! Twitter Link Preview Script
//!
//! This script previews a Twitter link from the terminal exactly as the bot
//! would post it in a channel. Credentials and display settings are read from
//! the same environment variables as the service.

use std::io::{self, Write};
use std::sync::Arc;

use twitlink::{find_links, load_time_settings, Trigger, TwitterConfig, TwitterPlugin};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    println!("🐦 Twitter Link Preview Tool");
    println!("============================");

    let config = TwitterConfig::from_env()?;
    let time_settings = load_time_settings()?;
    println!("🔑 Consumer credentials loaded");

    // Get the message from the user
    print!("🔗 Paste a message or Twitter link: ");
    io::stdout().flush()?;
    let mut message = String::new();
    io::stdin().read_line(&mut message)?;
    let message = message.trim();

    if message.is_empty() {
        println!("❌ Message cannot be empty!");
        return Err("Message is required".into());
    }

    let links = find_links(message);
    if links.is_empty() {
        println!("🤷 No Twitter links found in that message.");
        return Ok(());
    }
    println!("🔍 Found {} link(s): {:?}", links.len(), links);

    let nick = std::env::var("USER").unwrap_or_else(|_| "console".to_string());
    let trigger = Trigger::new(nick.clone(), nick, message);
    let plugin = TwitterPlugin::new(config, Arc::new(time_settings));

    println!();
    for line in plugin.handle(&trigger).await {
        println!("{}", line);
    }

    Ok(())
}
