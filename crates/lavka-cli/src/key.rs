//! API-key commands.

use clap::Subcommand;

use lavka_api::KeyStore;

#[derive(Debug, Subcommand)]
pub enum KeyCommand {
    /// Print the key requests are authenticated with
    Show,
    /// Store a key for future sessions
    Set { value: String },
    /// Forget the stored key and fall back to the default
    Clear,
}

pub fn run(keys: &KeyStore, command: &KeyCommand) -> anyhow::Result<()> {
    match command {
        KeyCommand::Show => println!("{}", keys.current()),
        KeyCommand::Set { value } => {
            keys.set(value)?;
            println!("API key stored");
        }
        KeyCommand::Clear => {
            keys.clear()?;
            println!("API key cleared; the default key will be used");
        }
    }
    Ok(())
}
