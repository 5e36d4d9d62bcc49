//! Entry command - show the arity routing table

use anyhow::Result;
use jmate_io::{select, EntryPoint};

pub fn run(n: Option<usize>) -> Result<()> {
    match n {
        Some(n) => println!("{}", select(n)?),
        None => {
            for entry in EntryPoint::all() {
                println!("{}  {}", entry.arity(), entry);
            }
        }
    }
    Ok(())
}
