//! Load a save and print it as JSON
//!
//! ```text
//! json CCGameManager.dat CCLocalLevels.dat > save.json
//! ```
//!
//! Files written by the game are xored and compressed. Pass `--plain` for
//! files that were already decoded into property lists.

use robtop::compression::{GameCodec, Identity};
use robtop::database::Database;
use std::{env, error, fs, io};

fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let plain = args.iter().any(|x| x == "--plain");
    let paths: Vec<&String> = args.iter().filter(|x| !x.starts_with("--")).collect();

    let (main_path, levels_path) = match paths.as_slice() {
        [main, levels] => (main, levels),
        _ => return Err("usage: json [--plain] <main save> <levels save>".into()),
    };

    let main = fs::read(main_path)?;
    let levels = fs::read(levels_path)?;

    let database = if plain {
        Database::load(&main, &levels, &Identity, false)?
    } else {
        Database::load(&main, &levels, &GameCodec, true)?
    };

    let stdout = io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &database)?;
    println!();
    Ok(())
}
