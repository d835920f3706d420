//! File cache CLI.
//!
//! This binary provides shell access to a cache directory: values round-trip
//! as JSON, so it interoperates with entries written by the library under
//! the default serializer.

use clap::Parser;

use simple_file_cache::cli::{CacheCommand, Cli};
use simple_file_cache::{CacheConfig, CacheError, FileCache, Ttl};

fn main() {
    let args = Cli::parse();

    let mut config = CacheConfig::new();
    if let Some(path) = args.path {
        config = config.path(path);
    }

    let cache = match FileCache::new(config.build()) {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("Failed to open cache: {}", err);
            std::process::exit(1);
        }
    };

    match args.command {
        CacheCommand::Get { key } => match cache.get::<serde_json::Value>(&key) {
            Ok(Some(value)) => println!("{}", value),
            Ok(None) => println!("Key '{}' not found", key),
            Err(err) => fail(err),
        },

        CacheCommand::Set { key, value, ttl } => {
            // Store raw JSON when the input parses as such, else as a string.
            let value: serde_json::Value = serde_json::from_str(&value)
                .unwrap_or_else(|_| serde_json::Value::String(value));

            let result = match ttl {
                Some(secs) => cache.set_with_ttl(&key, &value, Ttl::Seconds(secs)),
                None => cache.set(&key, &value),
            };
            match result {
                Ok(true) => println!("Set key '{}'", key),
                Ok(false) => {
                    eprintln!("Write failed for key '{}'", key);
                    std::process::exit(1);
                }
                Err(err) => fail(err),
            }
        }

        CacheCommand::Delete { key } => match cache.delete(&key) {
            Ok(true) => println!("Deleted '{}'", key),
            Ok(false) => {
                eprintln!("Removal failed for '{}'", key);
                std::process::exit(1);
            }
            Err(err) => fail(err),
        },

        CacheCommand::Has { key } => {
            if cache.has(&key) {
                println!("yes");
            } else {
                println!("no");
                std::process::exit(1);
            }
        }

        CacheCommand::Clear => {
            if cache.clear() {
                println!("Cache cleared");
            } else {
                eprintln!("Cache clear incomplete");
                std::process::exit(1);
            }
        }
    }
}

fn fail(err: CacheError) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}
