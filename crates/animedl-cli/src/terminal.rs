//! Stdin/stdout implementation of the engine's console.

use std::io::{self, BufRead, Write};

use animedl_core::{AnimeDlError, Console};

pub struct Terminal;

impl Console for Terminal {
    fn read_line(&mut self, prompt: &str) -> animedl_core::Result<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();

        let mut line = String::new();
        // End of input counts as the user leaving
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(AnimeDlError::Interrupted);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }
}
