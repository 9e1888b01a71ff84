//! forum-insight - forum input screening and engagement CLI
//!
//! ## Quick Start
//!
//! ```bash
//! # Screen user input before it reaches the database
//! forum-insight validate "john_doe" "admin' OR '1'='1"
//!
//! # How many distinct students has alice replied to?
//! forum-insight engagement alice --snapshot forum.json
//!
//! # Everyone at once
//! forum-insight report --snapshot forum.json
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
