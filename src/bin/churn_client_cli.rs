use std::{env, process};

use churn_client::{cli, init, utils::build_info};

fn main() {
    if env::args()
        .skip(1)
        .any(|arg| arg == "--version" || arg == "-V")
    {
        for line in build_info::current().lines() {
            println!("{line}");
        }
        return;
    }

    init();

    if let Err(err) = cli::run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
