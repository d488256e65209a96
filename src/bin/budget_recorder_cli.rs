use std::process;

use budget_recorder::{cli::run_cli, init};

fn main() {
    init();
    process::exit(run_cli());
}
