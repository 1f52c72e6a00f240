use std::process;

fn main() {
    finance_core::init();

    if let Err(err) = finance_core::cli::run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
