//! rWorkload main entrypoint.

use rworkload::run;

fn main() {
    if let Err(e) = run() {
        rworkload::ui::messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
