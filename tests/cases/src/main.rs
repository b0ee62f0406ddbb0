#[macro_use]
extern crate log;
extern crate chrono;
extern crate env_logger;

use chrono::prelude::{DateTime, Local};
use std::io::Write;

fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            let now_str = now.format("%H:%M:%S.%3f").to_string();
            writeln!(buf, "{:5}: {} - {}", record.level(), now_str, record.args())
        })
        .init();
}

fn main() {
    init_logger();

    info!("Election cases started");

    cases::cases::smoke::run();
    cases::cases::single_candidate::run();
    cases::cases::herd_avoidance::run();
    cases::cases::session_loss::run();
    cases::cases::rejoin::run();
    cases::cases::transient_failures::run();
    cases::cases::missing_entry::run();
    cases::cases::deferred_resolution::run();

    info!("Election cases completed");
}
