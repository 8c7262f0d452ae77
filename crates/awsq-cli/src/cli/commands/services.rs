//! `awsq services` – built-in profiles and config-file services.

use awsq_core::config::{AwsqConfig, PROFILES};

pub fn run_services(cfg: &AwsqConfig) {
    println!("{:<18} {:<12} {}", "SERVICE", "VERSION", "ENDPOINT");
    for p in PROFILES {
        print_row(cfg, p.name);
    }
    for name in cfg.services.keys() {
        if !PROFILES.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
            print_row(cfg, name);
        }
    }
}

fn print_row(cfg: &AwsqConfig, name: &str) {
    match cfg.resolve(name) {
        Ok(c) => println!("{:<18} {:<12} {}", name, c.service_version, c.service_url),
        Err(e) => println!("{:<18} {:<12} ({:#})", name, "-", e),
    }
}
