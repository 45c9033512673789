#![allow(clippy::indexing_slicing, clippy::exit, clippy::unwrap_used)]
fn main() {
    if std::env::var("PROFILE").unwrap_or_default() == "release" {
        println!("cargo:rustc-env=DEFMT_LOG=off");
    }

    link_hints();
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

/// Registers this build script as the linker's error-handling script, so an
/// undefined symbol comes with a hint about what is usually missing.
fn link_hints() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        let (kind, symbol) = (&args[1], &args[2]);
        if kind != "undefined-symbol" {
            std::process::exit(1);
        }

        let hint = match symbol.as_str() {
            "_defmt_timestamp" | "_defmt_acquire" => Some(
                "`defmt` has no global logger - every binary needs `use esp_println as _;`",
            ),
            "_stack_start" => Some("the `linkall.x` linker script is missing"),
            "esp_rtos_initialized" | "esp_rtos_yield_task" | "esp_rtos_task_create" => {
                Some("no scheduler - call `esp_rtos::start` before spawning tasks")
            }
            "_embassy_time_schedule_wake" | "_embassy_time_now" => {
                Some("`embassy-time` has no driver - `esp-rtos` must be started in `main`")
            }
            _ => None,
        };
        if let Some(hint) = hint {
            eprintln!();
            eprintln!("💡 {hint}");
            eprintln!();
        }

        std::process::exit(0);
    }

    println!(
        "cargo:rustc-link-arg=-Wl,--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );
}
