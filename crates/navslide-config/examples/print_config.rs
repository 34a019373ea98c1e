/// Example program to print the loaded configuration
///
/// Run with: cargo run -p navslide-config --example print_config

fn main() {
    let config = navslide_config::NavslideConfig::load();

    println!("=== Navslide Configuration ===\n");

    println!("Transition:");
    println!("  Timing: {}", config.transition.timing);
    println!("  Delay: {}s", config.transition.delay);
    println!("  Duration: {}s", config.transition.duration);
    println!();

    println!("Mask:");
    println!("  Color: {:?}", config.mask.color);
    println!();

    if let Err(e) = config.validate() {
        eprintln!("Configuration is invalid: {}", e);
    }

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
