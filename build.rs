// RustMorseBeacon - Build Script
//
// Exports the ESP-IDF build environment when the firmware is built.
// Host library builds and tests never touch ESP-IDF.

fn main() {
    // ESP-IDF environment setup (only when the `esp` feature is active)
    if std::env::var_os("CARGO_FEATURE_ESP").is_some() {
        embuild::espidf::sysenv::output();
    }
}
