use chrono::Datelike;

fn main() {
    // Exposed to the footer through env!
    let now = chrono::Utc::now();
    println!("cargo:rustc-env=BUILD_YEAR={}", now.year());

    // Rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=content");
}
