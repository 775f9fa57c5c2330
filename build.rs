use dotenvy::dotenv;
use std::env::var;

fn main() {
    dotenv().ok();

    println!("cargo:rerun-if-env-changed=PROMPTBET_LIVE");
    println!("cargo:rustc-check-cfg=cfg(offline)");

    if var("PROMPTBET_LIVE").is_err() {
        println!("cargo:rustc-cfg=offline");
    }
}
