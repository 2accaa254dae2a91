//! Environment readiness check.

use crate::browser::chromium::find_chromium;
use crate::clipboard::SystemClipboard;
use crate::i18n::Locale;
use anyhow::Result;

/// Check Chromium and clipboard availability and report the detected
/// locale.
pub async fn run() -> Result<()> {
    println!("Magpie Doctor");
    println!("=============");
    println!();

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    let chromium_path = find_chromium();
    match &chromium_path {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Install Chrome/Chromium or set MAGPIE_CHROMIUM_PATH."
        ),
    }

    let clipboard_ok = match SystemClipboard::new() {
        Ok(_) => {
            println!("[OK] System clipboard reachable");
            true
        }
        Err(e) => {
            println!("[!!] System clipboard unavailable: {e}");
            false
        }
    };

    let locale = Locale::detect();
    println!("[OK] Locale: {locale:?}");

    println!();
    if chromium_path.is_some() && clipboard_ok {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }

    Ok(())
}
