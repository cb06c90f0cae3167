use anyhow::Result;
use std::path::Path;
use std::process::Command;
use which::which;

use specden_core::config::DEFAULT_CONFIG_PATH;

pub async fn run() -> Result<()> {
    println!("specden dependency check\n");

    let mut all_ok = true;

    // Check the kaggle CLI
    print!("kaggle:       ");
    match which("kaggle") {
        Ok(path) => {
            let version = Command::new(&path).arg("--version").output();
            match version {
                Ok(out) => {
                    let v = String::from_utf8_lossy(&out.stdout);
                    println!("OK ({})", v.trim());
                }
                Err(_) => {
                    println!("FOUND but failed to get version");
                    all_ok = false;
                }
            }
        }
        Err(_) => {
            println!("NOT FOUND");
            println!("          Install with: pip install kaggle");
            all_ok = false;
        }
    }

    // Check API credentials
    print!("credentials:  ");
    let credentials = dirs::home_dir().map(|d| d.join(".kaggle/kaggle.json"));
    match credentials {
        Some(path) if path.exists() => println!("OK ({})", path.display()),
        _ => {
            println!("NOT FOUND");
            println!("          Place your API token at ~/.kaggle/kaggle.json");
            all_ok = false;
        }
    }

    // Check the config file
    print!("config:       ");
    let config_path = Path::new(DEFAULT_CONFIG_PATH);
    if config_path.exists() {
        println!("OK ({})", config_path.display());
    } else {
        println!("NOT FOUND ({})", config_path.display());
        println!("          The fetch command needs a config file with dataset sources");
        all_ok = false;
    }

    println!();
    if all_ok {
        println!("All dependencies OK!");
    } else {
        println!("Some dependencies are missing. See above for installation instructions.");
    }

    Ok(())
}
