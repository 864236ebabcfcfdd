//! Embedded PostgreSQL bootstrap for integration tests.
//!
//! `pg-embed-setup-unpriv` installs binaries and data under `/var/tmp` unless
//! `PG_RUNTIME_DIR` and `PG_DATA_DIR` say otherwise. Sandboxed runs cannot
//! write there, so when either variable is unset both are pointed at a fresh
//! directory under the cargo target dir while the cluster boots.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

/// Attempts made before a flaky binary download is reported.
const BOOT_ATTEMPTS: u32 = 4;

const FIRST_BACKOFF: Duration = Duration::from_millis(500);

static BOOT_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn scratch_dirs() -> std::io::Result<(String, String)> {
    let target = std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../target"),
        PathBuf::from,
    );
    let base = target
        .join("pg-embed")
        .join(format!("contracts-{}-{}", std::process::id(), Uuid::new_v4().simple()));
    let install = base.join("install");
    let data = base.join("data");
    std::fs::create_dir_all(&install)?;
    std::fs::create_dir_all(&data)?;
    Ok((
        install.to_string_lossy().into_owned(),
        data.to_string_lossy().into_owned(),
    ))
}

/// Download hiccups are worth retrying; anything else is not.
fn looks_transient(message: &str) -> bool {
    let message = message.to_lowercase();
    ["decoding response body", "connection reset", "timed out", "dns error"]
        .iter()
        .any(|needle| message.contains(needle))
}

/// Start a [`TestCluster`].
///
/// Must be called outside any Tokio runtime. Boots are serialised across the
/// test binary.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _boot = BOOT_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let _env = if std::env::var_os("PG_RUNTIME_DIR").is_some()
        && std::env::var_os("PG_DATA_DIR").is_some()
    {
        None
    } else {
        let (install, data) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(install)),
            ("PG_DATA_DIR", Some(data)),
        ]))
    };

    let mut backoff = FIRST_BACKOFF;
    let mut attempt = 1;
    loop {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                let message = format!("{err:?}");
                if attempt >= BOOT_ATTEMPTS || !looks_transient(&message) {
                    return Err(message);
                }
                eprintln!("pg-embed: attempt {attempt} failed, retrying in {backoff:?}: {message}");
                std::thread::sleep(backoff);
                backoff *= 2;
                attempt += 1;
            }
        }
    }
}
