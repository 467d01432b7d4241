//! `cfg` and environment/file configuration. Environment variables are
//! process-wide, so every test here runs serially.

use serial_test::serial;
use std::env;
use std::io::Write;

const KEYS: &[&str] = &[
    "CROUPIER_CONFIG",
    "CROUPIER_SEED",
    "CROUPIER_DECKS",
    "CROUPIER_WAGER",
    "CROUPIER_BALANCE",
    "CROUPIER_DEALER_DELAY_MS",
];

// Tests are #[serial], so no other thread touches the environment meanwhile.
fn set_env<V: AsRef<std::ffi::OsStr>>(key: &str, value: V) {
    unsafe { env::set_var(key, value) }
}

fn clear_env() {
    for key in KEYS {
        unsafe { env::remove_var(key) }
    }
}

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut stdin = std::io::Cursor::new(Vec::new());
    let code = croupier_cli::run_with_input(args, &mut out, &mut err, &mut stdin);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn cfg_json() -> serde_json::Value {
    let (code, out, err) = run(&["croupier", "cfg"]);
    assert_eq!(code, 0, "{}", err);
    serde_json::from_str(&out).expect("cfg prints JSON")
}

#[test]
#[serial]
fn defaults_come_from_default() {
    clear_env();
    let v = cfg_json();
    assert_eq!(v["decks"]["value"], 1);
    assert_eq!(v["starting_balance"]["value"], 1000);
    assert_eq!(v["wager"]["value"], 10);
    assert!(v["seed"]["value"].is_null());
    for key in ["seed", "decks", "starting_balance", "wager", "dealer_delay_ms"] {
        assert_eq!(v[key]["source"], "default", "{}", key);
    }
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "decks = 6\nwager = 50\nseed = 99").unwrap();
    set_env("CROUPIER_CONFIG", file.path());
    set_env("CROUPIER_WAGER", "25");

    let v = cfg_json();
    assert_eq!(v["decks"]["value"], 6);
    assert_eq!(v["decks"]["source"], "file");
    assert_eq!(v["seed"]["value"], 99);
    assert_eq!(v["wager"]["value"], 25);
    assert_eq!(v["wager"]["source"], "env");
    assert_eq!(v["starting_balance"]["source"], "default");
    clear_env();
}

#[test]
#[serial]
fn empty_env_value_is_ignored() {
    clear_env();
    set_env("CROUPIER_DECKS", "");
    let v = cfg_json();
    assert_eq!(v["decks"]["source"], "default");
    clear_env();
}

#[test]
#[serial]
fn invalid_values_fail_with_exit_code_two() {
    clear_env();
    set_env("CROUPIER_DECKS", "0");
    let (code, _, err) = run(&["croupier", "cfg"]);
    assert_eq!(code, 2);
    assert!(err.contains("decks must be >=1"), "{}", err);

    set_env("CROUPIER_DECKS", "many");
    let (code, _, err) = run(&["croupier", "cfg"]);
    assert_eq!(code, 2);
    assert!(err.contains("Invalid decks"));

    clear_env();
    set_env("CROUPIER_BALANCE", "-1");
    let (code, _, _) = run(&["croupier", "cfg"]);
    assert_eq!(code, 2);
    clear_env();
}

#[test]
#[serial]
fn malformed_file_is_a_config_error() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "decks = [").unwrap();
    set_env("CROUPIER_CONFIG", file.path());
    let (code, _, err) = run(&["croupier", "cfg"]);
    assert_eq!(code, 2);
    assert!(err.contains("cannot parse config file"), "{}", err);

    set_env("CROUPIER_CONFIG", "/nonexistent/croupier.toml");
    let (code, _, err) = run(&["croupier", "cfg"]);
    assert_eq!(code, 2);
    assert!(err.contains("cannot read config file"));
    clear_env();
}

#[test]
#[serial]
fn play_and_sim_use_configured_seed_and_wager() {
    clear_env();
    set_env("CROUPIER_SEED", "77");
    set_env("CROUPIER_WAGER", "30");
    let (code, out, err) = run(&["croupier", "play", "--game", "roulette"]);
    assert_eq!(code, 0, "{}", err);
    assert!(out.starts_with("play: game=roulette seed=77 wager=30"), "{}", out);

    let (code, out, _) = run(&["croupier", "sim", "--game", "rps", "--games", "2"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("sim: game=rps games=2 seed=77 wager=30"));
    clear_env();
}

#[test]
#[serial]
fn dealer_delay_paces_deferred_steps() {
    clear_env();
    set_env("CROUPIER_DEALER_DELAY_MS", "1");
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut stdin = std::io::Cursor::new(b"rock\n".to_vec());
    let code = croupier_cli::run_with_input(
        ["croupier", "play", "--game", "rps", "--seed", "4"],
        &mut out,
        &mut err,
        &mut stdin,
    );
    let out = String::from_utf8(out).unwrap();
    assert_eq!(code, 0, "{}", String::from_utf8_lossy(&err));
    assert!(out.contains("Seat 2 acted"));
    assert!(out.contains("You (seat 1): "));
    clear_env();
}
