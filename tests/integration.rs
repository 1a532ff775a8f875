// SPDX-License-Identifier: MPL-2.0
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

use tempfile::{tempdir, TempDir};
use yaml_lens::config::{self, Config, LocalesConfig, ReloadMode};
use yaml_lens::i18n::{LocaleStore, ReloadPolicy, StaticRequest, StoreOptions, TranslateOptions, Translator};
use yaml_lens::{Error, FormatError};

fn write_locale(root: &Path, scope: &str, file: &str, content: &str) {
    let dir = root.join(scope);
    fs::create_dir_all(&dir).expect("failed to create scope dir");
    fs::write(dir.join(file), content).expect("failed to write locale file");
}

fn bump_mtime(path: &Path, seconds: u64) {
    let file = File::options()
        .write(true)
        .open(path)
        .expect("failed to open locale file");
    file.set_modified(SystemTime::now() + Duration::from_secs(seconds))
        .expect("failed to set mtime");
}

fn app_tree() -> TempDir {
    let dir = tempdir().expect("failed to create temp dir");
    let root = dir.path();
    write_locale(
        root,
        "default",
        "en.yml",
        "greeting: Hello\nhello_world: \"{user}, Hello world\"\ncount: \"%d items\"\n",
    );
    write_locale(root, "default", "fr.yml", "greeting: Bonjour\n");
    write_locale(
        root,
        "users",
        "en.yml",
        "edit: Edit User\n.profile:\n  name: Your Name\n",
    );
    dir
}

fn translator(root: &Path, options: StoreOptions) -> Translator {
    let store = LocaleStore::open(root, options).expect("failed to open store");
    Translator::new(Arc::new(store))
}

#[test]
fn scenario_plain_key_from_default_scope() {
    let dir = app_tree();
    let t = translator(dir.path(), StoreOptions::default());
    let out = t.t("greeting", &TranslateOptions::new()).expect("translate");
    assert_eq!(out, "Hello");
}

#[test]
fn scenario_scope_relative_key_uses_request_scope() {
    let dir = app_tree();
    let t = translator(dir.path(), StoreOptions::default());
    let request = StaticRequest::new().scope("users");
    let out = t
        .t_with(".edit", &TranslateOptions::new(), &request)
        .expect("translate");
    assert_eq!(out, "Edit User");
}

#[test]
fn scenario_deep_key_reads_endpoint_table() {
    let dir = app_tree();
    let t = translator(dir.path(), StoreOptions::default());
    let out = t
        .t("users.profile.name", &TranslateOptions::new())
        .expect("translate");
    assert_eq!(out, "Your Name");
}

#[test]
fn scenario_named_argument_is_substituted() {
    let dir = app_tree();
    let t = translator(dir.path(), StoreOptions::default());
    let out = t
        .t("hello_world", &TranslateOptions::new().named("user", "Lix"))
        .expect("translate");
    assert_eq!(out, "Lix, Hello world");
}

#[test]
fn scenario_unknown_scope_returns_literal() {
    let dir = app_tree();
    let t = translator(dir.path(), StoreOptions::default());
    let options = TranslateOptions::new().arg("unused").named("user", "Lix");
    let out = t.t("nosuchscope.key", &options).expect("translate");
    assert_eq!(out, "nosuchscope.key");
}

#[test]
fn fallback_applies_per_language_table() {
    let dir = app_tree();
    let t = translator(dir.path(), StoreOptions::default());

    let fr = TranslateOptions::new().lang("fr");
    assert_eq!(t.t("greeting", &fr).expect("translate"), "Bonjour");
    // fr.yml exists, so a key missing from it does not fall back to en
    assert_eq!(t.t("hello_world", &fr).expect("translate"), "hello_world");
    assert_eq!(t.t("no_such_key", &fr).expect("translate"), "no_such_key");

    let de = TranslateOptions::new().lang("de").failback("fr");
    assert_eq!(t.t("greeting", &de).expect("translate"), "Bonjour");
}

#[test]
fn repeated_calls_are_identical() {
    let dir = app_tree();
    let t = translator(
        dir.path(),
        StoreOptions {
            reload: ReloadPolicy::EveryCall,
            ignore_case: false,
        },
    );
    let options = TranslateOptions::new().named("user", "Lix");
    let first = t.t("hello_world", &options).expect("translate");
    let second = t.t("hello_world", &options).expect("translate");
    assert_eq!(first, second);
    assert_eq!(t.store().parse_count(), 3);
}

#[test]
fn template_without_placeholders_ignores_arguments() {
    let dir = app_tree();
    let t = translator(dir.path(), StoreOptions::default());
    let options = TranslateOptions::new().arg(1).arg("two").named("x", 3.5);
    assert_eq!(t.t("greeting", &options).expect("translate"), "Hello");
}

#[test]
fn positional_mismatch_is_an_error() {
    let dir = app_tree();
    let t = translator(dir.path(), StoreOptions::default());

    let out = t.t("count", &TranslateOptions::new().arg(3)).expect("translate");
    assert_eq!(out, "3 items");

    match t.t("count", &TranslateOptions::new()) {
        Err(Error::Format(FormatError::NotEnoughArguments)) => {}
        other => panic!("expected NotEnoughArguments, got {:?}", other),
    }
}

#[test]
fn missing_named_argument_is_swallowed() {
    let dir = app_tree();
    let t = translator(dir.path(), StoreOptions::default());
    let out = t.t("hello_world", &TranslateOptions::new()).expect("translate");
    assert_eq!(out, "{user}, Hello world");
}

#[test]
fn ignore_case_matches_any_case() {
    let dir = tempdir().expect("failed to create temp dir");
    write_locale(dir.path(), "default", "en.yml", "hello: Hi there\n");
    let t = translator(
        dir.path(),
        StoreOptions {
            reload: ReloadPolicy::Never,
            ignore_case: true,
        },
    );
    let options = TranslateOptions::new();
    assert_eq!(t.t("Hello", &options).expect("translate"), "Hi there");
    assert_eq!(t.t("hello", &options).expect("translate"), "Hi there");
    assert_eq!(t.t("HELLO", &options).expect("translate"), "Hi there");
}

#[test]
fn case_sensitive_by_default() {
    let dir = tempdir().expect("failed to create temp dir");
    write_locale(dir.path(), "default", "en.yml", "hello: Hi there\n");
    let t = translator(dir.path(), StoreOptions::default());
    assert_eq!(t.t("Hello", &TranslateOptions::new()).expect("translate"), "Hello");
}

#[test]
fn every_call_reload_picks_up_edits_only() {
    let dir = app_tree();
    let t = translator(
        dir.path(),
        StoreOptions {
            reload: ReloadPolicy::EveryCall,
            ignore_case: false,
        },
    );
    assert_eq!(t.store().parse_count(), 3);

    let options = TranslateOptions::new();
    assert_eq!(t.t("greeting", &options).expect("translate"), "Hello");
    assert_eq!(t.store().parse_count(), 3);

    let path = dir.path().join("default").join("en.yml");
    fs::write(&path, "greeting: Howdy\n").expect("failed to rewrite locale");
    bump_mtime(&path, 10);

    assert_eq!(t.t("greeting", &options).expect("translate"), "Howdy");
    assert_eq!(t.store().parse_count(), 4);

    assert_eq!(t.t("greeting", &options).expect("translate"), "Howdy");
    assert_eq!(t.store().parse_count(), 4);
}

#[test]
fn never_reload_keeps_initial_content() {
    let dir = app_tree();
    let t = translator(dir.path(), StoreOptions::default());
    let options = TranslateOptions::new();
    assert_eq!(t.t("greeting", &options).expect("translate"), "Hello");

    let path = dir.path().join("default").join("en.yml");
    fs::write(&path, "greeting: Howdy\n").expect("failed to rewrite locale");
    bump_mtime(&path, 10);

    assert_eq!(t.t("greeting", &options).expect("translate"), "Hello");
    assert_eq!(t.store().parse_count(), 3);
}

#[test]
fn manual_reload_applies_on_request() {
    let dir = app_tree();
    let t = translator(
        dir.path(),
        StoreOptions {
            reload: ReloadPolicy::Manual,
            ignore_case: false,
        },
    );
    let path = dir.path().join("default").join("fr.yml");
    fs::write(&path, "greeting: Salut\n").expect("failed to rewrite locale");
    bump_mtime(&path, 10);

    let fr = TranslateOptions::new().lang("fr");
    assert_eq!(t.t("greeting", &fr).expect("translate"), "Bonjour");

    let report = t.store().reload().expect("reload");
    assert_eq!(report.parsed, vec![path]);
    assert_eq!(report.unchanged, 2);
    assert_eq!(t.t("greeting", &fr).expect("translate"), "Salut");
}

#[test]
fn bad_file_does_not_disable_other_translations() {
    let dir = app_tree();
    write_locale(dir.path(), "default", "de.yml", "greeting: [unclosed\n");

    let store = LocaleStore::new(dir.path(), StoreOptions::default());
    let report = store.reload().expect("reload");
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0], Error::LocaleParse { .. }));
    assert!(!report.is_clean());

    let t = Translator::new(Arc::new(store));
    assert_eq!(t.t("greeting", &TranslateOptions::new()).expect("translate"), "Hello");
    assert_eq!(
        t.t("greeting", &TranslateOptions::new().lang("de")).expect("translate"),
        "Hello"
    );
}

#[test]
fn translator_is_shared_across_threads() {
    let dir = app_tree();
    let t = Arc::new(translator(
        dir.path(),
        StoreOptions {
            reload: ReloadPolicy::EveryCall,
            ignore_case: false,
        },
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                t.t("greeting", &TranslateOptions::new())
                    .expect("translate")
                    .into_string()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread panicked"), "Hello");
    }
    assert_eq!(t.store().parse_count(), 3);
}

#[test]
fn config_file_drives_translator() {
    let app = app_tree();
    let config_dir = tempdir().expect("failed to create temp dir");

    let mut settings = Config::default();
    settings.general.default_language = Some("fr".to_string());
    settings.locales = LocalesConfig {
        path: Some(app.path().display().to_string()),
        reload: Some(ReloadMode::EveryCall),
        ..LocalesConfig::default()
    };
    config::save_with_override(&settings, Some(config_dir.path().to_path_buf()))
        .expect("failed to save config");

    let (loaded, warning) = config::load_with_override(Some(config_dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(loaded, settings);

    let t = loaded.translator(Path::new("/unused")).expect("translator");
    assert_eq!(t.store().options().reload, ReloadPolicy::EveryCall);
    let out = t.t("greeting", &loaded.translate_options()).expect("translate");
    assert_eq!(out, "Bonjour");
}
