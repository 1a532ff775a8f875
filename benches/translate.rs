// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use std::fs;
use std::hint::black_box;
use std::sync::Arc;
use yaml_lens::format::{self, FormatArg, NamedArgs};
use yaml_lens::i18n::{LocaleStore, ReloadPolicy, StoreOptions, TranslateOptions, Translator};

fn locale_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for scope in ["default", "users", "admin"] {
        let scope_dir = dir.path().join(scope);
        fs::create_dir_all(&scope_dir).expect("failed to create scope dir");
        let mut content = String::from(".profile:\n  name: \"{user}'s profile\"\n");
        for i in 0..200 {
            content.push_str(&format!("key_{i}: \"Message %d of {{total}}\"\n"));
        }
        fs::write(scope_dir.join("en.yml"), content).expect("failed to write locale");
    }
    dir
}

fn translate_benchmark(c: &mut Criterion) {
    let dir = locale_tree();
    let mut group = c.benchmark_group("translate");

    for (label, reload) in [
        ("never", ReloadPolicy::Never),
        ("every_call", ReloadPolicy::EveryCall),
    ] {
        let store = LocaleStore::open(
            dir.path(),
            StoreOptions {
                reload,
                ignore_case: false,
            },
        )
        .expect("failed to open store");
        let translator = Translator::new(Arc::new(store));
        let options = TranslateOptions::new().arg(7).named("total", 200);

        group.bench_function(format!("plain_key_{label}"), |b| {
            b.iter(|| black_box(translator.t(black_box("key_42"), &options)));
        });
    }

    let store = LocaleStore::open(dir.path(), StoreOptions::default()).expect("failed to open store");
    let translator = Translator::new(Arc::new(store));
    let options = TranslateOptions::new().named("user", "Lix");
    group.bench_function("deep_key", |b| {
        b.iter(|| black_box(translator.t(black_box("users.profile.name"), &options)));
    });

    group.finish();
}

fn combine_benchmark(c: &mut Criterion) {
    let args = [FormatArg::Int(3), FormatArg::Float(2.5)];
    let mut named = NamedArgs::new();
    named.insert("user".to_string(), FormatArg::from("Lix"));

    c.bench_function("combine", |b| {
        b.iter(|| {
            black_box(format::combine(
                black_box("%d files, %.1f MB for {user:>8}"),
                &args,
                &named,
            ))
        });
    });
}

criterion_group!(benches, translate_benchmark, combine_benchmark);
criterion_main!(benches);
