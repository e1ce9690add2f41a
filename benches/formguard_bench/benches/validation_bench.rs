//! Validation overhead benchmarks
//!
//! Measures per-field rule evaluation, whole-input validation and
//! structural validation of derived records.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use formguard::rules::{Alpha, Date, Email, EqualsAny, NotEmpty, Numeric, Url, ZipCode};
use formguard::{Record, RuleSet};
use std::collections::HashMap;

#[derive(Record)]
struct Address {
    #[record(rename = "City")]
    city: String,
    #[record(rename = "Zip")]
    zip: String,
}

#[derive(Record)]
struct Signup {
    #[record(rename = "Email")]
    email: String,
    #[record(rename = "Address")]
    address: Address,
}

fn signup_rules() -> RuleSet {
    RuleSet::new()
        .required("email", Email, "")
        .rule("age", Numeric, "")
        .rule("zip", ZipCode, "")
        .rule("site", Url, "")
        .rule("gender", EqualsAny::new(["male", "female", "other"]), "")
        .rule("birthday", Date::new("%Y-%m-%d"), "")
        .required("Email", Email, "")
        .rule("Address.City", Alpha, "")
        .rule("Address.Zip", ZipCode, "")
}

/// Benchmark single-field checks
fn bench_key_value(c: &mut Criterion) {
    let rules = signup_rules();
    let mut group = c.benchmark_group("key_value");

    group.bench_function("email_valid", |b| {
        b.iter(|| rules.validate_key_value(black_box("email"), black_box("user@example.com")))
    });

    group.bench_function("email_empty", |b| {
        b.iter(|| rules.validate_key_value(black_box("email"), black_box("")))
    });

    group.bench_function("unregistered", |b| {
        b.iter(|| rules.validate_key_value(black_box("nickname"), black_box("anything")))
    });

    group.bench_function("date", |b| {
        b.iter(|| rules.validate_key_value(black_box("birthday"), black_box("1998-04-20")))
    });

    group.finish();
}

/// Benchmark whole-input validation
fn bench_input(c: &mut Criterion) {
    let rules = signup_rules();
    let mut group = c.benchmark_group("input");

    let valid: HashMap<String, String> = [
        ("email", "user@example.com"),
        ("age", "42"),
        ("zip", "12345"),
        ("site", "https://example.com"),
        ("gender", "female"),
        ("birthday", "1998-04-20"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let invalid: HashMap<String, String> = [
        ("email", ""),
        ("age", "forty"),
        ("zip", "1234"),
        ("site", "example"),
        ("gender", "unknown"),
        ("birthday", "1998-02-30"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    group.bench_function("all_valid", |b| {
        b.iter(|| rules.validate(black_box(&valid)))
    });
    group.bench_function("all_invalid", |b| {
        b.iter(|| rules.validate(black_box(&invalid)))
    });

    group.finish();
}

/// Benchmark structural validation
fn bench_record(c: &mut Criterion) {
    let rules = signup_rules();
    let signup = Signup {
        email: "user@example.com".to_string(),
        address: Address {
            city: "Berlin".to_string(),
            zip: "10115".to_string(),
        },
    };

    c.bench_function("record_nested", |b| {
        b.iter(|| rules.validate_record(black_box(&signup)))
    });
}

/// Benchmark rule construction
fn bench_build(c: &mut Criterion) {
    c.bench_function("build_rule_set", |b| b.iter(signup_rules));
    c.bench_function("not_empty_direct", |b| {
        b.iter(|| formguard::Rule::validate(&NotEmpty, black_box("x")))
    });
}

criterion_group!(
    benches,
    bench_key_value,
    bench_input,
    bench_record,
    bench_build
);
criterion_main!(benches);
