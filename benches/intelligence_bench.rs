// ABOUTME: Criterion benchmarks for the nutrition calculators and dashboard bucketing
// ABOUTME: Measures metabolic math, macro allocation and weekly/monthly aggregation over meal entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! Criterion benchmarks for the calculation engine.
//!
//! The calculators are closed-form, so these mostly guard against accidental
//! allocation or quadratic behaviour creeping into the bucketing paths.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gohealth_core::models::{ActivityLevel, BiometricProfile, MealCalorieEntry, Sex};
use gohealth_intelligence::dashboard::{monthly_buckets_from_entries, weekly_buckets_from_entries};
use gohealth_intelligence::{
    calculate_daily_calorie_target_on, calculate_macros, daily_metabolics, monthly_spans,
    nutrition_target_range,
};

/// Meal entries spread over the 31 days from 2025-03-01, several per day
#[allow(clippy::cast_precision_loss)]
fn generate_entries(count: usize) -> Vec<MealCalorieEntry> {
    let base = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default();
    (0..count)
        .map(|index| MealCalorieEntry {
            date: base
                .checked_add_days(Days::new((index % 31) as u64))
                .unwrap_or(base),
            total_calories: 150.0 + ((index * 37) % 600) as f64,
        })
        .collect()
}

fn bench_metabolic(c: &mut Criterion) {
    let mut group = c.benchmark_group("metabolic");
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
    let target_date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap_or_default();

    let Ok(profile) =
        BiometricProfile::new(82.5, 178.0, 34, Sex::Male, ActivityLevel::ModeratelyActive)
    else {
        return;
    };

    group.bench_function("daily_metabolics", |b| {
        b.iter(|| daily_metabolics(black_box(&profile)));
    });

    group.bench_function("daily_calorie_target", |b| {
        b.iter(|| {
            calculate_daily_calorie_target_on(
                black_box(2700),
                black_box(82.5),
                black_box(76.0),
                target_date,
                Sex::Male,
                today,
            )
        });
    });

    group.bench_function("nutrition_band_and_macros", |b| {
        b.iter(|| {
            let band = nutrition_target_range(black_box(2700));
            calculate_macros(band.calories_max as f64)
        });
    });

    group.finish();
}

fn bench_dashboard_buckets(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard_buckets");
    let reference = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap_or_default();

    for count in [31_usize, 310, 3100] {
        let entries = generate_entries(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("weekly", count), &entries, |b, entries| {
            b.iter(|| weekly_buckets_from_entries(reference, black_box(entries)));
        });

        group.bench_with_input(BenchmarkId::new("monthly", count), &entries, |b, entries| {
            b.iter(|| monthly_buckets_from_entries(2025, 3, black_box(entries)));
        });
    }

    group.bench_function("monthly_spans", |b| {
        b.iter(|| monthly_spans(black_box(2024), black_box(2)));
    });

    group.finish();
}

criterion_group!(benches, bench_metabolic, bench_dashboard_buckets);
criterion_main!(benches);
