// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRouter-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-router and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion config shared by all routing benches; `ROUTER_PROFILE_FREQ=0` skips pprof.
pub fn criterion() -> Criterion {
    let frequency: i32 = env_parse("ROUTER_PROFILE_FREQ", 100).clamp(0, 1000);
    let sample_size: usize = env_parse("ROUTER_BENCH_SAMPLE_SIZE", 50).clamp(10, 200);
    let warmup_secs: u64 = env_parse("ROUTER_BENCH_WARMUP_SECS", 2).clamp(1, 60);
    let measurement_secs: u64 = env_parse("ROUTER_BENCH_MEASUREMENT_SECS", 4).clamp(1, 120);

    let config = Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs));
    if frequency == 0 {
        return config;
    }
    config.with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
