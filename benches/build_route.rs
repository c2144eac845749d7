use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use twitchclone::{
    core::{
        navigator::{NavCommand, NavOptions},
        state::NavState,
    },
    domain::{
        route::{build_route, ResolvedRoute, RouteParams},
        screen::{Screen, CHANNEL_ID},
    },
};

fn benchmark(c: &mut Criterion) {
    let params = RouteParams::new().with(CHANNEL_ID, "livestream:streamer");

    c.bench_function("build-route", |b| {
        b.iter(|| build_route(black_box(Screen::LivestreamWatcher), black_box(&params)))
    });

    c.bench_function("parse-route", |b| {
        b.iter(|| ResolvedRoute::parse(black_box("messages/livestream:streamer")))
    });

    c.bench_function("single-top-navigation", |b| {
        let route = Screen::Messages
            .create_route("livestream:streamer")
            .unwrap_or_else(|e| panic!("{e}"));
        b.iter(|| {
            let mut nav = NavState::default();
            for _ in 0..100 {
                nav.apply(NavCommand::NavigateTo {
                    route: black_box(route.clone()),
                    options: NavOptions::single_top(),
                });
            }
            nav
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
