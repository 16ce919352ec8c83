use bevy::{math::UVec2, prelude::World};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use quest_core::{CombineMode, LandPlot, ModifierGroup, PlotEffect, ProductionGroup};

fn bench_impose_revert(c: &mut Criterion) {
    let mut group = c.benchmark_group("plot_effect");

    for applications in [8usize, 64, 512] {
        group.bench_with_input(
            BenchmarkId::new("impose_then_revert_all", applications),
            &applications,
            |b, &applications| {
                b.iter_batched(
                    || {
                        let mut world = World::new();
                        let plots: Vec<_> = (0..applications as u32)
                            .map(|x| {
                                world
                                    .spawn(LandPlot::new(
                                        UVec2::new(x, 0),
                                        ProductionGroup::new(2, 3, 4),
                                    ))
                                    .id()
                            })
                            .collect();
                        let effect = PlotEffect::new(
                            "Bench",
                            "Benchmark effect",
                            ModifierGroup::new(1.5, 0.5, 2.0),
                            |_| {},
                        );
                        (world, plots, effect)
                    },
                    |(mut world, plots, mut effect)| {
                        for plot in &plots {
                            effect.impose(&mut world, *plot, CombineMode::Multiply);
                        }
                        effect.revert_all(&mut world)
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(effect_benches, bench_impose_revert);
criterion_main!(effect_benches);
