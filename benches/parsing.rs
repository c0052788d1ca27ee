use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gamestring::font_values::FontValueReplacements;
use gamestring::parser::scan;
use gamestring::rendering::{render, RenderFlags};
use gamestring::{GameStringText, StormLocale};

const INPUTS: &[(&str, &str)] = &[
    ("plain", "Step forward dealing 113 damage and Slowing enemies by 60% decaying over 2 seconds."),
    (
        "tagged",
        "Every <c val=\"#TooltipNumbers\">18</c> seconds, deals <c val=\"#TooltipNumbers\">125~~0.045~~</c><n/> extra damage every <c val=\"#TooltipNumbers\">2.75</c> seconds.",
    ),
    (
        "nested",
        "Eject from the Mech, setting it to self-destruct after <c val=\"#TooltipNumbers\">4</c> seconds. Deals <c val=\"#TooltipNumbers\">400</c> to <c val=\"#TooltipNumbers\">1200</c> damage in a large area. Only deals <c val=\"#TooltipNumbers\">50%</c> damage against Structures.</n></n><c val=\"FF8000\">Gain <c val=\"#TooltipNumbers\">1%</c> Charge for every <c val=\"#TooltipNumbers\">2</c> seconds spent Basic Attacking, and <c val=\"#TooltipNumbers\">30%</c> Charge per <c val=\"#TooltipNumbers\">100%</c> of Mech Health lost.</c>",
    ),
    (
        "malformed",
        "Max Health Bonus: <c val=\"#TooltipNumbers\"0%</c> previous <w>test<a>location.< ~~no-scale~~ ##ERROR## 100~~0.045~~",
    ),
];

fn scan_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    for (name, input) in INPUTS {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| scan(black_box(input), false));
        });
    }

    group.finish();
}

fn render_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let replacements = FontValueReplacements::new();

    for (name, input) in INPUTS {
        let parsed = scan(input, false);

        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| {
                for flags in [
                    RenderFlags::raw(),
                    RenderFlags::plain(false, true),
                    RenderFlags::colored(true),
                ] {
                    black_box(render(
                        input,
                        parsed.spans(),
                        flags,
                        StormLocale::EnUs,
                        &replacements,
                    ));
                }
            });
        });
    }

    group.finish();
}

fn all_flavors_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_flavors");

    for (name, input) in INPUTS {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| {
                let text = GameStringText::new(black_box(*input));

                black_box(text.raw_text());
                black_box(text.plain_text());
                black_box(text.plain_text_with_scaling());
                black_box(text.colored_text_with_scaling());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, scan_bench, render_bench, all_flavors_bench);
criterion_main!(benches);
