use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use distid::{
    DistId, Format, Generator, GeneratorConfig, MonotonicClock, NodeRegistry, NoopSink, Poll,
    TimeSource, thread_backoff,
};
use std::time::{Duration, Instant};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration. With the default 12-bit
// counter this is exactly one millisecond's worth.
const TOTAL_IDS: usize = 4096;

fn config() -> GeneratorConfig {
    GeneratorConfig::new(0)
        .with_epoch(Duration::ZERO)
        .with_sink(NoopSink)
        .with_registry(NodeRegistry::new())
}

/// Hot path: a frozen clock and a fresh generator per iteration, so every
/// poll is `Ready`.
fn bench_fixed_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("poll_id/fixed");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator =
                    Generator::with_time(config(), FixedMockTime { millis: 1 }).unwrap();
                for _ in 0..TOTAL_IDS {
                    match generator.poll_id().unwrap() {
                        Poll::Ready { id } => {
                            black_box(id);
                        }
                        Poll::Pending { .. } => unreachable!(),
                    }
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Wall-clock generation, including waits for the next millisecond.
fn bench_clock<T: TimeSource>(c: &mut Criterion, group_name: &str, clock: impl Fn() -> T) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let generator = Generator::with_time(config(), clock()).unwrap();
            let start = Instant::now();

            for _ in 0..iters {
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id(thread_backoff).unwrap());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

fn bench_system_clock(c: &mut Criterion) {
    bench_clock(c, "next_id/system", || distid::SystemClock);
}

fn bench_monotonic_clock(c: &mut Criterion) {
    bench_clock(c, "next_id/monotonic", MonotonicClock::new);
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let id = DistId::from_raw(0x0123_4567_89ab_cdef);

    for format in Format::ALL {
        group.bench_function(format.as_str(), |b| {
            b.iter(|| black_box(black_box(id).render(format)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fixed_clock,
    bench_system_clock,
    bench_monotonic_clock,
    bench_render,
);
criterion_main!(benches);
