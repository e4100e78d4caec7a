use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use weft_core::compact::Compactor;
use weft_core::model::{Label, ReviewTarget};
use weft_core::timeline::{EntryKind, LabelChange, ReviewRequestChange, TimelineEntry};

struct Tier {
    name: &'static str,
    entries: usize,
}

const TIERS: [Tier; 3] = [
    Tier {
        name: "small",
        entries: 100,
    },
    Tier {
        name: "medium",
        entries: 5_000,
    },
    Tier {
        name: "large",
        entries: 100_000,
    },
];

/// Deterministic xorshift so every run compacts the same timeline.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: u64) -> i64 {
        i64::try_from(self.next() % n).unwrap_or(0)
    }
}

/// A busy issue: bursts of label and review churn from a few posters,
/// broken up by comments and the odd close/reopen.
fn synthetic_timeline(len: usize, seed: u64) -> Vec<TimelineEntry> {
    let mut rng = Rng(seed | 1);
    let mut ts = 0;
    (1..)
        .take(len)
        .map(|id| {
            ts += if rng.below(8) == 0 { 3_600 } else { rng.below(30) };
            let poster = 1 + rng.below(3);
            let item = 1 + rng.below(12);
            let kind = match rng.below(10) {
                0..=3 => EntryKind::Label(if rng.below(2) == 0 {
                    LabelChange::added(Label::new(item, format!("label-{item}")))
                } else {
                    LabelChange::removed(Label::new(item, format!("label-{item}")))
                }),
                4 | 5 => {
                    let target = ReviewTarget::user(item, format!("user-{item}"));
                    EntryKind::ReviewRequest(if rng.below(2) == 0 {
                        ReviewRequestChange::requested(target)
                    } else {
                        ReviewRequestChange::withdrawn(target)
                    })
                }
                6 => EntryKind::Close,
                7 => EntryKind::Reopen,
                _ => EntryKind::Comment,
            };
            TimelineEntry::new(id, poster, ts, kind)
        })
        .collect()
}

fn bench_compact(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline.compact");
    let compactor = Compactor::default();

    for tier in TIERS {
        let timeline = synthetic_timeline(tier.entries, 0x5EED_u64 + tier.entries as u64);
        let now = timeline.last().map_or(0, |e| e.created_unix);
        group.throughput(Throughput::Elements(tier.entries as u64));

        group.bench_with_input(
            BenchmarkId::new("default_policy", tier.name),
            &timeline,
            |b, timeline| {
                b.iter_batched(
                    || timeline.clone(),
                    |mut timeline| black_box(compactor.compact(&mut timeline, now)),
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compact);
criterion_main!(benches);
